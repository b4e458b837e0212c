//! IntentLang front end: source text → tokens → parse tree → semantic model.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;

pub use ast::{EndpointRef, Program, StatementKind, StatementNode};
pub use error::{ErrorKind, ParseError};

use crate::model::{HostTable, Statement};

use lexer::Lexer;
use parser::Parser;
use semantic::build_program;

/// The IntentLang compiler.
///
/// Lexer and parser are built per call; the only shared input is the
/// read-only host table.
pub struct Compiler;

impl Compiler {
    /// Parse source into a parse tree. Errors carry a context snippet.
    pub fn parse(source: &str) -> Result<Program, ParseError> {
        Self::parse_tokens(source).map_err(|e| e.with_source(source))
    }

    fn parse_tokens(source: &str) -> Result<Program, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::new(tokens).parse()
    }

    /// Parse and build the semantic model, one statement per non-blank line.
    pub fn compile(source: &str, hosts: &HostTable) -> Result<Vec<Statement>, ParseError> {
        let program = Self::parse(source)?;
        Ok(build_program(&program, hosts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_has_context() {
        let err = Compiler::parse("block icmp\nallow from A to B").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.context, "allow from A to B\n      ^");
    }

    #[test]
    fn lex_error_has_context() {
        let err = Compiler::parse("delete vlan 1x").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Lex);
        assert!(err.context.starts_with("delete vlan 1x\n"));
    }

    #[test]
    fn compile_counts_statements() {
        let stmts = Compiler::compile("block icmp\n\nbackup configuration now\n", &HostTable::default())
            .unwrap();
        assert_eq!(stmts, vec![Statement::AclDeny, Statement::Backup]);
    }
}
