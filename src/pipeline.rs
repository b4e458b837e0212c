//! Pipeline driver: source → semantic model → per-target text.
//!
//! Order is preserved end to end: the n-th [`CompiledLine`] is the n-th
//! non-blank source line.

use std::io::{self, BufRead};

use thiserror::Error;
use tracing::{debug, info_span};

use crate::backend::{Backends, Target};
use crate::dsl::semantic::build_statement;
use crate::dsl::{Compiler, ParseError};
use crate::model::{HostTable, Statement};

/// The built-in sample program, one intent of each kind.
pub const SAMPLE_PROGRAM: &[&str] = &[
    "allow tcp from A to B",
    "block icmp",
    "limit bandwidth 10Mbps for hostA",
    "assign qos high to vlan 10",
    "ensure connectivity between hostA and hostB",
    "create vlan 20 name Engineering",
    "delete vlan 10",
    "set route 10.0.0.0/24 via 192.168.1.1",
    "monitor latency between hostA and hostB",
    "backup configuration now",
];

/// The sample program as a single source string.
pub fn sample_source() -> String {
    SAMPLE_PROGRAM.join("\n")
}

/// Compile source text into the ordered semantic model.
pub fn compile(source: &str, hosts: &HostTable) -> Result<Vec<Statement>, ParseError> {
    let _span = info_span!("compile", bytes = source.len()).entered();
    let statements = Compiler::compile(source, hosts)?;
    debug!(statements = statements.len(), "compiled");
    Ok(statements)
}

/// One statement with its source line and rendered outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledLine {
    /// 1-based position among the compiled statements.
    pub index: usize,
    /// 1-based source line.
    pub line: usize,
    /// The trimmed source text of the statement.
    pub source: String,
    pub statement: Statement,
    /// One fragment per backend, in backend order.
    pub renders: Vec<(Target, String)>,
}

impl CompiledLine {
    pub fn render_for(&self, target: Target) -> Option<&str> {
        self.renders
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, text)| text.as_str())
    }
}

/// Compile and render, pairing each statement with its own source line.
pub fn annotate(
    source: &str,
    hosts: &HostTable,
    backends: &Backends,
) -> Result<Vec<CompiledLine>, ParseError> {
    let _span = info_span!("annotate", backends = backends.len()).entered();
    let program = Compiler::parse(source)?;
    let lines: Vec<&str> = source.lines().collect();

    let compiled: Vec<CompiledLine> = program
        .statements
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let statement = build_statement(node, hosts);
            let renders = backends.render_all(&statement);
            CompiledLine {
                index: i + 1,
                line: node.line,
                source: lines
                    .get(node.line - 1)
                    .map(|l| l.trim().to_string())
                    .unwrap_or_default(),
                statement,
                renders,
            }
        })
        .collect();

    debug!(statements = compiled.len(), "annotated");
    Ok(compiled)
}

/// Render an already-built model, e.g. one read back from JSON. There is
/// no IntentLang source, so `source` is left empty and `line` is the
/// position in `statements`.
pub fn render_statements(statements: Vec<Statement>, backends: &Backends) -> Vec<CompiledLine> {
    statements
        .into_iter()
        .enumerate()
        .map(|(i, statement)| CompiledLine {
            index: i + 1,
            line: i + 1,
            source: String::new(),
            renders: backends.render_all(&statement),
            statement,
        })
        .collect()
}

/// Error reading semantic-model JSON lines.
#[derive(Debug, Error)]
pub enum ReadModelError {
    #[error("failed to read semantic model input")]
    Io(#[from] io::Error),
    #[error("invalid semantic model on line {line}")]
    Invalid {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read one JSON statement per line. Blank lines are skipped; the first
/// invalid line aborts with its 1-based line number.
pub fn read_models<R: BufRead>(reader: R) -> Result<Vec<Statement>, ReadModelError> {
    let mut statements = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let statement = serde_json::from_str(&line)
            .map_err(|source| ReadModelError::Invalid { line: i + 1, source })?;
        statements.push(statement);
    }
    debug!(statements = statements.len(), "read semantic model");
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_program_compiles_in_order() {
        let stmts = compile(&sample_source(), &HostTable::default()).unwrap();
        let types: Vec<&str> = stmts.iter().map(|s| s.type_name()).collect();
        assert_eq!(
            types,
            vec![
                "acl",
                "acl",
                "meter",
                "qos",
                "connectivity",
                "vlan",
                "vlan",
                "route",
                "monitor",
                "backup"
            ]
        );
    }

    #[test]
    fn annotate_pairs_source_lines() {
        let src = "\n  block icmp  \n\ndelete vlan 10\n";
        let lines = annotate(src, &HostTable::default(), &Backends::default()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].index, 1);
        assert_eq!(lines[0].line, 2);
        assert_eq!(lines[0].source, "block icmp");
        assert_eq!(lines[1].index, 2);
        assert_eq!(lines[1].line, 4);
        assert_eq!(lines[1].source, "delete vlan 10");
        assert_eq!(lines[1].render_for(Target::RouterCli), Some("no vlan 10"));
    }

    #[test]
    fn annotate_propagates_parse_error() {
        let err = annotate("block icmp\nblock tcp", &HostTable::default(), &Backends::default())
            .unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn render_statements_keeps_order() {
        let out = render_statements(vec![Statement::Backup, Statement::AclDeny], &Backends::default());
        assert_eq!(out.len(), 2);
        assert!(out[0].source.is_empty());
        assert_eq!(
            out[0].render_for(Target::RouterCli),
            Some("copy running-config startup-config")
        );
        assert_eq!(
            out[1].render_for(Target::HostNet),
            Some("iptables -A INPUT -p icmp -j DROP")
        );
    }

    #[test]
    fn read_models_skips_blank_lines() {
        let input = "{\"type\":\"backup\",\"action\":\"now\"}\n\n   \n{\"type\":\"vlan\",\"id\":10,\"action\":\"delete\"}\n";
        let stmts = read_models(input.as_bytes()).unwrap();
        assert_eq!(stmts, vec![Statement::Backup, Statement::VlanDelete { vlan: 10 }]);
    }

    #[test]
    fn read_models_reports_invalid_line() {
        let input = "{\"type\":\"backup\",\"action\":\"now\"}\n\n{\"type\":\"firewall\"}\n";
        let err = read_models(input.as_bytes()).unwrap_err();
        assert!(matches!(err, ReadModelError::Invalid { line: 3, .. }));
        assert!(err.to_string().starts_with("invalid semantic model on line 3"));
    }
}
