//! Parser for IntentLang.
//!
//! Parses a token stream into the parse tree. The first token of each line
//! selects exactly one statement rule, so no backtracking is needed. Newlines
//! terminate statements and are never skipped inside one.

use std::net::Ipv4Addr;

use super::ast::*;
use super::error::ParseError;
use super::token::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();

        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }

            let line = self.peek().line;
            let kind = self.parse_statement()?;
            self.expect_end_of_statement()?;
            statements.push(StatementNode { line, kind });
        }

        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<StatementKind, ParseError> {
        match &self.peek().kind {
            TokenKind::Allow => self.parse_allow(),
            TokenKind::Block => self.parse_block(),
            TokenKind::Limit => self.parse_limit(),
            TokenKind::Assign => self.parse_assign_qos(),
            TokenKind::Ensure => self.parse_ensure_connectivity(),
            TokenKind::Create => self.parse_create_vlan(),
            TokenKind::Delete => self.parse_delete_vlan(),
            TokenKind::Set => self.parse_set_route(),
            TokenKind::Monitor => self.parse_monitor_latency(),
            TokenKind::Backup => self.parse_backup(),
            _ => Err(self.error_here("a statement keyword")),
        }
    }

    /// `allow tcp from <endpoint> to <endpoint>`
    fn parse_allow(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Allow)?;
        self.expect(TokenKind::Tcp)?;
        self.expect(TokenKind::From)?;
        let src = self.expect_endpoint()?;
        self.expect(TokenKind::To)?;
        let dst = self.expect_endpoint()?;
        Ok(StatementKind::Allow { src, dst })
    }

    fn parse_block(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Block)?;
        self.expect(TokenKind::Icmp)?;
        Ok(StatementKind::Block)
    }

    /// `limit bandwidth <n>Mbps for <endpoint>`; `<n> Mbps` is accepted too.
    fn parse_limit(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Limit)?;
        self.expect(TokenKind::Bandwidth)?;
        let rate_mbps = self.expect_rate()?;
        self.expect(TokenKind::For)?;
        let host = self.expect_endpoint()?;
        Ok(StatementKind::Limit { rate_mbps, host })
    }

    fn parse_assign_qos(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Assign)?;
        self.expect(TokenKind::Qos)?;
        self.expect(TokenKind::High)?;
        self.expect(TokenKind::To)?;
        self.expect(TokenKind::Vlan)?;
        let vlan = self.expect_integer()?;
        Ok(StatementKind::AssignQos { vlan })
    }

    fn parse_ensure_connectivity(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Ensure)?;
        self.expect(TokenKind::Connectivity)?;
        let (src, dst) = self.parse_between()?;
        Ok(StatementKind::EnsureConnectivity { src, dst })
    }

    fn parse_create_vlan(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Create)?;
        self.expect(TokenKind::Vlan)?;
        let vlan = self.expect_integer()?;
        self.expect(TokenKind::Name)?;
        let name = self.expect_name()?;
        Ok(StatementKind::CreateVlan { vlan, name })
    }

    fn parse_delete_vlan(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Delete)?;
        self.expect(TokenKind::Vlan)?;
        let vlan = self.expect_integer()?;
        Ok(StatementKind::DeleteVlan { vlan })
    }

    /// `set route <cidr> via <address>`
    fn parse_set_route(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Set)?;
        self.expect(TokenKind::Route)?;
        let (network, prefix) = self.expect_cidr()?;
        self.expect(TokenKind::Via)?;
        let next_hop = self.expect_address()?;
        Ok(StatementKind::SetRoute {
            network,
            prefix,
            next_hop,
        })
    }

    fn parse_monitor_latency(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Monitor)?;
        self.expect(TokenKind::Latency)?;
        let (src, dst) = self.parse_between()?;
        Ok(StatementKind::MonitorLatency { src, dst })
    }

    fn parse_backup(&mut self) -> Result<StatementKind, ParseError> {
        self.expect(TokenKind::Backup)?;
        self.expect(TokenKind::Configuration)?;
        self.expect(TokenKind::Now)?;
        Ok(StatementKind::BackupNow)
    }

    /// `between <endpoint> and <endpoint>`
    fn parse_between(&mut self) -> Result<(EndpointRef, EndpointRef), ParseError> {
        self.expect(TokenKind::Between)?;
        let src = self.expect_endpoint()?;
        self.expect(TokenKind::And)?;
        let dst = self.expect_endpoint()?;
        Ok((src, dst))
    }

    // --- Utility methods ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let t = &self.tokens[self.pos.min(self.tokens.len() - 1)];
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.peek().kind == TokenKind::Eof
    }

    fn skip_newlines(&mut self) {
        while !self.is_at_end() && self.peek().kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let t = self.peek();
        ParseError::syntax(
            format!("expected {expected}, got {}", t.kind.describe()),
            t.line,
            t.col,
        )
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.error_here(&kind.describe()))
        }
    }

    fn expect_end_of_statement(&mut self) -> Result<(), ParseError> {
        match self.peek().kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.error_here("end of line")),
        }
    }

    fn expect_endpoint(&mut self) -> Result<EndpointRef, ParseError> {
        if let TokenKind::Address(addr) = self.peek().kind {
            self.advance();
            return Ok(EndpointRef::Address(addr));
        }
        match self.expect_name() {
            Ok(name) => Ok(EndpointRef::Host(name)),
            Err(_) => Err(self.error_here("address or host name")),
        }
    }

    /// Accept an identifier or a keyword as a name, so `name backup` and
    /// `from monitor` still parse in name position.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        let t = self.peek();
        let name = match &t.kind {
            TokenKind::Ident(s) => s.clone(),
            kind => match kind.keyword_text() {
                Some(text) => text.to_string(),
                None => return Err(self.error_here("name")),
            },
        };
        self.advance();
        Ok(name)
    }

    fn expect_integer(&mut self) -> Result<u64, ParseError> {
        match self.peek().kind {
            TokenKind::Integer(v) => {
                self.advance();
                Ok(v)
            }
            _ => Err(self.error_here("integer")),
        }
    }

    fn expect_rate(&mut self) -> Result<u64, ParseError> {
        let t = self.peek();
        let (line, col) = (t.line, t.col);
        let value = match t.kind {
            TokenKind::Rate(v) => {
                self.advance();
                v
            }
            TokenKind::Integer(v) => {
                self.advance();
                self.expect(TokenKind::Mbps)?;
                v
            }
            _ => return Err(self.error_here("rate such as 10Mbps")),
        };
        if value == 0 {
            return Err(ParseError::syntax("rate must be greater than zero", line, col));
        }
        Ok(value)
    }

    fn expect_address(&mut self) -> Result<Ipv4Addr, ParseError> {
        match self.peek().kind {
            TokenKind::Address(addr) => {
                self.advance();
                Ok(addr)
            }
            _ => Err(self.error_here("address")),
        }
    }

    fn expect_cidr(&mut self) -> Result<(Ipv4Addr, u8), ParseError> {
        match self.peek().kind {
            TokenKind::Cidr(addr, prefix) => {
                self.advance();
                Ok((addr, prefix))
            }
            _ => Err(self.error_here("network prefix such as 10.0.0.0/24")),
        }
    }
}
