//! Token types for the IntentLang lexer.

use std::net::Ipv4Addr;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Statement keywords
    Allow,
    Block,
    Limit,
    Assign,
    Ensure,
    Create,
    Delete,
    Set,
    Monitor,
    Backup,

    // Connective keywords
    From,
    To,
    Bandwidth,
    For,
    Qos,
    High,
    Vlan,
    Connectivity,
    Between,
    And,
    Name,
    Route,
    Via,
    Latency,
    Configuration,
    Now,
    Tcp,
    Icmp,
    Mbps,

    // Literals
    Ident(String),
    Integer(u64),
    Rate(u64), // 10Mbps
    Address(Ipv4Addr),
    Cidr(Ipv4Addr, u8),

    // Special
    Newline,
    Eof,
}

impl TokenKind {
    /// Look up the keyword spelled by `word`.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "allow" => TokenKind::Allow,
            "block" => TokenKind::Block,
            "limit" => TokenKind::Limit,
            "assign" => TokenKind::Assign,
            "ensure" => TokenKind::Ensure,
            "create" => TokenKind::Create,
            "delete" => TokenKind::Delete,
            "set" => TokenKind::Set,
            "monitor" => TokenKind::Monitor,
            "backup" => TokenKind::Backup,
            "from" => TokenKind::From,
            "to" => TokenKind::To,
            "bandwidth" => TokenKind::Bandwidth,
            "for" => TokenKind::For,
            "qos" => TokenKind::Qos,
            "high" => TokenKind::High,
            "vlan" => TokenKind::Vlan,
            "connectivity" => TokenKind::Connectivity,
            "between" => TokenKind::Between,
            "and" => TokenKind::And,
            "name" => TokenKind::Name,
            "route" => TokenKind::Route,
            "via" => TokenKind::Via,
            "latency" => TokenKind::Latency,
            "configuration" => TokenKind::Configuration,
            "now" => TokenKind::Now,
            "tcp" => TokenKind::Tcp,
            "icmp" => TokenKind::Icmp,
            "Mbps" => TokenKind::Mbps,
            _ => return None,
        };
        Some(kind)
    }

    /// The source spelling of a keyword token, `None` for literals.
    pub fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Allow => "allow",
            TokenKind::Block => "block",
            TokenKind::Limit => "limit",
            TokenKind::Assign => "assign",
            TokenKind::Ensure => "ensure",
            TokenKind::Create => "create",
            TokenKind::Delete => "delete",
            TokenKind::Set => "set",
            TokenKind::Monitor => "monitor",
            TokenKind::Backup => "backup",
            TokenKind::From => "from",
            TokenKind::To => "to",
            TokenKind::Bandwidth => "bandwidth",
            TokenKind::For => "for",
            TokenKind::Qos => "qos",
            TokenKind::High => "high",
            TokenKind::Vlan => "vlan",
            TokenKind::Connectivity => "connectivity",
            TokenKind::Between => "between",
            TokenKind::And => "and",
            TokenKind::Name => "name",
            TokenKind::Route => "route",
            TokenKind::Via => "via",
            TokenKind::Latency => "latency",
            TokenKind::Configuration => "configuration",
            TokenKind::Now => "now",
            TokenKind::Tcp => "tcp",
            TokenKind::Icmp => "icmp",
            TokenKind::Mbps => "Mbps",
            _ => return None,
        };
        Some(text)
    }

    /// Short description used in diagnostics.
    pub fn describe(&self) -> String {
        if let Some(text) = self.keyword_text() {
            return format!("'{text}'");
        }
        match self {
            TokenKind::Ident(s) => format!("identifier '{s}'"),
            TokenKind::Integer(v) => format!("integer {v}"),
            TokenKind::Rate(v) => format!("rate {v}Mbps"),
            TokenKind::Address(a) => format!("address {a}"),
            TokenKind::Cidr(a, p) => format!("prefix {a}/{p}"),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("{self:?}"),
        }
    }
}
