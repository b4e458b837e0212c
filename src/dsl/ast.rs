//! Parse tree for IntentLang.
//!
//! One node per source statement, still holding unresolved host names.
//! The semantic builder turns these into [`crate::model::Statement`]s.

use std::net::Ipv4Addr;

/// A parsed program: statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<StatementNode>,
}

/// A statement together with the 1-based source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementNode {
    pub line: usize,
    pub kind: StatementKind,
}

/// One alternative per grammar rule.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `allow tcp from <endpoint> to <endpoint>`
    Allow { src: EndpointRef, dst: EndpointRef },
    /// `block icmp`
    Block,
    /// `limit bandwidth <n>Mbps for <endpoint>`
    Limit { rate_mbps: u64, host: EndpointRef },
    /// `assign qos high to vlan <n>`
    AssignQos { vlan: u64 },
    /// `ensure connectivity between <endpoint> and <endpoint>`
    EnsureConnectivity { src: EndpointRef, dst: EndpointRef },
    /// `create vlan <n> name <ident>`
    CreateVlan { vlan: u64, name: String },
    /// `delete vlan <n>`
    DeleteVlan { vlan: u64 },
    /// `set route <cidr> via <address>`
    SetRoute {
        network: Ipv4Addr,
        prefix: u8,
        next_hop: Ipv4Addr,
    },
    /// `monitor latency between <endpoint> and <endpoint>`
    MonitorLatency { src: EndpointRef, dst: EndpointRef },
    /// `backup configuration now`
    BackupNow,
}

/// An endpoint as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointRef {
    Address(Ipv4Addr),
    Host(String),
}
