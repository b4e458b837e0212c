//! intentc: an intent-based network configuration compiler.
//!
//! IntentLang source is parsed into a canonical semantic model and rendered
//! for three targets: a flow-table (P4/OpenFlow-like) plane, a router CLI
//! (Cisco-IOS-like) and a host network stack (Linux iptables/tc/ip).

pub mod backend;
pub mod config;
pub mod dsl;
pub mod model;
pub mod pipeline;
pub mod report;
