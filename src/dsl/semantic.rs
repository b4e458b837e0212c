//! Semantic builder: lowers the parse tree into [`Statement`]s.
//!
//! One pass, one statement per node, no statement looks at another.
//! Host names go through the [`HostTable`]; misses pass through and are
//! tagged [`EndpointOrigin::Unresolved`](crate::model::EndpointOrigin).

use tracing::warn;

use crate::model::{Cidr, Endpoint, HostTable, Rate, Statement};

use super::ast::*;

/// Build the semantic model for every statement, in source order.
pub fn build_program(program: &Program, hosts: &HostTable) -> Vec<Statement> {
    program
        .statements
        .iter()
        .map(|node| build_statement(node, hosts))
        .collect()
}

/// Build the semantic model for a single statement node.
pub fn build_statement(node: &StatementNode, hosts: &HostTable) -> Statement {
    let endpoint = |r: &EndpointRef| resolve_endpoint(r, hosts, node.line);

    match &node.kind {
        StatementKind::Allow { src, dst } => Statement::AclAllow {
            src: endpoint(src),
            dst: endpoint(dst),
        },
        StatementKind::Block => Statement::AclDeny,
        StatementKind::Limit { rate_mbps, host } => Statement::Meter {
            host: endpoint(host),
            rate: Rate::mbps(*rate_mbps),
        },
        StatementKind::AssignQos { vlan } => Statement::Qos { vlan: *vlan },
        StatementKind::EnsureConnectivity { src, dst } => Statement::Connectivity {
            src: endpoint(src),
            dst: endpoint(dst),
        },
        StatementKind::CreateVlan { vlan, name } => Statement::VlanCreate {
            vlan: *vlan,
            name: name.clone(),
        },
        StatementKind::DeleteVlan { vlan } => Statement::VlanDelete { vlan: *vlan },
        StatementKind::SetRoute {
            network,
            prefix,
            next_hop,
        } => Statement::Route {
            destination: Cidr::from_lexed(*network, *prefix),
            next_hop: *next_hop,
        },
        StatementKind::MonitorLatency { src, dst } => Statement::Monitor {
            src: endpoint(src),
            dst: endpoint(dst),
        },
        StatementKind::BackupNow => Statement::Backup,
    }
}

fn resolve_endpoint(r: &EndpointRef, hosts: &HostTable, line: usize) -> Endpoint {
    match r {
        EndpointRef::Address(addr) => Endpoint::address(*addr),
        EndpointRef::Host(name) => {
            let ep = hosts.resolve(name);
            if ep.is_unresolved() {
                warn!(line, host = %name, "host name not in alias table, passing through");
            }
            ep
        }
    }
}
