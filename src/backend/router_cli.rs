//! Router-CLI backend: Cisco-IOS-style configuration lines.
//!
//! Multi-line output uses `\n` with a leading space for sub-mode commands.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::model::{Cidr, Protocol, Statement};

use super::{Renderer, Target};

/// How a route prefix length becomes a netmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NetmaskMode {
    /// `/24` maps to `255.255.255.0`; every other length to `255.255.255.255`.
    #[default]
    Legacy,
    /// Mask computed from the prefix length.
    Exact,
}

impl NetmaskMode {
    pub fn netmask(&self, cidr: &Cidr) -> Ipv4Addr {
        match self {
            NetmaskMode::Legacy if cidr.prefix() == 24 => Ipv4Addr::new(255, 255, 255, 0),
            NetmaskMode::Legacy => Ipv4Addr::BROADCAST,
            NetmaskMode::Exact => cidr.netmask(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterCliConfig {
    pub allow_acl: String,
    pub block_acl: String,
    pub netmask: NetmaskMode,
}

impl Default for RouterCliConfig {
    fn default() -> Self {
        Self {
            allow_acl: "ALLOW_TRAFFIC".to_string(),
            block_acl: "BLOCK_TRAFFIC".to_string(),
            netmask: NetmaskMode::Legacy,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouterCli {
    config: RouterCliConfig,
}

impl RouterCli {
    pub fn new(config: RouterCliConfig) -> Self {
        Self { config }
    }
}

impl Renderer for RouterCli {
    fn target(&self) -> Target {
        Target::RouterCli
    }

    fn render(&self, statement: &Statement) -> String {
        match statement {
            Statement::AclAllow { src, dst } => format!(
                "ip access-list extended {}\n permit {} host {src} host {dst}",
                self.config.allow_acl,
                Protocol::Tcp
            ),
            Statement::AclDeny => format!(
                "ip access-list extended {}\n deny {} any any",
                self.config.block_acl,
                Protocol::Icmp
            ),
            Statement::Meter { rate, .. } => format!(
                "class-map match-any HOSTA\n match ip address HOSTA_ACL\npolicy-map LIMIT_HOSTA\n class HOSTA police {rate} conform-action transmit"
            ),
            Statement::Qos { vlan } => {
                format!("interface vlan{vlan}\n priority-queue out\n mls qos trust cos")
            }
            Statement::Connectivity { .. } => {
                "Controller installs static routes or ACLs".to_string()
            }
            Statement::VlanCreate { vlan, name } => format!("vlan {vlan} name {name}"),
            Statement::VlanDelete { vlan } => format!("no vlan {vlan}"),
            Statement::Route {
                destination,
                next_hop,
            } => format!(
                "ip route {} {} {next_hop}",
                destination.network(),
                self.config.netmask.netmask(destination)
            ),
            Statement::Monitor { .. } => "Use IP SLA or controller probe".to_string(),
            Statement::Backup => "copy running-config startup-config".to_string(),
        }
    }
}
