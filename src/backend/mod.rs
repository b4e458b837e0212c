//! Code generators: one [`Renderer`] per target control plane.

pub mod flow_table;
pub mod host_net;
pub mod router_cli;

pub use flow_table::{FlowTable, FlowTableConfig};
pub use host_net::{HostNet, HostNetConfig};
pub use router_cli::{NetmaskMode, RouterCli, RouterCliConfig};

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::model::Statement;

/// Common interface for all code generators.
///
/// Rendering is total over [`Statement`] and never fails. Renderers hold
/// only immutable configuration, so they can be shared across threads.
pub trait Renderer: Send + Sync {
    /// Which target this renderer produces text for.
    fn target(&self) -> Target;

    /// Render a single statement into target text.
    fn render(&self, statement: &Statement) -> String;

    /// Short machine name, e.g. `router-cli`.
    fn name(&self) -> &'static str {
        self.target().name()
    }
}

/// The supported target control planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    FlowTable,
    RouterCli,
    HostNet,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::FlowTable, Target::RouterCli, Target::HostNet];

    pub fn name(&self) -> &'static str {
        match self {
            Target::FlowTable => "flow-table",
            Target::RouterCli => "router-cli",
            Target::HostNet => "host-net",
        }
    }

    /// Column heading in the presentation table.
    pub fn title(&self) -> &'static str {
        match self {
            Target::FlowTable => "P4/OpenFlow",
            Target::RouterCli => "Cisco Config",
            Target::HostNet => "Linux Config",
        }
    }
}

/// The `--target` choice: every target, or just one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TargetSelection {
    #[default]
    All,
    FlowTable,
    RouterCli,
    HostNet,
}

impl TargetSelection {
    pub fn targets(&self) -> Vec<Target> {
        match self {
            TargetSelection::All => Target::ALL.to_vec(),
            TargetSelection::FlowTable => vec![Target::FlowTable],
            TargetSelection::RouterCli => vec![Target::RouterCli],
            TargetSelection::HostNet => vec![Target::HostNet],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of renderers.
pub struct Backends {
    renderers: Vec<Box<dyn Renderer>>,
}

impl Backends {
    /// All three targets, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::select(config, &Target::ALL)
    }

    /// Only the given targets, in the given order.
    pub fn select(config: &Config, targets: &[Target]) -> Self {
        let renderers = targets
            .iter()
            .map(|target| -> Box<dyn Renderer> {
                match target {
                    Target::FlowTable => Box::new(FlowTable::new(config.flow_table.clone())),
                    Target::RouterCli => Box::new(RouterCli::new(config.router_cli.clone())),
                    Target::HostNet => Box::new(HostNet::new(config.host_net.clone())),
                }
            })
            .collect();
        Self { renderers }
    }

    pub fn targets(&self) -> Vec<Target> {
        self.renderers.iter().map(|r| r.target()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Renderer + 'static)> + '_ {
        self.renderers.iter().map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Render one statement with every backend, in backend order.
    pub fn render_all(&self, statement: &Statement) -> Vec<(Target, String)> {
        self.iter()
            .map(|r| (r.target(), r.render(statement)))
            .collect()
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, Rate};

    fn ep(v: &str) -> Endpoint {
        Endpoint::from_value(v)
    }

    fn every_variant() -> Vec<Statement> {
        vec![
            Statement::AclAllow {
                src: ep("10.0.0.1"),
                dst: ep("10.0.0.2"),
            },
            Statement::AclDeny,
            Statement::Meter {
                host: ep("10.0.0.1"),
                rate: Rate::mbps(10),
            },
            Statement::Qos { vlan: 10 },
            Statement::Connectivity {
                src: ep("10.0.0.1"),
                dst: ep("10.0.0.2"),
            },
            Statement::VlanCreate {
                vlan: 20,
                name: "Engineering".to_string(),
            },
            Statement::VlanDelete { vlan: 10 },
            Statement::Route {
                destination: "10.0.0.0/24".parse().unwrap(),
                next_hop: "192.168.1.1".parse().unwrap(),
            },
            Statement::Monitor {
                src: ep("10.0.0.1"),
                dst: ep("10.0.0.2"),
            },
            Statement::Backup,
        ]
    }

    #[test]
    fn every_backend_renders_every_variant() {
        let backends = Backends::default();
        for stmt in every_variant() {
            for (target, text) in backends.render_all(&stmt) {
                assert!(!text.is_empty(), "{target} rendered nothing for {stmt:?}");
            }
        }
    }

    #[test]
    fn default_backend_order() {
        assert_eq!(Backends::default().targets(), Target::ALL.to_vec());
    }

    #[test]
    fn select_single_target() {
        let backends = Backends::select(&Config::default(), &[Target::HostNet]);
        assert_eq!(backends.len(), 1);
        let out = backends.render_all(&Statement::AclDeny);
        assert_eq!(out, vec![(Target::HostNet, "iptables -A INPUT -p icmp -j DROP".to_string())]);
    }

    #[test]
    fn target_selection_all_and_single() {
        assert_eq!(TargetSelection::default(), TargetSelection::All);
        assert_eq!(TargetSelection::All.targets(), Target::ALL.to_vec());
        assert_eq!(TargetSelection::RouterCli.targets(), vec![Target::RouterCli]);
        let parsed = TargetSelection::from_str("all", false).unwrap();
        assert_eq!(parsed, TargetSelection::All);
        let parsed = TargetSelection::from_str("host-net", false).unwrap();
        assert_eq!(parsed.targets(), vec![Target::HostNet]);
    }

    #[test]
    fn renderer_names() {
        let names: Vec<&str> = Backends::default().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["flow-table", "router-cli", "host-net"]);
    }

    #[test]
    fn renderers_are_shareable_across_threads() {
        let backends = Backends::default();
        let stmts = every_variant();
        std::thread::scope(|s| {
            for r in backends.iter() {
                let stmts = &stmts;
                s.spawn(move || {
                    for stmt in stmts {
                        assert!(!r.render(stmt).is_empty());
                    }
                });
            }
        });
    }
}
