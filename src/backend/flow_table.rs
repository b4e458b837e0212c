//! Flow-table backend: match-action rules in a P4/OpenFlow-like notation.

use serde::{Deserialize, Serialize};

use crate::model::{Protocol, Statement};

use super::{Renderer, Target};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowTableConfig {
    /// Switch path attached to connectivity rules.
    pub path: Vec<String>,
}

impl Default for FlowTableConfig {
    fn default() -> Self {
        Self {
            path: vec!["SW1".to_string(), "SW3".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FlowTable {
    config: FlowTableConfig,
}

impl FlowTable {
    pub fn new(config: FlowTableConfig) -> Self {
        Self { config }
    }

    fn path_list(&self) -> String {
        let quoted: Vec<String> = self.config.path.iter().map(|s| format!("'{s}'")).collect();
        format!("[{}]", quoted.join(","))
    }
}

impl Renderer for FlowTable {
    fn target(&self) -> Target {
        Target::FlowTable
    }

    fn render(&self, statement: &Statement) -> String {
        match statement {
            Statement::AclAllow { src, dst } => format!(
                "acl_table: match={{'src':'{src}','dst':'{dst}','proto':'{}'}}, action=allow",
                Protocol::Tcp
            ),
            Statement::AclDeny => format!(
                "acl_table: match={{'proto':'{}'}}, action=deny",
                Protocol::Icmp
            ),
            Statement::Meter { host, rate } => {
                format!("meter_table: match={{'src':'{host}'}}, action={{'set_rate':'{rate}'}}")
            }
            Statement::Qos { vlan } => {
                format!("qos_table: match={{'Vlan':{vlan}}}, action={{'set_priority':'high'}}")
            }
            Statement::Connectivity { src, dst } => format!(
                "flow_table: match={{'src':'{src}','dst':'{dst}'}}, action='forward', path={}",
                self.path_list()
            ),
            Statement::VlanCreate { .. } => "VLAN setup via P4 metadata (optional)".to_string(),
            Statement::VlanDelete { .. } => "Remove VLAN metadata in tables".to_string(),
            Statement::Route { destination, .. } => {
                format!("flow_table: match={{'dst':'{destination}'}}, action='forward'")
            }
            Statement::Monitor { .. } => {
                "monitor_table: timestamps/counters to measure RTT".to_string()
            }
            Statement::Backup => "Save controller switch state to JSON/YAML".to_string(),
        }
    }
}
