//! Host-network backend: Linux iptables / tc / ip command lines.

use serde::{Deserialize, Serialize};

use crate::model::{Protocol, Statement};

use super::{Renderer, Target};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostNetConfig {
    /// Interface that carries qdiscs and VLAN sub-interfaces.
    pub device: String,
    /// Next hop for host routes added by connectivity intents.
    pub gateway: String,
    /// Rate of the fixed high-priority tc class.
    pub qos_rate: String,
    pub ping_count: u32,
    pub interfaces_file: String,
    pub backup_file: String,
}

impl Default for HostNetConfig {
    fn default() -> Self {
        Self {
            device: "eth0".to_string(),
            gateway: "10.0.0.254".to_string(),
            qos_rate: "100mbit".to_string(),
            ping_count: 4,
            interfaces_file: "/etc/network/interfaces".to_string(),
            backup_file: "/backup/interfaces.bak".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HostNet {
    config: HostNetConfig,
}

impl HostNet {
    pub fn new(config: HostNetConfig) -> Self {
        Self { config }
    }
}

impl Renderer for HostNet {
    fn target(&self) -> Target {
        Target::HostNet
    }

    fn render(&self, statement: &Statement) -> String {
        let dev = &self.config.device;
        match statement {
            Statement::AclAllow { src, dst } => format!(
                "iptables -A INPUT -p {} -s {src} -d {dst} -j ACCEPT",
                Protocol::Tcp
            ),
            Statement::AclDeny => format!("iptables -A INPUT -p {} -j DROP", Protocol::Icmp),
            Statement::Meter { rate, .. } => format!(
                "tc qdisc add dev {dev} root handle 1: htb default 10; \
                 tc class add dev {dev} parent 1: classid 1:1 htb rate {rate}"
            ),
            Statement::Qos { .. } => format!(
                "tc class add dev {dev} parent 1: classid 1:10 htb rate {} prio 0",
                self.config.qos_rate
            ),
            Statement::Connectivity { dst, .. } => {
                format!("ip route add {dst}/32 via {}", self.config.gateway)
            }
            Statement::VlanCreate { vlan, .. } => {
                format!("ip link add link {dev} name {dev}.{vlan} type vlan id {vlan}")
            }
            Statement::VlanDelete { vlan } => format!("ip link delete {dev}.{vlan}"),
            Statement::Route {
                destination,
                next_hop,
            } => format!("ip route add {destination} via {next_hop}"),
            Statement::Monitor { dst, .. } => {
                format!("ping -c {} {dst}", self.config.ping_count)
            }
            Statement::Backup => format!(
                "cp {} {}",
                self.config.interfaces_file, self.config.backup_file
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Endpoint, Rate};

    fn ep(v: &str) -> Endpoint {
        Endpoint::from_value(v)
    }

    #[test]
    fn iptables_rules() {
        let hn = HostNet::default();
        assert_eq!(
            hn.render(&Statement::AclAllow {
                src: ep("10.0.0.1"),
                dst: ep("10.0.0.2"),
            }),
            "iptables -A INPUT -p tcp -s 10.0.0.1 -d 10.0.0.2 -j ACCEPT"
        );
        assert_eq!(hn.render(&Statement::AclDeny), "iptables -A INPUT -p icmp -j DROP");
    }

    #[test]
    fn tc_meter_and_qos() {
        let hn = HostNet::default();
        assert_eq!(
            hn.render(&Statement::Meter {
                host: ep("10.0.0.1"),
                rate: Rate::mbps(10),
            }),
            "tc qdisc add dev eth0 root handle 1: htb default 10; \
             tc class add dev eth0 parent 1: classid 1:1 htb rate 10Mbps"
        );
        assert_eq!(
            hn.render(&Statement::Qos { vlan: 10 }),
            "tc class add dev eth0 parent 1: classid 1:10 htb rate 100mbit prio 0"
        );
    }

    #[test]
    fn connectivity_host_route() {
        let out = HostNet::default().render(&Statement::Connectivity {
            src: ep("10.0.0.1"),
            dst: ep("10.0.0.2"),
        });
        assert_eq!(out, "ip route add 10.0.0.2/32 via 10.0.0.254");
    }

    #[test]
    fn vlan_sub_interfaces() {
        let hn = HostNet::default();
        assert_eq!(
            hn.render(&Statement::VlanCreate {
                vlan: 20,
                name: "Engineering".to_string(),
            }),
            "ip link add link eth0 name eth0.20 type vlan id 20"
        );
        assert_eq!(
            hn.render(&Statement::VlanDelete { vlan: 10 }),
            "ip link delete eth0.10"
        );
    }

    #[test]
    fn route_probe_and_backup() {
        let hn = HostNet::default();
        assert_eq!(
            hn.render(&Statement::Route {
                destination: "10.0.0.0/24".parse().unwrap(),
                next_hop: "192.168.1.1".parse().unwrap(),
            }),
            "ip route add 10.0.0.0/24 via 192.168.1.1"
        );
        assert_eq!(
            hn.render(&Statement::Monitor {
                src: ep("10.0.0.1"),
                dst: ep("10.0.0.2"),
            }),
            "ping -c 4 10.0.0.2"
        );
        assert_eq!(
            hn.render(&Statement::Backup),
            "cp /etc/network/interfaces /backup/interfaces.bak"
        );
    }

    #[test]
    fn device_from_config() {
        let hn = HostNet::new(HostNetConfig {
            device: "bond0".to_string(),
            ..HostNetConfig::default()
        });
        assert_eq!(
            hn.render(&Statement::VlanDelete { vlan: 7 }),
            "ip link delete bond0.7"
        );
    }
}
