//! Semantic model: the canonical, backend-agnostic form of one intent.
//!
//! A [`Statement`] is built once per parsed statement and never mutated.
//! Its JSON form has a `"type"` discriminator plus the variant's fields.

pub mod endpoint;
pub mod types;

pub use endpoint::{Endpoint, EndpointOrigin, HostTable};
pub use types::{Cidr, Metric, Priority, Protocol, Rate, RateUnit};

use std::net::Ipv4Addr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// One compiled intent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawStatement")]
pub enum Statement {
    AclAllow { src: Endpoint, dst: Endpoint },
    AclDeny,
    Meter { host: Endpoint, rate: Rate },
    Qos { vlan: u64 },
    Connectivity { src: Endpoint, dst: Endpoint },
    VlanCreate { vlan: u64, name: String },
    VlanDelete { vlan: u64 },
    Route { destination: Cidr, next_hop: Ipv4Addr },
    Monitor { src: Endpoint, dst: Endpoint },
    Backup,
}

impl Statement {
    /// The `"type"` discriminator of the JSON form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Statement::AclAllow { .. } | Statement::AclDeny => "acl",
            Statement::Meter { .. } => "meter",
            Statement::Qos { .. } => "qos",
            Statement::Connectivity { .. } => "connectivity",
            Statement::VlanCreate { .. } | Statement::VlanDelete { .. } => "vlan",
            Statement::Route { .. } => "route",
            Statement::Monitor { .. } => "monitor",
            Statement::Backup => "backup",
        }
    }

    /// The `"action"` attribute, for the variants that carry one.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Statement::AclAllow { .. } => Some("allow"),
            Statement::AclDeny => Some("deny"),
            Statement::VlanCreate { .. } => Some("create"),
            Statement::VlanDelete { .. } => Some("delete"),
            Statement::Backup => Some("now"),
            _ => None,
        }
    }

    pub fn protocol(&self) -> Option<Protocol> {
        match self {
            Statement::AclAllow { .. } => Some(Protocol::Tcp),
            Statement::AclDeny => Some(Protocol::Icmp),
            _ => None,
        }
    }

    pub fn priority(&self) -> Option<Priority> {
        matches!(self, Statement::Qos { .. }).then_some(Priority::High)
    }

    pub fn metric(&self) -> Option<Metric> {
        matches!(self, Statement::Monitor { .. }).then_some(Metric::Latency)
    }

    /// All endpoints referenced by this statement, in field order.
    pub fn endpoints(&self) -> Vec<&Endpoint> {
        match self {
            Statement::AclAllow { src, dst }
            | Statement::Connectivity { src, dst }
            | Statement::Monitor { src, dst } => vec![src, dst],
            Statement::Meter { host, .. } => vec![host],
            _ => Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        match self {
            Statement::AclAllow { src, dst } => {
                map.serialize_entry("action", "allow")?;
                map.serialize_entry("protocol", Protocol::Tcp.as_str())?;
                map.serialize_entry("src", src)?;
                map.serialize_entry("dst", dst)?;
            }
            Statement::AclDeny => {
                map.serialize_entry("action", "deny")?;
                map.serialize_entry("protocol", Protocol::Icmp.as_str())?;
            }
            Statement::Meter { host, rate } => {
                map.serialize_entry("host", host)?;
                map.serialize_entry("rate", &rate.to_string())?;
            }
            Statement::Qos { vlan } => {
                map.serialize_entry("Vlan", vlan)?;
                map.serialize_entry("priority", Priority::High.as_str())?;
            }
            Statement::Connectivity { src, dst } => {
                map.serialize_entry("src", src)?;
                map.serialize_entry("dst", dst)?;
            }
            Statement::VlanCreate { vlan, name } => {
                map.serialize_entry("id", vlan)?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("action", "create")?;
            }
            Statement::VlanDelete { vlan } => {
                map.serialize_entry("id", vlan)?;
                map.serialize_entry("action", "delete")?;
            }
            Statement::Route {
                destination,
                next_hop,
            } => {
                map.serialize_entry("dst", &destination.to_string())?;
                map.serialize_entry("next_hop", &next_hop.to_string())?;
            }
            Statement::Monitor { src, dst } => {
                map.serialize_entry("metric", Metric::Latency.as_str())?;
                map.serialize_entry("src", src)?;
                map.serialize_entry("dst", dst)?;
            }
            Statement::Backup => {
                map.serialize_entry("action", "now")?;
            }
        }
        map.end()
    }
}

/// Error reading a statement back from its JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown statement type '{0}'")]
    UnknownType(String),
    #[error("unknown action '{action}' for type '{kind}'")]
    UnknownAction { kind: String, action: String },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("invalid value for '{field}': {value}")]
    Invalid { field: &'static str, value: String },
}

impl ModelError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        ModelError::Invalid {
            field,
            value: value.into(),
        }
    }
}

/// Flat JSON shape shared by every statement type.
#[derive(Debug, Deserialize)]
struct RawStatement {
    #[serde(rename = "type")]
    kind: String,
    action: Option<String>,
    protocol: Option<String>,
    src: Option<String>,
    dst: Option<String>,
    host: Option<String>,
    rate: Option<String>,
    #[serde(rename = "Vlan")]
    qos_vlan: Option<u64>,
    priority: Option<String>,
    id: Option<u64>,
    name: Option<String>,
    next_hop: Option<String>,
    metric: Option<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ModelError> {
    value.ok_or(ModelError::MissingField(field))
}

fn expect_fixed(value: Option<&str>, field: &'static str, fixed: &str) -> Result<(), ModelError> {
    match value {
        None => Ok(()),
        Some(v) if v == fixed => Ok(()),
        Some(v) => Err(ModelError::invalid(field, v)),
    }
}

impl TryFrom<RawStatement> for Statement {
    type Error = ModelError;

    fn try_from(raw: RawStatement) -> Result<Self, Self::Error> {
        let action = raw.action.as_deref();
        let statement = match raw.kind.as_str() {
            "acl" => match required(action, "action")? {
                "allow" => {
                    expect_fixed(raw.protocol.as_deref(), "protocol", "tcp")?;
                    Statement::AclAllow {
                        src: Endpoint::from_value(required(raw.src, "src")?),
                        dst: Endpoint::from_value(required(raw.dst, "dst")?),
                    }
                }
                "deny" => {
                    expect_fixed(raw.protocol.as_deref(), "protocol", "icmp")?;
                    Statement::AclDeny
                }
                other => return Err(unknown_action(&raw.kind, other)),
            },
            "meter" => Statement::Meter {
                host: Endpoint::from_value(required(raw.host, "host")?),
                rate: required(raw.rate, "rate")?.parse()?,
            },
            "qos" => {
                expect_fixed(raw.priority.as_deref(), "priority", "high")?;
                Statement::Qos {
                    vlan: required(raw.qos_vlan, "Vlan")?,
                }
            }
            "connectivity" => Statement::Connectivity {
                src: Endpoint::from_value(required(raw.src, "src")?),
                dst: Endpoint::from_value(required(raw.dst, "dst")?),
            },
            "vlan" => match required(action, "action")? {
                "create" => Statement::VlanCreate {
                    vlan: required(raw.id, "id")?,
                    name: required(raw.name, "name")?,
                },
                "delete" => Statement::VlanDelete {
                    vlan: required(raw.id, "id")?,
                },
                other => return Err(unknown_action(&raw.kind, other)),
            },
            "route" => {
                let next_hop = required(raw.next_hop, "next_hop")?;
                Statement::Route {
                    destination: required(raw.dst, "dst")?.parse()?,
                    next_hop: next_hop
                        .parse()
                        .map_err(|_| ModelError::invalid("next_hop", next_hop))?,
                }
            }
            "monitor" => {
                expect_fixed(raw.metric.as_deref(), "metric", "latency")?;
                Statement::Monitor {
                    src: Endpoint::from_value(required(raw.src, "src")?),
                    dst: Endpoint::from_value(required(raw.dst, "dst")?),
                }
            }
            "backup" => {
                expect_fixed(action, "action", "now")?;
                Statement::Backup
            }
            other => return Err(ModelError::UnknownType(other.to_string())),
        };
        Ok(statement)
    }
}

fn unknown_action(kind: &str, action: &str) -> ModelError {
    ModelError::UnknownAction {
        kind: kind.to_string(),
        action: action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ep(value: &str) -> Endpoint {
        Endpoint::from_value(value)
    }

    #[test]
    fn acl_allow_json_shape() {
        let stmt = Statement::AclAllow {
            src: ep("10.0.0.1"),
            dst: ep("10.0.0.2"),
        };
        assert_eq!(
            serde_json::to_string(&stmt).unwrap(),
            r#"{"type":"acl","action":"allow","protocol":"tcp","src":"10.0.0.1","dst":"10.0.0.2"}"#
        );
    }

    #[test]
    fn fixed_field_json_shapes() {
        assert_eq!(
            Statement::AclDeny.to_json(),
            json!({"type": "acl", "action": "deny", "protocol": "icmp"})
        );
        assert_eq!(
            Statement::Qos { vlan: 10 }.to_json(),
            json!({"type": "qos", "Vlan": 10, "priority": "high"})
        );
        assert_eq!(
            Statement::Backup.to_json(),
            json!({"type": "backup", "action": "now"})
        );
    }

    #[test]
    fn meter_json_carries_rate_text() {
        let stmt = Statement::Meter {
            host: ep("10.0.0.1"),
            rate: Rate::mbps(10),
        };
        assert_eq!(
            serde_json::to_string(&stmt).unwrap(),
            r#"{"type":"meter","host":"10.0.0.1","rate":"10Mbps"}"#
        );
    }

    #[test]
    fn vlan_and_route_json_key_order() {
        let create = Statement::VlanCreate {
            vlan: 20,
            name: "Engineering".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&create).unwrap(),
            r#"{"type":"vlan","id":20,"name":"Engineering","action":"create"}"#
        );
        let route = Statement::Route {
            destination: "10.0.0.0/24".parse().unwrap(),
            next_hop: Ipv4Addr::new(192, 168, 1, 1),
        };
        assert_eq!(
            serde_json::to_string(&route).unwrap(),
            r#"{"type":"route","dst":"10.0.0.0/24","next_hop":"192.168.1.1"}"#
        );
    }

    #[test]
    fn fixed_attribute_accessors() {
        let monitor = Statement::Monitor {
            src: ep("a"),
            dst: ep("b"),
        };
        assert_eq!(monitor.metric(), Some(Metric::Latency));
        assert_eq!(monitor.protocol(), None);
        assert_eq!(Statement::AclDeny.protocol(), Some(Protocol::Icmp));
        assert_eq!(Statement::Qos { vlan: 1 }.priority(), Some(Priority::High));
        assert_eq!(Statement::VlanDelete { vlan: 1 }.action(), Some("delete"));
        assert_eq!(monitor.endpoints().len(), 2);
    }

    #[test]
    fn deserialize_every_type() {
        let lines = [
            r#"{"type":"acl","action":"allow","protocol":"tcp","src":"10.0.0.1","dst":"10.0.0.2"}"#,
            r#"{"type":"acl","action":"deny","protocol":"icmp"}"#,
            r#"{"type":"meter","host":"10.0.0.1","rate":"10Mbps"}"#,
            r#"{"type":"qos","Vlan":10,"priority":"high"}"#,
            r#"{"type":"connectivity","src":"10.0.0.1","dst":"10.0.0.2"}"#,
            r#"{"type":"vlan","id":20,"name":"Engineering","action":"create"}"#,
            r#"{"type":"vlan","id":10,"action":"delete"}"#,
            r#"{"type":"route","dst":"10.0.0.0/24","next_hop":"192.168.1.1"}"#,
            r#"{"type":"monitor","metric":"latency","src":"10.0.0.1","dst":"10.0.0.2"}"#,
            r#"{"type":"backup","action":"now"}"#,
        ];
        for line in lines {
            let stmt: Statement = serde_json::from_str(line).unwrap();
            assert_eq!(serde_json::to_string(&stmt).unwrap(), line);
        }
    }

    #[test]
    fn deserialize_rejects_unknown_type() {
        let err = serde_json::from_str::<Statement>(r#"{"type":"nat"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown statement type 'nat'"));
    }

    #[test]
    fn deserialize_rejects_missing_field() {
        let err = serde_json::from_str::<Statement>(r#"{"type":"meter","host":"h"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field 'rate'"));
    }

    #[test]
    fn deserialize_rejects_wrong_fixed_value() {
        let err =
            serde_json::from_str::<Statement>(r#"{"type":"acl","action":"allow","protocol":"udp","src":"a","dst":"b"}"#)
                .unwrap_err();
        assert!(err.to_string().contains("protocol"));
    }

    #[test]
    fn deserialized_name_endpoint_is_unresolved() {
        let stmt: Statement =
            serde_json::from_str(r#"{"type":"connectivity","src":"web","dst":"10.0.0.2"}"#).unwrap();
        let eps = stmt.endpoints();
        assert!(eps[0].is_unresolved());
        assert_eq!(eps[1].origin, EndpointOrigin::Address);
    }
}
