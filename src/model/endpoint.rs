//! Endpoints and the host alias table.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize, Serializer};

/// Where an endpoint's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointOrigin {
    /// Written as a dotted-quad literal.
    Address,
    /// A host name found in the alias table.
    Alias(String),
    /// A host name with no table entry; the name itself is the value.
    Unresolved,
}

/// A network party referenced by a statement.
///
/// Only `value` reaches the JSON model and the generated text; `origin`
/// keeps an unresolved name distinguishable from a literal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub value: String,
    pub origin: EndpointOrigin,
}

impl Endpoint {
    pub fn address(addr: Ipv4Addr) -> Self {
        Self {
            value: addr.to_string(),
            origin: EndpointOrigin::Address,
        }
    }

    /// Build an endpoint from a bare value, as read back from JSON.
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let origin = if value.parse::<Ipv4Addr>().is_ok() {
            EndpointOrigin::Address
        } else {
            EndpointOrigin::Unresolved
        };
        Self { value, origin }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_unresolved(&self) -> bool {
        self.origin == EndpointOrigin::Unresolved
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

/// Static mapping from host alias to address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostTable {
    entries: BTreeMap<String, String>,
}

impl HostTable {
    /// An empty table: every name passes through unresolved.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, alias: impl Into<String>, address: impl Into<String>) {
        self.entries.insert(alias.into(), address.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a host name by exact match. Unknown names pass through.
    pub fn resolve(&self, name: &str) -> Endpoint {
        match self.get(name) {
            Some(addr) => Endpoint {
                value: addr.to_string(),
                origin: EndpointOrigin::Alias(name.to_string()),
            },
            None => Endpoint {
                value: name.to_string(),
                origin: EndpointOrigin::Unresolved,
            },
        }
    }
}

impl Default for HostTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("A", "10.0.0.1");
        table.insert("B", "10.0.0.2");
        table.insert("hostA", "10.0.0.1");
        table.insert("hostB", "10.0.0.2");
        table
    }
}

impl FromIterator<(String, String)> for HostTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_entries() {
        let table = HostTable::default();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("A"), Some("10.0.0.1"));
        assert_eq!(table.get("hostB"), Some("10.0.0.2"));
    }

    #[test]
    fn resolve_known_alias() {
        let ep = HostTable::default().resolve("hostA");
        assert_eq!(ep.value, "10.0.0.1");
        assert_eq!(ep.origin, EndpointOrigin::Alias("hostA".to_string()));
    }

    #[test]
    fn resolve_unknown_passes_through() {
        let ep = HostTable::default().resolve("hostC");
        assert_eq!(ep.value, "hostC");
        assert!(ep.is_unresolved());
    }

    #[test]
    fn resolve_is_case_sensitive() {
        assert!(HostTable::default().resolve("hosta").is_unresolved());
    }

    #[test]
    fn endpoint_from_value_classifies() {
        assert_eq!(Endpoint::from_value("10.0.0.7").origin, EndpointOrigin::Address);
        assert!(Endpoint::from_value("db01").is_unresolved());
    }

    #[test]
    fn host_table_yaml() {
        let table: HostTable = serde_yaml::from_str("web: 10.1.0.5\ndb: 10.1.0.6\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("db").value, "10.1.0.6");
    }
}
