//! Literal value types carried by statements.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use super::ModelError;

/// Transport protocol matched by an ACL statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Icmp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Icmp => "icmp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// QoS priority level. IntentLang only knows `high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
        }
    }
}

/// Monitored metric. IntentLang only knows `latency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Latency,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Latency => "latency",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUnit {
    Mbps,
}

impl RateUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateUnit::Mbps => "Mbps",
        }
    }
}

/// A bandwidth rate such as `10Mbps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    pub value: u64,
    pub unit: RateUnit,
}

impl Rate {
    pub fn mbps(value: u64) -> Self {
        Self {
            value,
            unit: RateUnit::Mbps,
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

impl FromStr for Rate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_suffix(RateUnit::Mbps.as_str())
            .ok_or_else(|| ModelError::invalid("rate", s))?;
        let value: u64 = digits.parse().map_err(|_| ModelError::invalid("rate", s))?;
        if value == 0 {
            return Err(ModelError::invalid("rate", s));
        }
        Ok(Self::mbps(value))
    }
}

/// An IPv4 network in prefix notation, e.g. `10.0.0.0/24`.
///
/// The prefix length is always in `0..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: Ipv4Addr,
    prefix: u8,
}

impl Cidr {
    /// Returns `None` when `prefix` exceeds 32.
    pub fn new(network: Ipv4Addr, prefix: u8) -> Option<Self> {
        (prefix <= 32).then_some(Self { network, prefix })
    }

    /// For prefixes the lexer has already range-checked.
    pub(crate) fn from_lexed(network: Ipv4Addr, prefix: u8) -> Self {
        Self {
            network,
            prefix: prefix.min(32),
        }
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Netmask for the prefix length, e.g. `/20` is `255.255.240.0`.
    pub fn netmask(&self) -> Ipv4Addr {
        let bits = u32::MAX
            .checked_shl(32u32.saturating_sub(u32::from(self.prefix)))
            .unwrap_or(0);
        Ipv4Addr::from(bits)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (network, prefix) = s
            .split_once('/')
            .ok_or_else(|| ModelError::invalid("dst", s))?;
        let network: Ipv4Addr = network.parse().map_err(|_| ModelError::invalid("dst", s))?;
        let prefix: u8 = prefix.parse().map_err(|_| ModelError::invalid("dst", s))?;
        Cidr::new(network, prefix).ok_or_else(|| ModelError::invalid("dst", s))
    }
}
