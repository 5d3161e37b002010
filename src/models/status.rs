use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability status of a monitored service
///
/// `Unknown` is only ever held by services that have not been through a check
/// cycle yet. Probes produce `Operational` or `Down`; `Degraded` is reserved for
/// richer check kinds and external overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    Operational,
    Degraded,
    Down,
    #[default]
    Unknown,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Degraded => "Degraded",
            Self::Down => "Down",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operational" => Ok(Self::Operational),
            "degraded" => Ok(Self::Degraded),
            "down" => Ok(Self::Down),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid service status: {s}")),
        }
    }
}

/// Kind of check performed against a service endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CheckType {
    /// Plain reachability request over the endpoint's transport
    #[default]
    #[serde(rename = "HTTP")]
    Http,
}

impl CheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "HTTP",
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HTTP" => Ok(Self::Http),
            _ => Err(format!("Invalid check type: {s}")),
        }
    }
}
