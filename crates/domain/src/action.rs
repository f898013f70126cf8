use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verdict attached to a list entry.
///
/// The variants carry no behaviour of their own; the sinkhole policy owns the
/// decision table that maps an action to block / allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Block the resolution.
    Black,
    /// Always allow, never consult anything else.
    White,
    /// Allow, but record the hit.
    Log,
    /// Defer to the remote verdict authority.
    Check,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Log => "log",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "block" => Ok(Self::Black),
            "white" | "allow" => Ok(Self::White),
            "log" => Ok(Self::Log),
            "check" => Ok(Self::Check),
            other => Err(format!("unknown action '{}'", other)),
        }
    }
}

/// Provenance of a verdict cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Per-customer custom lists.
    Custom,
    /// Indicators of compromise.
    Ioc,
    /// Every indicator plus every custom list, for the shared (non-personalized) resolver.
    AllIndicators,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Custom, ListKind::Ioc, ListKind::AllIndicators];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "customlist",
            Self::Ioc => "ioclist",
            Self::AllIndicators => "allIndicatorsWithCustomLists",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
