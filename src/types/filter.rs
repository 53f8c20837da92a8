//! Machine selection shared by the tables, charts and timeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the "every machine" selector entry.
pub const ALL_MACHINES: &str = "All";

/// Current machine selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MachineFilter {
    #[default]
    All,
    Machine(String),
}

impl MachineFilter {
    /// Parse an optional query value. Missing, blank and "All" (any case) select everything.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::All,
            Some(v) if v.eq_ignore_ascii_case(ALL_MACHINES) => Self::All,
            Some(v) => Self::Machine(v.to_string()),
        }
    }

    pub fn matches(&self, machine: &str) -> bool {
        match self {
            Self::All => true,
            Self::Machine(m) => m == machine,
        }
    }
}

impl From<String> for MachineFilter {
    fn from(value: String) -> Self {
        Self::from_query(Some(&value))
    }
}

impl From<MachineFilter> for String {
    fn from(value: MachineFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MachineFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{ALL_MACHINES}"),
            Self::Machine(m) => write!(f, "{m}"),
        }
    }
}
