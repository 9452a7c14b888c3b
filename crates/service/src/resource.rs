use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The business resources exposed under `/api/{name}`.
///
/// Each one lives in a worksheet with the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Agreements,
    Bills,
    Templates,
    Users,
    Utilities,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Agreements,
        Resource::Bills,
        Resource::Templates,
        Resource::Users,
        Resource::Utilities,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Agreements => "agreements",
            Resource::Bills => "bills",
            Resource::Templates => "templates",
            Resource::Users => "users",
            Resource::Utilities => "utilities",
        }
    }

    /// Worksheet (tab) title backing this resource.
    pub fn sheet_name(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownResource(pub String);

impl fmt::Display for UnknownResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown resource `{}`", self.0)
    }
}

impl std::error::Error for UnknownResource {}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}
