use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of an exchange an example is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Omits `readOnly` properties
    Request,
    /// Omits `writeOnly` properties
    Response,
    #[default]
    Both,
}

impl Stage {
    /// Whether a property with the given flags appears at this stage.
    pub fn includes(&self, read_only: bool, write_only: bool) -> bool {
        match self {
            Stage::Request => !read_only,
            Stage::Response => !write_only,
            Stage::Both => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Request => "request",
            Stage::Response => "response",
            Stage::Both => "both",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown stage `{0}`, expected request, response or both")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "request" => Ok(Stage::Request),
            "response" => Ok(Stage::Response),
            "both" => Ok(Stage::Both),
            other => Err(UnknownStage(other.to_string())),
        }
    }
}
