use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display currency of the slip. RWF is the platform default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "RWF")]
    Rwf,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rwf => "RWF",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RWF" => Ok(Currency::Rwf),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("Unknown currency code: {}", other)),
        }
    }
}
