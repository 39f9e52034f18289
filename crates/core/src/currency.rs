use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Currencies prices can be quoted in. Serialized as the display tag so
/// stored records stay readable ("$" and "Fc").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "$")]
    Usd,
    #[serde(rename = "Fc")]
    Fc,
}

impl Currency {
    pub fn tag(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Fc => "Fc",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "$" | "USD" | "usd" => Ok(Currency::Usd),
            "Fc" | "FC" | "fc" => Ok(Currency::Fc),
            other => Err(DomainError::validation(format!("unknown currency: {other}"))),
        }
    }
}
