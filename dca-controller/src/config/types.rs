//! Closed enumerations used by controller configs and executor configs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of every order in a ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum TradeSide {
    /// Buy ladder: levels step below the mid price
    #[default]
    Buy,
    /// Sell ladder: levels step above the mid price
    Sell,
}

/// Account position mode on derivative connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum PositionMode {
    #[default]
    Hedge,
    OneWay,
}

/// How the executor places its level orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DcaMode {
    /// Resting limit orders
    #[default]
    Maker,
    /// Market orders once a level price is crossed
    Taker,
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['_', '-', ' '], "")
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(format!("unknown side: {}", s)),
        }
    }
}

impl FromStr for PositionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "hedge" => Ok(Self::Hedge),
            "oneway" => Ok(Self::OneWay),
            _ => Err(format!("unknown position mode: {}", s)),
        }
    }
}

impl FromStr for DcaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "maker" => Ok(Self::Maker),
            "taker" => Ok(Self::Taker),
            _ => Err(format!("unknown dca mode: {}", s)),
        }
    }
}

impl TryFrom<String> for TradeSide {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for PositionMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for DcaMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hedge => write!(f, "HEDGE"),
            Self::OneWay => write!(f, "ONEWAY"),
        }
    }
}

impl fmt::Display for DcaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maker => write!(f, "MAKER"),
            Self::Taker => write!(f, "TAKER"),
        }
    }
}
