//! Signal payload template
//!
//! Receivers parse the rendered text by fixed line layout, so every literal
//! here (spacing included) is part of the wire contract.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DESCRIPTION: &str = "JMA US500 v3 (10,000, 0.1, 100, Fixed, , 2, 50, 0, 10, close, 33, 63, 9, 10, Default, 2, Solid, 1.5, 1W, 85, 2.4, 0.3, 2, 0.8, 0, 14, 20, 5, top_right, bottom_left, 1, 1, 20, 5)";
const TIMESTAMP: &str = "30";
const CONTRACTS: &str = "100";

/// Tradable instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Instrument {
    #[serde(rename = "GOLD")]
    Gold,
    #[serde(rename = "US100")]
    Us100,
    #[serde(rename = "US30")]
    Us30,
    #[serde(rename = "US500")]
    Us500,
    #[serde(rename = "DE40")]
    De40,
}

impl Instrument {
    /// All instruments in dashboard order
    pub const ALL: [Instrument; 5] = [
        Instrument::Gold,
        Instrument::Us100,
        Instrument::Us30,
        Instrument::Us500,
        Instrument::De40,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Gold => "GOLD",
            Instrument::Us100 => "US100",
            Instrument::Us30 => "US30",
            Instrument::Us500 => "US500",
            Instrument::De40 => "DE40",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instrument {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instrument::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Unknown instrument: {}", s)))
    }
}

impl TryFrom<String> for Instrument {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Trading action carried by a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SignalAction {
    Buy,
    Sell,
    Exit,
}

impl SignalAction {
    pub const ALL: [SignalAction; 3] = [SignalAction::Buy, SignalAction::Sell, SignalAction::Exit];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalAction::Buy => "buy",
            SignalAction::Sell => "sell",
            SignalAction::Exit => "exit",
        }
    }

    /// Upper-case label used in banners (BUY/SELL/EXIT)
    pub fn label(&self) -> &'static str {
        match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
            SignalAction::Exit => "EXIT",
        }
    }

    pub fn position_size(&self) -> &'static str {
        match self {
            SignalAction::Exit => "0",
            SignalAction::Buy | SignalAction::Sell => "100",
        }
    }

    pub fn comment(&self) -> &'static str {
        match self {
            SignalAction::Buy => "Buy",
            SignalAction::Sell => "Sell",
            SignalAction::Exit => "Exit Long",
        }
    }
}

impl fmt::Display for SignalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalAction::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::Validation(format!("Unknown action: {}", s)))
    }
}

impl TryFrom<String> for SignalAction {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Render the signal text for an instrument/action pair
pub fn build_payload(instrument: Instrument, action: SignalAction) -> String {
    format!(
        "description : {DESCRIPTION}\n\
         timestamp : {TIMESTAMP}\n\
         ticker : {instrument}\n\
         action: {action} \n\
         contracts: {CONTRACTS} \n\
         position_size: {}\n\
         comment : {}",
        action.position_size(),
        action.comment(),
    )
}
