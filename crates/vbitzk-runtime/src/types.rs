//! Core types for the vBitZK demo
//!
//! This module defines the data contracts shared between the prover core and
//! whatever renders it: the user-supplied identifier, the decorative network
//! selection, and the synthesized proof result.

use crate::error::{Result, VbitzkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Advertised size of the (simulated) compressed proof
pub const PROOF_SIZE_BYTES: usize = 312;

/// Number of characters shown by [`ProofResult::proof_preview`]
pub const PROOF_PREVIEW_CHARS: usize = 80;

/// Address-like subject of a proof run
///
/// The only validation is non-emptiness; no checksum, length or hex checks
/// are performed.
///
/// # Examples
///
/// ```
/// use vbitzk_runtime::Identifier;
///
/// let id = Identifier::parse("0x742d35Cc6634C0532925a3b844Bc9e7595f8a2").unwrap();
/// assert_eq!(id.short_display(), "0x742d...f8a2");
/// assert!(Identifier::parse("").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(VbitzkError::invalid_input("identifier must not be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First six and last four characters, as shown in the protocol path
    ///
    /// Always elided, even when the halves overlap: `"0x12"` becomes
    /// `"0x12...0x12"`.
    pub fn short_display(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        let head: String = chars.iter().take(6).collect();
        let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identifier {
    type Error = VbitzkError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl FromStr for Identifier {
    type Err = VbitzkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Chain selection offered next to the identifier input
///
/// Purely decorative: no output depends on it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    EthereumMainnet,
    Base,
    Arbitrum,
    Optimism,
}

impl Network {
    pub const ALL: [Network; 4] =
        [Network::EthereumMainnet, Network::Base, Network::Arbitrum, Network::Optimism];

    pub fn label(&self) -> &'static str {
        match self {
            Network::EthereumMainnet => "Ethereum Mainnet",
            Network::Base => "Base",
            Network::Arbitrum => "Arbitrum",
            Network::Optimism => "Optimism",
        }
    }

    /// Name accepted on the command line
    pub fn cli_name(&self) -> &'static str {
        match self {
            Network::EthereumMainnet => "ethereum",
            Network::Base => "base",
            Network::Arbitrum => "arbitrum",
            Network::Optimism => "optimism",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Network {
    type Err = VbitzkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" | "ethereum-mainnet" | "mainnet" => Ok(Network::EthereumMainnet),
            "base" => Ok(Network::Base),
            "arbitrum" => Ok(Network::Arbitrum),
            "optimism" => Ok(Network::Optimism),
            _ => Err(VbitzkError::UnknownNetwork(s.to_string())),
        }
    }
}

/// One terminal-asset exposure line in a result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExposureEntry {
    pub asset_symbol: String,
    /// Already formatted for display ("165.5", "88,420")
    pub amount: String,
    /// Share in [0, 100]; entries of one result need not sum to 100
    pub percentage: f64,
}

impl ExposureEntry {
    pub fn new(asset_symbol: impl Into<String>, amount: impl Into<String>, percentage: f64) -> Self {
        Self { asset_symbol: asset_symbol.into(), amount: amount.into(), percentage }
    }

    /// Percentage with one decimal place, e.g. `79.2%`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// The identifier-dependent part of a result
///
/// Either taken verbatim from the demo dataset or generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DemoPayload {
    pub exposures: Vec<ExposureEntry>,
    pub nesting_depth: u32,
    pub protocol_path: Vec<String>,
    pub total_value_label: String,
}

/// Synthesized output of a completed run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProofResult {
    pub exposures: Vec<ExposureEntry>,
    pub nesting_depth: u32,
    pub protocol_path: Vec<String>,
    pub total_value_label: String,
    /// `0x` followed by 624 lowercase hex digits; not a real proof
    pub proof_hex: String,
    pub proving_time_ms: u32,
    /// ISO-8601 UTC timestamp of synthesis
    pub generated_at: String,
}

impl ProofResult {
    pub fn from_payload(
        payload: DemoPayload,
        proof_hex: String,
        proving_time_ms: u32,
        generated_at: String,
    ) -> Self {
        Self {
            exposures: payload.exposures,
            nesting_depth: payload.nesting_depth,
            protocol_path: payload.protocol_path,
            total_value_label: payload.total_value_label,
            proof_hex,
            proving_time_ms,
            generated_at,
        }
    }

    /// Splits off the identifier-dependent fields
    pub fn payload(&self) -> DemoPayload {
        DemoPayload {
            exposures: self.exposures.clone(),
            nesting_depth: self.nesting_depth,
            protocol_path: self.protocol_path.clone(),
            total_value_label: self.total_value_label.clone(),
        }
    }

    /// Leading characters of the proof followed by an ellipsis
    pub fn proof_preview(&self) -> String {
        let head: String = self.proof_hex.chars().take(PROOF_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}
