//! Result synthesis
//!
//! Builds the [`ProofResult`] shown after a run. Known identifiers reuse their
//! canned payload from the [`DemoDataset`]; all others get generated figures.
//! The proof string, proving time and timestamp are always fresh.

use crate::clock::{format_timestamp, Clock};
use crate::dataset::DemoDataset;
use crate::format::{currency_label, fixed_decimals, group_thousands};
use rand::Rng;
use std::ops::Range;
use tracing::debug;
use vbitzk_runtime::{DemoPayload, ExposureEntry, Identifier, ProofResult, PROOF_SIZE_BYTES};

pub const PROOF_HEX_PREFIX: &str = "0x";

/// Hex digits after the prefix (two per proof byte)
pub const PROOF_HEX_DIGITS: usize = PROOF_SIZE_BYTES * 2;

/// Protocols a generated path is drawn from, in path order
pub const FALLBACK_PROTOCOLS: [&str; 4] = ["Aave V3", "Lido", "Curve", "Pendle"];

pub const ETH_AMOUNT_RANGE: Range<f64> = 0.0..100.0;
pub const ETH_PERCENT_RANGE: Range<f64> = 65.0..85.0;
pub const USDC_AMOUNT_RANGE: Range<u64> = 0..50_000;
pub const USDC_PERCENT_RANGE: Range<f64> = 15.0..30.0;
pub const NESTING_DEPTH_RANGE: Range<u32> = 3..8;
pub const PATH_LEN_RANGE: Range<usize> = 2..5;
pub const TOTAL_VALUE_RANGE: Range<u64> = 50_000..450_000;
pub const PROVING_TIME_RANGE: Range<u32> = 120..180;

#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    dataset: DemoDataset,
}

impl Synthesizer {
    pub fn new(dataset: DemoDataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &DemoDataset {
        &self.dataset
    }

    pub fn synthesize<R, C>(&self, identifier: &Identifier, rng: &mut R, clock: &C) -> ProofResult
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        let payload = match self.dataset.get(identifier) {
            Some(canned) => {
                debug!(identifier = %identifier, "demo dataset hit");
                canned.clone()
            }
            None => {
                debug!(identifier = %identifier, "demo dataset miss, generating payload");
                generate_payload(rng)
            }
        };

        let proof_hex = generate_proof_hex(rng);
        let proving_time_ms = rng.gen_range(PROVING_TIME_RANGE);
        let generated_at = format_timestamp(clock.now());

        ProofResult::from_payload(payload, proof_hex, proving_time_ms, generated_at)
    }
}

/// Random stand-in for an identifier with no canned entry
pub fn generate_payload<R: Rng + ?Sized>(rng: &mut R) -> DemoPayload {
    let eth_amount = fixed_decimals(rng.gen_range(ETH_AMOUNT_RANGE), 2);
    let eth_percent = rng.gen_range(ETH_PERCENT_RANGE);
    let usdc_amount = group_thousands(rng.gen_range(USDC_AMOUNT_RANGE));
    let usdc_percent = rng.gen_range(USDC_PERCENT_RANGE);

    let nesting_depth = rng.gen_range(NESTING_DEPTH_RANGE);
    let path_len = rng.gen_range(PATH_LEN_RANGE);
    let protocol_path = FALLBACK_PROTOCOLS[..path_len].iter().map(|p| p.to_string()).collect();
    let total_value_label = currency_label(rng.gen_range(TOTAL_VALUE_RANGE));

    DemoPayload {
        exposures: vec![
            ExposureEntry::new("ETH", eth_amount, eth_percent),
            ExposureEntry::new("USDC", usdc_amount, usdc_percent),
        ],
        nesting_depth,
        protocol_path,
        total_value_label,
    }
}

/// `0x` plus lowercase hex of [`PROOF_SIZE_BYTES`] random bytes
pub fn generate_proof_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; PROOF_SIZE_BYTES];
    rng.fill(&mut bytes[..]);
    format!("{}{}", PROOF_HEX_PREFIX, hex::encode(&bytes[..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_proof_hex_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let proof = generate_proof_hex(&mut rng);

        assert_eq!(proof.len(), 626);
        assert!(proof.starts_with("0x"));
        assert!(proof[2..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_proof_hex_varies() {
        let mut rng = StdRng::seed_from_u64(42);
        let a = generate_proof_hex(&mut rng);
        let b = generate_proof_hex(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_path_is_prefix() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let payload = generate_payload(&mut rng);
            let len = payload.protocol_path.len();
            assert!((2..=4).contains(&len));
            for (got, expected) in payload.protocol_path.iter().zip(FALLBACK_PROTOCOLS.iter()) {
                assert_eq!(got, expected);
            }
        }
    }

    #[test]
    fn test_eth_amount_has_two_decimals() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let payload = generate_payload(&mut rng);
            let amount = &payload.exposures[0].amount;
            let (_, decimals) = amount.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2);
        }
    }
}
