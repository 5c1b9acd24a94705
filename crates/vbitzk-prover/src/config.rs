//! Prover configuration
//!
//! Everything is optional in the JSON form; missing fields take the demo's
//! reference values.

use crate::dataset::DemoDataset;
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};
use vbitzk_runtime::{DemoPayload, VbitzkError};

/// Progress labels shown while a run is in flight
pub const DEFAULT_STEPS: [&str; 6] = [
    "Connecting to Cysic prover network...",
    "Scanning DeFi positions across 8 chains...",
    "Unwrapping nested protocol layers...",
    "Generating Halo2 arithmetic circuit...",
    "Applying Nova recursive folding...",
    "Compressing proof to 312 bytes...",
];

/// Per-step delay model: `base_delay_ms + U[0, jitter_ms)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StepTiming {
    pub base_delay_ms: u64,
    pub jitter_ms: u64,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self { base_delay_ms: 400, jitter_ms: 300 }
    }
}

impl StepTiming {
    pub fn new(base_delay_ms: u64, jitter_ms: u64) -> Self {
        Self { base_delay_ms, jitter_ms }
    }

    /// Draws one step delay
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let extra = if self.jitter_ms == 0 { 0 } else { rng.gen_range(0..self.jitter_ms) };
        Duration::from_millis(self.base_delay_ms.saturating_add(extra))
    }

    /// Upper bound (exclusive unless jitter is zero) on a whole run
    ///
    /// Saturates at `u64::MAX` milliseconds.
    pub fn max_total(&self, steps: usize) -> Duration {
        Duration::from_millis(self.checked_total(steps).unwrap_or(u64::MAX))
    }

    fn checked_total(&self, steps: usize) -> Option<u64> {
        self.base_delay_ms
            .checked_add(self.jitter_ms)?
            .checked_mul(u64::try_from(steps).ok()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProverConfig {
    pub timing: StepTiming,
    pub steps: Vec<String>,
    /// Extra canned results, merged over the built-in dataset
    pub demo_results: DemoDataset,
}

impl Default for ProverConfig {
    fn default() -> Self {
        Self {
            timing: StepTiming::default(),
            steps: DEFAULT_STEPS.iter().map(|s| s.to_string()).collect(),
            demo_results: DemoDataset::empty(),
        }
    }
}

impl ProverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ProverConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(VbitzkError::from)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(VbitzkError::invalid_config("steps must not be empty").into());
        }
        if let Some(index) = self.steps.iter().position(|s| s.is_empty()) {
            return Err(
                VbitzkError::invalid_config(format!("step {} has an empty label", index)).into()
            );
        }
        if self.timing.checked_total(self.steps.len()).is_none() {
            return Err(VbitzkError::invalid_config(format!(
                "timing overflows: ({} + {}) ms x {} steps",
                self.timing.base_delay_ms,
                self.timing.jitter_ms,
                self.steps.len()
            ))
            .into());
        }
        for (key, payload) in self.demo_results.iter() {
            validate_payload(payload).map_err(|reason| {
                VbitzkError::invalid_config(format!("demo result '{}': {}", key, reason))
            })?;
        }
        Ok(())
    }

    /// Built-in dataset with this config's entries layered on top
    pub fn dataset(&self) -> DemoDataset {
        let mut dataset = DemoDataset::builtin();
        dataset.merge(self.demo_results.clone());
        dataset
    }
}

/// Same invariants the synthesizer guarantees for generated payloads
fn validate_payload(payload: &DemoPayload) -> std::result::Result<(), String> {
    if payload.nesting_depth < 1 {
        return Err("nestingDepth must be at least 1".to_string());
    }
    if let Some(entry) = payload
        .exposures
        .iter()
        .find(|e| !(e.percentage.is_finite() && (0.0..=100.0).contains(&e.percentage)))
    {
        return Err(format!(
            "{} percentage {} is outside [0, 100]",
            entry.asset_symbol, entry.percentage
        ));
    }
    if payload.total_value_label.is_empty() {
        return Err("totalValueLabel must not be empty".to_string());
    }
    Ok(())
}
