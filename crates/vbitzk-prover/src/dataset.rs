//! Canned demo results keyed by identifier
//!
//! Lookup is an exact, case-sensitive string match. Anything else falls through
//! to generated data in [`crate::synthesis`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vbitzk_runtime::{DemoPayload, ExposureEntry, Identifier};

/// Identifier that the built-in dataset answers for
pub const CANONICAL_DEMO_KEY: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f8a2";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DemoDataset {
    entries: BTreeMap<String, DemoPayload>,
}

impl DemoDataset {
    /// Dataset with no entries; every identifier is synthesized
    pub fn empty() -> Self {
        Self::default()
    }

    /// The single canned result shipped with the demo
    pub fn builtin() -> Self {
        let mut dataset = Self::empty();
        dataset.insert(
            CANONICAL_DEMO_KEY,
            DemoPayload {
                exposures: vec![
                    ExposureEntry::new("ETH", "165.5", 79.2),
                    ExposureEntry::new("USDC", "88,420", 20.8),
                ],
                nesting_depth: 7,
                protocol_path: ["Aave V3", "Pendle Finance", "EigenLayer", "Kelp DAO"]
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
                total_value_label: "$426,847".to_string(),
            },
        );
        dataset
    }

    pub fn insert(&mut self, key: impl Into<String>, payload: DemoPayload) -> Option<DemoPayload> {
        self.entries.insert(key.into(), payload)
    }

    /// Adds every entry of `other`, replacing same-key entries
    pub fn merge(&mut self, other: DemoDataset) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, identifier: &Identifier) -> Option<&DemoPayload> {
        self.entries.get(identifier.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DemoPayload)> {
        self.entries.iter().map(|(key, payload)| (key.as_str(), payload))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::parse(s).unwrap()
    }

    #[test]
    fn test_builtin_contains_canonical_key() {
        let dataset = DemoDataset::builtin();
        assert_eq!(dataset.len(), 1);

        let payload = dataset.get(&id(CANONICAL_DEMO_KEY)).unwrap();
        assert_eq!(payload.nesting_depth, 7);
        assert_eq!(payload.total_value_label, "$426,847");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dataset = DemoDataset::builtin();
        assert!(dataset.get(&id(&CANONICAL_DEMO_KEY.to_lowercase())).is_none());
        assert!(dataset.get(&id(&CANONICAL_DEMO_KEY.to_uppercase())).is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let dataset = DemoDataset::builtin();
        assert!(dataset.get(&id(&format!("{} ", CANONICAL_DEMO_KEY))).is_none());
        assert!(dataset.get(&id(&CANONICAL_DEMO_KEY[..20])).is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = DemoDataset::empty();
        assert!(dataset.is_empty());
        assert!(dataset.get(&id(CANONICAL_DEMO_KEY)).is_none());
    }

    #[test]
    fn test_merge_replaces_same_key() {
        let mut dataset = DemoDataset::builtin();
        let mut extra = DemoDataset::empty();
        extra.insert(
            CANONICAL_DEMO_KEY,
            DemoPayload {
                exposures: vec![],
                nesting_depth: 1,
                protocol_path: vec![],
                total_value_label: "$0".to_string(),
            },
        );
        extra.insert(
            "alice.eth",
            DemoPayload {
                exposures: vec![],
                nesting_depth: 2,
                protocol_path: vec![],
                total_value_label: "$1".to_string(),
            },
        );

        dataset.merge(extra);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(&id(CANONICAL_DEMO_KEY)).unwrap().nesting_depth, 1);
        assert_eq!(dataset.keys().collect::<Vec<_>>(), vec![CANONICAL_DEMO_KEY, "alice.eth"]);
    }
}
