//! vBitZK Runtime
//!
//! Shared data contracts and error handling for the vBitZK proof demo.
//! The prover core and the CLI both build on these types.

pub mod error;
pub mod types;

// Re-export core types for convenience
pub use error::{Result, VbitzkError};
pub use types::{
    DemoPayload, ExposureEntry, Identifier, Network, ProofResult, PROOF_PREVIEW_CHARS,
    PROOF_SIZE_BYTES,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_debug_trait() {
        let id = Identifier::parse("0xabc").unwrap();
        let debug_str = format!("{:?}", id);
        assert!(debug_str.contains("Identifier"));
    }

    #[test]
    fn test_identifier_keeps_whitespace() {
        let id = Identifier::parse(" ").unwrap();
        assert_eq!(id.as_str(), " ");
    }

    #[test]
    fn test_short_display_short_identifier() {
        let id = Identifier::parse("0x1234").unwrap();
        assert_eq!(id.short_display(), "0x1234...1234");
    }

    #[test]
    fn test_short_display_overlapping_halves() {
        let id = Identifier::parse("0x12").unwrap();
        assert_eq!(id.short_display(), "0x12...0x12");

        let id = Identifier::parse("0x12345678").unwrap();
        assert_eq!(id.short_display(), "0x1234...5678");
    }

    #[test]
    fn test_short_display_multibyte() {
        let id = Identifier::parse("ααααααββββββ").unwrap();
        assert_eq!(id.short_display(), "αααααα...ββββ");
    }

    #[test]
    fn test_network_default() {
        assert_eq!(Network::default(), Network::EthereumMainnet);
    }

    #[test]
    fn test_exposure_equality() {
        let a = ExposureEntry::new("ETH", "1.00", 70.0);
        let b = ExposureEntry::new("ETH", "1.00", 70.0);
        let c = ExposureEntry::new("USDC", "1", 20.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
