//! vBitZK Prover
//!
//! Simulated beneficial-ownership proof runs: a staged progress driver followed
//! by synthesis of a demo result. Nothing here computes a real proof.

pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod session;
pub mod simulation;
pub mod synthesis;

pub use clock::{Clock, FixedClock, InstantScheduler, Scheduler, SystemClock, ThreadScheduler};
pub use config::{ProverConfig, StepTiming, DEFAULT_STEPS};
pub use dataset::{DemoDataset, CANONICAL_DEMO_KEY};
pub use error::{ProverError, Result};
pub use session::{RunTicket, Session};
pub use simulation::{
    RunOutcome, SimulationDriver, SimulationEvent, SimulationState, StepStatus, StepView,
};
pub use synthesis::Synthesizer;

// Re-export runtime types for convenience
pub use vbitzk_runtime::{
    DemoPayload, ExposureEntry, Identifier, Network, ProofResult, VbitzkError, PROOF_SIZE_BYTES,
};
