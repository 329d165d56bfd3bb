//! Dry-run tooling for Move entry function calls against Aptos-compatible
//! fullnodes. Builds entry function payloads from untyped form input,
//! submits them through the simulation API, and decodes the raw output
//! into a structured [`SimulationOutcome`] with human-readable status,
//! gas figures, event summaries, and field-level resource diffs.
//!
//! [`SimulationOutcome`]: move_studio_types::SimulationOutcome

#![forbid(unsafe_code)]

pub mod builder;
pub mod client;
pub mod config;
pub mod decoder;
pub mod identity;

pub use builder::{build_descriptor, coerce_argument, normalize_address};
pub use client::FullnodeClient;
pub use config::StudioConfig;
pub use decoder::SimulationDecoder;
pub use identity::{ResolvedSigner, SimulatorIdentity};
