//! Shared types for the Move Studio simulation core.
//!
//! This crate holds the wire-facing and decoded data model used by the
//! `move-studio` crate: account addresses, Move identifiers, the normalized
//! [`CallDescriptor`], the decoded [`SimulationOutcome`] family, REST
//! response types, and the unified [`StudioError`] type.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod address;
pub mod call;
pub mod error;
pub mod move_types;
pub mod outcome;
pub mod rest;

pub use address::{AccountAddress, ADDRESS_LENGTH};
pub use call::CallDescriptor;
pub use error::{StudioError, StudioResult};
pub use move_types::MoveModuleId;
pub use outcome::{
    ChangeKind, EventSummary, FieldDiff, ResourceDiff, SimulationOutcome, SimulationStatus,
    StateChangeSummary,
};
pub use rest::{AccountData, Resource};
