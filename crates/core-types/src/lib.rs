//! # Settlement Core Types
//!
//! Layer 0 of the workspace: the plain data records every other crate speaks in.
//! Settlement rows and cost entries come from external collaborators (a report
//! parser and a cost registry); the economics model is the projector's input.
//! The only behaviour here is the simplified-tax routine shared by the P&L
//! calculator and the unit-economics projector.

pub mod economics;
pub mod enums;
pub mod error;
pub mod registry;
pub mod structs;
pub mod tax;

// Re-export the core types to provide a clean public API.
pub use economics::{
    DeductibleFlags, EconomicsModel, Hypothesis, LogisticsTariff, PackageDimensions, UnitCosts,
};
pub use enums::{AbcTier, TaxRegime};
pub use error::CoreError;
pub use registry::{CostIndex, CostRegistry};
pub use structs::{CostItem, TransactionRow};
pub use tax::TaxBase;
