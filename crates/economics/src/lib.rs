//! # Unit Economics
//!
//! The forward-looking half of the engine. Where `analytics` explains what a past
//! report earned, this crate answers what one unit will earn at a given price:
//! a "fact" projection at the configured retail price and a "hypothesis"
//! projection at a what-if price and order volume.
//!
//! Both projections share the same cost structure and the same pricing routine;
//! only price-proportional lines (commission, acquiring, VAT, tax) move with the
//! price. The projection never looks at historical rows. [`ReportSeed`] is the
//! one bridge back to history: it distills a report into a starting price,
//! buyout and commission for the model.

pub mod error;
pub mod projector;
pub mod seed;

pub use error::ProjectorError;
pub use projector::{
    FactProjection, HypothesisProjection, ProjectorResult, UnitEconomicsProjector, project,
};
pub use seed::ReportSeed;
