//! # Settlement P&L Analytics
//!
//! This crate turns a marketplace settlement report into a reconciled profit and
//! loss statement, both for the report as a whole and for every SKU in it.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   spreadsheets or storage. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `PnlEngine` is a stateless calculator. Every call
//!   recomputes its statement from scratch, so identical inputs always give identical
//!   output and calls may run in parallel over different inputs.
//! - **Total:** No row is ever rejected. Unrecognised operations still feed the
//!   overhead totals and unrecognised logistics lands in the unclassified bucket,
//!   so the statement always reconciles to the report.
//!
//! ## Public API
//!
//! - `classify`: the row classifier and its rule table.
//! - `PnlEngine`: aggregate and per-SKU statements.
//! - `AggregateSummary` / `SkuStatement`: the statements themselves.
//! - `ProfitStructure`, `ReportSummary`: derived views over a statement.

pub mod classifier;
pub mod engine;
pub mod ledger;
pub mod report;
pub mod snapshot;
pub mod structure;

pub use classifier::{LogisticsDirection, OperationKind, RowClass, classify};
pub use engine::{PnlEngine, UNIDENTIFIED_SKU, UNTITLED_PRODUCT};
pub use report::{AggregateSummary, LogisticsBucket, LogisticsSplit, SkuStatement, VAT_RATE};
pub use snapshot::{ReportSummary, merge_reports};
pub use structure::{ProfitSegment, ProfitStructure, SegmentKind};
