//! The pricing rule engine.
//!
//! Every sub-calculator is a pure function of (configuration, reference
//! store) returning a cost and its line items; [`engine::calculate`] is the
//! single-pass aggregator. Missing reference rows contribute zero cost and
//! emit a warning event; only store failures abort a calculation.

pub mod addons;
pub mod base;
pub mod delivery;
pub mod doors;
pub mod engine;
pub mod geometry;
pub mod partitions;
pub mod roof;
pub mod windows;

pub use engine::calculate;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Deterministic conversion of request-side floats into decimals. Upstream
/// validation guarantees finite values; a non-finite input converts to zero.
pub(crate) fn dec(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}
