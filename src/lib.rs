//! Quote calculation backend for custom-built frame houses.
//!
//! The pricing engine combines a base price-per-m² matrix with a sequence of
//! additive and substitutive pricing rules, each backed by a reference-price
//! table, and assembles an itemized quote.

pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pricing;
pub mod routes;
pub mod store;
