//! Domain types and DTOs
//!
//! Catalog types mirror the reference-price tables; quote types define the
//! request and response shapes of the `/calculate` endpoint.

pub mod catalog;
pub mod quote;

pub use catalog::*;
pub use quote::*;
