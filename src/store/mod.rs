//! Reference price store abstraction
//!
//! Every calculator reads point lookups through [`PriceStore`]; a lookup
//! returning `Ok(None)` is the normal "row not found" state, while a
//! [`StoreError`] means the store itself could not be read and the whole
//! calculation must abort.

mod memory;
mod postgres;

pub use memory::InMemoryPriceStore;
pub use postgres::PgPriceStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{
    Addon, BasePriceKey, DeliveryRule, Door, PartitionKind, StdInclusion, StoreyType, WindowKind,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reference price store unavailable")]
    Unavailable(#[from] sqlx::Error),

    #[error("malformed reference data in {table}: {reason}")]
    InvalidData { table: &'static str, reason: String },
}

/// Point lookups against the reference-price tables, keyed by exact key
/// tuples. Implementations must not interpolate or round keys.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Price per m² for an exact (tech, warm contour, brand, thickness,
    /// storey) combination.
    async fn base_price_per_m2(&self, key: &BasePriceKey) -> Result<Option<Decimal>, StoreError>;

    /// Surcharge per m² for an exact ceiling height.
    async fn ceiling_height_price(&self, height_m: Decimal) -> Result<Option<Decimal>, StoreError>;

    /// Surcharge per m² for an exact ridge height.
    async fn ridge_height_price(&self, ridge_m: Decimal) -> Result<Option<Decimal>, StoreError>;

    /// Surcharge per m² for an exact roof overhang.
    async fn roof_overhang_price(&self, overhang_cm: i32) -> Result<Option<Decimal>, StoreError>;

    /// Price per linear meter for a partition kind.
    async fn partition_price(&self, kind: PartitionKind) -> Result<Option<Decimal>, StoreError>;

    /// Active add-on catalog rows for the given codes. Unknown codes are
    /// simply absent from the result.
    async fn addons_by_codes(&self, codes: &[&str]) -> Result<Vec<Addon>, StoreError>;

    /// Base unit price for an exact (width, height, kind) window triple.
    async fn window_base_price(
        &self,
        width_cm: i32,
        height_cm: i32,
        kind: WindowKind,
    ) -> Result<Option<Decimal>, StoreError>;

    /// Multiplier for an exact (two_chambers, laminated) pair. The four
    /// combinations are independent rows, never composable factors.
    async fn window_modifier(
        &self,
        two_chambers: bool,
        laminated: bool,
    ) -> Result<Option<Decimal>, StoreError>;

    /// Door catalog row by exact code.
    async fn door_by_code(&self, code: &str) -> Result<Option<Door>, StoreError>;

    /// The catalog door matching the interior-door naming convention.
    async fn interior_door(&self) -> Result<Option<Door>, StoreError>;

    /// Standard inclusion for a (tech, warm contour, storey) combination.
    async fn std_inclusion(
        &self,
        tech: &str,
        storey: StoreyType,
    ) -> Result<Option<StdInclusion>, StoreError>;

    /// The global delivery rule, if one is configured.
    async fn delivery_rule(&self) -> Result<Option<DeliveryRule>, StoreError>;
}
