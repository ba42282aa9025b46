//! Base price resolver (the price-per-m² matrix).

use rust_decimal::Decimal;

use crate::domain::{BasePriceKey, CalculateRequest};
use crate::store::{PriceStore, StoreError};

/// Resolve the base price: exact match on (tech, warm contour, brand,
/// thickness, storey) times the heated-contour area. A missing matrix row
/// resolves to zero so a quote is always produced; the miss is logged so an
/// operator can spot incomplete reference data.
pub async fn resolve_base_price(
    store: &dyn PriceStore,
    req: &CalculateRequest,
    area_m2: Decimal,
) -> Result<Decimal, StoreError> {
    let key = BasePriceKey {
        tech: req.insulation.build_tech.clone(),
        brand: req.insulation.brand.clone(),
        thickness_mm: req.insulation.mm,
        storey: req.ceiling.kind.storey_type(),
    };

    match store.base_price_per_m2(&key).await? {
        Some(price_per_m2) => Ok(price_per_m2 * area_m2),
        None => {
            tracing::warn!(
                table = "base_price_m2",
                tech = %key.tech,
                brand = %key.brand,
                thickness_mm = key.thickness_mm,
                storey = key.storey.as_code(),
                "No base price for this combination; base price resolves to zero"
            );
            Ok(Decimal::ZERO)
        }
    }
}
