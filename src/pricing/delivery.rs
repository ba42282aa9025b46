//! Delivery pricing: a free-distance threshold plus a linear per-km rate.

use rust_decimal::Decimal;

use crate::domain::{AddonLine, CalculateRequest, DeliveryRule};
use crate::store::{PriceStore, StoreError};

use super::dec;

/// Bootstrap defaults used when no delivery rule row exists; the reference
/// row is canonical when present.
pub const DEFAULT_FREE_KM: i32 = 100;

fn default_rate_per_km() -> Decimal {
    Decimal::from(120)
}

pub async fn calculate_delivery(
    store: &dyn PriceStore,
    req: &CalculateRequest,
) -> Result<(Decimal, Option<AddonLine>), StoreError> {
    let rule = store.delivery_rule().await?.unwrap_or_else(|| DeliveryRule {
        free_km: DEFAULT_FREE_KM,
        rate_per_km: default_rate_per_km(),
    });

    let distance = dec(req.delivery.distance_km);
    let free = Decimal::from(rule.free_km);
    if distance <= free {
        return Ok((Decimal::ZERO, None));
    }

    let cost = (distance - free) * rule.rate_per_km;
    let line = AddonLine {
        code: "DELIVERY".to_string(),
        title: "Delivery".to_string(),
        formula: format!("({distance} km - {free} km) × {} rub", rule.rate_per_km),
        total_rub: cost.round_dp(2),
    };
    Ok((cost, Some(line)))
}
