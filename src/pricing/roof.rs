//! Ceiling and roof geometry add-ons.
//!
//! Three independent, order-insensitive checks, each producing at most one
//! line item. Every lookup is an exact match against a discrete reference
//! set; a value with no matching row contributes zero and no line item.

use rust_decimal::Decimal;

use crate::domain::{AddonLine, CalculateRequest, CeilingKind};
use crate::store::{PriceStore, StoreError};

use super::dec;

pub async fn calculate_roof_costs(
    store: &dyn PriceStore,
    req: &CalculateRequest,
    area_m2: Decimal,
) -> Result<(Decimal, Vec<AddonLine>), StoreError> {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    // 1. Ceiling height surcharge (zero at the baseline height). The
    //    requested height is looked up as-is; an off-grid value must miss,
    //    never snap to a neighboring row.
    let height_m = dec(req.ceiling.height_m);
    match store.ceiling_height_price(height_m).await? {
        Some(price) if price > Decimal::ZERO => {
            let cost = price * area_m2;
            total += cost;
            lines.push(AddonLine {
                code: "CEILING_H".to_string(),
                title: format!("Ceiling height increase to {height_m} m"),
                formula: format!("{:.2} m² × {} rub", area_m2, price),
                total_rub: cost.round_dp(2),
            });
        }
        Some(_) => {}
        None => {
            tracing::warn!(
                table = "ceiling_height_prices",
                height_m = %height_m,
                "No surcharge row for ceiling height; contributes zero"
            );
        }
    }

    // 2. Ridge height surcharge; a ridge delta is only meaningful for the
    //    flat ceiling type
    if req.ceiling.kind == CeilingKind::Flat {
        if let Some(delta_cm) = req.ceiling.ridge_delta_cm.filter(|d| *d > 0) {
            let ridge_m = Decimal::from(delta_cm) / Decimal::ONE_HUNDRED;
            match store.ridge_height_price(ridge_m).await? {
                Some(price) if price > Decimal::ZERO => {
                    let cost = price * area_m2;
                    total += cost;
                    lines.push(AddonLine {
                        code: "RIDGE_H".to_string(),
                        title: format!("Ridge raised by {delta_cm} cm"),
                        formula: format!("{:.2} m² × {} rub", area_m2, price),
                        total_rub: cost.round_dp(2),
                    });
                }
                Some(_) => {}
                None => {
                    tracing::warn!(
                        table = "ridge_height_prices",
                        ridge_m = %ridge_m,
                        "No surcharge row for ridge height; contributes zero"
                    );
                }
            }
        }
    }

    // 3. Roof overhang surcharge; the standard overhang is free by
    //    convention, no lookup performed
    if let Some(overhang_cm) = req.roof.overhang_cm.centimeters() {
        match store.roof_overhang_price(overhang_cm).await? {
            Some(price) if price > Decimal::ZERO => {
                let cost = price * area_m2;
                total += cost;
                lines.push(AddonLine {
                    code: "OVERHANG".to_string(),
                    title: format!("Roof overhang increase to {overhang_cm} cm"),
                    formula: format!("{:.2} m² × {} rub", area_m2, price),
                    total_rub: cost.round_dp(2),
                });
            }
            Some(_) => {}
            None => {
                tracing::warn!(
                    table = "roof_overhang_prices",
                    overhang_cm,
                    "No surcharge row for roof overhang; contributes zero"
                );
            }
        }
    }

    Ok((total, lines))
}
