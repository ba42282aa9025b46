//! Generic add-on pricing.
//!
//! Each catalog row carries a calculation mode that determines which
//! geometric quantity its price multiplies. Unknown codes are skipped;
//! only positive costs are itemized.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::domain::{Addon, AddonLine, CalcMode, CalculateRequest};
use crate::store::{PriceStore, StoreError};

use super::geometry::HouseGeometry;

pub async fn calculate_generic_addons(
    store: &dyn PriceStore,
    req: &CalculateRequest,
    geom: &HouseGeometry,
) -> Result<(Decimal, Vec<AddonLine>), StoreError> {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    if req.addons.is_empty() {
        return Ok((total, lines));
    }

    let codes: Vec<&str> = req.addons.iter().map(|a| a.code.as_str()).collect();
    let catalog: HashMap<String, Addon> = store
        .addons_by_codes(&codes)
        .await?
        .into_iter()
        .map(|a| (a.code.clone(), a))
        .collect();

    for selection in &req.addons {
        let Some(addon) = catalog.get(&selection.code) else {
            tracing::warn!(
                table = "addons",
                code = %selection.code,
                "Unknown add-on code; selection skipped"
            );
            continue;
        };

        let (cost, formula) = match &addon.mode {
            CalcMode::Area => {
                let cost = addon.price * geom.area_m2;
                (cost, format!("{:.2} m² × {} rub", geom.area_m2, addon.price))
            }
            // RunM and Perimeter price the same quantity; Perimeter is the
            // finer-grained alias
            CalcMode::RunM | CalcMode::Perimeter => {
                let cost = addon.price * geom.perimeter_m;
                (
                    cost,
                    format!("{:.2} lin.m × {} rub", geom.perimeter_m, addon.price),
                )
            }
            CalcMode::Count => {
                let cost = addon.price * Decimal::from(selection.quantity);
                (cost, format!("{} pcs × {} rub", selection.quantity, addon.price))
            }
            CalcMode::RoofLSides { sides, reserve_m } => {
                let run = geom.long_side_m + *reserve_m;
                let cost = addon.price * run * Decimal::from(*sides);
                (
                    cost,
                    format!(
                        "({}+{}) m × {} sides × {} rub",
                        geom.long_side_m, reserve_m, sides, addon.price
                    ),
                )
            }
        };

        if cost > Decimal::ZERO {
            total += cost;
            lines.push(AddonLine {
                code: addon.code.clone(),
                title: addon.title.clone(),
                formula,
                total_rub: cost.round_dp(2),
            });
        }
    }

    Ok((total, lines))
}
