//! Quote aggregator.
//!
//! A single-pass linear pipeline: areas, base price, structural add-ons,
//! windows and doors, delivery, totals. Every intermediate line item is
//! preserved in output order (geometry add-ons, partitions, generic
//! add-ons, delivery) for customer-facing transparency.

use rust_decimal::Decimal;

use crate::domain::{
    CalculateRequest, DimensionsBlock, QuoteResponse, StructureBlock, TotalsBlock,
    WindowsAndDoorsBlock,
};
use crate::store::{PriceStore, StoreError};

use super::{addons, base, dec, delivery, doors, geometry, partitions, roof, windows};

/// Compute one quote from a configuration and a point-in-time snapshot of
/// the reference prices. Deterministic for a fixed snapshot; no side
/// effects beyond store reads.
pub async fn calculate(
    store: &dyn PriceStore,
    req: &CalculateRequest,
) -> Result<QuoteResponse, StoreError> {
    // 1. Areas from raw dimensions
    let geom = geometry::house_geometry(&req.house);
    let terrace_area = geometry::attached_area(req.terrace.as_ref());
    let porch_area = geometry::attached_area(req.porch.as_ref());

    // 2. Base price
    let base_price = base::resolve_base_price(store, req, geom.area_m2).await?;

    // 3. Structural add-ons, independent and summed
    let (roof_cost, roof_lines) = roof::calculate_roof_costs(store, req, geom.area_m2).await?;
    let (partitions_cost, partition_lines) =
        partitions::calculate_partitions_cost(store, req).await?;
    let (generic_cost, generic_lines) =
        addons::calculate_generic_addons(store, req, &geom).await?;

    let mut addon_lines = roof_lines;
    addon_lines.extend(partition_lines);
    addon_lines.extend(generic_lines);

    // 4. Windows (net of the standard-inclusion credit) and doors
    let (windows_total, window_lines) = windows::windows_section(store, req, geom.area_m2).await?;
    let (doors_total, door_lines) = doors::calculate_doors(store, req).await?;
    let windows_doors_total = windows_total + doors_total;

    // 5. Delivery
    let (delivery_cost, delivery_line) = delivery::calculate_delivery(store, req).await?;
    if let Some(line) = delivery_line {
        addon_lines.push(line);
    }

    // 6.–7. Totals; commission is a pass-through input
    let subtotal = base_price
        + roof_cost
        + partitions_cost
        + generic_cost
        + windows_doors_total
        + delivery_cost;
    let commission = dec(req.commission_rub);
    let final_price = subtotal + commission;

    // 8. Assemble the itemized response; monetary values are rounded to two
    //    fraction digits here and nowhere earlier in the aggregation
    Ok(QuoteResponse {
        dimensions: DimensionsBlock {
            heated_area_m2: geom.area_m2.round_dp(2),
            terrace_area_m2: terrace_area.round_dp(2),
            porch_area_m2: porch_area.round_dp(2),
            ceiling_height_m: dec(req.ceiling.height_m).round_dp(1),
            ceiling_type: req.ceiling.kind,
            ridge_delta_cm: req.ceiling.ridge_delta_cm.unwrap_or(0),
            roof_overhang: req.roof.overhang_cm.as_token().to_string(),
        },
        windows_and_doors: WindowsAndDoorsBlock {
            windows: window_lines,
            doors: door_lines,
            section_total_rub: windows_doors_total.round_dp(2),
        },
        structure: StructureBlock {
            base_price_rub: base_price.round_dp(2),
            addons: addon_lines,
            delivery_rub: delivery_cost.round_dp(2),
        },
        totals: TotalsBlock {
            subtotal_rub: subtotal.round_dp(2),
            commission_rub: commission.round_dp(2),
            final_price_rub: final_price.round_dp(2),
        },
    })
}
