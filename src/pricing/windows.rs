//! Window pricing and standard-inclusion replacement.
//!
//! A selection is priced from the exact (width, height, kind) base price and
//! the exact (two_chambers, laminated) modifier row. Modifier multipliers
//! are not composable: the both-flags combination has its own stored row and
//! is never the product of the individual factors.

use rust_decimal::Decimal;

use crate::domain::{CalculateRequest, WindowKind, WindowLine, WindowSelection};
use crate::store::{PriceStore, StoreError};

/// The standard windows a configuration ships with, resolved from the
/// standard-inclusion table. Consumed by both the credit path (custom
/// windows selected) and the itemize path (none selected).
#[derive(Debug, Clone, PartialEq)]
pub struct StandardWindows {
    pub width_cm: i32,
    pub height_cm: i32,
    pub kind: WindowKind,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl StandardWindows {
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

async fn modifier_multiplier(
    store: &dyn PriceStore,
    two_chambers: bool,
    laminated: bool,
) -> Result<Decimal, StoreError> {
    match store.window_modifier(two_chambers, laminated).await? {
        Some(multiplier) => Ok(multiplier),
        None => {
            if two_chambers || laminated {
                tracing::warn!(
                    table = "window_modifiers",
                    two_chambers,
                    laminated,
                    "No modifier row for combination; multiplier defaults to 1.0"
                );
            }
            Ok(Decimal::ONE)
        }
    }
}

fn describe_selection(selection: &WindowSelection) -> String {
    let mut description = selection.kind.describe().to_string();
    let mut mods = Vec::new();
    if selection.dual_chamber {
        mods.push("two-chamber");
    }
    if selection.laminated {
        mods.push("laminated");
    }
    if !mods.is_empty() {
        description.push_str(&format!(" ({})", mods.join(", ")));
    }
    description
}

/// Price the customer's window selections. A selection whose size/type has
/// no base-price row is dropped without charge.
pub async fn price_selected_windows(
    store: &dyn PriceStore,
    selections: &[WindowSelection],
) -> Result<(Decimal, Vec<WindowLine>), StoreError> {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    for selection in selections {
        let Some(base_price) = store
            .window_base_price(selection.width_cm, selection.height_cm, selection.kind)
            .await?
        else {
            tracing::warn!(
                table = "window_base_prices",
                width_cm = selection.width_cm,
                height_cm = selection.height_cm,
                kind = selection.kind.as_code(),
                "No base price for window size/type; selection skipped"
            );
            continue;
        };

        let multiplier =
            modifier_multiplier(store, selection.dual_chamber, selection.laminated).await?;
        let unit_price = base_price * multiplier;
        let line_total = unit_price * Decimal::from(selection.quantity);
        total += line_total;

        lines.push(WindowLine {
            size: format!("{}×{}", selection.width_cm, selection.height_cm),
            kind: describe_selection(selection),
            quantity: selection.quantity,
            unit_price_rub: unit_price.round_dp(2),
            total_rub: line_total.round_dp(2),
        });
    }

    Ok((total, lines))
}

/// Resolve the standard windows the base price already covers for this
/// configuration: the first area breakpoint (ascending by area ceiling)
/// covering the house area determines the included quantity; the unit price
/// uses the plain (false, false) modifier.
pub async fn resolve_standard_windows(
    store: &dyn PriceStore,
    req: &CalculateRequest,
    area_m2: Decimal,
) -> Result<Option<StandardWindows>, StoreError> {
    let storey = req.ceiling.kind.storey_type();
    let Some(inclusion) = store
        .std_inclusion(&req.insulation.build_tech, storey)
        .await?
    else {
        tracing::warn!(
            table = "std_inclusions",
            tech = %req.insulation.build_tech,
            storey = storey.as_code(),
            "No standard inclusion for configuration"
        );
        return Ok(None);
    };

    let mut breakpoints = inclusion.area_to_qty.clone();
    breakpoints.sort_by(|a, b| a.max_m2.cmp(&b.max_m2));
    let quantity = breakpoints
        .iter()
        .find(|bp| area_m2 <= bp.max_m2)
        .map(|bp| bp.qty)
        .unwrap_or(0);
    if quantity == 0 {
        return Ok(None);
    }

    let Some(base_price) = store
        .window_base_price(
            inclusion.window_width_cm,
            inclusion.window_height_cm,
            inclusion.window_kind,
        )
        .await?
    else {
        tracing::warn!(
            table = "window_base_prices",
            width_cm = inclusion.window_width_cm,
            height_cm = inclusion.window_height_cm,
            "Standard window missing from price table; no credit applied"
        );
        return Ok(None);
    };

    let multiplier = modifier_multiplier(store, false, false).await?;

    Ok(Some(StandardWindows {
        width_cm: inclusion.window_width_cm,
        height_cm: inclusion.window_height_cm,
        kind: inclusion.window_kind,
        quantity,
        unit_price: base_price * multiplier,
    }))
}

/// The windows portion of the quote.
///
/// With custom selections, the cost of the standard windows the base price
/// already covers is credited back so the customer is not double-charged;
/// a credit exceeding the custom total yields a negative result on purpose.
/// With no selections, the standard windows are itemized and charged.
pub async fn windows_section(
    store: &dyn PriceStore,
    req: &CalculateRequest,
    area_m2: Decimal,
) -> Result<(Decimal, Vec<WindowLine>), StoreError> {
    if req.windows.is_empty() {
        let Some(std_windows) = resolve_standard_windows(store, req, area_m2).await? else {
            return Ok((Decimal::ZERO, Vec::new()));
        };
        let total = std_windows.total();
        let line = WindowLine {
            size: format!("{}×{}", std_windows.width_cm, std_windows.height_cm),
            kind: std_windows.kind.describe().to_string(),
            quantity: std_windows.quantity,
            unit_price_rub: std_windows.unit_price.round_dp(2),
            total_rub: total.round_dp(2),
        };
        return Ok((total, vec![line]));
    }

    let (custom_total, lines) = price_selected_windows(store, &req.windows).await?;
    let credit = resolve_standard_windows(store, req, area_m2)
        .await?
        .map(|s| s.total())
        .unwrap_or(Decimal::ZERO);

    // Not clamped: a credit larger than the custom total carries through as
    // a negative windows subtotal.
    Ok((custom_total - credit, lines))
}
