//! Request and response shapes of the `/calculate` endpoint.
//!
//! The request arrives fully validated: every enumeration is constrained at
//! deserialization time, so the engine never sees an invalid token.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::{CeilingKind, Overhang, PartitionKind, WindowKind};

fn default_quantity() -> u32 {
    1
}

/// House dimensions in meters.
#[derive(Debug, Clone, Deserialize)]
pub struct HouseDims {
    pub length_m: f64,
    pub width_m: f64,
}

/// Terrace or porch component with an enabled flag and its own dimensions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockComponent {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub length_m: Option<f64>,
    #[serde(default)]
    pub width_m: Option<f64>,
}

/// Terrace or porch block; each may carry a primary and an extra component.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttachedBlock {
    #[serde(default)]
    pub primary: Option<BlockComponent>,
    #[serde(default)]
    pub extra: Option<BlockComponent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CeilingSpec {
    #[serde(rename = "type")]
    pub kind: CeilingKind,
    pub height_m: f64,
    #[serde(default)]
    pub ridge_delta_cm: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoofSpec {
    #[serde(default)]
    pub overhang_cm: Overhang,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionsSpec {
    pub enabled: bool,
    #[serde(rename = "type", default)]
    pub kind: Option<PartitionKind>,
    #[serde(default)]
    pub run_m: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsulationSpec {
    pub brand: String,
    pub mm: i32,
    pub build_tech: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeliverySpec {
    pub distance_km: f64,
}

impl Default for DeliverySpec {
    fn default() -> Self {
        Self { distance_km: 100.0 }
    }
}

/// A customer-selected window.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSelection {
    pub width_cm: i32,
    pub height_cm: i32,
    #[serde(rename = "type")]
    pub kind: WindowKind,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub dual_chamber: bool,
    #[serde(default)]
    pub laminated: bool,
}

/// A customer-selected door, resolved against the door catalog by code.
#[derive(Debug, Clone, Deserialize)]
pub struct DoorSelection {
    pub code: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// A customer-selected add-on, resolved against the add-on catalog by code.
#[derive(Debug, Clone, Deserialize)]
pub struct AddonSelection {
    pub code: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Full configuration for one quote calculation.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateRequest {
    pub house: HouseDims,
    #[serde(default)]
    pub terrace: Option<AttachedBlock>,
    #[serde(default)]
    pub porch: Option<AttachedBlock>,
    pub ceiling: CeilingSpec,
    #[serde(default)]
    pub roof: RoofSpec,
    pub partitions: PartitionsSpec,
    pub insulation: InsulationSpec,
    #[serde(default)]
    pub delivery: DeliverySpec,
    #[serde(default)]
    pub windows: Vec<WindowSelection>,
    #[serde(default)]
    pub doors: Vec<DoorSelection>,
    #[serde(default)]
    pub addons: Vec<AddonSelection>,
    #[serde(default)]
    pub commission_rub: f64,
}

// --- Response ---

/// Dimension summary echoed back to the customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionsBlock {
    pub heated_area_m2: Decimal,
    pub terrace_area_m2: Decimal,
    pub porch_area_m2: Decimal,
    pub ceiling_height_m: Decimal,
    pub ceiling_type: CeilingKind,
    pub ridge_delta_cm: i32,
    pub roof_overhang: String,
}

/// One priced window row of the quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowLine {
    pub size: String,
    pub kind: String,
    pub quantity: u32,
    pub unit_price_rub: Decimal,
    pub total_rub: Decimal,
}

/// One priced door row of the quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorLine {
    pub title: String,
    pub quantity: u32,
    pub unit_price_rub: Decimal,
    pub total_rub: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowsAndDoorsBlock {
    pub windows: Vec<WindowLine>,
    pub doors: Vec<DoorLine>,
    pub section_total_rub: Decimal,
}

/// One labeled add-on row. The formula string shows the operands of the
/// calculation for customer-facing transparency; it is a required output
/// field, not cosmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddonLine {
    pub code: String,
    pub title: String,
    pub formula: String,
    pub total_rub: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureBlock {
    pub base_price_rub: Decimal,
    pub addons: Vec<AddonLine>,
    pub delivery_rub: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalsBlock {
    pub subtotal_rub: Decimal,
    pub commission_rub: Decimal,
    pub final_price_rub: Decimal,
}

/// The itemized quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    pub dimensions: DimensionsBlock,
    pub windows_and_doors: WindowsAndDoorsBlock,
    pub structure: StructureBlock,
    pub totals: TotalsBlock,
}
