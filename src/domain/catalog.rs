//! Reference catalog entities
//!
//! These types mirror the reference-price tables. They are immutable during
//! a calculation; an external sync/admin process owns their lifecycle.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The only insulation contour this request shape supports. Cold-contour
/// pricing (auxiliary structures) is a separate product.
pub const CONTOUR_WARM: &str = "warm";

/// Window opening mechanism, one axis of the window base-price key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// Fixed, non-opening
    Gluh,
    /// Turn
    Povorot,
    /// Tilt-and-turn
    PovorotOtkid,
}

impl WindowKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Gluh => "gluh",
            Self::Povorot => "povorot",
            Self::PovorotOtkid => "povorot_otkid",
        }
    }

    /// Human-readable description used in quote line items.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Gluh => "fixed",
            Self::Povorot => "turn",
            Self::PovorotOtkid => "tilt-and-turn",
        }
    }
}

/// Partition wall construction, one row per kind in the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionKind {
    None,
    Plain,
    Insul50,
    Insul100,
}

impl PartitionKind {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Plain => "plain",
            Self::Insul50 => "insul50",
            Self::Insul100 => "insul100",
        }
    }
}

/// Ceiling construction, also determines the storey type used as a
/// base-price axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CeilingKind {
    Flat,
    Rafters,
}

impl CeilingKind {
    pub fn storey_type(&self) -> StoreyType {
        match self {
            Self::Flat => StoreyType::One,
            Self::Rafters => StoreyType::Mansard,
        }
    }
}

/// Coarse building-shape category derived from the ceiling kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreyType {
    One,
    Mansard,
}

impl StoreyType {
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::Mansard => "mansard",
        }
    }
}

/// Roof overhang selection. The standard overhang is free by convention and
/// has no reference-price row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Overhang {
    #[default]
    #[serde(rename = "std")]
    Std,
    #[serde(rename = "30")]
    Cm30,
    #[serde(rename = "40")]
    Cm40,
    #[serde(rename = "50")]
    Cm50,
}

impl Overhang {
    /// Numeric overhang for the surcharge lookup; `None` for the free
    /// standard overhang.
    pub fn centimeters(&self) -> Option<i32> {
        match self {
            Self::Std => None,
            Self::Cm30 => Some(30),
            Self::Cm40 => Some(40),
            Self::Cm50 => Some(50),
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Std => "std",
            Self::Cm30 => "30",
            Self::Cm40 => "40",
            Self::Cm50 => "50",
        }
    }
}

/// Lookup key for the base price-per-m² matrix. The contour axis is fixed to
/// [`CONTOUR_WARM`] and applied inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BasePriceKey {
    pub tech: String,
    pub brand: String,
    pub thickness_mm: i32,
    pub storey: StoreyType,
}

/// Geometric quantity an add-on's price is multiplied by. Each variant
/// carries exactly the parameters its formula needs.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcMode {
    /// price × house area
    Area,
    /// price × house perimeter
    RunM,
    /// price × house perimeter (finer-grained alias of RunM)
    Perimeter,
    /// price × requested quantity
    Count,
    /// price × (longer house dimension + reserve) × sides. Models items like
    /// gutters that run along the longer roof edges.
    RoofLSides { sides: u32, reserve_m: Decimal },
}

impl CalcMode {
    /// Build a mode from a catalog row's mode tag and free-form parameter
    /// map. Returns `None` for tags the engine does not price.
    pub fn from_row(mode: &str, params: &serde_json::Value) -> Option<Self> {
        match mode {
            "AREA" => Some(Self::Area),
            "RUN_M" => Some(Self::RunM),
            "PERIMETER" => Some(Self::Perimeter),
            "COUNT" => Some(Self::Count),
            "ROOF_L_SIDES" => {
                let sides = params
                    .get("sides")
                    .and_then(|v| v.as_u64())
                    .map(|v| v as u32)
                    .unwrap_or(2);
                let reserve_m = params
                    .get("reserve_m")
                    .and_then(|v| v.as_f64())
                    .and_then(Decimal::from_f64)
                    .unwrap_or(Decimal::ONE);
                Some(Self::RoofLSides { sides, reserve_m })
            }
            _ => None,
        }
    }
}

/// Catalog row for an optional extra.
#[derive(Debug, Clone, PartialEq)]
pub struct Addon {
    pub code: String,
    pub title: String,
    pub mode: CalcMode,
    pub price: Decimal,
    pub active: bool,
}

/// Door catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub code: String,
    pub title: String,
    pub price_rub: Decimal,
}

/// One step of the area→quantity breakpoint table, ordered ascending by
/// area ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBreakpoint {
    pub max_m2: Decimal,
    pub qty: u32,
}

/// What ships "for free" in the base price for a given configuration, so it
/// can be credited back when the customer upgrades away from it.
#[derive(Debug, Clone, PartialEq)]
pub struct StdInclusion {
    pub window_width_cm: i32,
    pub window_height_cm: i32,
    pub window_kind: WindowKind,
    pub area_to_qty: Vec<AreaBreakpoint>,
    pub entry_door_code: Option<String>,
    pub interior_doors_qty: Option<i32>,
}

/// Delivery pricing rule; a single global row.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRule {
    pub free_km: i32,
    pub rate_per_km: Decimal,
}
