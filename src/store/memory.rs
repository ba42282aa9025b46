//! In-memory reference price store.
//!
//! Backs the engine's test suites and local bootstrap runs with the same
//! exact-match lookup semantics as the PostgreSQL store.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    Addon, BasePriceKey, DeliveryRule, Door, PartitionKind, StdInclusion, StoreyType, WindowKind,
};

use super::{PriceStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryPriceStore {
    base_prices: HashMap<BasePriceKey, Decimal>,
    ceiling_heights: HashMap<Decimal, Decimal>,
    ridge_heights: HashMap<Decimal, Decimal>,
    roof_overhangs: HashMap<i32, Decimal>,
    partitions: HashMap<PartitionKind, Decimal>,
    addons: HashMap<String, Addon>,
    window_prices: HashMap<(i32, i32, WindowKind), Decimal>,
    window_modifiers: HashMap<(bool, bool), Decimal>,
    doors: Vec<Door>,
    std_inclusions: HashMap<(String, StoreyType), StdInclusion>,
    delivery_rule: Option<DeliveryRule>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_base_price(
        &mut self,
        tech: &str,
        brand: &str,
        thickness_mm: i32,
        storey: StoreyType,
        price: Decimal,
    ) {
        self.base_prices.insert(
            BasePriceKey {
                tech: tech.to_string(),
                brand: brand.to_string(),
                thickness_mm,
                storey,
            },
            price,
        );
    }

    pub fn insert_ceiling_height(&mut self, height_m: Decimal, price_per_m2: Decimal) {
        self.ceiling_heights.insert(height_m, price_per_m2);
    }

    pub fn insert_ridge_height(&mut self, ridge_m: Decimal, price_per_m2: Decimal) {
        self.ridge_heights.insert(ridge_m, price_per_m2);
    }

    pub fn insert_roof_overhang(&mut self, overhang_cm: i32, price_per_m2: Decimal) {
        self.roof_overhangs.insert(overhang_cm, price_per_m2);
    }

    pub fn insert_partition(&mut self, kind: PartitionKind, price_per_pm: Decimal) {
        self.partitions.insert(kind, price_per_pm);
    }

    pub fn insert_addon(&mut self, addon: Addon) {
        self.addons.insert(addon.code.clone(), addon);
    }

    pub fn insert_window_price(
        &mut self,
        width_cm: i32,
        height_cm: i32,
        kind: WindowKind,
        price: Decimal,
    ) {
        self.window_prices.insert((width_cm, height_cm, kind), price);
    }

    pub fn insert_window_modifier(
        &mut self,
        two_chambers: bool,
        laminated: bool,
        multiplier: Decimal,
    ) {
        self.window_modifiers
            .insert((two_chambers, laminated), multiplier);
    }

    pub fn insert_door(&mut self, door: Door) {
        self.doors.push(door);
    }

    pub fn insert_std_inclusion(&mut self, tech: &str, storey: StoreyType, inclusion: StdInclusion) {
        self.std_inclusions
            .insert((tech.to_string(), storey), inclusion);
    }

    pub fn set_delivery_rule(&mut self, rule: DeliveryRule) {
        self.delivery_rule = Some(rule);
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    async fn base_price_per_m2(&self, key: &BasePriceKey) -> Result<Option<Decimal>, StoreError> {
        Ok(self.base_prices.get(key).copied())
    }

    async fn ceiling_height_price(&self, height_m: Decimal) -> Result<Option<Decimal>, StoreError> {
        Ok(self.ceiling_heights.get(&height_m).copied())
    }

    async fn ridge_height_price(&self, ridge_m: Decimal) -> Result<Option<Decimal>, StoreError> {
        Ok(self.ridge_heights.get(&ridge_m).copied())
    }

    async fn roof_overhang_price(&self, overhang_cm: i32) -> Result<Option<Decimal>, StoreError> {
        Ok(self.roof_overhangs.get(&overhang_cm).copied())
    }

    async fn partition_price(&self, kind: PartitionKind) -> Result<Option<Decimal>, StoreError> {
        Ok(self.partitions.get(&kind).copied())
    }

    async fn addons_by_codes(&self, codes: &[&str]) -> Result<Vec<Addon>, StoreError> {
        Ok(codes
            .iter()
            .filter_map(|code| self.addons.get(*code))
            .filter(|addon| addon.active)
            .cloned()
            .collect())
    }

    async fn window_base_price(
        &self,
        width_cm: i32,
        height_cm: i32,
        kind: WindowKind,
    ) -> Result<Option<Decimal>, StoreError> {
        Ok(self.window_prices.get(&(width_cm, height_cm, kind)).copied())
    }

    async fn window_modifier(
        &self,
        two_chambers: bool,
        laminated: bool,
    ) -> Result<Option<Decimal>, StoreError> {
        Ok(self.window_modifiers.get(&(two_chambers, laminated)).copied())
    }

    async fn door_by_code(&self, code: &str) -> Result<Option<Door>, StoreError> {
        Ok(self.doors.iter().find(|d| d.code == code).cloned())
    }

    async fn interior_door(&self) -> Result<Option<Door>, StoreError> {
        Ok(self
            .doors
            .iter()
            .find(|d| d.code.contains("interior"))
            .cloned())
    }

    async fn std_inclusion(
        &self,
        tech: &str,
        storey: StoreyType,
    ) -> Result<Option<StdInclusion>, StoreError> {
        Ok(self
            .std_inclusions
            .get(&(tech.to_string(), storey))
            .cloned())
    }

    async fn delivery_rule(&self) -> Result<Option<DeliveryRule>, StoreError> {
        Ok(self.delivery_rule.clone())
    }
}
