//! PostgreSQL-backed reference price store.
//!
//! All queries are point lookups with exact-match predicates; `NULL`-free
//! misses surface as `Ok(None)` via `fetch_optional`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::{
    Addon, AreaBreakpoint, BasePriceKey, CalcMode, DeliveryRule, Door, PartitionKind, StdInclusion,
    StoreyType, WindowKind, CONTOUR_WARM,
};

use super::{PriceStore, StoreError};

#[derive(Clone)]
pub struct PgPriceStore {
    pool: PgPool,
}

impl PgPriceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn window_kind_from_code(code: &str) -> Result<WindowKind, StoreError> {
    match code {
        "gluh" => Ok(WindowKind::Gluh),
        "povorot" => Ok(WindowKind::Povorot),
        "povorot_otkid" => Ok(WindowKind::PovorotOtkid),
        other => Err(StoreError::InvalidData {
            table: "std_inclusions",
            reason: format!("unknown window type '{other}'"),
        }),
    }
}

#[derive(sqlx::FromRow)]
struct AddonRow {
    code: String,
    title: String,
    calc_mode: String,
    price: Decimal,
    params: serde_json::Value,
    active: bool,
}

#[derive(sqlx::FromRow)]
struct DoorRow {
    code: String,
    title: String,
    price_rub: Decimal,
}

impl From<DoorRow> for Door {
    fn from(row: DoorRow) -> Self {
        Self {
            code: row.code,
            title: row.title,
            price_rub: row.price_rub,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StdInclusionRow {
    included_window_width_cm: i32,
    included_window_height_cm: i32,
    included_window_type: String,
    area_to_qty: serde_json::Value,
    included_entry_door_code: Option<String>,
    included_interior_doors_qty: Option<i32>,
}

impl TryFrom<StdInclusionRow> for StdInclusion {
    type Error = StoreError;

    fn try_from(row: StdInclusionRow) -> Result<Self, StoreError> {
        let area_to_qty: Vec<AreaBreakpoint> = serde_json::from_value(row.area_to_qty)
            .map_err(|e| StoreError::InvalidData {
                table: "std_inclusions",
                reason: format!("area_to_qty breakpoints do not parse: {e}"),
            })?;

        Ok(Self {
            window_width_cm: row.included_window_width_cm,
            window_height_cm: row.included_window_height_cm,
            window_kind: window_kind_from_code(&row.included_window_type)?,
            area_to_qty,
            entry_door_code: row.included_entry_door_code,
            interior_doors_qty: row.included_interior_doors_qty,
        })
    }
}

#[async_trait]
impl PriceStore for PgPriceStore {
    async fn base_price_per_m2(&self, key: &BasePriceKey) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT bp.price_rub
            FROM base_price_m2 bp
            JOIN build_technologies t ON bp.tech_id = t.id
            JOIN contours c ON bp.contour_id = c.id
            JOIN insulation_brands b ON bp.brand_id = b.id
            JOIN insulation_thicknesses th ON bp.thickness_id = th.id
            JOIN storey_types s ON bp.storey_type_id = s.id
            WHERE t.code = $1 AND c.code = $2 AND b.code = $3 AND th.mm = $4 AND s.code = $5
            "#,
        )
        .bind(&key.tech)
        .bind(CONTOUR_WARM)
        .bind(&key.brand)
        .bind(key.thickness_mm)
        .bind(key.storey.as_code())
        .fetch_optional(&self.pool)
        .await?;

        Ok(price)
    }

    async fn ceiling_height_price(&self, height_m: Decimal) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> =
            sqlx::query_scalar("SELECT price_per_m2 FROM ceiling_height_prices WHERE height_m = $1")
                .bind(height_m)
                .fetch_optional(&self.pool)
                .await?;
        Ok(price)
    }

    async fn ridge_height_price(&self, ridge_m: Decimal) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> = sqlx::query_scalar(
            "SELECT price_per_m2 FROM ridge_height_prices WHERE ridge_height_m = $1",
        )
        .bind(ridge_m)
        .fetch_optional(&self.pool)
        .await?;
        Ok(price)
    }

    async fn roof_overhang_price(&self, overhang_cm: i32) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> = sqlx::query_scalar(
            "SELECT price_per_m2 FROM roof_overhang_prices WHERE overhang_cm = $1",
        )
        .bind(overhang_cm)
        .fetch_optional(&self.pool)
        .await?;
        Ok(price)
    }

    async fn partition_price(&self, kind: PartitionKind) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> = sqlx::query_scalar(
            "SELECT price_per_pm FROM partition_prices WHERE type::text = $1",
        )
        .bind(kind.as_code())
        .fetch_optional(&self.pool)
        .await?;
        Ok(price)
    }

    async fn addons_by_codes(&self, codes: &[&str]) -> Result<Vec<Addon>, StoreError> {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        let rows: Vec<AddonRow> = sqlx::query_as(
            r#"
            SELECT code, title, calc_mode::text AS calc_mode, price, params, active
            FROM addons
            WHERE code = ANY($1) AND active
            "#,
        )
        .bind(&codes)
        .fetch_all(&self.pool)
        .await?;

        let mut addons = Vec::with_capacity(rows.len());
        for row in rows {
            match CalcMode::from_row(&row.calc_mode, &row.params) {
                Some(mode) => addons.push(Addon {
                    code: row.code,
                    title: row.title,
                    mode,
                    price: row.price,
                    active: row.active,
                }),
                None => {
                    tracing::warn!(
                        code = %row.code,
                        calc_mode = %row.calc_mode,
                        "Skipping add-on with unpriced calculation mode"
                    );
                }
            }
        }
        Ok(addons)
    }

    async fn window_base_price(
        &self,
        width_cm: i32,
        height_cm: i32,
        kind: WindowKind,
    ) -> Result<Option<Decimal>, StoreError> {
        let price: Option<Decimal> = sqlx::query_scalar(
            r#"
            SELECT base_price_rub FROM window_base_prices
            WHERE width_cm = $1 AND height_cm = $2 AND type::text = $3
            "#,
        )
        .bind(width_cm)
        .bind(height_cm)
        .bind(kind.as_code())
        .fetch_optional(&self.pool)
        .await?;
        Ok(price)
    }

    async fn window_modifier(
        &self,
        two_chambers: bool,
        laminated: bool,
    ) -> Result<Option<Decimal>, StoreError> {
        let multiplier: Option<Decimal> = sqlx::query_scalar(
            "SELECT multiplier FROM window_modifiers WHERE two_chambers = $1 AND laminated = $2",
        )
        .bind(two_chambers)
        .bind(laminated)
        .fetch_optional(&self.pool)
        .await?;
        Ok(multiplier)
    }

    async fn door_by_code(&self, code: &str) -> Result<Option<Door>, StoreError> {
        let row: Option<DoorRow> =
            sqlx::query_as("SELECT code, title, price_rub FROM doors WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Into::into))
    }

    async fn interior_door(&self) -> Result<Option<Door>, StoreError> {
        let row: Option<DoorRow> = sqlx::query_as(
            "SELECT code, title, price_rub FROM doors WHERE code ILIKE '%interior%' ORDER BY id LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }

    async fn std_inclusion(
        &self,
        tech: &str,
        storey: StoreyType,
    ) -> Result<Option<StdInclusion>, StoreError> {
        let row: Option<StdInclusionRow> = sqlx::query_as(
            r#"
            SELECT si.included_window_width_cm,
                   si.included_window_height_cm,
                   si.included_window_type::text AS included_window_type,
                   si.area_to_qty,
                   si.included_entry_door_code,
                   si.included_interior_doors_qty
            FROM std_inclusions si
            JOIN build_technologies t ON si.tech_id = t.id
            JOIN contours c ON si.contour_id = c.id
            JOIN storey_types s ON si.storey_type_id = s.id
            WHERE t.code = $1 AND c.code = $2 AND s.code = $3
            "#,
        )
        .bind(tech)
        .bind(CONTOUR_WARM)
        .bind(storey.as_code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delivery_rule(&self) -> Result<Option<DeliveryRule>, StoreError> {
        let row: Option<(i32, Decimal)> =
            sqlx::query_as("SELECT free_km, rate_per_km FROM delivery_rules ORDER BY id LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(free_km, rate_per_km)| DeliveryRule {
            free_km,
            rate_per_km,
        }))
    }
}
