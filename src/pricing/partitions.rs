//! Interior partition pricing (linear-meter rate by partition kind).

use rust_decimal::Decimal;

use crate::domain::{AddonLine, CalculateRequest, PartitionKind};
use crate::store::{PriceStore, StoreError};

use super::dec;

pub async fn calculate_partitions_cost(
    store: &dyn PriceStore,
    req: &CalculateRequest,
) -> Result<(Decimal, Vec<AddonLine>), StoreError> {
    let spec = &req.partitions;

    let kind = match spec.kind {
        Some(kind) if spec.enabled && kind != PartitionKind::None => kind,
        _ => return Ok((Decimal::ZERO, Vec::new())),
    };
    let run_m = match spec.run_m {
        Some(run) if run > 0.0 => dec(run),
        _ => return Ok((Decimal::ZERO, Vec::new())),
    };

    let Some(price_per_pm) = store.partition_price(kind).await? else {
        tracing::warn!(
            table = "partition_prices",
            kind = kind.as_code(),
            "No price row for partition kind; contributes zero"
        );
        return Ok((Decimal::ZERO, Vec::new()));
    };

    let cost = price_per_pm * run_m;
    let line = AddonLine {
        code: "PARTITIONS".to_string(),
        title: format!("Partitions ({})", kind.as_code()),
        formula: format!("{run_m} lin.m × {price_per_pm} rub"),
        total_rub: cost.round_dp(2),
    };
    Ok((cost, vec![line]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CeilingKind, CeilingSpec, DeliverySpec, HouseDims, InsulationSpec, PartitionsSpec, RoofSpec,
    };
    use crate::store::InMemoryPriceStore;

    fn request(spec: PartitionsSpec) -> CalculateRequest {
        CalculateRequest {
            house: HouseDims {
                length_m: 6.0,
                width_m: 8.0,
            },
            terrace: None,
            porch: None,
            ceiling: CeilingSpec {
                kind: CeilingKind::Flat,
                height_m: 2.4,
                ridge_delta_cm: None,
            },
            roof: RoofSpec::default(),
            partitions: spec,
            insulation: InsulationSpec {
                brand: "izobel".to_string(),
                mm: 100,
                build_tech: "panel".to_string(),
            },
            delivery: DeliverySpec { distance_km: 0.0 },
            windows: Vec::new(),
            doors: Vec::new(),
            addons: Vec::new(),
            commission_rub: 0.0,
        }
    }

    fn seeded_store() -> InMemoryPriceStore {
        let mut store = InMemoryPriceStore::new();
        store.insert_partition(PartitionKind::Plain, Decimal::from(1000));
        store.insert_partition(PartitionKind::Insul100, Decimal::from(2000));
        store
    }

    #[tokio::test]
    async fn run_length_times_linear_meter_price() {
        let store = seeded_store();
        let req = request(PartitionsSpec {
            enabled: true,
            kind: Some(PartitionKind::Insul100),
            run_m: Some(30.0),
        });
        let (cost, lines) = calculate_partitions_cost(&store, &req).await.unwrap();
        assert_eq!(cost, Decimal::from(60000));
        assert_eq!(lines.len(), 1);
    }

    #[tokio::test]
    async fn disabled_none_or_zero_run_cost_nothing() {
        let store = seeded_store();
        for spec in [
            PartitionsSpec {
                enabled: false,
                kind: Some(PartitionKind::Plain),
                run_m: Some(10.0),
            },
            PartitionsSpec {
                enabled: true,
                kind: Some(PartitionKind::None),
                run_m: Some(10.0),
            },
            PartitionsSpec {
                enabled: true,
                kind: Some(PartitionKind::Plain),
                run_m: Some(0.0),
            },
            PartitionsSpec {
                enabled: true,
                kind: Some(PartitionKind::Plain),
                run_m: None,
            },
        ] {
            let (cost, lines) = calculate_partitions_cost(&store, &request(spec)).await.unwrap();
            assert_eq!(cost, Decimal::ZERO);
            assert!(lines.is_empty());
        }
    }

    #[tokio::test]
    async fn unpriced_kind_contributes_zero() {
        let store = seeded_store();
        let req = request(PartitionsSpec {
            enabled: true,
            kind: Some(PartitionKind::Insul50),
            run_m: Some(10.0),
        });
        let (cost, lines) = calculate_partitions_cost(&store, &req).await.unwrap();
        assert_eq!(cost, Decimal::ZERO);
        assert!(lines.is_empty());
    }
}
