//! Door pricing.
//!
//! Policy: explicit customer door selections, when present, replace the
//! standard-inclusion doors entirely; otherwise the standard inclusion
//! supplies one entry door by code plus its interior-door count. Unlike
//! windows there is no credit arithmetic for doors.

use rust_decimal::Decimal;

use crate::domain::{CalculateRequest, Door, DoorLine};
use crate::store::{PriceStore, StoreError};

fn door_line(door: &Door, quantity: u32) -> (Decimal, DoorLine) {
    let total = door.price_rub * Decimal::from(quantity);
    (
        total,
        DoorLine {
            title: door.title.clone(),
            quantity,
            unit_price_rub: door.price_rub.round_dp(2),
            total_rub: total.round_dp(2),
        },
    )
}

pub async fn calculate_doors(
    store: &dyn PriceStore,
    req: &CalculateRequest,
) -> Result<(Decimal, Vec<DoorLine>), StoreError> {
    let mut total = Decimal::ZERO;
    let mut lines = Vec::new();

    if !req.doors.is_empty() {
        for selection in &req.doors {
            let Some(door) = store.door_by_code(&selection.code).await? else {
                tracing::warn!(
                    table = "doors",
                    code = %selection.code,
                    "Unknown door code; selection skipped"
                );
                continue;
            };
            let (line_total, line) = door_line(&door, selection.quantity);
            total += line_total;
            lines.push(line);
        }
        return Ok((total, lines));
    }

    let storey = req.ceiling.kind.storey_type();
    let Some(inclusion) = store
        .std_inclusion(&req.insulation.build_tech, storey)
        .await?
    else {
        return Ok((total, lines));
    };

    if let Some(code) = &inclusion.entry_door_code {
        match store.door_by_code(code).await? {
            Some(door) => {
                let (line_total, line) = door_line(&door, 1);
                total += line_total;
                lines.push(line);
            }
            None => {
                tracing::warn!(
                    table = "doors",
                    code = %code,
                    "Standard entry door missing from catalog; contributes zero"
                );
            }
        }
    }

    if let Some(qty) = inclusion.interior_doors_qty.filter(|q| *q > 0) {
        match store.interior_door().await? {
            Some(door) => {
                let (line_total, line) = door_line(&door, qty as u32);
                total += line_total;
                lines.push(line);
            }
            None => {
                tracing::warn!(
                    table = "doors",
                    "No interior door in catalog; contributes zero"
                );
            }
        }
    }

    Ok((total, lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AreaBreakpoint, CeilingKind, CeilingSpec, DeliverySpec, DoorSelection, HouseDims,
        InsulationSpec, PartitionsSpec, RoofSpec, StdInclusion, StoreyType, WindowKind,
    };
    use crate::store::InMemoryPriceStore;

    fn base_request() -> CalculateRequest {
        CalculateRequest {
            house: HouseDims {
                length_m: 6.0,
                width_m: 6.0,
            },
            terrace: None,
            porch: None,
            ceiling: CeilingSpec {
                kind: CeilingKind::Flat,
                height_m: 2.4,
                ridge_delta_cm: None,
            },
            roof: RoofSpec::default(),
            partitions: PartitionsSpec {
                enabled: false,
                kind: None,
                run_m: None,
            },
            insulation: InsulationSpec {
                brand: "izobel".to_string(),
                mm: 100,
                build_tech: "frame".to_string(),
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
        store.insert_door(Door {
            code: "entry_door_01".to_string(),
            title: "Entry door, steel".to_string(),
            price_rub: Decimal::from(25000),
        });
        store.insert_door(Door {
            code: "interior_door_01".to_string(),
            title: "Interior door, standard".to_string(),
            price_rub: Decimal::from(8000),
        });
        store.insert_std_inclusion(
            "frame",
            StoreyType::One,
            StdInclusion {
                window_width_cm: 100,
                window_height_cm: 100,
                window_kind: WindowKind::PovorotOtkid,
                area_to_qty: vec![AreaBreakpoint {
                    max_m2: Decimal::from(9999),
                    qty: 2,
                }],
                entry_door_code: Some("entry_door_01".to_string()),
                interior_doors_qty: Some(3),
            },
        );
        store
    }

    #[tokio::test]
    async fn standard_inclusion_supplies_entry_and_interior_doors() {
        let store = seeded_store();
        let req = base_request();

        let (total, lines) = calculate_doors(&store, &req).await.unwrap();
        // entry 25000 + 3 × interior 8000
        assert_eq!(total, Decimal::from(49000));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 1);
        assert_eq!(lines[1].quantity, 3);
    }

    #[tokio::test]
    async fn explicit_selections_replace_the_standard_inclusion() {
        let store = seeded_store();
        let mut req = base_request();
        req.doors = vec![DoorSelection {
            code: "interior_door_01".to_string(),
            quantity: 2,
        }];

        let (total, lines) = calculate_doors(&store, &req).await.unwrap();
        assert_eq!(total, Decimal::from(16000));
        assert_eq!(lines.len(), 1);
    }

    #[tokio::test]
    async fn unknown_selection_codes_are_skipped() {
        let store = seeded_store();
        let mut req = base_request();
        req.doors = vec![DoorSelection {
            code: "no_such_door".to_string(),
            quantity: 1,
        }];

        let (total, lines) = calculate_doors(&store, &req).await.unwrap();
        assert_eq!(total, Decimal::ZERO);
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn missing_inclusion_contributes_nothing() {
        let store = InMemoryPriceStore::new();
        let req = base_request();

        let (total, lines) = calculate_doors(&store, &req).await.unwrap();
        assert_eq!(total, Decimal::ZERO);
        assert!(lines.is_empty());
    }
}
