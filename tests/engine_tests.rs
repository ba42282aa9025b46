//! End-to-end engine scenarios against a seeded in-memory reference store.

use rust_decimal::Decimal;

use housecalc_backend::domain::{
    Addon, AddonSelection, AreaBreakpoint, AttachedBlock, BlockComponent, CalcMode,
    CalculateRequest, CeilingKind, CeilingSpec, DeliveryRule, DeliverySpec, HouseDims,
    InsulationSpec, PartitionsSpec, RoofSpec, StdInclusion, StoreyType, WindowKind,
    WindowSelection,
};
use housecalc_backend::pricing;
use housecalc_backend::store::InMemoryPriceStore;

/// Reference data mirroring the production price sheet closely enough to
/// reproduce the published 6×6 example quote.
fn seeded_store() -> InMemoryPriceStore {
    let mut store = InMemoryPriceStore::new();

    store.insert_base_price("panel", "izobel", 100, StoreyType::One, Decimal::from(16500));
    store.insert_base_price("panel", "izobel", 150, StoreyType::One, Decimal::from(18000));

    store.insert_ceiling_height(Decimal::new(24, 1), Decimal::ZERO);
    store.insert_ceiling_height(Decimal::new(25, 1), Decimal::from(100));
    store.insert_ceiling_height(Decimal::new(27, 1), Decimal::from(300));
    store.insert_ceiling_height(Decimal::new(30, 1), Decimal::from(600));

    store.insert_window_price(100, 100, WindowKind::PovorotOtkid, Decimal::from(10000));
    store.insert_window_price(150, 150, WindowKind::PovorotOtkid, Decimal::from(14000));
    store.insert_window_modifier(false, false, Decimal::ONE);
    store.insert_window_modifier(true, false, Decimal::new(12, 1));
    store.insert_window_modifier(false, true, Decimal::new(14, 1));
    store.insert_window_modifier(true, true, Decimal::new(17, 1));

    store.insert_std_inclusion(
        "panel",
        StoreyType::One,
        StdInclusion {
            window_width_cm: 100,
            window_height_cm: 100,
            window_kind: WindowKind::PovorotOtkid,
            area_to_qty: vec![
                AreaBreakpoint {
                    max_m2: Decimal::from(36),
                    qty: 2,
                },
                AreaBreakpoint {
                    max_m2: Decimal::from(60),
                    qty: 3,
                },
                AreaBreakpoint {
                    max_m2: Decimal::from(9999),
                    qty: 4,
                },
            ],
            entry_door_code: None,
            interior_doors_qty: None,
        },
    );

    for (code, title, mode, price) in [
        ("OSB_FLOOR", "Floor sheathing, OSB", CalcMode::Area, 650),
        ("METAL_ROOF", "Metal tile roofing", CalcMode::Area, 1750),
        ("WALL_FINISH", "Interior wall finish", CalcMode::Area, 1200),
        ("PLINTH", "Plinth cladding", CalcMode::Perimeter, 295),
        (
            "GUTTERS",
            "Gutters",
            CalcMode::RoofLSides {
                sides: 2,
                reserve_m: Decimal::ONE,
            },
            160,
        ),
    ] {
        store.insert_addon(Addon {
            code: code.to_string(),
            title: title.to_string(),
            mode,
            price: Decimal::from(price),
            active: true,
        });
    }

    store.set_delivery_rule(DeliveryRule {
        free_km: 100,
        rate_per_km: Decimal::from(120),
    });

    store
}

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
            ridge_delta_cm: Some(0),
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
            build_tech: "panel".to_string(),
        },
        delivery: DeliverySpec { distance_km: 100.0 },
        windows: Vec::new(),
        doors: Vec::new(),
        addons: Vec::new(),
        commission_rub: 0.0,
    }
}

fn addon(code: &str) -> AddonSelection {
    AddonSelection {
        code: code.to_string(),
        quantity: 1,
    }
}

#[tokio::test]
async fn published_6x6_example_reproduces_the_price_sheet_total() {
    let store = seeded_store();
    let mut req = base_request();
    req.delivery.distance_km = 140.0;
    req.commission_rub = 30000.0;
    req.windows = vec![WindowSelection {
        width_cm: 150,
        height_cm: 150,
        kind: WindowKind::PovorotOtkid,
        quantity: 2,
        dual_chamber: false,
        laminated: false,
    }];
    req.addons = vec![
        addon("OSB_FLOOR"),
        addon("METAL_ROOF"),
        addon("GUTTERS"),
        addon("PLINTH"),
        addon("WALL_FINISH"),
    ];

    let quote = pricing::calculate(&store, &req).await.unwrap();

    assert_eq!(quote.structure.base_price_rub, Decimal::from(594000));
    assert_eq!(quote.structure.delivery_rub, Decimal::from(4800));
    // 2 × 14000 custom minus 2 × 10000 standard-inclusion credit
    assert_eq!(
        quote.windows_and_doors.section_total_rub,
        Decimal::from(8000)
    );
    assert_eq!(quote.totals.subtotal_rub, Decimal::from(745720));
    assert_eq!(quote.totals.commission_rub, Decimal::from(30000));
    assert_eq!(quote.totals.final_price_rub, Decimal::from(775720));

    // five add-on line items plus the delivery line, in pipeline order
    assert_eq!(quote.structure.addons.len(), 6);
    assert_eq!(quote.structure.addons.last().unwrap().code, "DELIVERY");
}

#[tokio::test]
async fn zero_addon_request_reduces_to_base_plus_standard_inclusions() {
    let store = seeded_store();
    let mut req = base_request();
    req.commission_rub = 10000.0;

    let quote = pricing::calculate(&store, &req).await.unwrap();

    assert_eq!(quote.structure.base_price_rub, Decimal::from(594000));
    assert_eq!(quote.structure.delivery_rub, Decimal::ZERO);
    assert!(quote.structure.addons.is_empty());

    // standard windows itemized and charged since nothing replaces them
    assert_eq!(quote.windows_and_doors.windows.len(), 1);
    assert_eq!(quote.windows_and_doors.windows[0].quantity, 2);
    assert_eq!(
        quote.windows_and_doors.section_total_rub,
        Decimal::from(20000)
    );

    assert_eq!(quote.totals.subtotal_rub, Decimal::from(614000));
    assert_eq!(quote.totals.final_price_rub, Decimal::from(624000));
}

#[tokio::test]
async fn replacement_credit_may_drive_the_section_negative() {
    let store = seeded_store();
    let mut req = base_request();
    // one 14000 custom window against the 2 × 10000 standard credit
    req.windows = vec![WindowSelection {
        width_cm: 150,
        height_cm: 150,
        kind: WindowKind::PovorotOtkid,
        quantity: 1,
        dual_chamber: false,
        laminated: false,
    }];

    let quote = pricing::calculate(&store, &req).await.unwrap();

    assert_eq!(
        quote.windows_and_doors.section_total_rub,
        Decimal::from(-6000)
    );
    // the negative flows into the aggregate unmodified
    assert_eq!(quote.totals.subtotal_rub, Decimal::from(588000));
}

#[tokio::test]
async fn larger_area_never_prices_lower() {
    let store = seeded_store();

    let mut small = base_request();
    small.addons = vec![addon("OSB_FLOOR")];
    small.ceiling.height_m = 2.7;

    let mut large = small.clone();
    large.house = HouseDims {
        length_m: 8.0,
        width_m: 8.0,
    };

    let small_quote = pricing::calculate(&store, &small).await.unwrap();
    let large_quote = pricing::calculate(&store, &large).await.unwrap();

    assert!(large_quote.structure.base_price_rub >= small_quote.structure.base_price_rub);
    // geometry add-on (ceiling height) and AREA add-on both scale with area
    assert!(large_quote.structure.addons[0].total_rub >= small_quote.structure.addons[0].total_rub);
    assert!(large_quote.structure.addons[1].total_rub >= small_quote.structure.addons[1].total_rub);
}

#[tokio::test]
async fn identical_requests_yield_identical_quotes() {
    let store = seeded_store();
    let mut req = base_request();
    req.windows = vec![WindowSelection {
        width_cm: 150,
        height_cm: 150,
        kind: WindowKind::PovorotOtkid,
        quantity: 2,
        dual_chamber: true,
        laminated: true,
    }];
    req.addons = vec![addon("METAL_ROOF"), addon("GUTTERS")];
    req.delivery.distance_km = 250.0;

    let first = pricing::calculate(&store, &req).await.unwrap();
    let second = pricing::calculate(&store, &req).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn missing_base_price_combination_quotes_a_zero_base() {
    let store = seeded_store();
    let mut req = base_request();
    req.insulation.brand = "technonicol".to_string();

    let quote = pricing::calculate(&store, &req).await.unwrap();
    assert_eq!(quote.structure.base_price_rub, Decimal::ZERO);
    // the rest of the quote is still produced
    assert_eq!(
        quote.windows_and_doors.section_total_rub,
        Decimal::from(20000)
    );
}

#[tokio::test]
async fn terrace_and_porch_areas_are_reported_but_not_priced() {
    let store = seeded_store();
    let mut req = base_request();
    req.terrace = Some(AttachedBlock {
        primary: Some(BlockComponent {
            enabled: true,
            length_m: Some(3.0),
            width_m: Some(2.0),
        }),
        extra: None,
    });

    let with_terrace = pricing::calculate(&store, &req).await.unwrap();
    let without = pricing::calculate(&store, &base_request()).await.unwrap();

    assert_eq!(with_terrace.dimensions.terrace_area_m2, Decimal::from(6));
    assert_eq!(
        with_terrace.totals.final_price_rub,
        without.totals.final_price_rub
    );
}
