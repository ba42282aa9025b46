//! Geometric quantities derived from the raw request dimensions.

use rust_decimal::Decimal;

use crate::domain::{AttachedBlock, BlockComponent, HouseDims};

use super::dec;

/// The quantities the calculators multiply prices by.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseGeometry {
    pub area_m2: Decimal,
    pub perimeter_m: Decimal,
    pub long_side_m: Decimal,
}

pub fn house_geometry(house: &HouseDims) -> HouseGeometry {
    let length = dec(house.length_m);
    let width = dec(house.width_m);

    HouseGeometry {
        area_m2: length * width,
        perimeter_m: (length + width) * Decimal::TWO,
        long_side_m: length.max(width),
    }
}

/// Total area of a terrace/porch block: enabled components only, disabled or
/// absent ones contribute zero.
pub fn attached_area(block: Option<&AttachedBlock>) -> Decimal {
    let Some(block) = block else {
        return Decimal::ZERO;
    };
    component_area(block.primary.as_ref()) + component_area(block.extra.as_ref())
}

fn component_area(component: Option<&BlockComponent>) -> Decimal {
    match component {
        Some(c) if c.enabled => {
            dec(c.length_m.unwrap_or(0.0)) * dec(c.width_m.unwrap_or(0.0))
        }
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_of_a_rectangular_house() {
        let geom = house_geometry(&HouseDims {
            length_m: 6.0,
            width_m: 8.0,
        });
        assert_eq!(geom.area_m2, Decimal::from(48));
        assert_eq!(geom.perimeter_m, Decimal::from(28));
        assert_eq!(geom.long_side_m, Decimal::from(8));
    }

    #[test]
    fn disabled_components_contribute_no_area() {
        let block = AttachedBlock {
            primary: Some(BlockComponent {
                enabled: true,
                length_m: Some(3.0),
                width_m: Some(2.0),
            }),
            extra: Some(BlockComponent {
                enabled: false,
                length_m: Some(10.0),
                width_m: Some(10.0),
            }),
        };
        assert_eq!(attached_area(Some(&block)), Decimal::from(6));
        assert_eq!(attached_area(None), Decimal::ZERO);
    }

    #[test]
    fn enabled_component_without_dimensions_is_zero() {
        let block = AttachedBlock {
            primary: Some(BlockComponent {
                enabled: true,
                length_m: None,
                width_m: None,
            }),
            extra: None,
        };
        assert_eq!(attached_area(Some(&block)), Decimal::ZERO);
    }
}
