//! Default object kind from box dimensions
//!
//! Advisory only: the suggestion is shown after a draw gesture and the user
//! may pick a different kind before it is committed.

use super::annotation::ObjectKind;
use super::cuboid::OrientedBox;

/// Suggest a kind from finished box dimensions. First matching rule wins.
pub fn suggest_kind(width: f64, length: f64, height: f64) -> ObjectKind {
    if (length > 6.0 && width > 2.0) || height > 3.0 {
        ObjectKind::Truck
    } else if height > 1.3 && height < 2.2 && width < 0.8 && length < 0.9 {
        ObjectKind::Pedestrian
    } else if (0.6..=1.0).contains(&height) && width <= 0.5 && length <= 0.5 {
        ObjectKind::Cone
    } else if (1.5..=2.5).contains(&length) && (1.0..=1.8).contains(&height) && width <= 0.9 {
        ObjectKind::TwoWheeler
    } else {
        ObjectKind::Car
    }
}

/// Suggest a kind for a box
pub fn suggest_for(cuboid: &OrientedBox) -> ObjectKind {
    suggest_kind(cuboid.width, cuboid.length, cuboid.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_dimensions() {
        assert_eq!(suggest_kind(1.5, 4.2, 1.4), ObjectKind::Car);
        assert_eq!(suggest_kind(2.5, 8.0, 3.2), ObjectKind::Truck);
        assert_eq!(suggest_kind(0.6, 0.7, 1.7), ObjectKind::Pedestrian);
        assert_eq!(suggest_kind(0.4, 0.4, 0.8), ObjectKind::Cone);
        assert_eq!(suggest_kind(0.7, 1.9, 1.2), ObjectKind::TwoWheeler);
    }

    #[test]
    fn test_tall_box_is_truck_regardless_of_footprint() {
        assert_eq!(suggest_kind(0.5, 0.5, 3.5), ObjectKind::Truck);
    }

    #[test]
    fn test_long_but_narrow_is_not_truck() {
        assert_eq!(suggest_kind(1.9, 7.0, 2.0), ObjectKind::Car);
    }

    #[test]
    fn test_pedestrian_bounds_are_exclusive() {
        assert_eq!(suggest_kind(0.6, 0.7, 1.3), ObjectKind::Car);
        assert_eq!(suggest_kind(0.8, 0.7, 1.7), ObjectKind::Car);
    }

    #[test]
    fn test_cone_bounds_are_inclusive() {
        assert_eq!(suggest_kind(0.5, 0.5, 0.6), ObjectKind::Cone);
        assert_eq!(suggest_kind(0.5, 0.5, 1.0), ObjectKind::Cone);
    }

    #[test]
    fn test_suggest_for_box() {
        let b = OrientedBox::on_ground(2.5, 8.0, 3.2, 0.0, 0.0);
        assert_eq!(suggest_for(&b), ObjectKind::Truck);
    }
}
