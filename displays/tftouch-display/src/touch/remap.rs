//! Clamp and rotate calibrated touch coordinates

use crate::orientation::Orientation;

/// Clamp a transformed coordinate into `0..limit`
///
/// Negative values land on 0; values at or past the limit land on the last
/// pixel.
pub fn clamp_axis(value: i64, limit: u16) -> u16 {
    if value < 0 {
        0
    } else if value >= i64::from(limit) {
        limit.saturating_sub(1)
    } else {
        value as u16
    }
}

/// Rotate a landscape coordinate into `orientation`
///
/// `width` and `height` are the logical dimensions in that orientation. The
/// mirrored axes use `dim - v`, so an edge coordinate may map onto `dim`
/// itself.
pub fn remap(orientation: Orientation, sx: u16, sy: u16, width: u16, height: u16) -> (u16, u16) {
    match orientation {
        Orientation::Deg0 => (sx, sy),
        Orientation::Deg90 => (sy, height.saturating_sub(sx)),
        Orientation::Deg180 => (width.saturating_sub(sx), height.saturating_sub(sy)),
        Orientation::Deg270 => (width.saturating_sub(sy), sx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(-1, 320), 0);
        assert_eq!(clamp_axis(-100_000, 320), 0);
        assert_eq!(clamp_axis(0, 320), 0);
        assert_eq!(clamp_axis(319, 320), 319);
        assert_eq!(clamp_axis(320, 320), 319);
        assert_eq!(clamp_axis(1_000_000, 240), 239);
    }

    #[test]
    fn test_remap_quadrants() {
        assert_eq!(remap(Orientation::Deg0, 10, 20, 320, 240), (10, 20));
        assert_eq!(remap(Orientation::Deg90, 10, 20, 240, 320), (20, 310));
        assert_eq!(remap(Orientation::Deg180, 10, 20, 320, 240), (310, 220));
        assert_eq!(remap(Orientation::Deg270, 10, 20, 240, 320), (220, 10));
    }

    proptest! {
        #[test]
        fn prop_clamp_in_range(value in any::<i64>(), limit in 1u16..=u16::MAX) {
            prop_assert!(clamp_axis(value, limit) < limit);
        }

        #[test]
        fn prop_remap_involution(sx in 0u16..320, sy in 0u16..240) {
            let (x, y) = remap(Orientation::Deg0, sx, sy, 320, 240);
            prop_assert_eq!(remap(Orientation::Deg0, x, y, 320, 240), (sx, sy));

            let (x, y) = remap(Orientation::Deg180, sx, sy, 320, 240);
            prop_assert_eq!(remap(Orientation::Deg180, x, y, 320, 240), (sx, sy));
        }

        #[test]
        fn prop_quarter_turns_swap_axes(sx in 0u16..320, sy in 0u16..240) {
            let (x, y) = remap(Orientation::Deg90, sx, sy, 240, 320);
            prop_assert_eq!(x, sy);
            prop_assert_eq!(y, 320 - sx);

            let (x, y) = remap(Orientation::Deg270, sx, sy, 240, 320);
            prop_assert_eq!(x, 240 - sy);
            prop_assert_eq!(y, sx);
        }
    }
}
