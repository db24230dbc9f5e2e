use std::ops::{Add, Sub};

/// Integer representing the real value 1.0.
pub(crate) const UNIT: i32 = 49152;

/// Scaled-integer scalar for the simulation's working range.
///
/// Concentrations and rate coefficients are integers scaled by [`UNIT`],
/// so a long chaotic integration produces the same bits on every platform
/// and every run. Products widen to i64 before rescaling; additive ops
/// saturate instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Fix(pub(crate) i32);

impl Fix {
    pub(crate) const ZERO: Fix = Fix(0);
    pub(crate) const ONE: Fix = Fix(UNIT);
    /// Largest value a cell channel may hold: the range is half-open,
    /// a concentration never reaches exactly 1.0.
    pub(crate) const MAX_CELL: Fix = Fix(UNIT - 1);

    /// `UNIT * num / den`, for rate tables.
    pub(crate) const fn ratio(num: i64, den: i64) -> Fix {
        Fix((UNIT as i64 * num / den) as i32)
    }

    /// Fixed-point product: widen, multiply, rescale by UNIT, saturate on
    /// the way back down to i32.
    pub(crate) fn mul(self, rhs: Fix) -> Fix {
        let wide = self.0 as i64 * rhs.0 as i64 / UNIT as i64;
        Fix(wide.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    /// Plain integer division by an unscaled divisor (stencil weights).
    pub(crate) const fn div(self, rhs: i32) -> Fix {
        Fix(self.0 / rhs)
    }

    /// Clamp into the cell range [0, UNIT). Applied after every
    /// accumulation into a cell channel.
    pub(crate) fn clamp_cell(self) -> Fix {
        Fix(self.0.max(0).min(UNIT - 1))
    }

    /// Display-path conversion only; never feeds back into the integration.
    pub(crate) fn to_f32(self) -> f32 {
        self.0 as f32 / UNIT as f32
    }
}

impl Add for Fix {
    type Output = Fix;
    fn add(self, rhs: Fix) -> Fix {
        Fix(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Fix {
    type Output = Fix;
    fn sub(self, rhs: Fix) -> Fix {
        Fix(self.0.saturating_sub(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_scales_by_unit() {
        assert_eq!(Fix::ratio(1, 1), Fix::ONE);
        assert_eq!(Fix::ratio(1, 2), Fix(UNIT / 2));
        assert_eq!(Fix::ratio(55, 1000), Fix((UNIT as i64 * 55 / 1000) as i32));
    }

    #[test]
    fn mul_rescales() {
        let half = Fix::ratio(1, 2);
        assert_eq!(half.mul(half), Fix::ratio(1, 4));
        assert_eq!(Fix::ONE.mul(Fix(1234)), Fix(1234));
        assert_eq!(Fix::ZERO.mul(Fix::MAX_CELL), Fix::ZERO);
    }

    #[test]
    fn mul_of_negative_is_exact_at_unit_scale() {
        // da * Lap with da == UNIT must pass the Laplacian through intact,
        // including negative values.
        assert_eq!(Fix::ONE.mul(Fix(-777)), Fix(-777));
    }

    #[test]
    fn additive_ops_saturate() {
        assert_eq!(Fix(i32::MAX) + Fix::ONE, Fix(i32::MAX));
        assert_eq!(Fix(i32::MIN) - Fix::ONE, Fix(i32::MIN));
    }

    #[test]
    fn clamp_cell_is_half_open() {
        assert_eq!(Fix(-5).clamp_cell(), Fix::ZERO);
        assert_eq!(Fix(UNIT).clamp_cell(), Fix::MAX_CELL);
        assert_eq!(Fix(UNIT * 2).clamp_cell(), Fix::MAX_CELL);
        assert_eq!(Fix::MAX_CELL.clamp_cell(), Fix::MAX_CELL);
        assert_eq!(Fix(17).clamp_cell(), Fix(17));
    }
}
