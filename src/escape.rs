// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.

use num::Complex;

/// The most iterations a single point is given.  Points that have not
/// escaped by then are treated as members of the set.
pub const MAX_ITERATIONS: u8 = 255;

/// Iterates `z = z * z + c` from `z = 0` and counts how many rounds
/// begin with `|z|` still under 2.0.  The count stops at the first
/// round where `|z| >= 2.0`, or at `MAX_ITERATIONS`.
///
/// The magnitude is the true Euclidean norm, `sqrt(re² + im²)`, and not
/// the squared norm compared against 4.0.  The two can disagree by one
/// iteration right at the boundary, and the counts must match the
/// reference images exactly.
///
/// Because the first round always starts at zero, every point gets a
/// count of at least 1.
#[inline]
pub fn escape_count(c: Complex<f64>) -> u8 {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    let mut count = 0;
    for _ in 0..MAX_ITERATIONS {
        if z.norm_sqr().sqrt() >= 2.0 {
            break;
        }
        count += 1;
        z = z * z + c;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0)), MAX_ITERATIONS);
    }

    #[test]
    fn far_points_escape_after_one_round() {
        assert_eq!(escape_count(Complex::new(2.0, 2.0)), 1);
        assert_eq!(escape_count(Complex::new(-2.0, -1.5)), 1);
        assert_eq!(escape_count(Complex::new(100.0, 0.0)), 1);
    }

    #[test]
    fn boundary_counts_as_escaped() {
        // |c| is exactly 2.0 after the first round.
        assert_eq!(escape_count(Complex::new(2.0, 0.0)), 1);
        assert_eq!(escape_count(Complex::new(0.0, -2.0)), 1);
    }

    #[test]
    fn near_points_take_a_few_rounds() {
        // c = 0.7 - 1.5i; z1 = c, z2 = -1.06 - 3.6i
        assert_eq!(escape_count(Complex::new(0.7, -1.5)), 2);
        // c = 1; z: 0, 1, 2
        assert_eq!(escape_count(Complex::new(1.0, 0.0)), 2);
    }

    #[test]
    fn cardioid_and_bulb_never_escape() {
        assert_eq!(escape_count(Complex::new(-1.0, 0.0)), MAX_ITERATIONS);
        assert_eq!(escape_count(Complex::new(-0.1, 0.1)), MAX_ITERATIONS);
        assert_eq!(escape_count(Complex::new(0.25, 0.0)), MAX_ITERATIONS);
    }
}
