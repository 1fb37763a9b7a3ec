// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a grid of pixels with an origin at 0,0 and a rectangle on
//! the complex plane bounded by `xmin`, `xmax`, `ymin` and `ymax`.
//!
//! The mapper corrects for aspect ratio: one pixel step along either
//! axis always covers the same distance on the complex plane.  It does
//! so by stretching the step of the axis with the *smaller* nominal
//! step, anchored at the lower-left corner, rather than by recentering.
//! When the grid and the region disagree about their shape, the area
//! actually sampled therefore extends past `xmax` or `ymax` on one
//! axis.  That is the defined output of the mapping, not an accident.

use num::Complex;

use crate::errors::RenderError;

/// Describes the rectangle of the complex plane to sample, treating
/// the real part as the x-component and the imaginary part as the
/// y-component.  The region must be non-degenerate: `xmax > xmin` and
/// `ymax > ymin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    /// Left edge.
    pub xmin: f64,
    /// Right edge.
    pub xmax: f64,
    /// Lower edge.
    pub ymin: f64,
    /// Upper edge.
    pub ymax: f64,
}

impl Region {
    /// Builds a region from its four edges.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Region {
        Region {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Builds a region from its left-lower and right-upper corners.
    pub fn from_corners(leftlower: Complex<f64>, rightupper: Complex<f64>) -> Region {
        Region::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Checks that both spans are positive and finite.  Written so that
    /// a NaN edge fails as well.
    pub fn validate(&self) -> Result<(), RenderError> {
        let width = self.xmax - self.xmin;
        let height = self.ymax - self.ymin;
        if !(width > 0.0) || !width.is_finite() {
            return Err(RenderError::region(format!(
                "x span [{}, {}] is not a positive finite interval",
                self.xmin, self.xmax
            )));
        }
        if !(height > 0.0) || !height.is_finite() {
            return Err(RenderError::region(format!(
                "y span [{}, {}] is not a positive finite interval",
                self.ymin, self.ymax
            )));
        }
        Ok(())
    }
}

/// The output resolution: `nx` columns, `ny` rows and `nz` bytes per
/// pixel (1 for grayscale, 3 for the Julia palette).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Columns.
    pub nx: usize,
    /// Rows.
    pub ny: usize,
    /// Channels per pixel.
    pub nz: usize,
}

impl Grid {
    /// Builds a grid.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Grid {
        Grid { nx, ny, nz }
    }

    /// Number of bytes in one row of the output.
    pub fn row_len(&self) -> usize {
        self.nx * self.nz
    }

    /// Length of the whole output buffer, or `None` if it does not fit
    /// in memory's address space.
    pub fn buffer_len(&self) -> Option<usize> {
        self.nx.checked_mul(self.ny)?.checked_mul(self.nz)
    }

    /// Checks the grid's dimensions.  The channel count is checked by
    /// the palette, which is the only thing that knows what it means.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(RenderError::grid(format!(
                "{}x{} has no pixels",
                self.nx, self.ny
            )));
        }
        if self.buffer_len().is_none() {
            return Err(RenderError::grid(format!(
                "{}x{}x{} is too large to allocate",
                self.nx, self.ny, self.nz
            )));
        }
        Ok(())
    }
}

/// Describes the column and row of a pixel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: the pixel grid and the
/// complex region it samples.  Maps pixels onto sample points.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The region the caller asked for.
    pub region: Region,
    /// The grid the caller asked for.
    pub grid: Grid,
    // Nominal distance between neighbouring pixels, per axis.
    increments: (f64, f64),
    // Aspect correction, per axis.  At least one of the two is 1.0.
    scale: (f64, f64),
}

impl PlaneMapper {
    /// Validates the region and the grid dimensions and derives the
    /// per-pixel step of each axis.
    pub fn new(region: Region, grid: Grid) -> Result<PlaneMapper, RenderError> {
        region.validate()?;
        grid.validate()?;

        let xinc = (region.xmax - region.xmin) / (grid.nx as f64);
        let yinc = (region.ymax - region.ymin) / (grid.ny as f64);
        let ratio = yinc / xinc;
        let scale = if ratio > 1.0 {
            (ratio, 1.0)
        } else {
            (1.0, 1.0 / ratio)
        };

        Ok(PlaneMapper {
            region,
            grid,
            increments: (xinc, yinc),
            scale,
        })
    }

    /// The nominal per-pixel step along x and y, before correction.
    pub fn increments(&self) -> (f64, f64) {
        self.increments
    }

    /// The aspect correction applied to x and y.
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    /// The total number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.grid.nx * self.grid.ny
    }

    /// Describes that the grid has no pixels.  Never true for a mapper
    /// that made it through `new`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The real part of the sample point for a column.
    #[inline]
    pub fn column_to_re(&self, column: usize) -> f64 {
        self.region.xmin + (column as f64) * self.increments.0 * self.scale.0
    }

    /// The imaginary part of the sample point for a row.
    #[inline]
    pub fn row_to_im(&self, row: usize) -> f64 {
        self.region.ymin + (row as f64) * self.increments.1 * self.scale.1
    }

    /// Given a pixel, return the complex number it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }

    /// The offset of the first byte of a pixel in a row-major,
    /// channel-interleaved buffer.
    pub fn pixel_offset(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.grid.row_len() + pixel.0 * self.grid.nz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(region: (f64, f64, f64, f64), grid: (usize, usize, usize)) -> PlaneMapper {
        PlaneMapper::new(
            Region::new(region.0, region.1, region.2, region.3),
            Grid::new(grid.0, grid.1, grid.2),
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn planemapper_fails_on_inverted_region() {
        let pm = PlaneMapper::new(Region::new(1.0, -1.0, -1.0, 1.0), Grid::new(4, 4, 1));
        match pm {
            Err(RenderError::InvalidRegion { .. }) => {}
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
        let pm = PlaneMapper::new(Region::new(-1.0, 1.0, 1.0, -1.0), Grid::new(4, 4, 1));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_degenerate_region() {
        let pm = PlaneMapper::new(Region::new(0.5, 0.5, -1.0, 1.0), Grid::new(4, 4, 1));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(Region::new(-1.0, 1.0, 0.0, 0.0), Grid::new(4, 4, 1));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_non_finite_region() {
        let nan = std::f64::NAN;
        let inf = std::f64::INFINITY;
        assert!(PlaneMapper::new(Region::new(nan, 1.0, -1.0, 1.0), Grid::new(4, 4, 1)).is_err());
        assert!(PlaneMapper::new(Region::new(-1.0, inf, -1.0, 1.0), Grid::new(4, 4, 1)).is_err());
        assert!(PlaneMapper::new(Region::new(-1.0, 1.0, -inf, 1.0), Grid::new(4, 4, 1)).is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_grid() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0);
        match PlaneMapper::new(region, Grid::new(0, 4, 1)) {
            Err(RenderError::InvalidGrid { .. }) => {}
            other => panic!("expected InvalidGrid, got {:?}", other),
        }
        assert!(PlaneMapper::new(region, Grid::new(4, 0, 1)).is_err());
    }

    #[test]
    fn planemapper_fails_on_overflowing_grid() {
        let region = Region::new(-1.0, 1.0, -1.0, 1.0);
        let pm = PlaneMapper::new(region, Grid::new(std::usize::MAX, 2, 3));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = mapper((-1.0, 1.0, -1.0, 1.0), (4, 4, 1));
        assert_eq!(pm.len(), 16);
        assert!(!pm.is_empty());
    }

    #[test]
    fn matching_aspect_needs_no_correction() {
        let pm = mapper((-2.0, 2.0, -1.0, 1.0), (400, 200, 1));
        assert_eq!(pm.scale(), (1.0, 1.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -1.0));
        let far = pm.pixel_to_point(&Pixel(400, 200));
        assert!(close(far.re, 2.0));
        assert!(close(far.im, 1.0));
    }

    #[test]
    fn tall_pixels_stretch_the_x_step() {
        // yinc = 0.02, xinc = 0.01
        let pm = mapper((-1.0, 1.0, -2.0, 2.0), (200, 200, 1));
        let (sx, sy) = pm.scale();
        assert!(close(sx, 2.0));
        assert_eq!(sy, 1.0);
        let far = pm.pixel_to_point(&Pixel(200, 200));
        assert!(close(far.re, 3.0));
        assert!(close(far.im, 2.0));
    }

    #[test]
    fn wide_pixels_stretch_the_y_step_past_ymax() {
        // The sampled window grows to y = 3.0 instead of stopping at 1.0.
        let pm = mapper((-2.0, 2.0, -1.0, 1.0), (200, 200, 1));
        let (sx, sy) = pm.scale();
        assert_eq!(sx, 1.0);
        assert!(close(sy, 2.0));
        let far = pm.pixel_to_point(&Pixel(200, 200));
        assert!(close(far.re, 2.0));
        assert!(close(far.im, 3.0));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = mapper((0.0, 5.0, 0.0, 5.0), (5, 5, 1));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = mapper((-2.0, 2.0, -2.0, 2.0), (4, 4, 1));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(2.0, 2.0));
    }

    #[test]
    fn pixel_offsets_are_row_major_and_interleaved() {
        let pm = mapper((-2.0, 2.0, -2.0, 2.0), (5, 4, 3));
        assert_eq!(pm.pixel_offset(&Pixel(0, 0)), 0);
        assert_eq!(pm.pixel_offset(&Pixel(1, 0)), 3);
        assert_eq!(pm.pixel_offset(&Pixel(0, 1)), 15);
        assert_eq!(pm.pixel_offset(&Pixel(4, 3)), 3 * 15 + 4 * 3);
    }
}
