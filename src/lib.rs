#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot image generator
//!
//! The Mandelbrot set takes a point `c` on the complex plane and
//! repeatedly squares `z` and adds `c`, starting from zero, measuring
//! how quickly the result runs off to infinity.  That "velocity", the
//! number of rounds before `|z|` reaches 2, is the number used to
//! color the image.  Points in the black heart of the set never get
//! there and stop at the iteration cap.
//!
//! This crate turns a rectangle of the complex plane and a pixel grid
//! into a flat byte buffer, row-major with interleaved channels: one
//! grayscale byte per pixel, or three bytes of the Julia palette.
//!
//! ```
//! use mandelbrot::{generate_image, Grid, Region};
//!
//! let image = generate_image(Region::new(-2.0, 1.0, -1.5, 1.5), Grid::new(30, 20, 3)).unwrap();
//! assert_eq!(image.len(), 30 * 20 * 3);
//! ```

pub mod errors;
pub mod escape;
pub mod palette;
pub mod planes;
pub mod record;
pub mod render;

pub use crate::errors::RenderError;
pub use crate::escape::{escape_count, MAX_ITERATIONS};
pub use crate::palette::Palette;
pub use crate::planes::{Grid, Pixel, PlaneMapper, Region};
pub use crate::record::{Argument, MandelbrotRecord};
pub use crate::render::Renderer;

/// Renders `region` onto `grid` on the calling thread.  Fails before
/// allocating anything if the region is degenerate, the grid is empty,
/// or the channel count is neither 1 nor 3.  On success the buffer
/// holds exactly `nx * ny * nz` bytes.
pub fn generate_image(region: Region, grid: Grid) -> Result<Vec<u8>, RenderError> {
    Ok(Renderer::new(region, grid)?.render())
}

/// As `generate_image`, spread over `threads` worker threads.  The
/// buffer is byte-identical to the single-threaded one.
pub fn generate_image_threaded(
    region: Region,
    grid: Grid,
    threads: usize,
) -> Result<Vec<u8>, RenderError> {
    Renderer::new(region, grid)?.render_threaded(threads)
}
