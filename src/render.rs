// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Renderer walks every pixel of a validated grid, runs the
//! escape-time kernel on the point it samples, and paints the count
//! into a freshly allocated buffer.
//!
//! The threaded version cuts the buffer into contiguous bands of whole
//! rows.  Workers pull bands off a shared queue until it runs dry, and
//! each band is only ever held by one worker, so no two threads write
//! the same byte.  A pixel's value depends only on where it is, so the
//! result is the same whatever order the bands are finished in.

use std::sync::Mutex;

use itertools::iproduct;
use log::{debug, trace};

use crate::errors::RenderError;
use crate::escape::escape_count;
use crate::palette::Palette;
use crate::planes::{Grid, Pixel, PlaneMapper, Region};

/// Value every byte holds before the pixel loop overwrites it.
pub const BACKGROUND: u8 = 255;

// Bands handed to each worker, on average.  More bands than workers
// keeps a thread that drew the slow middle of the set from holding up
// the rest.
const BANDS_PER_THREAD: usize = 4;

/// A plane mapper paired with the palette its grid asks for.  Once
/// built, a Renderer has passed every precondition and rendering it
/// cannot fail except through a panicking thread.
#[derive(Debug, Clone)]
pub struct Renderer {
    plane: PlaneMapper,
    palette: Palette,
}

impl Renderer {
    /// Validates the region, then the grid, then the channel count.
    pub fn new(region: Region, grid: Grid) -> Result<Self, RenderError> {
        let plane = PlaneMapper::new(region, grid)?;
        let palette = Palette::from_channels(grid.nz)?;
        Ok(Renderer { plane, palette })
    }

    /// The mapper this renderer samples with.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The palette this renderer paints with.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    fn buffer(&self) -> Vec<u8> {
        vec![BACKGROUND; self.plane.len() * self.palette.channels()]
    }

    /// Paints the rows `first_row..` that fit in `band`.  `band` must
    /// start at the first byte of `first_row` and hold whole rows.
    fn render_band(&self, first_row: usize, band: &mut [u8]) {
        let row_len = self.plane.grid.row_len();
        let channels = self.palette.channels();
        let rows = first_row..first_row + band.len() / row_len;
        for (row, column) in iproduct!(rows, 0..self.plane.grid.nx) {
            let c = self.plane.pixel_to_point(&Pixel(column, row));
            let offset = (row - first_row) * row_len + column * channels;
            self.palette
                .encode(escape_count(c), &mut band[offset..offset + channels]);
        }
    }

    /// Renders the whole image on the calling thread.
    pub fn render(&self) -> Vec<u8> {
        let mut buffer = self.buffer();
        debug!(
            "rendering {}x{}x{} on one thread",
            self.plane.grid.nx,
            self.plane.grid.ny,
            self.palette.channels()
        );
        self.render_band(0, &mut buffer);
        buffer
    }

    /// Renders the whole image using `threads` scoped worker threads.
    /// The result is byte-identical to `render`.
    pub fn render_threaded(&self, threads: usize) -> Result<Vec<u8>, RenderError> {
        if threads == 0 {
            return Err(RenderError::InvalidThreads);
        }
        if threads == 1 {
            return Ok(self.render());
        }

        let ny = self.plane.grid.ny;
        let rows_per_band = (ny / (threads * BANDS_PER_THREAD)).max(1);
        let band_len = rows_per_band * self.plane.grid.row_len();
        debug!(
            "rendering {}x{}x{} on {} threads, {} rows per band",
            self.plane.grid.nx,
            ny,
            self.palette.channels(),
            threads,
            rows_per_band
        );

        let mut buffer = self.buffer();
        {
            let bands = Mutex::new(buffer.chunks_mut(band_len).enumerate());
            let bands = &bands;
            crossbeam::scope(|spawner| {
                for worker in 0..threads {
                    spawner.spawn(move |_| loop {
                        let band = match bands.lock() {
                            Ok(mut queue) => queue.next(),
                            Err(_) => None,
                        };
                        match band {
                            Some((index, band)) => {
                                trace!("worker {} takes band {}", worker, index);
                                self.render_band(index * rows_per_band, band);
                            }
                            None => break,
                        }
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }
        Ok(buffer)
    }
}
