// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A named record that a publishing layer can bind to: callers put an
//! argument, ask the record to process it, and read back the image and
//! the time it was produced.  The record owns no transport; it is the
//! plain "read the request, render, store the result" step.

use std::time::SystemTime;

use log::{info, warn};

use crate::errors::RenderError;
use crate::planes::{Grid, Region};
use crate::render::Renderer;

/// The request fields of a record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Argument {
    /// Left edge of the region.
    pub xmin: f64,
    /// Right edge of the region.
    pub xmax: f64,
    /// Lower edge of the region.
    pub ymin: f64,
    /// Upper edge of the region.
    pub ymax: f64,
    /// Columns.
    pub nx: usize,
    /// Rows.
    pub ny: usize,
    /// Channels per pixel.  Defaults to 3.
    pub nz: usize,
}

impl Default for Argument {
    fn default() -> Self {
        Argument {
            xmin: 0.0,
            xmax: 0.0,
            ymin: 0.0,
            ymax: 0.0,
            nx: 0,
            ny: 0,
            nz: 3,
        }
    }
}

impl Argument {
    /// The region half of the request.
    pub fn region(&self) -> Region {
        Region::new(self.xmin, self.xmax, self.ymin, self.ymax)
    }

    /// The grid half of the request.
    pub fn grid(&self) -> Grid {
        Grid::new(self.nx, self.ny, self.nz)
    }
}

/// A named image-generating record.
#[derive(Debug, Clone)]
pub struct MandelbrotRecord {
    name: String,
    argument: Argument,
    threads: usize,
    result: Vec<u8>,
    time_stamp: Option<SystemTime>,
}

impl MandelbrotRecord {
    /// Creates a record with a default argument and no result.
    pub fn new<S: Into<String>>(name: S) -> Self {
        MandelbrotRecord {
            name: name.into(),
            argument: Argument::default(),
            threads: 1,
            result: Vec::new(),
            time_stamp: None,
        }
    }

    /// The record's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument the next `process` will render.
    pub fn argument(&self) -> &Argument {
        &self.argument
    }

    /// Replaces the argument.  Nothing is rendered until `process`.
    pub fn put_argument(&mut self, argument: Argument) {
        self.argument = argument;
    }

    /// Sets how many threads `process` renders with.
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    /// Renders the current argument and, on success, replaces the result
    /// and stamps the time.  On failure the previous result and time
    /// stamp are kept.
    pub fn process(&mut self) -> Result<(), RenderError> {
        let argument = self.argument;
        let image = Renderer::new(argument.region(), argument.grid())
            .and_then(|renderer| renderer.render_threaded(self.threads));
        match image {
            Ok(image) => {
                info!(
                    "{}: rendered {}x{}x{} ({} bytes)",
                    self.name,
                    argument.nx,
                    argument.ny,
                    argument.nz,
                    image.len()
                );
                self.result = image;
                self.time_stamp = Some(SystemTime::now());
                Ok(())
            }
            Err(e) => {
                warn!("{}: {}", self.name, e);
                Err(e)
            }
        }
    }

    /// The most recently rendered image; empty before the first
    /// successful `process`.
    pub fn result(&self) -> &[u8] {
        &self.result
    }

    /// When the current result was produced.
    pub fn time_stamp(&self) -> Option<SystemTime> {
        self.time_stamp
    }
}
