// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Failures the generator reports to its caller.  Every one of them is
//! a precondition violation detected before any pixel is computed, so
//! none of them ever comes with a partial image.

use failure::Fail;

/// Why an image could not be produced.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum RenderError {
    /// The complex-plane rectangle has a non-positive or non-finite
    /// span on one of its axes.
    #[fail(display = "invalid region: {}", reason)]
    InvalidRegion {
        /// What was wrong with the region.
        reason: String,
    },

    /// The pixel grid is empty, too large to allocate, or asks for a
    /// channel count other than 1 or 3.
    #[fail(display = "invalid grid: {}", reason)]
    InvalidGrid {
        /// What was wrong with the grid.
        reason: String,
    },

    /// A threaded render was asked to run on zero threads.
    #[fail(display = "thread count must be at least 1")]
    InvalidThreads,

    /// One of the render workers panicked; the image was discarded.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

impl RenderError {
    pub(crate) fn region<S: Into<String>>(reason: S) -> Self {
        RenderError::InvalidRegion {
            reason: reason.into(),
        }
    }

    pub(crate) fn grid<S: Into<String>>(reason: S) -> Self {
        RenderError::InvalidGrid {
            reason: reason.into(),
        }
    }
}
