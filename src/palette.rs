// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns escape counts into pixel bytes.

use crate::errors::RenderError;

/// The two color schemes, selected by the number of channels per pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// One byte per pixel, `256 - count` wrapped to eight bits.  A
    /// count of 0 therefore maps to 0, not 256.
    Grayscale,
    /// Three bytes per pixel, cycling at periods of 8, 16 and 32
    /// iterations.  This is the scheme usually used for Julia sets.
    Julia,
}

impl Palette {
    /// The palette for a channel count; only 1 and 3 are supported.
    pub fn from_channels(nz: usize) -> Result<Palette, RenderError> {
        match nz {
            1 => Ok(Palette::Grayscale),
            3 => Ok(Palette::Julia),
            _ => Err(RenderError::grid(format!(
                "{} channels per pixel; only 1 or 3 are supported",
                nz
            ))),
        }
    }

    /// Bytes written per pixel.
    pub fn channels(self) -> usize {
        match self {
            Palette::Grayscale => 1,
            Palette::Julia => 3,
        }
    }

    /// Writes the color for `count` into the leading bytes of `pixel`,
    /// which must hold at least `channels()` bytes.
    #[inline]
    pub fn encode(self, count: u8, pixel: &mut [u8]) {
        match self {
            Palette::Grayscale => {
                pixel[0] = 0u8.wrapping_sub(count);
            }
            Palette::Julia => {
                pixel[0] = count % 8 * 32;
                pixel[1] = count % 16 * 16;
                pixel[2] = count % 32 * 8;
            }
        }
    }
}
