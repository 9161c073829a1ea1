// Copyright (c) 2026 Ellipsoid Geodesic Contributors

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The capability module defines the bitmask used to select which output
//! quantities the solvers compute and which series a `GeodesicLine` is
//! prepared to evaluate.
//!
//! The low bits (`CAP_C1` .. `CAP_C4`) name the internal coefficient series
//! and are implied by the output bits that need them; callers normally use
//! only the output bits. Bit positions are stable across releases.
//!
//! Requesting an output a line was not constructed with yields `NaN` for
//! that field, never a panic.

/// Capability: the C1 coefficient series.
pub const CAP_C1: u64 = 1 << 0;
/// Capability: the inverted C1' coefficient series.
pub const CAP_C1P: u64 = 1 << 1;
/// Capability: the C2 coefficient series.
pub const CAP_C2: u64 = 1 << 2;
/// Capability: the C3 coefficient series.
pub const CAP_C3: u64 = 1 << 3;
/// Capability: the C4 coefficient series.
pub const CAP_C4: u64 = 1 << 4;
/// All internal coefficient series.
pub const CAP_ALL: u64 = 0x1F;
/// Mask covering the capability bits.
pub const CAP_MASK: u64 = CAP_ALL;

/// No capabilities, no output.
pub const EMPTY: u64 = 0;
/// Calculate latitude `lat2`.
pub const LATITUDE: u64 = (1 << 7) | CAP_NONE;
/// Calculate longitude `lon2`.
pub const LONGITUDE: u64 = (1 << 8) | CAP_C3;
/// Calculate azimuths `azi1` and `azi2`.
pub const AZIMUTH: u64 = (1 << 9) | CAP_NONE;
/// Calculate distance `s12`.
pub const DISTANCE: u64 = (1 << 10) | CAP_C1;
/// The default output: latitude, longitude, azimuths and distance.
pub const STANDARD: u64 = LATITUDE | LONGITUDE | AZIMUTH | DISTANCE;
/// Allow distance `s12` to be used as input in the direct problem.
pub const DISTANCE_IN: u64 = (1 << 11) | CAP_C1 | CAP_C1P;
/// Calculate reduced length `m12`.
pub const REDUCED_LENGTH: u64 = (1 << 12) | CAP_C1 | CAP_C2;
/// Calculate geodesic scales `M12` and `M21`.
pub const GEODESIC_SCALE: u64 = (1 << 13) | CAP_C1 | CAP_C2;
/// Calculate area `S12`.
pub const AREA: u64 = (1 << 14) | CAP_C4;
/// Unroll `lon2` instead of reducing it to (-180°, 180°].
pub const LONG_UNROLL: u64 = 1 << 15;
/// All output quantities.
pub const OUT_ALL: u64 = 0x7F80;
/// Mask covering the output bits, including `LONG_UNROLL`.
pub const OUT_MASK: u64 = 0xFF80;
/// All capabilities and all outputs.
pub const ALL: u64 = OUT_ALL | CAP_ALL;

const CAP_NONE: u64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_values() {
        // stable bit positions
        assert_eq!(0, EMPTY);
        assert_eq!(1 << 7, LATITUDE);
        assert_eq!((1 << 8) | (1 << 3), LONGITUDE);
        assert_eq!(1 << 9, AZIMUTH);
        assert_eq!((1 << 10) | (1 << 0), DISTANCE);
        assert_eq!(1929, STANDARD);
        assert_eq!(3979, STANDARD | DISTANCE_IN);
        assert_eq!((1 << 11) | 3, DISTANCE_IN);
        assert_eq!((1 << 12) | 5, REDUCED_LENGTH);
        assert_eq!((1 << 13) | 5, GEODESIC_SCALE);
        assert_eq!((1 << 14) | (1 << 4), AREA);
        assert_eq!(1 << 15, LONG_UNROLL);
        assert_eq!(0x7F9F, ALL);
    }

    #[test]
    fn test_capability_masks() {
        assert_eq!(CAP_ALL, ALL & CAP_MASK);
        assert_eq!(OUT_ALL, ALL & OUT_MASK);
        assert_eq!(0, OUT_MASK & CAP_MASK);
        assert_eq!(LONG_UNROLL, OUT_MASK & !OUT_ALL);
    }
}
