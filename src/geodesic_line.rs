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

//! The geodesic_line module contains the `GeodesicLine` type: a geodesic
//! with its point 1 and azimuth fixed, along which any number of points can
//! be computed cheaply.
//!
//! Constructing the line performs the series setup once; each call to
//! `position` or `arc_position` then only evaluates the series at the new
//! point, which is the efficient way to sample many points along one
//! geodesic. The direct solvers on [`Geodesic`] are one-shot wrappers
//! around this type.

#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::suboptimal_flops)]

use crate::capability::{
    AREA, AZIMUTH, CAP_C1, CAP_C1P, CAP_C2, CAP_C3, CAP_C4, DISTANCE, DISTANCE_IN, GEODESIC_SCALE,
    LATITUDE, LONGITUDE, LONG_UNROLL, OUT_MASK, REDUCED_LENGTH,
};
use crate::geomath::{ang_normalize, ang_round, atan2d, lat_fix, norm, sincosd, sq};
use crate::{coefficients, Geodesic, GeodesicData};
use angle_sc::Degrees;
use icao_units::si::Metres;

/// The raw output of `gen_position`: unrequested fields are NaN.
pub(crate) struct Position {
    pub a12: f64,
    pub lat2: f64,
    pub lon2: f64,
    pub azi2: f64,
    pub s12: f64,
    pub m12: f64,
    pub scale12: f64,
    pub scale21: f64,
    pub area12: f64,
}

/// A geodesic line: point 1 and the azimuth there are fixed, point 2
/// slides along it.
///
/// The line only carries the coefficient series its construction
/// capabilities imply; asking a position for an output the line cannot
/// produce yields NaN for that field.
#[derive(Clone, Debug)]
pub struct GeodesicLine<'a> {
    geodesic: &'a Geodesic,
    lat1: f64,
    lon1: f64,
    azi1: f64,
    salp1: f64,
    calp1: f64,
    dn1: f64,
    salp0: f64,
    calp0: f64,
    ssig1: f64,
    csig1: f64,
    somg1: f64,
    comg1: f64,
    k2: f64,
    a1m1: f64,
    a2m1: f64,
    a3c: f64,
    a4: f64,
    b11: f64,
    b21: f64,
    b31: f64,
    b41: f64,
    stau1: f64,
    ctau1: f64,
    c1a: [f64; 7],
    c1pa: [f64; 7],
    c2a: [f64; 7],
    c3a: [f64; 6],
    c4a: [f64; 6],
    caps: u64,
    s13: f64,
    a13: f64,
}

impl<'a> GeodesicLine<'a> {
    /// Construct a `GeodesicLine` from point 1 and the azimuth there.
    ///
    /// `caps` selects which outputs `position` can later produce;
    /// `LATITUDE`, `AZIMUTH` and `LONG_UNROLL` are always included.
    /// Point 3 is left unset.
    #[must_use]
    pub fn new(
        geodesic: &'a Geodesic,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        caps: u64,
    ) -> Self {
        Self::new_raw(geodesic, lat1.0, lon1.0, azi1.0, caps, f64::NAN, f64::NAN)
    }

    /// Construct a line with the azimuth optionally given as a sine/cosine
    /// pair; NaN `salp1`/`calp1` means derive them from `azi1`.
    #[allow(clippy::too_many_arguments)]
    #[allow(clippy::too_many_lines)]
    pub(crate) fn new_raw(
        geodesic: &'a Geodesic,
        lat1: f64,
        lon1: f64,
        azi1: f64,
        caps: u64,
        salp1: f64,
        calp1: f64,
    ) -> Self {
        // always allow computing latitude, azimuth and unrolled longitude
        let caps = caps | LATITUDE | AZIMUTH | LONG_UNROLL;

        let (azi1, salp1, calp1) = if salp1.is_nan() || calp1.is_nan() {
            let azi1 = ang_normalize(azi1);
            // guard against underflow in salp0
            let (salp1, calp1) = sincosd(ang_round(azi1));
            (azi1, salp1, calp1)
        } else {
            (azi1, salp1, calp1)
        };

        let lat1 = lat_fix(lat1);

        let (mut sbet1, mut cbet1) = sincosd(ang_round(lat1));
        sbet1 *= geodesic.f1;
        (sbet1, cbet1) = norm(sbet1, cbet1);
        cbet1 = libm::fmax(geodesic.tiny, cbet1);
        let dn1 = libm::sqrt(1.0 + geodesic.ep2 * sq(sbet1));

        // alp0 in [0, pi/2 - |bet1|]
        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);

        // Evaluate sig with tan(bet1) = tan(sig1) * cos(alp1). The sig = 0
        // point is at the npole crossing for alp1 = 0 and the azimuth
        // crossing point otherwise; with bet1 = 0 and alp1 = pi/2 keep
        // sig1 = 0.
        let mut ssig1 = sbet1;
        let somg1 = salp0 * sbet1;
        let mut csig1 = if sbet1 != 0.0 || calp1 != 0.0 {
            cbet1 * calp1
        } else {
            1.0
        };
        let comg1 = csig1;
        (ssig1, csig1) = norm(ssig1, csig1);

        let k2 = sq(calp0) * geodesic.ep2;
        let eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);

        let mut a1m1 = 0.0;
        let mut c1a = [0.0; 7];
        let mut b11 = 0.0;
        let mut stau1 = 0.0;
        let mut ctau1 = 0.0;
        if caps & CAP_C1 != 0 {
            a1m1 = coefficients::evaluate_a1(eps);
            c1a = coefficients::evaluate_coeffs_c1(eps);
            b11 = coefficients::sine_series(ssig1, csig1, &c1a);
            let s = libm::sin(b11);
            let c = libm::cos(b11);
            // tau1 = sig1 + B11
            stau1 = ssig1 * c + csig1 * s;
            ctau1 = csig1 * c - ssig1 * s;
        }

        let mut c1pa = [0.0; 7];
        if caps & CAP_C1P != 0 {
            c1pa = coefficients::evaluate_coeffs_c1p(eps);
        }

        let mut a2m1 = 0.0;
        let mut c2a = [0.0; 7];
        let mut b21 = 0.0;
        if caps & CAP_C2 != 0 {
            a2m1 = coefficients::evaluate_a2(eps);
            c2a = coefficients::evaluate_coeffs_c2(eps);
            b21 = coefficients::sine_series(ssig1, csig1, &c2a);
        }

        let mut c3a = [0.0; 6];
        let mut a3c = 0.0;
        let mut b31 = 0.0;
        if caps & CAP_C3 != 0 {
            c3a = geodesic.c3f(eps);
            a3c = -geodesic.f * salp0 * geodesic.a3f(eps);
            b31 = coefficients::sine_series(ssig1, csig1, &c3a);
        }

        let mut c4a = [0.0; 6];
        let mut a4 = 0.0;
        let mut b41 = 0.0;
        if caps & CAP_C4 != 0 {
            c4a = geodesic.c4f(eps);
            // multiplier = a^2 * e^2 * cos(alpha0) * sin(alpha0)
            a4 = sq(geodesic.a) * calp0 * salp0 * geodesic.e2;
            b41 = coefficients::cosine_series(ssig1, csig1, &c4a);
        }

        Self {
            geodesic,
            lat1,
            lon1,
            azi1,
            salp1,
            calp1,
            dn1,
            salp0,
            calp0,
            ssig1,
            csig1,
            somg1,
            comg1,
            k2,
            a1m1,
            a2m1,
            a3c,
            a4,
            b11,
            b21,
            b31,
            b41,
            stau1,
            ctau1,
            c1a,
            c1pa,
            c2a,
            c3a,
            c4a,
            caps,
            s13: f64::NAN,
            a13: f64::NAN,
        }
    }

    /// The position of point 2, `s12_a12` along the line from point 1:
    /// a distance in metres, or an arc length in degrees when `arcmode`.
    ///
    /// Distance mode inverts the distance integral with the C1' series and
    /// polishes the result with one Newton step when the flattening is
    /// large. Requesting distance mode on a line built without
    /// `DISTANCE_IN` yields all NaN.
    #[allow(clippy::too_many_lines)]
    pub(crate) fn gen_position(&self, arcmode: bool, s12_a12: f64, outmask: u64) -> Position {
        let mut result = Position {
            a12: f64::NAN,
            lat2: f64::NAN,
            lon2: f64::NAN,
            azi2: f64::NAN,
            s12: f64::NAN,
            m12: f64::NAN,
            scale12: f64::NAN,
            scale21: f64::NAN,
            area12: f64::NAN,
        };

        let outmask = outmask & self.caps & OUT_MASK;
        if !(arcmode || (self.caps & (OUT_MASK & DISTANCE_IN) != 0)) {
            // uninitialized or impossible distance requested
            return result;
        }

        let mut b12 = 0.0;
        let mut ab1 = 0.0;
        let mut sig12;
        let mut ssig12;
        let mut csig12;
        let mut ssig2;
        let mut csig2;

        if arcmode {
            sig12 = s12_a12.to_radians();
            (ssig12, csig12) = sincosd(s12_a12);
        } else {
            // tau12 = s12_a12 / b / A1, sig12 follows from inverting the
            // distance series
            let tau12 = s12_a12 / (self.geodesic.b * (1.0 + self.a1m1));

            let s = libm::sin(tau12);
            let c = libm::cos(tau12);

            b12 = -coefficients::sine_series(
                self.stau1 * c + self.ctau1 * s,
                self.ctau1 * c - self.stau1 * s,
                &self.c1pa,
            );
            sig12 = tau12 - (b12 - self.b11);
            ssig12 = libm::sin(sig12);
            csig12 = libm::cos(sig12);
            if libm::fabs(self.geodesic.f) > 0.01 {
                // Reverting the C1' series is only accurate to O(f^2); for
                // big flattenings refine sig12 with one Newton step.
                ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
                csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
                b12 = coefficients::sine_series(ssig2, csig2, &self.c1a);
                let serr =
                    (1.0 + self.a1m1) * (sig12 + (b12 - self.b11)) - s12_a12 / self.geodesic.b;
                sig12 -= serr / libm::sqrt(1.0 + self.k2 * sq(ssig2));
                ssig12 = libm::sin(sig12);
                csig12 = libm::cos(sig12);
                // update B12 below
            }
        }

        // sig2 = sig1 + sig12
        ssig2 = self.ssig1 * csig12 + self.csig1 * ssig12;
        csig2 = self.csig1 * csig12 - self.ssig1 * ssig12;
        let dn2 = libm::sqrt(1.0 + self.k2 * sq(ssig2));
        if outmask & (DISTANCE | REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
            if arcmode || libm::fabs(self.geodesic.f) > 0.01 {
                b12 = coefficients::sine_series(ssig2, csig2, &self.c1a);
            }
            ab1 = (1.0 + self.a1m1) * (b12 - self.b11);
        }

        // sin(bet2) = cos(alp0) * sin(sig2)
        let sbet2 = self.calp0 * ssig2;
        // alt: cbet2 = hypot(csig2, salp0 * ssig2)
        let mut cbet2 = libm::hypot(self.salp0, self.calp0 * csig2);
        if cbet2 == 0.0 {
            // I.e. salp0 = 0, csig2 = 0. Break the degeneracy in this case.
            cbet2 = self.geodesic.tiny;
            csig2 = self.geodesic.tiny;
        }
        // tan(alp0) = cos(sig2) * tan(alp2)
        let salp2 = self.salp0;
        let calp2 = self.calp0 * csig2;

        if outmask & DISTANCE != 0 {
            result.s12 = if arcmode {
                self.geodesic.b * ((1.0 + self.a1m1) * sig12 + ab1)
            } else {
                s12_a12
            };
        }

        if outmask & LONGITUDE != 0 {
            // tan(omg2) = sin(alp0) * tan(sig2)
            let somg2 = self.salp0 * ssig2;
            let comg2 = csig2;
            // east-going?
            let e = if self.salp0 < 0.0 { -1.0 } else { 1.0 };

            // omg12 = omg2 - omg1
            let omg12 = if outmask & LONG_UNROLL != 0 {
                e * (sig12 - (libm::atan2(ssig2, csig2) - libm::atan2(self.ssig1, self.csig1))
                    + (libm::atan2(e * somg2, comg2) - libm::atan2(e * self.somg1, self.comg1)))
            } else {
                libm::atan2(
                    somg2 * self.comg1 - comg2 * self.somg1,
                    comg2 * self.comg1 + somg2 * self.somg1,
                )
            };
            let lam12 = omg12
                + self.a3c
                    * (sig12 + (coefficients::sine_series(ssig2, csig2, &self.c3a) - self.b31));
            let lon12 = lam12.to_degrees();
            result.lon2 = if outmask & LONG_UNROLL != 0 {
                self.lon1 + lon12
            } else {
                ang_normalize(ang_normalize(self.lon1) + ang_normalize(lon12))
            };
        }

        if outmask & LATITUDE != 0 {
            result.lat2 = atan2d(sbet2, self.geodesic.f1 * cbet2);
        }

        if outmask & AZIMUTH != 0 {
            result.azi2 = atan2d(salp2, calp2);
        }

        if outmask & (REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
            let b22 = coefficients::sine_series(ssig2, csig2, &self.c2a);
            let ab2 = (1.0 + self.a2m1) * (b22 - self.b21);
            let j12 = (self.a1m1 - self.a2m1) * sig12 + (ab1 - ab2);
            if outmask & REDUCED_LENGTH != 0 {
                // Add parens around (csig1 * ssig2) and (ssig1 * csig2) to
                // ensure accurate cancellation for coincident points.
                result.m12 = self.geodesic.b
                    * ((dn2 * (self.csig1 * ssig2) - self.dn1 * (self.ssig1 * csig2))
                        - self.csig1 * csig2 * j12);
            }
            if outmask & GEODESIC_SCALE != 0 {
                let t =
                    self.k2 * (ssig2 - self.ssig1) * (ssig2 + self.ssig1) / (self.dn1 + dn2);
                result.scale12 = csig12 + (t * ssig2 - csig2 * j12) * self.ssig1 / self.dn1;
                result.scale21 = csig12 - (t * self.ssig1 - self.csig1 * j12) * ssig2 / dn2;
            }
        }

        if outmask & AREA != 0 {
            let b42 = coefficients::cosine_series(ssig2, csig2, &self.c4a);
            let (salp12, calp12) = if self.calp0 == 0.0 || self.salp0 == 0.0 {
                // alp12 = alp2 - alp1, used in atan2 so no need to normalize
                (
                    salp2 * self.calp1 - calp2 * self.salp1,
                    calp2 * self.calp1 + salp2 * self.salp1,
                )
            } else {
                // tan(alp) = tan(alp0) * sec(sig); the right formula for
                // alp12 when the geodesic is not meridional
                (
                    self.calp0
                        * self.salp0
                        * (if csig12 <= 0.0 {
                            self.csig1 * (1.0 - csig12) + ssig12 * self.ssig1
                        } else {
                            ssig12 * (self.csig1 * ssig12 / (1.0 + csig12) + self.ssig1)
                        }),
                    sq(self.salp0) + sq(self.calp0) * self.csig1 * csig2,
                )
            };
            result.area12 =
                self.geodesic.c2 * libm::atan2(salp12, calp12) + self.a4 * (b42 - self.b41);
        }

        result.a12 = if arcmode {
            s12_a12
        } else {
            sig12.to_degrees()
        };
        result
    }

    /// The position of the point a distance `s12` along the line, with the
    /// `STANDARD` outputs.
    #[must_use]
    pub fn position(&self, s12: Metres) -> GeodesicData {
        self.position_with_capabilities(s12, crate::capability::STANDARD)
    }

    /// The position of the point a distance `s12` along the line; only the
    /// outputs selected by `outmask` are computed, the rest are NaN.
    #[must_use]
    pub fn position_with_capabilities(&self, s12: Metres, outmask: u64) -> GeodesicData {
        self.to_data(self.gen_position(false, s12.0, outmask), outmask)
    }

    /// The position of the point an arc length `a12` along the line, with
    /// the `STANDARD` outputs.
    #[must_use]
    pub fn arc_position(&self, a12: Degrees) -> GeodesicData {
        self.arc_position_with_capabilities(a12, crate::capability::STANDARD)
    }

    /// The position of the point an arc length `a12` along the line; only
    /// the outputs selected by `outmask` are computed, the rest are NaN.
    #[must_use]
    pub fn arc_position_with_capabilities(&self, a12: Degrees, outmask: u64) -> GeodesicData {
        self.to_data(self.gen_position(true, a12.0, outmask), outmask)
    }

    /// Fix point 3 a distance `s13` from point 1; the corresponding arc
    /// length `a13` is derived.
    pub fn set_distance(&mut self, s13: Metres) {
        self.s13 = s13.0;
        let position = self.gen_position(false, self.s13, 0);
        self.a13 = position.a12;
    }

    /// Fix point 3 an arc length `a13` from point 1; the corresponding
    /// distance `s13` is derived (NaN if the line has no `DISTANCE`).
    pub fn set_arc(&mut self, a13: Degrees) {
        self.a13 = a13.0;
        let position = self.gen_position(true, self.a13, DISTANCE);
        self.s13 = position.s12;
    }

    /// The latitude of point 1.
    #[must_use]
    pub const fn lat1(&self) -> Degrees {
        Degrees(self.lat1)
    }

    /// The longitude of point 1.
    #[must_use]
    pub const fn lon1(&self) -> Degrees {
        Degrees(self.lon1)
    }

    /// The azimuth of the line at point 1.
    #[must_use]
    pub const fn azi1(&self) -> Degrees {
        Degrees(self.azi1)
    }

    /// The distance to point 3, NaN until set.
    #[must_use]
    pub const fn s13(&self) -> Metres {
        Metres(self.s13)
    }

    /// The arc length to point 3, NaN until set.
    #[must_use]
    pub const fn a13(&self) -> Degrees {
        Degrees(self.a13)
    }

    /// The capabilities of the line.
    #[must_use]
    pub const fn caps(&self) -> u64 {
        self.caps
    }

    fn to_data(&self, position: Position, outmask: u64) -> GeodesicData {
        GeodesicData {
            lat1: Degrees(self.lat1),
            lon1: if outmask & LONG_UNROLL != 0 {
                Degrees(self.lon1)
            } else {
                Degrees(ang_normalize(self.lon1))
            },
            azi1: Degrees(self.azi1),
            lat2: Degrees(position.lat2),
            lon2: Degrees(position.lon2),
            azi2: Degrees(position.azi2),
            s12: Metres(position.s12),
            a12: Degrees(position.a12),
            m12: Metres(position.m12),
            scale12: position.scale12,
            scale21: position.scale21,
            area12: position.area12,
        }
    }
}
