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

//! ellipsoid-geodesic
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for solving geodesic problems on an
//! [ellipsoid of revolution](https://en.wikipedia.org/wiki/Geodesics_on_an_ellipsoid),
//! such as the [WGS-84](https://en.wikipedia.org/wiki/World_Geodetic_System)
//! ellipsoid used by satellite navigation.
//!
//! The shortest path between two points on the surface of an ellipsoid is a
//! geodesic. It is the equivalent of a straight line segment in planar
//! geometry or a [great circle arc](https://en.wikipedia.org/wiki/Great_circle)
//! on the surface of a sphere.
//!
//! The library solves:
//!
//! - the *direct* problem: the destination given a start point, an azimuth
//!   and a distance (or arc length);
//! - the *inverse* problem: the distance and azimuths between two points;
//! - positions along a geodesic, efficiently, via [`GeodesicLine`];
//! - the perimeter and area of a geodesic polygon via [`PolygonArea`].
//!
//! ## Design
//!
//! The algorithms are Charles Karney's, see
//! [Algorithms for geodesics](https://doi.org/10.1007/s00190-012-0578-z),
//! as implemented in [GeographicLib](https://geographiclib.sourceforge.io/):
//! series expansions to order 6 in the flattening, evaluated on the
//! auxiliary sphere, with Newton's method for the inverse problem. The
//! results are accurate to round off for |f| < 1/50.
//!
//! The [`Geodesic`] type represents an ellipsoid of revolution together
//! with its series coefficients. The static [`struct@WGS84_GEODESIC`]
//! represents the WGS-84 ellipsoid.
//!
//! The solvers signal invalid or unavailable results with NaN fields,
//! never with panics. The [`capability`] bitmask selects which quantities
//! are computed.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Degrees`
//!   and `Radians`;
//! - [icao-units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [libm](https://crates.io/crates/libm) - for portable transcendental
//!   functions.

pub mod accumulator;
pub mod capability;
pub mod coefficients;
mod geodesic;
pub mod geodesic_line;
pub mod geomath;
pub mod polygon_area;

pub use accumulator::Accumulator;
pub use angle_sc::{Degrees, Radians};
pub use geodesic_line::GeodesicLine;
pub use icao_units::si::Metres;
pub use polygon_area::{PolygonArea, PolygonResult};

use capability::{DISTANCE, DISTANCE_IN, OUT_MASK, STANDARD};
use geomath::{atan2d, eatanhe, sq};
use lazy_static::lazy_static;

/// The WGS-84 Semimajor axis measured in metres.
/// From the ICAO WGS-84 Implementation Manual, Tab. 3-1.
pub const WGS84_A: Metres = Metres(6_378_137.0);

/// The WGS-84 flattening, a ratio.
pub const WGS84_F: f64 = 1.0 / ((298_257_223_563.0) / 1_000_000_000.0);

/// The results of a geodesic calculation; fields that were not requested
/// (or could not be computed) are NaN.
#[derive(Clone, Copy, Debug)]
pub struct GeodesicData {
    /// The latitude of point 1.
    pub lat1: Degrees,
    /// The longitude of point 1.
    pub lon1: Degrees,
    /// The azimuth at point 1.
    pub azi1: Degrees,
    /// The latitude of point 2.
    pub lat2: Degrees,
    /// The longitude of point 2.
    pub lon2: Degrees,
    /// The (forward) azimuth at point 2.
    pub azi2: Degrees,
    /// The distance from point 1 to point 2 in metres.
    pub s12: Metres,
    /// The arc length on the auxiliary sphere from point 1 to point 2.
    pub a12: Degrees,
    /// The reduced length of the geodesic in metres.
    pub m12: Metres,
    /// The geodesic scale of point 2 relative to point 1, dimensionless.
    pub scale12: f64,
    /// The geodesic scale of point 1 relative to point 2, dimensionless.
    pub scale21: f64,
    /// The area under the geodesic in square metres.
    pub area12: f64,
}

impl Default for GeodesicData {
    fn default() -> Self {
        Self {
            lat1: Degrees(f64::NAN),
            lon1: Degrees(f64::NAN),
            azi1: Degrees(f64::NAN),
            lat2: Degrees(f64::NAN),
            lon2: Degrees(f64::NAN),
            azi2: Degrees(f64::NAN),
            s12: Metres(f64::NAN),
            a12: Degrees(f64::NAN),
            m12: Metres(f64::NAN),
            scale12: f64::NAN,
            scale21: f64::NAN,
            area12: f64::NAN,
        }
    }
}

/// An ellipsoid of revolution together with the series coefficients and
/// tolerances for geodesic calculations on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Geodesic {
    /// The Semimajor axis of the ellipsoid in metres.
    pub(crate) a: f64,
    /// The flattening of the ellipsoid, a ratio.
    pub(crate) f: f64,

    /// One minus the flattening ratio.
    pub(crate) f1: f64,
    /// The square of the Eccentricity of the ellipsoid.
    pub(crate) e2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    pub(crate) ep2: f64,
    /// The third flattening of the ellipsoid.
    pub(crate) n: f64,
    /// The Semiminor axis of the ellipsoid in metres.
    pub(crate) b: f64,
    /// The authalic radius squared, for area calculations.
    pub(crate) c2: f64,
    /// The tolerance for the short-line check of the inverse problem.
    pub(crate) etol2: f64,

    /// The A3 series coefficients of the ellipsoid.
    pub(crate) a3x: [f64; 6],
    /// The C3 series coefficients of the ellipsoid.
    pub(crate) c3x: [f64; 15],
    /// The C4 series coefficients of the ellipsoid.
    pub(crate) c4x: [f64; 21],

    /// Underflow guard, sqrt of the minimum positive f64.
    pub(crate) tiny: f64,
    pub(crate) tol0: f64,
    pub(crate) tol1: f64,
    pub(crate) tolb: f64,
    pub(crate) xthresh: f64,
    /// The maximum number of Newton iterations of the inverse problem.
    pub(crate) maxit1: u64,
    /// The maximum number of iterations including bisection.
    pub(crate) maxit2: u64,
}

impl Geodesic {
    /// Construct a `Geodesic` for an ellipsoid of revolution.
    /// * `a` - the Semimajor axis of the ellipsoid.
    /// * `f` - the flattening of the ellipsoid, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        let a = a.0;
        let maxit1 = 20;
        let tol0 = f64::EPSILON;
        let tol2 = libm::sqrt(tol0);

        let f1 = 1.0 - f;
        let e2 = f * (2.0 - f);
        let ep2 = e2 / sq(f1);
        let n = f / (2.0 - f);
        let b = a * f1;

        // authalic radius squared
        let mult = if e2 == 0.0 {
            1.0
        } else {
            let es = if f < 0.0 { -1.0 } else { 1.0 } * libm::sqrt(libm::fabs(e2));
            eatanhe(1.0, es) / e2
        };
        let c2 = (sq(a) + sq(b) * mult) / 2.0;

        Self {
            a,
            f,
            f1,
            e2,
            ep2,
            n,
            b,
            c2,
            // The sig12 threshold for "really short". The relative error in
            // the azimuth consistency check of the short-line solution is
            // sig12^2 * abs(f) * min(1, 1-f/2) / 2.
            etol2: 0.1 * tol2
                / libm::sqrt(
                    libm::fmax(0.001, libm::fabs(f)) * libm::fmin(1.0, 1.0 - f / 2.0) / 2.0,
                ),
            a3x: coefficients::evaluate_coeffs_a3(n),
            c3x: coefficients::evaluate_coeffs_c3x(n),
            c4x: coefficients::evaluate_coeffs_c4x(n),
            tiny: libm::sqrt(f64::MIN_POSITIVE),
            tol0,
            tol1: 200.0 * tol0,
            tolb: tol0 * tol2,
            xthresh: 1000.0 * tol2,
            maxit1,
            maxit2: maxit1 + geomath::DIGITS + 10,
        }
    }

    /// Construct a `Geodesic` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(WGS84_A, WGS84_F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn equatorial_radius(&self) -> Metres {
        Metres(self.a)
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn flattening(&self) -> f64 {
        self.f
    }

    /// The total area of the ellipsoid in square metres.
    #[must_use]
    pub const fn total_area(&self) -> f64 {
        4.0 * core::f64::consts::PI * self.c2
    }

    /// Evaluate the A3 polynomial of the ellipsoid at `eps`.
    pub(crate) fn a3f(&self, eps: f64) -> f64 {
        coefficients::evaluate_polynomial(&self.a3x, eps)
    }

    /// The coefficients `C3[l]` in the Fourier expansion of C3 at `eps`.
    pub(crate) fn c3f(&self, eps: f64) -> [f64; 6] {
        coefficients::evaluate_coeffs_c3y(&self.c3x, eps)
    }

    /// The coefficients `C4[l]` in the Fourier expansion of C4 at `eps`.
    pub(crate) fn c4f(&self, eps: f64) -> [f64; 6] {
        coefficients::evaluate_coeffs_c4y(&self.c4x, eps)
    }

    /// Solve the direct geodesic problem: the position and azimuth of the
    /// point a distance `s12` from point 1 at azimuth `azi1`, with the
    /// `STANDARD` outputs.
    #[must_use]
    pub fn direct(&self, lat1: Degrees, lon1: Degrees, azi1: Degrees, s12: Metres) -> GeodesicData {
        self.direct_with_capabilities(lat1, lon1, azi1, s12, STANDARD)
    }

    /// Solve the direct geodesic problem; only the outputs selected by
    /// `outmask` are computed, the rest are NaN.
    #[must_use]
    pub fn direct_with_capabilities(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        s12: Metres,
        outmask: u64,
    ) -> GeodesicData {
        let line = GeodesicLine::new(self, lat1, lon1, azi1, outmask | DISTANCE_IN);
        line.position_with_capabilities(s12, outmask)
    }

    /// Solve the direct geodesic problem with the length given as an arc
    /// length `a12` on the auxiliary sphere, with the `STANDARD` outputs.
    #[must_use]
    pub fn arc_direct(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        a12: Degrees,
    ) -> GeodesicData {
        self.arc_direct_with_capabilities(lat1, lon1, azi1, a12, STANDARD)
    }

    /// Solve the arc length form of the direct geodesic problem; only the
    /// outputs selected by `outmask` are computed, the rest are NaN.
    #[must_use]
    pub fn arc_direct_with_capabilities(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        a12: Degrees,
        outmask: u64,
    ) -> GeodesicData {
        let line = GeodesicLine::new(self, lat1, lon1, azi1, outmask);
        line.arc_position_with_capabilities(a12, outmask)
    }

    /// Solve the inverse geodesic problem: the distance and azimuths of
    /// the shortest geodesic between two points, with the `STANDARD`
    /// outputs.
    #[must_use]
    pub fn inverse(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
    ) -> GeodesicData {
        self.inverse_with_capabilities(lat1, lon1, lat2, lon2, STANDARD)
    }

    /// Solve the inverse geodesic problem; only the outputs selected by
    /// `outmask` are computed, the rest are NaN.
    #[must_use]
    pub fn inverse_with_capabilities(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
        outmask: u64,
    ) -> GeodesicData {
        let r = self.gen_inverse_azi(lat1.0, lon1.0, lat2.0, lon2.0, outmask);
        GeodesicData {
            lat1,
            lon1,
            lat2,
            lon2,
            azi1: Degrees(r.azi1),
            azi2: Degrees(r.azi2),
            s12: Metres(r.s12),
            a12: Degrees(r.a12),
            m12: Metres(r.m12),
            scale12: r.scale12,
            scale21: r.scale21,
            area12: r.area12,
        }
    }

    /// Construct a `GeodesicLine` from point 1 and the azimuth there,
    /// with point 3 unset.
    #[must_use]
    pub fn line(&self, lat1: Degrees, lon1: Degrees, azi1: Degrees, caps: u64) -> GeodesicLine<'_> {
        GeodesicLine::new(self, lat1, lon1, azi1, caps)
    }

    /// Construct a `GeodesicLine` with point 3 a distance `s12` along it,
    /// i.e. the direct problem in line form.
    #[must_use]
    pub fn direct_line(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        s12: Metres,
        caps: u64,
    ) -> GeodesicLine<'_> {
        // ensure the line can take a distance as input
        let mut line = GeodesicLine::new(self, lat1, lon1, azi1, caps | DISTANCE_IN);
        line.set_distance(s12);
        line
    }

    /// Construct a `GeodesicLine` with point 3 an arc length `a12` along
    /// it.
    #[must_use]
    pub fn arc_direct_line(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        azi1: Degrees,
        a12: Degrees,
        caps: u64,
    ) -> GeodesicLine<'_> {
        let mut line = GeodesicLine::new(self, lat1, lon1, azi1, caps);
        line.set_arc(a12);
        line
    }

    /// Construct a `GeodesicLine` along the shortest geodesic from point 1
    /// to point 2, with point 3 at point 2.
    #[must_use]
    pub fn inverse_line(
        &self,
        lat1: Degrees,
        lon1: Degrees,
        lat2: Degrees,
        lon2: Degrees,
        caps: u64,
    ) -> GeodesicLine<'_> {
        let solution = self.gen_inverse(lat1.0, lon1.0, lat2.0, lon2.0, 0);
        let azi1 = atan2d(solution.salp1, solution.calp1);
        // ensure that set_arc can derive the distance to point 3
        let caps = if caps & (OUT_MASK & DISTANCE_IN) != 0 {
            caps | DISTANCE
        } else {
            caps
        };
        let mut line = GeodesicLine::new_raw(
            self,
            lat1.0,
            lon1.0,
            azi1,
            caps,
            solution.salp1,
            solution.calp1,
        );
        line.set_arc(Degrees(solution.a12));
        line
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Geodesic`.
    pub static ref WGS84_GEODESIC: Geodesic = Geodesic::wgs84();
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_geodesic_wgs84() {
        let geodesic = Geodesic::wgs84();
        assert_eq!(6_378_137.0, geodesic.equatorial_radius().0);
        assert_eq!(WGS84_F, geodesic.flattening());

        assert_eq!(0.996_647_189_335_252_5, geodesic.f1);
        assert_eq!(0.006_694_379_990_141_316_5, geodesic.e2);
        assert_eq!(0.006_739_496_742_276_434, geodesic.ep2);
        assert_eq!(0.001_679_220_386_383_704_7, geodesic.n);
        assert_eq!(6_356_752.314_245_179, geodesic.b);
        assert_eq!(40_589_732_499_314.76, geodesic.c2);
        assert_eq!(3.642_461_148_878_852_4e-8, geodesic.etol2);

        assert_eq!(
            4.0 * core::f64::consts::PI * geodesic.c2,
            geodesic.total_area()
        );
        assert_eq!(geodesic, *WGS84_GEODESIC);
    }

    #[test]
    fn test_geodesic_sphere() {
        // zero flattening must not divide by zero in the authalic radius
        let sphere = Geodesic::new(Metres(6_371_000.0), 0.0);
        assert_eq!(0.0, sphere.e2);
        assert_eq!(sphere.a, sphere.b);
        assert_eq!(sq(sphere.a), sphere.c2);
    }

    #[test]
    fn test_direct_karney() {
        // the JFK to Paris CDG example from Karney's paper
        let geodesic = Geodesic::wgs84();
        let r = geodesic.direct(
            Degrees(40.63972222),
            Degrees(-73.77888889),
            Degrees(53.5),
            Metres(5.85e6),
        );
        assert!(is_within_tolerance(49.01467, r.lat2.0, 5e-6));
        assert!(is_within_tolerance(2.56106, r.lon2.0, 5e-6));
        assert!(is_within_tolerance(111.62947, r.azi2.0, 5e-6));
    }

    #[test]
    fn test_inverse_short() {
        let geodesic = Geodesic::wgs84();
        let r = geodesic.inverse(Degrees(0.0), Degrees(0.0), Degrees(1.0), Degrees(1.0));
        assert!(is_within_tolerance(156_899.568, r.s12.0, 1e-3));
        assert!(is_within_tolerance(45.188, r.azi1.0, 1e-3));
        assert!(is_within_tolerance(45.197, r.azi2.0, 1e-3));
    }

    #[test]
    fn test_inverse_direct_round_trip() {
        let geodesic = Geodesic::wgs84();
        let inverse = geodesic.inverse(Degrees(42.0), Degrees(29.0), Degrees(39.0), Degrees(-77.0));
        let direct = geodesic.direct(Degrees(42.0), Degrees(29.0), inverse.azi1, inverse.s12);
        assert!(is_within_tolerance(39.0, direct.lat2.0, 1e-9));
        assert!(is_within_tolerance(-77.0, direct.lon2.0, 1e-9));
        assert!(is_within_tolerance(inverse.azi2.0, direct.azi2.0, 1e-9));
        assert!(is_within_tolerance(inverse.a12.0, direct.a12.0, 1e-9));
    }

    #[test]
    fn test_arc_direct() {
        let geodesic = Geodesic::wgs84();
        let by_distance =
            geodesic.direct(Degrees(40.0), Degrees(-75.0), Degrees(30.0), Metres(1.0e7));
        let by_arc = geodesic.arc_direct(
            Degrees(40.0),
            Degrees(-75.0),
            Degrees(30.0),
            by_distance.a12,
        );
        assert!(is_within_tolerance(by_distance.lat2.0, by_arc.lat2.0, 1e-9));
        assert!(is_within_tolerance(by_distance.lon2.0, by_arc.lon2.0, 1e-9));
        assert!(is_within_tolerance(1.0e7, by_arc.s12.0, 1e-3));
    }

    #[test]
    fn test_inverse_line() {
        let geodesic = Geodesic::wgs84();
        let line = geodesic.inverse_line(
            Degrees(40.0),
            Degrees(-75.0),
            Degrees(52.0),
            Degrees(0.0),
            STANDARD | DISTANCE_IN,
        );
        // point 3 is set at point 2
        let end = line.position(line.s13());
        assert!(is_within_tolerance(52.0, end.lat2.0, 1e-9));
        assert!(is_within_tolerance(0.0, end.lon2.0, 1e-9));

        // walking half way and solving back is consistent
        let mid = line.position(Metres(line.s13().0 / 2.0));
        let check = geodesic.inverse(Degrees(40.0), Degrees(-75.0), mid.lat2, mid.lon2);
        assert!(is_within_tolerance(line.s13().0 / 2.0, check.s12.0, 1e-6));
    }

    #[test]
    fn test_direct_line() {
        let geodesic = Geodesic::wgs84();
        let line = geodesic.direct_line(
            Degrees(40.0),
            Degrees(-75.0),
            Degrees(30.0),
            Metres(2.0e6),
            STANDARD,
        );
        assert_eq!(2.0e6, line.s13().0);
        let end = line.position(line.s13());
        let direct = geodesic.direct(Degrees(40.0), Degrees(-75.0), Degrees(30.0), Metres(2.0e6));
        assert_eq!(direct.lat2.0, end.lat2.0);
        assert_eq!(direct.lon2.0, end.lon2.0);
    }
}
