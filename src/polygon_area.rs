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

//! The polygon_area module computes the perimeter and area of a geodesic
//! polygon: vertices joined by shortest geodesics, fed one at a time.
//!
//! Each edge contributes its distance and the area between it and the
//! equator, see
//! [Algorithms for geodesics](https://doi.org/10.1007/s00190-012-0578-z)
//! Section 6. The running totals are held in extended precision
//! [`Accumulator`]s and the count of equator crossings resolves which of
//! the two regions bounded by the polygon is meant.
//!
//! In polyline mode only the length is accumulated and areas are NaN.

#![allow(clippy::float_cmp)]

use crate::accumulator::Accumulator;
use crate::capability::{AREA, DISTANCE, EMPTY, LATITUDE, LONGITUDE, LONG_UNROLL};
use crate::geomath::{ang_diff, ang_normalize};
use crate::Geodesic;
use angle_sc::Degrees;
use icao_units::si::Metres;

/// The result of a polygon computation.
#[derive(Clone, Copy, Debug)]
pub struct PolygonResult {
    /// The number of vertices (or points on the polyline).
    pub num: usize,
    /// The perimeter of the polygon, or the length of the polyline.
    pub perimeter: Metres,
    /// The area of the polygon in square metres, NaN for a polyline.
    pub area: f64,
}

/// A geodesic polygon (or polyline) built up a vertex or an edge at a
/// time.
#[derive(Clone, Debug)]
pub struct PolygonArea<'a> {
    geodesic: &'a Geodesic,
    polyline: bool,
    /// The area of the full ellipsoid.
    area0: f64,
    mask: u64,
    areasum: Accumulator,
    perimetersum: Accumulator,
    num: usize,
    crossings: i64,
    lat0: f64,
    lon0: f64,
    lat1: f64,
    lon1: f64,
}

/// The number of times the segment lon1 to lon2 crosses the prime
/// meridian eastwards minus westwards, for longitudes reduced to
/// (-180°, 180°].
fn transit(lon1: f64, lon2: f64) -> i64 {
    let lon1 = ang_normalize(lon1);
    let lon2 = ang_normalize(lon2);
    let (lon12, _) = ang_diff(lon1, lon2);
    if lon1 <= 0.0 && lon2 > 0.0 && lon12 > 0.0 {
        1
    } else if lon2 <= 0.0 && lon1 > 0.0 && lon12 < 0.0 {
        -1
    } else {
        0
    }
}

/// The version of `transit` for unrolled longitudes: the parity of
/// ceil(lon2 / 360°) - ceil(lon1 / 360°).
fn transit_direct(lon1: f64, lon2: f64) -> i64 {
    // remainder reduces to [-360, 360], where ceil(lon / 360) is 0 on
    // (-360, 0] and otherwise odd
    let lon1 = libm::remainder(lon1, 720.0);
    let lon2 = libm::remainder(lon2, 720.0);
    i64::from(!(lon2 <= 0.0 && lon2 > -360.0)) - i64::from(!(lon1 <= 0.0 && lon1 > -360.0))
}

/// Reduce an accumulated area to the range implied by `sign`, accounting
/// for prime meridian crossings and orientation.
fn area_reduce_acc(
    area: &mut Accumulator,
    area0: f64,
    crossings: i64,
    reverse: bool,
    sign: bool,
) -> f64 {
    area.remainder(area0);
    if crossings & 1 != 0 {
        let correction = if area.sum(0.0) < 0.0 { 1.0 } else { -1.0 };
        area.add(correction * area0 / 2.0);
    }
    // area is with the clockwise sense; if !reverse convert to the
    // counter-clockwise convention
    if !reverse {
        area.negate();
    }
    // if sign put area in (-area0/2, area0/2], else in [0, area0)
    if sign {
        if area.sum(0.0) > area0 / 2.0 {
            area.add(-area0);
        } else if area.sum(0.0) <= -area0 / 2.0 {
            area.add(area0);
        }
    } else if area.sum(0.0) >= area0 {
        area.add(-area0);
    } else if area.sum(0.0) < 0.0 {
        area.add(area0);
    }
    0.0 + area.sum(0.0)
}

/// The `area_reduce_acc` rules applied to a plain `f64` total, for the
/// non-destructive test functions.
fn area_reduce(mut area: f64, area0: f64, crossings: i64, reverse: bool, sign: bool) -> f64 {
    area = libm::remainder(area, area0);
    if crossings & 1 != 0 {
        area += if area < 0.0 { 1.0 } else { -1.0 } * area0 / 2.0;
    }
    if !reverse {
        area = -area;
    }
    if sign {
        if area > area0 / 2.0 {
            area -= area0;
        } else if area <= -area0 / 2.0 {
            area += area0;
        }
    } else if area >= area0 {
        area -= area0;
    } else if area < 0.0 {
        area += area0;
    }
    0.0 + area
}

impl<'a> PolygonArea<'a> {
    /// Construct a `PolygonArea` for `geodesic`; if `polyline` only
    /// lengths are accumulated.
    #[must_use]
    pub fn new(geodesic: &'a Geodesic, polyline: bool) -> Self {
        Self {
            geodesic,
            polyline,
            area0: geodesic.total_area(),
            mask: LATITUDE
                | LONGITUDE
                | DISTANCE
                | if polyline { EMPTY } else { AREA | LONG_UNROLL },
            areasum: Accumulator::new(),
            perimetersum: Accumulator::new(),
            num: 0,
            crossings: 0,
            lat0: f64::NAN,
            lon0: f64::NAN,
            lat1: f64::NAN,
            lon1: f64::NAN,
        }
    }

    /// Reset the polygon, discarding all vertices.
    pub fn clear(&mut self) {
        self.areasum.set(0.0);
        self.perimetersum.set(0.0);
        self.num = 0;
        self.crossings = 0;
        self.lat0 = f64::NAN;
        self.lon0 = f64::NAN;
        self.lat1 = f64::NAN;
        self.lon1 = f64::NAN;
    }

    /// Add a vertex, joined to the previous one by the shortest geodesic.
    pub fn add_point(&mut self, lat: Degrees, lon: Degrees) {
        let (lat, lon) = (lat.0, lon.0);
        if self.num == 0 {
            self.lat0 = lat;
            self.lon0 = lon;
        } else {
            let r = self
                .geodesic
                .gen_inverse(self.lat1, self.lon1, lat, lon, self.mask);
            self.perimetersum.add(r.s12);
            if !self.polyline {
                self.areasum.add(r.area12);
                self.crossings += transit(self.lon1, lon);
            }
        }
        self.lat1 = lat;
        self.lon1 = lon;
        self.num += 1;
    }

    /// Add a vertex a distance `s` from the previous one at azimuth `azi`.
    /// Ignored until a first vertex has been supplied with `add_point`.
    pub fn add_edge(&mut self, azi: Degrees, s: Metres) {
        if self.num == 0 {
            return;
        }
        let position = self
            .geodesic
            .gen_direct(self.lat1, self.lon1, azi.0, false, s.0, self.mask);
        self.perimetersum.add(s.0);
        if !self.polyline {
            self.areasum.add(position.area12);
            self.crossings += transit_direct(self.lon1, position.lon2);
        }
        self.lat1 = position.lat2;
        self.lon1 = position.lon2;
        self.num += 1;
    }

    /// Close the polygon back to the first vertex and return the totals.
    ///
    /// If `reverse` clockwise traversal counts as positive, otherwise
    /// counter-clockwise does. If `sign` the area of the smaller of the
    /// two regions is returned with the sign of the traversal, otherwise
    /// the area of the traversed region in [0, area of ellipsoid).
    ///
    /// The polygon itself is unchanged, so more vertices may be added
    /// afterwards.
    #[must_use]
    pub fn compute(&self, reverse: bool, sign: bool) -> PolygonResult {
        if self.num < 2 {
            return PolygonResult {
                num: self.num,
                perimeter: Metres(0.0),
                area: if self.polyline { f64::NAN } else { 0.0 },
            };
        }
        if self.polyline {
            return PolygonResult {
                num: self.num,
                perimeter: Metres(self.perimetersum.sum(0.0)),
                area: f64::NAN,
            };
        }

        let r = self
            .geodesic
            .gen_inverse(self.lat1, self.lon1, self.lat0, self.lon0, self.mask);
        let mut tempsum = self.areasum;
        tempsum.add(r.area12);
        let crossings = self.crossings + transit(self.lon1, self.lon0);
        PolygonResult {
            num: self.num,
            perimeter: Metres(self.perimetersum.sum(r.s12)),
            area: area_reduce_acc(&mut tempsum, self.area0, crossings, reverse, sign),
        }
    }

    /// The totals the polygon would have if the vertex `(lat, lon)` were
    /// added, without adding it.
    #[must_use]
    pub fn test_point(&self, lat: Degrees, lon: Degrees, reverse: bool, sign: bool) -> PolygonResult {
        let (lat, lon) = (lat.0, lon.0);
        if self.num == 0 {
            return PolygonResult {
                num: 1,
                perimeter: Metres(0.0),
                area: if self.polyline { f64::NAN } else { 0.0 },
            };
        }

        let mut perimeter = self.perimetersum.sum(0.0);
        let mut tempsum = if self.polyline {
            0.0
        } else {
            self.areasum.sum(0.0)
        };
        let mut crossings = self.crossings;
        let num = self.num + 1;
        let ends = if self.polyline { 1 } else { 2 };
        for i in 0..ends {
            // first the edge into the test point, then the closing edge
            let (lat1, lon1) = if i == 0 {
                (self.lat1, self.lon1)
            } else {
                (lat, lon)
            };
            let (lat2, lon2) = if i == 0 {
                (lat, lon)
            } else {
                (self.lat0, self.lon0)
            };
            let r = self.geodesic.gen_inverse(lat1, lon1, lat2, lon2, self.mask);
            perimeter += r.s12;
            if !self.polyline {
                tempsum += r.area12;
                crossings += transit(lon1, lon2);
            }
        }

        if self.polyline {
            return PolygonResult {
                num,
                perimeter: Metres(perimeter),
                area: f64::NAN,
            };
        }
        PolygonResult {
            num,
            perimeter: Metres(perimeter),
            area: area_reduce(tempsum, self.area0, crossings, reverse, sign),
        }
    }

    /// The totals the polygon would have if an edge at azimuth `azi` of
    /// length `s` were added, without adding it. Requires a first vertex;
    /// otherwise the result is NaN.
    #[must_use]
    pub fn test_edge(&self, azi: Degrees, s: Metres, reverse: bool, sign: bool) -> PolygonResult {
        if self.num == 0 {
            return PolygonResult {
                num: 0,
                perimeter: Metres(f64::NAN),
                area: f64::NAN,
            };
        }
        let num = self.num + 1;
        let mut perimeter = self.perimetersum.sum(0.0) + s.0;
        if self.polyline {
            return PolygonResult {
                num,
                perimeter: Metres(perimeter),
                area: f64::NAN,
            };
        }

        let mut tempsum = self.areasum.sum(0.0);
        let mut crossings = self.crossings;

        let position = self
            .geodesic
            .gen_direct(self.lat1, self.lon1, azi.0, false, s.0, self.mask);
        tempsum += position.area12;
        crossings += transit_direct(self.lon1, position.lon2);

        let r = self.geodesic.gen_inverse(
            position.lat2,
            position.lon2,
            self.lat0,
            self.lon0,
            self.mask,
        );
        perimeter += r.s12;
        tempsum += r.area12;
        crossings += transit(position.lon2, self.lon0);

        PolygonResult {
            num,
            perimeter: Metres(perimeter),
            area: area_reduce(tempsum, self.area0, crossings, reverse, sign),
        }
    }

    /// The number of vertices supplied so far.
    #[must_use]
    pub const fn num(&self) -> usize {
        self.num
    }

    /// Whether lengths only are accumulated.
    #[must_use]
    pub const fn polyline(&self) -> bool {
        self.polyline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_transit() {
        assert_eq!(1, transit(-1.0, 1.0));
        assert_eq!(-1, transit(1.0, -1.0));
        assert_eq!(0, transit(10.0, 20.0));
        // crossing the antimeridian is not a prime meridian transit
        assert_eq!(0, transit(179.0, -179.0));
    }

    #[test]
    fn test_transit_direct() {
        assert_eq!(0, transit_direct(10.0, 20.0));
        assert_eq!(-1, transit_direct(350.0, 370.0));
        assert_eq!(1, transit_direct(370.0, 350.0));
        assert_eq!(0, transit_direct(370.0, 380.0));
        // an edge starting exactly on the prime meridian crosses it
        assert_eq!(1, transit_direct(0.0, 90.0));
        assert_eq!(0, transit_direct(-90.0, 0.0));
    }

    #[test]
    fn test_empty_and_single_point() {
        let geodesic = Geodesic::wgs84();
        let polygon = PolygonArea::new(&geodesic, false);
        let r = polygon.compute(false, true);
        assert_eq!(0, r.num);
        assert_eq!(0.0, r.perimeter.0);
        assert_eq!(0.0, r.area);

        let mut polygon = polygon;
        polygon.add_point(Degrees(52.0), Degrees(0.0));
        let r = polygon.compute(false, true);
        assert_eq!(1, r.num);
        assert_eq!(0.0, r.perimeter.0);
        assert_eq!(0.0, r.area);
    }

    #[test]
    fn test_triangle() {
        let geodesic = Geodesic::wgs84();
        let mut polygon = PolygonArea::new(&geodesic, false);
        polygon.add_point(Degrees(40.0), Degrees(40.0));
        polygon.add_point(Degrees(45.0), Degrees(20.0));
        polygon.add_point(Degrees(30.0), Degrees(45.0));
        let r = polygon.compute(false, true);
        assert_eq!(3, r.num);
        assert!(is_within_tolerance(5_677_033.98, r.perimeter.0, 0.01));
        assert!(is_within_tolerance(6.916_387_69e11, r.area, 1e4));
    }

    #[test]
    fn test_test_point_matches_compute() {
        let geodesic = Geodesic::wgs84();
        let mut polygon = PolygonArea::new(&geodesic, false);
        polygon.add_point(Degrees(40.0), Degrees(40.0));
        polygon.add_point(Degrees(45.0), Degrees(20.0));
        let tested = polygon.test_point(Degrees(30.0), Degrees(45.0), false, true);

        polygon.add_point(Degrees(30.0), Degrees(45.0));
        let computed = polygon.compute(false, true);
        assert_eq!(computed.num, tested.num);
        assert!(is_within_tolerance(
            computed.perimeter.0,
            tested.perimeter.0,
            1e-6
        ));
        assert!(is_within_tolerance(computed.area, tested.area, 1.0));
    }

    #[test]
    fn test_add_edge_matches_add_point() {
        let geodesic = Geodesic::wgs84();
        let mut by_point = PolygonArea::new(&geodesic, false);
        by_point.add_point(Degrees(40.0), Degrees(40.0));
        by_point.add_point(Degrees(45.0), Degrees(20.0));
        by_point.add_point(Degrees(30.0), Degrees(45.0));
        let expected = by_point.compute(false, true);

        let mut by_edge = PolygonArea::new(&geodesic, false);
        by_edge.add_point(Degrees(40.0), Degrees(40.0));
        let d1 = geodesic.inverse(Degrees(40.0), Degrees(40.0), Degrees(45.0), Degrees(20.0));
        by_edge.add_edge(d1.azi1, d1.s12);
        let d2 = geodesic.inverse(Degrees(45.0), Degrees(20.0), Degrees(30.0), Degrees(45.0));
        by_edge.add_edge(d2.azi1, d2.s12);
        let actual = by_edge.compute(false, true);

        assert_eq!(expected.num, actual.num);
        assert!(is_within_tolerance(
            expected.perimeter.0,
            actual.perimeter.0,
            1e-4
        ));
        assert!(is_within_tolerance(expected.area, actual.area, 10.0));
    }

    #[test]
    fn test_polyline() {
        let geodesic = Geodesic::wgs84();
        let mut polyline = PolygonArea::new(&geodesic, true);
        assert!(polyline.polyline());
        polyline.add_point(Degrees(40.0), Degrees(40.0));
        polyline.add_point(Degrees(45.0), Degrees(20.0));
        polyline.add_point(Degrees(30.0), Degrees(45.0));
        let r = polyline.compute(false, true);
        assert_eq!(3, r.num);
        // length of the two edges, without the closing edge
        assert!(is_within_tolerance(4_477_956.18, r.perimeter.0, 0.5));
        assert!(r.area.is_nan());
    }

    #[test]
    fn test_clear() {
        let geodesic = Geodesic::wgs84();
        let mut polygon = PolygonArea::new(&geodesic, false);
        polygon.add_point(Degrees(40.0), Degrees(40.0));
        polygon.add_point(Degrees(45.0), Degrees(20.0));
        polygon.clear();
        assert_eq!(0, polygon.num());
        let r = polygon.compute(false, true);
        assert_eq!(0.0, r.perimeter.0);
        assert_eq!(0.0, r.area);
    }

    #[test]
    fn test_pole_encircling() {
        let geodesic = Geodesic::wgs84();
        let mut polygon = PolygonArea::new(&geodesic, false);
        polygon.add_point(Degrees(89.0), Degrees(0.0));
        polygon.add_point(Degrees(89.0), Degrees(90.0));
        polygon.add_point(Degrees(89.0), Degrees(180.0));
        polygon.add_point(Degrees(89.0), Degrees(270.0));
        let r = polygon.compute(false, true);
        assert!(is_within_tolerance(631_819.8745, r.perimeter.0, 1e-4));
        assert!(is_within_tolerance(24_952_305_678.0, r.area, 1.0));

        // mirrored south, the signed area is negated
        let mut polygon = PolygonArea::new(&geodesic, false);
        polygon.add_point(Degrees(-89.0), Degrees(0.0));
        polygon.add_point(Degrees(-89.0), Degrees(90.0));
        polygon.add_point(Degrees(-89.0), Degrees(180.0));
        polygon.add_point(Degrees(-89.0), Degrees(270.0));
        let r = polygon.compute(false, true);
        assert!(is_within_tolerance(631_819.8745, r.perimeter.0, 1e-4));
        assert!(is_within_tolerance(-24_952_305_678.0, r.area, 1.0));
    }
}
