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

// extern crate we're testing, same as any other code would do.
extern crate ellipsoid_geodesic;

use angle_sc::is_within_tolerance;
use ellipsoid_geodesic::capability::{AREA, DISTANCE_IN, REDUCED_LENGTH, STANDARD};
use ellipsoid_geodesic::geomath::ang_normalize;
use ellipsoid_geodesic::{Degrees, Geodesic, Metres, WGS84_GEODESIC};

#[test]
fn test_direct_due_west() {
    // Starting in the middle of Times Square in New York City and heading
    // due West for 1000 km ends up a little outside Indianapolis.
    let result = WGS84_GEODESIC.direct(
        Degrees(40.757954),
        Degrees(-73.985548),
        Degrees(-90.0),
        Metres(1000e3),
    );
    assert!(is_within_tolerance(40.15431701948773, result.lat2.0, 1e-9));
    assert!(is_within_tolerance(-85.75720579845405, result.lon2.0, 1e-9));
}

#[test]
fn test_inverse_new_york_chicago() {
    let result = WGS84_GEODESIC.inverse(
        Degrees(40.757954),
        Degrees(-73.985548),
        Degrees(41.882609),
        Degrees(-87.621978),
    );
    assert!(is_within_tolerance(1_147_311.9, result.s12.0, 0.05));
}

#[test]
fn test_direct_karney_example() {
    // The JFK to Paris CDG example from Section 5 of Karney's
    // Algorithms for geodesics.
    let result = WGS84_GEODESIC.direct(
        Degrees(40.63972222),
        Degrees(-73.77888889),
        Degrees(53.5),
        Metres(5.85e6),
    );
    assert!(is_within_tolerance(49.01467, result.lat2.0, 5e-6));
    assert!(is_within_tolerance(2.56106, result.lon2.0, 5e-6));
    assert!(is_within_tolerance(111.62947, result.azi2.0, 5e-6));
}

#[test]
fn test_inverse_equatorial_and_meridional() {
    // the equator is a geodesic of an oblate ellipsoid
    let result = WGS84_GEODESIC.inverse(Degrees(0.0), Degrees(0.0), Degrees(0.0), Degrees(90.0));
    assert_eq!(90.0, result.azi1.0);
    assert_eq!(90.0, result.azi2.0);
    assert!(is_within_tolerance(10_018_754.17, result.s12.0, 1e-2));

    // a quarter meridian is slightly shorter
    let result = WGS84_GEODESIC.inverse(Degrees(0.0), Degrees(0.0), Degrees(90.0), Degrees(0.0));
    assert_eq!(0.0, result.azi1.0);
    assert!(is_within_tolerance(10_001_965.729, result.s12.0, 1e-2));
}

#[test]
fn test_inverse_nearly_antipodal() {
    let result = WGS84_GEODESIC.inverse(Degrees(0.0), Degrees(0.0), Degrees(0.5), Degrees(179.5));
    assert!(result.s12.0 > 19_900_000.0);
    assert!(result.s12.0 < 20_100_000.0);

    // the inverse solution must round trip through the direct solver
    let direct = WGS84_GEODESIC.direct(Degrees(0.0), Degrees(0.0), result.azi1, result.s12);
    assert!(is_within_tolerance(0.5, direct.lat2.0, 1e-8));
    assert!(is_within_tolerance(179.5, direct.lon2.0, 1e-8));
}

#[test]
fn test_inverse_symmetry() {
    let forward = WGS84_GEODESIC.inverse(
        Degrees(35.0),
        Degrees(-20.0),
        Degrees(-23.5),
        Degrees(57.3),
    );
    let backward = WGS84_GEODESIC.inverse(
        Degrees(-23.5),
        Degrees(57.3),
        Degrees(35.0),
        Degrees(-20.0),
    );
    assert!(is_within_tolerance(forward.s12.0, backward.s12.0, 1e-8));
    assert!(is_within_tolerance(forward.a12.0, backward.a12.0, 1e-12));

    // swapping the endpoints reverses the line, so the azimuths differ
    // by 180 degrees
    let swap1 = ang_normalize(backward.azi1.0 - forward.azi2.0).abs();
    let swap2 = ang_normalize(backward.azi2.0 - forward.azi1.0).abs();
    assert!(is_within_tolerance(180.0, swap1, 1e-9));
    assert!(is_within_tolerance(180.0, swap2, 1e-9));
}

#[test]
fn test_inverse_meridian_perturbation() {
    // an infinitesimal longitude offset from a meridian pair must agree
    // with the exact meridian solution
    let exact = WGS84_GEODESIC.inverse(Degrees(-45.0), Degrees(0.0), Degrees(45.0), Degrees(0.0));
    assert_eq!(0.0, exact.azi1.0);
    assert!(is_within_tolerance(9_969_888.756, exact.s12.0, 1e-2));

    let perturbed =
        WGS84_GEODESIC.inverse(Degrees(-45.0), Degrees(0.0), Degrees(45.0), Degrees(1e-9));
    assert!(is_within_tolerance(exact.s12.0, perturbed.s12.0, 1e-6));
    assert!(is_within_tolerance(0.0, perturbed.azi1.0, 1e-6));
}

#[test]
fn test_reduced_length_and_scale() {
    let result = WGS84_GEODESIC.inverse_with_capabilities(
        Degrees(42.0),
        Degrees(29.0),
        Degrees(39.0),
        Degrees(-77.0),
        STANDARD | REDUCED_LENGTH | AREA,
    );
    // the reduced length of a geodesic shorter than half way round is
    // positive and less than the distance
    assert!(result.m12.0 > 0.0);
    assert!(result.m12.0 < result.s12.0);
    assert!(result.area12.is_finite());
    // scales were not requested
    assert!(result.scale12.is_nan());
    assert!(result.scale21.is_nan());
}

#[test]
fn test_geodesic_line_waypoints() {
    // sample waypoints along a line and check each against the inverse
    // solver
    let line = WGS84_GEODESIC.inverse_line(
        Degrees(40.757954),
        Degrees(-73.985548),
        Degrees(41.882609),
        Degrees(-87.621978),
        STANDARD | DISTANCE_IN,
    );
    let total = line.s13();
    for i in 1..5 {
        let s = Metres(total.0 * f64::from(i) / 5.0);
        let waypoint = line.position(s);
        let check = WGS84_GEODESIC.inverse(
            Degrees(40.757954),
            Degrees(-73.985548),
            waypoint.lat2,
            waypoint.lon2,
        );
        assert!(is_within_tolerance(s.0, check.s12.0, 1e-6));
    }
}

#[test]
fn test_mars_inverse() {
    // Calculations are not limited to Earth: the distance on Mars from
    // Olympus Mons to the Curiosity rover's landing site.
    let mars = Geodesic::new(Metres(3396.2e3), 5.0304e-3);
    let result = mars.inverse(
        Degrees(18.65),
        Degrees(-133.8),
        Degrees(-4.47),
        Degrees(137.42),
    );
    assert!(is_within_tolerance(5_348_380.0, result.s12.0, 0.5));
}

#[test]
fn test_prolate_ellipsoid() {
    // a prolate ellipsoid, f < 0
    let prolate = Geodesic::new(Metres(6.4e6), -1.0 / 150.0);
    let result = prolate.inverse(Degrees(0.0), Degrees(0.0), Degrees(0.0), Degrees(90.0));
    let direct = prolate.direct(Degrees(0.0), Degrees(0.0), result.azi1, result.s12);
    assert!(is_within_tolerance(0.0, direct.lat2.0, 1e-9));
    assert!(is_within_tolerance(90.0, direct.lon2.0, 1e-9));
}

#[test]
fn test_sphere_round_trip() {
    let sphere = Geodesic::new(Metres(6_371_000.0), 0.0);
    let inverse = sphere.inverse(Degrees(51.5), Degrees(-0.13), Degrees(35.7), Degrees(139.7));
    let direct = sphere.direct(Degrees(51.5), Degrees(-0.13), inverse.azi1, inverse.s12);
    assert!(is_within_tolerance(35.7, direct.lat2.0, 1e-9));
    assert!(is_within_tolerance(139.7, direct.lon2.0, 1e-9));
}
