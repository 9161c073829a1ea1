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

//! The geomath module contains the scalar numeric kernels shared by the
//! direct and inverse geodesic solvers: error-free floating point summation,
//! angle normalization and differencing in degrees, degree trigonometry with
//! exact quadrant handling, and the astroid equation solver used to start
//! Newton's method on nearly antipodal geodesics.
//!
//! Angles are `f64` degrees and trigonometric quantities are carried as
//! separate sine/cosine pairs throughout, so that quadrant information and
//! precision near the poles and the equator are preserved.

#![allow(clippy::suboptimal_flops)]

/// The number of binary digits in the fraction of an `f64`.
pub const DIGITS: u64 = 53;

/// Square a number.
#[must_use]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Normalize a sine/cosine pair to lie on the unit circle.
#[must_use]
pub fn norm(x: f64, y: f64) -> (f64, f64) {
    let r = libm::sqrt(x * x + y * y);
    (x / r, y / r)
}

/// The error-free transformation of a sum, after Knuth.
///
/// returns `(s, t)` where `s` is the rounded sum `u + v` and `t` is the exact
/// error, so that `s + t` equals `u + v` exactly.
#[must_use]
pub fn sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let mut up = s - v;
    let mut vpp = s - up;
    up -= u;
    vpp -= v;
    let t = -(up + vpp);
    (s, t)
}

/// Round an angle in degrees so that tiny values underflow to zero.
///
/// The smallest gap in the result is 1/2^57 near x = 1/16, about 0.7 pm on
/// the Earth. This avoids having to deal with near singular cases when x is
/// non-zero but tiny, e.g. 1.0e-200.
#[must_use]
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1.0 / 16.0;
    let mut y = libm::fabs(x);
    // The compiler mustn't "simplify" z - (z - y) to y.
    if y < Z {
        y = Z - (Z - y);
    }
    if x == 0.0 {
        0.0
    } else if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Reduce an angle in degrees to the range (-180°, 180°].
#[must_use]
pub fn ang_normalize(x: f64) -> f64 {
    let y = libm::remainder(x, 360.0);
    if y == -180.0 {
        180.0
    } else {
        y
    }
}

/// Replace latitudes outside [-90°, 90°] with NaN.
#[must_use]
pub fn lat_fix(x: f64) -> f64 {
    if libm::fabs(x) > 90.0 {
        f64::NAN
    } else {
        x
    }
}

/// Compute `y - x` in degrees, reduced to [-180°, 180°].
///
/// returns `(d, t)` where `d` is the rounded difference and `t` is the error
/// term, so the difference is `d + t` to full accuracy.
#[must_use]
pub fn ang_diff(x: f64, y: f64) -> (f64, f64) {
    let (d, t) = sum(ang_normalize(-x), ang_normalize(y));
    let d = ang_normalize(d);
    if d == 180.0 && t > 0.0 {
        sum(-180.0, t)
    } else {
        sum(d, t)
    }
}

/// Compute the sine and cosine of an angle in degrees.
///
/// The angle is reduced to the range [-45°, 45°] before conversion to
/// radians, and the quadrant is recovered exactly afterwards, so that for
/// example `sincosd(90.0)` is exactly `(1.0, 0.0)` and `sincosd(-0.0)`
/// preserves the sign of the zero sine.
#[must_use]
pub fn sincosd(x: f64) -> (f64, f64) {
    let r = if x.is_finite() {
        libm::fmod(x, 360.0)
    } else {
        f64::NAN
    };

    let mut q = if r.is_nan() {
        0.0
    } else {
        libm::round(r / 90.0)
    };

    let r = (r - 90.0 * q).to_radians();

    let mut s = libm::sin(r);
    let mut c = libm::cos(r);

    q = libm::fmod(q, 4.0);
    if q < 0.0 {
        q += 4.0;
    }

    if q == 1.0 {
        let t = s;
        s = c;
        c = -t;
    } else if q == 2.0 {
        s = -s;
        c = -c;
    } else if q == 3.0 {
        let t = s;
        s = -c;
        c = t;
    }

    // Remove the minus sign on -0.0 except for sin(-0.0).
    if x == 0.0 {
        (x, c)
    } else {
        (0.0 + s, 0.0 + c)
    }
}

/// Compute the arc tangent of `y/x` in degrees.
///
/// The arguments are rearranged so that the underlying `atan2` result lies in
/// [-45°, 45°] before conversion to degrees, minimizing round-off, and the
/// result is mapped back to the correct quadrant.
#[must_use]
pub fn atan2d(y: f64, x: f64) -> f64 {
    let mut x = x;
    let mut y = y;
    let mut q = if libm::fabs(y) > libm::fabs(x) {
        core::mem::swap(&mut x, &mut y);
        2
    } else {
        0
    };
    if x < 0.0 {
        q += 1;
        x = -x;
    }
    let ang = libm::atan2(y, x).to_degrees();
    match q {
        1 => {
            if y >= 0.0 {
                180.0 - ang
            } else {
                -180.0 - ang
            }
        }
        2 => 90.0 - ang,
        3 => -90.0 + ang,
        _ => ang,
    }
}

/// Compute `e * atanh(e * x)` where `e = sqrt(|es|)` carries the sign of
/// `es`; for a prolate ellipsoid (`es < 0`) the hyperbolic arc tangent
/// becomes a circular one.
#[must_use]
pub fn eatanhe(x: f64, es: f64) -> f64 {
    if es > 0.0 {
        es * libm::atanh(es * x)
    } else {
        -es * libm::atan(es * x)
    }
}

/// Solve the astroid equation `k^4 + 2*k^3 - (x^2 + y^2 - 1)*k^2 - 2*y^2*k -
/// y^2 = 0` for the positive root `k`.
///
/// The solution linearizes the azimuth against the longitude difference for
/// nearly antipodal geodesics and supplies the starting guess without which
/// Newton's method frequently fails to converge.
/// * `x`, `y` - the scaled astroid parameters.
#[must_use]
pub fn astroid(x: f64, y: f64) -> f64 {
    let p = sq(x);
    let q = sq(y);
    let r = (p + q - 1.0) / 6.0;

    // y = 0 with |x| <= 1; for y small, positive root is k = |y|/sqrt(1-x^2)
    if q == 0.0 && r <= 0.0 {
        0.0
    } else {
        let s = p * q / 4.0;
        let r2 = sq(r);
        let r3 = r * r2;
        let mut u = r;

        // The discriminant of the quadratic equation for T3. This is zero on
        // the evolute curve p^(1/3) + q^(1/3) = 1.
        let disc = s * (s + 2.0 * r3);
        if disc >= 0.0 {
            let mut t3 = s + r3;
            // Pick the sign on the sqrt to maximize |T3|, to minimize loss of
            // precision due to cancellation.
            t3 += if t3 < 0.0 {
                -libm::sqrt(disc)
            } else {
                libm::sqrt(disc)
            };
            let t = libm::cbrt(t3);
            u += if t == 0.0 { 0.0 } else { t + r2 / t };
        } else {
            // T is complex, but the way u is defined the result is real.
            let ang = libm::atan2(libm::sqrt(-disc), -(s + r3));
            // There are three possible cube roots. We choose the root which
            // avoids cancellation. Note: disc < 0 implies that r < 0.
            u += 2.0 * r * libm::cos(ang / 3.0);
        }

        let v = libm::sqrt(sq(u) + q); // guaranteed positive
        let uv = if u < 0.0 { q / (v - u) } else { u + v }; // u + v, positive
        let w = (uv - q) / (2.0 * v);

        // Rearrange expression for k to avoid loss of accuracy due to
        // subtraction. Division by 0 not possible because uv > 0, w >= 0.
        uv / (libm::sqrt(uv + sq(w)) + w)
    }
}
