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

//! This module contains the series coefficients of Karney's geodesic
//! algorithms at order 6, and the Clenshaw summation of the resulting
//! Fourier series.
//!
//! It uses the equations given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf).
//!
//! The `A1`/`A2` scale factors and the `C1`/`C1'`/`C2` Fourier coefficients
//! are closed forms in the series parameter epsilon; the `A3`/`C3`/`C4`
//! families are first expanded as polynomials in the third flattening `n`
//! (the `*x` tables, computed once per ellipsoid) and then evaluated in
//! epsilon per geodesic. Coefficient arrays are stored lowest degree first.

/// The scale factor `A1` minus one.
/// CFF Karney, Eq. 17.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_a1(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * (eps2 * (eps2 + 4.0) + 64.0) / 256.0;
    (t + eps) / (1.0 - eps)
}

/// The scale factor `A2` minus one.
/// CFF Karney, Eq. 42.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_a2(eps: f64) -> f64 {
    let eps2 = eps * eps;
    let t = eps2 * ((-11.0 * eps2 - 28.0) * eps2 - 192.0) / 256.0;
    (t - eps) / (1.0 + eps)
}

/// The coefficients of `A3` as a polynomial in epsilon.
/// CFF Karney, Eq. 24.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_a3(n: f64) -> [f64; 6] {
    [
        1.0,
        (n - 1.0) / 2.0,
        (n * (3.0 * n - 1.0) - 2.0) / 8.0,
        ((-n - 3.0) * n - 1.0) / 16.0,
        (-2.0 * n - 3.0) / 64.0,
        -3.0 / 128.0,
    ]
}

/// The coefficients `C1[l]` in the Fourier expansion of `B1`.
/// CFF Karney, Eq. 18.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_coeffs_c1(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps;
    let eps6 = (eps4 * eps) * eps;

    [
        0.0,
        eps * ((6.0 - eps2) * eps2 - 16.0) / 32.0,
        eps2 * ((64.0 - 9.0 * eps2) * eps2 - 128.0) / 2048.0,
        eps * eps2 * (9.0 * eps2 - 16.0) / 768.0,
        eps4 * (3.0 * eps2 - 5.0) / 512.0,
        eps * eps4 * (-7.0 / 1280.0),
        eps6 * (-7.0 / 2048.0),
    ]
}

/// The coefficients `C1'[l]` in the expansion of the inverse of `B1`,
/// used to convert a distance to an arc length.
/// CFF Karney, Eq. 21.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_coeffs_c1p(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps;
    let eps6 = (eps4 * eps) * eps;

    [
        0.0,
        eps * (eps2 * (205.0 * eps2 - 432.0) + 768.0) / 1536.0,
        eps2 * (eps2 * (4005.0 * eps2 - 4736.0) + 3840.0) / 12288.0,
        eps * eps2 * (116.0 - 225.0 * eps2) / 384.0,
        eps4 * (2695.0 - 7173.0 * eps2) / 7680.0,
        eps * eps4 * (3467.0 / 7680.0),
        eps6 * (38081.0 / 61440.0),
    ]
}

/// The coefficients `C2[l]` in the Fourier expansion of `B2`.
/// CFF Karney, Eq. 43.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_coeffs_c2(eps: f64) -> [f64; 7] {
    let eps2 = eps * eps;
    let eps4 = (eps2 * eps) * eps;
    let eps6 = (eps4 * eps) * eps;

    [
        0.0,
        eps * (eps2 * (eps2 + 2.0) + 16.0) / 32.0,
        eps2 * (eps2 * (35.0 * eps2 + 64.0) + 384.0) / 2048.0,
        eps * eps2 * (15.0 * eps2 + 80.0) / 768.0,
        eps4 * (7.0 * eps2 + 35.0) / 512.0,
        eps * eps4 * (63.0 / 1280.0),
        eps6 * (77.0 / 2048.0),
    ]
}

/// The coefficients of `C3[l]` as polynomials in epsilon, flattened with the
/// `l = 1` block first.
/// CFF Karney, Eq. 25.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c3x(n: f64) -> [f64; 15] {
    [
        (1.0 - n) / 4.0,
        (-n * n + 1.0) / 8.0,
        ((3.0 - n) * n + 3.0) / 64.0,
        (2.0 * n + 5.0) / 128.0,
        3.0 / 128.0,
        ((n - 3.0) * n + 2.0) / 32.0,
        ((-3.0 * n - 2.0) * n + 3.0) / 64.0,
        (n + 3.0) / 128.0,
        5.0 / 256.0,
        ((5.0 * n - 9.0) * n + 5.0) / 192.0,
        (-10.0 * n + 9.0) / 384.0,
        7.0 / 512.0,
        (-14.0 * n + 7.0) / 512.0,
        7.0 / 512.0,
        21.0 / 2560.0,
    ]
}

/// The coefficients of `C4[l]` as polynomials in epsilon, flattened with the
/// `l = 0` block first.
/// CFF Karney, Eq. 65.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_c4x(n: f64) -> [f64; 21] {
    [
        (n * (n * (n * (n * (100.0 * n + 208.0) + 572.0) + 3432.0) - 12012.0) + 30030.0) / 45045.0,
        (n * (n * (n * (64.0 * n + 624.0) - 4576.0) + 6864.0) - 3003.0) / 15015.0,
        (n * (n * (-10656.0 * n + 14144.0) - 4576.0) - 858.0) / 45045.0,
        ((-224.0 * n - 4784.0) * n + 1573.0) / 45045.0,
        (1088.0 * n + 156.0) / 45045.0,
        97.0 / 15015.0,
        (n * (n * (n * (-64.0 * n - 624.0) + 4576.0) - 6864.0) + 3003.0) / 135135.0,
        (n * (n * (5952.0 * n - 11648.0) + 9152.0) - 2574.0) / 135135.0,
        (n * (5792.0 * n + 1040.0) - 1287.0) / 135135.0,
        (-2944.0 * n + 468.0) / 135135.0,
        1.0 / 9009.0,
        (n * (n * (-1440.0 * n + 4160.0) - 4576.0) + 1716.0) / 225225.0,
        ((-8448.0 * n + 4992.0) * n - 1144.0) / 225225.0,
        (1856.0 * n - 936.0) / 225225.0,
        8.0 / 10725.0,
        ((3584.0 * n - 3328.0) * n + 1144.0) / 315315.0,
        (1024.0 * n - 208.0) / 105105.0,
        -136.0 / 63063.0,
        (-2560.0 * n + 832.0) / 405405.0,
        -128.0 / 135135.0,
        128.0 / 99099.0,
    ]
}

/// Evaluate the polynomial in x with lowest degree coefficient first, using
/// [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
/// * `coeffs` - the polynomial coefficients.
/// * `x` - the variable.
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |result, c| result * x + c)
}

/// The coefficients `C3[l]` for a given epsilon, from the polynomial table.
/// CFF Karney, Eq. 25.
/// * `coeffs` - the flattened table from `evaluate_coeffs_c3x`.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_coeffs_c3y(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c1 = eps * evaluate_polynomial(&coeffs[0..5], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[5..9], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[9..12], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[12..14], eps);
    let eps_5 = eps * eps_4;
    let c5 = eps_5 * evaluate_polynomial(&coeffs[14..15], eps);
    [0.0, c1, c2, c3, c4, c5]
}

/// The coefficients `C4[l]` for a given epsilon, from the polynomial table.
/// CFF Karney, Eq. 65.
/// * `coeffs` - the flattened table from `evaluate_coeffs_c4x`.
/// * `eps` - the series expansion parameter.
#[must_use]
pub fn evaluate_coeffs_c4y(coeffs: &[f64], eps: f64) -> [f64; 6] {
    let c0 = evaluate_polynomial(&coeffs[0..6], eps);
    let c1 = eps * evaluate_polynomial(&coeffs[6..11], eps);
    let eps_2 = eps * eps;
    let c2 = eps_2 * evaluate_polynomial(&coeffs[11..15], eps);
    let eps_3 = eps * eps_2;
    let c3 = eps_3 * evaluate_polynomial(&coeffs[15..18], eps);
    let eps_4 = eps * eps_3;
    let c4 = eps_4 * evaluate_polynomial(&coeffs[18..20], eps);
    let eps_5 = eps * eps_4;
    let c5 = eps_5 * coeffs[20];
    [c0, c1, c2, c3, c4, c5]
}

/// Evaluate `sum(coeffs[l] * sin(2*l*sigma), l, 1, n)` by
/// [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
///
/// `coeffs[0]` is unused; the angle sigma is given as its sine/cosine pair.
#[must_use]
pub fn sine_series(sinx: f64, cosx: f64, coeffs: &[f64]) -> f64 {
    let (y0, _y1) = clenshaw(sinx, cosx, coeffs, coeffs.len() - 1);
    2.0 * sinx * cosx * y0
}

/// Evaluate `sum(coeffs[l] * cos((2*l + 1)*sigma), l, 0, n - 1)` by
/// [Clenshaw summation](https://en.wikipedia.org/wiki/Clenshaw_algorithm).
///
/// The angle sigma is given as its sine/cosine pair.
#[must_use]
pub fn cosine_series(sinx: f64, cosx: f64, coeffs: &[f64]) -> f64 {
    let (y0, y1) = clenshaw(sinx, cosx, coeffs, coeffs.len());
    cosx * (y0 - y1)
}

/// The Clenshaw recurrence shared by the sine and cosine series: `n` terms
/// of `coeffs` are consumed from the top down.
fn clenshaw(sinx: f64, cosx: f64, coeffs: &[f64], n: usize) -> (f64, f64) {
    // 2 * cos(2*sigma), written to preserve accuracy when cosx ~ sinx
    let ar = 2.0 * (cosx - sinx) * (cosx + sinx);

    let mut n = n;
    let mut k = coeffs.len();
    let mut y0 = if n & 1 != 0 {
        k -= 1;
        coeffs[k]
    } else {
        0.0
    };
    let mut y1 = 0.0;

    n /= 2;
    while n > 0 {
        n -= 1;
        k -= 1;
        y1 = ar * y0 - y1 + coeffs[k];
        k -= 1;
        y0 = ar * y1 - y0 + coeffs[k];
    }

    (y0, y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // the series parameter for the WGS 84 ellipsoid at 45 degrees latitude
    const EPS45: f64 = 0.006739496742276434 / 2.0;
    // the third flattening of the WGS 84 ellipsoid
    const N: f64 = 0.0016792203863837047;

    #[test]
    fn test_evaluate_a1() {
        assert_eq!(0.0033839903702120875, evaluate_a1(EPS45));
        assert_eq!(0.0, evaluate_a1(0.0));
    }

    #[test]
    fn test_evaluate_a2() {
        assert_eq!(-0.0033669191180908161, evaluate_a2(EPS45));
        assert_eq!(0.0, evaluate_a2(0.0));
    }

    #[test]
    fn test_evaluate_coeffs_a3() {
        let a3 = evaluate_coeffs_a3(N);

        assert_eq!(1.0, a3[0]);
        assert_eq!(-0.49916038980680816, a3[1]);
        assert_eq!(-0.2502088451303832, a3[2]);
        assert_eq!(-0.06281503005876607, a3[3]);
        assert_eq!(-0.046927475637074494, a3[4]);
        assert_eq!(-0.0234375, a3[5]);

        assert_eq!(0.9983151115073848, evaluate_polynomial(&a3, EPS45));
    }

    #[test]
    fn test_evaluate_coeffs_c1() {
        let c1 = evaluate_coeffs_c1(EPS45);

        assert_eq!(0.0, c1[0]);
        assert_eq!(-0.0016848670110488485, c1[1]);
        assert_eq!(-7.09696225910107e-07, c1[2]);
        assert_eq!(-7.971653346618919e-10, c1[3]);
        assert_eq!(-1.259177551940401e-12, c1[4]);
        assert_eq!(-2.3761586316497056e-15, c1[5]);
        assert_eq!(-5.004410424104756e-18, c1[6]);
    }

    #[test]
    fn test_evaluate_coeffs_c1p() {
        let c1p = evaluate_coeffs_c1p(EPS45);

        assert_eq!(0.0, c1p[0]);
        assert_eq!(0.0016848634238263412, c1p[1]);
        assert_eq!(3.548451581094364e-06, c1p[2]);
        assert_eq!(1.1558716594815811e-08, c1p[3]);
        assert_eq!(4.5245387480513016e-11, c1p[4]);
        assert_eq!(1.9614623752213165e-13, c1p[5]);
        assert_eq!(9.074902540968247e-16, c1p[6]);
    }

    #[test]
    fn test_evaluate_coeffs_c2() {
        let c2 = evaluate_coeffs_c2(EPS45);

        assert_eq!(0.0, c2[0]);
        assert_eq!(0.0016848765770939658, c2[1]);
        assert_eq!(2.129104795318516e-06, c2[2]);
        assert_eq!(3.985860618432769e-09, c2[3]);
        assert_eq!(8.814322934149593e-12, c2[4]);
        assert_eq!(2.138542768484735e-14, c2[5]);
        assert_eq!(5.5048514665152315e-17, c2[6]);
    }

    #[test]
    fn test_evaluate_coeffs_c3x() {
        let c3x = evaluate_coeffs_c3x(N);

        assert_eq!(0.24958019490340408, c3x[0]);
        assert_eq!(0.12499964752736174, c3x[1]);
        assert_eq!(0.04695366939653196, c3x[2]);
        assert_eq!(0.03908873781853724, c3x[3]);
        assert_eq!(0.0234375, c3x[4]);
        assert_eq!(0.062342661206936094, c3x[5]);
        assert_eq!(0.046822392185686165, c3x[6]);
        assert_eq!(0.02345061890926862, c3x[7]);
        assert_eq!(0.01953125, c3x[8]);
        assert_eq!(0.025963026642854565, c3x[9]);
        assert_eq!(0.023393770302437927, c3x[10]);
        assert_eq!(0.013671875, c3x[11]);
        assert_eq!(0.01362595881755982, c3x[12]);
        assert_eq!(0.013671875, c3x[13]);
        assert_eq!(0.008203125, c3x[14]);
    }

    #[test]
    fn test_evaluate_coeffs_c3y() {
        let c3x = evaluate_coeffs_c3x(N);
        let c3y = evaluate_coeffs_c3y(&c3x, EPS45);

        assert_eq!(0.0, c3y[0]);
        assert_eq!(0.0008424436534462951, c3y[1]);
        assert_eq!(7.0970829388272e-07, c3y[2]);
        assert_eq!(9.964762855495333e-10, c3y[3]);
        assert_eq!(1.762880517021039e-12, c3y[4]);
        assert_eq!(3.564237947474559e-15, c3y[5]);
    }

    #[test]
    fn test_evaluate_coeffs_c4x() {
        let c4x = evaluate_coeffs_c4x(N);

        assert_eq!(0.6662190894642603, c4x[0]);
        assert_eq!(-0.19923321555984239, c4x[1]);
        assert_eq!(-0.01921732223244865, c4x[2]);
        assert_eq!(0.034742279454780166, c4x[3]);
        assert_eq!(0.0035037627212872787, c4x[4]);
        assert_eq!(0.00646020646020646, c4x[5]);
        assert_eq!(0.0221370239510936, c4x[6]);
        assert_eq!(-0.01893413691235592, c4x[7]);
        assert_eq!(-0.009510765372597735, c4x[8]);
        assert_eq!(0.003426620602971002, c4x[9]);
        assert_eq!(0.000111000111000111, c4x[10]);
        assert_eq!(0.007584982177746079, c4x[11]);
        assert_eq!(-0.00504225176309005, c4x[12]);
        assert_eq!(-0.004142006291321442, c4x[13]);
        assert_eq!(0.0007459207459207459, c4x[14]);
        assert_eq!(0.0036104265913438913, c4x[15]);
        assert_eq!(-0.001962613370670692, c4x[16]);
        assert_eq!(-0.0021565735851450138, c4x[17]);
        assert_eq!(0.0020416649913317735, c4x[18]);
        assert_eq!(-0.0009472009472009472, c4x[19]);
        assert_eq!(0.0012916376552740189, c4x[20]);
    }

    #[test]
    fn test_evaluate_coeffs_c4y() {
        let c4x = evaluate_coeffs_c4x(N);
        let c4y = evaluate_coeffs_c4y(&c4x, EPS45);

        assert_eq!(0.6655475067738744, c4y[0]);
        assert_eq!(7.438083593247255e-05, c4y[1]);
        assert_eq!(8.593554922743686e-08, c4y[2]);
        assert_eq!(1.378960169710657e-10, c4y[3]);
        assert_eq!(2.628420745698047e-13, c4y[4]);
        assert_eq!(5.61213433333604e-16, c4y[5]);
    }

    #[test]
    fn test_evaluate_polynomial() {
        let empty: &[f64] = &[];
        assert_eq!(0.0, evaluate_polynomial(empty, 0.5));
        assert_eq!(3.0, evaluate_polynomial(&[3.0], 0.5));
        assert_eq!(4.0, evaluate_polynomial(&[3.0, 2.0], 0.5));
        assert_eq!(4.25, evaluate_polynomial(&[3.0, 2.0, 1.0], 0.5));
    }

    #[test]
    fn test_sine_series() {
        let c1 = evaluate_coeffs_c1(EPS45);
        // a 3-4-5 sine/cosine pair keeps the arithmetic exact
        assert_eq!(-0.0016178533368694126, sine_series(0.6, 0.8, &c1));
        assert_eq!(-0.0, sine_series(0.0, 1.0, &c1));

        let c3x = evaluate_coeffs_c3x(N);
        let c3y = evaluate_coeffs_c3y(&c3x, EPS45);
        assert_eq!(0.0008091267882674615, sine_series(0.6, 0.8, &c3y));
    }

    #[test]
    fn test_cosine_series() {
        let c4x = evaluate_coeffs_c4x(N);
        let c4y = evaluate_coeffs_c4y(&c4x, EPS45);
        assert_eq!(0.5324117376485686, cosine_series(0.6, 0.8, &c4y));
        assert_eq!(0.0, cosine_series(1.0, 0.0, &c4y));
    }
}
