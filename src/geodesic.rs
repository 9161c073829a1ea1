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

//! This module contains the solver core shared by the direct and inverse
//! geodesic problems.
//!
//! It uses the equations given by CFF Karney in
//! [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf):
//! the series integrals along the auxiliary sphere (`lengths`), the
//! analytic starting guess for the inverse problem (`inverse_start`,
//! using the astroid construction for nearly antipodal points), the
//! function whose root Newton's method finds (`lambda12`) and the
//! Newton iteration itself with its bisection fallback (`gen_inverse`).
//!
//! All quantities are carried as sine/cosine pairs and invalid inputs
//! propagate as NaN.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::too_many_arguments)]

use crate::capability::{
    AREA, AZIMUTH, DISTANCE, DISTANCE_IN, EMPTY, GEODESIC_SCALE, OUT_MASK, REDUCED_LENGTH,
};
use crate::geodesic_line::{GeodesicLine, Position};
use crate::geomath::{ang_diff, ang_round, astroid, atan2d, lat_fix, norm, sincosd, sq};
use crate::{coefficients, Geodesic};

/// The distance integrals of `lengths`: `s12b` and `m12b` are in units of
/// the semiminor axis.
pub(crate) struct Lengths {
    pub s12b: f64,
    pub m12b: f64,
    pub m0: f64,
    pub scale12: f64,
    pub scale21: f64,
}

/// The starting point for Newton's method from `inverse_start`.
///
/// `sig12` is negative unless the short-line estimate was accepted, in
/// which case `salp2`/`calp2` and `dnm` are valid too.
pub(crate) struct InverseStart {
    pub sig12: f64,
    pub salp1: f64,
    pub calp1: f64,
    pub salp2: f64,
    pub calp2: f64,
    pub dnm: f64,
}

/// The longitude equation evaluated at a trial azimuth, with the spherical
/// triangle it implies and the derivative `dlam12` for Newton's method.
pub(crate) struct Lambda12 {
    pub lam12: f64,
    pub salp2: f64,
    pub calp2: f64,
    pub sig12: f64,
    pub ssig1: f64,
    pub csig1: f64,
    pub ssig2: f64,
    pub csig2: f64,
    pub eps: f64,
    pub domg12: f64,
    pub dlam12: f64,
}

/// The full solution of the inverse problem, with the azimuths as
/// sine/cosine pairs.
pub(crate) struct InverseSolution {
    pub a12: f64,
    pub s12: f64,
    pub salp1: f64,
    pub calp1: f64,
    pub salp2: f64,
    pub calp2: f64,
    pub m12: f64,
    pub scale12: f64,
    pub scale21: f64,
    pub area12: f64,
}

/// The inverse solution with azimuths converted to degrees.
pub(crate) struct InverseAzimuths {
    pub a12: f64,
    pub s12: f64,
    pub azi1: f64,
    pub azi2: f64,
    pub m12: f64,
    pub scale12: f64,
    pub scale21: f64,
    pub area12: f64,
}

impl Geodesic {
    /// The distance, reduced length and geodesic scale integrals between a
    /// pair of points on the auxiliary sphere.
    /// CFF Karney, Eqs. 7, 38 and 40.
    #[allow(clippy::similar_names)]
    pub(crate) fn lengths(
        &self,
        eps: f64,
        sig12: f64,
        ssig1: f64,
        csig1: f64,
        dn1: f64,
        ssig2: f64,
        csig2: f64,
        dn2: f64,
        cbet1: f64,
        cbet2: f64,
        outmask: u64,
        c1a: &mut [f64; 7],
        c2a: &mut [f64; 7],
    ) -> Lengths {
        let outmask = outmask & OUT_MASK;
        let mut result = Lengths {
            s12b: f64::NAN,
            m12b: f64::NAN,
            m0: f64::NAN,
            scale12: f64::NAN,
            scale21: f64::NAN,
        };

        let mut a1 = 0.0;
        let mut a2 = 0.0;
        let mut m0x = 0.0;
        let mut j12 = 0.0;

        if outmask & (DISTANCE | REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
            a1 = coefficients::evaluate_a1(eps);
            *c1a = coefficients::evaluate_coeffs_c1(eps);
            if outmask & (REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
                a2 = coefficients::evaluate_a2(eps);
                *c2a = coefficients::evaluate_coeffs_c2(eps);
                m0x = a1 - a2;
                a2 += 1.0;
            }
            a1 += 1.0;
        }

        if outmask & DISTANCE != 0 {
            let b1 = coefficients::sine_series(ssig2, csig2, c1a)
                - coefficients::sine_series(ssig1, csig1, c1a);
            result.s12b = a1 * (sig12 + b1);
            if outmask & (REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
                let b2 = coefficients::sine_series(ssig2, csig2, c2a)
                    - coefficients::sine_series(ssig1, csig1, c2a);
                j12 = m0x * sig12 + (a1 * b1 - a2 * b2);
            }
        } else if outmask & (REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
            // the Fourier coefficients of the combined integrand
            for l in 1..c2a.len() {
                c2a[l] = a1 * c1a[l] - a2 * c2a[l];
            }
            j12 = m0x * sig12
                + (coefficients::sine_series(ssig2, csig2, c2a)
                    - coefficients::sine_series(ssig1, csig1, c2a));
        }

        if outmask & REDUCED_LENGTH != 0 {
            result.m0 = m0x;
            result.m12b = dn2 * (csig1 * ssig2) - dn1 * (ssig1 * csig2) - csig1 * csig2 * j12;
        }

        if outmask & GEODESIC_SCALE != 0 {
            let csig12 = csig1 * csig2 + ssig1 * ssig2;
            let t = self.ep2 * (cbet1 - cbet2) * (cbet1 + cbet2) / (dn1 + dn2);
            result.scale12 = csig12 + (t * ssig2 - csig2 * j12) * ssig1 / dn1;
            result.scale21 = csig12 - (t * ssig1 - csig1 * j12) * ssig2 / dn2;
        }

        result
    }

    /// An analytic estimate of the azimuth at the first point, good enough
    /// for Newton's method to converge.
    ///
    /// Short geodesics get a direct spherical estimate; nearly antipodal
    /// ones go through the astroid construction.
    /// CFF Karney, Eqs. 51 to 57.
    #[allow(clippy::similar_names)]
    #[allow(clippy::too_many_lines)]
    pub(crate) fn inverse_start(
        &self,
        sbet1: f64,
        cbet1: f64,
        dn1: f64,
        sbet2: f64,
        cbet2: f64,
        dn2: f64,
        lam12: f64,
        slam12: f64,
        clam12: f64,
        c1a: &mut [f64; 7],
        c2a: &mut [f64; 7],
    ) -> InverseStart {
        let mut sig12 = -1.0;
        let mut salp2 = f64::NAN;
        let mut calp2 = f64::NAN;
        let mut dnm = f64::NAN;

        let sbet12 = sbet2 * cbet1 - cbet2 * sbet1;
        let cbet12 = cbet2 * cbet1 + sbet2 * sbet1;
        let sbet12a = sbet2 * cbet1 + cbet2 * sbet1;

        let mut somg12;
        let mut comg12;
        let shortline = cbet12 >= 0.0 && sbet12 < 0.5 && cbet2 * lam12 < 0.5;
        if shortline {
            let mut sbetm2 = sq(sbet1 + sbet2);
            sbetm2 /= sbetm2 + sq(cbet1 + cbet2);
            dnm = libm::sqrt(1.0 + self.ep2 * sbetm2);
            let omg12 = lam12 / (self.f1 * dnm);
            somg12 = libm::sin(omg12);
            comg12 = libm::cos(omg12);
        } else {
            somg12 = slam12;
            comg12 = clam12;
        }

        let mut salp1 = cbet2 * somg12;
        let mut calp1 = if comg12 >= 0.0 {
            sbet12 + cbet2 * sbet1 * sq(somg12) / (1.0 + comg12)
        } else {
            sbet12a - cbet2 * sbet1 * sq(somg12) / (1.0 - comg12)
        };

        let ssig12 = libm::hypot(salp1, calp1);
        let csig12 = sbet1 * sbet2 + cbet1 * cbet2 * comg12;

        if shortline && ssig12 < self.etol2 {
            // really short lines
            salp2 = cbet1 * somg12;
            calp2 = sbet12
                - cbet1
                    * sbet2
                    * (if comg12 >= 0.0 {
                        sq(somg12) / (1.0 + comg12)
                    } else {
                        1.0 - comg12
                    });
            (salp2, calp2) = norm(salp2, calp2);
            sig12 = libm::atan2(ssig12, csig12);
        } else if libm::fabs(self.n) > 0.1
            || csig12 >= 0.0
            || ssig12 >= 6.0 * libm::fabs(self.n) * core::f64::consts::PI * sq(cbet1)
        {
            // the zeroth order spherical approximation is OK
        } else {
            // Scale lam12 and bet2 to x, y coordinate system where the
            // antipodal point is at the origin and x axis is along bet = 0.
            let x;
            let y;
            let lamscale;
            let lam12x = libm::atan2(-slam12, -clam12);
            if self.f >= 0.0 {
                let k2 = sq(sbet1) * self.ep2;
                let eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);
                lamscale = self.f * cbet1 * self.a3f(eps) * core::f64::consts::PI;
                let betscale = lamscale * cbet1;
                x = lam12x / lamscale;
                y = sbet12a / betscale;
            } else {
                let cbet12a = cbet2 * cbet1 - sbet2 * sbet1;
                let bet12a = libm::atan2(sbet12a, cbet12a);
                // in the case of lon12 = 180, this repeats a calculation made
                // in gen_inverse
                let lengths = self.lengths(
                    self.n,
                    core::f64::consts::PI + bet12a,
                    sbet1,
                    -cbet1,
                    dn1,
                    sbet2,
                    cbet2,
                    dn2,
                    cbet1,
                    cbet2,
                    REDUCED_LENGTH,
                    c1a,
                    c2a,
                );
                x = -1.0 + lengths.m12b / (cbet1 * cbet2 * lengths.m0 * core::f64::consts::PI);
                let betscale = if x < -0.01 {
                    sbet12a / x
                } else {
                    -self.f * sq(cbet1) * core::f64::consts::PI
                };
                lamscale = betscale / cbet1;
                y = lam12x / lamscale;
            }

            if y > -self.tol1 && x > -1.0 - self.xthresh {
                // strip near cut
                if self.f >= 0.0 {
                    salp1 = libm::fmin(-x, 1.0);
                    calp1 = -libm::sqrt(1.0 - sq(salp1));
                } else {
                    calp1 = libm::fmax(x, if x > -self.tol1 { 0.0 } else { -1.0 });
                    salp1 = libm::sqrt(1.0 - sq(calp1));
                }
            } else {
                // Estimate alp1 by solving the astroid problem; this is
                // accurate to O(f) for f > 0 and O(f^2) for f < 0.
                let k = astroid(x, y);
                let omg12a = lamscale
                    * if self.f >= 0.0 {
                        -x * k / (1.0 + k)
                    } else {
                        -y * (1.0 + k) / k
                    };
                somg12 = libm::sin(omg12a);
                comg12 = -libm::cos(omg12a);
                // update spherical estimate of alp1 using omg12 instead of
                // lam12
                salp1 = cbet2 * somg12;
                calp1 = sbet12a - cbet2 * sbet1 * sq(somg12) / (1.0 - comg12);
            }
        }

        // sanity check on the starting guess, NaN included
        if salp1 > 0.0 {
            (salp1, calp1) = norm(salp1, calp1);
        } else {
            salp1 = 1.0;
            calp1 = 0.0;
        }

        InverseStart {
            sig12,
            salp1,
            calp1,
            salp2,
            calp2,
            dnm,
        }
    }

    /// The longitude difference implied by a trial azimuth at the first
    /// point, minus the target, in radians.
    /// CFF Karney, Eqs. 5 to 11.
    #[allow(clippy::similar_names)]
    pub(crate) fn lambda12(
        &self,
        sbet1: f64,
        cbet1: f64,
        dn1: f64,
        sbet2: f64,
        cbet2: f64,
        dn2: f64,
        salp1: f64,
        calp1: f64,
        slam120: f64,
        clam120: f64,
        diffp: bool,
        c1a: &mut [f64; 7],
        c2a: &mut [f64; 7],
        c3a: &mut [f64; 6],
    ) -> Lambda12 {
        let calp1 = if sbet1 == 0.0 && calp1 == 0.0 {
            // break the degeneracy of the equatorial line
            -self.tiny
        } else {
            calp1
        };

        let salp0 = salp1 * cbet1;
        let calp0 = libm::hypot(calp1, salp1 * sbet1);

        let mut ssig1 = sbet1;
        let somg1 = salp0 * sbet1;
        let mut csig1 = calp1 * cbet1;
        let comg1 = calp1 * cbet1;
        (ssig1, csig1) = norm(ssig1, csig1);

        // Enforce symmetries in the case abs(bet2) = -bet1. Otherwise the
        // sign of salp2 is decided by the sign of salp0.
        let salp2 = if cbet2 != cbet1 { salp0 / cbet2 } else { salp1 };
        let calp2 = if cbet2 != cbet1 || libm::fabs(sbet2) != -sbet1 {
            libm::sqrt(
                sq(calp1 * cbet1)
                    + if cbet1 < -sbet1 {
                        (cbet2 - cbet1) * (cbet1 + cbet2)
                    } else {
                        (sbet1 - sbet2) * (sbet1 + sbet2)
                    },
            ) / cbet2
        } else {
            libm::fabs(calp1)
        };

        let mut ssig2 = sbet2;
        let somg2 = salp0 * sbet2;
        let mut csig2 = calp2 * cbet2;
        let comg2 = calp2 * cbet2;
        (ssig2, csig2) = norm(ssig2, csig2);

        let sig12 = libm::atan2(
            libm::fmax(csig1 * ssig2 - ssig1 * csig2, 0.0),
            csig1 * csig2 + ssig1 * ssig2,
        );
        let somg12 = libm::fmax(comg1 * somg2 - somg1 * comg2, 0.0);
        let comg12 = comg1 * comg2 + somg1 * somg2;
        let eta = libm::atan2(
            somg12 * clam120 - comg12 * slam120,
            comg12 * clam120 + somg12 * slam120,
        );

        let k2 = sq(calp0) * self.ep2;
        let eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);
        *c3a = self.c3f(eps);
        let b312 = coefficients::sine_series(ssig2, csig2, c3a)
            - coefficients::sine_series(ssig1, csig1, c3a);
        let domg12 = -self.f * self.a3f(eps) * salp0 * (sig12 + b312);
        let lam12 = eta + domg12;

        let dlam12 = if diffp {
            if calp2 == 0.0 {
                -2.0 * self.f1 * dn1 / sbet1
            } else {
                let lengths = self.lengths(
                    eps,
                    sig12,
                    ssig1,
                    csig1,
                    dn1,
                    ssig2,
                    csig2,
                    dn2,
                    cbet1,
                    cbet2,
                    REDUCED_LENGTH,
                    c1a,
                    c2a,
                );
                lengths.m12b * self.f1 / (calp2 * cbet2)
            }
        } else {
            f64::NAN
        };

        Lambda12 {
            lam12,
            salp2,
            calp2,
            sig12,
            ssig1,
            csig1,
            ssig2,
            csig2,
            eps,
            domg12,
            dlam12,
        }
    }

    /// Solve the inverse problem, returning the azimuths as sine/cosine
    /// pairs.
    ///
    /// Meridional and equatorial geodesics are dispatched directly;
    /// everything else goes through Newton's method on `lambda12` with
    /// bisection keeping the iteration bracketed. The iteration count is
    /// bounded and the best root found so far is accepted silently.
    #[allow(clippy::similar_names)]
    #[allow(clippy::too_many_lines)]
    pub(crate) fn gen_inverse(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        outmask: u64,
    ) -> InverseSolution {
        let outmask = outmask & OUT_MASK;
        let mut result = InverseSolution {
            a12: f64::NAN,
            s12: f64::NAN,
            salp1: f64::NAN,
            calp1: f64::NAN,
            salp2: f64::NAN,
            calp2: f64::NAN,
            m12: f64::NAN,
            scale12: f64::NAN,
            scale21: f64::NAN,
            area12: f64::NAN,
        };

        // compute longitude difference carefully; result is in [-180, 180]
        let (mut lon12, mut lon12s) = ang_diff(lon1, lon2);
        let mut lonsign = if lon12 >= 0.0 { 1.0 } else { -1.0 };

        // make the longitude difference positive
        lon12 = lonsign * ang_round(lon12);
        lon12s = ang_round((180.0 - lon12) - lonsign * lon12s);
        let lam12 = lon12.to_radians();
        let (slam12, clam12) = if lon12 > 90.0 {
            let (s, c) = sincosd(lon12s);
            (s, -c)
        } else {
            sincosd(lon12)
        };

        let mut lat1 = ang_round(lat_fix(lat1));
        let mut lat2 = ang_round(lat_fix(lat2));

        // swap points so that the point with higher |latitude| is point 1
        let swapp = if libm::fabs(lat1) < libm::fabs(lat2) {
            -1.0
        } else {
            1.0
        };
        if swapp < 0.0 {
            lonsign *= -1.0;
            core::mem::swap(&mut lat1, &mut lat2);
        }

        // make lat1 <= 0
        let latsign = if lat1 < 0.0 { 1.0 } else { -1.0 };
        lat1 *= latsign;
        lat2 *= latsign;

        let (mut sbet1, mut cbet1) = sincosd(lat1);
        sbet1 *= self.f1;
        (sbet1, cbet1) = norm(sbet1, cbet1);
        cbet1 = libm::fmax(cbet1, self.tiny);

        let (mut sbet2, mut cbet2) = sincosd(lat2);
        sbet2 *= self.f1;
        (sbet2, cbet2) = norm(sbet2, cbet2);
        cbet2 = libm::fmax(cbet2, self.tiny);

        // If cbet1 < -sbet1, then cbet2 - cbet1 is a sensitive measure of
        // |bet1| - |bet2|; otherwise |sbet2| + sbet1 is. Enforce symmetry
        // for equal latitudes so azi1 and azi2 come out consistently.
        if cbet1 < -sbet1 {
            if cbet2 == cbet1 {
                sbet2 = if sbet2 < 0.0 { sbet1 } else { -sbet1 };
            }
        } else if libm::fabs(sbet2) == -sbet1 {
            cbet2 = cbet1;
        }

        let dn1 = libm::sqrt(1.0 + self.ep2 * sq(sbet1));
        let dn2 = libm::sqrt(1.0 + self.ep2 * sq(sbet2));

        let mut c1a = [0.0; 7];
        let mut c2a = [0.0; 7];
        let mut c3a = [0.0; 6];

        let mut meridian = lat1 == -90.0 || slam12 == 0.0;
        let mut calp1 = 0.0;
        let mut salp1 = 0.0;
        let mut calp2 = 0.0;
        let mut salp2 = 0.0;
        let mut ssig1 = 0.0;
        let mut csig1 = 0.0;
        let mut ssig2 = 0.0;
        let mut csig2 = 0.0;
        let mut sig12 = 0.0;
        let mut s12x = 0.0;
        let mut m12x = 0.0;

        if meridian {
            // the geodesic might lie on a meridian
            calp1 = clam12;
            salp1 = slam12;
            calp2 = 1.0;
            salp2 = 0.0;

            ssig1 = sbet1;
            csig1 = calp1 * cbet1;
            ssig2 = sbet2;
            csig2 = calp2 * cbet2;

            sig12 = libm::atan2(
                libm::fmax(csig1 * ssig2 - ssig1 * csig2, 0.0),
                csig1 * csig2 + ssig1 * ssig2,
            );
            let lengths = self.lengths(
                self.n,
                sig12,
                ssig1,
                csig1,
                dn1,
                ssig2,
                csig2,
                dn2,
                cbet1,
                cbet2,
                outmask | DISTANCE | REDUCED_LENGTH,
                &mut c1a,
                &mut c2a,
            );
            s12x = lengths.s12b;
            m12x = lengths.m12b;
            result.scale12 = lengths.scale12;
            result.scale21 = lengths.scale21;

            if sig12 < 1.0 || m12x >= 0.0 {
                if sig12 < 3.0 * self.tiny {
                    sig12 = 0.0;
                    m12x = 0.0;
                    s12x = 0.0;
                }
                m12x *= self.b;
                s12x *= self.b;
                result.a12 = sig12.to_degrees();
            } else {
                // m12 < 0, prolate and too close to anti-podal
                meridian = false;
            }
        }

        // somg12 > 1 marks that it needs to be calculated
        let mut somg12 = 2.0;
        let mut comg12 = 0.0;
        let mut omg12 = 0.0;
        let mut eps = 0.0;

        if !meridian && sbet1 == 0.0 && (self.f <= 0.0 || lon12s >= self.f * 180.0) {
            // the geodesic runs along the equator
            calp1 = 0.0;
            calp2 = 0.0;
            salp1 = 1.0;
            salp2 = 1.0;

            s12x = self.a * lam12;
            sig12 = lam12 / self.f1;
            omg12 = lam12 / self.f1;
            m12x = self.b * libm::sin(sig12);
            if outmask & GEODESIC_SCALE != 0 {
                result.scale12 = libm::cos(sig12);
                result.scale21 = libm::cos(sig12);
            }
            result.a12 = lon12 / self.f1;
        } else if !meridian {
            // Both points lie within a hemisphere bounded by a meridian and
            // the geodesic is neither meridional nor equatorial.
            let start = self.inverse_start(
                sbet1, cbet1, dn1, sbet2, cbet2, dn2, lam12, slam12, clam12, &mut c1a, &mut c2a,
            );
            sig12 = start.sig12;
            salp1 = start.salp1;
            calp1 = start.calp1;
            salp2 = start.salp2;
            calp2 = start.calp2;
            let dnm = start.dnm;

            if sig12 >= 0.0 {
                // a short line, the spherical solution stands
                s12x = sig12 * self.b * dnm;
                m12x = sq(dnm) * self.b * libm::sin(sig12 / dnm);
                if outmask & GEODESIC_SCALE != 0 {
                    result.scale12 = libm::cos(sig12 / dnm);
                    result.scale21 = libm::cos(sig12 / dnm);
                }
                result.a12 = sig12.to_degrees();
                omg12 = lam12 / (self.f1 * dnm);
            } else {
                // Newton's method, bracketed by (salp1a, calp1a) and
                // (salp1b, calp1b), bisecting when the step leaves the
                // bracket.
                let mut tripn = false;
                let mut tripb = false;
                let mut salp1a = self.tiny;
                let mut calp1a = 1.0;
                let mut salp1b = self.tiny;
                let mut calp1b = -1.0;
                let mut domg12 = 0.0;

                for numit in 0..self.maxit2 {
                    let w = self.lambda12(
                        sbet1,
                        cbet1,
                        dn1,
                        sbet2,
                        cbet2,
                        dn2,
                        salp1,
                        calp1,
                        slam12,
                        clam12,
                        numit < self.maxit1,
                        &mut c1a,
                        &mut c2a,
                        &mut c3a,
                    );
                    let v = w.lam12;
                    salp2 = w.salp2;
                    calp2 = w.calp2;
                    sig12 = w.sig12;
                    ssig1 = w.ssig1;
                    csig1 = w.csig1;
                    ssig2 = w.ssig2;
                    csig2 = w.csig2;
                    eps = w.eps;
                    domg12 = w.domg12;
                    let dv = w.dlam12;

                    // 2 * tol0 is approximately 1 ulp for a number in [0, pi];
                    // relax the convergence test after the trip through the
                    // vertex of the parabola. Written so that NaN v breaks
                    // the loop too.
                    let thresh = if tripn { 8.0 } else { 1.0 } * self.tol0;
                    if tripb || !(libm::fabs(v) >= thresh) {
                        break;
                    }
                    // update the bracketing values
                    if v > 0.0 && (numit > self.maxit1 || calp1 / salp1 > calp1b / salp1b) {
                        salp1b = salp1;
                        calp1b = calp1;
                    } else if v < 0.0 && (numit > self.maxit1 || calp1 / salp1 < calp1a / salp1a) {
                        salp1a = salp1;
                        calp1a = calp1;
                    }

                    if numit < self.maxit1 && dv > 0.0 {
                        let dalp1 = -v / dv;
                        let sdalp1 = libm::sin(dalp1);
                        let cdalp1 = libm::cos(dalp1);
                        let nsalp1 = salp1 * cdalp1 + calp1 * sdalp1;
                        if nsalp1 > 0.0 && libm::fabs(dalp1) < core::f64::consts::PI {
                            calp1 = calp1 * cdalp1 - salp1 * sdalp1;
                            salp1 = nsalp1;
                            (salp1, calp1) = norm(salp1, calp1);
                            // In some regimes we don't get quadratic
                            // convergence because the slope goes to zero, so
                            // base the trip condition on epsilon instead of
                            // sqrt(epsilon).
                            tripn = libm::fabs(v) <= 16.0 * self.tol0;
                            continue;
                        }
                    }

                    // Either dv was not positive or the updated value was
                    // out of range; bisect instead.
                    salp1 = (salp1a + salp1b) / 2.0;
                    calp1 = (calp1a + calp1b) / 2.0;
                    (salp1, calp1) = norm(salp1, calp1);
                    tripn = false;
                    tripb = libm::fabs(salp1a - salp1) + (calp1a - calp1) < self.tolb
                        || libm::fabs(salp1 - salp1b) + (calp1 - calp1b) < self.tolb;
                }

                let lengthmask = outmask
                    | if outmask & (REDUCED_LENGTH | GEODESIC_SCALE) != 0 {
                        DISTANCE
                    } else {
                        EMPTY
                    };
                let lengths = self.lengths(
                    eps, sig12, ssig1, csig1, dn1, ssig2, csig2, dn2, cbet1, cbet2, lengthmask,
                    &mut c1a, &mut c2a,
                );
                s12x = lengths.s12b;
                m12x = lengths.m12b;
                result.scale12 = lengths.scale12;
                result.scale21 = lengths.scale21;

                m12x *= self.b;
                s12x *= self.b;
                result.a12 = sig12.to_degrees();
                if outmask & AREA != 0 {
                    // omg12 = lam12 - domg12
                    let sdomg12 = libm::sin(domg12);
                    let cdomg12 = libm::cos(domg12);
                    somg12 = slam12 * cdomg12 - clam12 * sdomg12;
                    comg12 = clam12 * cdomg12 + slam12 * sdomg12;
                }
            }
        }

        if outmask & DISTANCE != 0 {
            result.s12 = 0.0 + s12x;
        }
        if outmask & REDUCED_LENGTH != 0 {
            result.m12 = 0.0 + m12x;
        }

        if outmask & AREA != 0 {
            let salp0 = salp1 * cbet1;
            let calp0 = libm::hypot(calp1, salp1 * sbet1);
            if calp0 != 0.0 && salp0 != 0.0 {
                ssig1 = sbet1;
                csig1 = calp1 * cbet1;
                ssig2 = sbet2;
                csig2 = calp2 * cbet2;
                let k2 = sq(calp0) * self.ep2;
                eps = k2 / (2.0 * (1.0 + libm::sqrt(1.0 + k2)) + k2);
                // the area between the geodesic and the equator,
                // CFF Karney, Eq. 60
                let a4 = sq(self.a) * calp0 * salp0 * self.e2;
                (ssig1, csig1) = norm(ssig1, csig1);
                (ssig2, csig2) = norm(ssig2, csig2);
                let c4a = self.c4f(eps);
                let b41 = coefficients::cosine_series(ssig1, csig1, &c4a);
                let b42 = coefficients::cosine_series(ssig2, csig2, &c4a);
                result.area12 = a4 * (b42 - b41);
            } else {
                // avoid problems with indeterminate sig1, sig2 on the equator
                result.area12 = 0.0;
            }

            if !meridian && somg12 > 1.0 {
                somg12 = libm::sin(omg12);
                comg12 = libm::cos(omg12);
            }

            let alp12 = if !meridian && comg12 > -0.7071 && sbet2 - sbet1 < 1.75 {
                // omg12 and lat difference both small: use
                // tan(Gamma/2) = tan(omg12/2) *
                // (tan(bet1/2) + tan(bet2/2)) / (1 + tan(bet1/2)*tan(bet2/2))
                let domg12 = 1.0 + comg12;
                let dbet1 = 1.0 + cbet1;
                let dbet2 = 1.0 + cbet2;
                2.0 * libm::atan2(
                    somg12 * (sbet1 * dbet2 + sbet2 * dbet1),
                    domg12 * (sbet1 * sbet2 + dbet1 * dbet2),
                )
            } else {
                // alp12 = alp2 - alp1, used in atan2 so no need to normalize
                let mut salp12 = salp2 * calp1 - calp2 * salp1;
                let mut calp12 = calp2 * calp1 + salp2 * salp1;
                // Nearly antipodal geodesics give salp12 = 0 and calp12 = -1;
                // set salp12 so that the east-going geodesic gives area/2.
                if salp12 == 0.0 && calp12 < 0.0 {
                    salp12 = self.tiny * calp1;
                    calp12 = -1.0;
                }
                libm::atan2(salp12, calp12)
            };
            result.area12 += self.c2 * alp12;
            result.area12 *= swapp * lonsign * latsign;
            // convert -0 to 0
            result.area12 += 0.0;
        }

        // convert calp, salp to the original point order and signs
        if swapp < 0.0 {
            core::mem::swap(&mut salp1, &mut salp2);
            core::mem::swap(&mut calp1, &mut calp2);
            if outmask & GEODESIC_SCALE != 0 {
                core::mem::swap(&mut result.scale12, &mut result.scale21);
            }
        }
        result.salp1 = salp1 * swapp * lonsign;
        result.calp1 = calp1 * swapp * latsign;
        result.salp2 = salp2 * swapp * lonsign;
        result.calp2 = calp2 * swapp * latsign;

        result
    }

    /// Solve the inverse problem with the azimuths in degrees.
    pub(crate) fn gen_inverse_azi(
        &self,
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
        outmask: u64,
    ) -> InverseAzimuths {
        let outmask = outmask & OUT_MASK;
        let solution = self.gen_inverse(lat1, lon1, lat2, lon2, outmask);
        let (azi1, azi2) = if outmask & AZIMUTH != 0 {
            (
                atan2d(solution.salp1, solution.calp1),
                atan2d(solution.salp2, solution.calp2),
            )
        } else {
            (f64::NAN, f64::NAN)
        };

        InverseAzimuths {
            a12: solution.a12,
            s12: solution.s12,
            azi1,
            azi2,
            m12: solution.m12,
            scale12: solution.scale12,
            scale21: solution.scale21,
            area12: solution.area12,
        }
    }

    /// Solve the direct problem by positioning a transient `GeodesicLine`.
    ///
    /// `s12_a12` is a distance in metres, or an arc length in degrees when
    /// `arcmode` is set.
    pub(crate) fn gen_direct(
        &self,
        lat1: f64,
        lon1: f64,
        azi1: f64,
        arcmode: bool,
        s12_a12: f64,
        outmask: u64,
    ) -> Position {
        let outmask = if arcmode {
            outmask
        } else {
            // automatically supply DISTANCE_IN
            outmask | DISTANCE_IN
        };
        let line = GeodesicLine::new_raw(self, lat1, lon1, azi1, outmask, f64::NAN, f64::NAN);
        line.gen_position(arcmode, s12_a12, outmask)
    }
}
