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

//! The accumulator module provides an extended-precision running sum,
//! used by the polygon routines to total perimeters and areas without
//! catastrophic cancellation.
//!
//! The sum is held as two floating point limbs `(s, t)` such that `s + t`
//! represents the total to higher precision than a single `f64`. The limbs
//! are kept decreasing and non-adjacent by Shewchuk's error-free
//! transformation, see
//! [Adaptive Precision Floating-Point Arithmetic](https://www.cs.cmu.edu/afs/cs/project/quake/public/papers/robust-arithmetic.ps).
//!
//! The representation still carries small errors: up to 1 ulp of the
//! less significant limb per `add` and a possible further 1 ulp on the
//! reported sum.

use crate::geomath;

/// An extended-precision running sum of `f64` values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Accumulator {
    /// The more significant limb of the sum.
    s: f64,
    /// The less significant limb of the sum.
    t: f64,
}

impl Accumulator {
    /// Construct an `Accumulator` holding zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { s: 0.0, t: 0.0 }
    }

    /// Construct an `Accumulator` from an initial value.
    #[must_use]
    pub const fn from_value(s: f64) -> Self {
        Self { s, t: 0.0 }
    }

    /// Set the sum to `s`, discarding the less significant limb.
    pub fn set(&mut self, s: f64) {
        self.s = s;
        self.t = 0.0;
    }

    /// Add a value to the sum.
    pub fn add(&mut self, y: f64) {
        // Absorb y at the least significant end first, then renormalize
        // into s. The exact total is held as [s, t, u] in decreasing,
        // non-adjacent order.
        let (y, u) = geomath::sum(y, self.t);
        let (s, t) = geomath::sum(y, self.s);
        self.s = s;
        self.t = t;

        if self.s == 0.0 {
            // This implies t == 0, so the result is u.
            self.s = u;
        } else {
            self.t += u;
        }
    }

    /// The sum if `y` were hypothetically added, without mutating the
    /// accumulator.
    #[must_use]
    pub fn sum(&self, y: f64) -> f64 {
        if y == 0.0 {
            self.s
        } else {
            let mut b = *self;
            b.add(y);
            b.s
        }
    }

    /// The accumulated value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.s
    }

    /// Negate the sum.
    pub fn negate(&mut self) {
        self.s = -self.s;
        self.t = -self.t;
    }

    /// Reduce the sum to its remainder on division by `y`.
    pub fn remainder(&mut self, y: f64) {
        self.s = libm::remainder(self.s, y);
        self.add(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_basics() {
        let mut acc = Accumulator::new();
        assert_eq!(0.0, acc.value());

        acc.add(2.5);
        acc.add(1.25);
        assert_eq!(3.75, acc.value());

        assert_eq!(4.0, acc.sum(0.25));
        // sum() must not mutate
        assert_eq!(3.75, acc.value());

        acc.negate();
        assert_eq!(-3.75, acc.value());

        acc.set(7.0);
        assert_eq!(7.0, acc.value());
    }

    #[test]
    fn test_accumulator_compensation() {
        // A large value followed by many small compensating values loses
        // precision under naive summation but not in the accumulator.
        let mut acc = Accumulator::from_value(1e16);
        let mut naive = 1e16;
        for _ in 0..100 {
            acc.add(0.1);
            naive += 0.1;
        }
        acc.add(-1e16);
        naive += -1e16;

        assert!(libm::fabs(acc.value() - 10.0) <= f64::EPSILON * 10.0);
        assert!(libm::fabs(naive - 10.0) > 1.0);
    }

    #[test]
    fn test_accumulator_remainder() {
        let mut acc = Accumulator::from_value(9.0);
        acc.remainder(4.0);
        assert_eq!(1.0, acc.value());

        let mut acc = Accumulator::from_value(10.0);
        acc.remainder(4.0);
        // remainder rounds to nearest, so 10 mod 4 -> 2 (or -2)
        assert_eq!(2.0, libm::fabs(acc.value()));
    }
}
