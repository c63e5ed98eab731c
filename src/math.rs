use std::fmt;

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A point of the complex plane.
#[derive(Clone, Copy, Debug, PartialEq, Default, Encode, Decode, Serialize, Deserialize)]
pub struct C {
    pub re: f64,
    pub im: f64,
}

impl C {
    pub const ZERO: C = C { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        C { re, im }
    }

    pub fn abs_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude, `sqrt(re² + im²)`.
    pub fn abs(&self) -> f64 {
        self.abs_sq().sqrt()
    }

    pub fn add(&self, other: C) -> C {
        C::new(self.re + other.re, self.im + other.im)
    }

    pub fn sub(&self, other: C) -> C {
        C::new(self.re - other.re, self.im - other.im)
    }

    pub fn mul(&self, other: C) -> C {
        C::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re
        )
    }

    /// Multiply by a real scalar.
    pub fn scale(&self, k: f64) -> C {
        C::new(self.re * k, self.im * k)
    }
}

impl fmt::Display for C {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{} - {}i", self.re, -self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}
