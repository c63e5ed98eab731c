use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::math::C;

/// Rectangle of the complex plane, `low` is the lower-left corner and
/// `high` the upper-right one.
///
/// Nothing checks that `low` is actually below and left of `high`; an
/// inverted region just samples a mirrored or degenerate grid.
#[derive(Clone, Copy, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Region {
    pub low: C,
    pub high: C,
}

impl Region {
    pub fn new(low: C, high: C) -> Self {
        Region { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high.re - self.low.re
    }

    pub fn height(&self) -> f64 {
        self.high.im - self.low.im
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    pub fn center(&self) -> C {
        self.low.add(self.high).scale(0.5)
    }

    /// Scale both corners toward the plane origin so each side spans
    /// `1/factor` of its previous length.
    ///
    /// The origin stays fixed, not the region's center; see
    /// [`Region::zoom_about_center`] for that.
    pub fn zoom(&self, factor: f64) -> Region {
        let k = C::new(1.0 / factor, 0.0);
        Region::new(k.mul(self.low), k.mul(self.high))
    }

    pub fn translate(&self, offset: C) -> Region {
        Region::new(self.low.add(offset), self.high.add(offset))
    }

    /// Zoom keeping the center of the region in place.
    pub fn zoom_about_center(&self, factor: f64) -> Region {
        let center = self.center();
        self.translate(C::new(-center.re, -center.im))
            .zoom(factor)
            .translate(center)
    }
}
