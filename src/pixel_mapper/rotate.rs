//! Rotate the whole display by a multiple of 90 degrees, clockwise.
//!
//! Quarter turns swap the visible width and height.

use super::params::ParamIssue;
use super::{Configure, Configured, PixelMapper, Topology};
use crate::{Error, Result};

/// A rotation by a whole number of quarter turns, clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Quarter {
    /// 0°.
    #[default]
    None,
    /// 90°.
    Cw90,
    /// 180°.
    Half,
    /// 270°.
    Cw270,
}

impl Quarter {
    /// Normalize any multiple of 90 (negative too) into a quarter turn.
    ///
    /// # Errors
    ///
    /// Returns [`ParamIssue::NotMultipleOf90`] for anything else.
    pub fn from_degrees(degrees: i64) -> core::result::Result<Self, ParamIssue> {
        if degrees % 90 != 0 {
            return Err(ParamIssue::NotMultipleOf90 { angle: degrees });
        }
        Ok(match degrees.rem_euclid(360) {
            90 => Self::Cw90,
            180 => Self::Half,
            270 => Self::Cw270,
            _ => Self::None,
        })
    }

    /// The angle in degrees, in `{0, 90, 180, 270}`.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Cw90 => 90,
            Self::Half => 180,
            Self::Cw270 => 270,
        }
    }

    /// `true` for 90° and 270°, which swap width and height.
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Cw90 | Self::Cw270)
    }

    /// Rotate `(x, y)` inside a `width` × `height` box.
    ///
    /// The box is the physical one; for 90° and 270° the visible box is
    /// `height` × `width`.
    #[inline]
    #[must_use]
    pub const fn apply(self, width: u32, height: u32, x: u32, y: u32) -> (u32, u32) {
        match self {
            Self::None => (x, y),
            Self::Cw90 => (flip(width, y), x),
            Self::Half => (flip(width, x), flip(height, y)),
            Self::Cw270 => (y, flip(height, x)),
        }
    }
}

/// `extent - 1 - value`, clamped at zero.
#[inline]
pub(crate) const fn flip(extent: u32, value: u32) -> u32 {
    extent.saturating_sub(1).saturating_sub(value)
}

/// Rotate the whole display. Parameter: an integer multiple of 90, negative allowed, empty = 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rotate {
    quarter: Quarter,
}

impl Rotate {
    /// Rotate by `quarter`.
    #[must_use]
    pub const fn new(quarter: Quarter) -> Self {
        Self { quarter }
    }

    /// The configured rotation.
    #[must_use]
    pub const fn quarter(&self) -> Quarter {
        self.quarter
    }
}

impl Configure for Rotate {
    const NAME: &'static str = "Rotate";

    fn configure(_topology: Topology, param: &str) -> Result<Configured<Self>> {
        if param.is_empty() {
            return Ok(Configured::new(Self::new(Quarter::None)));
        }
        let invalid = |issue| Error::InvalidParameter {
            mapper: Self::NAME,
            issue,
        };
        let degrees: i64 = param.parse().map_err(|_| {
            invalid(ParamIssue::NotANumber {
                token: super::params::token_text(param),
            })
        })?;
        let quarter = Quarter::from_degrees(degrees).map_err(invalid)?;
        Ok(Configured::new(Self::new(quarter)))
    }
}

impl PixelMapper for Rotate {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        if self.quarter.swaps_axes() {
            Ok((matrix_height, matrix_width))
        } else {
            Ok((matrix_width, matrix_height))
        }
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        self.quarter.apply(matrix_width, matrix_height, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{Quarter, Rotate};
    use crate::pixel_mapper::{Configure, ParamIssue, PixelMapper, Topology};
    use crate::Error;

    fn rotate(param: &str) -> crate::Result<Rotate> {
        Rotate::configure(Topology::new(2, 1)?, param).map(|configured| configured.into_mapper())
    }

    #[test]
    fn angles_normalize() {
        assert_eq!(rotate("").map(|r| r.quarter()), Ok(Quarter::None));
        assert_eq!(rotate("360").map(|r| r.quarter()), Ok(Quarter::None));
        assert_eq!(rotate("-90").map(|r| r.quarter()), Ok(Quarter::Cw270));
        assert_eq!(rotate("-450").map(|r| r.quarter()), Ok(Quarter::Cw270));
        assert_eq!(rotate("540").map(|r| r.quarter()), Ok(Quarter::Half));
    }

    #[test]
    fn rejects_bad_angles() {
        assert_eq!(
            rotate("45"),
            Err(Error::InvalidParameter {
                mapper: "Rotate",
                issue: ParamIssue::NotMultipleOf90 { angle: 45 },
            })
        );
        assert!(matches!(
            rotate("90deg"),
            Err(Error::InvalidParameter {
                issue: ParamIssue::NotANumber { .. },
                ..
            })
        ));
    }

    #[test]
    fn size_swaps_on_quarter_turns() -> crate::Result<()> {
        assert_eq!(rotate("90")?.visible_size(64, 32)?, (32, 64));
        assert_eq!(rotate("180")?.visible_size(64, 32)?, (64, 32));
        assert_eq!(rotate("270")?.visible_size(64, 32)?, (32, 64));
        Ok(())
    }

    #[test]
    fn corners_follow_the_rotation() -> crate::Result<()> {
        // Visible top-left corner lands on each physical corner in turn.
        assert_eq!(rotate("0")?.to_physical(64, 32, 0, 0), (0, 0));
        assert_eq!(rotate("90")?.to_physical(64, 32, 0, 0), (63, 0));
        assert_eq!(rotate("180")?.to_physical(64, 32, 0, 0), (63, 31));
        assert_eq!(rotate("270")?.to_physical(64, 32, 0, 0), (0, 31));
        Ok(())
    }
}
