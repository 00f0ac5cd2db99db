//! Mirror the whole display left-right (`H`) or top-bottom (`V`).

use super::params::{ParamIssue, parse_letter};
use super::rotate::flip;
use super::{Configure, Configured, PixelMapper, Topology};
use crate::{Error, Result};

/// Which way [`Mirror`] reflects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MirrorAxis {
    /// Reflect `x` about the vertical centerline (`"H"`, the default).
    #[default]
    Horizontal,
    /// Reflect `y` about the horizontal centerline (`"V"`).
    Vertical,
}

/// Mirror the whole display. Parameter: empty or `H` for horizontal, `V` for vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mirror {
    axis: MirrorAxis,
}

impl Mirror {
    /// Mirror along `axis`.
    #[must_use]
    pub const fn new(axis: MirrorAxis) -> Self {
        Self { axis }
    }

    /// The configured axis.
    #[must_use]
    pub const fn axis(&self) -> MirrorAxis {
        self.axis
    }
}

impl Configure for Mirror {
    const NAME: &'static str = "Mirror";

    fn configure(_topology: Topology, param: &str) -> Result<Configured<Self>> {
        let axis = match parse_letter(param) {
            Ok(None | Some('H')) => MirrorAxis::Horizontal,
            Ok(Some('V')) => MirrorAxis::Vertical,
            Ok(Some(letter)) => {
                return Err(Error::InvalidParameter {
                    mapper: Self::NAME,
                    issue: ParamIssue::UnknownLetter { letter },
                });
            }
            Err(issue) => {
                return Err(Error::InvalidParameter {
                    mapper: Self::NAME,
                    issue,
                });
            }
        };
        Ok(Configured::new(Self::new(axis)))
    }
}

impl PixelMapper for Mirror {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        Ok((matrix_width, matrix_height))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        match self.axis {
            MirrorAxis::Horizontal => (flip(matrix_width, x), y),
            MirrorAxis::Vertical => (x, flip(matrix_height, y)),
        }
    }
}
