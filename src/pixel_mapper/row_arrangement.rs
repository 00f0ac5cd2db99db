//! Put panels in a single row that is physically wired as several parallel chains.
//!
//! Six panels in three parallel chains of two (`chain=2`, `parallel=3`) normally look like:
//!
//! ```text
//! [<][<]
//! [<][<]
//! [<][<]
//! ```
//!
//! and can be used as one long row:
//!
//! ```text
//! [<][<][<][<][<][<]
//! ```
//!
//! The `H` and `V` band modes drop the two end panels (the top and bottom of a
//! cube) so text can scroll around only the side faces of the cube.

use super::params::{ParamIssue, parse_letter};
use super::{Configure, Configured, PixelMapper, Topology};
use crate::{Error, Result};

/// Which faces of the row stay visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowMode {
    /// Every panel, empty parameter.
    #[default]
    Normal,
    /// Horizontal cube band, parameter `H`.
    BandHorizontal,
    /// Vertical cube band, parameter `V`.
    BandVertical,
}

/// Lay parallel chains end to end as one long row. Needs `parallel >= 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowArrangement {
    topology: Topology,
    mode: RowMode,
}

impl RowArrangement {
    /// The configured mode.
    #[must_use]
    pub const fn mode(&self) -> RowMode {
        self.mode
    }
}

impl Configure for RowArrangement {
    const NAME: &'static str = "Row-mapper";

    fn configure(topology: Topology, param: &str) -> Result<Configured<Self>> {
        // A single chain would technically work, but there is nothing to rearrange.
        if topology.parallel() < 2 {
            return Err(Error::ParallelTooSmall {
                mapper: Self::NAME,
                parallel: topology.parallel(),
            });
        }
        let invalid = |issue| Error::InvalidParameter {
            mapper: Self::NAME,
            issue,
        };
        let mode = match parse_letter(param).map_err(invalid)? {
            None => RowMode::Normal,
            Some('H') => RowMode::BandHorizontal,
            Some('V') => RowMode::BandVertical,
            Some(letter) => return Err(invalid(ParamIssue::UnknownLetter { letter })),
        };
        Ok(Configured::new(Self { topology, mode }))
    }
}

impl PixelMapper for RowArrangement {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        let parallel = self.topology.parallel();
        let full_width = matrix_width.saturating_mul(parallel);
        let visible_width = match self.mode {
            RowMode::Normal => full_width,
            RowMode::BandHorizontal | RowMode::BandVertical => {
                let panel_width = self.topology.panel_size(matrix_width, matrix_height).width;
                full_width.saturating_sub(panel_width.saturating_mul(2))
            }
        };
        Ok((visible_width, matrix_height / parallel))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        let panel = self.topology.panel_size(matrix_width, matrix_height);
        let x = match self.mode {
            RowMode::Normal => x,
            RowMode::BandHorizontal | RowMode::BandVertical => x.saturating_add(panel.width),
        };
        let (row, matrix_x) = match (x.checked_div(matrix_width), x.checked_rem(matrix_width)) {
            (Some(row), Some(matrix_x)) => (row, matrix_x),
            _ => (0, x),
        };
        (matrix_x, row.saturating_mul(panel.height).saturating_add(y))
    }
}

#[cfg(test)]
mod tests {
    use super::{RowArrangement, RowMode};
    use crate::pixel_mapper::{Configure, PixelMapper, Topology};
    use crate::Error;

    fn row(chain: u32, parallel: u32, param: &str) -> crate::Result<RowArrangement> {
        RowArrangement::configure(Topology::new(chain, parallel)?, param)
            .map(|configured| configured.into_mapper())
    }

    #[test]
    fn needs_two_parallel_chains() {
        assert_eq!(
            row(4, 1, ""),
            Err(Error::ParallelTooSmall {
                mapper: "Row-mapper",
                parallel: 1
            })
        );
    }

    #[test]
    fn parses_modes() {
        assert_eq!(row(2, 3, "").map(|r| r.mode()), Ok(RowMode::Normal));
        assert_eq!(row(2, 3, "h").map(|r| r.mode()), Ok(RowMode::BandHorizontal));
        assert_eq!(row(2, 3, "V").map(|r| r.mode()), Ok(RowMode::BandVertical));
        assert!(row(2, 3, "X").is_err());
        assert!(row(2, 3, "HV").is_err());
    }

    #[test]
    fn normal_size_uses_floor_division() -> crate::Result<()> {
        // 3 parallel rows of 192x32 total height: height floors to 10.
        assert_eq!(row(6, 3, "")?.visible_size(192, 32)?, (576, 10));
        assert_eq!(row(2, 3, "")?.visible_size(64, 96)?, (192, 32));
        Ok(())
    }

    #[test]
    fn band_modes_drop_two_panels() -> crate::Result<()> {
        assert_eq!(row(2, 3, "H")?.visible_size(64, 96)?, (128, 32));
        assert_eq!(row(2, 3, "V")?.visible_size(64, 96)?, (128, 32));
        Ok(())
    }

    #[test]
    fn normal_mode_wraps_onto_the_next_chain() -> crate::Result<()> {
        let mapper = row(2, 3, "")?;
        assert_eq!(mapper.to_physical(64, 96, 0, 0), (0, 0));
        assert_eq!(mapper.to_physical(64, 96, 63, 5), (63, 5));
        assert_eq!(mapper.to_physical(64, 96, 64, 5), (0, 37));
        assert_eq!(mapper.to_physical(64, 96, 191, 31), (63, 95));
        Ok(())
    }

    #[test]
    fn band_mode_skips_the_first_panel() -> crate::Result<()> {
        let mapper = row(2, 3, "V")?;
        assert_eq!(mapper.to_physical(64, 96, 0, 0), (32, 0));
        assert_eq!(mapper.to_physical(64, 96, 32, 0), (0, 32));
        assert_eq!(mapper.to_physical(64, 96, 127, 31), (31, 95));
        Ok(())
    }
}
