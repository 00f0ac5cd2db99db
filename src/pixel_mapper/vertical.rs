//! Stack a chain of panels vertically instead of horizontally.
//!
//! The optional `Z` parameter turns every other panel upside down so the
//! cables between chained panels can stay short:
//!
//! ```text
//!  without Z          with Z
//! [ O < I ]          [ O < I ]
//!   ,---^              ^
//! [ O < I ]          [ I > O ]
//!   ,---^                  ^
//! [ O < I ]          [ O < I ]
//! ```

use super::rotate::flip;
use super::{Configure, Configured, PixelMapper, Topology};
use crate::Result;

/// Panel rows and columns swapped, optionally serpentine (`Z`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertical {
    topology: Topology,
    z: bool,
}

impl Vertical {
    /// `true` when every other panel is flipped.
    #[must_use]
    pub const fn flips_odd_panels(&self) -> bool {
        self.z
    }
}

impl Configure for Vertical {
    const NAME: &'static str = "V-mapper";

    fn configure(topology: Topology, param: &str) -> Result<Configured<Self>> {
        Ok(Configured::new(Self {
            topology,
            z: param.eq_ignore_ascii_case("Z"),
        }))
    }
}

impl PixelMapper for Vertical {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        let chain = self.topology.chain();
        let parallel = self.topology.parallel();
        Ok((
            matrix_width.saturating_mul(parallel) / chain,
            matrix_height.saturating_mul(chain) / parallel,
        ))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        let panel = self.topology.panel_size(matrix_width, matrix_height);
        // Visible panel columns are physical rows and visible panel rows are physical columns.
        let pixel = panel.locate(x, y);
        let needs_flipping = self.z && pixel.row % 2 == 1;
        let (local_x, local_y) = if needs_flipping {
            (flip(panel.width, pixel.local_x), flip(panel.height, pixel.local_y))
        } else {
            (pixel.local_x, pixel.local_y)
        };
        panel.place(pixel.row, pixel.column, local_x, local_y)
    }
}

#[cfg(test)]
mod tests {
    use super::Vertical;
    use crate::pixel_mapper::{Configure, PixelMapper, Topology};

    fn vertical(chain: u32, parallel: u32, param: &str) -> crate::Result<Vertical> {
        Vertical::configure(Topology::new(chain, parallel)?, param).map(|configured| configured.into_mapper())
    }

    #[test]
    fn only_z_enables_flipping() -> crate::Result<()> {
        assert!(vertical(3, 1, "z")?.flips_odd_panels());
        assert!(vertical(3, 1, "Z")?.flips_odd_panels());
        assert!(!vertical(3, 1, "")?.flips_odd_panels());
        assert!(!vertical(3, 1, "ZZ")?.flips_odd_panels());
        Ok(())
    }

    #[test]
    fn swaps_the_panel_grid() -> crate::Result<()> {
        // Three 64x32 panels in a chain (192x32) stacked into 64x96.
        let mapper = vertical(3, 1, "")?;
        assert_eq!(mapper.visible_size(192, 32)?, (64, 96));
        assert_eq!(mapper.to_physical(192, 32, 0, 0), (0, 0));
        assert_eq!(mapper.to_physical(192, 32, 10, 32), (74, 0));
        assert_eq!(mapper.to_physical(192, 32, 63, 95), (191, 31));
        Ok(())
    }

    #[test]
    fn z_flips_every_other_panel() -> crate::Result<()> {
        let mapper = vertical(3, 1, "Z")?;
        assert_eq!(mapper.to_physical(192, 32, 0, 0), (0, 0));
        assert_eq!(mapper.to_physical(192, 32, 0, 32), (127, 31));
        assert_eq!(mapper.to_physical(192, 32, 63, 63), (64, 0));
        assert_eq!(mapper.to_physical(192, 32, 0, 64), (128, 0));
        Ok(())
    }

    #[test]
    fn two_by_two_grid_transposes() -> crate::Result<()> {
        let mapper = vertical(2, 2, "")?;
        assert_eq!(mapper.visible_size(64, 64)?, (64, 64));
        // Visible panel (column 1, row 0) is physical panel (column 0, row 1).
        assert_eq!(mapper.to_physical(64, 64, 40, 3), (8, 35));
        Ok(())
    }
}
