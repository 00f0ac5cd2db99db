//! Move whole panels to other positions without rotating their content.
//!
//! Parameter example, swapping panels 1 and 3: `1|3,3|1`.

use super::params::{ParamIssue, fold_pairs};
use super::rotate_panel::panel_table;
use super::{Configure, Configured, MAX_PANELS, PixelMapper, Topology};
use crate::Result;

/// Whole-panel permutation. Panels without an entry stay where they are.
///
/// Destination panels are decomposed with the same row-major numbering as the
/// source panel: column `to % chain`, row `to / chain`.
///
/// At most [`MAX_PANELS`] panels are supported. Larger topologies are rejected
/// with [`Error::TooManyPanels`](crate::Error::TooManyPanels), even when the
/// parameter is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reorder {
    topology: Topology,
    destinations: heapless::Vec<u32, MAX_PANELS>,
}

impl Reorder {
    /// Where `panel_index` is drawn, `None` past the last panel.
    #[must_use]
    pub fn destination(&self, panel_index: u32) -> Option<u32> {
        usize::try_from(panel_index)
            .ok()
            .and_then(|index| self.destinations.get(index))
            .copied()
    }
}

impl Configure for Reorder {
    const NAME: &'static str = "Reorder";

    fn configure(topology: Topology, param: &str) -> Result<Configured<Self>> {
        let destinations = panel_table(Self::NAME, topology, |index| index)?;
        let panel_count = topology.panel_count();
        let max = panel_count.saturating_sub(1);
        let (destinations, diagnostics) =
            fold_pairs(Self::NAME, param, destinations, |destinations, from, to| {
                let slot = destinations
                    .get_mut(usize::try_from(from).unwrap_or(usize::MAX))
                    .ok_or(ParamIssue::PanelIndexTooHigh { index: from, max })?;
                if to >= panel_count {
                    return Err(ParamIssue::PanelIndexTooHigh { index: to, max });
                }
                *slot = to;
                Ok(())
            });
        Ok(Configured::with_diagnostics(
            Self {
                topology,
                destinations,
            },
            diagnostics,
        ))
    }
}

impl PixelMapper for Reorder {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        Ok((matrix_width, matrix_height))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        let panel = self.topology.panel_size(matrix_width, matrix_height);
        let pixel = panel.locate(x, y);
        let Some(to) = self.destination(self.topology.panel_index(pixel.column, pixel.row)) else {
            return (x, y);
        };
        let (column, row) = self.topology.panel_position(to);
        panel.place(column, row, pixel.local_x, pixel.local_y)
    }
}

#[cfg(test)]
mod tests {
    use super::Reorder;
    use crate::pixel_mapper::{Configure, MAX_PANELS, ParamIssue, PixelMapper, Topology};
    use crate::Error;

    fn reorder(chain: u32, parallel: u32, param: &str) -> crate::Result<Reorder> {
        Reorder::configure(Topology::new(chain, parallel)?, param)
            .map(|configured| configured.into_mapper())
    }

    #[test]
    fn empty_parameter_is_identity() -> crate::Result<()> {
        let mapper = reorder(3, 2, "")?;
        for y in 0..16 {
            for x in 0..24 {
                assert_eq!(mapper.to_physical(24, 16, x, y), (x, y));
            }
        }
        Ok(())
    }

    #[test]
    fn swaps_whole_panels() -> crate::Result<()> {
        // 2x2 grid of 32x32 panels; swap panel 1 (top right) with panel 3 (bottom right).
        let mapper = reorder(2, 2, "1|3,3|1")?;
        assert_eq!(mapper.to_physical(64, 64, 32, 0), (32, 32));
        assert_eq!(mapper.to_physical(64, 64, 45, 7), (45, 39));
        assert_eq!(mapper.to_physical(64, 64, 40, 40), (40, 8));
        // Panels 0 and 2 stay put.
        assert_eq!(mapper.to_physical(64, 64, 5, 5), (5, 5));
        assert_eq!(mapper.to_physical(64, 64, 5, 40), (5, 40));
        Ok(())
    }

    #[test]
    fn destination_uses_chain_for_columns() -> crate::Result<()> {
        // Three across, two down: panel 0 goes to panel 5 (column 2, row 1).
        let mapper = reorder(3, 2, "0|5")?;
        assert_eq!(mapper.destination(0), Some(5));
        assert_eq!(mapper.to_physical(48, 32, 3, 4), (35, 20));
        Ok(())
    }

    #[test]
    fn out_of_range_indices_are_skipped() -> crate::Result<()> {
        let configured = Reorder::configure(Topology::new(2, 1)?, "0|2,7|0,0|1,a|b")?;
        assert_eq!(
            configured.diagnostics().issues().get(..2),
            Some(
                &[
                    ParamIssue::PanelIndexTooHigh { index: 2, max: 1 },
                    ParamIssue::PanelIndexTooHigh { index: 7, max: 1 },
                ][..]
            )
        );
        assert_eq!(configured.diagnostics().len(), 3);
        assert_eq!(configured.mapper().destination(0), Some(1));
        assert_eq!(configured.mapper().destination(1), Some(1));
        Ok(())
    }

    #[test]
    fn panel_count_is_limited() -> crate::Result<()> {
        let max = u32::try_from(MAX_PANELS).unwrap_or(u32::MAX);
        let mapper = reorder(max, 1, "")?;
        assert_eq!(mapper.destination(max - 1), Some(max - 1));
        assert!(matches!(
            reorder(max, 2, ""),
            Err(Error::TooManyPanels { .. })
        ));
        assert!(matches!(
            reorder(max + 1, 1, "0|1"),
            Err(Error::TooManyPanels { .. })
        ));
        Ok(())
    }
}
