//! Rotate individual panels by 0, 90, 180 or 270 degrees.
//!
//! Parameter example, rotating panel 0 by 90° and panel 2 by 180°: `0|90,2|180`.
//! Panels are numbered row-major: panel `row * chain + column`.

use super::params::{ParamIssue, fold_pairs};
use super::rotate::flip;
use super::{Configure, Configured, MAX_PANELS, PixelMapper, Quarter, Topology};
use crate::{Error, Result};

/// Per-panel quarter-turn rotation. The visible size equals the physical size.
///
/// Quarter turns assume square panels. On non-square panels the in-panel
/// coordinates wrap at the panel edge so every pixel still lands on its panel.
///
/// At most [`MAX_PANELS`] panels are supported. Larger topologies are rejected
/// with [`Error::TooManyPanels`](crate::Error::TooManyPanels), even when the
/// parameter is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RotatePanel {
    topology: Topology,
    rotations: heapless::Vec<Quarter, MAX_PANELS>,
}

impl RotatePanel {
    /// Rotation of `panel_index`, `None` past the last panel.
    #[must_use]
    pub fn rotation(&self, panel_index: u32) -> Option<Quarter> {
        usize::try_from(panel_index)
            .ok()
            .and_then(|index| self.rotations.get(index))
            .copied()
    }
}

impl Configure for RotatePanel {
    const NAME: &'static str = "Rotate-panel";

    fn configure(topology: Topology, param: &str) -> Result<Configured<Self>> {
        let rotations = panel_table(Self::NAME, topology, |_| Quarter::None)?;
        let max = topology.panel_count().saturating_sub(1);
        let (rotations, diagnostics) =
            fold_pairs(Self::NAME, param, rotations, |rotations, index, degrees| {
                let slot = rotations
                    .get_mut(usize::try_from(index).unwrap_or(usize::MAX))
                    .ok_or(ParamIssue::PanelIndexTooHigh { index, max })?;
                *slot = Quarter::from_degrees(i64::from(degrees))?;
                Ok(())
            });
        Ok(Configured::with_diagnostics(
            Self {
                topology,
                rotations,
            },
            diagnostics,
        ))
    }
}

/// One entry per panel, filled by `init(panel_index)`.
pub(super) fn panel_table<T>(
    mapper: &'static str,
    topology: Topology,
    init: impl Fn(u32) -> T,
) -> Result<heapless::Vec<T, MAX_PANELS>> {
    let panel_count = topology.panel_count();
    let too_many = Error::TooManyPanels {
        mapper,
        panel_count,
        max: MAX_PANELS,
    };
    if usize::try_from(panel_count).map_or(true, |count| count > MAX_PANELS) {
        return Err(too_many);
    }
    (0..panel_count)
        .map(init)
        .try_fold(heapless::Vec::new(), |mut table, entry| {
            table.push(entry).map(|()| table).map_err(|_| too_many.clone())
        })
}

impl PixelMapper for RotatePanel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        Ok((matrix_width, matrix_height))
    }

    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        // Panel size comes from this call's matrix, never from an earlier one.
        let panel = self.topology.panel_size(matrix_width, matrix_height);
        let pixel = panel.locate(x, y);
        let quarter = self
            .rotation(self.topology.panel_index(pixel.column, pixel.row))
            .unwrap_or_default();
        let (local_x, local_y) = match quarter {
            Quarter::None => return (x, y),
            Quarter::Cw90 => (
                flip(panel.width, wrap(pixel.local_y, panel.width)),
                wrap(pixel.local_x, panel.height),
            ),
            Quarter::Half => (flip(panel.width, pixel.local_x), flip(panel.height, pixel.local_y)),
            Quarter::Cw270 => (
                wrap(pixel.local_y, panel.width),
                flip(panel.height, wrap(pixel.local_x, panel.height)),
            ),
        };
        panel.place(pixel.column, pixel.row, local_x, local_y)
    }
}

#[inline]
const fn wrap(value: u32, size: u32) -> u32 {
    match value.checked_rem(size) {
        Some(wrapped) => wrapped,
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::RotatePanel;
    use crate::pixel_mapper::{Configure, MAX_PANELS, ParamIssue, PixelMapper, Quarter, Topology};
    use crate::Error;

    fn rotate_panel(chain: u32, parallel: u32, param: &str) -> crate::Result<RotatePanel> {
        RotatePanel::configure(Topology::new(chain, parallel)?, param)
            .map(|configured| configured.into_mapper())
    }

    #[test]
    fn parses_the_table() -> crate::Result<()> {
        let mapper = rotate_panel(2, 2, "0|90,2|180,3|-90")?;
        assert_eq!(mapper.rotation(0), Some(Quarter::Cw90));
        assert_eq!(mapper.rotation(1), Some(Quarter::None));
        assert_eq!(mapper.rotation(2), Some(Quarter::Half));
        // "-90" is not a digit string; panel 3 keeps its default.
        assert_eq!(mapper.rotation(3), Some(Quarter::None));
        assert_eq!(mapper.rotation(4), None);
        Ok(())
    }

    #[test]
    fn bad_tokens_are_skipped() -> crate::Result<()> {
        let configured = RotatePanel::configure(Topology::new(2, 1)?, "5|90,1|45,1|270")?;
        let issues = configured.diagnostics().issues();
        assert_eq!(
            issues,
            &[
                ParamIssue::PanelIndexTooHigh { index: 5, max: 1 },
                ParamIssue::NotMultipleOf90 { angle: 45 },
            ]
        );
        assert_eq!(configured.mapper().rotation(1), Some(Quarter::Cw270));
        Ok(())
    }

    #[test]
    fn large_angles_normalize() -> crate::Result<()> {
        let mapper = rotate_panel(1, 1, "0|450")?;
        assert_eq!(mapper.rotation(0), Some(Quarter::Cw90));
        Ok(())
    }

    #[test]
    fn too_many_panels_is_a_topology_error() {
        assert!(matches!(
            rotate_panel(u32::try_from(MAX_PANELS).unwrap_or(u32::MAX), 2, ""),
            Err(Error::TooManyPanels { .. })
        ));
    }

    #[test]
    fn rotates_only_registered_panels() -> crate::Result<()> {
        // Two 32x32 panels side by side, panel 0 turned a quarter.
        let mapper = rotate_panel(2, 1, "0|90")?;
        assert_eq!(mapper.to_physical(64, 32, 0, 0), (31, 0));
        assert_eq!(mapper.to_physical(64, 32, 31, 0), (31, 31));
        assert_eq!(mapper.to_physical(64, 32, 0, 31), (0, 0));
        // Panel 1 is untouched.
        assert_eq!(mapper.to_physical(64, 32, 32, 0), (32, 0));
        assert_eq!(mapper.to_physical(64, 32, 50, 17), (50, 17));
        Ok(())
    }

    #[test]
    fn half_and_three_quarter_turns_stay_on_their_panel() -> crate::Result<()> {
        let mapper = rotate_panel(2, 2, "3|180,1|270")?;
        // Panel 3 is the bottom-right one.
        assert_eq!(mapper.to_physical(64, 64, 32, 32), (63, 63));
        assert_eq!(mapper.to_physical(64, 64, 40, 35), (55, 60));
        // Panel 1 is the top-right one.
        assert_eq!(mapper.to_physical(64, 64, 32, 0), (32, 31));
        assert_eq!(mapper.to_physical(64, 64, 32, 31), (63, 31));
        Ok(())
    }

    #[test]
    fn panel_size_follows_the_matrix_of_each_call() -> crate::Result<()> {
        let mapper = rotate_panel(2, 1, "1|180")?;
        assert_eq!(mapper.to_physical(64, 32, 32, 0), (63, 31));
        assert_eq!(mapper.to_physical(128, 64, 64, 0), (127, 63));
        Ok(())
    }
}
