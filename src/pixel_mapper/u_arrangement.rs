//! Fold a long chain into a U-shape: after half the panels it bends around and
//! continues below, giving double the height on a single chain.
//!
//! Four 32x32 panels in one chain
//!
//! ```text
//! [<][<][<][<] }- connector
//! ```
//!
//! become a 64x64 display:
//!
//! ```text
//! [<][<] }----- connector
//! [>][>]
//! ```
//!
//! With several parallel chains every chain folds on its own:
//!
//! ```text
//! [<][<][<][<] }-- connector #1
//! [>][>][>][>]
//! [<][<][<][<] }-- connector #2
//! [>][>][>][>]
//! ```

use super::rotate::flip;
use super::{Configure, Configured, PixelMapper, Topology};
use crate::{Error, Result};

/// Visible width assumes 32-pixel-wide panels: each 64 physical columns fold into 32.
const FOLD_SPAN: u32 = 64;

/// Chain folded in half into a U. Needs an even `chain` of at least 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UArrangement {
    parallel: u32,
}

impl UArrangement {
    const fn visible_width(matrix_width: u32) -> u32 {
        (matrix_width / FOLD_SPAN) * (FOLD_SPAN / 2)
    }
}

impl Configure for UArrangement {
    const NAME: &'static str = "U-mapper";

    fn configure(topology: Topology, _param: &str) -> Result<Configured<Self>> {
        let chain = topology.chain();
        if chain < 2 || chain % 2 != 0 {
            return Err(Error::ChainNotFoldable {
                mapper: Self::NAME,
                chain,
            });
        }
        Ok(Configured::new(Self {
            parallel: topology.parallel(),
        }))
    }
}

impl PixelMapper for UArrangement {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        if matrix_height.checked_rem(self.parallel) != Some(0) {
            return Err(Error::HeightNotDivisible {
                mapper: Self::NAME,
                height: matrix_height,
                parallel: self.parallel,
            });
        }
        Ok((
            Self::visible_width(matrix_width),
            matrix_height.saturating_mul(2),
        ))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        let panel_height = matrix_height.checked_div(self.parallel).unwrap_or(0);
        // One folded U: the straight half on top, the returning half below.
        let slab_height = panel_height.saturating_mul(2);
        let (slab, y) = match (y.checked_div(slab_height), y.checked_rem(slab_height)) {
            (Some(slab), Some(y)) => (slab, y),
            _ => (0, y),
        };
        let base_y = slab.saturating_mul(panel_height);
        if y < panel_height {
            (x.saturating_add(matrix_width / 2), base_y.saturating_add(y))
        } else {
            (
                flip(Self::visible_width(matrix_width), x),
                base_y.saturating_add(flip(slab_height, y)),
            )
        }
    }
}
