//! Coordinate transforms between the visible canvas and the physical panel matrix.
//!
//! A display is a grid of identical panels: `chain` panels wired in series make up
//! the physical width and `parallel` chains make up the physical height. The
//! hardware only knows that physical space. A [`PixelMapper`] lets callers draw in
//! a different "visible" space (one long row, a U-fold, a rotation, ...) and turns
//! every visible `(x, y)` into the physical `(x, y)` that should light up.
//!
//! Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
//! `x` increases to the right, and `y` increases downward.
//!
//! Every mapper is configured once from a [`Topology`] and a parameter string,
//! asked for its [`visible_size`](PixelMapper::visible_size) once, and then
//! called per pixel through [`to_physical`](PixelMapper::to_physical).
//!
//! ```rust
//! use panel_mapper::{Configure, PixelMapper, Topology};
//! use panel_mapper::pixel_mapper::Rotate;
//!
//! // Two 32x32 panels in one chain, shown rotated a quarter turn.
//! let topology = Topology::new(2, 1)?;
//! let rotate = Rotate::configure(topology, "90")?.into_mapper();
//!
//! assert_eq!(rotate.visible_size(64, 32)?, (32, 64));
//! assert_eq!(rotate.to_physical(64, 32, 0, 0), (63, 0));
//! # Ok::<(), panel_mapper::Error>(())
//! ```

use core::num::NonZeroU32;

use crate::{Error, Result};

pub mod params;

mod mirror;
mod reorder;
mod rotate;
mod rotate_panel;
mod row_arrangement;
mod u_arrangement;
mod vertical;

pub use mirror::{Mirror, MirrorAxis};
pub use params::{Diagnostics, ParamIssue};
pub use reorder::Reorder;
pub use rotate::{Quarter, Rotate};
pub use rotate_panel::RotatePanel;
pub use row_arrangement::{RowArrangement, RowMode};
pub use u_arrangement::UArrangement;
pub use vertical::Vertical;

/// Most panels a per-panel table ([`RotatePanel`], [`Reorder`]) can describe.
pub const MAX_PANELS: usize = 256;

/// The three operations every mapper supports once it is configured.
pub trait PixelMapper {
    /// Stable display name, used for registry lookup (ignoring ASCII case) and diagnostics.
    fn name(&self) -> &'static str;

    /// Size of the visible canvas for a physical matrix of `matrix_width` × `matrix_height`.
    ///
    /// # Errors
    ///
    /// Returns an error when the matrix cannot be folded the way this mapper needs.
    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)>;

    /// Physical `(x, y)` for the visible pixel `(x, y)`.
    ///
    /// Defined for every `x < visible_width`, `y < visible_height` of
    /// [`visible_size`](Self::visible_size); the result is always inside the matrix.
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32);
}

/// Builds a mapper from a topology and its parameter string.
pub trait Configure: PixelMapper + Sized {
    /// Display name of this mapper.
    const NAME: &'static str;

    /// Validate `topology` and parse `param`.
    ///
    /// List grammars skip bad tokens; those come back in [`Configured::diagnostics`].
    ///
    /// # Errors
    ///
    /// Returns an error when the topology or the parameter string as a whole is unusable.
    fn configure(topology: Topology, param: &str) -> Result<Configured<Self>>;
}

/// Panel grid of a display: `chain` panels across, `parallel` chains down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Topology {
    chain: NonZeroU32,
    parallel: NonZeroU32,
}

impl Topology {
    /// Validate a panel grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTopology`] if either count is zero.
    pub fn new(chain: u32, parallel: u32) -> Result<Self> {
        match (NonZeroU32::new(chain), NonZeroU32::new(parallel)) {
            (Some(chain), Some(parallel)) => Ok(Self { chain, parallel }),
            _ => Err(Error::EmptyTopology { chain, parallel }),
        }
    }

    /// Panels wired in series.
    #[must_use]
    pub const fn chain(self) -> u32 {
        self.chain.get()
    }

    /// Parallel chains.
    #[must_use]
    pub const fn parallel(self) -> u32 {
        self.parallel.get()
    }

    /// `chain * parallel`, saturating.
    #[must_use]
    pub const fn panel_count(self) -> u32 {
        self.chain.get().saturating_mul(self.parallel.get())
    }

    /// Size of one panel inside a matrix of the given size (floor division).
    #[must_use]
    pub fn panel_size(self, matrix_width: u32, matrix_height: u32) -> PanelSize {
        PanelSize {
            width: matrix_width / self.chain,
            height: matrix_height / self.parallel,
        }
    }

    /// Row-major panel number of the panel at grid position `(column, row)`.
    #[must_use]
    pub const fn panel_index(self, column: u32, row: u32) -> u32 {
        row.saturating_mul(self.chain.get()).saturating_add(column)
    }

    /// Grid position `(column, row)` of the row-major panel number `index`.
    #[must_use]
    pub fn panel_position(self, index: u32) -> (u32, u32) {
        (index % self.chain, index / self.chain)
    }
}

/// Pixel size of a single panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelSize {
    /// Panel width in pixels.
    pub width: u32,
    /// Panel height in pixels.
    pub height: u32,
}

/// A pixel split into its panel grid position and its offset inside that panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelPixel {
    /// Panel column.
    pub column: u32,
    /// Panel row.
    pub row: u32,
    /// X offset inside the panel.
    pub local_x: u32,
    /// Y offset inside the panel.
    pub local_y: u32,
}

impl PanelSize {
    /// Split a matrix coordinate into panel position and in-panel offset.
    ///
    /// A zero-sized panel puts everything in panel `(0, 0)`.
    #[inline]
    #[must_use]
    pub const fn locate(self, x: u32, y: u32) -> PanelPixel {
        let (column, local_x) = split(x, self.width);
        let (row, local_y) = split(y, self.height);
        PanelPixel {
            column,
            row,
            local_x,
            local_y,
        }
    }

    /// Matrix coordinate of the in-panel offset `(local_x, local_y)` on panel `(column, row)`.
    #[inline]
    #[must_use]
    pub const fn place(self, column: u32, row: u32, local_x: u32, local_y: u32) -> (u32, u32) {
        (
            column.saturating_mul(self.width).saturating_add(local_x),
            row.saturating_mul(self.height).saturating_add(local_y),
        )
    }
}

#[inline]
const fn split(value: u32, size: u32) -> (u32, u32) {
    match (value.checked_div(size), value.checked_rem(size)) {
        (Some(index), Some(offset)) => (index, offset),
        _ => (0, value),
    }
}

/// A configured mapper plus any parameter tokens that were skipped on the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configured<M> {
    mapper: M,
    diagnostics: Diagnostics,
}

impl<M> Configured<M> {
    /// A mapper whose parameters parsed cleanly.
    #[must_use]
    pub const fn new(mapper: M) -> Self {
        Self {
            mapper,
            diagnostics: Diagnostics::new(),
        }
    }

    /// A mapper with skipped-token diagnostics attached.
    #[must_use]
    pub const fn with_diagnostics(mapper: M, diagnostics: Diagnostics) -> Self {
        Self {
            mapper,
            diagnostics,
        }
    }

    /// The configured mapper.
    #[must_use]
    pub const fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Tokens that were skipped while parsing the parameter string.
    #[must_use]
    pub const fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Drop the diagnostics and keep the mapper.
    #[must_use]
    pub fn into_mapper(self) -> M {
        self.mapper
    }

    /// Split into mapper and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (M, Diagnostics) {
        (self.mapper, self.diagnostics)
    }

    /// Convert the mapper, keeping the diagnostics.
    #[must_use]
    pub fn map_into<N: From<M>>(self) -> Configured<N> {
        Configured {
            mapper: N::from(self.mapper),
            diagnostics: self.diagnostics,
        }
    }
}

/// Any of the built-in mappers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant, reason = "panel tables are inline so the hot path never allocates")]
pub enum Mapper {
    /// Parallel rows laid out as one long row.
    RowArrangement(RowArrangement),
    /// Per-panel quarter-turn rotation.
    RotatePanel(RotatePanel),
    /// Whole-panel permutation.
    Reorder(Reorder),
    /// Whole-display quarter-turn rotation.
    Rotate(Rotate),
    /// Horizontal or vertical mirror.
    Mirror(Mirror),
    /// One long chain folded into a U.
    UArrangement(UArrangement),
    /// Rows and columns of panels swapped.
    Vertical(Vertical),
}

macro_rules! for_each_mapper {
    ($self:expr, $mapper:ident => $body:expr) => {
        match $self {
            Mapper::RowArrangement($mapper) => $body,
            Mapper::RotatePanel($mapper) => $body,
            Mapper::Reorder($mapper) => $body,
            Mapper::Rotate($mapper) => $body,
            Mapper::Mirror($mapper) => $body,
            Mapper::UArrangement($mapper) => $body,
            Mapper::Vertical($mapper) => $body,
        }
    };
}

impl PixelMapper for Mapper {
    fn name(&self) -> &'static str {
        for_each_mapper!(self, mapper => mapper.name())
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        for_each_mapper!(self, mapper => mapper.visible_size(matrix_width, matrix_height))
    }

    #[inline]
    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        for_each_mapper!(self, mapper => mapper.to_physical(matrix_width, matrix_height, x, y))
    }
}

macro_rules! impl_from_mapper {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Mapper {
                fn from(mapper: $variant) -> Self {
                    Self::$variant(mapper)
                }
            }
        )*
    };
}

impl_from_mapper!(
    RowArrangement,
    RotatePanel,
    Reorder,
    Rotate,
    Mirror,
    UArrangement,
    Vertical,
);

/// Configure the built-in mapper `T` and wrap it as `M`.
///
/// Coerces to the factory type the [`Registry`](crate::Registry) stores.
///
/// # Errors
///
/// Whatever `T::configure` returns.
pub fn configure_as<T, M>(topology: Topology, param: &str) -> Result<Configured<M>>
where
    T: Configure,
    M: From<T>,
{
    T::configure(topology, param).map(Configured::map_into)
}

#[cfg(test)]
mod tests {
    use super::{PanelSize, Topology};
    use crate::Error;

    #[test]
    fn topology_rejects_zero() {
        assert_eq!(
            Topology::new(0, 3),
            Err(Error::EmptyTopology {
                chain: 0,
                parallel: 3
            })
        );
        assert!(Topology::new(1, 0).is_err());
    }

    #[test]
    fn panel_index_is_row_major() {
        let topology = Topology::new(3, 2).expect("valid topology");
        assert_eq!(topology.panel_index(0, 0), 0);
        assert_eq!(topology.panel_index(2, 0), 2);
        assert_eq!(topology.panel_index(0, 1), 3);
        assert_eq!(topology.panel_index(2, 1), 5);
        assert_eq!(topology.panel_position(5), (2, 1));
        assert_eq!(topology.panel_position(3), (0, 1));
    }

    #[test]
    fn locate_and_place_are_inverse() {
        let panel = PanelSize {
            width: 32,
            height: 16,
        };
        let pixel = panel.locate(70, 20);
        assert_eq!((pixel.column, pixel.row, pixel.local_x, pixel.local_y), (2, 1, 6, 4));
        assert_eq!(panel.place(2, 1, 6, 4), (70, 20));
    }

    #[test]
    fn zero_sized_panel_does_not_divide() {
        let panel = PanelSize {
            width: 0,
            height: 0,
        };
        let pixel = panel.locate(5, 7);
        assert_eq!((pixel.column, pixel.row, pixel.local_x, pixel.local_y), (0, 0, 5, 7));
    }
}
