//! Draw on the visible canvas with [`embedded-graphics`](https://docs.rs/embedded-graphics)
//! and land on the physical matrix.
//!
//! [`MappedTarget`] wraps any physical [`DrawTarget`] (a driver framebuffer, or
//! [`PhysicalFrame`](crate::physical_frame::PhysicalFrame) on the host). Its size
//! is the mapper's visible size; every pixel drawn on it is sent through
//! [`PixelMapper::to_physical`] before it reaches the wrapped target.
//!
//! ```rust
//! # #[cfg(feature = "host")] {
//! use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::{Line, PrimitiveStyle}};
//! use panel_mapper::{MappedTarget, Registry, physical_frame::PhysicalFrame};
//!
//! // Four 32x32 panels in one chain, folded into a 64x64 square.
//! let mapper = Registry::new().find("U-mapper", 4, 1, "")?.into_mapper();
//! let mut physical = PhysicalFrame::new(128, 32);
//! let mut visible = MappedTarget::new(&mapper, &mut physical)?;
//! assert_eq!(visible.size(), Size::new(64, 64));
//!
//! // A line along the bottom visible row lights the top physical row of the first half.
//! Line::new(Point::new(0, 63), Point::new(63, 63))
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::RED, 1))
//!     .draw(&mut visible)
//!     .ok();
//! assert_eq!(physical.pixel(0, 0), Some(Rgb888::RED));
//! assert_eq!(physical.pixel(64, 0), Some(Rgb888::BLACK));
//! # }
//! # Ok::<(), panel_mapper::Error>(())
//! ```

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
};

use crate::pixel_mapper::PixelMapper;
use crate::Result;

/// A visible-space [`DrawTarget`] that forwards to a physical one.
///
/// Pixels outside the visible canvas are dropped, like any bounded target does.
pub struct MappedTarget<'a, M, D> {
    mapper: &'a M,
    target: &'a mut D,
    matrix: (u32, u32),
    visible: (u32, u32),
}

impl<'a, M: PixelMapper, D: DrawTarget> MappedTarget<'a, M, D> {
    /// Wrap `target`, whose size is taken as the physical matrix.
    ///
    /// # Errors
    ///
    /// Whatever `mapper` reports when sized against `target`.
    pub fn new(mapper: &'a M, target: &'a mut D) -> Result<Self> {
        let Size { width, height } = target.bounding_box().size;
        let visible = mapper.visible_size(width, height)?;
        info!(
            "{}: drawing {}x{} onto {}x{}",
            mapper.name(),
            visible.0,
            visible.1,
            width,
            height
        );
        Ok(Self {
            mapper,
            target,
            matrix: (width, height),
            visible,
        })
    }

    /// The mapper in use.
    #[must_use]
    pub const fn mapper(&self) -> &M {
        self.mapper
    }

    /// Size of the wrapped physical target.
    #[must_use]
    pub const fn matrix_size(&self) -> (u32, u32) {
        self.matrix
    }
}

impl<M, D> OriginDimensions for MappedTarget<'_, M, D> {
    fn size(&self) -> Size {
        Size::new(self.visible.0, self.visible.1)
    }
}

impl<M: PixelMapper, D: DrawTarget> DrawTarget for MappedTarget<'_, M, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mapper = self.mapper;
        let (matrix_width, matrix_height) = self.matrix;
        let (visible_width, visible_height) = self.visible;
        self.target
            .draw_iter(pixels.into_iter().filter_map(move |Pixel(point, color)| {
                let x = u32::try_from(point.x).ok().filter(|&x| x < visible_width)?;
                let y = u32::try_from(point.y).ok().filter(|&y| y < visible_height)?;
                let (x, y) = mapper.to_physical(matrix_width, matrix_height, x, y);
                let point = Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?);
                Some(Pixel(point, color))
            }))
    }
}
