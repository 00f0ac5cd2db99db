#![cfg(feature = "host")]
//! In-memory physical matrix for host previews and tests.

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::{Rgb888, RgbColor},
};

use crate::pixel_mapper::PixelMapper;
use crate::Result;

/// A `width` × `height` RGB framebuffer, row-major, starting all black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalFrame {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl PhysicalFrame {
    /// A black frame.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb888::BLACK)
    }

    /// A frame filled with `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb888) -> Self {
        let len = usize::try_from(u64::from(width) * u64::from(height)).unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![color; len],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        usize::try_from(u64::from(y) * u64::from(self.width) + u64::from(x)).ok()
    }

    /// Color at `(x, y)`, `None` outside the frame.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        self.offset(x, y)
            .and_then(|offset| self.pixels.get(offset))
            .copied()
    }

    /// Set `(x, y)`. Returns `false` (and changes nothing) outside the frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) -> bool {
        match self
            .offset(x, y)
            .and_then(|offset| self.pixels.get_mut(offset))
        {
            Some(pixel) => {
                *pixel = color;
                true
            }
            None => false,
        }
    }

    /// Rows of pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb888]> + '_ {
        let width = usize::try_from(self.width).unwrap_or(usize::MAX).max(1);
        self.pixels.chunks(width)
    }

    /// Paint, for every visible pixel, the physical pixel it lands on.
    ///
    /// Red grows with the visible `x` and green with the visible `y`, so the
    /// picture shows where each part of the visible canvas ends up. Physical
    /// pixels nothing maps to stay black.
    ///
    /// # Errors
    ///
    /// Whatever `mapper` reports when sized against a `matrix_width` × `matrix_height` matrix.
    pub fn from_mapping(
        mapper: &impl PixelMapper,
        matrix_width: u32,
        matrix_height: u32,
    ) -> Result<Self> {
        let (visible_width, visible_height) = mapper.visible_size(matrix_width, matrix_height)?;
        let mut frame = Self::new(matrix_width, matrix_height);
        for y in 0..visible_height {
            for x in 0..visible_width {
                let (physical_x, physical_y) =
                    mapper.to_physical(matrix_width, matrix_height, x, y);
                let color = Rgb888::new(ramp(x, visible_width), ramp(y, visible_height), 0x40);
                if !frame.set_pixel(physical_x, physical_y, color) {
                    warn!(
                        "{}: ({}, {}) mapped outside the matrix to ({}, {})",
                        mapper.name(),
                        x,
                        y,
                        physical_x,
                        physical_y
                    );
                }
            }
        }
        Ok(frame)
    }
}

// 0 at the first position, 255 at the last.
fn ramp(value: u32, extent: u32) -> u8 {
    let last = u64::from(extent.saturating_sub(1).max(1));
    u8::try_from(u64::from(value) * 255 / last).unwrap_or(u8::MAX)
}

impl OriginDimensions for PhysicalFrame {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for PhysicalFrame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(coord.x), u32::try_from(coord.y)) {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{
        pixelcolor::{Rgb888, RgbColor},
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    use super::PhysicalFrame;
    use crate::pixel_mapper::{Mapper, Mirror, MirrorAxis};

    #[test]
    fn draws_and_clips() {
        let mut frame = PhysicalFrame::new(8, 4);
        Rectangle::new(Point::new(6, 2), Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
            .draw(&mut frame)
            .ok();
        assert_eq!(frame.pixel(7, 3), Some(Rgb888::GREEN));
        assert_eq!(frame.pixel(5, 3), Some(Rgb888::BLACK));
        assert_eq!(frame.pixel(8, 3), None);
        assert_eq!(frame.rows().count(), 4);
    }

    #[test]
    fn mapping_colors_by_visible_position() -> crate::Result<()> {
        let mirror = Mapper::from(Mirror::new(MirrorAxis::Horizontal));
        let frame = PhysicalFrame::from_mapping(&mirror, 4, 2)?;
        // Visible (0, 0) lands on physical (3, 0).
        assert_eq!(frame.pixel(3, 0), Some(Rgb888::new(0, 0, 0x40)));
        assert_eq!(frame.pixel(0, 1), Some(Rgb888::new(255, 255, 0x40)));
        Ok(())
    }
}
