#![cfg(feature = "host")]
//! PNG previews of a physical matrix, drawn as round LEDs on a black board.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use png::{BitDepth, ColorType, Encoder, ScaledFloat};

use crate::physical_frame::PhysicalFrame;
use crate::pixel_mapper::PixelMapper;

const PREVIEW_INVERSE_GAMMA: f32 = 2.2;

// Below this an LED has no room for its fade ring.
const MIN_CELL_SIZE: u32 = 6;

/// Render a [`PhysicalFrame`] into a PNG file no larger than `target_max_dimension`.
///
/// # Errors
///
/// Returns an error if the frame is empty, the target is too small to draw
/// LEDs, or the file cannot be written.
pub fn write_frame_png(
    frame: &PhysicalFrame,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    write_frame_png_with_gamma(frame, output_path, target_max_dimension, PREVIEW_INVERSE_GAMMA)
}

/// Render a [`PhysicalFrame`] into a PNG file with a custom preview inverse gamma.
///
/// # Errors
///
/// As [`write_frame_png`], plus a non-positive `preview_inverse_gamma`.
pub fn write_frame_png_with_gamma(
    frame: &PhysicalFrame,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
    preview_inverse_gamma: f32,
) -> Result<(), Box<dyn Error>> {
    if preview_inverse_gamma <= 0.0 {
        return Err(invalid("preview_inverse_gamma must be positive").into());
    }
    if frame.width() == 0 || frame.height() == 0 {
        return Err(invalid("frame must not be empty").into());
    }
    let output_path = output_path.as_ref();
    let cell_size = select_cell_size(frame.width(), frame.height(), target_max_dimension)
        .ok_or_else(|| invalid("target_max_dimension is too small to draw LEDs"))?;
    let (width, height, pixels) = panel_pixels(frame, cell_size, preview_inverse_gamma)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(output_path)?;
    let mut encoder = Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Sixteen);
    encoder.set_source_gamma(ScaledFloat::new(1.0));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;
    info!("wrote PNG to {}", display!(output_path.display()));
    Ok(())
}

/// Preview where a mapper sends the visible canvas.
///
/// See [`PhysicalFrame::from_mapping`] for the coloring.
///
/// # Errors
///
/// Returns an error if the mapper cannot size this matrix, or as [`write_frame_png`].
pub fn write_mapping_png(
    mapper: &impl PixelMapper,
    matrix_width: u32,
    matrix_height: u32,
    output_path: impl AsRef<Path>,
    target_max_dimension: u32,
) -> Result<(), Box<dyn Error>> {
    let frame = PhysicalFrame::from_mapping(mapper, matrix_width, matrix_height)?;
    write_frame_png(&frame, output_path, target_max_dimension)
}

fn invalid(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}

const fn led_margin(cell_size: u32) -> u32 {
    let margin = cell_size / 8;
    if margin == 0 { 1 } else { margin }
}

const fn led_radius(cell_size: u32) -> u32 {
    cell_size.saturating_sub(led_margin(cell_size) * 2) / 2
}

// Largest cell size whose output, border included, fits the target.
fn select_cell_size(frame_width: u32, frame_height: u32, target_max_dimension: u32) -> Option<u32> {
    (MIN_CELL_SIZE..=target_max_dimension).rev().find(|&cell_size| {
        let border = u64::from(led_radius(cell_size)) * 2;
        let output_width = u64::from(frame_width) * u64::from(cell_size) + border;
        let output_height = u64::from(frame_height) * u64::from(cell_size) + border;
        output_width.max(output_height) <= u64::from(target_max_dimension)
    })
}

fn panel_pixels(
    frame: &PhysicalFrame,
    cell_size: u32,
    preview_inverse_gamma: f32,
) -> Result<(u32, u32, Vec<u8>), Box<dyn Error>> {
    let led_radius = led_radius(cell_size);
    let fade_width = (led_radius / 3).max(1);
    let border = led_radius;
    let width = frame
        .width()
        .checked_mul(cell_size)
        .and_then(|width| width.checked_add(border * 2))
        .ok_or_else(|| invalid("preview is too wide"))?;
    let height = frame
        .height()
        .checked_mul(cell_size)
        .and_then(|height| height.checked_add(border * 2))
        .ok_or_else(|| invalid("preview is too tall"))?;
    let row_bytes = usize::try_from(width)? * 3 * 2;
    let mut bytes = vec![0u8; row_bytes * usize::try_from(height)?];

    let center = f32::from(u16::try_from(cell_size - 1)?) / 2.0;
    let led_radius_f = f32::from(u16::try_from(led_radius)?);
    let inner_radius_f = f32::from(u16::try_from(led_radius - fade_width)?);

    for (row_index, row) in (0u32..).zip(frame.rows()) {
        for (column_index, &pixel) in (0u32..).zip(row) {
            if pixel == Rgb888::BLACK {
                continue;
            }
            let linear = [pixel.r(), pixel.g(), pixel.b()]
                .map(|channel| inverse_gamma_to_linear(channel, preview_inverse_gamma));
            for local_y in 0..cell_size {
                let delta_y = f32::from(u16::try_from(local_y)?) - center;
                let y = border + row_index * cell_size + local_y;
                let line_start = usize::try_from(y)? * row_bytes;
                for local_x in 0..cell_size {
                    let delta_x = f32::from(u16::try_from(local_x)?) - center;
                    let distance = delta_x.hypot(delta_y);
                    if distance > led_radius_f {
                        continue;
                    }
                    let intensity = if distance <= inner_radius_f {
                        1.0
                    } else {
                        let fade_span = led_radius_f - inner_radius_f;
                        (1.0 - (distance - inner_radius_f) / fade_span).max(0.0)
                    };
                    let x = border + column_index * cell_size + local_x;
                    let start = line_start + usize::try_from(x)? * 3 * 2;
                    let Some(target) = bytes.get_mut(start..start + 6) else {
                        continue;
                    };
                    for (out, channel) in target.chunks_exact_mut(2).zip(linear) {
                        out.copy_from_slice(&linear_to_u16(channel * intensity).to_be_bytes());
                    }
                }
            }
        }
    }

    Ok((width, height, bytes))
}

fn inverse_gamma_to_linear(channel: u8, preview_inverse_gamma: f32) -> f32 {
    let normalized = f32::from(channel) / 255.0;
    normalized.powf(preview_inverse_gamma)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=65535 first"
)]
fn linear_to_u16(value: f32) -> u16 {
    let clamped = value.clamp(0.0, 1.0);
    (clamped * 65535.0).round() as u16
}

#[cfg(test)]
mod tests {
    use super::{MIN_CELL_SIZE, select_cell_size};

    #[test]
    fn cell_size_fits_the_target() {
        // 64 columns at cell size 9 plus a 3-pixel border each side: 582.
        assert_eq!(select_cell_size(64, 32, 600), Some(9));
        assert_eq!(select_cell_size(64, 32, 100), None);
        // A single LED needs room for its cell plus a border of one radius on each side.
        assert_eq!(select_cell_size(1, 1, 10), Some(MIN_CELL_SIZE));
        assert_eq!(select_cell_size(1, 1, 15), Some(9));
    }
}
