use crate::{error::InvalidImage, Result};
use image::{imageops, math::Rect, GenericImageView, RgbImage};

pub const DEFAULT_SAMPLE_GRID: (u32, u32) = (80, 80);

/// Checks an image's dimensions before it enters the pipeline.
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(InvalidImage::ZeroDimension { width, height }.into());
    }

    Ok(())
}

/// Builds an [`RgbImage`] from a caller-owned, row-major interleaved buffer.
pub fn image_from_raw(width: u32, height: u32, channels: usize, data: &[u8]) -> Result<RgbImage> {
    validate_dimensions(width, height)?;

    if channels != 3 {
        return Err(InvalidImage::ChannelCount(channels).into());
    }

    let expected = width as usize * height as usize * channels;
    if data.len() != expected {
        return Err(InvalidImage::BufferLength {
            len: data.len(),
            expected,
        }
        .into());
    }

    RgbImage::from_raw(width, height, data.to_vec())
        .ok_or_else(|| InvalidImage::BufferLength {
            len: data.len(),
            expected,
        })
        .map_err(Into::into)
}

/// Crops `image` to `region`, area-averages it down to at most `grid` pixels, and flattens the result into a sample
/// set. The grid never upscales: a region smaller than the grid along an axis keeps its own size on that axis.
pub fn sample_region(image: &RgbImage, region: Rect, grid: (u32, u32)) -> Vec<(u8, u8, u8)> {
    let view = image.view(region.x, region.y, region.width, region.height);

    let width = grid.0.clamp(1, region.width);
    let height = grid.1.clamp(1, region.height);

    let resized = if (width, height) == (region.width, region.height) {
        view.to_image()
    } else {
        imageops::thumbnail(&*view, width, height)
    };

    resized.pixels().map(|pixel| (pixel[0], pixel[1], pixel[2])).collect()
}

/// Reads a single pixel, for callers that let the user point at the garment directly.
pub fn pick_pixel(image: &RgbImage, x: u32, y: u32) -> Option<(u8, u8, u8)> {
    image.get_pixel_checked(x, y).map(|pixel| (pixel[0], pixel[1], pixel[2]))
}
