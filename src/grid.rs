use crate::{error::Error, ColorPoint};
use image::{imageops::FilterType, DynamicImage, RgbaImage};

/// The longest side, in pixels, a grid built from an image is scaled down to.
pub const DEFAULT_MAX_DIMENSION: u32 = 100;

/// An owned RGBA pixel buffer: `width * height` pixels, four interleaved channels each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        if data.len() as u64 != width as u64 * height as u64 * 4 {
            return Err(Error::InvalidGrid {
                width,
                height,
                len: data.len(),
            });
        }

        Ok(Self { width, height, data })
    }

    /// Build a grid from a decoded image, scaling it down so its longest side is at most `max_dimension` pixels.
    /// Images already within the bound are copied as-is.
    pub fn from_image(image: &DynamicImage, max_dimension: u32) -> Self {
        Self::from_rgba(image.to_rgba8(), max_dimension)
    }

    pub fn from_rgba(image: RgbaImage, max_dimension: u32) -> Self {
        let (width, height) = image.dimensions();
        let (new_width, new_height) = bounded_dimensions(width, height, max_dimension);

        let image = if (new_width, new_height) != (width, height) {
            log::debug!("scaling {width}x{height} image down to {new_width}x{new_height}");
            image::imageops::resize(&image, new_width, new_height, FilterType::Nearest)
        } else {
            image
        };

        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory into a bounded grid.
    pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<Self, Error> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&image, max_dimension))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw channel bytes, `R, G, B, A` interleaved in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The color of the pixel at flat index `index`, alpha discarded.
    pub fn color_at(&self, index: usize) -> Option<ColorPoint> {
        let start = index.checked_mul(4)?;
        match self.data.get(start..start + 3)? {
            [red, green, blue] => Some(ColorPoint::new(*red, *green, *blue)),
            _ => None,
        }
    }
}

/// Compute the dimensions of an image scaled down to fit within a `bound` x `bound` square, keeping its aspect ratio.
///
/// The longer side is clamped to the bound and the shorter side scaled proportionally, rounded and kept at least one
/// pixel. Dimensions already within the bound, as well as a zero bound, are returned unchanged.
pub fn bounded_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let longest = width.max(height);
    if bound == 0 || longest <= bound {
        return (width, height);
    }

    let scale = bound as f64 / longest as f64;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, bound);

    if width >= height {
        (bound, scaled(height))
    } else {
        (scaled(width), bound)
    }
}
