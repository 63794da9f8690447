use crate::{ColorPoint, PixelGrid};

/// The default stride, in pixels, between two sampled pixels.
pub const DEFAULT_SAMPLE_STEP: usize = 5;

/// Sample every `step`th pixel of the grid in scan order, keeping its red, green and blue channels.
///
/// A `step` of zero is treated as one. The returned points are in the same order the pixels appear in the grid and
/// duplicates are kept, since they carry how common a color is.
pub fn sample_points(grid: &PixelGrid, step: usize) -> Vec<ColorPoint> {
    let step = step.max(1);

    grid.as_raw()
        .chunks_exact(4)
        .step_by(step)
        .map(|pixel| ColorPoint::new(pixel[0], pixel[1], pixel[2]))
        .collect()
}
