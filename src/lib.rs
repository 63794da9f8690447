// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a small, stable palette of dominant colors from an image.
//!
//! The image is scaled down to at most 100x100 pixels, a sparse set of its pixels is sampled and the samples are
//! clustered with K-Means on raw RGB values. The initial centroids are picked with farthest-point seeding rather than
//! at random, so the same image always yields the same palette. The resulting clusters are ranked by how many samples
//! they cover.
//!
//! ```no_run
//! let image = dominance::image::open("cover.jpg").unwrap();
//! let palette = dominance::Palette::from_image(image).color_count(4).generate().unwrap();
//!
//! for entry in palette.entries() {
//!     println!("{} covers {} samples", entry.key(), entry.count());
//! }
//! ```
//!
//! With the `fetch` feature (enabled by default) images can also be loaded from a URL, see [`ImageSource`].

#[cfg(feature = "fetch")]
mod acquire;
mod color;
mod entry;
mod error;
mod grid;
mod kmeans;
mod sampler;
mod seeder;
#[cfg(feature = "fetch")]
mod state;

pub const DEFAULT_COLOR_COUNT: usize = 3;

#[cfg(feature = "fetch")]
pub use crate::{
    acquire::{acquire_grid, extract_palette_from, Fetcher, HttpFetcher, ImageSource, ProxyRetry, DEFAULT_PROXY_PREFIX},
    state::{ExtractionState, PaletteTask},
};
pub use crate::{
    color::ColorPoint,
    entry::{rank_clusters, PaletteEntry},
    error::{AcquireError, Error},
    grid::{bounded_dimensions, PixelGrid, DEFAULT_MAX_DIMENSION},
    kmeans::{Cluster, ClusterResult, KMeans, DEFAULT_MAX_ITERATIONS},
    sampler::{sample_points, DEFAULT_SAMPLE_STEP},
    seeder::seed_centroids,
};
pub use image;

use image::{DynamicImage, RgbaImage};

/// The ranked palette of an image, most common color first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    sampled: usize,
    iterations: usize,
    converged: bool,
}

pub struct PaletteBuilder {
    source: Source,
    color_count: usize,
    sample_step: usize,
    max_iterations: usize,
    max_dimension: u32,
}

enum Source {
    Grid(PixelGrid),
    Image(RgbaImage),
}

/// Extract `k` dominant colors from the grid using the default sampling step and iteration cap.
///
/// The entries are ordered by descending count, ties kept in seeding order. Exactly `k` entries are returned unless
/// the grid has no pixels (or `k` is zero), in which case none are.
pub fn extract_palette(grid: &PixelGrid, k: usize) -> Vec<PaletteEntry> {
    cluster_grid(grid, k, DEFAULT_SAMPLE_STEP, DEFAULT_MAX_ITERATIONS).entries
}

fn cluster_grid(grid: &PixelGrid, k: usize, sample_step: usize, max_iterations: usize) -> Palette {
    let points = sample_points(grid, sample_step);
    let result = KMeans::new(k).max_iterations(max_iterations).run(&points);

    log::debug!(
        "sampled {} points from a {}x{} grid into {} clusters",
        points.len(),
        grid.width(),
        grid.height(),
        result.clusters.len()
    );

    Palette {
        entries: rank_clusters(result.clusters),
        sampled: points.len(),
        iterations: result.iterations,
        converged: result.converged,
    }
}

impl Palette {
    pub fn from_grid(grid: PixelGrid) -> PaletteBuilder {
        PaletteBuilder::from_grid(grid)
    }

    pub fn from_image(image: DynamicImage) -> PaletteBuilder {
        PaletteBuilder::from_image(image)
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PaletteEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn colors(&self) -> impl Iterator<Item = ColorPoint> + '_ {
        self.entries.iter().map(PaletteEntry::color)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(PaletteEntry::key)
    }

    /// The color covering the most samples, if there were any samples.
    pub fn dominant_color(&self) -> Option<ColorPoint> {
        self.entries.first().map(PaletteEntry::color)
    }

    /// How many points were sampled from the image. This equals the sum of the entries' counts.
    pub fn sampled(&self) -> usize {
        self.sampled
    }

    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|entry| entry.count() as u64).sum()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether clustering settled before hitting the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl PaletteBuilder {
    pub fn from_grid(grid: PixelGrid) -> Self {
        Self::with_source(Source::Grid(grid))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self::with_source(Source::Image(image.into_rgba8()))
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            color_count: DEFAULT_COLOR_COUNT,
            sample_step: DEFAULT_SAMPLE_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_dimension: DEFAULT_MAX_DIMENSION,
        }
    }

    pub fn color_count(self, color_count: usize) -> Self {
        Self { color_count, ..self }
    }

    pub fn sample_step(self, sample_step: usize) -> Self {
        Self { sample_step, ..self }
    }

    pub fn max_iterations(self, max_iterations: usize) -> Self {
        Self { max_iterations, ..self }
    }

    /// Bound on the longest side images are scaled down to before sampling. Grids given directly are used as-is.
    pub fn max_dimension(self, max_dimension: u32) -> Self {
        Self { max_dimension, ..self }
    }

    pub fn generate(self) -> Result<Palette, Error> {
        if self.color_count == 0 {
            return Err(Error::InvalidColorCount);
        }

        if self.max_iterations == 0 {
            return Err(Error::InvalidIterationCap);
        }

        let grid = match self.source {
            Source::Grid(grid) => grid,
            Source::Image(image) => PixelGrid::from_rgba(image, self.max_dimension),
        };

        Ok(cluster_grid(
            &grid,
            self.color_count,
            self.sample_step,
            self.max_iterations,
        ))
    }
}
