use crate::{Cluster, ColorPoint};

/// One bucket of the final palette: a cluster's color, its canonical key and how many sampled points it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteEntry {
    key: String,
    color: ColorPoint,
    count: u32,
}

impl PaletteEntry {
    pub fn new(color: ColorPoint, count: u32) -> PaletteEntry {
        Self {
            key: color.key(),
            color,
            count,
        }
    }

    /// The `R-G-B` key of the entry's color.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn color(&self) -> ColorPoint {
        self.color
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.color.rgb()
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl From<Cluster> for PaletteEntry {
    fn from(cluster: Cluster) -> Self {
        Self::new(cluster.centroid(), cluster.population())
    }
}

/// Turn clusters into palette entries ordered by population, largest first. Clusters of equal population keep the
/// order they were given in.
pub fn rank_clusters(clusters: impl IntoIterator<Item = Cluster>) -> Vec<PaletteEntry> {
    let mut entries: Vec<PaletteEntry> = clusters.into_iter().map(PaletteEntry::from).collect();

    // sort_by_key is stable
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.count));
    entries
}
