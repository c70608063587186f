use std::sync::OnceLock;

use rayon::prelude::*;
use tracing::info;

use crate::consts::HSV_LOOKUP_ENTRIES;

use super::hsv::rgb_to_hsv;

static SHARED_LOOKUP: OnceLock<HsvLookup> = OnceLock::new();

/// Precomputed HSV triple for every 24-bit RGB value.
///
/// Indexed as `(r << 16) | (g << 8) | b`. Read-only once built.
pub struct HsvLookup {
    table: Vec<[f32; 3]>,
}

impl HsvLookup {
    /// Build a fresh table. Prefer [`HsvLookup::shared`] outside of tests.
    pub fn build() -> Self {
        let table = (0..HSV_LOOKUP_ENTRIES)
            .into_par_iter()
            .map(|i| rgb_to_hsv((i >> 16) as u8, (i >> 8) as u8, i as u8))
            .collect();
        Self { table }
    }

    /// Process-wide table, built on first call and shared by reference afterwards.
    pub fn shared() -> &'static HsvLookup {
        SHARED_LOOKUP.get_or_init(|| {
            info!(entries = HSV_LOOKUP_ENTRIES, "Building RGB to HSV lookup table");
            Self::build()
        })
    }

    #[inline]
    pub fn get(&self, r: u8, g: u8, b: u8) -> [f32; 3] {
        self.table[((r as usize) << 16) | ((g as usize) << 8) | b as usize]
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl std::fmt::Debug for HsvLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HsvLookup")
            .field("entries", &self.table.len())
            .finish()
    }
}
