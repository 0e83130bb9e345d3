//! End-to-end region loading: locate, decompress, decode, classify.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::archive::{ArchiveStore, IndexKind};
use crate::classify::TileClassifier;
use crate::codec::terrain::TileStream;
use crate::error::{Error, Result};
use crate::locator::{MatchPolicy, RegionLocator};
use crate::region::{RegionId, RegionTiles};

/// Loads blocked and bridge tiles for map regions from an archive store
pub struct MapLoader<S> {
    store: S,
    locator: RegionLocator,
}

impl<S: ArchiveStore> MapLoader<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locator: RegionLocator::new(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.locator = RegionLocator::with_policy(policy);
        self
    }

    /// Decoded, decompressed terrain bytes for `region`
    pub fn terrain_bytes(&self, region: RegionId) -> Result<Vec<u8>> {
        let index = self.store.find_index(IndexKind::Maps)?;
        let group = self
            .locator
            .locate(index, region)
            .ok_or(Error::RegionNotFound { region })?;

        self.store
            .decompress_group(group, None)
            .map_err(|e| Error::Decompression {
                region,
                group_id: group.group_id,
                reason: e.to_string(),
            })
    }

    /// Load one region, reporting every failure
    pub fn load_region(&self, region: RegionId) -> Result<RegionTiles> {
        let data = self.terrain_bytes(region)?;
        let mut stream = TileStream::new(&data);
        let tiles = TileClassifier::new(region).classify_stream(&mut stream)?;

        if stream.trailing_bytes() > 0 {
            debug!(%region, trailing = stream.trailing_bytes(), "terrain stream has trailing bytes");
        }
        debug!(
            %region,
            blocked = tiles.blocked.len(),
            bridge = tiles.bridge.len(),
            "decoded region"
        );
        Ok(tiles)
    }

    /// Load one region, treating absent regions as empty.
    ///
    /// Missing groups and groups that fail to decompress yield empty output.
    /// A stream that ends early is still an error.
    pub fn load_blocked_tiles(&self, region: RegionId) -> Result<RegionTiles> {
        match self.load_region(region) {
            Err(e @ Error::RegionNotFound { .. }) => {
                debug!(%region, "{}", e);
                Ok(RegionTiles::default())
            }
            Err(e @ Error::Decompression { .. }) => {
                warn!(%region, "{}", e);
                Ok(RegionTiles::default())
            }
            other => other,
        }
    }
}

impl<S: ArchiveStore + Sync> MapLoader<S> {
    /// Load many regions in parallel. Results keep the input order and a
    /// failing region never affects the others.
    pub fn load_regions(&self, regions: &[RegionId]) -> Vec<(RegionId, Result<RegionTiles>)> {
        regions
            .par_iter()
            .map(|&region| (region, self.load_region(region)))
            .collect()
    }
}
