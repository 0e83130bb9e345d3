//! Region terrain decoding
//!
//! Reads map region terrain groups out of a game asset archive, decodes the
//! per-cell attribute stream and reports which world tiles are blocked and
//! which belong to bridges.

pub mod archive;
pub mod classify;
pub mod codec;
pub mod error;
pub mod hash;
pub mod loader;
pub mod locator;
pub mod region;

pub use error::{Error, Result};
pub use archive::{ArchiveStore, Compression, Group, Index, IndexKind, MemoryStore, XteaKey};
pub use classify::{TileClassifier, classify_region, world_tile};
pub use codec::{AttributeRecord, CellPosition, TileSettings, TileStream, decode_cell};
pub use loader::MapLoader;
pub use locator::{MatchPolicy, RegionLocator};
pub use region::{RegionId, RegionTiles, Tile, CELLS_PER_REGION, PLANES, REGION_SIZE};
