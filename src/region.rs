//! Region identifiers and world-space tile output

use std::fmt;

use serde::Serialize;

use crate::error::Error;

/// Width and length of a region in tiles
pub const REGION_SIZE: u32 = 64;
/// Number of terrain planes per region
pub const PLANES: u32 = 4;
/// Number of cells in one region's terrain stream
pub const CELLS_PER_REGION: usize = (PLANES * REGION_SIZE * REGION_SIZE) as usize;

/// Packed region coordinate: `(x << 8) | z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegionId(pub u16);

impl RegionId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn from_xz(x: u8, z: u8) -> Self {
        Self(((x as u16) << 8) | z as u16)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn x(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn z(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// World x of the region's south-west corner
    pub const fn base_x(self) -> i32 {
        (self.x() as i32) << 6
    }

    /// World y of the region's south-west corner
    pub const fn base_y(self) -> i32 {
        (self.z() as i32) << 6
    }

    /// Name of the archive group holding this region's terrain
    pub fn archive_name(self) -> String {
        format!("m{}_{}", self.x(), self.z())
    }
}

impl TryFrom<u32> for RegionId {
    type Error = Error;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        u16::try_from(raw)
            .map(RegionId)
            .map_err(|_| Error::InvalidRegionId(raw))
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.0, self.x(), self.z())
    }
}

/// A tile in absolute world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    /// Terrain plane
    pub height: u8,
}

impl Tile {
    pub fn new(x: i32, y: i32, height: u8) -> Self {
        Self { x, y, height }
    }
}

/// Classified tiles of one region, in stream order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionTiles {
    pub blocked: Vec<Tile>,
    pub bridge: Vec<Tile>,
}

impl RegionTiles {
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty() && self.bridge.is_empty()
    }
}
