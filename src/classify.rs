//! Blocked / bridge tile classification

use crate::codec::terrain::{AttributeRecord, CellPosition, TileSettings, TileStream};
use crate::error::Result;
use crate::region::{RegionId, RegionTiles, Tile};

/// World tile for a cell of `region`. The tile height is the cell's plane.
pub fn world_tile(region: RegionId, cell: CellPosition) -> Tile {
    Tile::new(
        region.base_x() + i32::from(cell.local_x),
        region.base_y() + i32::from(cell.local_y),
        cell.plane,
    )
}

/// Collects classified tiles while a region's stream is walked
#[derive(Debug, Clone, Copy)]
pub struct TileClassifier {
    region: RegionId,
}

impl TileClassifier {
    pub fn new(region: RegionId) -> Self {
        Self { region }
    }

    /// Append the cell to each output whose flag is set. The two flags are
    /// independent, so a cell may land in both.
    pub fn classify(&self, cell: CellPosition, record: &AttributeRecord, out: &mut RegionTiles) {
        let settings = record.settings();
        if !settings.intersects(TileSettings::BLOCKED | TileSettings::BRIDGE) {
            return;
        }
        let tile = world_tile(self.region, cell);
        if settings.contains(TileSettings::BLOCKED) {
            out.blocked.push(tile);
        }
        if settings.contains(TileSettings::BRIDGE) {
            out.bridge.push(tile);
        }
    }

    /// Decode and classify a whole region's terrain stream
    pub fn classify_stream(&self, stream: &mut TileStream) -> Result<RegionTiles> {
        let mut out = RegionTiles::default();
        for item in stream {
            let (cell, record) = item?;
            self.classify(cell, &record, &mut out);
        }
        Ok(out)
    }
}

/// Decode `data` as `region`'s terrain and classify every cell
pub fn classify_region(region: RegionId, data: &[u8]) -> Result<RegionTiles> {
    TileClassifier::new(region).classify_stream(&mut TileStream::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::region::CELLS_PER_REGION;

    const SETTINGS: u8 = 49;

    /// Terrain stream where every cell is empty except the listed ones
    fn stream_with(cells: Vec<(usize, Vec<u8>)>) -> Vec<u8> {
        let mut data = Vec::new();
        for i in 0..CELLS_PER_REGION {
            match cells.iter().find(|(idx, _)| *idx == i) {
                Some((_, bytes)) => data.extend_from_slice(bytes),
                None => data.push(0),
            }
        }
        data
    }

    fn at(plane: u8, local_x: u8, local_y: u8) -> usize {
        CellPosition { plane, local_x, local_y }.index()
    }

    #[test]
    fn test_origin_blocked() {
        let data = stream_with(vec![(0, vec![SETTINGS + 1, 0])]);
        let tiles = classify_region(RegionId::new(0), &data).unwrap();
        assert_eq!(tiles.blocked, vec![Tile::new(0, 0, 0)]);
        assert!(tiles.bridge.is_empty());
    }

    #[test]
    fn test_bridge_only() {
        let data = stream_with(vec![(0, vec![2, 7, 51, 1, 100])]);
        let tiles = classify_region(RegionId::new(0), &data).unwrap();
        assert!(tiles.blocked.is_empty());
        assert_eq!(tiles.bridge, vec![Tile::new(0, 0, 0)]);
    }

    #[test]
    fn test_both_flags() {
        let region = RegionId::from_xz(50, 50);
        let data = stream_with(vec![(at(2, 10, 20), vec![SETTINGS + 3, 0])]);
        let tiles = classify_region(region, &data).unwrap();

        let expected = Tile::new(3200 + 10, 3200 + 20, 2);
        assert_eq!(tiles.blocked, vec![expected]);
        assert_eq!(tiles.bridge, vec![expected]);
    }

    #[test]
    fn test_roof_and_other_bits_not_emitted() {
        let data = stream_with(vec![(5, vec![SETTINGS + 4, 0]), (6, vec![SETTINGS + 8, 0])]);
        let tiles = classify_region(RegionId::new(0), &data).unwrap();
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_decoded_height_is_not_tile_height() {
        let data = stream_with(vec![(at(1, 0, 0), vec![SETTINGS + 1, 1, 200])]);
        let tiles = classify_region(RegionId::new(0), &data).unwrap();
        assert_eq!(tiles.blocked, vec![Tile::new(0, 0, 1)]);
    }

    #[test]
    fn test_stream_order_not_coordinate_order() {
        let region = RegionId::from_xz(1, 2);
        let blocked = vec![SETTINGS + 1, 0];
        let data = stream_with(vec![
            (at(0, 5, 0), blocked.clone()),
            (at(0, 0, 63), blocked.clone()),
            (at(1, 0, 0), blocked.clone()),
            (at(0, 5, 1), blocked.clone()),
        ]);
        let tiles = classify_region(region, &data).unwrap();

        let (bx, by) = (64, 128);
        assert_eq!(
            tiles.blocked,
            vec![
                Tile::new(bx, by + 63, 0),
                Tile::new(bx + 5, by, 0),
                Tile::new(bx + 5, by + 1, 0),
                Tile::new(bx, by, 1),
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let data = stream_with(vec![
            (17, vec![SETTINGS + 3, 90, 0]),
            (4000, vec![20, 1, SETTINGS + 1, 1, 3]),
            (9999, vec![SETTINGS + 2, 0]),
        ]);
        let region = RegionId::from_xz(40, 60);
        let first = classify_region(region, &data).unwrap();
        let second = classify_region(region, &data).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.blocked.len(), 2);
        assert_eq!(first.bridge.len(), 2);
    }

    #[test]
    fn test_underrun_is_an_error() {
        let mut data = stream_with(vec![(0, vec![SETTINGS + 1, 0])]);
        data.truncate(100);
        match classify_region(RegionId::new(0), &data) {
            Err(Error::StreamUnderrun { cell, .. }) => assert_eq!(cell.index(), 99),
            other => panic!("expected underrun, got {:?}", other),
        }
    }
}
