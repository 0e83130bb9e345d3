use crate::codec::terrain::CellPosition;
use crate::region::RegionId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no archive group for region {region}")]
    RegionNotFound { region: RegionId },

    #[error("failed to decompress group {group_id} for region {region}: {reason}")]
    Decompression { region: RegionId, group_id: u32, reason: String },

    #[error("terrain stream ended at byte {offset} while decoding cell {cell}")]
    StreamUnderrun { cell: CellPosition, offset: usize },

    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("region id out of range: {0}")]
    InvalidRegionId(u32),

    #[error("index {0} not present in archive")]
    UnsupportedIndex(u8),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("io error: {0}")]
    Io(String),
}

impl Error {
    /// True for failures that mean the region simply has no terrain data,
    /// as opposed to data that exists but is corrupt.
    pub fn is_absent(&self) -> bool {
        matches!(self, Error::RegionNotFound { .. } | Error::Decompression { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
