pub mod reader;
pub mod terrain;

pub use reader::BinaryReader;
pub use terrain::{AttributeRecord, CellPosition, TileSettings, TileStream, decode_cell};
