//! Region terrain stream decoding
//!
//! A region's terrain group is an undelimited run of opcode-tagged attribute
//! lists, one list per cell. Cells are stored plane-major, then local x, then
//! local y, and nothing in the stream marks where a cell starts: the decoder
//! must walk every cell in exactly that order to stay in sync.

use std::fmt;

use bitflags::bitflags;

use super::BinaryReader;
use crate::error::{Error, Result};
use crate::region::{CELLS_PER_REGION, REGION_SIZE};

/// Cell has no further attributes
pub const OPCODE_END: u8 = 0;
/// Next byte is the cell height; ends the cell
pub const OPCODE_HEIGHT: u8 = 1;
/// First overlay opcode; shape is encoded in the opcode itself
pub const OPCODE_OVERLAY_MIN: u8 = 2;
pub const OPCODE_OVERLAY_MAX: u8 = 49;
/// First settings opcode; `settings = opcode - 49`
pub const OPCODE_SETTINGS_MIN: u8 = 50;
pub const OPCODE_SETTINGS_MAX: u8 = 81;
/// First underlay opcode; `underlay = opcode - 82`
pub const OPCODE_UNDERLAY_MIN: u8 = 82;

bitflags! {
    /// Per-tile settings bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileSettings: u8 {
        /// Tile cannot be walked on
        const BLOCKED = 0x01;
        /// Tile belongs to a bridge; the walkable surface is one plane up
        const BRIDGE = 0x02;
        /// Tile is under a roof
        const ROOF = 0x04;
    }
}

/// Attributes decoded for a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeRecord {
    pub height: u8,
    /// Raw overlay opcode (2..=49), 0 when the cell has no overlay
    pub overlay_opcode: u8,
    pub overlay_id: u8,
    pub overlay_path: u8,
    pub overlay_rotation: u8,
    pub settings: u8,
    pub underlay_id: u8,
}

impl AttributeRecord {
    /// Settings bitmask, keeping bits that have no named flag
    pub fn settings(&self) -> TileSettings {
        TileSettings::from_bits_retain(self.settings)
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay_opcode != 0
    }
}

/// Location of a cell inside its region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub plane: u8,
    pub local_x: u8,
    pub local_y: u8,
}

impl CellPosition {
    /// Position of the `index`th cell in stream order
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELLS_PER_REGION);
        let size = REGION_SIZE as usize;
        Self {
            plane: (index / (size * size)) as u8,
            local_x: ((index / size) % size) as u8,
            local_y: (index % size) as u8,
        }
    }

    /// Inverse of [`CellPosition::from_index`]
    pub fn index(&self) -> usize {
        let size = REGION_SIZE as usize;
        (self.plane as usize * size + self.local_x as usize) * size + self.local_y as usize
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plane {} ({}, {})", self.plane, self.local_x, self.local_y)
    }
}

/// Decode one cell's attribute list.
///
/// Reads opcodes until a height or end opcode closes the cell. Overlay,
/// settings and underlay opcodes can appear in any order before that; a
/// repeated opcode overwrites the earlier value.
pub fn decode_cell(reader: &mut BinaryReader) -> Result<AttributeRecord> {
    let mut record = AttributeRecord::default();
    loop {
        let opcode = reader.read_u8()?;
        match opcode {
            OPCODE_END => return Ok(record),
            OPCODE_HEIGHT => {
                record.height = reader.read_u8()?;
                return Ok(record);
            }
            OPCODE_OVERLAY_MIN..=OPCODE_OVERLAY_MAX => {
                let shape = opcode - OPCODE_OVERLAY_MIN;
                record.overlay_opcode = opcode;
                record.overlay_id = reader.read_u8()?;
                record.overlay_path = shape / 4;
                record.overlay_rotation = shape & 3;
            }
            OPCODE_SETTINGS_MIN..=OPCODE_SETTINGS_MAX => {
                record.settings = opcode - (OPCODE_SETTINGS_MIN - 1);
            }
            OPCODE_UNDERLAY_MIN..=u8::MAX => {
                record.underlay_id = opcode - OPCODE_UNDERLAY_MIN;
            }
        }
    }
}

/// Iterator over every cell of a region's terrain stream, in stream order.
///
/// Yields exactly [`CELLS_PER_REGION`] records for a well-formed stream. If
/// the data runs out first, yields one [`Error::StreamUnderrun`] naming the
/// cell that could not be completed and then stops.
pub struct TileStream<'a> {
    reader: BinaryReader<'a>,
    next: usize,
}

impl<'a> TileStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BinaryReader::new(data),
            next: 0,
        }
    }

    /// Number of cells decoded so far
    pub fn cells_decoded(&self) -> usize {
        self.next
    }

    /// Bytes left after the last decoded cell
    pub fn trailing_bytes(&self) -> usize {
        self.reader.remaining()
    }
}

impl Iterator for TileStream<'_> {
    type Item = Result<(CellPosition, AttributeRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= CELLS_PER_REGION {
            return None;
        }
        let cell = CellPosition::from_index(self.next);
        match decode_cell(&mut self.reader) {
            Ok(record) => {
                self.next += 1;
                Some(Ok((cell, record)))
            }
            Err(Error::UnexpectedEof) => {
                self.next = CELLS_PER_REGION;
                Some(Err(Error::StreamUnderrun {
                    cell,
                    offset: self.reader.position(),
                }))
            }
            Err(e) => {
                self.next = CELLS_PER_REGION;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(CELLS_PER_REGION - self.next))
    }
}
