//! Zip-backed archive: every file entry is one group.
//!
//! The group name is the entry's file name without directories or extension,
//! so `maps/m50_50.dat` becomes the group named `m50_50`. Entries are read
//! into a [`MemoryStore`] up front; group ids follow entry order. Zip does
//! its own compression, so entry contents are stored as raw terrain.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::debug;

use super::{Compression, IndexKind, MemoryStore};
use crate::error::{Error, Result};
use crate::hash::djb2;

pub fn open_zip(path: impl AsRef<Path>, kind: IndexKind) -> Result<MemoryStore> {
    let file = std::fs::File::open(path.as_ref())?;
    read_zip(file, kind)
}

pub fn read_zip<R: Read + Seek>(reader: R, kind: IndexKind) -> Result<MemoryStore> {
    let mut archive =
        ::zip::ZipArchive::new(reader).map_err(|e| Error::Archive(format!("ZIP error: {}", e)))?;

    let mut store = MemoryStore::new();
    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::Archive(format!("ZIP error: {}", e)))?;
        if file.is_dir() {
            continue;
        }
        let name = group_name(file.name()).to_string();
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;

        let group = store.insert_group(kind, djb2(&name), Compression::None, data);
        debug!(name = %name, group_id = group.group_id, "loaded group");
    }
    Ok(store)
}

/// Read a zip archive held in memory
pub fn read_zip_bytes(data: &[u8], kind: IndexKind) -> Result<MemoryStore> {
    read_zip(Cursor::new(data), kind)
}

fn group_name(entry: &str) -> &str {
    let file = entry.rsplit('/').next().unwrap_or(entry);
    match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    }
}
