//! Archive store interface
//!
//! The terrain decoder never touches the cache file system directly. It asks
//! an [`ArchiveStore`] for an index's group directory and for the decompressed
//! bytes of one group.

pub mod container;
pub mod zip;

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::hash::djb2;

pub use self::container::Compression;
pub use self::zip::{open_zip, read_zip, read_zip_bytes};

/// XTEA key for encrypted groups
pub type XteaKey = [i32; 4];

/// Archive indices of the asset cache that this crate reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IndexKind {
    Maps = 5,
}

impl IndexKind {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// One entry of an index's group directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub index: IndexKind,
    pub group_id: u32,
    pub name_hash: i32,
}

/// Group directory of one archive index, in stored order
#[derive(Debug, Clone)]
pub struct Index {
    pub kind: IndexKind,
    pub groups: Vec<Group>,
}

pub trait ArchiveStore {
    fn find_index(&self, kind: IndexKind) -> Result<&Index>;

    fn decompress_group(&self, group: &Group, key: Option<&XteaKey>) -> Result<Vec<u8>>;
}

/// Store that keeps every group's container bytes in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    indices: HashMap<IndexKind, Index>,
    containers: HashMap<(IndexKind, u32), (Compression, Vec<u8>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an uncompressed named group to `kind`, assigning the next group id
    pub fn with_group(self, kind: IndexKind, name: &str, data: Vec<u8>) -> Self {
        self.with_compressed_group(kind, name, Compression::None, data)
    }

    pub fn with_compressed_group(
        mut self,
        kind: IndexKind,
        name: &str,
        compression: Compression,
        container: Vec<u8>,
    ) -> Self {
        self.insert_group(kind, djb2(name), compression, container);
        self
    }

    /// Add a group with an explicit name hash, assigning the next group id
    pub fn insert_group(
        &mut self,
        kind: IndexKind,
        name_hash: i32,
        compression: Compression,
        container: Vec<u8>,
    ) -> Group {
        let index = self.indices.entry(kind).or_insert_with(|| Index {
            kind,
            groups: Vec::new(),
        });
        let group = Group {
            index: kind,
            group_id: index.groups.len() as u32,
            name_hash,
        };
        index.groups.push(group);
        self.containers.insert((kind, group.group_id), (compression, container));
        group
    }

    /// Add a directory entry with no stored data behind it
    pub fn insert_missing(&mut self, kind: IndexKind, name_hash: i32) -> Group {
        let group = self.insert_group(kind, name_hash, Compression::None, Vec::new());
        self.containers.remove(&(kind, group.group_id));
        group
    }

    pub fn group_count(&self, kind: IndexKind) -> usize {
        self.indices.get(&kind).map_or(0, |i| i.groups.len())
    }
}

impl ArchiveStore for MemoryStore {
    fn find_index(&self, kind: IndexKind) -> Result<&Index> {
        self.indices
            .get(&kind)
            .ok_or(Error::UnsupportedIndex(kind.id()))
    }

    fn decompress_group(&self, group: &Group, key: Option<&XteaKey>) -> Result<Vec<u8>> {
        if key.is_some_and(|k| k.iter().any(|&w| w != 0)) {
            return Err(Error::Archive("encrypted groups are not supported".into()));
        }
        let (compression, data) = self
            .containers
            .get(&(group.index, group.group_id))
            .ok_or_else(|| Error::Archive(format!("group {} has no data", group.group_id)))?;
        container::decompress(data, *compression)
    }
}
