use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{Error, Result};

/// How a stored group's bytes are packed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Zlib,
    Zstd,
}

/// Unwrap a stored group container packed with `compression`
pub fn decompress(data: &[u8], compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(data.to_vec()),
        Compression::Zlib => {
            let mut decoder = ZlibDecoder::new(data);
            let mut decompressed = Vec::new();
            decoder
                .read_to_end(&mut decompressed)
                .map_err(|e| Error::Archive(format!("zlib error: {}", e)))?;
            Ok(decompressed)
        }
        Compression::Zstd => {
            zstd::decode_all(data).map_err(|e| Error::Archive(format!("zstd error: {}", e)))
        }
    }
}
