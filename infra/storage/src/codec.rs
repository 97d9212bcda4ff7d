use crate::error::{StorageError, StorageErrorExt};

/// On-disk encoding of stored bytes.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Compression {
    /// Bytes are stored as given.
    #[default]
    None,
    /// LZ4 block format with the original length prepended.
    Lz4,
}

impl Compression {
    pub(crate) fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Lz4 => lz4_flex::compress_prepend_size(data),
        }
    }

    pub(crate) fn decode(self, stored: Vec<u8>) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::None => Ok(stored),
            Self::Lz4 => lz4_flex::decompress_size_prepended(&stored).context("Lz4 block"),
        }
    }
}
