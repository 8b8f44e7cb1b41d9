//! `#Blob` heap builder.
//!
//! Every entry is prefixed with its length as a compressed unsigned integer. Offset 0
//! holds the empty blob; identical blobs are stored once.
//!
//! # Reference
//! - [ECMA-335 II.24.2.4](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::collections::HashMap;

use crate::{file::io::write_compressed_uint, Result};

/// Builds the `#Blob` heap, handing out offsets for signature and value columns.
#[derive(Debug, Clone)]
pub struct BlobHeapBuilder {
    data: Vec<u8>,
    offsets: HashMap<Vec<u8>, u32>,
}

impl Default for BlobHeapBuilder {
    fn default() -> Self {
        BlobHeapBuilder {
            data: vec![0],
            offsets: HashMap::new(),
        }
    }
}

impl BlobHeapBuilder {
    /// Creates a heap holding only the empty blob.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` and returns its offset. The empty blob is always offset 0.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for blobs longer than `0x1FFF_FFFF` bytes.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add(&mut self, value: &[u8]) -> Result<u32> {
        if value.is_empty() {
            return Ok(0);
        }

        if let Some(offset) = self.offsets.get(value) {
            return Ok(*offset);
        }

        let length = u32::try_from(value.len())
            .map_err(|_| malformed_error!("Blob of {} bytes is too large", value.len()))?;

        let offset = self.data.len() as u32;
        write_compressed_uint(&mut self.data, length)?;
        self.data.extend_from_slice(value);
        self.offsets.insert(value.to_vec(), offset);
        Ok(offset)
    }

    /// The heap bytes, unpadded.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Current size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if only the empty blob is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    }

    /// True once offsets into this heap need 4 bytes.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.data.len() > usize::from(u16::MAX)
    }
}
