//! Heap builders for the `#Strings`, `#Blob` and `#GUID` streams.
//!
//! Table rows reference heap entries by offset (strings, blobs) or by 1-based index
//! (GUIDs). The builders hand out these references and report whether the finished heap
//! needs 4-byte references, which is what [`HeapSizes::from_heaps`] turns into the flags
//! consumed by the tables stream writer.
//!
//! # Examples
//!
//! ```rust
//! use cilmeta::metadata::streams::{BlobHeapBuilder, GuidHeapBuilder, StringsHeapBuilder};
//! use cilmeta::metadata::tables::HeapSizes;
//!
//! let mut strings = StringsHeapBuilder::new();
//! let blobs = BlobHeapBuilder::new();
//! let guids = GuidHeapBuilder::new();
//! strings.add("Module.dll")?;
//!
//! assert_eq!(HeapSizes::from_heaps(&strings, &blobs, &guids), HeapSizes::empty());
//! # Ok::<(), cilmeta::Error>(())
//! ```
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 24.2 - Metadata physical layout

mod blob;
mod guid;
mod strings;

pub use blob::BlobHeapBuilder;
pub use guid::GuidHeapBuilder;
pub use strings::StringsHeapBuilder;

use crate::metadata::tables::HeapSizes;

impl HeapSizes {
    /// The heap size flags matching the current size of the three heaps.
    #[must_use]
    pub fn from_heaps(
        strings: &StringsHeapBuilder,
        blobs: &BlobHeapBuilder,
        guids: &GuidHeapBuilder,
    ) -> Self {
        let mut sizes = HeapSizes::empty();
        sizes.set(HeapSizes::STRINGS, strings.is_large());
        sizes.set(HeapSizes::BLOB, blobs.is_large());
        sizes.set(HeapSizes::GUID, guids.is_large());
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_follow_heaps() {
        let mut strings = StringsHeapBuilder::new();
        let mut blobs = BlobHeapBuilder::new();
        let guids = GuidHeapBuilder::new();

        strings.add(&"x".repeat(70_000)).unwrap();
        assert_eq!(
            HeapSizes::from_heaps(&strings, &blobs, &guids),
            HeapSizes::STRINGS
        );

        blobs.add(&vec![1; 70_000]).unwrap();
        assert_eq!(
            HeapSizes::from_heaps(&strings, &blobs, &guids),
            HeapSizes::STRINGS | HeapSizes::BLOB
        );
    }
}
