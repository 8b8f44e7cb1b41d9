//! `#GUID` heap builder.
//!
//! The heap is an array of 16-byte GUIDs addressed by 1-based index; index 0 is the
//! null GUID reference.
//!
//! # Reference
//! - [ECMA-335 II.24.2.5](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use uguid::Guid;

/// Builds the `#GUID` heap.
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::streams::GuidHeapBuilder;
///
/// let mut guids = GuidHeapBuilder::new();
/// let mvid = guids.add(uguid::guid!("d437908e-65e6-487c-9735-7bdff699bea5"));
/// assert_eq!(mvid, 1);
/// assert_eq!(guids.data().len(), 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GuidHeapBuilder {
    guids: Vec<Guid>,
}

impl GuidHeapBuilder {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `guid` and returns its 1-based index. Repeated GUIDs share an index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add(&mut self, guid: Guid) -> u32 {
        if let Some(position) = self.guids.iter().position(|candidate| *candidate == guid) {
            return position as u32 + 1;
        }

        self.guids.push(guid);
        self.guids.len() as u32
    }

    /// The GUID at 1-based `index`.
    #[must_use]
    pub fn get(&self, index: u32) -> Option<Guid> {
        let position = index.checked_sub(1)?;
        self.guids.get(position as usize).copied()
    }

    /// The heap bytes.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.guids.iter().flat_map(|guid| guid.to_bytes()).collect()
    }

    /// Number of stored GUIDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guids.len()
    }

    /// True if no GUID is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guids.is_empty()
    }

    /// True once indices into this heap need 4 bytes.
    #[must_use]
    pub fn is_large(&self) -> bool {
        self.guids.len() * 16 > usize::from(u16::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let mut guids = GuidHeapBuilder::new();
        let first = guids.add(uguid::guid!("d437908e-65e6-487c-9735-7bdff699bea5"));
        let second = guids.add(uguid::guid!("AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA"));
        assert_eq!((first, second), (1, 2));
        assert_eq!(
            guids.add(uguid::guid!("d437908e-65e6-487c-9735-7bdff699bea5")),
            1
        );

        #[rustfmt::skip]
        let expected: [u8; 32] = [
            0x8e, 0x90, 0x37, 0xd4, 0xe6, 0x65, 0x7c, 0x48, 0x97, 0x35, 0x7b, 0xdf, 0xf6, 0x99, 0xbe, 0xa5,
            0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA,
        ];
        assert_eq!(guids.data(), expected);
        assert_eq!(guids.get(2), Some(uguid::guid!("AAAAAAAA-AAAA-AAAA-AAAA-AAAAAAAAAAAA")));
        assert_eq!(guids.get(0), None);
    }
}
