//! `#Strings` heap builder.
//!
//! The heap is a sequence of NUL-terminated UTF-8 strings. Offset 0 always holds the
//! empty string; identical strings are stored once.
//!
//! # Reference
//! - [ECMA-335 II.24.2.3](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf)

use std::collections::HashMap;

use crate::Result;

/// Builds the `#Strings` heap, handing out offsets for the table columns.
///
/// # Examples
///
/// ```rust
/// use cilmeta::metadata::streams::StringsHeapBuilder;
///
/// let mut strings = StringsHeapBuilder::new();
/// let name = strings.add("Program")?;
/// assert_eq!(name, 1);
/// assert_eq!(strings.add("Program")?, name);
/// assert_eq!(strings.add("")?, 0);
/// assert_eq!(strings.data(), b"\0Program\0");
/// # Ok::<(), cilmeta::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StringsHeapBuilder {
    data: Vec<u8>,
    offsets: HashMap<String, u32>,
}

impl Default for StringsHeapBuilder {
    fn default() -> Self {
        StringsHeapBuilder {
            data: vec![0],
            offsets: HashMap::new(),
        }
    }
}

impl StringsHeapBuilder {
    /// Creates a heap holding only the empty string.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value` and returns its offset. The empty string is always offset 0.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `value` contains a NUL character, which would
    /// end the entry early, or the heap outgrows 32-bit offsets.
    pub fn add(&mut self, value: &str) -> Result<u32> {
        if value.is_empty() {
            return Ok(0);
        }

        if let Some(offset) = self.offsets.get(value) {
            return Ok(*offset);
        }

        if value.contains('\0') {
            return Err(malformed_error!(
                "String {:?} contains a NUL character",
                value
            ));
        }

        let offset = u32::try_from(self.data.len())
            .map_err(|_| malformed_error!("#Strings heap exceeds 4 GiB"))?;
        self.data.extend_from_slice(value.as_bytes());
        self.data.push(0);
        self.offsets.insert(value.to_string(), offset);
        Ok(offset)
    }

    /// The string stored at `offset`, if `offset` starts an entry.
    #[must_use]
    pub fn get(&self, offset: u32) -> Option<&str> {
        if offset == 0 {
            return Some("");
        }

        self.offsets
            .iter()
            .find(|(_, candidate)| **candidate == offset)
            .map(|(value, _)| value.as_str())
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

    /// True if only the empty string is stored.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates() {
        let mut strings = StringsHeapBuilder::new();
        assert!(strings.is_empty());

        let system = strings.add("System").unwrap();
        let object = strings.add("Object").unwrap();
        assert_eq!(system, 1);
        assert_eq!(object, 8);
        assert_eq!(strings.add("System").unwrap(), system);
        assert_eq!(strings.get(object), Some("Object"));
        assert_eq!(strings.get(3), None);
        assert_eq!(strings.data(), b"\0System\0Object\0");
    }

    #[test]
    fn large_boundary() {
        let mut strings = StringsHeapBuilder::new();
        // 1 + 65534 bytes of text and terminator
        strings.add(&"a".repeat(65_533)).unwrap();
        assert_eq!(strings.len(), 65_535);
        assert!(!strings.is_large());

        strings.add("b").unwrap();
        assert!(strings.is_large());
    }

    #[test]
    fn rejects_interior_nul() {
        let mut strings = StringsHeapBuilder::new();
        strings.add("Good").unwrap();

        assert!(matches!(
            strings.add("Bad\0Name"),
            Err(crate::Error::Malformed { .. })
        ));
        assert!(strings.add("\0").is_err());
        assert_eq!(strings.data(), b"\0Good\0");
        assert_eq!(strings.get(6), None);
    }
}
