//! Strong-name identity: a full public key or the 8-byte token derived from it.

use sha1::{Digest, Sha1};

use crate::Result;

/// The strong-name part of an assembly identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// The full public key blob
    PubKey(Vec<u8>),
    /// The public key token, in display order
    Token([u8; 8]),
}

impl Identity {
    /// Create an `Identity` from raw data.
    ///
    /// # Arguments
    /// * `data`    - The data to create the identity from
    /// * `is_pub`  - Is it a token, or a public-key
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a token is not exactly 8 bytes.
    pub fn from(data: &[u8], is_pub: bool) -> Result<Self> {
        if is_pub {
            return Ok(Identity::PubKey(data.to_vec()));
        }

        let token: [u8; 8] = data
            .try_into()
            .map_err(|_| malformed_error!("Public key token must be 8 bytes, got {}", data.len()))?;
        Ok(Identity::Token(token))
    }

    /// The public key token: the last 8 bytes of the SHA-1 hash of the key, reversed.
    #[must_use]
    pub fn to_token(&self) -> [u8; 8] {
        match self {
            Identity::PubKey(key) => {
                let hash = Sha1::digest(key);
                let mut token = [0_u8; 8];
                token.copy_from_slice(&hash[hash.len() - 8..]);
                token.reverse();
                token
            }
            Identity::Token(token) => *token,
        }
    }

    /// The bytes stored in an `AssemblyRef` row for this identity.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Identity::PubKey(key) => key,
            Identity::Token(token) => token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecma_key_token() {
        let ecma_key = [0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0];
        let identity = Identity::from(&ecma_key, true).unwrap();
        assert_eq!(hex::encode(identity.to_token()), "b77a5c561934e089");
    }

    #[test]
    fn token_passthrough() {
        let identity = Identity::from(&[1, 2, 3, 4, 5, 6, 7, 8], false).unwrap();
        assert_eq!(identity.to_token(), [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(identity.as_bytes().len(), 8);
        assert!(Identity::from(&[1, 2, 3], false).is_err());
    }
}
