use sha2::{Digest, Sha256};

use crate::error::OntIdError;

/// Version byte prefixed to every rendered address.
const VERSION: u8 = 0x17;

/// A 20-byte ledger account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address([u8; 20]);

impl Address {
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Render in the ledger's base58check form: the version byte, the
    /// address bytes, then the first four bytes of a double SHA-256 over
    /// both.
    pub fn to_base58(&self) -> String {
        let mut data = Vec::with_capacity(25);
        data.push(VERSION);
        data.extend_from_slice(&self.0);
        let checksum = Sha256::digest(Sha256::digest(&data));
        data.extend_from_slice(&checksum[..4]);
        bs58::encode(data).into_string()
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = OntIdError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array = <[u8; 20]>::try_from(bytes)
            .map_err(|_| OntIdError::InvalidAddress { len: bytes.len() })?;
        Ok(Self(array))
    }
}
