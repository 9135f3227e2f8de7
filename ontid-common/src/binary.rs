use crate::error::{OntIdError, Result};

/// Sequential reader over the ledger's binary serialization.
///
/// Variable-length fields carry a compact-size prefix: a single byte below
/// 0xFD is the length itself, otherwise the byte is a marker selecting a
/// 16-, 32- or 64-bit little-endian extension (0xFD, 0xFE, 0xFF).
///
/// A read that would run past the end of the buffer fails with
/// `TruncatedInput` and leaves the cursor unchanged, so callers that treat
/// a truncated field as absent see every subsequent read fail the same way.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(OntIdError::TruncatedInput {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a compact-size unsigned integer.
    pub fn read_var_uint(&mut self) -> Result<u64> {
        let start = self.pos;
        let result = self.read_byte().and_then(|marker| match marker {
            0xFD => Ok(u64::from(u16::from_le_bytes(self.read_array()?))),
            0xFE => Ok(u64::from(u32::from_le_bytes(self.read_array()?))),
            0xFF => Ok(u64::from_le_bytes(self.read_array()?)),
            len => Ok(u64::from(len)),
        });
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Read a compact-size length prefix followed by that many bytes.
    pub fn read_var_bytes(&mut self) -> Result<Vec<u8>> {
        let start = self.pos;
        let result = self.read_var_uint().and_then(|len| {
            // Lengths beyond the address space cannot fit the buffer either.
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            self.read_bytes(len).map(<[u8]>::to_vec)
        });
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }
}

/// Append a compact-size unsigned integer in its minimal form.
pub fn write_var_uint(out: &mut Vec<u8>, value: u64) {
    if value < 0xFD {
        out.push(value as u8);
    } else if value <= u64::from(u16::MAX) {
        out.push(0xFD);
        out.extend_from_slice(&(value as u16).to_le_bytes());
    } else if value <= u64::from(u32::MAX) {
        out.push(0xFE);
        out.extend_from_slice(&(value as u32).to_le_bytes());
    } else {
        out.push(0xFF);
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Append a compact-size length prefix followed by the bytes themselves.
pub fn write_var_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    write_var_uint(out, bytes.len() as u64);
    out.extend_from_slice(bytes);
}
