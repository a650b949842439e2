use super::error::AboError;
use byteorder::{ByteOrder, LittleEndian};
use std::io::{ErrorKind, Read};

// Upper bound on speculative allocation for counts read from the file.
const PREALLOCATION_LIMIT: usize = 1 << 16;

/// A fail-fast little-endian cursor over any byte source.
///
/// Every read is all-or-nothing: if the source ends before the requested
/// number of bytes has been delivered, the read fails with
/// [`AboError::Truncated`] carrying the offset at which input ran out.
/// The decoder is written once against this type and is handed either a
/// file-backed or a buffer-backed source.
pub struct ByteCursor<R> {
    inner: R,
    offset: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Fills `buf` completely or fails. An empty `buf` is a no-op.
    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), AboError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(AboError::Truncated {
                        offset: self.offset + filled as u64,
                        missing: buf.len() - filled,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(AboError::Io(e)),
            }
        }
        self.offset += filled as u64;
        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], AboError> {
        let mut buf = [0u8; N];
        self.read_exact_into(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, AboError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, AboError> {
        Ok(LittleEndian::read_u16(&self.read_array::<2>()?))
    }

    pub fn read_i16(&mut self) -> Result<i16, AboError> {
        Ok(LittleEndian::read_i16(&self.read_array::<2>()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, AboError> {
        Ok(LittleEndian::read_u32(&self.read_array::<4>()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, AboError> {
        Ok(LittleEndian::read_f32(&self.read_array::<4>()?))
    }

    /// Reads `N` consecutive little-endian `f32` values.
    pub fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N], AboError> {
        let mut values = [0.0f32; N];
        for value in &mut values {
            *value = self.read_f32()?;
        }
        Ok(values)
    }

    /// Reads exactly `len` raw bytes.
    ///
    /// The buffer grows as data arrives, so a corrupt length field cannot
    /// trigger a huge up-front allocation.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, AboError> {
        let mut buf = Vec::with_capacity(capacity_hint(len));
        let start = self.offset;
        let read = (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut buf)
            .map_err(AboError::Io)?;
        self.offset += read as u64;
        if read < len {
            return Err(AboError::Truncated {
                offset: start + read as u64,
                missing: len - read,
            });
        }
        Ok(buf)
    }

    /// Reads `count` little-endian `u32` values.
    pub fn read_u32s(&mut self, count: usize) -> Result<Vec<u32>, AboError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let byte_len = count.checked_mul(4).ok_or(AboError::Truncated {
            offset: self.offset,
            missing: usize::MAX,
        })?;
        let bytes = self.read_bytes(byte_len)?;
        let mut values = vec![0u32; count];
        LittleEndian::read_u32_into(&bytes, &mut values);
        Ok(values)
    }

    /// Reads everything up to the end of the source.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>, AboError> {
        let mut buf = Vec::new();
        let read = self.inner.read_to_end(&mut buf)?;
        self.offset += read as u64;
        Ok(buf)
    }
}

/// Caps a count read from the file before using it as a `Vec` capacity.
pub fn capacity_hint(count: usize) -> usize {
    count.min(PREALLOCATION_LIMIT)
}
