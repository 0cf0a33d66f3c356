//! Bit-level buffers for PER encoding.
//!
//! `BitWriter` grows as bits are appended and `BitReader` reads from a borrowed
//! slice with bounds checking. Bits are written and read MSB-first within each
//! octet, the order used by ASN.1 PER.

use thiserror::Error;

/// Errors raised by bit-level reads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitBufferError {
    /// Attempted to read past the end of the buffer
    #[error("buffer overrun: needed {needed} bits, {remaining} remaining")]
    Overrun { needed: usize, remaining: usize },

    /// More than 64 bits requested in a single read
    #[error("invalid bit count: {0}")]
    InvalidLength(usize),
}

/// A growable bit writer.
///
/// # Example
/// ```
/// use e2node_common::BitWriter;
///
/// let mut writer = BitWriter::new();
/// writer.write_bits(0b101, 3);
/// writer.octet_align();
/// writer.write_octets(&[0xff]);
/// assert_eq!(writer.into_bytes(), vec![0b1010_0000, 0xff]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with room for `octets` bytes.
    pub fn with_capacity(octets: usize) -> Self {
        Self {
            data: Vec::with_capacity(octets),
            bit_len: 0,
        }
    }

    /// Appends a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        let bit_index = self.bit_len % 8;
        if bit_index == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << (7 - bit_index);
        }
        self.bit_len += 1;
    }

    /// Appends the `len` least significant bits of `value`, most significant first.
    ///
    /// # Panics
    /// Panics if `len` > 64.
    pub fn write_bits(&mut self, value: u64, len: usize) {
        assert!(len <= 64, "len must be <= 64");
        for i in (0..len).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    /// Pads with zero bits up to the next octet boundary.
    #[inline]
    pub fn octet_align(&mut self) {
        self.bit_len = self.data.len() * 8;
    }

    /// Appends whole octets. Unaligned writes fall back to bit-by-bit copying.
    pub fn write_octets(&mut self, octets: &[u8]) {
        if self.is_aligned() {
            self.data.extend_from_slice(octets);
            self.bit_len = self.data.len() * 8;
        } else {
            for octet in octets {
                self.write_bits(u64::from(*octet), 8);
            }
        }
    }

    /// Returns true when the write position is on an octet boundary.
    #[inline]
    pub fn is_aligned(&self) -> bool {
        self.bit_len % 8 == 0
    }

    /// Number of bits written so far.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Number of octets written, rounding up.
    #[inline]
    pub fn written_octets(&self) -> usize {
        self.data.len()
    }

    /// Returns the written bytes; a partial final octet is zero padded.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the writer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// A bounds-checked bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    index: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, index: 0 }
    }

    /// Returns the current bit index.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Number of unread bits.
    #[inline]
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.index)
    }

    fn ensure(&self, needed: usize) -> Result<(), BitBufferError> {
        let remaining = self.remaining_bits();
        if needed > remaining {
            return Err(BitBufferError::Overrun { needed, remaining });
        }
        Ok(())
    }

    /// Reads a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool, BitBufferError> {
        self.ensure(1)?;
        let octet = self.data[self.index / 8];
        let bit = (octet >> (7 - self.index % 8)) & 1 != 0;
        self.index += 1;
        Ok(bit)
    }

    /// Reads `len` bits (0..=64) as an unsigned value.
    pub fn read_bits(&mut self, len: usize) -> Result<u64, BitBufferError> {
        if len > 64 {
            return Err(BitBufferError::InvalidLength(len));
        }
        self.ensure(len)?;
        let mut value = 0u64;
        for _ in 0..len {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Skips to the next octet boundary.
    #[inline]
    pub fn octet_align(&mut self) {
        let remainder = self.index % 8;
        if remainder != 0 {
            self.index += 8 - remainder;
        }
    }

    /// Reads `count` whole octets.
    pub fn read_octets(&mut self, count: usize) -> Result<Vec<u8>, BitBufferError> {
        self.ensure(count * 8)?;
        if self.index % 8 == 0 {
            let start = self.index / 8;
            self.index += count * 8;
            return Ok(self.data[start..start + count].to_vec());
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(self.read_bits(8)? as u8);
        }
        Ok(out)
    }
}
