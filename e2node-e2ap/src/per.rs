//! Aligned PER (X.691) primitives
//!
//! Only the constructs E2AP and the E2SM payloads need are provided: constrained
//! whole numbers, length determinants below 16K, enumerations and CHOICE
//! indices with an optional extension marker, octet/bit/printable strings, open
//! types and unconstrained integers. Fragmented lengths (>= 16384) are rejected.

use e2node_common::{BitBufferError, BitReader, BitWriter};
use thiserror::Error;

/// Errors raised by the PER primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PerError {
    #[error("buffer error: {0}")]
    Buffer(#[from] BitBufferError),

    #[error("value {value} outside {lb}..={ub}")]
    ValueOutOfRange { value: u64, lb: u64, ub: u64 },

    #[error("invalid length: {0}")]
    InvalidLength(usize),

    #[error("invalid choice index {index} for {type_name}")]
    InvalidChoice { type_name: &'static str, index: u64 },

    #[error("unsupported encoding: {0}")]
    Unsupported(&'static str),

    #[error("invalid string: {0}")]
    InvalidString(String),
}

/// Result type for PER operations
pub type Result<T> = std::result::Result<T, PerError>;

/// Size constraint of a length determinant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub lb: usize,
    pub ub: usize,
    pub extensible: bool,
}

impl SizeRange {
    pub const fn new(lb: usize, ub: usize) -> Self {
        Self {
            lb,
            ub,
            extensible: false,
        }
    }

    pub const fn extensible(lb: usize, ub: usize) -> Self {
        Self {
            lb,
            ub,
            extensible: true,
        }
    }
}

/// Minimum number of bits needed to hold `value`.
fn bits_needed(value: u64) -> usize {
    (64 - value.leading_zeros()) as usize
}

/// Minimum number of octets needed to hold `value` (at least one).
fn octets_needed(value: u64) -> usize {
    bits_needed(value).div_ceil(8).max(1)
}

/// APER encoder over a [`BitWriter`].
#[derive(Debug, Default)]
pub struct PerEncoder {
    writer: BitWriter,
}

impl PerEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes the encoding. An empty encoding becomes a single zero octet.
    pub fn finish(self) -> Vec<u8> {
        let bytes = self.writer.into_bytes();
        if bytes.is_empty() {
            vec![0]
        } else {
            bytes
        }
    }

    pub fn align(&mut self) {
        self.writer.octet_align();
    }

    pub fn put_bit(&mut self, bit: bool) {
        self.writer.write_bit(bit);
    }

    /// Extension marker of an extensible type; always "within root" here.
    pub fn put_extension_bit(&mut self) {
        self.writer.write_bit(false);
    }

    /// SEQUENCE preamble: extension bit (if extensible) and presence bitmap.
    pub fn put_sequence_preamble(&mut self, extensible: bool, optionals: &[bool]) {
        if extensible {
            self.put_extension_bit();
        }
        for present in optionals {
            self.writer.write_bit(*present);
        }
    }

    /// Constrained whole number in `lb..=ub`.
    pub fn put_constrained(&mut self, value: u64, lb: u64, ub: u64) -> Result<()> {
        if value < lb || value > ub {
            return Err(PerError::ValueOutOfRange { value, lb, ub });
        }
        let range = u128::from(ub - lb) + 1;
        let offset = value - lb;

        if range == 1 {
            return Ok(());
        }
        if range <= 255 {
            self.writer.write_bits(offset, bits_needed(ub - lb));
        } else if range == 256 {
            self.writer.octet_align();
            self.writer.write_bits(offset, 8);
        } else if range <= 65536 {
            self.writer.octet_align();
            self.writer.write_bits(offset, 16);
        } else {
            let max_octets = octets_needed(ub - lb);
            let len = octets_needed(offset);
            self.writer
                .write_bits((len - 1) as u64, bits_needed((max_octets - 1) as u64));
            self.writer.octet_align();
            self.writer.write_bits(offset, len * 8);
        }
        Ok(())
    }

    /// Extensible constrained whole number whose value lies in the root range.
    pub fn put_extensible_constrained(&mut self, value: u64, lb: u64, ub: u64) -> Result<()> {
        self.put_extension_bit();
        self.put_constrained(value, lb, ub)
    }

    /// Unconstrained length determinant (< 16K).
    pub fn put_length(&mut self, len: usize) -> Result<()> {
        self.writer.octet_align();
        if len < 128 {
            self.writer.write_bits(len as u64, 8);
        } else if len < 16384 {
            self.writer.write_bits(0x8000 | len as u64, 16);
        } else {
            return Err(PerError::Unsupported("fragmented length"));
        }
        Ok(())
    }

    /// Length determinant under a size constraint.
    pub fn put_constrained_length(&mut self, len: usize, size: SizeRange) -> Result<()> {
        if size.extensible {
            self.put_extension_bit();
        }
        if len < size.lb || len > size.ub {
            return Err(PerError::InvalidLength(len));
        }
        if size.ub < 65536 {
            self.put_constrained(len as u64, size.lb as u64, size.ub as u64)
        } else {
            self.put_length(len)
        }
    }

    /// Root enumeration index.
    pub fn put_enumerated(&mut self, index: u64, root_count: u64, extensible: bool) -> Result<()> {
        if extensible {
            self.put_extension_bit();
        }
        self.put_constrained(index, 0, root_count - 1)
    }

    /// Root CHOICE index.
    pub fn put_choice_index(&mut self, index: u64, root_count: u64, extensible: bool) -> Result<()> {
        self.put_enumerated(index, root_count, extensible)
    }

    /// OCTET STRING without size constraint.
    pub fn put_octet_string(&mut self, data: &[u8]) -> Result<()> {
        self.put_length(data.len())?;
        self.writer.write_octets(data);
        Ok(())
    }

    /// OCTET STRING of fixed size.
    pub fn put_fixed_octets(&mut self, data: &[u8]) {
        if data.len() > 2 {
            self.writer.octet_align();
        }
        self.writer.write_octets(data);
    }

    /// BIT STRING of fixed size holding the `size` low bits of `value`.
    pub fn put_fixed_bit_string(&mut self, value: u64, size: usize) {
        if size > 16 {
            self.writer.octet_align();
        }
        self.writer.write_bits(value, size);
    }

    /// BIT STRING of `size` bits under a size constraint.
    pub fn put_bit_string(&mut self, value: u64, size: usize, range: SizeRange) -> Result<()> {
        self.put_constrained_length(size, range)?;
        if range.ub > 16 {
            self.writer.octet_align();
        }
        self.writer.write_bits(value, size);
        Ok(())
    }

    /// PrintableString (8 bits per character in the aligned variant).
    pub fn put_printable_string(&mut self, value: &str, size: SizeRange) -> Result<()> {
        if !is_printable(value) {
            return Err(PerError::InvalidString(value.to_string()));
        }
        self.put_constrained_length(value.len(), size)?;
        if size.ub * 8 > 16 {
            self.writer.octet_align();
        }
        self.writer.write_octets(value.as_bytes());
        Ok(())
    }

    /// Open type: a complete encoding wrapped in a length determinant.
    pub fn put_open_type(&mut self, encoded: &[u8]) -> Result<()> {
        self.put_octet_string(encoded)
    }

    /// Unconstrained INTEGER in two's complement.
    pub fn put_unconstrained_integer(&mut self, value: i64) -> Result<()> {
        let bytes = value.to_be_bytes();
        let mut start = 0;
        while start < 7 {
            let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
                || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }
        self.put_octet_string(&bytes[start..])
    }
}

/// APER decoder over a [`BitReader`].
#[derive(Debug)]
pub struct PerDecoder<'a> {
    reader: BitReader<'a>,
}

impl<'a> PerDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
        }
    }

    pub fn align(&mut self) {
        self.reader.octet_align();
    }

    pub fn remaining_bits(&self) -> usize {
        self.reader.remaining_bits()
    }

    pub fn get_bit(&mut self) -> Result<bool> {
        Ok(self.reader.read_bit()?)
    }

    /// Reads an extension bit. Values outside the root are not supported.
    pub fn get_extension_bit(&mut self, type_name: &'static str) -> Result<()> {
        if self.reader.read_bit()? {
            return Err(PerError::Unsupported(type_name));
        }
        Ok(())
    }

    /// SEQUENCE preamble; returns the presence bitmap. Extension additions
    /// that follow the root components are left unread.
    pub fn get_sequence_preamble(&mut self, extensible: bool, optional_count: usize) -> Result<Vec<bool>> {
        if extensible {
            let _ = self.reader.read_bit()?;
        }
        (0..optional_count)
            .map(|_| self.reader.read_bit().map_err(PerError::from))
            .collect()
    }

    pub fn get_constrained(&mut self, lb: u64, ub: u64) -> Result<u64> {
        let range = u128::from(ub - lb) + 1;

        let offset = if range == 1 {
            0
        } else if range <= 255 {
            self.reader.read_bits(bits_needed(ub - lb))?
        } else if range == 256 {
            self.reader.octet_align();
            self.reader.read_bits(8)?
        } else if range <= 65536 {
            self.reader.octet_align();
            self.reader.read_bits(16)?
        } else {
            let max_octets = octets_needed(ub - lb);
            let len = self.reader.read_bits(bits_needed((max_octets - 1) as u64))? as usize + 1;
            self.reader.octet_align();
            self.reader.read_bits(len * 8)?
        };

        let value = lb + offset;
        if value > ub {
            return Err(PerError::ValueOutOfRange { value, lb, ub });
        }
        Ok(value)
    }

    pub fn get_extensible_constrained(&mut self, lb: u64, ub: u64) -> Result<u64> {
        self.get_extension_bit("extended integer")?;
        self.get_constrained(lb, ub)
    }

    pub fn get_length(&mut self) -> Result<usize> {
        self.reader.octet_align();
        let first = self.reader.read_bits(8)? as usize;
        if first & 0x80 == 0 {
            Ok(first)
        } else if first & 0xC0 == 0x80 {
            let second = self.reader.read_bits(8)? as usize;
            Ok(((first & 0x3F) << 8) | second)
        } else {
            Err(PerError::Unsupported("fragmented length"))
        }
    }

    pub fn get_constrained_length(&mut self, size: SizeRange) -> Result<usize> {
        if size.extensible {
            self.get_extension_bit("extended size")?;
        }
        let len = if size.ub < 65536 {
            self.get_constrained(size.lb as u64, size.ub as u64)? as usize
        } else {
            self.get_length()?
        };
        if len < size.lb || len > size.ub {
            return Err(PerError::InvalidLength(len));
        }
        Ok(len)
    }

    pub fn get_enumerated(&mut self, root_count: u64, extensible: bool) -> Result<u64> {
        if extensible {
            self.get_extension_bit("extended enumeration")?;
        }
        self.get_constrained(0, root_count - 1)
    }

    pub fn get_choice_index(&mut self, root_count: u64, extensible: bool) -> Result<u64> {
        if extensible {
            self.get_extension_bit("extended choice")?;
        }
        self.get_constrained(0, root_count - 1)
    }

    pub fn get_octet_string(&mut self) -> Result<Vec<u8>> {
        let len = self.get_length()?;
        Ok(self.reader.read_octets(len)?)
    }

    pub fn get_fixed_octets(&mut self, size: usize) -> Result<Vec<u8>> {
        if size > 2 {
            self.reader.octet_align();
        }
        Ok(self.reader.read_octets(size)?)
    }

    pub fn get_fixed_bit_string(&mut self, size: usize) -> Result<u64> {
        if size > 16 {
            self.reader.octet_align();
        }
        Ok(self.reader.read_bits(size)?)
    }

    /// Returns `(value, size_in_bits)`.
    pub fn get_bit_string(&mut self, range: SizeRange) -> Result<(u64, usize)> {
        let size = self.get_constrained_length(range)?;
        if range.ub > 16 {
            self.reader.octet_align();
        }
        Ok((self.reader.read_bits(size)?, size))
    }

    pub fn get_printable_string(&mut self, size: SizeRange) -> Result<String> {
        let len = self.get_constrained_length(size)?;
        if size.ub * 8 > 16 {
            self.reader.octet_align();
        }
        let bytes = self.reader.read_octets(len)?;
        let value =
            String::from_utf8(bytes).map_err(|e| PerError::InvalidString(e.to_string()))?;
        if !is_printable(&value) {
            return Err(PerError::InvalidString(value));
        }
        Ok(value)
    }

    pub fn get_open_type(&mut self) -> Result<Vec<u8>> {
        self.get_octet_string()
    }

    pub fn get_unconstrained_integer(&mut self) -> Result<i64> {
        let bytes = self.get_octet_string()?;
        if bytes.is_empty() || bytes.len() > 8 {
            return Err(PerError::InvalidLength(bytes.len()));
        }
        let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
        let mut buf = [fill; 8];
        buf[8 - bytes.len()..].copy_from_slice(&bytes);
        Ok(i64::from_be_bytes(buf))
    }
}

/// Returns true if every character belongs to the PrintableString alphabet.
pub fn is_printable(value: &str) -> bool {
    value.chars().all(|c| {
        c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
    })
}
