//! The gzip frame parser and the member descriptor it produces.

use crate::config::DEFAULT_CHUNK_SIZE;
use crate::header::{
    CM_DEFLATE, ExtraSubfields, FIXED_HEADER_LEN, GZIP_MAGIC, OperatingSystem, TRAILER_LEN,
    Trailer, flags,
};
use oxigz_core::error::{OxiGzError, Result};
use std::borrow::Cow;
use std::fmt;
use std::num::NonZeroUsize;

/// A parsed gzip member borrowed from a caller-owned buffer.
///
/// Produced only by [`GzipMember::parse`]; every field is either a slice of
/// the input or a value decoded from it. Nothing is copied, so the input must
/// outlive the member.
///
/// # Example
///
/// ```rust
/// use oxigz_gzip::GzipMember;
///
/// // Header without optional fields, then an empty stored block and trailer.
/// let data = [
///     0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0x03,
///     0x03, 0x00,
///     0, 0, 0, 0, 0, 0, 0, 0,
/// ];
/// let member = GzipMember::parse(&data).unwrap();
/// assert_eq!(member.payload_start(), 10);
/// assert_eq!(member.data_len(), data.len() - 10);
/// assert!(member.name().is_none());
/// ```
#[derive(Clone)]
pub struct GzipMember<'a> {
    input: &'a [u8],
    extra: Option<&'a [u8]>,
    name: Option<&'a [u8]>,
    comment: Option<&'a [u8]>,
    header_crc: Option<u16>,
    payload_start: usize,
    chunk_size: NonZeroUsize,
}

impl fmt::Debug for GzipMember<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipMember")
            .field("total_len", &self.total_len())
            .field("payload_start", &self.payload_start)
            .field("data_len", &self.data_len())
            .field("flags", &format_args!("{:#04x}", self.flags()))
            .field("extra_len", &self.extra.map(<[u8]>::len))
            .field("name", &self.name_str())
            .field("comment", &self.comment_str())
            .field("header_crc", &self.header_crc)
            .field("chunk_size", &self.chunk_size)
            .finish()
    }
}

/// Bounds-checked cursor over the header bytes.
struct HeaderReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn new(input: &'a [u8], pos: usize) -> Self {
        Self { input, pos }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.input.len() - self.pos;
        if len > available {
            return Err(OxiGzError::truncated(self.pos, len, available));
        }
        let bytes = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a NUL-terminated field, returning it without the terminator.
    fn take_cstr(&mut self) -> Result<&'a [u8]> {
        let rest = &self.input[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(len) => {
                self.pos += len + 1;
                Ok(&rest[..len])
            }
            None => Err(OxiGzError::truncated(self.pos, rest.len() + 1, rest.len())),
        }
    }
}

impl<'a> GzipMember<'a> {
    /// Parse the header of the gzip member held in `input`.
    ///
    /// Optional sections are read in RFC 1952 order (FEXTRA, FNAME, FCOMMENT,
    /// FHCRC), each only when its flag is set. Every read is bounded by the
    /// input length.
    ///
    /// # Errors
    ///
    /// - [`OxiGzError::BadMagic`] if the input does not start with `1F 8B`
    /// - [`OxiGzError::UnsupportedMethod`] if the method is not DEFLATE
    /// - [`OxiGzError::TruncatedHeader`] if the input ends inside the header
    pub fn parse(input: &'a [u8]) -> Result<Self> {
        let lead = &input[..input.len().min(GZIP_MAGIC.len())];
        if !GZIP_MAGIC.starts_with(lead) {
            return Err(OxiGzError::bad_magic(lead));
        }
        if input.len() < FIXED_HEADER_LEN {
            return Err(OxiGzError::truncated(0, FIXED_HEADER_LEN, input.len()));
        }

        let method = input[2];
        if method != CM_DEFLATE {
            return Err(OxiGzError::UnsupportedMethod { method });
        }

        let flg = input[3];
        let mut reader = HeaderReader::new(input, FIXED_HEADER_LEN);

        let extra = if flg & flags::FEXTRA != 0 {
            let xlen = reader.read_u16_le()? as usize;
            Some(reader.take(xlen)?)
        } else {
            None
        };

        let name = if flg & flags::FNAME != 0 {
            Some(reader.take_cstr()?)
        } else {
            None
        };

        let comment = if flg & flags::FCOMMENT != 0 {
            Some(reader.take_cstr()?)
        } else {
            None
        };

        let header_crc = if flg & flags::FHCRC != 0 {
            Some(reader.read_u16_le()?)
        } else {
            None
        };

        Ok(Self {
            input,
            extra,
            name,
            comment,
            header_crc,
            payload_start: reader.pos,
            chunk_size: DEFAULT_CHUNK_SIZE,
        })
    }

    /// Set how many compressed bytes the driver feeds per engine step.
    pub fn set_chunk_size(&mut self, chunk_size: NonZeroUsize) {
        self.chunk_size = chunk_size;
    }

    /// Builder form of [`set_chunk_size`](Self::set_chunk_size).
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Feed granularity used by the driver.
    pub fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// The whole input buffer.
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Length of the whole input buffer.
    pub fn total_len(&self) -> usize {
        self.input.len()
    }

    /// The fixed 10-byte header.
    pub fn header(&self) -> &'a [u8] {
        &self.input[..FIXED_HEADER_LEN]
    }

    /// All header bytes, optional sections included.
    pub fn header_bytes(&self) -> &'a [u8] {
        &self.input[..self.payload_start]
    }

    /// Offset of the first compressed byte.
    pub fn payload_start(&self) -> usize {
        self.payload_start
    }

    /// Bytes from `payload_start` to the end of the input (compressed data
    /// followed by the trailer).
    pub fn data_len(&self) -> usize {
        self.input.len() - self.payload_start
    }

    /// The bytes the inflate engine is fed from.
    pub fn payload(&self) -> &'a [u8] {
        &self.input[self.payload_start..]
    }

    /// Raw FLG byte, reserved bits included.
    pub fn flags(&self) -> u8 {
        self.input[3]
    }

    /// FTEXT: the compressor judged the content to be text.
    pub fn is_text(&self) -> bool {
        self.flags() & flags::FTEXT != 0
    }

    /// Whether any reserved FLG bit is set.
    pub fn has_reserved_flags(&self) -> bool {
        self.flags() & flags::RESERVED != 0
    }

    /// Modification time as a Unix timestamp, `None` when not recorded.
    pub fn mtime(&self) -> Option<u32> {
        let h = self.header();
        match u32::from_le_bytes([h[4], h[5], h[6], h[7]]) {
            0 => None,
            mtime => Some(mtime),
        }
    }

    /// XFL byte (2 = maximum compression, 4 = fastest).
    pub fn extra_flags(&self) -> u8 {
        self.input[8]
    }

    /// OS byte.
    pub fn os(&self) -> OperatingSystem {
        OperatingSystem::from_byte(self.input[9])
    }

    /// FEXTRA data (without its length prefix).
    pub fn extra(&self) -> Option<&'a [u8]> {
        self.extra
    }

    /// Subfields of FEXTRA; empty when the field is absent.
    pub fn extra_subfields(&self) -> ExtraSubfields<'a> {
        ExtraSubfields::new(self.extra.unwrap_or(&[]))
    }

    /// FNAME bytes (without the terminator).
    pub fn name(&self) -> Option<&'a [u8]> {
        self.name
    }

    /// FNAME decoded as ISO-8859-1.
    pub fn name_str(&self) -> Option<Cow<'a, str>> {
        self.name.map(encoding_rs::mem::decode_latin1)
    }

    /// FCOMMENT bytes (without the terminator).
    pub fn comment(&self) -> Option<&'a [u8]> {
        self.comment
    }

    /// FCOMMENT decoded as ISO-8859-1.
    pub fn comment_str(&self) -> Option<Cow<'a, str>> {
        self.comment.map(encoding_rs::mem::decode_latin1)
    }

    /// Stored FHCRC value.
    pub fn header_crc(&self) -> Option<u16> {
        self.header_crc
    }

    /// The trailer, read from the last eight bytes of the input.
    pub fn trailer(&self) -> Option<Trailer> {
        if self.data_len() < TRAILER_LEN {
            return None;
        }
        let tail = &self.input[self.input.len() - TRAILER_LEN..];
        let mut bytes = [0u8; TRAILER_LEN];
        bytes.copy_from_slice(tail);
        Some(Trailer::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(flg: u8) -> Vec<u8> {
        vec![0x1F, 0x8B, 0x08, flg, 0x10, 0x32, 0x54, 0x76, 0x02, 0x03]
    }

    #[test]
    fn test_minimal_header() {
        let mut data = header(0);
        data.extend_from_slice(&[0x03, 0x00]);
        let member = GzipMember::parse(&data).unwrap();

        assert_eq!(member.payload_start(), 10);
        assert_eq!(member.data_len(), 2);
        assert_eq!(member.total_len(), 12);
        assert_eq!(member.payload(), &[0x03, 0x00]);
        assert_eq!(member.mtime(), Some(0x76543210));
        assert_eq!(member.extra_flags(), 2);
        assert_eq!(member.os(), OperatingSystem::Unix);
        assert_eq!(member.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert!(member.extra().is_none());
        assert!(member.name().is_none());
        assert!(member.comment().is_none());
        assert!(member.header_crc().is_none());
        assert!(member.trailer().is_none());
    }

    #[test]
    fn test_header_only() {
        let data = header(0);
        let member = GzipMember::parse(&data).unwrap();
        assert_eq!(member.data_len(), 0);
        assert!(member.payload().is_empty());
    }

    #[test]
    fn test_name_advances_payload() {
        let mut data = header(flags::FNAME);
        data.extend_from_slice(b"file.txt\0");
        data.push(0x03);
        let member = GzipMember::parse(&data).unwrap();
        assert_eq!(member.name(), Some(&b"file.txt"[..]));
        assert_eq!(member.payload_start(), 10 + 8 + 1);
        assert_eq!(member.data_len(), 1);
    }

    #[test]
    fn test_latin1_name() {
        let mut data = header(flags::FNAME);
        data.extend_from_slice(b"caf\xe9.txt\0");
        let member = GzipMember::parse(&data).unwrap();
        assert_eq!(member.name_str().as_deref(), Some("café.txt"));
    }

    #[test]
    fn test_unterminated_name() {
        let mut data = header(flags::FNAME);
        data.extend_from_slice(b"no-terminator");
        let err = GzipMember::parse(&data).unwrap_err();
        assert!(matches!(
            err,
            OxiGzError::TruncatedHeader {
                offset: 10,
                needed: 14,
                available: 13
            }
        ));
    }

    #[test]
    fn test_extra_length_past_end() {
        let mut data = header(flags::FEXTRA);
        data.extend_from_slice(&[0x10, 0x00, 1, 2, 3]);
        assert!(matches!(
            GzipMember::parse(&data),
            Err(OxiGzError::TruncatedHeader { offset: 12, .. })
        ));
    }

    #[test]
    fn test_missing_extra_length() {
        let mut data = header(flags::FEXTRA);
        data.push(0x01);
        assert!(matches!(
            GzipMember::parse(&data),
            Err(OxiGzError::TruncatedHeader { offset: 10, needed: 2, available: 1 })
        ));
    }

    #[test]
    fn test_short_inputs() {
        assert!(matches!(
            GzipMember::parse(&[]),
            Err(OxiGzError::TruncatedHeader { .. })
        ));
        assert!(matches!(
            GzipMember::parse(&[0x1F]),
            Err(OxiGzError::TruncatedHeader { .. })
        ));
        assert!(matches!(
            GzipMember::parse(&[0x1F, 0x8B]),
            Err(OxiGzError::TruncatedHeader { offset: 0, needed: 10, available: 2 })
        ));
        assert!(matches!(
            GzipMember::parse(&[0x50]),
            Err(OxiGzError::BadMagic { .. })
        ));
    }

    #[test]
    fn test_bad_method() {
        let mut data = header(0);
        data[2] = 0x07;
        assert!(matches!(
            GzipMember::parse(&data),
            Err(OxiGzError::UnsupportedMethod { method: 7 })
        ));
    }

    #[test]
    fn test_reserved_flags_ignored() {
        let mut data = header(0xE0);
        data.push(0x03);
        let member = GzipMember::parse(&data).unwrap();
        assert!(member.has_reserved_flags());
        assert_eq!(member.payload_start(), 10);
    }

    #[test]
    fn test_chunk_size() {
        let data = header(0);
        let mut member = GzipMember::parse(&data).unwrap();
        member.set_chunk_size(NonZeroUsize::new(7).unwrap());
        assert_eq!(member.chunk_size().get(), 7);

        let member = member.with_chunk_size(NonZeroUsize::new(1).unwrap());
        assert_eq!(member.chunk_size().get(), 1);
    }

    #[test]
    fn test_zero_mtime() {
        let mut data = header(0);
        data[4..8].fill(0);
        let member = GzipMember::parse(&data).unwrap();
        assert_eq!(member.mtime(), None);
    }
}
