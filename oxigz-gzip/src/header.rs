//! gzip header constants and the small value types decoded from it.

use oxigz_core::error::{OxiGzError, Result};
use std::fmt;

/// gzip magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// gzip compression method: DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// Length of the fixed part of the header (magic, CM, FLG, MTIME, XFL, OS).
pub const FIXED_HEADER_LEN: usize = 10;

/// Length of the trailer (CRC32 + ISIZE).
pub const TRAILER_LEN: usize = 8;

/// gzip header flags (FLG byte).
pub mod flags {
    /// Probably ASCII text.
    pub const FTEXT: u8 = 0x01;
    /// Header CRC16 present.
    pub const FHCRC: u8 = 0x02;
    /// Extra field present.
    pub const FEXTRA: u8 = 0x04;
    /// Original file name present.
    pub const FNAME: u8 = 0x08;
    /// Comment present.
    pub const FCOMMENT: u8 = 0x10;
    /// Reserved bits, must be zero in a conforming file.
    pub const RESERVED: u8 = 0xE0;
}

/// Operating system on which the member was compressed (OS byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystem {
    /// FAT filesystem (MS-DOS, OS/2, NT/Win32).
    Fat,
    /// Amiga.
    Amiga,
    /// VMS (or OpenVMS).
    Vms,
    /// Unix.
    Unix,
    /// VM/CMS.
    VmCms,
    /// Atari TOS.
    AtariTos,
    /// HPFS filesystem (OS/2, NT).
    Hpfs,
    /// Macintosh.
    Macintosh,
    /// Z-System.
    ZSystem,
    /// CP/M.
    CpM,
    /// TOPS-20.
    Tops20,
    /// NTFS filesystem (NT).
    Ntfs,
    /// QDOS.
    Qdos,
    /// Acorn RISCOS.
    AcornRiscos,
    /// 255 or any value RFC 1952 does not assign.
    Unknown(u8),
}

impl OperatingSystem {
    /// Decode the OS byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Fat,
            1 => Self::Amiga,
            2 => Self::Vms,
            3 => Self::Unix,
            4 => Self::VmCms,
            5 => Self::AtariTos,
            6 => Self::Hpfs,
            7 => Self::Macintosh,
            8 => Self::ZSystem,
            9 => Self::CpM,
            10 => Self::Tops20,
            11 => Self::Ntfs,
            12 => Self::Qdos,
            13 => Self::AcornRiscos,
            other => Self::Unknown(other),
        }
    }

    /// The raw OS byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Fat => 0,
            Self::Amiga => 1,
            Self::Vms => 2,
            Self::Unix => 3,
            Self::VmCms => 4,
            Self::AtariTos => 5,
            Self::Hpfs => 6,
            Self::Macintosh => 7,
            Self::ZSystem => 8,
            Self::CpM => 9,
            Self::Tops20 => 10,
            Self::Ntfs => 11,
            Self::Qdos => 12,
            Self::AcornRiscos => 13,
            Self::Unknown(byte) => byte,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fat => "FAT",
            Self::Amiga => "Amiga",
            Self::Vms => "VMS",
            Self::Unix => "Unix",
            Self::VmCms => "VM/CMS",
            Self::AtariTos => "Atari TOS",
            Self::Hpfs => "HPFS",
            Self::Macintosh => "Macintosh",
            Self::ZSystem => "Z-System",
            Self::CpM => "CP/M",
            Self::Tops20 => "TOPS-20",
            Self::Ntfs => "NTFS",
            Self::Qdos => "QDOS",
            Self::AcornRiscos => "Acorn RISCOS",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(byte) => write!(f, "unknown ({})", byte),
            os => f.write_str(os.name()),
        }
    }
}

/// The 8-byte gzip trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Size of the uncompressed data modulo 2^32 (ISIZE).
    pub size: u32,
}

impl Trailer {
    /// Decode a trailer from its 8 bytes.
    pub fn from_bytes(bytes: [u8; TRAILER_LEN]) -> Self {
        Self {
            crc32: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            size: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Whether `len` bytes of output agree with ISIZE.
    pub fn size_matches(&self, len: u64) -> bool {
        len & 0xFFFF_FFFF == self.size as u64
    }
}

/// One `SI1 SI2 LEN data` record of the FEXTRA field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtraSubfield<'a> {
    /// Subfield id (SI1, SI2).
    pub id: [u8; 2],
    /// Subfield payload.
    pub data: &'a [u8],
}

/// Iterator over the subfields of an FEXTRA field.
///
/// Yields an error and stops when a record runs past the end of the field.
/// Offsets in that error are relative to the start of the extra data.
#[derive(Debug, Clone)]
pub struct ExtraSubfields<'a> {
    extra: &'a [u8],
    pos: usize,
}

impl<'a> ExtraSubfields<'a> {
    pub(crate) fn new(extra: &'a [u8]) -> Self {
        Self { extra, pos: 0 }
    }
}

impl<'a> Iterator for ExtraSubfields<'a> {
    type Item = Result<ExtraSubfield<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.extra[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if rest.len() < 4 {
            let err = OxiGzError::truncated(self.pos, 4, rest.len());
            self.pos = self.extra.len();
            return Some(Err(err));
        }

        let len = u16::from_le_bytes([rest[2], rest[3]]) as usize;
        if rest.len() - 4 < len {
            let err = OxiGzError::truncated(self.pos + 4, len, rest.len() - 4);
            self.pos = self.extra.len();
            return Some(Err(err));
        }

        let subfield = ExtraSubfield {
            id: [rest[0], rest[1]],
            data: &rest[4..4 + len],
        };
        self.pos += 4 + len;
        Some(Ok(subfield))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_magic() {
        assert_eq!(GZIP_MAGIC, [0x1F, 0x8B]);
    }

    #[test]
    fn test_os_roundtrip() {
        for byte in 0..=255u8 {
            assert_eq!(OperatingSystem::from_byte(byte).to_byte(), byte);
        }
        assert_eq!(OperatingSystem::from_byte(3), OperatingSystem::Unix);
        assert_eq!(OperatingSystem::from_byte(255).to_string(), "unknown (255)");
        assert_eq!(OperatingSystem::Ntfs.to_string(), "NTFS");
    }

    #[test]
    fn test_trailer() {
        let trailer = Trailer::from_bytes([0x78, 0x56, 0x34, 0x12, 0x05, 0, 0, 0]);
        assert_eq!(trailer.crc32, 0x12345678);
        assert_eq!(trailer.size, 5);
        assert!(trailer.size_matches(5));
        assert!(trailer.size_matches(5 + (1u64 << 32)));
        assert!(!trailer.size_matches(6));
    }

    #[test]
    fn test_extra_subfields() {
        let extra = [b'A', b'p', 2, 0, 0xAA, 0xBB, b'Z', b'z', 0, 0];
        let fields: Vec<_> = ExtraSubfields::new(&extra)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].id, *b"Ap");
        assert_eq!(fields[0].data, &[0xAA, 0xBB]);
        assert_eq!(fields[1].id, *b"Zz");
        assert!(fields[1].data.is_empty());
    }

    #[test]
    fn test_extra_subfield_overrun() {
        let extra = [b'A', b'p', 9, 0, 0xAA];
        let mut iter = ExtraSubfields::new(&extra);
        assert!(matches!(
            iter.next(),
            Some(Err(OxiGzError::TruncatedHeader {
                offset: 4,
                needed: 9,
                available: 1
            }))
        ));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_extra_subfield_short_record() {
        let mut iter = ExtraSubfields::new(&[b'A', b'p', 0]);
        assert!(matches!(iter.next(), Some(Err(_))));
        assert!(iter.next().is_none());
    }
}
