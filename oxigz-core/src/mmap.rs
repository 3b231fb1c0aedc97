//! Memory-mapped input files.
//!
//! OxiGz works on buffers that are already resident in memory. On a hosted
//! system the cheapest way to get a file into that shape is a read-only
//! mapping: the parser then borrows straight from the page cache.
//!
//! # Example
//!
//! ```no_run
//! use oxigz_core::mmap::MappedInput;
//!
//! let input = MappedInput::open("data.gz")?;
//! println!("{} bytes mapped", input.len());
//! # Ok::<(), oxigz_core::error::OxiGzError>(())
//! ```
//!
//! # Safety
//!
//! A mapping reflects later modifications of the file by other processes.
//! Callers must not let the file change while the mapping is alive.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// A read-only view of a whole file.
#[derive(Debug)]
pub struct MappedInput {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    Mapped(Mmap),
    // Zero-length files cannot be mapped on every platform.
    Empty,
}

impl MappedInput {
    /// Open and map a file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OxiGzError::Io`] if the file cannot be opened,
    /// inspected or mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_file(&file)
    }

    /// Map an already open file.
    pub fn from_file(file: &File) -> Result<Self> {
        if file.metadata()?.len() == 0 {
            return Ok(Self { inner: Inner::Empty });
        }

        // SAFETY: read-only mapping; the caller keeps the file unchanged
        // while it is mapped.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self {
            inner: Inner::Mapped(mmap),
        })
    }

    /// The mapped bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.inner {
            Inner::Mapped(mmap) => &mmap[..],
            Inner::Empty => &[],
        }
    }
}

impl Deref for MappedInput {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for MappedInput {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
