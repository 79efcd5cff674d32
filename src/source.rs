//! Random-access byte sources.
//!
//! A [`Source`] serves reads by absolute position, so no shared cursor has to
//! be kept in sync between logical reads. The header check reads only the
//! first bytes; lopdf parses from memory, so loading a document still reads
//! the whole source once, into a buffer sized from [`Source::size`].

use std::cell::OnceCell;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Positional, read-only access to a byte resource.
pub trait Source {
    /// Total length of the resource in bytes.
    fn size(&self) -> Result<u64>;

    /// Read up to `length` bytes starting at `position` into
    /// `dest[dest_offset..dest_offset + length]`.
    ///
    /// Returns the number of bytes read, which is less than `length` only at
    /// the end of the resource. Nothing is written past the bytes read.
    fn read(&self, dest: &mut [u8], dest_offset: usize, length: usize, position: u64)
        -> Result<usize>;

    /// Release the underlying resource. Later reads fail with [`Error::Closed`].
    fn close(&mut self) -> Result<()>;

    /// Read `length` bytes at `position`, truncated at the end of the resource.
    fn read_slice(&self, length: usize, position: u64) -> Result<Vec<u8>> {
        if length == 0 {
            return Ok(Vec::new());
        }
        let mut buffer = vec![0u8; length];
        let read = self.read(&mut buffer, 0, length, position)?;
        buffer.truncate(read);
        Ok(buffer)
    }
}

fn destination(dest: &mut [u8], dest_offset: usize, length: usize) -> Result<&mut [u8]> {
    let capacity = dest.len();
    dest_offset
        .checked_add(length)
        .and_then(|end| dest.get_mut(dest_offset..end))
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "destination range {}..+{} exceeds buffer of {} bytes",
                    dest_offset,
                    length, capacity
                ),
            ))
        })
}

/// A [`Source`] backed by an open file.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: Option<File>,
    size: OnceCell<u64>,
}

impl FileSource {
    /// Open `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::from_open(e, path.to_path_buf()))?;
        log::debug!("opened {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            size: OnceCell::new(),
        })
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether [`Source::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    fn file(&self) -> Result<&File> {
        self.file.as_ref().ok_or(Error::Closed)
    }
}

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], position: u64) -> io::Result<usize> {
    std::os::unix::fs::FileExt::read_at(file, buf, position)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], position: u64) -> io::Result<usize> {
    std::os::windows::fs::FileExt::seek_read(file, buf, position)
}

impl Source for FileSource {
    fn size(&self) -> Result<u64> {
        if let Some(size) = self.size.get() {
            return Ok(*size);
        }
        let size = self.file()?.metadata()?.len();
        log::debug!("{}: {} bytes", self.path.display(), size);
        Ok(*self.size.get_or_init(|| size))
    }

    fn read(
        &self,
        dest: &mut [u8],
        dest_offset: usize,
        length: usize,
        position: u64,
    ) -> Result<usize> {
        let file = self.file()?;
        let target = destination(dest, dest_offset, length)?;

        // A single pread may return fewer bytes than asked for before EOF.
        let mut filled = 0;
        while filled < target.len() {
            match read_at(file, &mut target[filled..], position + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(filled)
    }

    fn close(&mut self) -> Result<()> {
        match self.file.take() {
            Some(file) => {
                drop(file);
                log::debug!("closed {}", self.path.display());
                Ok(())
            }
            None => Err(Error::Closed),
        }
    }
}

/// A [`Source`] over bytes already in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Vec<u8>,
    closed: bool,
}

impl MemorySource {
    /// Wrap `data`.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            closed: false,
        }
    }
}

impl Source for MemorySource {
    fn size(&self) -> Result<u64> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(self.data.len() as u64)
    }

    fn read(
        &self,
        dest: &mut [u8],
        dest_offset: usize,
        length: usize,
        position: u64,
    ) -> Result<usize> {
        if self.closed {
            return Err(Error::Closed);
        }
        let target = destination(dest, dest_offset, length)?;
        let start = usize::try_from(position)
            .unwrap_or(usize::MAX)
            .min(self.data.len());
        let available = &self.data[start..];
        let n = available.len().min(target.len());
        target[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.closed = true;
        Ok(())
    }
}

/// Sequential [`Read`] view over a [`Source`].
///
/// Each reader keeps its own position; the source itself stays stateless.
pub struct SourceReader<'a> {
    source: &'a dyn Source,
    position: u64,
}

impl<'a> SourceReader<'a> {
    /// Start reading `source` at position 0.
    pub fn new(source: &'a dyn Source) -> Self {
        Self {
            source,
            position: 0,
        }
    }
}

fn into_io(err: Error) -> io::Error {
    match err {
        Error::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, other.to_string()),
    }
}

impl Read for SourceReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        let n = self
            .source
            .read(buf, 0, len, self.position)
            .map_err(into_io)?;
        self.position += n as u64;
        Ok(n)
    }
}
