use crate::errors::{BlendThumbResult, StreamError};
use flate2::read::MultiGzDecoder;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// gzip magic bytes (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A sequential byte source that can also skip forward.
///
/// Compressed and uncompressed files present identical bytes through this
/// interface, so callers never need to know which one they are reading.
pub trait ByteSource: Read {
    /// Advance the cursor by `n` bytes without returning them.
    fn skip(&mut self, n: u64) -> io::Result<()>;

    /// Whether the underlying data is decompressed on the fly.
    fn is_compressed(&self) -> bool {
        false
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn skip(&mut self, n: u64) -> io::Result<()> {
        (**self).skip(n)
    }

    fn is_compressed(&self) -> bool {
        (**self).is_compressed()
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn skip(&mut self, n: u64) -> io::Result<()> {
        let offset = i64::try_from(n)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip too large"))?;
        self.seek(SeekFrom::Current(offset))?;
        Ok(())
    }
}

/// Uncompressed local file
pub struct LocalByteSource(BufReader<File>);

impl LocalByteSource {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(LocalByteSource(BufReader::new(File::open(path)?)))
    }

    pub fn from_file(file: File) -> Self {
        LocalByteSource(BufReader::new(file))
    }
}

impl Read for LocalByteSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl ByteSource for LocalByteSource {
    fn skip(&mut self, n: u64) -> io::Result<()> {
        let offset = i64::try_from(n)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "skip too large"))?;
        // Seeking past the end is allowed; the next read reports EOF.
        self.0.seek_relative(offset)
    }
}

/// gzip-compressed data, decompressed while reading.
///
/// Skipping decompresses and discards, since deflate streams cannot seek.
pub struct GzByteSource<R: Read> {
    dec: MultiGzDecoder<R>,
}

impl<R: Read> GzByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            dec: MultiGzDecoder::new(reader),
        }
    }
}

impl<R: Read> Read for GzByteSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.dec.read(buf)
    }
}

impl<R: Read> ByteSource for GzByteSource<R> {
    fn skip(&mut self, n: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.dec).take(n), &mut io::sink())?;
        if skipped < n {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("skip of {} bytes ended after {}", n, skipped),
            ));
        }
        Ok(())
    }

    fn is_compressed(&self) -> bool {
        true
    }
}

#[inline]
pub fn is_gzip_magic(header: &[u8]) -> bool {
    header.len() >= 2 && header[0] == GZIP_MAGIC[0] && header[1] == GZIP_MAGIC[1]
}

/// Open `path`, transparently decompressing it when it is gzip data.
pub fn open_byte_source<P: AsRef<Path>>(path: P) -> BlendThumbResult<Box<dyn ByteSource>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        StreamError::new(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut magic = [0u8; 2];
    let filled = read_prefix(&mut file, &mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    if is_gzip_magic(&magic[..filled]) {
        debug!("{}: gzip stream detected", path.display());
        Ok(Box::new(GzByteSource::new(BufReader::new(file))))
    } else {
        Ok(Box::new(LocalByteSource::from_file(file)))
    }
}

/// Fill as much of `buf` as the reader allows, returning the byte count.
fn read_prefix<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
