//! The file I/O boundary a Compose table is built through: open and read (or memory-map) a
//! path, returning an owned byte buffer. [`Source`] is that abstraction; the real loader uses
//! [`FsSource`] (backed by `memmap2`), while tests substitute an in-memory one.

use std::fs::File;
use std::io;
use std::path::Path;

pub trait Source {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Memory-maps the file and copies it into an owned buffer. `memmap2` refuses to map
/// zero-length files, so those are special-cased to an empty buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl Source for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(Vec::new());
        }
        // SAFETY: the Compose file is not expected to be truncated by another process while
        // we hold the mapping; construction fails over to an `io::Error` rather than panicking
        // if mapping itself fails.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Ok(mmap.to_vec())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MapSource(pub std::collections::HashMap<std::path::PathBuf, Vec<u8>>);

#[cfg(test)]
impl Source for MapSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.0
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not in MapSource"))
    }
}
