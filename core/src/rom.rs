use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RomError;

/// # ROM
/// The raw bytes of a Chip-8 program, as read from storage.
///
/// Reading a ROM is independent of any CPU: it must succeed before a program
/// can be loaded, and its failures are reported as [`RomError`]s rather than
/// as an empty program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Load a rom from a source file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => RomError::NotFound {
                path: path.to_path_buf(),
            },
            _ => RomError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Self::from_reader(&mut BufReader::new(file), path)
    }

    /// Load a rom from any reader; `origin` names it in errors.
    pub fn from_reader<P: AsRef<Path>>(
        reader: &mut dyn Read,
        origin: P,
    ) -> Result<Self, RomError> {
        let origin: PathBuf = origin.as_ref().to_path_buf();
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| RomError::Io {
                path: origin.clone(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(RomError::Empty { path: origin });
        }
        debug!(path = ?origin, bytes = bytes.len(), "read rom");
        Ok(Rom { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for Rom {
    fn from(bytes: Vec<u8>) -> Self {
        Rom { bytes }
    }
}
