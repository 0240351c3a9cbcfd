use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Contract violations raised while loading or executing a program.
///
/// Every variant is fatal for the running program: the host should stop
/// driving the CPU once one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("return with an empty call stack at pc {pc:#05X}")]
    StackUnderflow { pc: u16 },

    #[error("call stack overflow at pc {pc:#05X}")]
    StackOverflow { pc: u16 },

    #[error("memory access of {len} byte(s) at {address:#05X} is out of bounds")]
    MemoryOutOfBounds { address: usize, len: usize },

    #[error("program of {size} bytes does not fit in {capacity} bytes of program memory")]
    ProgramTooLarge { size: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures resolving a ROM to its bytes.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM {path:?} not found")]
    NotFound { path: PathBuf },

    #[error("failed to read ROM {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM {path:?} is empty")]
    Empty { path: PathBuf },
}
