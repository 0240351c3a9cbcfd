use tracing::debug;

use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Error, Result};

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x200` is reserved for the interpreter; the sprite sheet lives at its start
/// - `0x200..0x1000` holds the program and its data
///
/// Every access is bounds checked; nothing wraps around the end of memory.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
    }

    /// Writes the hexadecimal digit glyphs to the start of memory.
    pub fn load_sprites(&mut self) {
        self.bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        debug!(bytes = SPRITE_SHEET.len(), "loaded sprite sheet");
    }

    /// Copies a program into memory starting at `PROGRAM_START`.
    /// Programs that would run past the end of memory are rejected untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                capacity: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        debug!(bytes = program.len(), "loaded program");
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.slice(address, 1).map(|bytes| bytes[0])
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        self.slice_mut(address, 1).map(|bytes| bytes[0] = value)
    }

    /// Borrows `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        let range = Self::range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Mutably borrows `len` bytes starting at `address`.
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let range = Self::range(address, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Every byte of memory, for inspection.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn range(address: usize, len: usize) -> Result<std::ops::Range<usize>> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(address..end),
            _ => Err(Error::MemoryOutOfBounds { address, len }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
