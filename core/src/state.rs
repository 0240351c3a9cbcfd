use std::ops::{Index, IndexMut};

use crate::constants::STACK_DEPTH;

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit address register, of which 12 bits are meaningful
///
/// Registers are indexed by a nibble; indices are always below 16.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; 16],
    pub i: u16,
}

impl Registers {
    /// Sets VF to 1 or 0.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }

    pub fn flag(&self) -> u8 {
        self.v[0xF]
    }
}

impl Index<usize> for Registers {
    type Output = u8;

    fn index(&self, register: usize) -> &u8 {
        &self.v[register]
    }
}

impl IndexMut<usize> for Registers {
    fn index_mut(&mut self, register: usize) -> &mut u8 {
        &mut self.v[register]
    }
}

/// # Call stack
/// Return addresses pushed by `CALL` and popped by `RET`.
/// Holds at most `STACK_DEPTH` addresses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallStack {
    addresses: Vec<u16>,
}

impl CallStack {
    pub fn new() -> Self {
        CallStack {
            addresses: Vec::with_capacity(STACK_DEPTH),
        }
    }

    /// Pushes a return address, handing it back if the stack is full.
    pub fn push(&mut self, address: u16) -> Result<(), u16> {
        if self.addresses.len() == STACK_DEPTH {
            return Err(address);
        }
        self.addresses.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.addresses.pop()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn clear(&mut self) {
        self.addresses.clear();
    }
}

/// # Timers
/// Two 8-bit timers that count down once per frame and stop at 0.
/// - the delay timer is read and written by programs
/// - a tone plays while the sound timer is above 0
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Decrements each running timer by one.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}
