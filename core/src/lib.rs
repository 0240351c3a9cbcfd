//! A Chip-8 interpreter core.
//!
//! [`Cpu`] owns the machine state and executes programs; the host supplies a
//! [`Display`], [`Keyboard`] and [`Speaker`] for it to drive and calls
//! [`Cpu::cycle`] once per frame.
//!
//! ```
//! use emu8_core::{Beeper, Cpu, FrameBuffer, Keypad};
//!
//! let mut cpu = Cpu::new(FrameBuffer::new(), Keypad::new(), Beeper::new());
//! cpu.boot(&[0x60, 0x05, 0x70, 0x03]).unwrap();
//! cpu.execute_instruction(0x6005).unwrap();
//! cpu.execute_instruction(0x7003).unwrap();
//! assert_eq!(cpu.registers()[0x0], 8);
//! ```

pub use beeper::Beeper;
pub use config::Config;
pub use cpu::{Cpu, Mode};
pub use error::{Error, Result, RomError};
pub use frame::{Frame, FrameBuffer};
pub use instruction::Instruction;
pub use keypad::{keymap, Keypad};
pub use memory::Memory;
pub use peripherals::{Display, Keyboard, Speaker};
pub use rom::Rom;
pub use state::{Registers, Timers};

mod beeper;
mod config;
pub mod constants;
mod cpu;
mod error;
mod frame;
mod instruction;
mod keypad;
mod memory;
pub mod opcode;
pub mod peripherals;
mod rom;
mod state;
