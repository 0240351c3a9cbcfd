use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::constants::{KEY_COUNT, PROGRAM_START, SPRITE_SIZE};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::opcode;
use crate::peripherals::{Display, Keyboard, Speaker};
use crate::state::{CallStack, Registers, Timers};

/// Whether the CPU is executing instructions or waiting on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Paused by `Fx0A` until a key is delivered into `register`.
    AwaitingKey { register: usize },
}

/// # Chip-8 CPU
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - 4096 bytes of `memory`
///  - the `registers` (V0..VF and I) and the program counter
///  - the call `stack`
///  - the delay and sound `timers`
///  - its run `mode`
///
/// Drives a [`Display`], [`Keyboard`] and [`Speaker`] it is handed at
/// construction, and draws random bytes for `Cxkk` from `rng`.
///
/// A host calls `cycle` once per frame; everything else about timing is the
/// host's business.
pub struct Cpu<D, K, S, R = StdRng> {
    memory: Memory,
    registers: Registers,
    pc: u16,
    stack: CallStack,
    timers: Timers,
    mode: Mode,
    config: Config,
    display: D,
    keyboard: K,
    speaker: S,
    rng: R,
}

impl<D: Display, K: Keyboard, S: Speaker> Cpu<D, K, S> {
    pub fn new(display: D, keyboard: K, speaker: S) -> Self {
        Self::with_config(display, keyboard, speaker, Config::default())
    }

    pub fn with_config(display: D, keyboard: K, speaker: S, config: Config) -> Self {
        Cpu::with_rng(display, keyboard, speaker, config, StdRng::from_entropy())
    }
}

impl<D: Display, K: Keyboard, S: Speaker, R: RngCore> Cpu<D, K, S, R> {
    pub fn with_rng(display: D, keyboard: K, speaker: S, config: Config, rng: R) -> Self {
        Cpu {
            memory: Memory::new(),
            registers: Registers::default(),
            pc: PROGRAM_START,
            stack: CallStack::new(),
            timers: Timers::default(),
            mode: Mode::Running,
            config,
            display,
            keyboard,
            speaker,
            rng,
        }
    }

    /// Returns the CPU to its freshly constructed state.
    ///
    /// Memory, registers, stack and timers are zeroed, the PC goes back to
    /// `PROGRAM_START`, any pending key wait is dropped and the display is
    /// cleared. Sprites and the program have to be loaded again.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.registers = Registers::default();
        self.pc = PROGRAM_START;
        self.stack.clear();
        self.timers = Timers::default();
        self.mode = Mode::Running;
        self.display.clear();
        debug!("reset");
    }

    /// Writes the hexadecimal digit glyphs to 0x000.
    pub fn load_sprites(&mut self) {
        self.memory.load_sprites();
    }

    /// Copies `program` to `PROGRAM_START`.
    ///
    /// Does not reset anything else; see `reset` and `boot`.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.memory.load_program(program)
    }

    /// Resets the CPU, then loads the sprites and `program`.
    pub fn boot(&mut self, program: &[u8]) -> Result<()> {
        self.reset();
        self.load_sprites();
        self.load_program(program)
    }

    /// Runs a single frame
    /// - executes up to `speed` instructions, stopping early if one pauses the CPU
    /// - counts the timers down unless paused
    /// - updates the speaker and renders the display, paused or not
    pub fn cycle(&mut self) -> Result<()> {
        for _ in 0..self.config.speed {
            if self.is_paused() {
                break;
            }
            let op = self.fetch()?;
            self.execute_instruction(op)?;
        }

        if !self.is_paused() {
            self.update_timers();
        }

        self.play_sound();
        self.display.render();
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self) -> Result<u16> {
        let bytes = self.memory.slice(self.pc as usize, 2)?;
        Ok(opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// Advances the PC past `op`, then decodes and executes it.
    pub fn execute_instruction(&mut self, op: u16) -> Result<()> {
        let pc = self.pc;
        self.pc = self.pc.wrapping_add(2);
        let instruction = Instruction::decode(op)?;
        trace!(
            "{:04X} {} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction,
            self.registers.v,
            self.registers.i,
            pc
        );
        self.execute(instruction)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<()> {
        match instruction {
            Instruction::Clear => self.display.clear(),
            Instruction::Return => {
                let pc = self.current_pc();
                self.pc = self.stack.pop().ok_or(Error::StackUnderflow { pc })?;
            }
            Instruction::Jump { addr } => self.pc = addr,
            Instruction::Call { addr } => {
                let pc = self.current_pc();
                self.stack
                    .push(self.pc)
                    .map_err(|_| Error::StackOverflow { pc })?;
                self.pc = addr;
            }
            Instruction::SkipIfEqual { x, kk } => self.skip_if(self.registers[x] == kk),
            Instruction::SkipIfNotEqual { x, kk } => self.skip_if(self.registers[x] != kk),
            Instruction::SkipIfRegistersEqual { x, y } => {
                self.skip_if(self.registers[x] == self.registers[y])
            }
            Instruction::Load { x, kk } => self.registers[x] = kk,
            Instruction::Add { x, kk } => {
                self.registers[x] = self.registers[x].wrapping_add(kk);
            }
            Instruction::Move { x, y } => self.registers[x] = self.registers[y],
            Instruction::Or { x, y } => self.registers[x] |= self.registers[y],
            Instruction::And { x, y } => self.registers[x] &= self.registers[y],
            Instruction::Xor { x, y } => self.registers[x] ^= self.registers[y],
            Instruction::AddRegisters { x, y } => {
                let (sum, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers.set_flag(carry);
                self.registers[x] = sum;
            }
            Instruction::Sub { x, y } => {
                let (vx, vy) = (self.registers[x], self.registers[y]);
                self.registers.set_flag(vx > vy);
                self.registers[x] = vx.wrapping_sub(vy);
            }
            Instruction::ShiftRight { x } => {
                let vx = self.registers[x];
                self.registers.set_flag(vx & 0x1 == 0x1);
                self.registers[x] = vx >> 1;
            }
            Instruction::SubNegated { x, y } => {
                let (vx, vy) = (self.registers[x], self.registers[y]);
                self.registers.set_flag(vy > vx);
                self.registers[x] = vy.wrapping_sub(vx);
            }
            Instruction::ShiftLeft { x } => {
                let vx = self.registers[x];
                self.registers.set_flag(vx & 0x80 != 0);
                self.registers[x] = vx << 1;
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                self.skip_if(self.registers[x] != self.registers[y])
            }
            Instruction::LoadAddress { addr } => self.registers.i = addr,
            Instruction::JumpOffset { addr } => {
                self.pc = addr.wrapping_add(u16::from(self.registers[0x0]));
            }
            Instruction::Random { x, kk } => {
                self.registers[x] = self.rng.gen::<u8>() & kk;
            }
            Instruction::Draw { x, y, n } => self.draw(x, y, n)?,
            Instruction::SkipIfPressed { x } => {
                self.skip_if(self.keyboard.is_key_pressed(self.registers[x]))
            }
            Instruction::SkipIfNotPressed { x } => {
                self.skip_if(!self.keyboard.is_key_pressed(self.registers[x]))
            }
            Instruction::LoadDelay { x } => self.registers[x] = self.timers.delay,
            Instruction::AwaitKey { x } => {
                debug!(register = x, "awaiting key");
                self.mode = Mode::AwaitingKey { register: x };
            }
            Instruction::SetDelay { x } => self.timers.delay = self.registers[x],
            Instruction::SetSound { x } => self.timers.sound = self.registers[x],
            Instruction::AddAddress { x } => {
                self.registers.i = self.registers.i.wrapping_add(u16::from(self.registers[x]));
            }
            Instruction::LoadGlyph { x } => {
                self.registers.i = u16::from(self.registers[x]) * SPRITE_SIZE as u16;
            }
            Instruction::StoreBcd { x } => {
                let value = self.registers[x];
                self.memory
                    .slice_mut(self.registers.i as usize, 3)?
                    .copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
            }
            Instruction::StoreRegisters { x } => {
                self.memory
                    .slice_mut(self.registers.i as usize, x + 1)?
                    .copy_from_slice(&self.registers.v[..=x]);
            }
            Instruction::LoadRegisters { x } => {
                let bytes = self.memory.slice(self.registers.i as usize, x + 1)?;
                self.registers.v[..=x].copy_from_slice(bytes);
            }
            Instruction::Unhandled(op) => {
                warn!(
                    "ignoring unhandled opcode {:04X} at pc {:04X}",
                    op,
                    self.current_pc()
                );
            }
        }
        Ok(())
    }

    /// XORs an `n` row sprite from memory at I onto the display at (Vx, Vy).
    /// Sets VF if any lit pixel was erased.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> Result<()> {
        let origin_x = self.registers[x] as usize;
        let origin_y = self.registers[y] as usize;
        let sprite = self.memory.slice(self.registers.i as usize, n as usize)?;

        let mut erased = false;
        for (row, bits) in sprite.iter().enumerate() {
            for col in 0..8 {
                if bits & (0x80 >> col) != 0 {
                    erased |= self.display.set_pixel(origin_x + col, origin_y + row);
                }
            }
        }

        self.registers.set_flag(erased);
        Ok(())
    }

    /// Skips the next instruction when `condition` holds.
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    /// Address of the instruction being executed; the PC has already moved past it.
    fn current_pc(&self) -> u16 {
        self.pc.wrapping_sub(2)
    }

    /// Counts both timers down by one, stopping at 0.
    pub fn update_timers(&mut self) {
        self.timers.tick();
    }

    /// Plays the tone while the sound timer is running and stops it otherwise.
    pub fn play_sound(&mut self) {
        if self.timers.is_sounding() {
            self.speaker.play(self.config.tone_frequency);
        } else {
            self.speaker.stop();
        }
    }

    /// Hands a key press to a CPU waiting on `Fx0A`.
    ///
    /// The key is written to the waiting register and execution resumes.
    /// Returns whether the press was consumed; presses while running, and keys
    /// outside 0x0..=0xF, are ignored.
    pub fn deliver_key(&mut self, key: u8) -> bool {
        if key as usize >= KEY_COUNT {
            warn!(key, "ignoring key outside the keypad");
            return false;
        }
        match self.mode {
            Mode::AwaitingKey { register } => {
                self.registers[register] = key;
                self.mode = Mode::Running;
                debug!(register, key, "key delivered");
                true
            }
            Mode::Running => false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode != Mode::Running
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// The address register, I.
    pub fn address(&self) -> u16 {
        self.registers.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }
}
