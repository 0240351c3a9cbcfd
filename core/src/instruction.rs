use std::fmt;

use crate::error::{Error, Result};
use crate::opcode::Opcode;

/// A decoded Chip-8 instruction with its operands.
///
/// `x` and `y` are register indices, `kk` an immediate byte, `addr` a 12-bit
/// address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Clear,
    /// `00EE` PC = STACK.pop()
    Return,
    /// `1nnn` PC = addr
    Jump { addr: u16 },
    /// `2nnn` STACK.push(PC); PC = addr
    Call { addr: u16 },
    /// `3xkk` if Vx == kk then skip
    SkipIfEqual { x: usize, kk: u8 },
    /// `4xkk` if Vx != kk then skip
    SkipIfNotEqual { x: usize, kk: u8 },
    /// `5xy0` if Vx == Vy then skip
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6xkk` Vx = kk
    Load { x: usize, kk: u8 },
    /// `7xkk` Vx += kk, without touching VF
    Add { x: usize, kk: u8 },
    /// `8xy0` Vx = Vy
    Move { x: usize, y: usize },
    /// `8xy1` Vx |= Vy
    Or { x: usize, y: usize },
    /// `8xy2` Vx &= Vy
    And { x: usize, y: usize },
    /// `8xy3` Vx ^= Vy
    Xor { x: usize, y: usize },
    /// `8xy4` Vx += Vy; VF = carry
    AddRegisters { x: usize, y: usize },
    /// `8xy5` Vx -= Vy; VF = Vx > Vy
    Sub { x: usize, y: usize },
    /// `8xy6` Vx >>= 1; VF = lsb
    ShiftRight { x: usize },
    /// `8xy7` Vx = Vy - Vx; VF = Vy > Vx
    SubNegated { x: usize, y: usize },
    /// `8xyE` Vx <<= 1; VF = msb
    ShiftLeft { x: usize },
    /// `9xy0` if Vx != Vy then skip
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `Annn` I = addr
    LoadAddress { addr: u16 },
    /// `Bnnn` PC = V0 + addr
    JumpOffset { addr: u16 },
    /// `Cxkk` Vx = random & kk
    Random { x: usize, kk: u8 },
    /// `Dxyn` draw_sprite(x=Vx, y=Vy, rows=n); VF = collision
    Draw { x: usize, y: usize, n: u8 },
    /// `Ex9E` if key Vx is down then skip
    SkipIfPressed { x: usize },
    /// `ExA1` if key Vx is up then skip
    SkipIfNotPressed { x: usize },
    /// `Fx07` Vx = DT
    LoadDelay { x: usize },
    /// `Fx0A` pause until a key is pressed, then Vx = key
    AwaitKey { x: usize },
    /// `Fx15` DT = Vx
    SetDelay { x: usize },
    /// `Fx18` ST = Vx
    SetSound { x: usize },
    /// `Fx1E` I += Vx
    AddAddress { x: usize },
    /// `Fx29` I = address of the glyph for Vx
    LoadGlyph { x: usize },
    /// `Fx33` mem[I..I+3] = bcd(Vx)
    StoreBcd { x: usize },
    /// `Fx55` mem[I..=I+x] = V0..=Vx
    StoreRegisters { x: usize },
    /// `Fx65` V0..=Vx = mem[I..=I+x]
    LoadRegisters { x: usize },
    /// An opcode whose family is known but whose sub-code is not.
    /// Executes as a no-op.
    Unhandled(u16),
}

impl Instruction {
    /// Selects the Instruction for a given opcode.
    pub fn decode(op: u16) -> Result<Self> {
        let (x, y, kk, addr) = (op.x(), op.y(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            [0x0, 0x0, 0xE, 0x0] => Instruction::Clear,
            [0x0, 0x0, 0xE, 0xE] => Instruction::Return,
            [0x0, ..] => Instruction::Unhandled(op),
            [0x1, ..] => Instruction::Jump { addr },
            [0x2, ..] => Instruction::Call { addr },
            [0x3, ..] => Instruction::SkipIfEqual { x, kk },
            [0x4, ..] => Instruction::SkipIfNotEqual { x, kk },
            [0x5, .., 0x0] => Instruction::SkipIfRegistersEqual { x, y },
            [0x5, ..] => Instruction::Unhandled(op),
            [0x6, ..] => Instruction::Load { x, kk },
            [0x7, ..] => Instruction::Add { x, kk },
            [0x8, .., 0x0] => Instruction::Move { x, y },
            [0x8, .., 0x1] => Instruction::Or { x, y },
            [0x8, .., 0x2] => Instruction::And { x, y },
            [0x8, .., 0x3] => Instruction::Xor { x, y },
            [0x8, .., 0x4] => Instruction::AddRegisters { x, y },
            [0x8, .., 0x5] => Instruction::Sub { x, y },
            [0x8, .., 0x6] => Instruction::ShiftRight { x },
            [0x8, .., 0x7] => Instruction::SubNegated { x, y },
            [0x8, .., 0xE] => Instruction::ShiftLeft { x },
            [0x8, ..] => Instruction::Unhandled(op),
            [0x9, .., 0x0] => Instruction::SkipIfRegistersNotEqual { x, y },
            [0x9, ..] => Instruction::Unhandled(op),
            [0xA, ..] => Instruction::LoadAddress { addr },
            [0xB, ..] => Instruction::JumpOffset { addr },
            [0xC, ..] => Instruction::Random { x, kk },
            [0xD, .., n] => Instruction::Draw { x, y, n },
            [0xE, _, 0x9, 0xE] => Instruction::SkipIfPressed { x },
            [0xE, _, 0xA, 0x1] => Instruction::SkipIfNotPressed { x },
            [0xE, ..] => Instruction::Unhandled(op),
            [0xF, _, 0x0, 0x7] => Instruction::LoadDelay { x },
            [0xF, _, 0x0, 0xA] => Instruction::AwaitKey { x },
            [0xF, _, 0x1, 0x5] => Instruction::SetDelay { x },
            [0xF, _, 0x1, 0x8] => Instruction::SetSound { x },
            [0xF, _, 0x1, 0xE] => Instruction::AddAddress { x },
            [0xF, _, 0x2, 0x9] => Instruction::LoadGlyph { x },
            [0xF, _, 0x3, 0x3] => Instruction::StoreBcd { x },
            [0xF, _, 0x5, 0x5] => Instruction::StoreRegisters { x },
            [0xF, _, 0x6, 0x5] => Instruction::LoadRegisters { x },
            [0xF, ..] => Instruction::Unhandled(op),
            _ => return Err(Error::UnknownOpcode { opcode: op }),
        };
        Ok(instruction)
    }
}

/// Formats the instruction in the customary assembler mnemonics.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { addr } => write!(f, "JP {:#05X}", addr),
            Instruction::Call { addr } => write!(f, "CALL {:#05X}", addr),
            Instruction::SkipIfEqual { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipIfNotEqual { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::Add { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddRegisters { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x } => write!(f, "SHR V{:X}", x),
            Instruction::SubNegated { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x } => write!(f, "SHL V{:X}", x),
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::LoadAddress { addr } => write!(f, "LD I, {:#05X}", addr),
            Instruction::JumpOffset { addr } => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipIfPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipIfNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::AwaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddAddress { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unhandled(op) => write!(f, "??? {:#06X}", op),
        }
    }
}
