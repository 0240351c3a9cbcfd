/// # Opcodes
///
/// Chip-8 opcodes are 16 bits, stored big-endian across two bytes of memory.
/// Their behaviour is cased on some combination of:
/// - `(n, _, _, _)` the family; applies to all opcodes
/// - `(_, _, _, n)` specific behaviour within the `5`, `8` and `9` families
/// - `(_, _, n, n)` specific behaviour within the `0`, `E` and `F` families
///
/// Nibbles not used to select the operation carry its operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` a byte that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` either the register Vx or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` the height of a sprite
pub trait Opcode {
    /// The Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> [u8; 4];

    /// `[f___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> [u8; 4] {
        [
            self.family(),
            self.x() as u8,
            self.y() as u8,
            self.n(),
        ]
    }

    fn family(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Packs the two bytes of an instruction into an opcode.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
