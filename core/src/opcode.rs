/// # Opcodes
///
/// Chip-8 and SCHIP opcodes are 16 bits each, fetched big-endian from `memory[pc]` and
/// `memory[pc + 1]`. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` the instruction group; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a group (e.g. the 8XY_ ALU ops)
/// - `(_, _, n, n)` more specific behavior within a group (e.g. FX__)
/// - `(_, n, n, n)` fixed functions without operands (e.g. 00E0; clear screen)
///
/// Nibbles not used to select the operation carry its operands.
/// - `NNN` a 12-bit address
/// - `NN` an 8-bit literal assigned to and/or compared with Vx
/// - `N` a 4-bit literal (sprite height, scroll distance)
/// - `X` the register Vx or the range of registers V0..=Vx
/// - `Y` the register Vy
pub trait Opcode {
    /// The Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's second nibble.
    /// `[_X__]`
    fn x(&self) -> usize;

    /// The Opcode's third nibble.
    /// `[__Y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___N]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__NN]`
    fn nn(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_NNN]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            ((self & 0xF000) >> 12) as u8,
            ((self & 0x0F00) >> 8) as u8,
            ((self & 0x00F0) >> 4) as u8,
            self.n(),
        )
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

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
