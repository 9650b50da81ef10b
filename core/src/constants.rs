/// Bytes of addressable memory. Every `u16` address is in range.
pub const MEMORY_SIZE: usize = 0x10000;

/// ROMs are loaded here; everything below is reserved for the font sprites.
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Depth of the return address stack.
pub const STACK_SIZE: usize = 16;

/// Number of general purpose registers (V0..VF).
pub const REGISTER_COUNT: usize = 16;

/// Size of the SCHIP "RPL" flag register bank.
pub const RPL_FLAG_COUNT: usize = 8;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Interpreter cycles run for every host frame at speed modifier 1.
/// The Chip-8 ran at roughly 500-600Hz and hosts tick at roughly 60Hz.
pub const CYCLES_PER_TICK: usize = 9;

pub const MIN_SPEED_MODIFIER: u8 = 1;
pub const MAX_SPEED_MODIFIER: u8 = 10;

pub const LOW_RES_WIDTH: usize = 64;
pub const LOW_RES_HEIGHT: usize = 32;
pub const HIGH_RES_WIDTH: usize = 128;
pub const HIGH_RES_HEIGHT: usize = 64;

/// ARGB8888 colors used when converting the frame buffer to an image.
pub const DEFAULT_DRAWN_COLOR: u32 = 0xFFFF_FFFF;
pub const DEFAULT_UNDRAWN_COLOR: u32 = 0xFF00_0000;

/// ROM file extensions accepted by the loader.
pub const ROM_EXTENSIONS: [&str; 2] = ["c8", "ch8"];

/// Extension of save-state files.
pub const SAVE_STATE_EXTENSION: &str = "c8state";

/// Bytes per glyph in `SPRITE_SHEET`.
pub const SMALL_GLYPH_SIZE: u16 = 5;

/// Bytes per glyph in `BIG_SPRITE_SHEET`.
pub const BIG_GLYPH_SIZE: u16 = 10;

/// Address of the first glyph of `BIG_SPRITE_SHEET`.
pub const BIG_SPRITE_SHEET_START: u16 = 80;

/// # Sprite Sheet
/// Sprites for the hexadecimal digits 0..F, 4 pixels wide and 5 tall.
/// Stored at the very start of memory so that the sprite for digit `d` lives at `d * 5`.
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// # Big Sprite Sheet
/// SCHIP sprites for the decimal digits 0..9, 8 pixels wide and 10 tall.
/// Stored directly after `SPRITE_SHEET`.
pub const BIG_SPRITE_SHEET: [u8; 100] = [
    0x3C, 0x7E, 0xE7, 0xC3, 0xC3, 0xC3, 0xC3, 0xE7, 0x7E, 0x3C, // 0
    0x18, 0x38, 0x58, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, // 1
    0x3E, 0x7F, 0xC3, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFF, 0xFF, // 2
    0x3C, 0x7E, 0xC3, 0x03, 0x0E, 0x0E, 0x03, 0xC3, 0x7E, 0x3C, // 3
    0x06, 0x0E, 0x1E, 0x36, 0x66, 0xC6, 0xFF, 0xFF, 0x06, 0x06, // 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFC, 0xFE, 0x03, 0xC3, 0x7E, 0x3C, // 5
    0x3E, 0x7C, 0xC0, 0xC0, 0xFC, 0xFE, 0xC3, 0xC3, 0x7E, 0x3C, // 6
    0xFF, 0xFF, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x60, 0x60, // 7
    0x3C, 0x7E, 0xC3, 0xC3, 0x7E, 0x7E, 0xC3, 0xC3, 0x7E, 0x3C, // 8
    0x3C, 0x7E, 0xC3, 0xC3, 0x7F, 0x3F, 0x03, 0x03, 0x3E, 0x7C, // 9
];
