use crate::constants::{
    BIG_SPRITE_SHEET, BIG_SPRITE_SHEET_START, HIGH_RES_HEIGHT, HIGH_RES_WIDTH, KEY_COUNT,
    LOW_RES_HEIGHT, LOW_RES_WIDTH, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, RPL_FLAG_COUNT,
    SPRITE_SHEET, STACK_SIZE,
};

/// Resolution of the frame buffer.
/// Chip-8 programs draw at 64x32; SCHIP programs may switch to 128x64.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsMode {
    Low,
    High,
}

impl GraphicsMode {
    pub fn width(self) -> usize {
        match self {
            GraphicsMode::Low => LOW_RES_WIDTH,
            GraphicsMode::High => HIGH_RES_WIDTH,
        }
    }

    pub fn height(self) -> usize {
        match self {
            GraphicsMode::Low => LOW_RES_HEIGHT,
            GraphicsMode::High => HIGH_RES_HEIGHT,
        }
    }

    /// Number of cells in a frame buffer of this resolution.
    pub fn pixel_count(self) -> usize {
        self.width() * self.height()
    }

    /// Single byte tag used by the save-state format.
    pub fn discriminant(self) -> u8 {
        match self {
            GraphicsMode::Low => 0,
            GraphicsMode::High => 1,
        }
    }

    pub fn from_discriminant(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(GraphicsMode::Low),
            1 => Some(GraphicsMode::High),
            _ => None,
        }
    }
}

impl Default for GraphicsMode {
    fn default() -> Self {
        GraphicsMode::Low
    }
}

/// The volatile machine state; everything here is reset when a ROM is loaded.
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
/// - (rpl_flags) 8 SCHIP flag registers, only reachable through FX75/FX85
///
/// Counter
/// - (pc) a 16-bit program counter
/// - (opcode) the instruction most recently fetched from `pc`
///
/// Pointer
/// - (sp) number of return addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per executed cycle
///
/// ## Memory
/// - 16 entry return address stack
/// - 64KiB of addressable memory; fonts live below 0x200
/// - one byte per pixel frame buffer, sized by `graphics_mode`
///
/// ## Input
/// - pressed status of the keys 0..F, refreshed by the host every cycle
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub opcode: u16,
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: Box<[u8]>,
    pub frame_buffer: Vec<u8>,
    pub graphics_mode: GraphicsMode,
    pub draw_flag: bool,
    pub keys: [bool; KEY_COUNT],
    pub rpl_flags: [u8; RPL_FLAG_COUNT],
}

impl State {
    pub fn new() -> Self {
        let mut memory = vec![0; MEMORY_SIZE].into_boxed_slice();
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        let big_start = BIG_SPRITE_SHEET_START as usize;
        memory[big_start..big_start + BIG_SPRITE_SHEET.len()].copy_from_slice(&BIG_SPRITE_SHEET);

        let graphics_mode = GraphicsMode::Low;

        State {
            opcode: 0,
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: vec![0; graphics_mode.pixel_count()],
            graphics_mode,
            // a fresh machine always has a (blank) frame to show
            draw_flag: true,
            keys: [false; KEY_COUNT],
            rpl_flags: [0; RPL_FLAG_COUNT],
        }
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read(self.pc));
        let right = u16::from(self.read(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    pub fn width(&self) -> usize {
        self.graphics_mode.width()
    }

    pub fn height(&self) -> usize {
        self.graphics_mode.height()
    }

    /// Switches resolution, replacing the frame buffer with a blank one of the new size.
    /// Selecting the current mode leaves the frame buffer untouched.
    pub fn set_graphics_mode(&mut self, mode: GraphicsMode) {
        if self.graphics_mode == mode {
            return;
        }
        self.graphics_mode = mode;
        self.frame_buffer = vec![0; mode.pixel_count()];
        self.draw_flag = true;
    }

    /// XORs a single pixel onto the frame buffer.
    /// Returns whether a lit pixel was turned off; pixels outside the screen are dropped.
    pub fn flip_pixel(&mut self, x: usize, y: usize) -> bool {
        if x >= self.width() || y >= self.height() {
            return false;
        }
        let index = y * self.width() + x;
        let erased = self.frame_buffer[index] == 1;
        self.frame_buffer[index] ^= 1;
        erased
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
