//! One function per instruction.
//!
//! Every operation runs after the cycle has already moved the pc past the opcode,
//! so skips add another 2 and jumps simply overwrite it.

use crate::config::Quirks;
use crate::constants::{
    BIG_GLYPH_SIZE, BIG_SPRITE_SHEET_START, REGISTER_COUNT, RPL_FLAG_COUNT, SMALL_GLYPH_SIZE,
    STACK_SIZE,
};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::{GraphicsMode, State};

/// What the cycle should do once an operation has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    /// The program asked the interpreter to quit.
    Exit,
}

pub type Outcome = Result<Step, Fault>;

const FLAG: usize = REGISTER_COUNT - 1;

fn next() -> Outcome {
    Ok(Step::Next)
}

fn skip_if(state: &mut State, condition: bool) -> Outcome {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
    next()
}

/// Address of the instruction being executed.
fn current_pc(state: &State) -> u16 {
    state.pc.wrapping_sub(2)
}

/// clear
pub fn clr(_op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.frame_buffer.iter_mut().for_each(|pixel| *pixel = 0);
    state.draw_flag = true;
    next()
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow {
            pc: current_pc(state),
        });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp as usize];
    next()
}

/// 128x64 graphics
pub fn hires(_op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.set_graphics_mode(GraphicsMode::High);
    next()
}

/// 64x32 graphics
pub fn lores(_op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.set_graphics_mode(GraphicsMode::Low);
    next()
}

/// quit the interpreter
pub fn exit(_op: u16, _state: &mut State, _quirks: &Quirks) -> Outcome {
    Ok(Step::Exit)
}

/// scroll right 4 / scroll left 4 / scroll down n
/// Accepted but not carried out.
pub fn scroll(op: u16, _state: &mut State, _quirks: &Quirks) -> Outcome {
    log::debug!("scroll opcode {:04X} is not implemented", op);
    next()
}

/// PC = NNN
pub fn jump(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.pc = op.nnn();
    next()
}

/// STACK.push(PC); PC = NNN
pub fn call(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    if state.sp as usize == STACK_SIZE {
        return Err(Fault::StackOverflow {
            pc: current_pc(state),
        });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 1;
    state.pc = op.nnn();
    next()
}

/// if Vx == NN then skip
pub fn ske(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = state.v[op.x()] == op.nn();
    skip_if(state, condition)
}

/// if Vx != NN then skip
pub fn skne(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = state.v[op.x()] != op.nn();
    skip_if(state, condition)
}

/// if Vx == Vy then skip
pub fn skre(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition)
}

/// Vx = NN
pub fn load(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] = op.nn();
    next()
}

/// Vx += NN
/// Overflow wraps around and VF is left alone
pub fn add(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.nn());
    next()
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] = state.v[op.y()];
    next()
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] |= state.v[op.y()];
    next()
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] &= state.v[op.y()];
    next()
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] ^= state.v[op.y()];
    next()
}

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[FLAG] = carry as u8;
    next()
}

/// Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[FLAG] = (vx >= vy) as u8;
    next()
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: u16, state: &mut State, quirks: &Quirks) -> Outcome {
    let source = shift_source(op, state, quirks);
    state.v[op.x()] = source >> 1;
    state.v[FLAG] = source & 0x1;
    next()
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[FLAG] = (vy >= vx) as u8;
    next()
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: u16, state: &mut State, quirks: &Quirks) -> Outcome {
    let source = shift_source(op, state, quirks);
    state.v[op.x()] = source << 1;
    state.v[FLAG] = source >> 7;
    next()
}

fn shift_source(op: u16, state: &State, quirks: &Quirks) -> u8 {
    if quirks.shift_uses_vy {
        state.v[op.y()]
    } else {
        state.v[op.x()]
    }
}

/// if Vx != Vy then skip
pub fn skrne(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition)
}

/// I = NNN
pub fn loadi(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.i = op.nnn();
    next()
}

/// PC = NNN + V0, or NNN + Vx with the jump quirk
pub fn jumpi(op: u16, state: &mut State, quirks: &Quirks) -> Outcome {
    let offset = if quirks.jump_uses_vx {
        state.v[op.x()]
    } else {
        state.v[0x0]
    };
    state.pc = op.nnn() + u16::from(offset);
    next()
}

/// Vx = rand_byte & NN
pub fn rand(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let rand_byte: u8 = rand::random();
    state.v[op.x()] = rand_byte & op.nn();
    next()
}

/// draw_sprite(x=Vx y=Vy height=N)
/// XORs a sprite read from memory at I onto the frame buffer at (Vx, Vy).
/// Sprites are 8 pixels wide and N tall, or 16x16 when N is 0 in high resolution.
/// Pixels past the edges are clipped. VF is set if any lit pixel was erased.
pub fn draw(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let x = state.v[op.x()] as usize;
    let y = state.v[op.y()] as usize;
    let (rows, columns) = match (op.n(), state.graphics_mode) {
        (0, GraphicsMode::High) => (16, 16),
        (n, _) => (n as usize, 8),
    };
    let bytes_per_row = columns / 8;

    let mut erased = false;
    for row in 0..rows {
        for column in 0..columns {
            let offset = row * bytes_per_row + column / 8;
            let byte = state.read(state.i.wrapping_add(offset as u16));
            if (byte >> (7 - column % 8)) & 1 == 1 {
                erased |= state.flip_pixel(x + column, y + row);
            }
        }
    }

    state.v[FLAG] = erased as u8;
    state.draw_flag = true;
    next()
}

/// if Vx.pressed then skip
pub fn skpr(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = key_pressed(state, state.v[op.x()]);
    skip_if(state, condition)
}

/// if !Vx.pressed then skip
pub fn skup(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let condition = !key_pressed(state, state.v[op.x()]);
    skip_if(state, condition)
}

// only the low nibble names a key
fn key_pressed(state: &State, key: u8) -> bool {
    state.keys[(key & 0xF) as usize]
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.v[op.x()] = state.delay_timer;
    next()
}

/// await keypress for Vx
/// Takes the lowest pressed key; with none pressed the pc is wound back so this runs again.
pub fn keyd(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    match state.keys.iter().position(|&pressed| pressed) {
        Some(key) => state.v[op.x()] = key as u8,
        None => state.pc = current_pc(state),
    }
    next()
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.delay_timer = state.v[op.x()];
    next()
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.sound_timer = state.v[op.x()];
    next()
}

/// I += Vx
pub fn addi(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    next()
}

/// I = Vx * 5
/// Points I at the small sprite for the hex digit in Vx
pub fn ldspr(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.i = u16::from(state.v[op.x()]) * SMALL_GLYPH_SIZE;
    next()
}

/// I = Vx * 10 + 80
/// Points I at the big sprite for the decimal digit in Vx
pub fn ldbig(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    state.i = u16::from(state.v[op.x()]) * BIG_GLYPH_SIZE + BIG_SPRITE_SHEET_START;
    next()
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write(state.i.wrapping_add(offset as u16), *digit);
    }
    next()
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State, quirks: &Quirks) -> Outcome {
    for register in 0..=op.x() {
        state.write(state.i.wrapping_add(register as u16), state.v[register]);
    }
    advance_index(op, state, quirks);
    next()
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State, quirks: &Quirks) -> Outcome {
    for register in 0..=op.x() {
        state.v[register] = state.read(state.i.wrapping_add(register as u16));
    }
    advance_index(op, state, quirks);
    next()
}

fn advance_index(op: u16, state: &mut State, quirks: &Quirks) {
    if quirks.increment_index {
        state.i = state.i.wrapping_add(op.x() as u16 + 1);
    }
}

/// RPL[0..=x] = V0..=Vx
/// X is capped to the size of the flag bank
pub fn savef(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let last = op.x().min(RPL_FLAG_COUNT - 1);
    state.rpl_flags[..=last].copy_from_slice(&state.v[..=last]);
    next()
}

/// V0..=Vx = RPL[0..=x]
pub fn loadf(op: u16, state: &mut State, _quirks: &Quirks) -> Outcome {
    let last = op.x().min(RPL_FLAG_COUNT - 1);
    state.v[..=last].copy_from_slice(&state.rpl_flags[..=last]);
    next()
}

/// anything else, including 0NNN machine code calls
pub fn unknown(op: u16, _state: &mut State, _quirks: &Quirks) -> Outcome {
    log::debug!("ignoring unknown opcode {:04X}", op);
    next()
}
