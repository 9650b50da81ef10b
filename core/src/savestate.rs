//! Save states: a snapshot of the volatile machine state keyed by ROM and slot.
//!
//! Binary format (little-endian):
//!   [0..4]   Magic: "C8ST"
//!   [4]      Version: u8
//!   then     opcode u16, I u16, PC u16, SP u16,
//!            delay timer u8, sound timer u8, redraw flag u8, graphics mode u8,
//!            memory (64KiB), frame buffer (width * height of the saved mode),
//!            V0..VF (16 bytes), stack (16 x u16), RPL flags (8 bytes)
//!
//! Quirks, speed and colors are session settings and never appear here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    MEMORY_SIZE, REGISTER_COUNT, RPL_FLAG_COUNT, SAVE_STATE_EXTENSION, STACK_SIZE,
};
use crate::error::SaveStateError;
use crate::state::{GraphicsMode, State};

const MAGIC: &[u8; 4] = b"C8ST";
const VERSION: u8 = 1;

struct StateWriter {
    buf: Vec<u8>,
}

impl StateWriter {
    fn new() -> Self {
        Self {
            buf: Vec::with_capacity(MEMORY_SIZE + 0x2000),
        }
    }

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.buf.push(v as u8);
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

struct StateReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StateReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], SaveStateError> {
        if self.pos + len > self.data.len() {
            return Err(SaveStateError::Truncated);
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, SaveStateError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, SaveStateError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_bool(&mut self) -> Result<bool, SaveStateError> {
        Ok(self.read_u8()? != 0)
    }
}

/// Serializes the machine state.
pub fn capture(state: &State) -> Vec<u8> {
    let mut w = StateWriter::new();
    w.write_bytes(MAGIC);
    w.write_u8(VERSION);

    w.write_u16(state.opcode);
    w.write_u16(state.i);
    w.write_u16(state.pc);
    w.write_u16(u16::from(state.sp));

    w.write_u8(state.delay_timer);
    w.write_u8(state.sound_timer);
    w.write_bool(state.draw_flag);
    w.write_u8(state.graphics_mode.discriminant());

    w.write_bytes(&state.memory);
    w.write_bytes(&state.frame_buffer);
    w.write_bytes(&state.v);
    for address in state.stack.iter() {
        w.write_u16(*address);
    }
    w.write_bytes(&state.rpl_flags);

    w.into_bytes()
}

/// Parses a save state into a fresh machine state.
/// Keys are not part of a save state and come back released.
pub fn restore(data: &[u8]) -> Result<State, SaveStateError> {
    let mut r = StateReader::new(data);
    if r.read_bytes(MAGIC.len())? != MAGIC {
        return Err(SaveStateError::BadMagic);
    }
    let version = r.read_u8()?;
    if version != VERSION {
        return Err(SaveStateError::UnsupportedVersion(version));
    }

    let mut state = State::new();
    state.opcode = r.read_u16()?;
    state.i = r.read_u16()?;
    state.pc = r.read_u16()?;
    let sp = r.read_u16()?;
    if sp as usize > STACK_SIZE {
        return Err(SaveStateError::BadStackPointer(sp));
    }
    state.sp = sp as u8;

    state.delay_timer = r.read_u8()?;
    state.sound_timer = r.read_u8()?;
    state.draw_flag = r.read_bool()?;

    // the frame buffer size depends on the mode, so it has to be known first
    let tag = r.read_u8()?;
    let mode =
        GraphicsMode::from_discriminant(tag).ok_or(SaveStateError::UnknownGraphicsMode(tag))?;
    state.graphics_mode = mode;

    state.memory.copy_from_slice(r.read_bytes(MEMORY_SIZE)?);
    state.frame_buffer = r.read_bytes(mode.pixel_count())?.to_vec();
    state.v.copy_from_slice(r.read_bytes(REGISTER_COUNT)?);
    for address in state.stack.iter_mut() {
        *address = r.read_u16()?;
    }
    state.rpl_flags.copy_from_slice(r.read_bytes(RPL_FLAG_COUNT)?);

    Ok(state)
}

/// `<save_dir>/<rom stem>_<slot>.c8state`
pub fn slot_path(save_dir: &Path, rom: &Path, slot: u32) -> PathBuf {
    let stem = rom
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    save_dir.join(format!("{}_{}.{}", stem, slot, SAVE_STATE_EXTENSION))
}

/// Writes a save state, creating its directory if needed.
pub fn save_to_file(state: &State, path: &Path) -> Result<(), SaveStateError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(SaveStateError::SaveIo)?;
    }
    fs::write(path, capture(state)).map_err(SaveStateError::SaveIo)
}

pub fn load_from_file(path: &Path) -> Result<State, SaveStateError> {
    let data = fs::read(path).map_err(SaveStateError::LoadIo)?;
    restore(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_state() -> State {
        let mut state = State::new();
        state.opcode = 0xD015;
        state.i = 0x345;
        state.pc = 0x2F0;
        state.sp = 3;
        state.delay_timer = 9;
        state.sound_timer = 4;
        state.set_graphics_mode(GraphicsMode::High);
        state.draw_flag = false;
        state.memory[0x300..0x304].copy_from_slice(&[1, 2, 3, 4]);
        state.memory[0xFFFF] = 0xEE;
        state.frame_buffer[128 * 64 - 1] = 1;
        state.v[0x3] = 0x77;
        state.stack[0..3].copy_from_slice(&[0x202, 0x404, 0x606]);
        state.rpl_flags[7] = 0x42;
        state
    }

    #[test]
    fn test_capture_restore_round_trip() {
        let state = busy_state();
        let restored = restore(&capture(&state)).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_capture_layout() {
        let state = busy_state();
        let data = capture(&state);
        assert_eq!(&data[0..4], b"C8ST");
        assert_eq!(data[4], 1);
        // opcode, I, PC, SP
        assert_eq!(data[5..13], [0x15, 0xD0, 0x45, 0x03, 0xF0, 0x02, 0x03, 0x00]);
        // timers, redraw flag, graphics mode
        assert_eq!(data[13..17], [9, 4, 0, 1]);
        let expected_len = 17 + 0x10000 + 128 * 64 + 16 + 32 + 8;
        assert_eq!(data.len(), expected_len);
    }

    #[test]
    fn test_low_res_frame_buffer_is_smaller() {
        let state = State::new();
        let data = capture(&state);
        assert_eq!(data.len(), 17 + 0x10000 + 64 * 32 + 16 + 32 + 8);
        assert_eq!(restore(&data).unwrap().frame_buffer.len(), 64 * 32);
    }

    #[test]
    fn test_restore_rejects_bad_magic() {
        let mut data = capture(&State::new());
        data[0] = b'X';
        assert!(matches!(restore(&data), Err(SaveStateError::BadMagic)));
    }

    #[test]
    fn test_restore_rejects_newer_version() {
        let mut data = capture(&State::new());
        data[4] = 2;
        assert!(matches!(
            restore(&data),
            Err(SaveStateError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_restore_rejects_unknown_mode() {
        let mut data = capture(&State::new());
        data[16] = 9;
        assert!(matches!(
            restore(&data),
            Err(SaveStateError::UnknownGraphicsMode(9))
        ));
    }

    #[test]
    fn test_restore_rejects_bad_stack_pointer() {
        let mut data = capture(&State::new());
        data[11] = 17;
        assert!(matches!(
            restore(&data),
            Err(SaveStateError::BadStackPointer(17))
        ));
    }

    #[test]
    fn test_restore_rejects_truncated() {
        let data = capture(&busy_state());
        assert!(matches!(
            restore(&data[..data.len() - 1]),
            Err(SaveStateError::Truncated)
        ));
        assert!(matches!(restore(&[]), Err(SaveStateError::Truncated)));
    }

    #[test]
    fn test_file_errors_name_their_direction() {
        let dir = std::env::temp_dir().join(format!("schip8-direction-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let missing = dir.join("missing.c8state");
        let error = load_from_file(&missing).unwrap_err();
        assert!(matches!(error, SaveStateError::LoadIo(_)));
        assert!(error.to_string().starts_with("unable to read save state"));

        // a file where the save directory should be
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        fs::write(&blocker, b"").unwrap();
        let error = save_to_file(&State::new(), &blocker.join("slot.c8state")).unwrap_err();
        assert!(matches!(error, SaveStateError::SaveIo(_)));
        assert!(error.to_string().starts_with("unable to write save state"));
    }

    #[test]
    fn test_slot_path() {
        let path = slot_path(Path::new("saves"), Path::new("roms/PONG.ch8"), 3);
        assert_eq!(path, Path::new("saves").join("PONG_3.c8state"));
    }
}
