use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a ROM could not be loaded. The machine is left untouched in every case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{} isn't a .c8 or .ch8 file", .0.display())]
    InvalidRomExtension(PathBuf),

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),
}

/// Faults raised by a single interpreter cycle.
/// The faulting instruction has no effect and execution carries on with the next one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("stack overflow: call at {pc:#06X} with a full call stack")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}

/// Reasons a save state could not be written or restored.
#[derive(Debug, Error)]
pub enum SaveStateError {
    #[error("no ROM is loaded")]
    NoRom,

    #[error("unable to write save state: {0}")]
    SaveIo(#[source] io::Error),

    #[error("unable to read save state: {0}")]
    LoadIo(#[source] io::Error),

    #[error("not a save state file")]
    BadMagic,

    #[error("save state version {0} is not supported")]
    UnsupportedVersion(u8),

    #[error("unknown graphics mode {0} in save state")]
    UnknownGraphicsMode(u8),

    #[error("save state stack pointer {0} is out of range")]
    BadStackPointer(u16),

    #[error("save state is truncated")]
    Truncated,
}
