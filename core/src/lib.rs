pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use disasm::disassemble;
pub use error::{Fault, LoadError, SaveStateError};
pub use ports::{EventSink, FrameSink, InputSampler, Quiet};
pub use state::GraphicsMode;

mod chip8;
pub mod config;
pub mod constants;
mod disasm;
pub mod error;
mod instruction;
mod opcode;
mod operations;
pub mod ports;
pub mod savestate;
pub mod state;
