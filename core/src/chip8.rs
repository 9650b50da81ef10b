use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{Config, Quirks};
use crate::constants::{
    CYCLES_PER_TICK, KEY_COUNT, MAX_ROM_SIZE, MAX_SPEED_MODIFIER, MIN_SPEED_MODIFIER,
    PROGRAM_START, REGISTER_COUNT, ROM_EXTENSIONS, RPL_FLAG_COUNT, STACK_SIZE,
};
use crate::disasm::disassemble;
use crate::error::{Fault, LoadError, SaveStateError};
use crate::instruction;
use crate::operations::Step;
use crate::ports::{EventSink, FrameSink, InputSampler};
use crate::savestate;
use crate::state::{GraphicsMode, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language;
/// this one also understands the SCHIP extensions.
///
/// Tracks:
///  - the volatile machine `state`, reset whenever a ROM is loaded
///  - the session `config` (quirks, speed, colors, save directory), which survives resets
///  - the path of the loaded ROM; without one the machine idles
///
/// Supplies interfaces for:
/// - loading roms
/// - running a host frame worth of cycles against the host's ports
/// - single stepping the CPU
/// - saving and restoring numbered save-state slots
/// - inspecting everything a debugger might want to show
pub struct Chip8 {
    state: State,
    config: Config,
    rom_path: Option<PathBuf>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(mut config: Config) -> Self {
        config.speed_modifier = clamp_speed(config.speed_modifier);
        Chip8 {
            state: State::new(),
            config,
            rom_path: None,
        }
    }

    /// Load a rom from a `.c8` or `.ch8` file.
    /// On failure the machine, including any previously loaded ROM, is left untouched.
    ///
    /// # Arguments
    /// * `path` location of the ROM image
    pub fn load_game<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        if !has_rom_extension(path) {
            let error = LoadError::InvalidRomExtension(path.to_path_buf());
            log::error!("{}", error);
            return Err(error);
        }

        let rom = read_rom(path).map_err(|error| {
            log::error!("unable to load {}: {}", path.display(), error);
            error
        })?;
        self.install(path.to_path_buf(), &rom)?;
        log::info!("loaded {} ({} bytes)", path.display(), rom.len());
        Ok(())
    }

    /// Resets the machine and copies `rom` in at the program start.
    fn install(&mut self, path: PathBuf, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.init();
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        self.rom_path = Some(path);
        Ok(())
    }

    /// Puts the volatile state back to power-on: fonts installed, everything else cleared.
    fn init(&mut self) {
        self.state = State::new();
    }

    /// Runs one host frame: `9 * speed_modifier` cycles.
    /// Keys are resampled before every cycle and a frame is rendered after every cycle
    /// that left a redraw pending. Does nothing while no ROM is loaded.
    ///
    /// # Arguments
    /// * `input` refreshes the pressed keys
    /// * `frames` receives the frame buffer as colors
    /// * `events` receives opcode log lines, beeps and faults
    pub fn tick(
        &mut self,
        input: &mut dyn InputSampler,
        frames: &mut dyn FrameSink,
        events: &mut dyn EventSink,
    ) {
        if self.rom_path.is_none() {
            return;
        }

        let cycles = CYCLES_PER_TICK * usize::from(self.config.speed_modifier);
        for _ in 0..cycles {
            input.sample(&mut self.state.keys);

            if let Err(fault) = self.cycle(events) {
                log::warn!("{}", fault);
                events.event(&fault.to_string());
            }

            if self.state.draw_flag {
                frames.render(&self.frame_image(), self.screen_width(), self.screen_height());
                self.state.draw_flag = false;
            }

            // the program quit
            if self.rom_path.is_none() {
                break;
            }
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - executes it
    /// - ticks both timers
    pub fn cycle(&mut self, events: &mut dyn EventSink) -> Result<(), Fault> {
        let pc = self.state.pc;
        let op = self.state.fetch();
        self.state.opcode = op;
        self.state.pc = pc.wrapping_add(2);

        let line = format!("{:04X}: {:04X} {}", pc, op, disassemble(op));
        log::trace!("{}", line);
        events.event(&line);

        let outcome = instruction::from_op(&op)(op, &mut self.state, &self.config.quirks);
        if let Ok(Step::Exit) = outcome {
            log::info!("program exited at {:04X}", pc);
            self.init();
            self.rom_path = None;
            return Ok(());
        }

        self.advance_timers(events);
        outcome.map(|_| ())
    }

    /// Both timers count down once per cycle; the sound timer beeps when it runs out.
    fn advance_timers(&mut self, events: &mut dyn EventSink) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }

        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
            if self.state.sound_timer == 0 {
                log::info!("BEEP!");
                events.event("BEEP!");
            }
        }
    }

    /// The frame buffer as drawn/undrawn colors, row major.
    pub fn frame_image(&self) -> Vec<u32> {
        self.state
            .frame_buffer
            .iter()
            .map(|&pixel| {
                if pixel == 1 {
                    self.config.drawn_color
                } else {
                    self.config.undrawn_color
                }
            })
            .collect()
    }

    /// Writes the current state to the save-state file for `slot`.
    /// Failures are logged and otherwise ignored.
    pub fn save_state(&self, slot: u32) {
        match self.try_save_state(slot) {
            Ok(path) => log::info!("saved state: {}", path.display()),
            Err(error) => log::error!("failed to save state to slot {}: {}", slot, error),
        }
    }

    /// Replaces the current state with the save-state file for `slot`.
    /// Failures are logged and leave the machine as it was.
    pub fn load_state(&mut self, slot: u32) {
        match self.try_load_state(slot) {
            Ok(path) => log::info!("loaded state: {}", path.display()),
            Err(error) => log::error!("failed to load state from slot {}: {}", slot, error),
        }
    }

    /// Like `save_state`, but hands back the file written or the reason nothing was.
    pub fn try_save_state(&self, slot: u32) -> Result<PathBuf, SaveStateError> {
        let path = self.slot_path(slot)?;
        savestate::save_to_file(&self.state, &path)?;
        Ok(path)
    }

    /// Like `load_state`, but hands back the file read or the reason nothing was.
    /// Held keys are kept across the load and a redraw is left pending.
    pub fn try_load_state(&mut self, slot: u32) -> Result<PathBuf, SaveStateError> {
        let path = self.slot_path(slot)?;
        let mut state = savestate::load_from_file(&path)?;
        state.keys = self.state.keys;
        // the host is still showing the frame from before the load
        state.draw_flag = true;
        self.state = state;
        Ok(path)
    }

    /// Location of the save-state file for `slot` of the loaded ROM.
    pub fn slot_path(&self, slot: u32) -> Result<PathBuf, SaveStateError> {
        let rom = self.rom_path.as_ref().ok_or(SaveStateError::NoRom)?;
        Ok(savestate::slot_path(&self.config.save_dir, rom, slot))
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.rom_path.is_some()
    }

    pub fn quirks(&self) -> Quirks {
        self.config.quirks
    }

    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.config.quirks = quirks;
    }

    pub fn speed_modifier(&self) -> u8 {
        self.config.speed_modifier
    }

    /// Clamped to 1..=10.
    pub fn set_speed_modifier(&mut self, speed_modifier: u8) {
        self.config.speed_modifier = clamp_speed(speed_modifier);
    }

    pub fn drawn_color(&self) -> u32 {
        self.config.drawn_color
    }

    pub fn set_drawn_color(&mut self, color: u32) {
        self.config.drawn_color = color;
    }

    pub fn undrawn_color(&self) -> u32 {
        self.config.undrawn_color
    }

    pub fn set_undrawn_color(&mut self, color: u32) {
        self.config.undrawn_color = color;
    }

    pub fn set_save_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.config.save_dir = dir.into();
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }

    pub fn frame_buffer(&self) -> &[u8] {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.state.v
    }

    pub fn rpl_flags(&self) -> &[u8; RPL_FLAG_COUNT] {
        &self.state.rpl_flags
    }

    pub fn stack(&self) -> &[u16; STACK_SIZE] {
        &self.state.stack
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.state.keys
    }

    pub fn opcode(&self) -> u16 {
        self.state.opcode
    }

    pub fn index_register(&self) -> u16 {
        self.state.i
    }

    pub fn program_counter(&self) -> u16 {
        self.state.pc
    }

    pub fn stack_pointer(&self) -> u8 {
        self.state.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn graphics_mode(&self) -> GraphicsMode {
        self.state.graphics_mode
    }

    pub fn screen_width(&self) -> usize {
        self.state.width()
    }

    pub fn screen_height(&self) -> usize {
        self.state.height()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_speed(speed_modifier: u8) -> u8 {
    speed_modifier.max(MIN_SPEED_MODIFIER).min(MAX_SPEED_MODIFIER)
}

fn has_rom_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map_or(false, |extension| {
            ROM_EXTENSIONS
                .iter()
                .any(|allowed| extension.eq_ignore_ascii_case(allowed))
        })
}

fn read_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len() as usize;
    if size > MAX_ROM_SIZE {
        return Err(LoadError::RomTooLarge {
            size,
            max_size: MAX_ROM_SIZE,
        });
    }
    // metadata can under-report (pipes, device nodes), so never read past the limit
    let mut rom = Vec::with_capacity(size);
    file.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
    if rom.len() > MAX_ROM_SIZE {
        return Err(LoadError::RomTooLarge {
            size: rom.len(),
            max_size: MAX_ROM_SIZE,
        });
    }
    Ok(rom)
}
