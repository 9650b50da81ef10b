use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use schip8_core::constants::KEY_COUNT;
use schip8_core::{Chip8, Config};
use schip8_display::Display;

use crate::keymap::keymap;

/// Host frames per second; each one runs a tick of the interpreter.
const FRAME_RATE: u64 = 60;

pub fn run(rom: PathBuf, config: Config, scale: u32) -> Result<(), String> {
    let mut chip8: Chip8 = Chip8::with_config(config);

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init()?;
    let mut display: Display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump()?;

    // Load ROM; without one the window stays up but nothing runs
    if chip8.load_game(&rom).is_err() {
        log::warn!("continuing without a ROM");
    }

    // Set initial timing
    let frame_time: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE);
    let mut last_frame: Instant = Instant::now();

    // Keypad as last reported by the keyboard
    let mut pressed = [false; KEY_COUNT];
    // Save state slot targeted by the save/load hotkeys
    let mut slot: u32 = 0;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => pressed[usize::from(kc)] = true,
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::F5, _) => chip8.save_state(slot),
                    (Keycode::F9, _) => chip8.load_state(slot),
                    (Keycode::PageUp, _) => {
                        slot = slot.saturating_add(1);
                        log::info!("save slot {}", slot);
                    }
                    (Keycode::PageDown, _) => {
                        slot = slot.saturating_sub(1);
                        log::info!("save slot {}", slot);
                    }
                    (Keycode::Backspace, _) => {
                        if chip8.load_game(&rom).is_ok() {
                            pressed = [false; KEY_COUNT];
                        }
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(kc) => pressed[usize::from(kc)] = false,
                    None => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let mut input = |keys: &mut [bool; KEY_COUNT]| *keys = pressed;
        let mut log_event = |message: &str| log::trace!(target: "schip8::events", "{}", message);
        chip8.tick(&mut input, &mut display, &mut log_event);

        // Handle timing
        let current_time = Instant::now();
        let elapsed_frame_time = current_time - last_frame;
        if frame_time > elapsed_frame_time {
            std::thread::sleep(frame_time - elapsed_frame_time);
        }
        last_frame = Instant::now();
    }

    Ok(())
}
