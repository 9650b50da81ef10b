use std::path::PathBuf;

use clap::{ArgAction, Parser};

use schip8_core::{Config, Quirks};

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "schip8")]
#[command(about = "CHIP-8 / SCHIP interpreter", long_about = None)]
struct Args {
    /// ROM image to run (.c8 or .ch8).
    rom: PathBuf,

    /// Multiplies the cycles run per frame (1-10).
    #[arg(long, default_value_t = 1)]
    speed: u8,

    /// 8XY6/8XYE shift VY into VX.
    #[arg(long, action = ArgAction::SetTrue)]
    shift_uses_vy: bool,

    /// BNNN jumps to NNN + VX.
    #[arg(long, action = ArgAction::SetTrue)]
    jump_uses_vx: bool,

    /// FX55/FX65 leave I past the copied block.
    #[arg(long, action = ArgAction::SetTrue)]
    increment_index: bool,

    /// Where save states are written.
    #[arg(long, value_name = "PATH", default_value = "saves")]
    save_dir: PathBuf,

    /// Window size multiplier for each low resolution pixel.
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// ARGB hex color of lit pixels.
    #[arg(long, value_parser = parse_color, default_value = "FFFFFFFF")]
    drawn_color: u32,

    /// ARGB hex color of unlit pixels.
    #[arg(long, value_parser = parse_color, default_value = "FF000000")]
    undrawn_color: u32,
}

fn parse_color(value: &str) -> Result<u32, String> {
    let hex = value.trim_start_matches("0x").trim_start_matches('#');
    u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color {:?}: {}", value, e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = Config {
        quirks: Quirks {
            shift_uses_vy: args.shift_uses_vy,
            jump_uses_vx: args.jump_uses_vx,
            increment_index: args.increment_index,
        },
        speed_modifier: args.speed,
        drawn_color: args.drawn_color,
        undrawn_color: args.undrawn_color,
        save_dir: args.save_dir,
    };

    if let Err(error) = run::run(args.rom, config, args.scale) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("FF102030"), Ok(0xFF10_2030));
        assert_eq!(parse_color("0xff000000"), Ok(0xFF00_0000));
        assert_eq!(parse_color("#00ff00ff"), Ok(0x00FF_00FF));
        assert!(parse_color("purple").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::parse_from(["schip8", "pong.ch8", "--speed", "3", "--jump-uses-vx"]);
        assert_eq!(args.rom, PathBuf::from("pong.ch8"));
        assert_eq!(args.speed, 3);
        assert!(args.jump_uses_vx);
        assert!(!args.shift_uses_vy);
        assert_eq!(args.drawn_color, 0xFFFF_FFFF);
        assert_eq!(args.save_dir, PathBuf::from("saves"));
    }
}
