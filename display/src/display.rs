use sdl2::pixels::PixelFormatEnum;

use schip8_core::constants::{LOW_RES_HEIGHT, LOW_RES_WIDTH};
use schip8_core::FrameSink;

/// Bytes per ARGB8888 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// # Display
/// The display is composed of 64x32 pixels in low resolution mode and 128x64 in high resolution mode.
/// Frames arrive already colored as packed ARGB values, one per pixel, concatenated rows.
/// The window keeps its size; whichever resolution is active gets stretched to fill it.
/// The display only gets a call to `render` when the frame buffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each low resolution pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "SCHIP-8",
                LOW_RES_WIDTH as u32 * scale,
                LOW_RES_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats a frame for rendering as an SDL2 texture.
    ///
    /// An ARGB8888 SDL2 texture stores each pixel as a native-endian 32-bit word,
    /// so this is just the frame's words laid out as bytes.
    ///
    /// # Arguments
    /// * `frame` packed ARGB colors
    fn frame_to_sdl_texture(frame: &[u32]) -> Vec<u8> {
        frame.iter().flat_map(|pixel| pixel.to_ne_bytes()).collect()
    }

    /// Uploads a frame into a streaming texture and presents it.
    ///
    /// # Arguments
    /// * `frame` packed ARGB colors
    /// * `width` pixels per row of `frame`
    /// * `height` rows in `frame`
    pub fn draw(&mut self, frame: &[u32], width: usize, height: usize) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width as u32, height as u32)
            .map_err(|e| e.to_string())?;

        let bytes = Display::frame_to_sdl_texture(frame);
        let row_bytes = width * BYTES_PER_PIXEL;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded past `row_bytes`
            for (row, pixels) in bytes.chunks(row_bytes).take(height).enumerate() {
                let start = row * pitch;
                buffer[start..start + pixels.len()].copy_from_slice(pixels);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl FrameSink for Display {
    fn render(&mut self, frame: &[u32], width: usize, height: usize) {
        if let Err(error) = self.draw(frame, width, height) {
            log::error!("failed to render frame: {}", error);
        }
    }
}
