use crate::body_store::{BodyStore, Color};
use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

/// Consumes the body store read-only once per frame.
pub trait Renderer {
    fn draw(&mut self, frame: u64, bodies: &BodyStore) -> Result<()>;
}

/// Used when rendering is switched off.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: u64, _bodies: &BodyStore) -> Result<()> {
        Ok(())
    }
}

/// Draws every body as a filled circle into an in-memory RGBA frame and optionally
/// writes every Nth frame to `<dir>/frame_NNNNNN.png`.
pub struct ImageRenderer {
    image: RgbaImage,
    background: Rgba<u8>,
    output: Option<(PathBuf, u64)>,
    frames_written: u64,
}

impl ImageRenderer {
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let background = Rgba([background[0], background[1], background[2], 255]);
        Self {
            image: ImageBuffer::from_pixel(width, height, background),
            background,
            output: None,
            frames_written: 0,
        }
    }

    /// Enables PNG output. The directory is created if it does not exist.
    pub fn with_output(mut self, dir: impl Into<PathBuf>, interval: u64) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create frames directory '{}'", dir.display()))?;
        info!("Writing every {} frame(s) to {}", interval.max(1), dir.display());
        self.output = Some((dir, interval.max(1)));
        Ok(self)
    }

    /// The most recently drawn frame.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// Draw a body at the specified position with the given radius
fn draw_body(image: &mut RgbaImage, x: i32, y: i32, radius: i32, color: Color) {
    draw_filled_circle_mut(image, (x, y), radius, Rgba(color));
}

impl Renderer for ImageRenderer {
    fn draw(&mut self, frame: u64, bodies: &BodyStore) -> Result<()> {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }

        for body in bodies {
            if !body.position.is_finite() {
                continue;
            }
            let x = body.position.x.round() as i32;
            let y = body.position.y.round() as i32;
            let radius = body.radius.round().max(1.0) as i32;
            draw_body(&mut self.image, x, y, radius, body.color);
        }

        if let Some((dir, interval)) = &self.output {
            if frame % interval == 0 {
                let path = dir.join(format!("frame_{:06}.png", frame));
                self.image
                    .save(&path)
                    .with_context(|| format!("Failed to write frame to '{}'", path.display()))?;
                self.frames_written += 1;
                debug!("Saved frame {} to {}", frame, path.display());
            }
        }
        Ok(())
    }
}
