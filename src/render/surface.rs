use crate::foundation::core::Canvas;
use crate::foundation::error::{MockupError, MockupResult};

/// Caller-owned premultiplied RGBA8 drawing surface.
///
/// Every compositing call draws into its own surface; nothing about a surface is shared
/// between calls.
#[derive(Clone, Debug)]
pub struct DrawingSurface {
    canvas: Canvas,
    data: Vec<u8>,
}

impl DrawingSurface {
    /// Allocate a transparent surface. The CPU rasterizer addresses pixels with `u16`, so
    /// either dimension being zero or above `u16::MAX` makes the surface unavailable.
    pub fn new(canvas: Canvas) -> MockupResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MockupError::surface(format!(
                "surface must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        if canvas.width > u32::from(u16::MAX) || canvas.height > u32::from(u16::MAX) {
            return Err(MockupError::surface(format!(
                "surface {}x{} exceeds the rasterizer limit of {}",
                canvas.width,
                canvas.height,
                u16::MAX
            )));
        }
        let len = canvas.rgba8_len()?;
        Ok(Self {
            canvas,
            data: vec![0u8; len],
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let idx = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    #[cfg(test)]
    pub(crate) fn clear(&mut self, color: crate::foundation::core::Rgba8Premul) {
        let c = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }
}
