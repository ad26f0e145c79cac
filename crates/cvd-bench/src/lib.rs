//! Input generators shared by the cvd-rs benchmarks.

use cvd_core::{Layout, PixelBuffer};

/// Screen-sized frame: 1920x1080.
pub const HD: (u32, u32) = (1920, 1080);

/// Horizontal hue sweep with a vertical brightness ramp.
///
/// Wide enough frames hit every 8-bit code in red.
pub fn gradient(width: u32, height: u32, layout: Layout) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height, layout);
    let (w, h) = (width.max(1) as u64, height.max(1) as u64);
    let channels = layout.channels();
    for (i, px) in img.data_mut().chunks_exact_mut(channels).enumerate() {
        let (x, y) = (i as u64 % w, i as u64 / w);
        let u = (x * 255 / w) as u8;
        let v = (y * 255 / h) as u8;
        px[..3].copy_from_slice(&[u, v, u ^ v]);
        if channels == 4 {
            px[3] = 255;
        }
    }
    img
}
