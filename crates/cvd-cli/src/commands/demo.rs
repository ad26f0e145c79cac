//! Demo command
//!
//! Drives a [`ViewerSession`] with a synthetic screen of vertical color bars
//! and reports the mean color of every frame the session presents.

use super::{hex, parse_modes};
use crate::DemoArgs;
use anyhow::{Context, Result};
use cvd_color::{CaptureSource, Deficiency, DisplaySink, ViewerSession};
use cvd_core::{Error, Layout, PixelBuffer, Rect};
use std::io::{self, Write};
use tracing::{debug, info};

/// The synthetic screen.
const SCREEN: Rect = Rect::from_size(1920, 1080);

/// White, yellow, cyan, green, magenta, red, blue, black.
const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [255, 255, 0],
    [0, 255, 255],
    [0, 255, 0],
    [255, 0, 255],
    [255, 0, 0],
    [0, 0, 255],
    [0, 0, 0],
];

/// Capture source that renders color bars across a fixed screen.
pub struct ColorBars {
    screen: Rect,
    captures: usize,
}

impl ColorBars {
    pub fn new(screen: Rect) -> Self {
        Self { screen, captures: 0 }
    }

    /// Number of captures served so far.
    pub fn captures(&self) -> usize {
        self.captures
    }

    fn bar_at(&self, x: i32) -> [u8; 3] {
        let offset = (x as i64 - self.screen.x as i64) as u64;
        let i = offset * BARS.len() as u64 / self.screen.width as u64;
        BARS[i as usize]
    }
}

impl CaptureSource for ColorBars {
    fn capture(&mut self, region: Rect) -> cvd_core::Result<PixelBuffer> {
        let visible = region
            .intersect(&self.screen)
            .ok_or_else(|| Error::capture(format!("{region:?} is off screen")))?;
        self.captures += 1;

        let mut img = PixelBuffer::new(visible.width, visible.height, Layout::Rgb);
        for x in 0..visible.width {
            let color = self.bar_at(visible.x + x as i32);
            for y in 0..visible.height {
                img.set_pixel(x, y, &color)?;
            }
        }
        Ok(img)
    }
}

/// Per-frame summary.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    pub deficiency: Deficiency,
    pub width: u32,
    pub height: u32,
    pub mean: [f64; 3],
}

/// Display sink that keeps statistics instead of pixels.
#[derive(Debug, Default)]
pub struct StatsSink {
    pub frames: Vec<FrameStats>,
}

impl DisplaySink for StatsSink {
    fn present(&mut self, frame: &PixelBuffer, deficiency: Deficiency) {
        let mut sum = [0u64; 3];
        for px in frame.pixels() {
            for c in 0..3 {
                sum[c] += px[c] as u64;
            }
        }
        let n = frame.pixel_count().max(1) as f64;
        let stats = FrameStats {
            deficiency,
            width: frame.width(),
            height: frame.height(),
            mean: sum.map(|s| s as f64 / n),
        };
        debug!(?stats, "present");
        self.frames.push(stats);
    }
}

/// Runs the session and returns its collaborators.
pub fn session(args: &DemoArgs) -> Result<(ColorBars, StatsSink)> {
    let modes = parse_modes(&args.mode)?;
    let region = Rect::from_size(args.width, args.height);

    let mut session = ViewerSession::new(ColorBars::new(SCREEN), StatsSink::default());
    session.set_deficiency(modes[0]);
    session
        .refresh(region)
        .with_context(|| format!("Failed to capture {}x{}", args.width, args.height))?;
    for &d in &modes[1..] {
        session.set_deficiency(d);
    }
    info!(captures = session.source().captures(), frames = session.sink().frames.len(), "demo done");
    Ok(session.into_parts())
}

pub fn run(args: DemoArgs) -> Result<()> {
    let stdout = io::stdout();
    render(&args, &mut stdout.lock())
}

pub fn render(args: &DemoArgs, out: &mut impl Write) -> Result<()> {
    let (source, sink) = session(args)?;
    writeln!(out, "captures: {}", source.captures())?;
    for f in &sink.frames {
        let rounded = f.mean.map(|m| m.round() as u8);
        writeln!(
            out,
            "{:<13} {}x{}  mean {:>6.1} {:>6.1} {:>6.1}  {}",
            f.deficiency.name(),
            f.width,
            f.height,
            f.mean[0],
            f.mean[1],
            f.mean[2],
            hex(rounded)
        )?;
    }
    Ok(())
}
