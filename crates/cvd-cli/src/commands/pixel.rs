//! Pixel command
//!
//! Simulates one color and optionally shows every intermediate stage.

use super::{hex, parse_modes};
use crate::PixelArgs;
use anyhow::Result;
use cvd_color::{Pipeline, simulate_pixel};
use std::io::{self, Write};
use tracing::trace;

/// Parses `R,G,B` with each component in 0..=255.
pub fn parse_rgb(s: &str) -> std::result::Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts[..] else {
        return Err(format!("expected R,G,B, got '{s}'"));
    };
    let parse = |v: &str| {
        v.parse::<u8>()
            .map_err(|_| format!("'{v}' is not a channel value (0-255)"))
    };
    Ok([parse(r)?, parse(g)?, parse(b)?])
}

pub fn run(args: PixelArgs) -> Result<()> {
    let stdout = io::stdout();
    render(&args, &mut stdout.lock())
}

/// Writes the report for `args` to `out`.
pub fn render(args: &PixelArgs, out: &mut impl Write) -> Result<()> {
    trace!(color = ?args.color, mode = %args.mode, stages = args.stages, "pixel::run");
    let rgb = args.color;

    for deficiency in parse_modes(&args.mode)? {
        let sim = simulate_pixel(rgb, deficiency);
        writeln!(
            out,
            "{:<13} {:>3},{:>3},{:>3} -> {:>3},{:>3},{:>3}  {}",
            deficiency.name(),
            rgb[0],
            rgb[1],
            rgb[2],
            sim[0],
            sim[1],
            sim[2],
            hex(sim)
        )?;

        if args.stages {
            let pipeline = Pipeline::for_deficiency(deficiency);
            let values = pipeline.trace(rgb.map(|c| c as f64 / 255.0));
            writeln!(out, "    {:<8} {:>10.6} {:>10.6} {:>10.6}", "input", values[0][0], values[0][1], values[0][2])?;
            for (op, v) in pipeline.ops().iter().zip(&values[1..]) {
                writeln!(out, "    {:<8} {:>10.6} {:>10.6} {:>10.6}", op.label(), v[0], v[1], v[2])?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("255,0,0").unwrap(), [255, 0, 0]);
        assert_eq!(parse_rgb(" 1, 2 ,3").unwrap(), [1, 2, 3]);
        assert!(parse_rgb("256,0,0").is_err());
        assert!(parse_rgb("1,2").is_err());
        assert!(parse_rgb("1,2,3,4").is_err());
    }

    #[test]
    fn test_render_single_mode() {
        let args = PixelArgs {
            color: [255, 0, 0],
            mode: "protanopia".into(),
            stages: false,
        };
        let mut out: Vec<u8> = Vec::new();
        render(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("115,115,  0"));
        assert!(text.ends_with("#737300\n"));
    }

    #[test]
    fn test_render_all_with_stages() {
        let args = PixelArgs {
            color: [0, 0, 255],
            mode: "all".into(),
            stages: true,
        };
        let mut out: Vec<u8> = Vec::new();
        render(&args, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // One summary line plus input and six stages per mode.
        assert_eq!(text.lines().count(), 4 * 8);
        assert!(text.contains("tritanopia"));
        assert!(text.contains("#006363"));
    }

    #[test]
    fn test_render_rejects_unknown_mode() {
        let args = PixelArgs {
            color: [1, 2, 3],
            mode: "normal".into(),
            stages: false,
        };
        let mut out: Vec<u8> = Vec::new();
        assert!(render(&args, &mut out).is_err());
    }
}
