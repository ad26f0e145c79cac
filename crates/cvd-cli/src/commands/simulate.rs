//! Simulate command
//!
//! Raw interleaved 8-bit pixels in, simulated pixels out. No headers: the
//! caller supplies the geometry.

use crate::SimulateArgs;
use anyhow::{Context, Result};
use cvd_color::{Deficiency, simulate};
use cvd_core::PixelBuffer;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use tracing::{debug, info, trace};

pub fn run(args: SimulateArgs) -> Result<()> {
    trace!(width = args.width, height = args.height, channels = args.channels, mode = %args.mode, "simulate::run");

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);
    match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            process(&args, BufReader::new(file), &mut writer)?;
        }
        None => process(&args, io::stdin().lock(), &mut writer)?,
    }
    writer.flush().context("Failed to write output")?;
    Ok(())
}

/// Reads one raw frame from `input`, writes the simulated frame to `output`.
pub fn process(args: &SimulateArgs, mut input: impl Read, output: &mut impl Write) -> Result<()> {
    let deficiency: Deficiency = args.mode.parse()?;

    let mut data = Vec::new();
    input.read_to_end(&mut data).context("Failed to read input")?;
    debug!(bytes = data.len(), "read input");

    let image = PixelBuffer::from_data(args.width, args.height, args.channels, data)
        .context("Input does not match --width/--height/--channels")?;

    info!(width = args.width, height = args.height, %deficiency, "Simulating");
    let out = simulate(&image, deficiency);

    output.write_all(out.data()).context("Failed to write output")?;
    Ok(())
}
