//! CLI command implementations

pub mod demo;
pub mod matrices;
pub mod pixel;
pub mod simulate;

use anyhow::Result;
use cvd_color::Deficiency;

/// Resolves a `--mode` value: one selector name, or `all`.
pub fn parse_modes(mode: &str) -> Result<Vec<Deficiency>> {
    if mode.eq_ignore_ascii_case("all") {
        return Ok(Deficiency::ALL.to_vec());
    }
    Ok(vec![mode.parse()?])
}

/// Formats a color as `#rrggbb`.
pub fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
