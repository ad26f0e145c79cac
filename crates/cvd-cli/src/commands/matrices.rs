//! Matrices command
//!
//! Prints the color-space constants and the fused per-mode matrices.

use crate::MatricesArgs;
use anyhow::Result;
use cvd_color::cone::{LMS_TO_RGB, RGB_TO_LMS, RGB_TO_XYZ, XYZ_TO_LMS};
use cvd_color::{Deficiency, Simulator};
use cvd_math::Mat3;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
struct NamedMatrix {
    name: String,
    rows: [[f64; 3]; 3],
}

impl NamedMatrix {
    fn new(name: impl Into<String>, m: &Mat3) -> Self {
        Self {
            name: name.into(),
            rows: m.m,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    /// Fixed transforms between linear RGB, XYZ and LMS.
    spaces: Vec<NamedMatrix>,
    /// LMS-space deficiency matrices.
    deficiencies: Vec<NamedMatrix>,
    /// Linear RGB to simulated linear RGB, one per mode.
    fused: Vec<NamedMatrix>,
}

fn report() -> Report {
    Report {
        spaces: vec![
            NamedMatrix::new("rgb_to_xyz", &RGB_TO_XYZ),
            NamedMatrix::new("xyz_to_lms", &XYZ_TO_LMS),
            NamedMatrix::new("rgb_to_lms", &RGB_TO_LMS),
            NamedMatrix::new("lms_to_rgb", &LMS_TO_RGB),
        ],
        deficiencies: Deficiency::ALL
            .iter()
            .map(|d| NamedMatrix::new(d.name(), d.matrix()))
            .collect(),
        fused: Deficiency::ALL
            .iter()
            .map(|&d| NamedMatrix::new(d.name(), Simulator::new(d).matrix()))
            .collect(),
    }
}

pub fn run(args: MatricesArgs) -> Result<()> {
    let stdout = io::stdout();
    render(&args, &mut stdout.lock())
}

pub fn render(args: &MatricesArgs, out: &mut impl Write) -> Result<()> {
    let report = report();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    let sections = [
        ("Color spaces", &report.spaces),
        ("Deficiency (LMS)", &report.deficiencies),
        ("Fused (linear RGB)", &report.fused),
    ];
    for (title, matrices) in sections {
        writeln!(out, "{title}")?;
        for nm in matrices {
            writeln!(out, "  {}", nm.name)?;
            for row in &nm.rows {
                writeln!(out, "    [{:>14.10} {:>14.10} {:>14.10}]", row[0], row[1], row[2])?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_report() {
        let mut out: Vec<u8> = Vec::new();
        render(&MatricesArgs { json: true }, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["spaces"].as_array().unwrap().len(), 4);
        assert_eq!(value["spaces"][3]["name"], "lms_to_rgb");
        let l00 = value["spaces"][3]["rows"][0][0].as_f64().unwrap();
        assert!((l00 - 5.472_212_058).abs() < 1e-8);

        assert_eq!(value["deficiencies"][1]["name"], "protanopia");
        assert_eq!(value["deficiencies"][1]["rows"][0][0].as_f64(), Some(0.0));
        assert_eq!(value["fused"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_text_report() {
        let mut out: Vec<u8> = Vec::new();
        render(&MatricesArgs { json: false }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Color spaces\n"));
        assert!(text.contains("  tritanopia\n"));
        // 3 titles, 12 names, 36 rows
        assert_eq!(text.lines().count(), 3 + 12 + 36);
    }
}
