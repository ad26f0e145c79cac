//! # cvd-core
//!
//! Core types shared by the cvd-rs crates.
//!
//! - [`PixelBuffer`] - 8-bit RGB/RGBA image exchanged with capture sources and display sinks
//! - [`Layout`] - Channel layout of a buffer (RGB or RGBA)
//! - [`Rect`] - Screen region handed to a capture source
//! - [`Error`], [`Result`] - Buffer and collaborator errors
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other cvd-rs crates depend
//! on `cvd-core`:
//!
//! ```text
//! cvd-core (this crate)
//!    ^
//!    |
//!    +-- cvd-color (simulation pipeline, viewer session)
//!    +-- cvd-cli (command-line front-end)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use image::{Layout, PixelBuffer};
pub use rect::Rect;
