//! # cvd-transfer
//!
//! Transfer functions (OETF/EOTF) for color encoding and decoding.
//!
//! Screen captures arrive sRGB-encoded. Cone-space math needs linear light,
//! so every pixel is decoded on the way in and re-encoded on the way out.
//!
//! # Terminology
//!
//! - **OETF** (Opto-Electronic Transfer Function): Linear -> Encoded
//! - **EOTF** (Electro-Optical Transfer Function): Encoded -> Linear
//!
//! # Usage
//!
//! ```rust
//! use cvd_transfer::srgb;
//!
//! // Decode an 8-bit channel to linear
//! let linear = srgb::decode_u8(128);
//!
//! // Encode linear back to an 8-bit channel
//! assert_eq!(srgb::encode_u8(linear), 128);
//! ```
//!
//! # Used By
//!
//! - `cvd-color` - Gamma decode and encode stages of the simulation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod srgb;

pub use srgb::{decode_u8 as srgb_decode_u8, encode_u8 as srgb_encode_u8};
pub use srgb::{eotf as srgb_eotf, oetf as srgb_oetf};
