//! Staged color transformation pipeline.
//!
//! A pipeline is a sequence of operations applied in order to a normalized
//! RGB triplet. [`Pipeline::for_deficiency`] spells out the simulation one
//! stage at a time:
//!
//! 1. Input transfer (sRGB EOTF - decode)
//! 2. Matrix: linear RGB -> LMS
//! 3. Matrix: deficiency projection
//! 4. Matrix: LMS -> linear RGB
//! 5. Output transfer (sRGB OETF - encode)
//! 6. Clamp to [0, 1]
//!
//! [`Pipeline::optimize`] folds consecutive matrices into one, which is how
//! [`Simulator`](crate::Simulator) arrives at its single per-pixel matrix.
//!
//! # Example
//!
//! ```rust
//! use cvd_color::{Deficiency, Pipeline};
//!
//! let staged = Pipeline::for_deficiency(Deficiency::Tritanopia);
//! assert_eq!(staged.len(), 6);
//! assert_eq!(staged.optimize().len(), 4);
//! ```

use crate::Deficiency;
use crate::cone::{LMS_TO_RGB, RGB_TO_LMS};
use cvd_math::{Mat3, Vec3};
use cvd_transfer::srgb;

/// Transfer function type (scalar to scalar).
pub type TransferFn = fn(f64) -> f64;

/// A single operation in the color pipeline.
#[derive(Clone)]
pub enum TransformOp {
    /// Input transfer function (EOTF - decode from display).
    ///
    /// Applied to each channel independently.
    TransferIn(TransferFn),

    /// Output transfer function (OETF - encode for display).
    ///
    /// Applied to each channel independently.
    TransferOut(TransferFn),

    /// 3x3 matrix transform: `[R', G', B'] = M * [R, G, B]`.
    Matrix(Mat3),

    /// Clamp every channel to `[min, max]`.
    Clamp {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl std::fmt::Debug for TransformOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransferIn(_) => f.write_str("TransferIn(fn)"),
            Self::TransferOut(_) => f.write_str("TransferOut(fn)"),
            Self::Matrix(m) => f.debug_tuple("Matrix").field(&m.m).finish(),
            Self::Clamp { min, max } => f
                .debug_struct("Clamp")
                .field("min", min)
                .field("max", max)
                .finish(),
        }
    }
}

impl TransformOp {
    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TransferIn(_) => "decode",
            Self::TransferOut(_) => "encode",
            Self::Matrix(_) => "matrix",
            Self::Clamp { .. } => "clamp",
        }
    }

    /// Applies this single operation.
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        match self {
            Self::TransferIn(f) | Self::TransferOut(f) => [f(rgb[0]), f(rgb[1]), f(rgb[2])],
            Self::Matrix(m) => m.transform(Vec3::from_array(rgb)).to_array(),
            Self::Clamp { min, max } => [
                rgb[0].clamp(*min, *max),
                rgb[1].clamp(*min, *max),
                rgb[2].clamp(*min, *max),
            ],
        }
    }
}

/// An ordered list of color operations.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    ops: Vec<TransformOp>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// The staged simulation for one deficiency.
    pub fn for_deficiency(deficiency: Deficiency) -> Self {
        Self::new()
            .transfer_in(srgb::eotf)
            .matrix(RGB_TO_LMS)
            .matrix(*deficiency.matrix())
            .matrix(LMS_TO_RGB)
            .transfer_out(srgb::oetf)
            .clamp(0.0, 1.0)
    }

    /// Adds an operation to the pipeline.
    pub fn push(mut self, op: TransformOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Adds an input transfer function (EOTF).
    pub fn transfer_in(self, f: TransferFn) -> Self {
        self.push(TransformOp::TransferIn(f))
    }

    /// Adds an output transfer function (OETF).
    pub fn transfer_out(self, f: TransferFn) -> Self {
        self.push(TransformOp::TransferOut(f))
    }

    /// Adds a matrix transform.
    pub fn matrix(self, m: Mat3) -> Self {
        self.push(TransformOp::Matrix(m))
    }

    /// Adds a clamp operation.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        self.push(TransformOp::Clamp { min, max })
    }

    /// Returns the number of operations in the pipeline.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the operations in the pipeline.
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Returns a copy with runs of consecutive matrices multiplied together.
    ///
    /// The result computes the same function up to floating-point rounding.
    pub fn optimize(&self) -> Self {
        let mut ops: Vec<TransformOp> = Vec::with_capacity(self.ops.len());
        for op in &self.ops {
            match (ops.last_mut(), op) {
                (Some(TransformOp::Matrix(prev)), TransformOp::Matrix(next)) => {
                    *prev = next.mul_mat(prev);
                }
                _ => ops.push(op.clone()),
            }
        }
        Self { ops }
    }

    /// Product of all matrix operations, in application order.
    ///
    /// Transfer and clamp operations are skipped.
    pub fn combined_matrix(&self) -> Mat3 {
        self.ops.iter().fold(Mat3::IDENTITY, |acc, op| match op {
            TransformOp::Matrix(m) => m.mul_mat(&acc),
            _ => acc,
        })
    }

    /// Applies the pipeline to a normalized RGB value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cvd_color::{Deficiency, Pipeline};
    ///
    /// let pipeline = Pipeline::for_deficiency(Deficiency::Original);
    /// let out = pipeline.apply([0.5, 0.3, 0.2]);
    /// assert!((out[0] - 0.5).abs() < 1e-9);
    /// ```
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        self.ops.iter().fold(rgb, |acc, op| op.apply(acc))
    }

    /// Applies the pipeline and records the value after every operation.
    ///
    /// The returned list starts with the input and has `len() + 1` entries.
    pub fn trace(&self, rgb: [f64; 3]) -> Vec<[f64; 3]> {
        let mut values = Vec::with_capacity(self.ops.len() + 1);
        values.push(rgb);
        let mut cur = rgb;
        for op in &self.ops {
            cur = op.apply(cur);
            values.push(cur);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pipeline() {
        let rgb = [0.5, 0.3, 0.2];
        assert_eq!(Pipeline::new().apply(rgb), rgb);
    }

    #[test]
    fn test_transfer_roundtrip() {
        let pipeline = Pipeline::new()
            .transfer_in(srgb::eotf)
            .transfer_out(srgb::oetf);
        let result = pipeline.apply([0.5, 0.3, 0.2]);
        assert!((result[0] - 0.5).abs() < 1e-12);
        assert!((result[1] - 0.3).abs() < 1e-12);
        assert!((result[2] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_optimize_fuses_matrices() {
        let staged = Pipeline::for_deficiency(Deficiency::Deuteranopia);
        let fused = staged.optimize();
        let kinds: Vec<&str> = fused.ops().iter().map(TransformOp::label).collect();
        assert_eq!(kinds, ["decode", "matrix", "encode", "clamp"]);

        let expected = LMS_TO_RGB * *Deficiency::Deuteranopia.matrix() * RGB_TO_LMS;
        assert!(fused.combined_matrix().max_abs_diff(&expected) < 1e-12);
        assert!(staged.combined_matrix().max_abs_diff(&expected) < 1e-12);
    }

    #[test]
    fn test_optimize_keeps_results() {
        for d in Deficiency::ALL {
            let staged = Pipeline::for_deficiency(d);
            let fused = staged.optimize();
            for rgb in [[1.0, 0.0, 0.0], [0.2, 0.7, 0.4], [0.0, 0.0, 1.0]] {
                let a = staged.apply(rgb);
                let b = fused.apply(rgb);
                for c in 0..3 {
                    assert!((a[c] - b[c]).abs() < 1e-12, "{d}: {a:?} vs {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_clamp_bounds_output() {
        // Blue under tritanopia goes strongly negative in red before clamping.
        let staged = Pipeline::for_deficiency(Deficiency::Tritanopia);
        let values = staged.trace([0.0, 0.0, 1.0]);
        assert_eq!(values.len(), staged.len() + 1);
        assert!(values[5][0] < 0.0);
        assert_eq!(values[6][0], 0.0);
    }
}
