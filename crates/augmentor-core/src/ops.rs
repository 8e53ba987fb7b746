//! The transform library: a fixed catalog of parameterized operations.
//!
//! Each operation is a tagged variant carrying its already-sampled parameter
//! values, so an instance is a deterministic, pure function from image to
//! image — randomness happens once, at construction, never at application.
//! Dispatch is a single match in [`Operation::apply`], which keeps the set
//! of kinds exhaustively checked.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adjust::{adjust_brightness, adjust_color, adjust_contrast};
use crate::decode::SourceImage;
use crate::transform::{add_noise, flip_horizontal, rotate};

/// A single parameterized transform instance.
///
/// Parameter domains:
/// - `Rotate`: integer multiple of 10 degrees in [0, 360)
/// - `AddNoise`: intensity in [0, 1]
/// - `BrightnessContrast`: both factors in [0.5, 1.5], neutral 1.0
/// - `ColorSaturation`: factor in [0.5, 1.5], neutral 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Operation {
    /// Mirror the image left-right.
    HorizontalFlip,
    /// Rotate counter-clockwise on a fixed canvas.
    Rotate { angle_degrees: u16 },
    /// Blur-style noise; strength scales with intensity.
    AddNoise { intensity: f32 },
    /// Scale brightness, then contrast, each about a neutral factor of 1.0.
    BrightnessContrast { brightness: f32, contrast: f32 },
    /// Scale color saturation about a neutral factor of 1.0.
    ColorSaturation { factor: f32 },
}

impl Operation {
    /// Rotation with an angle drawn uniformly from {0, 10, ..., 350}.
    pub fn random_rotate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Operation::Rotate {
            angle_degrees: rng.gen_range(0..36) * 10,
        }
    }

    /// Noise with intensity drawn uniformly from [0, 1].
    pub fn random_noise<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Operation::AddNoise {
            intensity: rng.gen_range(0.0..=1.0),
        }
    }

    /// Brightness and contrast factors drawn uniformly from [0.5, 1.5].
    pub fn random_brightness_contrast<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Operation::BrightnessContrast {
            brightness: rng.gen_range(0.5..=1.5),
            contrast: rng.gen_range(0.5..=1.5),
        }
    }

    /// Color saturation factor drawn uniformly from [0.5, 1.5].
    pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Operation::ColorSaturation {
            factor: rng.gen_range(0.5..=1.5),
        }
    }

    /// Stable name of the operation kind.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::HorizontalFlip => "horizontal-flip",
            Operation::Rotate { .. } => "rotate",
            Operation::AddNoise { .. } => "add-noise",
            Operation::BrightnessContrast { .. } => "brightness-contrast",
            Operation::ColorSaturation { .. } => "color-saturation",
        }
    }

    /// Apply this operation to an image, producing a new image.
    ///
    /// Pure: the same input always yields the same output, and the input is
    /// never mutated.
    pub fn apply(&self, image: &SourceImage) -> SourceImage {
        match *self {
            Operation::HorizontalFlip => flip_horizontal(image),
            Operation::Rotate { angle_degrees } => rotate(image, angle_degrees as f64),
            Operation::AddNoise { intensity } => add_noise(image, intensity),
            Operation::BrightnessContrast {
                brightness,
                contrast,
            } => {
                let brightened = adjust_brightness(image, brightness);
                adjust_contrast(&brightened, contrast)
            }
            Operation::ColorSaturation { factor } => adjust_color(image, factor),
        }
    }
}

/// The ordered operation catalog for one run.
///
/// Order matters: it defines the composition order of every combination
/// drawn from the set, and the combination enumerator's output is indexed
/// against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSet {
    operations: Vec<Operation>,
}

impl OperationSet {
    /// Build a set from explicit operation instances.
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// Build the standard 13-operation catalog in its fixed registration
    /// order: 1 flip, 3 rotations, 3 noise ops, 3 brightness/contrast ops,
    /// 3 color ops. Each randomized parameter is sampled exactly once, here.
    pub fn standard<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut operations = Vec::with_capacity(13);
        operations.push(Operation::HorizontalFlip);
        for _ in 0..3 {
            operations.push(Operation::random_rotate(rng));
        }
        for _ in 0..3 {
            operations.push(Operation::random_noise(rng));
        }
        for _ in 0..3 {
            operations.push(Operation::random_brightness_contrast(rng));
        }
        for _ in 0..3 {
            operations.push(Operation::random_color(rng));
        }
        Self { operations }
    }

    /// The operations in registration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations in the set.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
