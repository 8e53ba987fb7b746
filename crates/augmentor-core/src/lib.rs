//! Augmentor Core - combinatorial image augmentation engine
//!
//! This crate provides the augmentation engine: image decoding with EXIF
//! orientation correction, a fixed catalog of parameterized transforms,
//! power-set combination enumeration, ordered composition, artifact
//! encoding, and the batch driver that ties them together.
//!
//! A run samples the catalog's randomized parameters once, enumerates every
//! non-empty subset of the catalog, and writes one artifact per
//! (source image, subset) pair.

pub mod adjust;
pub mod batch;
pub mod combos;
pub mod compose;
pub mod decode;
pub mod encode;
pub mod ops;
pub mod transform;

pub use batch::{run_batch, BatchError, Manifest, RunConfig, RunSummary};
pub use combos::{enumerate_combinations, total_combinations, Combination};
pub use compose::{apply_combination, TransformError};
pub use decode::{decode_image, DecodeError, Orientation, SourceImage};
pub use encode::{encode, EncodeError, OutputFormat};
pub use ops::{Operation, OperationSet};
