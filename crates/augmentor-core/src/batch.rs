//! Batch driver.
//!
//! Two nested loops: the outer walks the source folder, the inner walks the
//! enumerated combinations for the image currently loaded. Each (image,
//! combination) pair yields one artifact at
//! `<output_dir>/<image_stem>/image_<k>.<ext>`, where `k` is the zero-based
//! combination index and restarts at 0 for every source image.
//!
//! The reliability contract is best-effort over all pairs: a decode failure
//! skips that image, a transform or write failure skips that artifact, and
//! everything else continues. Only setup — an unlistable input folder or an
//! uncreatable output folder — aborts the run.
//!
//! The outer loop runs in parallel. Every worker reads the same operation
//! catalog and combination list, built once before the loop, and writes into
//! its own per-image subfolder, so workers never contend on a destination.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::combos::{enumerate_combinations, Combination};
use crate::compose::apply_combination;
use crate::decode::decode_image;
use crate::encode::{encode, OutputFormat};
use crate::ops::OperationSet;

/// Fatal setup failures. Everything past setup is per-item and non-fatal.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input directory cannot be listed.
    #[error("Cannot read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory cannot be created.
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Folder holding the source images.
    pub input_dir: PathBuf,
    /// Folder the artifacts are written into.
    pub output_dir: PathBuf,
    /// Artifact format; also decides the file extension.
    pub format: OutputFormat,
    /// JPEG quality (1-100, clamped; ignored for PNG).
    pub quality: u8,
}

/// Per-item counters accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Source images decoded and fully iterated.
    pub images_processed: usize,
    /// Source images skipped because they could not be read or decoded.
    pub images_skipped: usize,
    /// Artifacts successfully written.
    pub artifacts_written: usize,
    /// Combinations aborted by a transform failure.
    pub combinations_failed: usize,
    /// Artifacts lost to an encode or filesystem write failure.
    pub writes_failed: usize,
}

impl RunSummary {
    /// Total number of per-item failures in the run.
    pub fn failure_count(&self) -> usize {
        self.images_skipped + self.combinations_failed + self.writes_failed
    }

    fn absorb(&mut self, outcome: ImageOutcome) {
        match outcome {
            ImageOutcome::Skipped => self.images_skipped += 1,
            ImageOutcome::Processed {
                artifacts_written,
                combinations_failed,
                writes_failed,
            } => {
                self.images_processed += 1;
                self.artifacts_written += artifacts_written;
                self.combinations_failed += combinations_failed;
                self.writes_failed += writes_failed;
            }
        }
    }
}

/// Audit record written to `<output_dir>/manifest.json` after the run.
///
/// Holds the sampled operation catalog, which is what makes a randomized
/// run's outputs attributable: combination `k` of the manifest's enumeration
/// order produced `image_<k>.<ext>` in every per-image subfolder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// The operation catalog with its sampled parameter values.
    pub operations: OperationSet,
    /// Number of combinations enumerated from the catalog.
    pub combination_count: usize,
}

enum ImageOutcome {
    Skipped,
    Processed {
        artifacts_written: usize,
        combinations_failed: usize,
        writes_failed: usize,
    },
}

/// Run the full augmentation batch: every combination of `ops` applied to
/// every image in the input folder.
///
/// The combination list is enumerated once, before the image loop begins;
/// parameters inside `ops` were sampled by the caller, so two runs over the
/// same catalog produce the same artifact set. Source files are processed in
/// sorted name order. Results are counted in the returned [`RunSummary`];
/// per-item failures are logged and never abort the run.
///
/// # Errors
///
/// [`BatchError`] only for setup: an unlistable input directory or an
/// uncreatable output directory.
pub fn run_batch(config: &RunConfig, ops: &OperationSet) -> Result<RunSummary, BatchError> {
    let entries = fs::read_dir(&config.input_dir).map_err(|source| BatchError::InputDir {
        path: config.input_dir.clone(),
        source,
    })?;

    // Sorted for reproducible processing order; correctness never depends
    // on the platform's listing order.
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    fs::create_dir_all(&config.output_dir).map_err(|source| BatchError::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;

    let combinations = enumerate_combinations(ops.len());
    info!(
        images = files.len(),
        operations = ops.len(),
        combinations = combinations.len(),
        "starting augmentation run"
    );

    let outcomes: Vec<ImageOutcome> = files
        .par_iter()
        .map(|path| process_image(path, ops, &combinations, config))
        .collect();

    let mut summary = RunSummary::default();
    for outcome in outcomes {
        summary.absorb(outcome);
    }

    write_manifest(config, ops, combinations.len());

    Ok(summary)
}

/// Decode one source image and write an artifact for every combination.
fn process_image(
    path: &Path,
    ops: &OperationSet,
    combinations: &[Combination],
    config: &RunConfig,
) -> ImageOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            return ImageOutcome::Skipped;
        }
    };

    let image = match decode_image(&bytes) {
        Ok(image) => image,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping undecodable file");
            return ImageOutcome::Skipped;
        }
    };

    // Per-image subfolder keyed by the file stem keeps artifact numbering
    // independent across source images.
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let dest_dir = config.output_dir.join(&stem);
    if dest_dir.exists() {
        warn!(
            dir = %dest_dir.display(),
            "destination subfolder already exists; colliding stems overwrite each other"
        );
    }
    if let Err(e) = fs::create_dir_all(&dest_dir) {
        warn!(dir = %dest_dir.display(), error = %e, "skipping image: cannot create destination");
        return ImageOutcome::Skipped;
    }

    let mut artifacts_written = 0;
    let mut combinations_failed = 0;
    let mut writes_failed = 0;

    for (index, combination) in combinations.iter().enumerate() {
        let artifact = match apply_combination(ops.operations(), combination, &image) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "combination failed");
                combinations_failed += 1;
                continue;
            }
        };

        let encoded = match encode(&artifact, config.format, config.quality) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(path = %path.display(), index, error = %e, "artifact encoding failed");
                writes_failed += 1;
                continue;
            }
        };

        let dest = dest_dir.join(format!("image_{index}.{}", config.format.extension()));
        match fs::write(&dest, encoded) {
            Ok(()) => artifacts_written += 1,
            Err(e) => {
                warn!(dest = %dest.display(), error = %e, "artifact write failed");
                writes_failed += 1;
            }
        }
    }

    info!(
        path = %path.display(),
        artifacts = artifacts_written,
        "image complete"
    );

    ImageOutcome::Processed {
        artifacts_written,
        combinations_failed,
        writes_failed,
    }
}

/// Persist the run's audit manifest. Failure to write it is logged, not
/// fatal: the artifacts themselves are already on disk.
fn write_manifest(config: &RunConfig, ops: &OperationSet, combination_count: usize) {
    let manifest = Manifest {
        operations: ops.clone(),
        combination_count,
    };

    let path = config.output_dir.join("manifest.json");
    let json = match serde_json::to_vec_pretty(&manifest) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "manifest serialization failed");
            return;
        }
    };
    if let Err(e) = fs::write(&path, json) {
        warn!(path = %path.display(), error = %e, "manifest write failed");
    }
}
