//! Errors

// Imports
use std::{io, path::PathBuf};

/// Configuration error.
///
/// Every variant is fatal to the current run: each indicates a configuration
/// mistake rather than a transient condition, so nothing here is retried and
/// no partial system graph is handed to the engine once one is raised.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No input file was provided for the traffic generator
	#[error("No input file provided for the traffic generator")]
	MissingGeneratorInput,

	/// The requested generator kind is not recognized
	#[error("Unknown generator requested: {0:?}")]
	UnknownGeneratorKind(String),

	/// The workload input's format is not recognized
	#[error("Input file is not supported by the traffic generator: {}", .0.display())]
	UnsupportedInputFormat(PathBuf),

	/// The address map code is not one of the recognized values
	#[error("Invalid address map argument: {0}")]
	InvalidAddressMap(u32),

	/// An operation on `path` failed in the environment, not in configuration
	#[error("Unable to access {}", .path.display())]
	Io { path: PathBuf, source: io::Error },
}
