//! Workload descriptor synthesis.
//!
//! Generator replay is driven by a small line-oriented text format
//! describing a weighted finite-state machine: `STATE <id> <weight> <TYPE>
//! <args...>` records, one `INIT <id>` record naming the start state, and
//! `TRANSITION <from> <to> <weight>` records forming a weighted directed
//! graph over the states. Raw workload inputs (packet traces, statistical
//! models) are wrapped into a two-state machine that replays the input and
//! then exits; inputs already in the canonical format pass through
//! untouched. Parsing the format is the engine's job, we only emit it.

// Imports
use {
	crate::Error,
	std::{
		env, fs,
		path::{Path, PathBuf},
	},
};

/// Extension of canonical descriptor files
pub const CANONICAL_EXT: &str = ".cfg";

/// Extension of raw packet trace files
pub const TRACE_EXT: &str = ".ptrc";

/// Extension of statistical model files
pub const MODEL_EXT: &str = ".stm";

/// Weight of the replay state in trace-derived descriptors.
///
/// Large enough that replay dominates the machine's occupancy until the
/// trace runs out.
const TRACE_STATE_WEIGHT: u64 = 100_000_000_000;

/// Fixed parameter passed to `STM` payloads
const MODEL_PARAM: u64 = 100;

/// Synthesizes a canonical descriptor for `input` and returns its path.
///
/// Inputs that already carry the canonical extension are returned unchanged,
/// without touching the filesystem. Trace and model inputs are wrapped into
/// a freshly written descriptor in `out_dir`, named from the input's base
/// name up to its first `.`. Two inputs deriving the same name therefore
/// race on the same file, with the second write overwriting the first:
/// callers synthesizing into a shared directory must serialize.
pub fn synthesize(input: &Path, out_dir: &Path) -> Result<PathBuf, Error> {
	let file_name = input.file_name().and_then(|name| name.to_str()).unwrap_or("");

	// Already in the canonical format
	if file_name.contains(CANONICAL_EXT) {
		return Ok(input.to_path_buf());
	}

	// Dummy descriptor that replays the packet trace, then exits
	if file_name.contains(TRACE_EXT) {
		let replay = format!("STATE 0 {TRACE_STATE_WEIGHT} TRACE {}", self::absolute(input)?.display());
		return self::write_descriptor(input, out_dir, &replay);
	}

	// Dummy descriptor that replays the statistical model, then exits
	if file_name.contains(MODEL_EXT) {
		let replay = format!("STATE 0 1 STM {} {MODEL_PARAM}", self::absolute(input)?.display());
		return self::write_descriptor(input, out_dir, &replay);
	}

	Err(Error::UnsupportedInputFormat(input.to_path_buf()))
}

/// Writes the two-state descriptor wrapping `input`, with `replay` as its
/// replay state, and returns the written path.
fn write_descriptor(input: &Path, out_dir: &Path, replay: &str) -> Result<PathBuf, Error> {
	let path = out_dir.join(self::derived_name(input));
	let contents = format!("{replay}\nSTATE 1 1 EXIT\nINIT 0\nTRANSITION 0 1 1\nTRANSITION 1 1 1\n");

	fs::write(&path, contents).map_err(|source| Error::Io {
		path: path.clone(),
		source,
	})?;

	Ok(path)
}

/// Returns the descriptor name derived from `input`: its base name up to the
/// first `.`, with the canonical extension appended.
fn derived_name(input: &Path) -> String {
	let base = input.file_name().and_then(|name| name.to_str()).unwrap_or("");
	let stem = base.split('.').next().unwrap_or(base);

	format!("{stem}{CANONICAL_EXT}")
}

/// Returns `path` as an absolute path, without requiring it to exist
fn absolute(path: &Path) -> Result<PathBuf, Error> {
	match path.is_absolute() {
		true => Ok(path.to_path_buf()),
		false => {
			let cwd = env::current_dir().map_err(|source| Error::Io {
				path: path.to_path_buf(),
				source,
			})?;
			Ok(cwd.join(path))
		},
	}
}
