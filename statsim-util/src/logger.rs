//! Logger

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer},
};

/// Messages recorded before the subscriber was installed
static PRE_INIT_MSGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Pre-initialization logging.
///
/// Arguments are parsed (and worth logging) before the log file they name
/// exists, so messages recorded here are buffered and emitted by [`init`].
pub mod pre_init {
	/// Records a debug message to be emitted once the logger is initialized
	pub fn debug(msg: String) {
		super::PRE_INIT_MSGS.lock().expect("Poisoned").push(msg);
	}
}

/// Initializes the logger.
///
/// Installs a stderr layer filtered by `RUST_LOG` and, if `log_file` is
/// given, a file layer filtered by `RUST_LOG_FILE`.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	// Stderr layer
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(EnvFilter::from_default_env());

	// File layer, if requested.
	// Note: If we can't open the file, we only report it on stderr, since
	//       the run itself can still proceed.
	let file_layer = log_file.and_then(|path| {
		let mut open_options = fs::OpenOptions::new();
		match log_file_append {
			true => open_options.create(true).append(true),
			false => open_options.create(true).write(true).truncate(true),
		};

		match open_options.open(path) {
			Ok(file) => Some(
				tracing_subscriber::fmt::layer()
					.with_ansi(false)
					.with_writer(Mutex::new(file))
					.with_filter(EnvFilter::from_env("RUST_LOG_FILE")),
			),
			Err(err) => {
				eprintln!("Unable to open log file {path:?}: {err}");
				None
			},
		}
	});

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	// Then emit everything recorded before we got here
	for msg in PRE_INIT_MSGS.lock().expect("Poisoned").drain(..) {
		tracing::debug!("{msg}");
	}
}
