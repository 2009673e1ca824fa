//! Simulation engine boundary.
//!
//! The cycle-accurate engine is an external collaborator: it accepts a fully
//! wired [`System`] and reports back an exit cause and a tick count, both
//! surfaced verbatim. The call blocks until the engine terminates; this
//! layer exposes no timeout, no cancellation and no retry, an abnormal
//! termination is reported and the owning process is expected to exit
//! non-zero.

// Imports
use {
	crate::topology::System,
	anyhow::Context,
	std::{fs, path::PathBuf, process},
};

/// Engine run outcome
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RunOutput {
	/// Why the run terminated
	pub exit_cause: String,

	/// Tick count at termination
	pub ticks: u64,
}

/// Simulation engine
pub trait Simulator {
	/// Runs `system` to completion
	fn run(&mut self, system: &System) -> Result<RunOutput, anyhow::Error>;
}

/// Engine invoked as an external process.
///
/// The wired system is written as JSON into the working directory and the
/// engine executable is started on it. The engine's exit banner,
/// `Exiting @ tick <n> because <cause>`, is expected on stdout.
#[derive(Clone, Debug)]
pub struct ProcessSimulator {
	/// Engine executable
	exec: PathBuf,

	/// Directory receiving the system description
	work_dir: PathBuf,
}

impl ProcessSimulator {
	/// Creates a new process simulator
	pub fn new(exec: PathBuf, work_dir: PathBuf) -> Self {
		Self { exec, work_dir }
	}
}

impl Simulator for ProcessSimulator {
	fn run(&mut self, system: &System) -> Result<RunOutput, anyhow::Error> {
		// Hand the engine the wired system
		let system_file = self.work_dir.join("system.json");
		let file = fs::File::create(&system_file)
			.with_context(|| format!("Unable to create system file {system_file:?}"))?;
		serde_json::to_writer(file, system).context("Unable to write system file")?;

		// Then block on the engine
		tracing::info!("Launching simulator {:?} on {system_file:?}", self.exec);
		let output = process::Command::new(&self.exec)
			.arg("--system")
			.arg(&system_file)
			.output()
			.with_context(|| format!("Unable to launch simulator {:?}", self.exec))?;
		anyhow::ensure!(
			output.status.success(),
			"Simulator exited with {}: {}",
			output.status,
			String::from_utf8_lossy(&output.stderr),
		);

		// And surface its exit banner verbatim
		let stdout = String::from_utf8(output.stdout).context("Simulator output wasn't utf-8")?;
		stdout
			.lines()
			.rev()
			.find_map(self::parse_exit_line)
			.context("Simulator output didn't include an exit banner")
	}
}

/// Parses an engine exit banner, `Exiting @ tick <n> because <cause>`
pub fn parse_exit_line(line: &str) -> Option<RunOutput> {
	let rest = line.trim().strip_prefix("Exiting @ tick ")?;
	let (ticks, cause) = rest.split_once(" because ")?;

	Some(RunOutput {
		exit_cause: cause.trim().to_owned(),
		ticks: ticks.parse().ok()?,
	})
}
