//! Arguments

// Imports
use {statsim::memory::AddrRange, std::path::PathBuf};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Sub-command
	#[command(subcommand)]
	pub sub_cmd: SubCmd,
}

/// Sub-command
#[derive(Debug, clap::Subcommand)]
pub enum SubCmd {
	/// Explores main memory directly, in timing mode
	#[clap(name = "memory")]
	Memory {
		#[clap(flatten)]
		common: CommonArgs,
	},

	/// Explores a two-level cache hierarchy, in atomic mode
	#[clap(name = "caches")]
	Caches {
		#[clap(flatten)]
		common: CommonArgs,

		/// Size of a cache line in bytes
		#[clap(long = "cache-line-size", default_value_t = 64)]
		cache_line_size: u64,

		/// Size of the L1 cache
		#[clap(long = "l1-size", default_value = "16kB")]
		l1_size: String,

		/// Associativity of the L1 cache
		#[clap(long = "l1-assoc", default_value = "2")]
		l1_assoc: String,

		/// Size of the L2 cache
		#[clap(long = "l2-size", default_value = "256kB")]
		l2_size: String,

		/// Associativity of the L2 cache
		#[clap(long = "l2-assoc", default_value = "8")]
		l2_assoc: String,
	},
}

/// Options shared by both topologies
#[derive(Debug, clap::Args)]
pub struct CommonArgs {
	/// The traffic generator to use
	#[clap(long = "generator")]
	pub generator: String,

	/// The input to the traffic generator
	#[clap(long = "generator-input", default_value = "")]
	pub generator_input: String,

	/// Limit the number of packets generated (0 means unlimited)
	#[clap(long = "generator-limit", default_value_t = 0)]
	pub generator_limit: u64,

	/// Set to 1 to attach a probe that records a trace of generated traffic
	#[clap(long = "save-generator-trace", default_value_t = 0)]
	pub save_generator_trace: u8,

	/// Set to 1 to attach a probe that tracks the memory footprint
	#[clap(long = "save-generator-footprint", default_value_t = 1)]
	pub save_generator_footprint: u8,

	/// System frequency
	#[clap(long = "system-frequency", default_value = "1000MHz")]
	pub system_frequency: String,

	/// Type of memory to use
	#[clap(long = "mem-type", default_value = "LPDDR3_1600_1x32")]
	pub mem_type: String,

	/// Number of memory channels
	#[clap(long = "mem-channels", default_value_t = 4)]
	pub mem_channels: usize,

	/// System memory address range
	#[clap(long = "mem-address-range", default_value = "32GB")]
	pub mem_address_range: AddrRange,

	/// Address map (0: RoCoRaBaCh; 1: RoRaBaCoCh)
	#[clap(long = "addr-map", default_value_t = 1)]
	pub addr_map: u32,

	/// Simulation engine executable
	///
	/// When absent, the wired system is only written to the output file.
	#[clap(long = "sim-exec")]
	pub sim_exec: Option<PathBuf>,

	/// Output file for the wired system description
	#[clap(long = "output", default_value = "system.json")]
	pub output: PathBuf,
}
