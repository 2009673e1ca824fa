//! Memory-subsystem simulation launcher (`statsim`)

// Modules
mod args;

// Imports
use {
	self::args::{Args, SubCmd},
	anyhow::Context,
	clap::Parser,
	statsim::{
		config::{CacheParams, GeneratorParams, MemMode, MemoryParams, ProbeParams, SystemConfig},
		descriptor,
		generator::GeneratorKind,
		sim::{ProcessSimulator, Simulator},
		topology,
	},
	statsim_util::logger,
	std::{env, fs, path::Path},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Check the sub-command for the topology and run mode
	let (common, mem_mode, cache_line_size, caches) = match args.sub_cmd {
		SubCmd::Memory { common } => (common, MemMode::Timing, 64, None),
		SubCmd::Caches {
			common,
			cache_line_size,
			l1_size,
			l1_assoc,
			l2_size,
			l2_assoc,
		} => (
			common,
			MemMode::Atomic,
			cache_line_size,
			Some(CacheParams {
				l1_size,
				l1_assoc,
				l2_size,
				l2_assoc,
			}),
		),
	};

	// Descriptor-replay generators consume the canonical format, so
	// synthesize a descriptor from raw inputs first. All other kinds take
	// their raw inputs directly; selection errors surface from the builder.
	let generator_input = match common.generator.parse::<GeneratorKind>() {
		Ok(GeneratorKind::Descriptor) if !common.generator_input.is_empty() => {
			let out_dir = env::current_dir().context("Unable to get working directory")?;
			let descriptor = descriptor::synthesize(Path::new(&common.generator_input), &out_dir)
				.context("Unable to synthesize workload descriptor")?;
			tracing::info!("Synthesized workload descriptor: {descriptor:?}");
			descriptor.to_string_lossy().into_owned()
		},
		_ => common.generator_input.clone(),
	};

	// Assemble the system configuration
	let config = SystemConfig {
		frequency: common.system_frequency.clone(),
		cache_line_size,
		mem_mode,
		mem: MemoryParams {
			technology:    common.mem_type.clone(),
			channels:      common.mem_channels,
			address_range: common.mem_address_range,
			addr_map_code: common.addr_map,
		},
		caches,
		generator: GeneratorParams {
			kind:        common.generator.clone(),
			input:       generator_input,
			max_packets: common.generator_limit,
		},
		probes: ProbeParams {
			save_trace:     common.save_generator_trace == 1,
			save_footprint: common.save_generator_footprint == 1,
		},
	};
	tracing::debug!(?config, "System configuration");

	// Build the system graph
	let system = topology::build(&config).context("Unable to build system topology")?;

	match common.sim_exec {
		// Launch the simulation
		Some(exec) => {
			let work_dir = env::current_dir().context("Unable to get working directory")?;
			let mut sim = ProcessSimulator::new(exec, work_dir);

			println!("Starting the simulation.");
			let output = sim.run(&system).context("Unable to run simulation")?;
			println!("Exiting @ tick {} because {}", output.ticks, output.exit_cause);
		},

		// Without an engine, just emit the wired system
		None => {
			let output_file = fs::File::create(&common.output)
				.with_context(|| format!("Unable to create output file {:?}", common.output))?;
			serde_json::to_writer_pretty(output_file, &system).context("Unable to write output file")?;
			tracing::info!("Wrote wired system to {:?}", common.output);
		},
	}

	Ok(())
}
