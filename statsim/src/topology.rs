//! Topology building.
//!
//! Translates a flat [`SystemConfig`] into the connected graph of generator,
//! monitor, caches, interconnects and memory controllers handed to the
//! simulation engine. Two topologies are supported, selected by whether a
//! cache hierarchy is requested:
//!
//! - direct: generator -> monitor -> system bus -> controllers
//! - cached: generator -> monitor -> L1 -> L2 bus -> L2 -> system bus -> controllers
//!
//! Wiring is directional, from each node's outbound port to the next node's
//! inbound port. A run has exactly one generator and at most one hierarchy.

// Imports
use {
	crate::{
		cache::{self, CacheConfig, CacheLevel},
		config::{MemMode, SystemConfig},
		generator::{self, GeneratorConfig},
		memory::{self, MemoryControllerConfig},
		Error,
	},
	itertools::Itertools,
};

/// Index of a node within [`System::nodes`]
pub type NodeId = usize;

/// Trace file written by the monitor's trace probe
pub const MONITOR_TRACE_FILE: &str = "monitor.ptrc.gz";

/// Width of the interconnects, in bytes
const BUS_WIDTH: u32 = 32;

/// Monitor configuration.
///
/// The monitor sits immediately after the generator. Its two probes are
/// independent: either, both or neither may be attached.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MonitorConfig {
	/// Trace probe output file, if a trace probe is attached
	pub trace_file: Option<String>,

	/// Whether a footprint-tracking probe is attached
	pub footprint: bool,
}

/// Interconnect configuration
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct BusConfig {
	/// Name within the system
	pub name: String,

	/// Width, in bytes
	pub width: u32,
}

/// A node of the wired system
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Node {
	Generator(GeneratorConfig),
	Monitor(MonitorConfig),
	Cache(CacheConfig),
	Bus(BusConfig),
	MemoryController(MemoryControllerConfig),
}

impl Node {
	/// Returns a short label for this node, used in wiring logs
	pub fn label(&self) -> &str {
		match self {
			Self::Generator(_) => "generator",
			Self::Monitor(_) => "monitor",
			Self::Cache(cache) => match cache.level {
				CacheLevel::L1 => "l1_cache",
				CacheLevel::L2 => "l2_cache",
			},
			Self::Bus(bus) => &bus.name,
			Self::MemoryController(_) => "mem_ctrl",
		}
	}
}

/// The wired system graph.
///
/// Immutable once built and consumed exactly once by the engine.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct System {
	/// System clock frequency
	pub frequency: String,

	/// Cache line size, in bytes
	pub cache_line_size: u64,

	/// Memory access mode
	pub mem_mode: MemMode,

	/// Nodes
	pub nodes: Vec<Node>,

	/// Directional edges, from outbound port to inbound port
	pub edges: Vec<(NodeId, NodeId)>,
}

impl System {
	/// Adds a node and returns its id
	fn add_node(&mut self, node: Node) -> NodeId {
		self.nodes.push(node);
		self.nodes.len() - 1
	}

	/// Wires `from`'s outbound port to `to`'s inbound port
	fn connect(&mut self, from: NodeId, to: NodeId) {
		self.edges.push((from, to));
	}

	/// Returns the generator's configuration
	pub fn generator(&self) -> Option<&GeneratorConfig> {
		self.nodes.iter().find_map(|node| match node {
			Node::Generator(generator) => Some(generator),
			_ => None,
		})
	}

	/// Iterates over the memory controllers
	pub fn memory_controllers(&self) -> impl Iterator<Item = &MemoryControllerConfig> {
		self.nodes.iter().filter_map(|node| match node {
			Node::MemoryController(ctrl) => Some(ctrl),
			_ => None,
		})
	}

	/// Returns the node chain from the generator to the first memory
	/// controller, following outbound wiring.
	pub fn generator_path(&self) -> Vec<NodeId> {
		let mut path = Vec::new();
		let mut cur = self.nodes.iter().position(|node| matches!(node, Node::Generator(_)));
		while let Some(id) = cur {
			path.push(id);
			if matches!(self.nodes[id], Node::MemoryController(_)) {
				break;
			}
			cur = self.edges.iter().find(|&&(from, _)| from == id).map(|&(_, to)| to);
		}

		path
	}
}

/// Builds the wired system graph from `config`.
///
/// Composes the generator selector, the memory controller configurator and,
/// if a hierarchy is requested, the cache configurator. Cache parameters are
/// not validated here: structurally invalid values are forwarded and
/// rejected by the engine at instantiation.
pub fn build(config: &SystemConfig) -> Result<System, Error> {
	// Select the generator.
	// Note: Inputs are cache-line aligned exactly when simulating caches.
	let generator = generator::select(
		&config.generator.kind,
		&config.generator.input,
		config.generator.max_packets,
		config.caches.is_some(),
	)?;

	// Configure the memory controllers
	let mem_ctrls = memory::configure(
		&config.mem.technology,
		config.mem.channels,
		config.mem.address_range,
		config.mem.addr_map_code,
	)?;

	let mut system = System {
		frequency: config.frequency.clone(),
		cache_line_size: config.cache_line_size,
		mem_mode: config.mem_mode,
		nodes: vec![],
		edges: vec![],
	};

	// The monitor is always interposed right after the generator
	let generator = system.add_node(Node::Generator(generator));
	let monitor = system.add_node(Node::Monitor(MonitorConfig {
		trace_file: config.probes.save_trace.then(|| MONITOR_TRACE_FILE.to_owned()),
		footprint:  config.probes.save_footprint,
	}));
	system.connect(generator, monitor);

	let membus = system.add_node(Node::Bus(BusConfig {
		name:  "membus".to_owned(),
		width: BUS_WIDTH,
	}));

	match &config.caches {
		// Cached: monitor -> L1 -> L2 bus -> L2 -> system bus
		Some(caches) => {
			let (l1, l2) = cache::configure(&caches.l1_size, &caches.l1_assoc, &caches.l2_size, &caches.l2_assoc);
			let l1 = system.add_node(Node::Cache(l1));
			let l2bus = system.add_node(Node::Bus(BusConfig {
				name:  "l2bus".to_owned(),
				width: BUS_WIDTH,
			}));
			let l2 = system.add_node(Node::Cache(l2));

			system.connect(monitor, l1);
			system.connect(l1, l2bus);
			system.connect(l2bus, l2);
			system.connect(l2, membus);
		},

		// Direct: monitor -> system bus
		None => system.connect(monitor, membus),
	}

	// Hang every controller off the system bus
	for ctrl in mem_ctrls {
		let ctrl = system.add_node(Node::MemoryController(ctrl));
		system.connect(membus, ctrl);
	}

	tracing::debug!(
		"Wired system: {}",
		system
			.generator_path()
			.into_iter()
			.map(|id| system.nodes[id].label())
			.format(" -> ")
	);

	Ok(system)
}

#[cfg(test)]
mod tests {
	// Imports
	use {
		super::*,
		crate::config::{CacheParams, GeneratorParams, MemoryParams, ProbeParams},
	};

	/// Returns the cached-hierarchy exploration config
	fn cached_config() -> SystemConfig {
		SystemConfig {
			frequency: "1000MHz".to_owned(),
			cache_line_size: 64,
			mem_mode: MemMode::Atomic,
			mem: MemoryParams {
				technology:    "LPDDR3_1600_1x32".to_owned(),
				channels:      4,
				address_range: "32GB".parse().unwrap(),
				addr_map_code: 1,
			},
			caches: Some(CacheParams {
				l1_size:  "16kB".to_owned(),
				l1_assoc: "2".to_owned(),
				l2_size:  "256kB".to_owned(),
				l2_assoc: "8".to_owned(),
			}),
			generator: GeneratorParams {
				kind:        "PacketTraceGen".to_owned(),
				input:       "workload.ptrc".to_owned(),
				max_packets: 1000,
			},
			probes: ProbeParams {
				save_trace:     false,
				save_footprint: true,
			},
		}
	}

	/// Returns the direct-to-memory exploration config
	fn direct_config() -> SystemConfig {
		SystemConfig {
			mem_mode: MemMode::Timing,
			caches: None,
			..cached_config()
		}
	}

	/// Counts the nodes of `system` matched by `pred`
	fn count(system: &System, pred: impl Fn(&Node) -> bool) -> usize {
		system.nodes.iter().filter(|node| pred(node)).count()
	}

	#[test]
	fn cached_topology_shape() {
		let system = build(&cached_config()).unwrap();

		assert_eq!(count(&system, |node| matches!(node, Node::Generator(_))), 1);
		assert_eq!(count(&system, |node| matches!(node, Node::Monitor(_))), 1);
		assert_eq!(count(&system, |node| matches!(node, Node::Cache(_))), 2);
		assert_eq!(count(&system, |node| matches!(node, Node::Bus(_))), 2);
		assert_eq!(count(&system, |node| matches!(node, Node::MemoryController(_))), 4);

		// All controllers share the requested mapping
		for ctrl in system.memory_controllers() {
			assert_eq!(ctrl.addr_map.as_str(), "RoRaBaCoCh");
		}
	}

	#[test]
	fn cached_topology_wiring_order() {
		let system = build(&cached_config()).unwrap();

		// Exactly 5 intermediate hops between generator and first controller,
		// with the L1 ahead of the L2
		let path = system
			.generator_path()
			.into_iter()
			.map(|id| system.nodes[id].label().to_owned())
			.collect::<Vec<_>>();
		assert_eq!(path, [
			"generator", "monitor", "l1_cache", "l2bus", "l2_cache", "membus", "mem_ctrl"
		]);
	}

	#[test]
	fn direct_topology_wiring_order() {
		let system = build(&direct_config()).unwrap();

		let path = system
			.generator_path()
			.into_iter()
			.map(|id| system.nodes[id].label().to_owned())
			.collect::<Vec<_>>();
		assert_eq!(path, ["generator", "monitor", "membus", "mem_ctrl"]);
	}

	#[test]
	fn probes_attach_independently() {
		for (save_trace, save_footprint) in [(false, false), (true, false), (false, true), (true, true)] {
			let mut config = cached_config();
			config.probes = ProbeParams {
				save_trace,
				save_footprint,
			};

			let system = build(&config).unwrap();
			let monitor = system
				.nodes
				.iter()
				.find_map(|node| match node {
					Node::Monitor(monitor) => Some(monitor),
					_ => None,
				})
				.unwrap();

			assert_eq!(monitor.trace_file.is_some(), save_trace);
			assert_eq!(monitor.footprint, save_footprint);
			if save_trace {
				assert_eq!(monitor.trace_file.as_deref(), Some(MONITOR_TRACE_FILE));
			}
		}
	}

	#[test]
	fn cache_align_follows_hierarchy() {
		let cached = build(&cached_config()).unwrap();
		assert!(matches!(
			cached.generator(),
			Some(GeneratorConfig::PacketTrace { cache_align: true, .. })
		));

		let direct = build(&direct_config()).unwrap();
		assert!(matches!(
			direct.generator(),
			Some(GeneratorConfig::PacketTrace { cache_align: false, .. })
		));
	}

	#[test]
	fn construction_errors_abort_the_build() {
		let mut config = cached_config();
		config.mem.addr_map_code = 2;
		assert!(matches!(build(&config), Err(Error::InvalidAddressMap(2))));

		let mut config = cached_config();
		config.generator.input = String::new();
		assert!(matches!(build(&config), Err(Error::MissingGeneratorInput)));

		let mut config = cached_config();
		config.generator.kind = "Bogus".to_owned();
		assert!(matches!(build(&config), Err(Error::UnknownGeneratorKind(_))));
	}
}
