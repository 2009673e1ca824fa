//! Configuration

// Imports
use crate::memory::AddrRange;

/// System configuration.
///
/// Built once from parsed options and immutable afterwards; the topology
/// builder consumes it to wire the system graph.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SystemConfig {
	/// System clock frequency, e.g. `1000MHz`
	pub frequency: String,

	/// Cache line size, in bytes
	pub cache_line_size: u64,

	/// Memory access mode
	pub mem_mode: MemMode,

	/// Main memory parameters
	pub mem: MemoryParams,

	/// Cache hierarchy overrides, if a hierarchy is requested
	pub caches: Option<CacheParams>,

	/// Traffic generator request
	pub generator: GeneratorParams,

	/// Monitor probes
	pub probes: ProbeParams,
}

/// Memory access mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum MemMode {
	/// Functional accesses, no timing
	Atomic,

	/// Cycle-level timing accesses
	Timing,
}

/// Main memory parameters
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MemoryParams {
	/// Memory technology identifier
	pub technology: String,

	/// Number of channels
	pub channels: usize,

	/// System memory address range
	pub address_range: AddrRange,

	/// Address map code (0: `RoCoRaBaCh`; 1: `RoRaBaCoCh`)
	pub addr_map_code: u32,
}

/// Cache hierarchy override parameters
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CacheParams {
	pub l1_size:  String,
	pub l1_assoc: String,
	pub l2_size:  String,
	pub l2_assoc: String,
}

/// Traffic generator request
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct GeneratorParams {
	/// Requested kind, by name
	pub kind: String,

	/// Workload input path
	pub input: String,

	/// Packet limit (0 means unlimited)
	pub max_packets: u64,
}

/// Probe parameters
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ProbeParams {
	/// Attach a trace-recording probe to the monitor
	pub save_trace: bool,

	/// Attach a footprint-tracking probe to the monitor
	pub save_footprint: bool,
}
