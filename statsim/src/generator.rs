//! Traffic generator selection.
//!
//! Dispatches a requested generator kind to its configuration variant. Pure
//! construction: no file is touched here, and raw inputs are not synthesized
//! into descriptors. Only the descriptor-replay kind consumes the canonical
//! format, so callers decide whether to run the synthesizer first (see
//! [`crate::descriptor`]).

// Imports
use {
	crate::Error,
	std::{path::PathBuf, str::FromStr},
};

/// Generator kinds understood by the driver
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum GeneratorKind {
	/// Packet trace replay
	PacketTrace,

	/// Hierarchical reuse distance model replay
	Hrd,

	/// Mocktails model replay
	Mocktails,

	/// Stochastic traffic model replay
	Stm,

	/// Canonical descriptor replay
	Descriptor,
}

impl GeneratorKind {
	/// All kinds
	pub const ALL: [Self; 5] = [Self::PacketTrace, Self::Hrd, Self::Mocktails, Self::Stm, Self::Descriptor];

	/// Returns this kind's name, as accepted on the command line
	pub fn name(self) -> &'static str {
		match self {
			Self::PacketTrace => "PacketTraceGen",
			Self::Hrd => "HrdGen",
			Self::Mocktails => "MocktailsGen",
			Self::Stm => "StmGen",
			Self::Descriptor => "TrafficGen",
		}
	}
}

impl FromStr for GeneratorKind {
	type Err = Error;

	/// Parses a kind from its name, ignoring case and surrounding whitespace
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		Self::ALL
			.into_iter()
			.find(|kind| kind.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnknownGeneratorKind(s.to_owned()))
	}
}

/// Traffic generator configuration.
///
/// Exactly one generator exists per run; the topology builder wires its
/// outbound port to the system's entry point.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum GeneratorConfig {
	/// Replays a raw packet trace
	PacketTrace {
		trace:       PathBuf,
		outstanding: u64,
		max_packets: u64,
		cache_align: bool,
	},

	/// Replays a hierarchical reuse distance model
	Hrd { model_data: PathBuf, max_packets: u64 },

	/// Replays a mocktails model
	Mocktails {
		model_data:  PathBuf,
		outstanding: u64,
		max_packets: u64,
		cache_align: bool,
	},

	/// Replays a stochastic traffic model
	Stm { model_data: PathBuf, max_packets: u64 },

	/// Replays a canonical workload descriptor
	Descriptor { config_file: PathBuf, max_packets: u64 },
}

impl GeneratorConfig {
	/// Returns this generator's kind
	pub fn kind(&self) -> GeneratorKind {
		match self {
			Self::PacketTrace { .. } => GeneratorKind::PacketTrace,
			Self::Hrd { .. } => GeneratorKind::Hrd,
			Self::Mocktails { .. } => GeneratorKind::Mocktails,
			Self::Stm { .. } => GeneratorKind::Stm,
			Self::Descriptor { .. } => GeneratorKind::Descriptor,
		}
	}
}

/// Selects and constructs the generator configuration for `kind`.
///
/// `input` isn't checked for existence, only for presence. A `max_packets`
/// of 0 means unlimited.
pub fn select(kind: &str, input: &str, max_packets: u64, cache_align: bool) -> Result<GeneratorConfig, Error> {
	if input.is_empty() {
		return Err(Error::MissingGeneratorInput);
	}

	let kind = kind.parse::<GeneratorKind>()?;
	let input = PathBuf::from(input);
	let config = match kind {
		GeneratorKind::PacketTrace => GeneratorConfig::PacketTrace {
			trace: input,
			outstanding: 0,
			max_packets,
			cache_align,
		},
		GeneratorKind::Hrd => GeneratorConfig::Hrd {
			model_data: input,
			max_packets,
		},
		GeneratorKind::Mocktails => GeneratorConfig::Mocktails {
			model_data: input,
			outstanding: 0,
			max_packets,
			cache_align,
		},
		GeneratorKind::Stm => GeneratorConfig::Stm {
			model_data: input,
			max_packets,
		},
		GeneratorKind::Descriptor => GeneratorConfig::Descriptor {
			config_file: input,
			max_packets,
		},
	};

	Ok(config)
}

#[cfg(test)]
mod tests {
	// Imports
	use super::*;

	#[test]
	fn missing_input_is_rejected() {
		let err = select("PacketTraceGen", "", 0, true).unwrap_err();
		assert!(matches!(err, Error::MissingGeneratorInput));
	}

	#[test]
	fn unknown_kind_is_rejected_by_name() {
		let err = select("Bogus", "x.ptrc", 0, true).unwrap_err();
		assert!(matches!(err, Error::UnknownGeneratorKind(kind) if kind == "Bogus"));
	}

	#[test]
	fn kind_parsing_trims_and_ignores_case() {
		assert_eq!("  PacketTraceGen ".parse::<GeneratorKind>().unwrap(), GeneratorKind::PacketTrace);
		assert_eq!("stmgen".parse::<GeneratorKind>().unwrap(), GeneratorKind::Stm);
		assert_eq!("TRAFFICGEN".parse::<GeneratorKind>().unwrap(), GeneratorKind::Descriptor);
	}

	#[test]
	fn each_kind_selects_its_variant() {
		for kind in GeneratorKind::ALL {
			let config = select(kind.name(), "workload.ptrc", 1000, false).unwrap();
			assert_eq!(config.kind(), kind);
		}
	}

	#[test]
	fn trace_variant_fields() {
		let config = select("PacketTraceGen", "workload.ptrc", 1000, true).unwrap();
		assert_eq!(config, GeneratorConfig::PacketTrace {
			trace:       PathBuf::from("workload.ptrc"),
			outstanding: 0,
			max_packets: 1000,
			cache_align: true,
		});
	}
}
