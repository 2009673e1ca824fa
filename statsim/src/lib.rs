//! Memory-subsystem simulation launcher (`statsim`)
//!
//! Assembles a simulated cache/memory-controller topology, attaches a
//! traffic-generator workload source and normalizes heterogeneous workload
//! inputs into the canonical descriptor format consumed by the generator
//! replay models. The cycle-accurate engine itself is an external
//! collaborator, reached through the [`sim`] boundary.

// Modules
pub mod cache;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod memory;
pub mod sim;
pub mod topology;

// Exports
pub use self::{
	cache::CacheConfig,
	config::SystemConfig,
	error::Error,
	generator::{GeneratorConfig, GeneratorKind},
	memory::{AddrMap, AddrRange, MemoryControllerConfig},
	sim::{RunOutput, Simulator},
	topology::System,
};
