//! Cache hierarchy configuration.
//!
//! A pure field override on top of fixed per-level defaults. Sizes and
//! associativities stay free-form strings: malformed values are forwarded
//! as-is and rejected by the engine when the system is instantiated, never
//! here.

/// Cache level
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum CacheLevel {
	L1,
	L2,
}

/// Cache configuration
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CacheConfig {
	/// Level within the hierarchy
	pub level: CacheLevel,

	/// Total size, as a magnitude string, e.g. `16kB`
	pub size: String,

	/// Associativity
	pub assoc: String,

	/// Tag lookup latency, in cycles
	pub tag_latency: u64,

	/// Data access latency, in cycles
	pub data_latency: u64,

	/// Response latency, in cycles
	pub response_latency: u64,

	/// Outstanding miss capacity
	pub mshrs: u32,

	/// Targets per outstanding miss
	pub tgts_per_mshr: u32,
}

impl CacheConfig {
	/// L1 defaults: small and fast, few outstanding misses
	pub fn l1_default() -> Self {
		Self {
			level:            CacheLevel::L1,
			size:             "16kB".to_owned(),
			assoc:            "2".to_owned(),
			tag_latency:      2,
			data_latency:     2,
			response_latency: 2,
			mshrs:            4,
			tgts_per_mshr:    20,
		}
	}

	/// L2 defaults: larger and slower, more outstanding misses
	pub fn l2_default() -> Self {
		Self {
			level:            CacheLevel::L2,
			size:             "256kB".to_owned(),
			assoc:            "8".to_owned(),
			tag_latency:      20,
			data_latency:     20,
			response_latency: 20,
			mshrs:            20,
			tgts_per_mshr:    12,
		}
	}
}

/// Configures the L1 and L2 caches, overriding size and associativity on top
/// of the per-level defaults.
///
/// Every call produces independent config objects.
pub fn configure(l1_size: &str, l1_assoc: &str, l2_size: &str, l2_assoc: &str) -> (CacheConfig, CacheConfig) {
	let l1 = CacheConfig {
		size: l1_size.to_owned(),
		assoc: l1_assoc.to_owned(),
		..CacheConfig::l1_default()
	};
	let l2 = CacheConfig {
		size: l2_size.to_owned(),
		assoc: l2_assoc.to_owned(),
		..CacheConfig::l2_default()
	};

	(l1, l2)
}
