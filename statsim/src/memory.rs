//! Main memory configuration.
//!
//! Produces one stats-only memory controller per channel, each serving a
//! disjoint contiguous slice of the system's address range. The memory
//! technology identifier is opaque at this layer: unknown technologies are
//! rejected by the engine's memory-technology table, not here.

// Imports
use {
	crate::Error,
	anyhow::Context,
	std::{fmt, str::FromStr},
};

/// Physical address to DRAM coordinate mapping policy
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum AddrMap {
	/// Row, column, rank, bank, channel
	RoCoRaBaCh,

	/// Row, rank, bank, column, channel
	RoRaBaCoCh,
}

impl AddrMap {
	/// Parses an address map from its numeric command-line code
	pub fn from_code(code: u32) -> Result<Self, Error> {
		match code {
			0 => Ok(Self::RoCoRaBaCh),
			1 => Ok(Self::RoRaBaCoCh),
			_ => Err(Error::InvalidAddressMap(code)),
		}
	}

	/// Returns this mapping's name
	pub fn as_str(self) -> &'static str {
		match self {
			Self::RoCoRaBaCh => "RoCoRaBaCh",
			Self::RoRaBaCoCh => "RoRaBaCoCh",
		}
	}
}

impl fmt::Display for AddrMap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Half-open physical address range `[start, start + size)`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AddrRange {
	/// First address of the range
	pub start: u64,

	/// Size of the range, in bytes
	pub size: u64,
}

impl AddrRange {
	/// Creates a range of `size` bytes starting at 0
	pub fn new(size: u64) -> Self {
		Self { start: 0, size }
	}

	/// Returns the exclusive end of this range
	pub fn end(self) -> u64 {
		self.start + self.size
	}

	/// Splits this range into `count` disjoint contiguous slices.
	///
	/// The split is even, with any remainder going to the last slice.
	pub fn split(self, count: u64) -> Vec<Self> {
		let slice_size = self.size / count.max(1);
		(0..count)
			.map(|idx| {
				let start = self.start + idx * slice_size;
				let size = match idx == count - 1 {
					true => self.end() - start,
					false => slice_size,
				};
				Self { start, size }
			})
			.collect()
	}
}

impl FromStr for AddrRange {
	type Err = anyhow::Error;

	/// Parses a range size from a magnitude string, e.g. `32GB` or `512MB`.
	///
	/// Multipliers are binary.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		const UNITS: [(&str, u64); 7] = [
			("TB", 1 << 40),
			("GB", 1 << 30),
			("MB", 1 << 20),
			("kB", 1 << 10),
			("KB", 1 << 10),
			("KiB", 1 << 10),
			("B", 1),
		];

		let s = s.trim();
		let (digits, multiplier) = UNITS
			.iter()
			.find_map(|&(unit, multiplier)| s.strip_suffix(unit).map(|digits| (digits, multiplier)))
			.unwrap_or((s, 1));

		let size = digits
			.trim()
			.parse::<u64>()
			.with_context(|| format!("Unable to parse address range {s:?}"))?;

		Ok(Self::new(size * multiplier))
	}
}

impl fmt::Display for AddrRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#x}:{:#x}", self.start, self.end())
	}
}

/// Memory controller configuration.
///
/// One controller per channel; every controller in a run shares the same
/// address mapping. `retain_data` stays `false`: these runs only measure
/// timing and traffic, simulated memory contents are never persisted.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct MemoryControllerConfig {
	/// Memory technology identifier, e.g. `LPDDR3_1600_1x32`
	pub technology: String,

	/// Address slice served by this controller
	pub range: AddrRange,

	/// Address mapping policy
	pub addr_map: AddrMap,

	/// Whether simulated memory contents are kept
	pub retain_data: bool,
}

/// Configures one memory controller per channel.
///
/// Each controller spans a disjoint contiguous slice of `range` and carries
/// the mapping decoded from `addr_map_code`.
pub fn configure(
	technology: &str,
	channels: usize,
	range: AddrRange,
	addr_map_code: u32,
) -> Result<Vec<MemoryControllerConfig>, Error> {
	let addr_map = AddrMap::from_code(addr_map_code)?;

	let ctrls = range
		.split(channels as u64)
		.into_iter()
		.map(|slice| MemoryControllerConfig {
			technology: technology.to_owned(),
			range: slice,
			addr_map,
			retain_data: false,
		})
		.collect();

	Ok(ctrls)
}

#[cfg(test)]
mod tests {
	// Imports
	use super::*;

	#[test]
	fn addr_map_codes() {
		assert_eq!(AddrMap::from_code(0).unwrap().as_str(), "RoCoRaBaCh");
		assert_eq!(AddrMap::from_code(1).unwrap().as_str(), "RoRaBaCoCh");
		assert!(matches!(AddrMap::from_code(2), Err(Error::InvalidAddressMap(2))));
	}

	#[test]
	fn invalid_addr_map_rejects_configuration() {
		let err = configure("LPDDR3_1600_1x32", 4, AddrRange::new(1 << 30), 2).unwrap_err();
		assert!(matches!(err, Error::InvalidAddressMap(2)));
	}

	#[test]
	fn range_parsing() {
		assert_eq!("32GB".parse::<AddrRange>().unwrap(), AddrRange::new(32 << 30));
		assert_eq!("512MB".parse::<AddrRange>().unwrap(), AddrRange::new(512 << 20));
		assert_eq!("16kB".parse::<AddrRange>().unwrap(), AddrRange::new(16 << 10));
		assert_eq!("1024".parse::<AddrRange>().unwrap(), AddrRange::new(1024));
		assert!("lots".parse::<AddrRange>().is_err());
	}

	#[test]
	fn channels_slice_the_range() {
		let ctrls = configure("LPDDR3_1600_1x32", 4, AddrRange::new(1 << 30), 1).unwrap();
		assert_eq!(ctrls.len(), 4);

		// Disjoint, contiguous and covering
		let mut expected_start = 0;
		for ctrl in &ctrls {
			assert_eq!(ctrl.range.start, expected_start);
			expected_start = ctrl.range.end();
		}
		assert_eq!(expected_start, 1 << 30);

		// Shared mapping, stats-only
		for ctrl in &ctrls {
			assert_eq!(ctrl.addr_map, AddrMap::RoRaBaCoCh);
			assert!(!ctrl.retain_data);
		}
	}

	#[test]
	fn uneven_split_gives_remainder_to_last_channel() {
		let slices = AddrRange::new(10).split(3);
		assert_eq!(slices.len(), 3);
		assert_eq!(slices[0].size, 3);
		assert_eq!(slices[1].size, 3);
		assert_eq!(slices[2].size, 4);
		assert_eq!(slices[2].end(), 10);
	}
}
