//! Crate-wide error type.

use derive_more::{Display, Error};

use crate::pixel_mapper::params::ParamIssue;

/// Capacity of the mapper name stored in [`Error::UnknownMapper`].
pub const NAME_CAPACITY: usize = 32;

/// Mapper name, truncated to [`NAME_CAPACITY`] bytes.
pub type NameText = heapless::String<NAME_CAPACITY>;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong while looking up or configuring a mapper.
///
/// All of these surface once, at configuration time. A configured mapper's
/// [`to_physical`](crate::PixelMapper::to_physical) never fails.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// No mapper is registered under this name (compared ignoring ASCII case).
    #[display("{name}: no such mapper")]
    UnknownMapper {
        /// The name that was asked for.
        name: NameText,
    },

    /// `chain` and `parallel` must both be at least 1.
    #[display("chain and parallel must be positive (chain={chain}, parallel={parallel})")]
    EmptyTopology {
        /// Requested chain length.
        chain: u32,
        /// Requested parallel count.
        parallel: u32,
    },

    /// The mapper folds parallel chains and needs at least two of them.
    #[display("{mapper}: need at least --led-parallel=2, got {parallel}")]
    ParallelTooSmall {
        /// Mapper that rejected the topology.
        mapper: &'static str,
        /// Requested parallel count.
        parallel: u32,
    },

    /// The mapper folds the chain in half and needs an even chain of 2 or more.
    #[display("{mapper}: chain needs to be an even number of at least 2, got {chain}")]
    ChainNotFoldable {
        /// Mapper that rejected the topology.
        mapper: &'static str,
        /// Requested chain length.
        chain: u32,
    },

    /// The per-panel table cannot hold this many panels.
    #[display("{mapper}: {panel_count} panels exceed the table capacity of {max}")]
    TooManyPanels {
        /// Mapper that rejected the topology.
        mapper: &'static str,
        /// `chain * parallel`.
        panel_count: u32,
        /// Table capacity.
        max: usize,
    },

    /// The parameter string was rejected as a whole.
    #[display("{mapper}: {issue}")]
    InvalidParameter {
        /// Mapper that rejected the parameter.
        mapper: &'static str,
        /// What was wrong with it.
        issue: ParamIssue,
    },

    /// Matrix height is not a multiple of the parallel count.
    #[display("{mapper}: for parallel={parallel} the height={height} should be divisible by {parallel}")]
    HeightNotDivisible {
        /// Mapper that rejected the size.
        mapper: &'static str,
        /// Physical matrix height.
        height: u32,
        /// Parallel count.
        parallel: u32,
    },

    /// The registry already holds its maximum number of mappers.
    #[display("registry is full ({max} mappers)")]
    RegistryFull {
        /// Registry capacity.
        max: usize,
    },

    /// The pipeline already holds its maximum number of stages.
    #[display("pipeline is full ({max} stages)")]
    PipelineFull {
        /// Pipeline capacity.
        max: usize,
    },

    /// A pipeline descriptor segment has no mapper name (for example `":90"`).
    #[display("pipeline segment {segment} has no mapper name")]
    MalformedPipeline {
        /// Zero-based position of the segment, counting empty ones.
        segment: usize,
    },
}

impl Error {
    /// Build an [`Error::UnknownMapper`], truncating `name` to [`NAME_CAPACITY`].
    #[must_use]
    pub fn unknown_mapper(name: &str) -> Self {
        let mut text = NameText::new();
        for ch in name.chars() {
            if text.push(ch).is_err() {
                break;
            }
        }
        Self::UnknownMapper { name: text }
    }
}
