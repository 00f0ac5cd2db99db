//! Name-based lookup of mappers.
//!
//! A [`Registry`] is an ordinary value: build it once at startup, before any
//! rendering starts, and pass it by reference to whoever needs lookups.
//!
//! ```rust
//! use panel_mapper::{PixelMapper, Registry};
//!
//! let registry = Registry::new();
//! assert!(registry.names().any(|name| name == "U-mapper"));
//!
//! // Names match ignoring ASCII case.
//! let mapper = registry.find("u-MAPPER", 4, 1, "")?.into_mapper();
//! assert_eq!(mapper.visible_size(128, 32)?, (64, 64));
//!
//! assert!(registry.find("no-such-mapper", 4, 1, "").is_err());
//! # Ok::<(), panel_mapper::Error>(())
//! ```

use crate::pipeline::Pipeline;
use crate::pixel_mapper::{
    Configure, Configured, Mapper, Mirror, PixelMapper, Reorder, Rotate, RotatePanel,
    RowArrangement, Topology, UArrangement, Vertical, configure_as,
};
use crate::{Error, Result};

/// Most mappers a [`Registry`] holds.
pub const MAX_MAPPERS: usize = 16;

const BUILTIN_NAMES: [&str; 7] = [
    RowArrangement::NAME,
    RotatePanel::NAME,
    Reorder::NAME,
    Rotate::NAME,
    UArrangement::NAME,
    Vertical::NAME,
    Mirror::NAME,
];

const _: () = assert!(BUILTIN_NAMES.len() <= MAX_MAPPERS);

/// Builds a configured `M` from a topology and a parameter string.
pub type Factory<M> = fn(Topology, &str) -> Result<Configured<M>>;

#[derive(Clone)]
struct Entry<M> {
    name: &'static str,
    factory: Factory<M>,
}

/// Mapper factories keyed by name, compared ignoring ASCII case.
///
/// Registering a name that is already present (in any case) replaces the old
/// entry, so each name has exactly one factory.
#[derive(Clone)]
pub struct Registry<M = Mapper> {
    entries: heapless::Vec<Entry<M>, MAX_MAPPERS>,
}

impl Registry<Mapper> {
    /// A registry holding every built-in mapper.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        // An empty registry always has room for the built-ins.
        if let Err(error) = registry.register_builtins() {
            warn!("{}", display!(error));
        }
        registry
    }
}

impl Default for Registry<Mapper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Registry<M> {
    /// A registry with nothing in it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Add every built-in mapper, converted into `M`.
    ///
    /// Either all seven are registered or, when there is no room, none are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryFull`] when the built-ins not yet present do not fit.
    pub fn register_builtins(&mut self) -> Result<()>
    where
        M: From<RowArrangement>
            + From<RotatePanel>
            + From<Reorder>
            + From<Rotate>
            + From<UArrangement>
            + From<Vertical>
            + From<Mirror>,
    {
        let missing = BUILTIN_NAMES
            .iter()
            .filter(|name| !self.contains(name))
            .count();
        if self.len().saturating_add(missing) > MAX_MAPPERS {
            warn!("no room for {} built-in mappers", missing);
            return Err(Error::RegistryFull { max: MAX_MAPPERS });
        }
        self.register_mapper::<RowArrangement>()?;
        self.register_mapper::<RotatePanel>()?;
        self.register_mapper::<Reorder>()?;
        self.register_mapper::<Rotate>()?;
        self.register_mapper::<UArrangement>()?;
        self.register_mapper::<Vertical>()?;
        self.register_mapper::<Mirror>()
    }

    /// Register the mapper type `T` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryFull`] when the name is new and there is no room.
    pub fn register_mapper<T>(&mut self) -> Result<()>
    where
        T: Configure,
        M: From<T>,
    {
        self.register(T::NAME, configure_as::<T, M>)
    }

    /// Register `factory` under `name`, replacing any entry with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryFull`] when the name is new and there is no room.
    pub fn register(&mut self, name: &'static str, factory: Factory<M>) -> Result<()> {
        let entry = Entry { name, factory };
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(name))
        {
            *existing = entry;
        } else {
            self.entries
                .push(entry)
                .map_err(|_| Error::RegistryFull { max: MAX_MAPPERS })?;
        }
        info!("registered pixel mapper {}", name);
        Ok(())
    }

    /// Display names of every registered mapper, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Number of registered mappers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` when `name` is registered (ignoring ASCII case).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn entry(&self, name: &str) -> Option<&Entry<M>> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Look up `name` (ignoring ASCII case) and configure it for `chain` × `parallel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMapper`] when no mapper has that name, otherwise
    /// whatever the mapper's configuration rejects.
    pub fn find(&self, name: &str, chain: u32, parallel: u32, param: &str) -> Result<Configured<M>> {
        let Some(entry) = self.entry(name) else {
            warn!("{}: no such mapper", name);
            return Err(Error::unknown_mapper(name));
        };
        let configured =
            Topology::new(chain, parallel).and_then(|topology| (entry.factory)(topology, param));
        // Skipped tokens were already logged while parsing.
        if let Err(error) = &configured {
            warn!("{}", display!(error));
        }
        configured
    }

    /// Build a [`Pipeline`] from a descriptor such as `"U-mapper;Rotate:90"`.
    ///
    /// Each `;`-separated segment is `name` or `name:param`; empty segments are
    /// ignored. The first mapper sees the physical matrix, each later one sees
    /// the visible canvas of the one before it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPipeline`] for a segment like `":90"`,
    /// [`Error::PipelineFull`] when there are too many segments, and otherwise
    /// the first lookup, configuration or sizing error.
    pub fn find_pipeline(
        &self,
        descriptor: &str,
        chain: u32,
        parallel: u32,
        matrix_width: u32,
        matrix_height: u32,
    ) -> Result<Pipeline<M>>
    where
        M: PixelMapper,
    {
        descriptor
            .split(';')
            .enumerate()
            .filter(|(_, segment)| !segment.is_empty())
            .try_fold(
                Pipeline::new(matrix_width, matrix_height),
                |mut pipeline, (index, segment)| {
                    let (name, param) = segment.split_once(':').unwrap_or((segment, ""));
                    if name.is_empty() {
                        warn!("pipeline segment {} has no mapper name", index);
                        return Err(Error::MalformedPipeline { segment: index });
                    }
                    let mapper = self.find(name, chain, parallel, param)?.into_mapper();
                    pipeline.push(mapper)?;
                    Ok(pipeline)
                },
            )
    }
}
