//! Configuration resolution with layered merge
//!
//! The `Resolver` loads an ordered list of candidate sources, folds each
//! found fragment over the accumulator with the deep merger, runs the
//! derivation battery exactly once, and hands back the read-only result.

use crate::derive::DerivationEngine;
use crate::loader::{SourceList, load_fragment};
use crate::tree::Settings;
use crate::Result;

/// Resolves settings by folding sources and deriving defaults.
///
/// An explicit value, constructed once the source list is known and
/// threaded to whoever needs the result; there is no ambient configuration
/// singleton.
pub struct Resolver {
    sources: SourceList,
    engine: DerivationEngine,
}

impl Resolver {
    /// Create a resolver over the given sources.
    pub fn new(sources: SourceList) -> Self {
        Self {
            sources,
            engine: DerivationEngine::standard(),
        }
    }

    /// Resolve the configuration.
    ///
    /// Sources are folded in list order, later ones overriding earlier
    /// state at conflicting leaves. Missing and empty sources contribute
    /// nothing; a source that exists but fails to parse is an error. The
    /// derivation battery runs once, after the fold.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use devenv_config::{Resolver, SourceList};
    ///
    /// let resolver = Resolver::new(SourceList::for_project_root("."));
    /// let settings = resolver.resolve()?;
    /// println!("VM: {:?}", settings.get("vm.name"));
    /// # Ok::<(), devenv_config::Error>(())
    /// ```
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::new();

        for location in self.sources.locations() {
            if let Some(fragment) = load_fragment(location)? {
                tracing::debug!(path = ?location, "Merging source layer");
                settings.merge_fragment(&fragment);
            }
        }

        self.engine.run(&mut settings);

        Ok(settings)
    }

    /// The candidate sources, lowest precedence first.
    pub fn sources(&self) -> &SourceList {
        &self.sources
    }
}
