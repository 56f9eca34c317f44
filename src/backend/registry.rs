//! Backend discovery: an ordered table of statically known backends, each
//! with a constructor and a "works here" probe, ending in a fallback whose
//! constructor cannot fail.
//!
//! Selection never returns an error. Every candidate that cannot be used is
//! reported once through the diagnostics backend and skipped.

use super::{
    Backend, BackendFactory, JsonFactory, LocalFactory, LogBridgeFactory, NullFactory,
    PROBE_IDENTITY,
};
use crate::config::{Config, ENV_BACKEND};
use crate::level::Level;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Builds a factory from configuration; may fail.
pub type Constructor =
    Box<dyn Fn(&Config) -> Result<Arc<dyn BackendFactory>, crate::Error> + Send + Sync>;
/// Exercises a freshly built factory to prove it is wired up.
pub type Probe = Box<dyn Fn(&dyn BackendFactory) -> Result<(), crate::Error> + Send + Sync>;
type FallbackConstructor = Box<dyn Fn(&Config) -> Arc<dyn BackendFactory> + Send + Sync>;

/// Creating a backend and asking it about `Info` is the real operation most
/// backends need to prove they work, not just that they exist.
///
/// # Errors
/// Whatever the factory reports.
pub fn default_probe(factory: &dyn BackendFactory) -> Result<(), crate::Error> {
    let backend = factory.create_backend(PROBE_IDENTITY)?;
    let _ = backend.is_level_enabled(Level::Info);
    Ok(())
}

/// One selectable backend.
///
/// A constructor or check that panics is treated as unavailable. The panic is
/// caught, but the process panic hook still runs first, so the default hook
/// prints its own report to stderr ahead of the single diagnostics warning.
pub struct BackendDescriptor {
    name: String,
    auto_detect: bool,
    construct: Constructor,
    probe: Probe,
}

impl BackendDescriptor {
    /// Auto-detected candidate using [`default_probe`].
    pub fn new<F>(name: impl Into<String>, construct: F) -> Self
    where
        F: Fn(&Config) -> Result<Arc<dyn BackendFactory>, crate::Error> + Send + Sync + 'static,
    {
        Self {
            name: name.into().to_lowercase(),
            auto_detect: true,
            construct: Box::new(construct),
            probe: Box::new(default_probe),
        }
    }

    /// Excludes the candidate from auto-detection; it is only used when named.
    #[must_use]
    pub const fn name_only(mut self) -> Self {
        self.auto_detect = false;
        self
    }

    /// Replaces the default probe.
    #[must_use]
    pub fn probe<P>(mut self, probe: P) -> Self
    where
        P: Fn(&dyn BackendFactory) -> Result<(), crate::Error> + Send + Sync + 'static,
    {
        self.probe = Box::new(probe);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_auto_detected(&self) -> bool {
        self.auto_detect
    }

    /// Constructs and probes; panics count as failures. The panic hook is left alone.
    fn activate(&self, config: &Config) -> Result<Arc<dyn BackendFactory>, crate::Error> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            let factory = (self.construct)(config)?;
            (self.probe)(&*factory)?;
            Ok(factory)
        }))
        .unwrap_or_else(|payload| Err(crate::Error::ProbePanicked(panic_message(&*payload))))
    }
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("auto_detect", &self.auto_detect)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// The guaranteed last resort. Its constructor returns a factory, not a `Result`.
pub struct FallbackDescriptor {
    name: String,
    construct: FallbackConstructor,
}

impl FallbackDescriptor {
    pub fn new<F>(name: impl Into<String>, construct: F) -> Self
    where
        F: Fn(&Config) -> Arc<dyn BackendFactory> + Send + Sync + 'static,
    {
        Self {
            name: name.into().to_lowercase(),
            construct: Box::new(construct),
        }
    }

    /// The local backend configured from `[local]`.
    #[must_use]
    pub fn local() -> Self {
        Self::new("local", |config| {
            Arc::new(LocalFactory::from_config(config)) as Arc<dyn BackendFactory>
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FallbackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of backend selection.
#[derive(Clone)]
pub struct Selection {
    pub name: String,
    pub factory: Arc<dyn BackendFactory>,
    /// True when no preferred candidate worked and the fallback was used.
    pub fell_back: bool,
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("name", &self.name)
            .field("fell_back", &self.fell_back)
            .finish_non_exhaustive()
    }
}

/// Priority-ordered candidates followed by the fallback.
#[derive(Debug)]
pub struct BackendRegistry {
    candidates: Vec<BackendDescriptor>,
    fallback: FallbackDescriptor,
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BackendRegistry {
    /// Empty candidate list; only the fallback is known.
    #[must_use]
    pub const fn new(fallback: FallbackDescriptor) -> Self {
        Self {
            candidates: Vec::new(),
            fallback,
        }
    }

    /// `log`, then `journal` on unix, then `local`. `json` and `null` only by name.
    #[must_use]
    pub fn builtin() -> Self {
        let registry = Self::new(FallbackDescriptor::local()).register(BackendDescriptor::new(
            "log",
            |_config| Ok(Arc::new(LogBridgeFactory::detect()?) as Arc<dyn BackendFactory>),
        ));

        #[cfg(unix)]
        let registry = registry.register(BackendDescriptor::new("journal", |config| {
            Ok(Arc::new(super::JournalFactory::from_config(config)?) as Arc<dyn BackendFactory>)
        }));

        registry
            .register(
                BackendDescriptor::new("json", |config| {
                    Ok(Arc::new(JsonFactory::from_config(config)?) as Arc<dyn BackendFactory>)
                })
                .name_only(),
            )
            .register(
                BackendDescriptor::new("null", |_config| {
                    Ok(Arc::new(NullFactory) as Arc<dyn BackendFactory>)
                })
                .name_only(),
            )
    }

    /// Appends a candidate with the lowest priority so far; the fallback stays last.
    #[must_use]
    pub fn register(mut self, descriptor: BackendDescriptor) -> Self {
        self.candidates.retain(|d| d.name != descriptor.name);
        self.candidates.push(descriptor);
        self
    }

    /// Inserts a candidate ahead of every other one.
    #[must_use]
    pub fn register_first(mut self, descriptor: BackendDescriptor) -> Self {
        self.candidates.retain(|d| d.name != descriptor.name);
        self.candidates.insert(0, descriptor);
        self
    }

    /// Candidate names in priority order, fallback last.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .map(BackendDescriptor::name)
            .chain(std::iter::once(self.fallback.name()))
            .collect()
    }

    #[must_use]
    pub fn fallback_name(&self) -> &str {
        self.fallback.name()
    }

    /// Activates exactly the named backend, with no fallback.
    ///
    /// # Errors
    /// [`crate::Error::UnknownBackend`] or the candidate's own failure.
    pub fn select(&self, name: &str, config: &Config) -> Result<Selection, crate::Error> {
        let name = name.trim().to_lowercase();
        if name == self.fallback.name {
            return Ok(self.use_fallback(config, false));
        }
        let descriptor = self
            .candidates
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| crate::Error::UnknownBackend(name.clone()))?;
        Ok(Selection {
            name,
            factory: descriptor.activate(config)?,
            fell_back: false,
        })
    }

    /// Picks the backend for this process.
    ///
    /// A name requested by config is tried first. Then auto-detected
    /// candidates are tried in order; the first that constructs and passes
    /// its probe wins. If none does, the fallback is used. Each failure is
    /// written as one warning to `diagnostics`.
    pub fn resolve(&self, config: &Config, diagnostics: &dyn Backend) -> Selection {
        let requested = config.backend_name();

        if let Some(name) = requested.as_deref() {
            match self.select(name, config) {
                Ok(selection) => return selection,
                Err(crate::Error::UnknownBackend(_)) => diagnostics.write(
                    Level::Warning,
                    &format!(
                        "could not find backend '{name}' requested via {ENV_BACKEND} or general.backend, known backends: {}",
                        self.names().join(", ")
                    ),
                ),
                Err(e) => diagnostics.write(
                    Level::Warning,
                    &format!("requested backend '{name}' is unusable, detecting another: {e}"),
                ),
            }
        }

        for descriptor in self.candidates.iter().filter(|d| d.auto_detect) {
            if requested.as_deref() == Some(descriptor.name.as_str()) {
                continue;
            }
            match descriptor.activate(config) {
                Ok(factory) => {
                    return Selection {
                        name: descriptor.name.clone(),
                        factory,
                        fell_back: false,
                    };
                }
                Err(e) => diagnostics.write(
                    Level::Warning,
                    &format!(
                        "backend '{}' unavailable, trying next: {e}",
                        descriptor.name
                    ),
                ),
            }
        }

        self.use_fallback(config, true)
    }

    fn use_fallback(&self, config: &Config, fell_back: bool) -> Selection {
        Selection {
            name: self.fallback.name.clone(),
            factory: (self.fallback.construct)(config),
            fell_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_ends_with_fallback() {
        let registry = BackendRegistry::builtin();
        let names = registry.names();
        assert_eq!(names.first(), Some(&"log"));
        assert_eq!(names.last(), Some(&"local"));
        assert!(names.contains(&"json"));
        assert!(names.contains(&"null"));
    }

    #[test]
    fn register_replaces_same_name() {
        let registry = BackendRegistry::new(FallbackDescriptor::local())
            .register(BackendDescriptor::new("a", |_| {
                Err(crate::Error::Unavailable("first".into()))
            }))
            .register(BackendDescriptor::new("a", |_| {
                Ok(Arc::new(NullFactory) as Arc<dyn BackendFactory>)
            }));
        assert_eq!(registry.names(), vec!["a", "local"]);
    }

    #[test]
    fn panic_payloads_become_messages() {
        let registry = BackendRegistry::new(FallbackDescriptor::local()).register(
            BackendDescriptor::new("boom", |_| panic!("linkage broke")),
        );
        let err = registry.select("boom", &Config::default()).unwrap_err();
        assert!(err.to_string().contains("linkage broke"));
    }
}
