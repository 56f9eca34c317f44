//! Process-level state: the configuration, the backend registry, the cached
//! backend selection, and the global override.
//!
//! Everything lives in one [`LoggerFactory`] value. Applications may hold
//! their own or use the lazily created process-wide one behind [`global`].

use super::{GlobalLevel, Logger};
use crate::backend::{Backend, BackendFactory, BackendRegistry, LocalFactory, Selection};
use crate::config::Config;
use crate::internal;
use crate::level::Level;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Hands out loggers bound to the resolved backend.
pub struct LoggerFactory {
    registry: BackendRegistry,
    config: Config,
    diagnostics: Arc<dyn Backend>,
    global_level: Arc<GlobalLevel>,
    resolved: RwLock<Option<Selection>>,
    override_factory: RwLock<Option<Arc<dyn BackendFactory>>>,
    local_fallback: OnceLock<LocalFactory>,
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LoggerFactory {
    #[must_use]
    pub fn builder() -> LoggerFactoryBuilder {
        LoggerFactoryBuilder::default()
    }

    /// Built-in registry and diagnostics with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    /// Loads configuration the usual way. A broken config file is reported
    /// and replaced by defaults plus environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            internal::warn(&format!("using default configuration: {e}"));
            let mut config = Config::default();
            config.apply_env(|key| std::env::var(key).ok());
            config
        });
        Self::new(config)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// A logger named `name` (typically `module_path!()`).
    ///
    /// If the selected backend cannot create one, a warning is written and
    /// the logger uses a local backend instead.
    #[must_use]
    pub fn get_logger(&self, name: &str) -> Logger {
        let factory = self.active_factory();
        let backend = factory.create_backend(name).unwrap_or_else(|e| {
            self.diagnostics.write(
                Level::Warning,
                &format!("backend could not create logger '{name}', using local: {e}"),
            );
            Arc::new(self.local_fallback().create(name)) as Arc<dyn Backend>
        });
        Logger::new(name, backend, Arc::clone(&self.global_level))
    }

    /// Resolves the backend on first use and caches it.
    ///
    /// Concurrent first calls may each resolve (and warn); the first result
    /// stored is the one everyone keeps.
    #[must_use]
    pub fn selection(&self) -> Selection {
        if let Some(selection) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return selection.clone();
        }

        let computed = self.registry.resolve(&self.config, &*self.diagnostics);
        self.resolved
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(computed)
            .clone()
    }

    /// Name of the backend new loggers will use; `"custom"` while an override is set.
    #[must_use]
    pub fn backend_name(&self) -> String {
        if self.override_factory().is_some() {
            return "custom".to_string();
        }
        self.selection().name
    }

    /// Bypasses selection for every logger created afterwards. `None` restores it.
    pub fn set_backend_factory(&self, factory: Option<Arc<dyn BackendFactory>>) {
        *self
            .override_factory
            .write()
            .unwrap_or_else(PoisonError::into_inner) = factory;
    }

    /// Sets or clears the override. Existing loggers see the change at once.
    pub fn set_global_level(&self, level: Option<Level>) {
        self.global_level.set(level);
    }

    #[must_use]
    pub fn global_level(&self) -> Option<Level> {
        self.global_level.get()
    }

    /// Forgets the cached selection and the factory override, and restores
    /// the global level from configuration. Loggers created earlier keep
    /// their backend.
    pub fn reset(&self) {
        *self.resolved.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.set_backend_factory(None);
        self.global_level.set(self.config.parse_global_level());
    }

    fn override_factory(&self) -> Option<Arc<dyn BackendFactory>> {
        self.override_factory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Built on the first failed `get_logger` and shared by every later one.
    fn local_fallback(&self) -> &LocalFactory {
        self.local_fallback.get_or_init(|| LocalFactory::from_config(&self.config))
    }

    fn active_factory(&self) -> Arc<dyn BackendFactory> {
        self.override_factory()
            .unwrap_or_else(|| self.selection().factory)
    }
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("registry", &self.registry)
            .field("global_level", &self.global_level.get())
            .field(
                "resolved",
                &*self.resolved.read().unwrap_or_else(PoisonError::into_inner),
            )
            .finish_non_exhaustive()
    }
}

/// Stepwise construction of a [`LoggerFactory`].
#[derive(Default)]
pub struct LoggerFactoryBuilder {
    registry: Option<BackendRegistry>,
    config: Option<Config>,
    diagnostics: Option<Arc<dyn Backend>>,
    global_level: Option<Level>,
    backend_factory: Option<Arc<dyn BackendFactory>>,
}

impl LoggerFactoryBuilder {
    /// Replaces the built-in registry.
    #[must_use]
    pub fn registry(mut self, registry: BackendRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Where selection warnings go; stderr when unset.
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn Backend>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Takes precedence over `general.global_level`.
    #[must_use]
    pub const fn global_level(mut self, level: Level) -> Self {
        self.global_level = Some(level);
        self
    }

    /// Starts with a factory override already in place.
    #[must_use]
    pub fn backend_factory(mut self, factory: Arc<dyn BackendFactory>) -> Self {
        self.backend_factory = Some(factory);
        self
    }

    #[must_use]
    pub fn build(self) -> LoggerFactory {
        let config = self.config.unwrap_or_default();
        let global = self.global_level.or_else(|| config.parse_global_level());
        LoggerFactory {
            registry: self.registry.unwrap_or_else(BackendRegistry::builtin),
            diagnostics: self.diagnostics.unwrap_or_else(internal::diagnostics),
            global_level: Arc::new(GlobalLevel::new(global)),
            resolved: RwLock::new(None),
            override_factory: RwLock::new(self.backend_factory),
            local_fallback: OnceLock::new(),
            config,
        }
    }
}

impl fmt::Debug for LoggerFactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerFactoryBuilder")
            .field("registry", &self.registry)
            .field("global_level", &self.global_level)
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<LoggerFactory> = OnceLock::new();

/// The process-wide factory, created from the environment on first use
/// unless [`install`] ran earlier.
pub fn global() -> &'static LoggerFactory {
    GLOBAL.get_or_init(LoggerFactory::from_env)
}

/// Makes `factory` the process-wide one.
///
/// # Errors
/// Gives the factory back if [`global`] was already initialized.
pub fn install(factory: LoggerFactory) -> Result<(), LoggerFactory> {
    GLOBAL.set(factory)
}

/// Shorthand for `global().get_logger(name)`.
#[must_use]
pub fn get_logger(name: &str) -> Logger {
    global().get_logger(name)
}

/// Shorthand for `global().set_global_level(level)`.
pub fn set_global_level(level: Option<Level>) {
    global().set_global_level(level);
}

/// Shorthand for `global().set_backend_factory(factory)`.
pub fn set_backend_factory(factory: Option<Arc<dyn BackendFactory>>) {
    global().set_backend_factory(factory);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{NullBackend, NullFactory};
    use std::fs;

    #[test]
    fn builder_level_beats_config() {
        let mut config = Config::default();
        config.general.global_level = Some("error".into());
        let factory = LoggerFactory::builder()
            .config(config)
            .global_level(Level::Debug)
            .build();
        assert_eq!(factory.global_level(), Some(Level::Debug));
        factory.reset();
        assert_eq!(factory.global_level(), Some(Level::Error));
    }

    #[test]
    fn override_is_reported_as_custom() {
        let factory = LoggerFactory::builder()
            .backend_factory(Arc::new(NullFactory))
            .build();
        assert_eq!(factory.backend_name(), "custom");
        assert!(!factory.get_logger("x").is_level_enabled(Level::Fatal));
    }

    #[cfg(unix)]
    #[test]
    fn failed_creations_share_one_local_fallback() {
        let tmp_dir = tempfile::TempDir::new().unwrap();
        let path = tmp_dir.path().join("fallback.log");
        let moved = tmp_dir.path().join("moved.log");
        let mut config = Config::default();
        config.local.file = Some(path.to_string_lossy().into_owned());

        let broken = |_: &str| -> Result<Arc<dyn Backend>, crate::Error> {
            Err(crate::Error::Unavailable("down".into()))
        };
        let factory = LoggerFactory::builder()
            .config(config)
            .diagnostics(Arc::new(NullBackend))
            .backend_factory(Arc::new(broken))
            .build();

        factory.get_logger("first").info("one", &[]);
        assert!(factory.local_fallback.get().is_some());

        // A reopened file would land back at `path`.
        fs::rename(&path, &moved).unwrap();
        let second = factory.get_logger("second");
        second.info("two", &[]);
        second.flush().unwrap();

        assert!(!path.exists());
        let content = fs::read_to_string(&moved).unwrap();
        assert!(content.contains("first one"));
        assert!(content.contains("second two"));
    }
}
