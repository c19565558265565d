//! The script registry and the collaborators resolution needs.
//!
//! The registry has a two-phase lifecycle: [`ScriptRegistry::load`] clears
//! and repopulates it, after which it is only read. It is passed explicitly
//! to whatever resolves scripts; there is no global instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use quill_foundation::{Error, ErrorContext};
use quill_tags::{TagContext, TagRegistry};
use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::directory::{register_entity_tags, NativeTypeDirectory, TaskTypeDirectory, TypeCategory};
use crate::keys::PropertyKeyMapper;
use crate::resolver::TemplateResolver;
use crate::script::{EntityScript, ScriptSource};

/// Everything resolution depends on besides the scripts themselves.
#[derive(Clone, Debug)]
pub struct Environment {
    /// Tag handlers, including the entity tags.
    pub tags: TagRegistry,
    /// Native entity types.
    pub types: Arc<dyn NativeTypeDirectory>,
    /// Property keys.
    pub keys: PropertyKeyMapper,
    /// AI task types.
    pub tasks: Arc<dyn TaskTypeDirectory>,
    /// Settings.
    pub config: EngineConfig,
}

impl Environment {
    /// Creates an environment with the core and entity tags and the
    /// standard property keys.
    pub fn new(
        types: impl NativeTypeDirectory + 'static,
        tasks: impl TaskTypeDirectory + 'static,
    ) -> Self {
        let types: Arc<dyn NativeTypeDirectory> = Arc::new(types);
        let mut tags = TagRegistry::standard();
        register_entity_tags(&mut tags, Arc::clone(&types));
        Self {
            tags,
            types,
            keys: PropertyKeyMapper::standard(),
            tasks: Arc::new(tasks),
            config: EngineConfig::default(),
        }
    }

    /// Builder method to replace the property keys.
    #[must_use]
    pub fn with_keys(mut self, keys: PropertyKeyMapper) -> Self {
        self.keys = keys;
        self
    }

    /// Builder method to replace the configuration.
    ///
    /// The type directory is left as it is. Build it with
    /// [`TypeTable::for_config`] to share the configured namespace.
    ///
    /// [`TypeTable::for_config`]: crate::TypeTable::for_config
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

/// A script that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    /// Script name.
    pub script: String,
    /// Why it failed.
    pub error: Error,
}

/// Outcome of [`ScriptRegistry::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of the scripts that are now registered, sorted.
    pub loaded: Vec<String>,
    /// Scripts that were dropped.
    pub failures: Vec<LoadFailure>,
    /// Problems that did not stop a script from loading.
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// Returns true if every script loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the failure recorded for a script.
    #[must_use]
    pub fn failure(&self, script: &str) -> Option<&LoadFailure> {
        let script = script.to_lowercase();
        self.failures.iter().find(|f| f.script == script)
    }
}

/// Registered entity scripts, keyed by lowercase name.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: HashMap<String, Arc<EntityScript>>,
}

impl ScriptRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the registry contents with `sources`.
    ///
    /// Scripts that fail to compile are dropped. Static scripts are then
    /// resolved once with no caller; those that fail are dropped as well,
    /// along with static scripts that depended on them.
    pub fn load(
        &mut self,
        sources: impl IntoIterator<Item = ScriptSource>,
        env: &Environment,
    ) -> LoadReport {
        self.clear();
        let mut report = LoadReport::default();

        for source in sources {
            let script = match EntityScript::compile(&source) {
                Ok(script) => script,
                Err(err) => {
                    error!("Entity script {} failed to compile: {}", source.name, err);
                    report.failures.push(LoadFailure {
                        script: source.name.trim().to_lowercase(),
                        error: err,
                    });
                    continue;
                }
            };
            let name = script.name().to_string();

            if env.types.lookup(TypeCategory::Entity, &name).is_some() {
                if env.config.reject_type_collisions {
                    let err = Error::malformed_script(
                        &name,
                        "a native entity type exists with that id",
                    );
                    error!("Entity script {} rejected: {}", name, err);
                    report.failures.push(LoadFailure { script: name, error: err });
                    continue;
                }
                if env.config.warn_on_type_collision {
                    let message = format!(
                        "entity script {name} may be unusable: a native entity type exists with that id"
                    );
                    warn!("{}", message);
                    report.warnings.push(message);
                }
            }

            if self.scripts.contains_key(&name) {
                let message = format!("entity script {name} is defined more than once; the last definition wins");
                warn!("{}", message);
                report.warnings.push(message);
            }
            self.scripts.insert(name, Arc::new(script));
        }

        let mut statics: Vec<String> = self
            .scripts
            .values()
            .filter(|s| s.is_static())
            .map(|s| s.name().to_string())
            .collect();
        statics.sort();

        for name in statics {
            // A failing dependency may already have taken this script out.
            if !self.scripts.contains_key(&name) {
                continue;
            }
            let result = TemplateResolver::new(self, env).resolve(&name, &TagContext::static_sentinel());
            match result {
                Ok(template) => debug!("Static entity script {} cached: {}", name, template.describe()),
                Err(err) => {
                    error!("Entity generation for {}: {}", name, err);
                    self.scripts.remove(&name);
                    report.failures.push(LoadFailure {
                        script: name,
                        error: err,
                    });
                }
            }
        }

        let mut loaded: Vec<String> = self.scripts.keys().cloned().collect();
        loaded.sort();
        report.loaded = loaded;

        info!(
            "Loaded {} entity scripts ({} failed, {} warnings)",
            report.loaded.len(),
            report.failures.len(),
            report.warnings.len()
        );
        report
    }

    /// Looks up a script, case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<EntityScript>> {
        self.scripts.get(&name.trim().to_lowercase())
    }

    /// Returns true if a script of this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.scripts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered scripts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    /// Returns true if no scripts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Removes every script.
    pub fn clear(&mut self) {
        self.scripts.clear();
    }
}

impl fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("scripts", &self.names())
            .finish()
    }
}

/// Attaches the script name to an error that has no context yet.
pub(crate) fn in_script(err: Error, script: &str, frame: &str) -> Error {
    if err.context.is_some() {
        return err;
    }
    err.with_context(ErrorContext::new().with_source(script).with_frame(frame))
}
