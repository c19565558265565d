//! Engine configuration.

/// Settings shared by the registry, resolver and spawn planner.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Namespace applied to unqualified native type names.
    ///
    /// Type lookups belong to the host's [`NativeTypeDirectory`], so this is
    /// only read when building one; see [`TypeTable::for_config`].
    ///
    /// [`NativeTypeDirectory`]: crate::NativeTypeDirectory
    /// [`TypeTable::for_config`]: crate::TypeTable::for_config
    pub default_namespace: String,

    /// Flag key that records which script produced a template.
    pub script_flag: String,

    /// Longest inheritance chain accepted before resolution gives up.
    pub max_inheritance_depth: usize,

    /// Warn when a script shares its name with a native entity type.
    pub warn_on_type_collision: bool,

    /// Refuse to load scripts whose name collides with a native entity type.
    pub reject_type_collisions: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_namespace: "minecraft".to_string(),
            script_flag: "_d2_script".to_string(),
            max_inheritance_depth: 64,
            warn_on_type_collision: true,
            reject_type_collisions: false,
        }
    }
}

impl EngineConfig {
    /// Creates a configuration that fails scripts shadowing native types.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reject_type_collisions: true,
            ..Self::default()
        }
    }

    /// Builder method to set the default namespace.
    #[must_use]
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.default_namespace = namespace.into();
        self
    }

    /// Builder method to set the identity flag key.
    #[must_use]
    pub fn with_script_flag(mut self, flag: impl Into<String>) -> Self {
        self.script_flag = flag.into().to_lowercase();
        self
    }

    /// Builder method to set the maximum inheritance depth.
    #[must_use]
    pub fn with_max_inheritance_depth(mut self, depth: usize) -> Self {
        self.max_inheritance_depth = depth;
        self
    }

    /// Builder method to enable/disable collision warnings.
    #[must_use]
    pub fn with_warn_on_type_collision(mut self, warn: bool) -> Self {
        self.warn_on_type_collision = warn;
        self
    }
}
