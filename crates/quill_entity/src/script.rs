//! Entity script definitions and their compiled form.
//!
//! A [`ScriptSource`] is the raw text a loader read from a script file.
//! [`EntityScript::compile`] turns every field into an [`Argument`] once, so
//! resolution never parses text again.

use std::fmt;
use std::sync::{Arc, OnceLock};

use quill_foundation::{Error, ErrorContext, Result, Value};
use quill_tags::Argument;

use crate::keys::normalize_key;
use crate::template::EntityTemplate;

/// Raw text of one AI task entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskSource {
    /// Task type name.
    pub task_type: String,
    /// Parameter name and raw value pairs, in declaration order.
    pub params: Vec<(String, String)>,
}

impl TaskSource {
    /// Creates a task entry.
    #[must_use]
    pub fn new(task_type: &str) -> Self {
        Self {
            task_type: task_type.to_string(),
            params: Vec::new(),
        }
    }

    /// Builder method to add a parameter.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }
}

/// Raw text of an entity script, as read by a loader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptSource {
    /// Script name as written.
    pub name: String,
    /// `base`: a native type or another script.
    pub base: Option<String>,
    /// `display name`.
    pub display_name: Option<String>,
    /// `plain`: suppresses the identity flag when true.
    pub plain: Option<String>,
    /// `static`: resolve once at load.
    pub is_static: Option<String>,
    /// `flags` section.
    pub flags: Vec<(String, String)>,
    /// `keys` section.
    pub keys: Vec<(String, String)>,
    /// `ai tasks` section.
    pub ai_tasks: Vec<TaskSource>,
}

impl ScriptSource {
    /// Creates an empty source with the given name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set `base`.
    #[must_use]
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.to_string());
        self
    }

    /// Builder method to set `display name`.
    #[must_use]
    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    /// Builder method to set `plain`.
    #[must_use]
    pub fn with_plain(mut self, plain: &str) -> Self {
        self.plain = Some(plain.to_string());
        self
    }

    /// Builder method to set `static`.
    #[must_use]
    pub fn with_static(mut self, is_static: &str) -> Self {
        self.is_static = Some(is_static.to_string());
        self
    }

    /// Builder method to add a flag.
    #[must_use]
    pub fn with_flag(mut self, name: &str, value: &str) -> Self {
        self.flags.push((name.to_string(), value.to_string()));
        self
    }

    /// Builder method to add a property key.
    #[must_use]
    pub fn with_key(mut self, name: &str, value: &str) -> Self {
        self.keys.push((name.to_string(), value.to_string()));
        self
    }

    /// Builder method to add an AI task.
    #[must_use]
    pub fn with_task(mut self, task: TaskSource) -> Self {
        self.ai_tasks.push(task);
        self
    }
}

/// Caching policy of a script.
pub enum Caching {
    /// Resolved once at load; every use gets a copy of the cached template.
    Static(OnceLock<EntityTemplate>),
    /// Resolved afresh on every use.
    Dynamic,
}

impl fmt::Debug for Caching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(cell) if cell.get().is_some() => f.write_str("Static(cached)"),
            Self::Static(_) => f.write_str("Static(pending)"),
            Self::Dynamic => f.write_str("Dynamic"),
        }
    }
}

/// A compiled AI task entry.
#[derive(Clone, Debug)]
pub struct CompiledTask {
    /// Task type name, lowercased.
    pub task_type: Arc<str>,
    /// Parameters, keyed by lowercase name.
    pub params: Vec<(Arc<str>, Argument)>,
}

/// An entity script with every field compiled.
#[derive(Debug)]
pub struct EntityScript {
    name: Arc<str>,
    title: String,
    base: Argument,
    display_name: Option<Argument>,
    plain: Option<Argument>,
    flags: Vec<(Arc<str>, Argument)>,
    keys: Vec<(String, Argument)>,
    tasks: Vec<CompiledTask>,
    caching: Caching,
}

impl EntityScript {
    /// Compiles a script source.
    ///
    /// # Errors
    /// Fails if `base` is missing, `static` is not a boolean literal, or any
    /// field does not compile.
    pub fn compile(source: &ScriptSource) -> Result<Self> {
        let title = source.name.trim().to_string();
        if title.is_empty() {
            return Err(Error::malformed_script("", "script has no name"));
        }
        let compile = |field: &str, raw: &str| {
            Argument::compile(raw).map_err(|e| {
                e.with_context(
                    ErrorContext::new()
                        .with_source(title.clone())
                        .with_frame(field.to_string()),
                )
            })
        };

        let base = source
            .base
            .as_deref()
            .ok_or_else(|| Error::malformed_script(&title, "base key is missing"))?;
        let base = compile("base", base)?;

        let caching = match source.is_static.as_deref() {
            None => Caching::Dynamic,
            Some(raw) => match Value::text(raw).to_boolean() {
                Ok(true) => Caching::Static(OnceLock::new()),
                Ok(false) => Caching::Dynamic,
                Err(_) => {
                    return Err(Error::malformed_script(
                        &title,
                        format!("'static' must be true or false, got '{raw}'"),
                    ));
                }
            },
        };

        let display_name = source
            .display_name
            .as_deref()
            .map(|raw| compile("display name", raw))
            .transpose()?;
        let plain = source
            .plain
            .as_deref()
            .map(|raw| compile("plain", raw))
            .transpose()?;

        let flags = source
            .flags
            .iter()
            .map(|(name, raw)| {
                let arg = compile(&format!("flags.{name}"), raw)?;
                Ok((Arc::from(name.trim().to_lowercase().as_str()), arg))
            })
            .collect::<Result<Vec<_>>>()?;

        let keys = source
            .keys
            .iter()
            .map(|(name, raw)| Ok((normalize_key(name), compile(&format!("keys.{name}"), raw)?)))
            .collect::<Result<Vec<_>>>()?;

        let tasks = source
            .ai_tasks
            .iter()
            .map(|task| {
                let params = task
                    .params
                    .iter()
                    .map(|(name, raw)| {
                        let arg = compile(&format!("ai tasks.{}.{name}", task.task_type), raw)?;
                        Ok((Arc::from(name.trim().to_lowercase().as_str()), arg))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledTask {
                    task_type: task.task_type.trim().to_lowercase().into(),
                    params,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: title.to_lowercase().into(),
            title,
            base,
            display_name,
            plain,
            flags,
            keys,
            tasks,
            caching,
        })
    }

    /// Returns the lowercased registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name as written.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the compiled `base`.
    #[must_use]
    pub fn base(&self) -> &Argument {
        &self.base
    }

    /// Returns the compiled `display name`.
    #[must_use]
    pub fn display_name(&self) -> Option<&Argument> {
        self.display_name.as_ref()
    }

    /// Returns the compiled `plain`.
    #[must_use]
    pub fn plain(&self) -> Option<&Argument> {
        self.plain.as_ref()
    }

    /// Returns the compiled flags.
    #[must_use]
    pub fn flags(&self) -> &[(Arc<str>, Argument)] {
        &self.flags
    }

    /// Returns the compiled keys, with normalized names.
    #[must_use]
    pub fn keys(&self) -> &[(String, Argument)] {
        &self.keys
    }

    /// Returns the compiled AI tasks.
    #[must_use]
    pub fn tasks(&self) -> &[CompiledTask] {
        &self.tasks
    }

    /// Returns the caching policy.
    #[must_use]
    pub fn caching(&self) -> &Caching {
        &self.caching
    }

    /// Returns true for static scripts.
    #[must_use]
    pub fn is_static(&self) -> bool {
        matches!(self.caching, Caching::Static(_))
    }

    /// Returns the cached template of a static script, once resolved.
    #[must_use]
    pub fn cached(&self) -> Option<&EntityTemplate> {
        match &self.caching {
            Caching::Static(cell) => cell.get(),
            Caching::Dynamic => None,
        }
    }

    /// Stores the template of a static script. The first stored template wins.
    pub(crate) fn cache(&self, template: EntityTemplate) {
        if let Caching::Static(cell) = &self.caching {
            let _ = cell.set(template);
        }
    }
}
