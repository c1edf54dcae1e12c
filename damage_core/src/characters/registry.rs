//! Character registry - Name to handler dispatch table

use super::result::DamageResult;
use super::{comparison, crit_search, hp_alteration, hp_threshold, lost_hp, standard};
use crate::damage::DamagePipeline;
use crate::error::{CalcError, Result};
use crate::input::ResolvedInputs;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Character-specific calculation over the shared pipeline
pub type CharacterHandler = fn(&ResolvedInputs, &DamagePipeline) -> Result<DamageResult>;

/// Characters available out of the box
const BUILTINS: &[(&str, CharacterHandler)] = &[
    ("standard", standard::standard),
    ("miho", standard::standard),
    ("pascal", standard::standard),
    ("rachel", standard::standard),
    ("teo", standard::standard),
    ("yeonhee", standard::standard),
    ("freyja", hp_alteration::hp_alteration),
    ("espada", lost_hp::espada),
    ("klahan", hp_threshold::klahan),
    ("biscuit", comparison::biscuit),
    ("ryan", crit_search::ryan),
];

static REGISTRY: Lazy<CharacterRegistry> = Lazy::new(|| {
    CharacterRegistry::with_defaults().expect("built-in character names are unique")
});

/// Process-wide registry holding the built-in characters
pub fn registry() -> &'static CharacterRegistry {
    &REGISTRY
}

/// Character handler registry
#[derive(Clone, Default)]
pub struct CharacterRegistry {
    /// Lower-cased character name to handler
    handlers: HashMap<String, CharacterHandler>,
}

impl CharacterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        CharacterRegistry {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under a name not yet taken
    pub fn register(&mut self, name: &str, handler: CharacterHandler) -> Result<()> {
        let key = normalize(name);
        if self.handlers.contains_key(&key) {
            return Err(CalcError::DuplicateCharacter(key));
        }
        debug!(character = %key, "Registered character handler");
        self.handlers.insert(key, handler);
        Ok(())
    }

    /// Get a handler by character name
    pub fn get(&self, name: &str) -> Result<CharacterHandler> {
        self.handlers
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| CalcError::UnknownCharacter(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&normalize(name))
    }

    /// Registered names, sorted
    pub fn list_registered(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Look up `name` and run its handler
    pub fn dispatch(
        &self,
        name: &str,
        inputs: &ResolvedInputs,
        pipeline: &DamagePipeline,
    ) -> Result<DamageResult> {
        let handler = self.get(name)?;
        let key = normalize(name);
        debug!(character = %key, inputs = inputs.len(), "Dispatching character handler");

        let mut result = handler(inputs, pipeline)?;
        result.character = key;
        Ok(result)
    }

    /// Registry with every built-in character
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        for (name, handler) in BUILTINS {
            registry.register(name, *handler)?;
        }
        Ok(registry)
    }
}

impl fmt::Debug for CharacterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterRegistry")
            .field("characters", &self.list_registered())
            .finish()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
