//! Effect registry for looking up and executing effect handlers.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{CardEffect, PotionEffect, RelicEffect};
use tracing::warn;

use super::{EffectContext, EffectHandler, EffectKey, EffectOutcome};

/// String-keyed table of handlers for one effect family.
pub struct EffectRegistry<E> {
    family: &'static str,
    handlers: HashMap<String, Arc<dyn EffectHandler<E>>>,
}

impl<E: EffectKey> EffectRegistry<E> {
    /// Creates an empty registry. `family` names the table in log output.
    pub fn new(family: &'static str) -> Self {
        Self {
            family,
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler, returning the one it replaced.
    pub fn register<H>(&mut self, key: impl AsRef<str>, handler: H) -> Option<Arc<dyn EffectHandler<E>>>
    where
        H: EffectHandler<E> + 'static,
    {
        self.handlers
            .insert(key.as_ref().to_owned(), Arc::new(handler))
    }

    /// Registers a plain function or closure as a handler.
    pub fn register_fn<F>(&mut self, key: impl AsRef<str>, handler: F) -> Option<Arc<dyn EffectHandler<E>>>
    where
        F: Fn(&E, &mut EffectContext<'_>) -> EffectOutcome + Send + Sync + 'static,
    {
        self.register(key, handler)
    }

    /// Finds a handler by key.
    pub fn find(&self, key: &str) -> Option<&Arc<dyn EffectHandler<E>>> {
        self.handlers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns an iterator over registered keys (for debugging).
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.handlers.keys().map(String::as_str)
    }

    /// Runs the handler registered for the effect's key.
    ///
    /// Unknown keys are a warning, never an error: the effect is skipped.
    pub fn execute(&self, effect: &E, ctx: &mut EffectContext<'_>) -> EffectOutcome {
        let key = effect.key();
        match self.handlers.get(key) {
            Some(handler) => handler.apply(effect, ctx),
            None => {
                warn!(
                    target: "combat::effects",
                    family = self.family,
                    effect = key,
                    "Unknown effect type, skipping"
                );
                EffectOutcome::unhandled()
            }
        }
    }
}

impl<E> Clone for EffectRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            family: self.family,
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> std::fmt::Debug for EffectRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort();
        f.debug_struct("EffectRegistry")
            .field("family", &self.family)
            .field("keys", &keys)
            .finish()
    }
}

/// The three dispatch tables consulted by the combat manager.
#[derive(Clone, Debug)]
pub struct EffectRegistries {
    pub cards: EffectRegistry<CardEffect>,
    pub relics: EffectRegistry<RelicEffect>,
    pub potions: EffectRegistry<PotionEffect>,
}

impl EffectRegistries {
    /// Empty tables: every effect is unknown until registered.
    pub fn empty() -> Self {
        Self {
            cards: EffectRegistry::new("card"),
            relics: EffectRegistry::new("relic"),
            potions: EffectRegistry::new("potion"),
        }
    }

    /// Tables pre-populated with the built-in effect catalogue.
    pub fn with_defaults() -> Self {
        let mut registries = Self::empty();
        super::cards::register_defaults(&mut registries.cards);
        super::relics::register_defaults(&mut registries.relics);
        super::potions::register_defaults(&mut registries.potions);
        registries
    }
}

impl Default for EffectRegistries {
    fn default() -> Self {
        Self::with_defaults()
    }
}
