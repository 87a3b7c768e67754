//! Name-keyed effect dispatch for cards, relics and potions.
//!
//! Each content effect carries a string key (`"DAMAGE"`, `"GAIN_BLOCK"`, …).
//! [`EffectRegistry`] maps keys to [`EffectHandler`]s, and every handler runs
//! against the same [`EffectContext`] shape regardless of which table it came
//! from.
//!
//! # Extending
//!
//! New effect types are added by registering a handler; nothing in the engine
//! matches on effect names:
//!
//! ```ignore
//! registries.cards.register_fn("DOUBLE_BLOCK", |_effect: &CardEffect, ctx: &mut EffectContext<'_>| {
//!     let block = ctx.player.vitals.block;
//!     ctx.player.vitals.add_block(block);
//!     EffectOutcome::applied(block)
//! });
//! ```
//!
//! Unregistered keys log a warning and report [`EffectOutcome::unhandled`].

mod cards;
mod context;
mod potions;
mod registry;
mod relics;

pub use cards::CardEffectKind;
pub use context::EffectContext;
pub use potions::PotionEffectKind;
pub use registry::{EffectRegistries, EffectRegistry};
pub use relics::{PassiveAction, RelicAction};

use combat_core::{CardEffect, PotionEffect, RelicEffect};

/// Result of running one effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub success: bool,
    /// Effect-specific magnitude (damage dealt, block gained, cards drawn, …).
    pub amount: u32,
}

impl EffectOutcome {
    pub fn applied(amount: u32) -> Self {
        Self {
            success: true,
            amount,
        }
    }

    /// The effect had nothing to act on, or its key is unknown.
    pub fn unhandled() -> Self {
        Self::default()
    }
}

/// Executes one kind of effect against the combat context.
pub trait EffectHandler<E>: Send + Sync {
    fn apply(&self, effect: &E, ctx: &mut EffectContext<'_>) -> EffectOutcome;
}

impl<E, F> EffectHandler<E> for F
where
    F: Fn(&E, &mut EffectContext<'_>) -> EffectOutcome + Send + Sync,
{
    fn apply(&self, effect: &E, ctx: &mut EffectContext<'_>) -> EffectOutcome {
        self(effect, ctx)
    }
}

/// Content effects that carry a registry key.
pub trait EffectKey {
    fn key(&self) -> &str;
}

impl EffectKey for CardEffect {
    fn key(&self) -> &str {
        &self.kind
    }
}

impl EffectKey for RelicEffect {
    fn key(&self) -> &str {
        &self.action
    }
}

impl EffectKey for PotionEffect {
    fn key(&self) -> &str {
        &self.kind
    }
}

/// Clamps a signed effect value to a stack/amount count.
pub(crate) fn stacks(value: i32) -> u32 {
    value.max(0) as u32
}
