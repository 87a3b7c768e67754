use combat_core::{
    Card, CardPiles, CardTemplate, CombatSnapshot, EnemyRecord, PcgRng, PlayerRecord, TurnManager,
};
use tracing::{debug, warn};

use super::{CombatManager, SnapshotError};

impl CombatManager {
    /// Captures the full mutable state of this combat.
    pub fn snapshot(&self) -> CombatSnapshot {
        let player = &self.player;
        CombatSnapshot {
            status: self.status,
            rng_state: self.rng.state(),
            player: PlayerRecord {
                vitals: player.vitals,
                energy: player.energy,
                max_energy: player.max_energy,
                stats: player.stats,
                gold: player.gold,
                relic_counters: player
                    .relics()
                    .iter()
                    .map(|r| (r.id.clone(), r.counter))
                    .collect(),
                potions: player
                    .potions()
                    .iter()
                    .map(|slot| slot.as_ref().map(|p| p.id.clone()))
                    .collect(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyRecord {
                    id: e.id.clone(),
                    vitals: e.vitals,
                    stats: e.stats,
                    current_intent: e.current_intent,
                })
                .collect(),
            piles: self.piles.record(),
            turn: self.turns.record(),
            pending_energy_bonus: self.relics.pending_energy(),
        }
    }

    /// Restores a snapshot taken from a combat with the same enemy roster.
    ///
    /// Cards are rebuilt through `lookup`, which maps a card id to its
    /// template; upgraded records are upgraded again and every rebuilt card
    /// gets a fresh uid. Returns the number of cards `lookup` could not
    /// resolve. The roster is checked before anything is overwritten.
    pub fn apply_snapshot<F>(
        &mut self,
        snapshot: &CombatSnapshot,
        mut lookup: F,
    ) -> Result<usize, SnapshotError>
    where
        F: FnMut(&str) -> Option<CardTemplate>,
    {
        if snapshot.enemies.len() != self.enemies.len() {
            return Err(SnapshotError::EnemyCountMismatch {
                expected: self.enemies.len(),
                found: snapshot.enemies.len(),
            });
        }
        for (index, (record, enemy)) in snapshot.enemies.iter().zip(&self.enemies).enumerate() {
            if record.id != enemy.id {
                return Err(SnapshotError::EnemyMismatch {
                    index,
                    expected: enemy.id.clone(),
                    found: record.id.clone(),
                });
            }
        }

        for (record, enemy) in snapshot.enemies.iter().zip(self.enemies.iter_mut()) {
            enemy.vitals = record.vitals;
            enemy.stats = record.stats;
            enemy.current_intent = record.current_intent.filter(|&i| i < enemy.moves.len());
        }

        let player = &mut self.player;
        let (piles, missing) = CardPiles::from_record(&snapshot.piles, |record| {
            let template = lookup(&record.id)?;
            let mut card = Card::from_template(player.allocate_uid(), &template);
            if record.upgraded {
                card.upgrade();
            }
            Some(card)
        });
        if missing > 0 {
            warn!(
                target: "combat::engine",
                missing,
                total = snapshot.piles.total(),
                "Snapshot cards without a template were dropped"
            );
        }
        self.piles = piles;

        let record = &snapshot.player;
        let player = &mut self.player;
        player.vitals = record.vitals;
        player.energy = record.energy;
        player.max_energy = record.max_energy;
        player.stats = record.stats;
        player.gold = record.gold;

        for (relic, (id, counter)) in player.relics_mut().iter_mut().zip(&record.relic_counters) {
            if relic.id == *id {
                relic.counter = *counter;
            }
        }

        for (slot, saved) in record.potions.iter().enumerate() {
            let current = player.potion(slot).map(|p| p.id.as_str());
            if current.is_some() && current != saved.as_deref() {
                player.take_potion(slot);
            }
        }

        self.turns = TurnManager::from_record(&snapshot.turn);
        self.status = snapshot.status;
        self.rng = PcgRng::from_state(snapshot.rng_state);
        self.relics.restore_pending_energy(snapshot.pending_energy_bonus);

        debug!(
            target: "combat::engine",
            turn = self.turns.turn(),
            status = ?self.status,
            "Snapshot restored"
        );
        Ok(missing)
    }
}
