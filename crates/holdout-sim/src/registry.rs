//! Live enemies of the current wave.

use std::collections::HashSet;

use hecs::Entity;

/// Set of enemies spawned for the active wave and not yet dead.
#[derive(Debug, Default)]
pub struct EnemyRegistry {
    alive: HashSet<Entity>,
}

impl EnemyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, enemy: Entity) {
        self.alive.insert(enemy);
    }

    /// Remove a dead enemy. Returns `false` if it was not registered,
    /// which makes repeated death reports harmless.
    pub fn remove(&mut self, enemy: Entity) -> bool {
        self.alive.remove(&enemy)
    }

    pub fn contains(&self, enemy: Entity) -> bool {
        self.alive.contains(&enemy)
    }

    pub fn len(&self) -> usize {
        self.alive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Empty the registry, handing back everything that was in it.
    pub fn drain(&mut self) -> Vec<Entity> {
        let mut enemies: Vec<Entity> = self.alive.drain().collect();
        enemies.sort_by_key(|e| e.to_bits());
        enemies
    }
}
