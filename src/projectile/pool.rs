//! Projectile Pool
//!
//! Bounded budget of live projectiles. Spawners must acquire a slot
//! before spawning; when no slot is free the spawn is skipped, never an
//! error. Slots are plain indices on a free list; the Bevy entity is
//! the actual storage.

use bevy::prelude::*;

use crate::combat::constants::DEFAULT_PROJECTILE_CAPACITY;

#[derive(Resource)]
pub struct ProjectilePool {
    capacity: usize,
    free: Vec<usize>,
    /// Most slots ever simultaneously live, for scenario reports.
    pub high_water: usize,
    /// Spawn requests skipped because the pool was exhausted.
    pub denied: usize,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PROJECTILE_CAPACITY)
    }
}

impl ProjectilePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            // Popping from the tail hands out low indices first.
            free: (0..capacity).rev().collect(),
            high_water: 0,
            denied: 0,
        }
    }

    /// Claim a slot. `None` means the budget is exhausted and the
    /// caller must skip the spawn.
    pub fn acquire(&mut self) -> Option<usize> {
        match self.free.pop() {
            Some(slot) => {
                self.high_water = self.high_water.max(self.live());
                Some(slot)
            }
            None => {
                self.denied += 1;
                None
            }
        }
    }

    /// Return a slot to the free list.
    pub fn release(&mut self, slot: usize) {
        debug_assert!(slot < self.capacity, "slot {slot} out of range");
        debug_assert!(!self.free.contains(&slot), "double release of {slot}");
        self.free.push(slot);
    }

    pub fn live(&self) -> usize {
        self.capacity - self.free.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
