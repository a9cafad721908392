//! Combat Logging
//!
//! Records everything that happens during a fight for post-run analysis
//! and regression tests. Entries carry both a human-readable message and
//! optional structured data so tests can aggregate without parsing text.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// A single entry in the combat log.
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Seconds since simulation start.
    pub timestamp: f32,
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<StructuredEventData>,
}

/// Types of combat log events for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt by a projectile hit.
    Damage,
    /// A cast was interrupted mid-cast.
    Break,
    /// A skill cast started or fired.
    SkillCast,
    /// Status effect applied.
    StatusApplied,
    /// Status effect ran out.
    StatusExpired,
    /// Phase started/completed.
    PhaseEvent,
    /// Combatant died / was deactivated.
    Death,
    /// Scenario bookkeeping (start, end, timeout).
    Scenario,
}

/// Machine-readable payloads for entries that tests aggregate over.
#[derive(Debug, Clone, Serialize)]
pub enum StructuredEventData {
    Damage {
        source: String,
        target: String,
        skill: String,
        amount: i32,
        is_crit: bool,
        killing_blow: bool,
    },
    Phase {
        index: usize,
        name: String,
    },
    Death {
        victim: String,
    },
}

/// The combat log resource storing all events in chronological order.
#[derive(Resource, Default)]
pub struct CombatLog {
    pub entries: Vec<CombatLogEntry>,
    /// Current simulation time, advanced once per tick.
    pub sim_time: f32,
}

impl CombatLog {
    /// Clear the log for a new scenario.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sim_time = 0.0;
    }

    /// Add a plain entry.
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.sim_time,
            event_type,
            message,
            data: None,
        });
    }

    /// Add a damage entry with structured data.
    #[allow(clippy::too_many_arguments)]
    pub fn log_damage(
        &mut self,
        source: String,
        target: String,
        skill: String,
        amount: i32,
        is_crit: bool,
        killing_blow: bool,
        message: String,
    ) {
        self.entries.push(CombatLogEntry {
            timestamp: self.sim_time,
            event_type: CombatLogEventType::Damage,
            message,
            data: Some(StructuredEventData::Damage {
                source,
                target,
                skill,
                amount,
                is_crit,
                killing_blow,
            }),
        });
    }

    pub fn log_phase(&mut self, index: usize, name: String, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.sim_time,
            event_type: CombatLogEventType::PhaseEvent,
            message,
            data: Some(StructuredEventData::Phase { index, name }),
        });
    }

    pub fn log_death(&mut self, victim: String, message: String) {
        self.entries.push(CombatLogEntry {
            timestamp: self.sim_time,
            event_type: CombatLogEventType::Death,
            message,
            data: Some(StructuredEventData::Death { victim }),
        });
    }

    /// Entries filtered by event type.
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// The last N entries.
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    /// Total damage dealt by `source`, broken down per skill.
    pub fn damage_by_skill(&self, source: &str) -> HashMap<String, i64> {
        let mut totals = HashMap::new();
        for entry in &self.entries {
            if let Some(StructuredEventData::Damage {
                source: s,
                skill,
                amount,
                ..
            }) = &entry.data
            {
                if s == source {
                    *totals.entry(skill.clone()).or_insert(0) += *amount as i64;
                }
            }
        }
        totals
    }

    /// Number of killing blows landed by `source`.
    pub fn killing_blows(&self, source: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    &e.data,
                    Some(StructuredEventData::Damage {
                        source: s,
                        killing_blow: true,
                        ..
                    }) if s == source
                )
            })
            .count()
    }

    /// Total damage taken by `target`.
    pub fn total_damage_taken(&self, target: &str) -> i64 {
        self.entries
            .iter()
            .filter_map(|e| match &e.data {
                Some(StructuredEventData::Damage { target: t, amount, .. }) if t == target => {
                    Some(*amount as i64)
                }
                _ => None,
            })
            .sum()
    }

    /// Number of cast breaks recorded.
    pub fn break_count(&self) -> usize {
        self.filter_by_type(CombatLogEventType::Break).len()
    }

    /// Serialize the log plus scenario metadata to a JSON file.
    /// Returns the path written.
    pub fn save_to_file(
        &self,
        metadata: &FightMetadata,
        output_path: Option<&str>,
    ) -> Result<String, String> {
        let report = FightReport {
            metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;

        let filename = output_path
            .map(String::from)
            .unwrap_or_else(|| format!("fight_log_{}.json", metadata.scenario_name));
        std::fs::write(&filename, json)
            .map_err(|e| format!("Failed to write {}: {}", filename, e))?;
        Ok(filename)
    }
}

/// Scenario-level metadata attached to a saved log.
#[derive(Debug, Clone, Serialize)]
pub struct FightMetadata {
    pub scenario_name: String,
    pub boss_name: String,
    pub outcome: String,
    pub duration_secs: f32,
    pub phases_cleared: usize,
    pub random_seed: Option<u64>,
}

#[derive(Serialize)]
struct FightReport<'a> {
    metadata: &'a FightMetadata,
    entries: &'a [CombatLogEntry],
}
