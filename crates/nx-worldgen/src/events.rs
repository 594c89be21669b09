//! Timed world event generation and one-shot scheduling.

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::task::JoinHandle;

use nx_core::{EventEffects, EventKind, Point, SeededRandom, WorldEvent, WorldSize};

/// Minimum delay before a scheduled event fires.
const MIN_DELAY_MS: i32 = 30_000;
/// Maximum delay before a scheduled event fires.
const MAX_DELAY_MS: i32 = 300_000;

/// Produces randomized world events.
///
/// Seeded generators are reproducible; [`WorldEventGenerator::from_entropy`]
/// draws a seed from the OS for live use.
#[derive(Debug, Clone)]
pub struct WorldEventGenerator {
    rng: SeededRandom,
}

impl WorldEventGenerator {
    /// A generator with a reproducible event stream.
    pub fn new(seed: &str) -> Self {
        Self {
            rng: SeededRandom::new(seed),
        }
    }

    /// A generator seeded from entropy.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(&seed.to_string())
    }

    /// Generate one event: uniform kind, uniform in-bounds position, and
    /// kind-specific radius, duration, effects, and message.
    pub fn generate_event(&mut self, size: WorldSize) -> WorldEvent {
        let kind = *self.rng.choice(&EventKind::ALL);
        let position = Point::new(
            self.rng.next_int(0, size.width as i32 - 1),
            self.rng.next_int(0, size.height as i32 - 1),
        );
        let radius = self.event_radius(kind);
        let timestamp = Utc::now();

        WorldEvent {
            id: format!(
                "event_{}_{}",
                timestamp.timestamp_millis(),
                self.rng.next_int(1000, 9999)
            ),
            kind,
            position,
            radius,
            duration: event_duration(kind),
            effects: event_effects(kind),
            message: event_message(kind, position),
            timestamp,
        }
    }

    /// Schedule one event delivery after a uniform delay in [30s, 300s].
    ///
    /// One-shot, not a loop: the timer fires once and the task ends. Callers
    /// wanting periodic events re-schedule from the callback. The generator
    /// is forked into the task; the parent advances by the delay draw, so
    /// consecutive schedules produce distinct timings.
    pub fn schedule_random_event<F>(&mut self, size: WorldSize, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(WorldEvent) + Send + 'static,
    {
        let delay = Duration::from_millis(self.rng.next_int(MIN_DELAY_MS, MAX_DELAY_MS) as u64);
        let mut generator = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let event = generator.generate_event(size);
            callback(event);
        })
    }

    fn event_radius(&mut self, kind: EventKind) -> u32 {
        let radius = match kind {
            EventKind::EmpBurst => self.rng.next_int(3, 8),
            EventKind::CorruptZone => self.rng.next_int(5, 12),
            EventKind::DataSurge => self.rng.next_int(2, 5),
            EventKind::RogueAgent | EventKind::SystemGlitch => self.rng.next_int(1, 4),
        };
        radius as u32
    }
}

fn event_duration(kind: EventKind) -> Duration {
    let secs = match kind {
        EventKind::EmpBurst => 30,
        EventKind::CorruptZone => 120,
        EventKind::DataSurge => 60,
        EventKind::RogueAgent => 180,
        EventKind::SystemGlitch => 45,
    };
    Duration::from_secs(secs)
}

fn event_effects(kind: EventKind) -> EventEffects {
    match kind {
        EventKind::EmpBurst => EventEffects::EmpBurst {
            disable_agents: true,
            energy_drain: 50,
        },
        EventKind::RogueAgent => EventEffects::RogueAgent {
            spawn_hostile: true,
            agent_type: "rogue".into(),
        },
        EventKind::CorruptZone => EventEffects::CorruptZone {
            corrupt_data: true,
            health_drain: 10,
        },
        EventKind::DataSurge => EventEffects::DataSurge {
            bonus_data: true,
            multiplier: 2,
        },
        EventKind::SystemGlitch => EventEffects::SystemGlitch {
            random_teleport: true,
            command_delay_ms: 2000,
        },
    }
}

fn event_message(kind: EventKind, position: Point) -> String {
    match kind {
        EventKind::EmpBurst => {
            format!("EMP BURST detected at {position}! Agent systems compromised.")
        }
        EventKind::RogueAgent => {
            format!("ROGUE AGENT spotted at {position}! Hostile entity detected.")
        }
        EventKind::CorruptZone => {
            format!("CORRUPTION ZONE expanding from {position}! Data integrity at risk.")
        }
        EventKind::DataSurge => {
            format!("DATA SURGE at {position}! Enhanced collection rates active.")
        }
        EventKind::SystemGlitch => {
            format!("SYSTEM GLITCH at {position}! Reality matrix unstable.")
        }
    }
}
