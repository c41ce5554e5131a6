//! Enemy behavior finite state machine.
//!
//! ```text
//!            in range + settled + ready
//!   Pursuing ─────────────────────────► Attacking ──┐ timed strikes
//!      ▲  ▲      target past interrupt range │  ▲ ◄──┘
//!      │  └──────────────────────────────────┘  │
//!      │          (reduced cooldown)             │
//!      └─────────────────────────────────────────┘
//!          animation over (full cooldown, or none if still in range)
//!
//!   any ──(death)──► Dead
//! ```
//!
//! Timers only advance through `update`, so a host that stops calling it
//! (pause) freezes the machine exactly.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use holdout_core::enums::{DeathAnimation, EnemyState};
use holdout_core::types::{expired, reached, Position};

use crate::navigation::Navigation;
use crate::profiles::BehaviorProfile;

/// Per-frame input to the FSM for a single enemy.
#[derive(Debug, Clone, Copy)]
pub struct BrainInput {
    pub position: DVec3,
    /// Current target position, `None` when the target reference no longer resolves.
    pub target: Option<DVec3>,
    pub dt: f64,
}

/// Something the host must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainSignal {
    /// Entered Attacking: play the attack animation.
    AttackStarted,
    /// A damage instant fired. Damage applies only when `in_range`.
    Strike { instant: u8, in_range: bool },
    /// Target ran past the interrupt range; reduced cooldown applied.
    AttackInterrupted,
    /// Animation finished. `chain` is true when the target is still in range
    /// and a new cycle may start on the next update.
    AttackCompleted { chain: bool },
    /// Target reference stopped resolving; the brain is idle.
    Froze,
    /// Target reference resolves again.
    Thawed,
}

/// Output of one FSM update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrainUpdate {
    pub signals: Vec<BrainSignal>,
    /// A new destination was handed to the navigator.
    pub repathed: bool,
}

/// Damage instants already fired in the current attack cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiredInstants(u32);

impl FiredInstants {
    pub fn contains(&self, index: usize) -> bool {
        index < 32 && self.0 & (1 << index) != 0
    }

    pub fn insert(&mut self, index: usize) {
        if index < 32 {
            self.0 |= 1 << index;
        }
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Behavioral state of one enemy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnemyBrain {
    state: EnemyState,
    /// Elapsed time in the current attack cycle.
    attack_timer: f64,
    /// Time left before another attack may start.
    attack_ready_in: f64,
    fired: FiredInstants,
    /// Time since the last path recomputation; `None` forces one.
    since_repath: Option<f64>,
    frozen: bool,
}

impl EnemyBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn attack_timer(&self) -> f64 {
        self.attack_timer
    }

    pub fn attack_ready_in(&self) -> f64 {
        self.attack_ready_in
    }

    pub fn fired(&self) -> FiredInstants {
        self.fired
    }

    /// Advance the machine by `input.dt`.
    pub fn update<N: Navigation + ?Sized>(
        &mut self,
        profile: &BehaviorProfile,
        input: &BrainInput,
        nav: &mut N,
    ) -> BrainUpdate {
        let mut out = BrainUpdate::default();

        if self.state == EnemyState::Dead {
            return out;
        }

        let Some(target) = input.target else {
            if !self.frozen {
                self.frozen = true;
                nav.stop();
                out.signals.push(BrainSignal::Froze);
            }
            return out;
        };

        if self.frozen {
            self.frozen = false;
            self.since_repath = None;
            out.signals.push(BrainSignal::Thawed);
        }

        // Ground-plane range, the same measure the navigator arrives by.
        let distance = Position(input.position).ground_range_to(&Position(target));
        match self.state {
            EnemyState::Pursuing => self.pursue(profile, input.dt, target, distance, nav, &mut out),
            EnemyState::Attacking => self.attack(profile, input.dt, distance, nav, &mut out),
            EnemyState::Dead => {}
        }
        out
    }

    /// Which way the enemy should face: the target while attacking or
    /// standing still, its walking direction otherwise.
    pub fn desired_facing(
        &self,
        profile: &BehaviorProfile,
        position: DVec3,
        target: Option<DVec3>,
        velocity: DVec3,
    ) -> Option<DVec3> {
        match self.state {
            EnemyState::Dead => None,
            _ if self.frozen => None,
            EnemyState::Attacking => target.map(|t| t - position),
            EnemyState::Pursuing if velocity.length() < profile.settle_speed => {
                target.map(|t| t - position)
            }
            EnemyState::Pursuing => Some(velocity),
        }
    }

    /// Enter Dead. Returns the chosen terminal animation the first time only.
    pub fn kill<N: Navigation + ?Sized, R: Rng + ?Sized>(
        &mut self,
        nav: &mut N,
        rng: &mut R,
    ) -> Option<DeathAnimation> {
        if self.state == EnemyState::Dead {
            return None;
        }
        self.state = EnemyState::Dead;
        self.attack_timer = 0.0;
        self.fired.clear();
        nav.stop();
        nav.disable();
        let index = rng.gen_range(0..DeathAnimation::ALL.len());
        Some(DeathAnimation::ALL[index])
    }

    fn pursue<N: Navigation + ?Sized>(
        &mut self,
        profile: &BehaviorProfile,
        dt: f64,
        target: DVec3,
        distance: f64,
        nav: &mut N,
        out: &mut BrainUpdate,
    ) {
        self.attack_ready_in = (self.attack_ready_in - dt).max(0.0);

        let settled = nav.current_velocity().length() < profile.settle_speed;
        if distance <= profile.attack_range && settled && expired(self.attack_ready_in) {
            self.begin_attack(nav, out);
            return;
        }

        if nav.is_stopped() {
            nav.resume();
        }
        if !nav.can_navigate() {
            return;
        }

        let since = self.since_repath.map_or(f64::INFINITY, |t| t + dt);
        if reached(since, profile.path_refresh_secs) {
            nav.set_destination(target);
            self.since_repath = Some(0.0);
            out.repathed = true;
        } else {
            self.since_repath = Some(since);
        }
    }

    fn begin_attack<N: Navigation + ?Sized>(&mut self, nav: &mut N, out: &mut BrainUpdate) {
        self.state = EnemyState::Attacking;
        self.attack_timer = 0.0;
        self.fired.clear();
        nav.stop();
        out.signals.push(BrainSignal::AttackStarted);
    }

    fn attack<N: Navigation + ?Sized>(
        &mut self,
        profile: &BehaviorProfile,
        dt: f64,
        distance: f64,
        nav: &mut N,
        out: &mut BrainUpdate,
    ) {
        if distance > profile.interrupt_range {
            self.fired.clear();
            self.attack_timer = 0.0;
            self.attack_ready_in = profile.interrupt_cooldown_secs();
            self.leave_attack(nav);
            out.signals.push(BrainSignal::AttackInterrupted);
            return;
        }

        self.attack_timer += dt;

        let in_range = distance <= profile.attack_range;
        for (index, &at) in profile.damage_instants_secs.iter().enumerate() {
            if !self.fired.contains(index) && reached(self.attack_timer, at) {
                self.fired.insert(index);
                out.signals.push(BrainSignal::Strike {
                    instant: index as u8,
                    in_range,
                });
            }
        }

        if !reached(self.attack_timer, profile.attack_duration_secs) {
            return;
        }

        if in_range {
            // Still in reach: stay put, the next update starts a fresh cycle.
            self.state = EnemyState::Pursuing;
            self.attack_ready_in = 0.0;
            out.signals.push(BrainSignal::AttackCompleted { chain: true });
        } else {
            self.attack_ready_in = profile.attack_cooldown_secs;
            self.leave_attack(nav);
            out.signals.push(BrainSignal::AttackCompleted { chain: false });
        }
    }

    fn leave_attack<N: Navigation + ?Sized>(&mut self, nav: &mut N) {
        self.state = EnemyState::Pursuing;
        self.since_repath = None;
        nav.resume();
    }
}
