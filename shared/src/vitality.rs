//! Vitality arithmetic.
//!
//! Vitality is an integer in half-units (2 = one heart) clamped to `[floor, cap]` by the
//! increase procedure. The canonical increase is clamp-up, add, clamp-down:
//! `increase(v, a) = min(cap, max(floor, v) + a)`.
//!
//! The penalty is deliberately separate from the increase. It floor-clamps only when the
//! settings ask for it, so a host can reproduce the plain subtraction if required.

/// Vitality value in half-units.
pub type Vitality = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalityBounds {
    pub floor: Vitality,
    pub cap: Vitality,
}

impl VitalityBounds {
    /// Applies the canonical increase procedure.
    ///
    /// The result is always within `[floor, cap]` when `floor <= cap`.
    pub fn increase(&self, current: Vitality, amount: u32) -> Vitality {
        let amount = Vitality::try_from(amount).unwrap_or(Vitality::MAX);
        current
            .max(self.floor)
            .saturating_add(amount)
            .min(self.cap)
    }

    /// Applies the death penalty.
    pub fn penalize(&self, current: Vitality, malus: u32, clamp_to_floor: bool) -> Vitality {
        let malus = Vitality::try_from(malus).unwrap_or(Vitality::MAX);
        let lowered = current.saturating_sub(malus);
        if clamp_to_floor {
            // Never raise a value that was already below the floor.
            lowered.max(self.floor.min(current))
        } else {
            lowered
        }
    }

    pub fn contains(&self, value: Vitality) -> bool {
        (self.floor..=self.cap).contains(&value)
    }
}

/// Converts half-units to hearts for player-facing text.
pub fn hearts(half_units: u32) -> f32 {
    half_units as f32 / 2.0
}
