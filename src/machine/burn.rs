//! Burn clock - the fuel countdown inside combustion machines
//!
//! The clock counts down once per tick while lit. It never goes below
//! zero and `remaining <= duration` holds at all times.

/// Countdown state for a single burn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurnState {
    burn_time: u32,
    burn_duration: u32,
}

impl BurnState {
    /// A cold, idle clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild persisted state; remaining time is clamped to the duration
    pub fn from_raw(burn_time: u32, burn_duration: u32) -> Self {
        Self {
            burn_time: burn_time.min(burn_duration),
            burn_duration,
        }
    }

    /// Advance one tick: decrement the countdown while lit
    pub fn tick(&mut self) {
        if self.burn_time > 0 {
            self.burn_time -= 1;
        }
    }

    /// Start a fresh burn of the given duration
    pub fn ignite(&mut self, duration: u32) {
        self.burn_time = duration;
        self.burn_duration = duration;
    }

    pub fn is_burning(&self) -> bool {
        self.burn_time > 0
    }

    /// Fraction of the current burn remaining, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.burn_duration == 0 {
            return 0.0;
        }
        self.burn_time as f32 / self.burn_duration as f32
    }

    /// Ticks left in the current burn
    pub fn remaining(&self) -> u32 {
        self.burn_time
    }

    /// Total ticks of the current burn
    pub fn duration(&self) -> u32 {
        self.burn_duration
    }
}
