use serde::{Deserialize, Serialize};

use crate::*;

/// Full turn of the hue wheel.
pub const HUE_TURN: u16 = 360;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Interval between ticks
    pub tick_ms: u32,
    /// Degrees added on every tick
    pub step_degrees: u16,
    /// Rotation wraps back to zero when it reaches this value
    pub wrap_degrees: u16,
}

impl PaletteConfig {
    pub const DEFAULT_TICK_MS: u32 = 100;
    pub const DEFAULT_STEP_DEGREES: u16 = 1;

    pub const fn new_unchecked(tick_ms: u32, step_degrees: u16, wrap_degrees: u16) -> Self {
        Self {
            tick_ms,
            step_degrees,
            wrap_degrees,
        }
    }

    pub fn new(tick_ms: u32, step_degrees: u16, wrap_degrees: u16) -> Self {
        let tick_ms = tick_ms.max(1);
        let wrap_degrees = wrap_degrees.max(1);
        let step_degrees = step_degrees.min(wrap_degrees - 1);
        Self::new_unchecked(tick_ms, step_degrees, wrap_degrees)
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::new_unchecked(Self::DEFAULT_TICK_MS, Self::DEFAULT_STEP_DEGREES, HUE_TURN)
    }
}

/// Valid transitions:
/// - Idle -> Mounted
/// - Mounted -> Unmounted
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimatorState {
    /// Built but not attached to a view yet
    #[default]
    Idle,
    /// Ticks advance the rotation
    Mounted,
    /// Detached, no further changes are accepted
    Unmounted,
}

impl AnimatorState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Mounted)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Unmounted)
    }
}

/// Cosmetic hue rotation, has no bearing on the quiz itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteAnimator {
    config: PaletteConfig,
    rotation_degrees: u16,
    state: AnimatorState,
}

impl PaletteAnimator {
    pub fn new(config: PaletteConfig) -> Self {
        Self {
            config,
            rotation_degrees: 0,
            state: Default::default(),
        }
    }

    pub fn config(&self) -> PaletteConfig {
        self.config
    }

    pub fn rotation(&self) -> u16 {
        self.rotation_degrees
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Returns whether the animator went from idle to mounted.
    pub fn mount(&mut self) -> bool {
        if matches!(self.state, AnimatorState::Idle) {
            log::debug!("palette mounted: {:?}", self.config);
            self.state = AnimatorState::Mounted;
            true
        } else {
            false
        }
    }

    /// Returns whether the animator was running before.
    pub fn unmount(&mut self) -> bool {
        if self.state.is_final() {
            return false;
        }
        let was_running = self.state.is_running();
        log::debug!("palette unmounted at {} degrees", self.rotation_degrees);
        self.state = AnimatorState::Unmounted;
        was_running
    }

    /// Advances the rotation by one step, returns whether it changed.
    pub fn tick(&mut self) -> bool {
        if !self.state.is_running() {
            log::trace!("palette tick ignored while {:?}", self.state);
            return false;
        }
        let PaletteConfig {
            step_degrees,
            wrap_degrees,
            ..
        } = self.config;
        let next = (u32::from(self.rotation_degrees) + u32::from(step_degrees))
            % u32::from(wrap_degrees);
        // below wrap_degrees, which is a u16
        let next = next as u16;
        let changed = next != self.rotation_degrees;
        self.rotation_degrees = next;
        changed
    }

    pub fn hue_for(&self, index: CellIndex) -> u16 {
        hue_for(index, self.rotation_degrees)
    }
}

/// Hue spread evenly over the grid, the first cell sits at zero.
pub fn base_hue(index: CellIndex) -> u16 {
    let index = index % CELL_COUNT;
    // at most 359
    (index * usize::from(HUE_TURN) / CELL_COUNT) as u16
}

/// Hue of the cell at `index` once the palette has turned by `rotation` degrees.
pub fn hue_for(index: CellIndex, rotation: u16) -> u16 {
    (base_hue(index) + rotation % HUE_TURN) % HUE_TURN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test as test;

    fn mounted(config: PaletteConfig) -> PaletteAnimator {
        let mut animator = PaletteAnimator::new(config);
        assert!(animator.mount());
        animator
    }

    #[test]
    fn starts_at_zero_and_idle() {
        let animator = PaletteAnimator::new(PaletteConfig::default());
        assert_eq!(animator.rotation(), 0);
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn idle_animator_ignores_ticks() {
        let mut animator = PaletteAnimator::new(PaletteConfig::default());
        assert!(!animator.tick());
        assert_eq!(animator.rotation(), 0);
    }

    #[test]
    fn tick_advances_by_step() {
        let mut animator = mounted(PaletteConfig::new(10, 7, 360));
        assert!(animator.tick());
        assert!(animator.tick());
        assert_eq!(animator.rotation(), 14);
    }

    #[test]
    fn rotation_wraps_at_bound() {
        let mut animator = mounted(PaletteConfig::new(10, 100, 720));
        for _ in 0..7 {
            animator.tick();
        }
        assert_eq!(animator.rotation(), 700);
        animator.tick();
        assert_eq!(animator.rotation(), 80);
    }

    #[test]
    fn unmounted_animator_ignores_ticks() {
        let mut animator = mounted(PaletteConfig::default());
        animator.tick();
        assert!(animator.unmount());

        let before = animator.clone();
        assert!(!animator.tick());
        assert_eq!(animator, before);

        assert!(!animator.mount());
        assert!(!animator.unmount());
    }

    #[test]
    fn config_is_clamped() {
        let config = PaletteConfig::new(0, 500, 360);
        assert_eq!(config.tick_ms, 1);
        assert_eq!(config.step_degrees, 359);

        let config = PaletteConfig::new(50, 3, 0);
        assert_eq!(config.wrap_degrees, 1);
        assert_eq!(config.step_degrees, 0);
    }

    #[test]
    fn hues_spread_over_the_wheel() {
        assert_eq!(base_hue(0), 0);
        assert_eq!(base_hue(32), 180);
        assert_eq!(base_hue(CELL_COUNT - 1), 354);
        for index in 0..CELL_COUNT {
            for rotation in [0, 1, 359, 360, 719, u16::MAX] {
                assert!(hue_for(index, rotation) < HUE_TURN);
            }
        }
        assert_eq!(hue_for(32, 200), 20);
    }
}
