//! Lane and vertical state machine for the player
//!
//! Jump physics is integrated once per tick, not per second: one tick is one
//! rendered frame.

use crate::action::Action;
use crate::config::GameConfig;
use crate::geometry::Rect;
use serde::Serialize;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerticalState {
    Grounded,
    Airborne,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerState {
    current_lane: usize,
    vertical_state: VerticalState,
    vertical_velocity: f32,
    /// y of the player's feet
    bottom: f32,
    #[serde(skip)]
    lanes: Vec<f32>,
    #[serde(skip)]
    physics: Physics,
}

#[derive(Debug, Clone, Copy)]
struct Physics {
    width: f32,
    height: f32,
    ground_y: f32,
    jump_velocity: f32,
    gravity: f32,
}

impl PlayerState {
    /// Grounded player on the configured start lane
    pub fn new(config: &GameConfig) -> Self {
        Self {
            current_lane: config.start_lane(),
            vertical_state: VerticalState::Grounded,
            vertical_velocity: 0.0,
            bottom: config.field.ground_y,
            lanes: config.lane_positions.clone(),
            physics: Physics {
                width: config.player.width,
                height: config.player.height,
                ground_y: config.field.ground_y,
                jump_velocity: config.player.jump_velocity,
                gravity: config.player.gravity,
            },
        }
    }

    pub fn current_lane(&self) -> usize {
        self.current_lane
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn vertical_state(&self) -> VerticalState {
        self.vertical_state
    }

    pub fn is_airborne(&self) -> bool {
        self.vertical_state == VerticalState::Airborne
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Lowest point of the player
    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn rect(&self) -> Rect {
        let center_x = self.lanes.get(self.current_lane).copied().unwrap_or_default();
        Rect::from_bottom_center(center_x, self.bottom, self.physics.width, self.physics.height)
    }

    /// Apply one discrete action. Returns whether the state changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Left => self.switch_lane(-1),
            Action::Right => self.switch_lane(1),
            Action::Jump => self.jump(),
            Action::Duck => self.duck(),
            Action::None => false,
        }
    }

    /// Move one lane left (negative) or right (positive). Out-of-range
    /// requests are ignored.
    pub fn switch_lane(&mut self, direction: i32) -> bool {
        let target = self.current_lane as i64 + direction.signum() as i64;
        if target < 0 || target >= self.lanes.len() as i64 {
            return false;
        }
        self.current_lane = target as usize;
        trace!(lane = self.current_lane, "lane change");
        true
    }

    /// Launch a jump unless already airborne
    pub fn jump(&mut self) -> bool {
        if self.is_airborne() {
            return false;
        }
        self.vertical_state = VerticalState::Airborne;
        self.vertical_velocity = self.physics.jump_velocity;
        trace!(velocity = self.vertical_velocity, "jump");
        true
    }

    /// Ducking has no physical effect yet; the hook exists so a slide
    /// animation or a low-obstacle kind can attach here.
    pub fn duck(&mut self) -> bool {
        false
    }

    /// Integrate one tick of jump physics
    pub fn update(&mut self) {
        if !self.is_airborne() {
            return;
        }

        self.vertical_velocity += self.physics.gravity;
        self.bottom += self.vertical_velocity;

        if self.bottom >= self.physics.ground_y {
            self.bottom = self.physics.ground_y;
            self.vertical_velocity = 0.0;
            self.vertical_state = VerticalState::Grounded;
            trace!("landed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(&GameConfig::default())
    }

    #[test]
    fn test_lane_bounds() {
        let mut p = player();
        assert_eq!(p.current_lane(), 1);

        assert!(p.apply(Action::Left));
        assert_eq!(p.current_lane(), 0);
        assert!(!p.apply(Action::Left));
        assert_eq!(p.current_lane(), 0);

        assert!(p.apply(Action::Right));
        assert!(p.apply(Action::Right));
        assert!(!p.apply(Action::Right));
        assert_eq!(p.current_lane(), 2);
    }

    #[test]
    fn test_lane_change_while_airborne() {
        let mut p = player();
        p.jump();
        assert!(p.switch_lane(1));
        assert!(p.is_airborne());
        assert_eq!(p.rect().center().0, 600.0);
    }

    #[test]
    fn test_jump_arc_lands_exactly_on_ground() {
        let mut p = player();
        assert!(p.jump());
        assert!(!p.jump(), "no double jump");

        // -16 impulse, +1 gravity: 31 ticks back to the ground
        for _ in 0..30 {
            p.update();
            assert!(p.is_airborne());
            assert!(p.bottom() < 500.0);
        }
        p.update();
        assert_eq!(p.vertical_state(), VerticalState::Grounded);
        assert_eq!(p.bottom(), 500.0);
        assert_eq!(p.vertical_velocity(), 0.0);
    }

    #[test]
    fn test_apex_height() {
        let mut p = player();
        p.jump();
        let mut highest = p.bottom();
        while p.is_airborne() {
            p.update();
            highest = highest.min(p.bottom());
        }
        assert_eq!(highest, 500.0 - 120.0);
    }

    #[test]
    fn test_duck_is_noop() {
        let mut p = player();
        let before = p.rect();
        assert!(!p.apply(Action::Duck));
        assert_eq!(p.rect(), before);
        assert!(!p.apply(Action::None));
    }
}
