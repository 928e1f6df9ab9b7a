//! Momentum orbit camera around the garden centre.
//!
//! The camera rides a circle of fixed radius and height and always looks at
//! the origin. Only the angle moves:
//!
//! - dragging applies the pointer delta directly and leaves a fling velocity,
//! - after release the velocity decays toward zero (`v *= decay`),
//! - once `resume_delay` seconds pass without input, the velocity eases
//!   toward `base_rotation_speed * last_direction` (`v += (target - v) * k`).
//!
//! Outside a drag, every tick advances the angle by `v * dt`; while dragging
//! only the pointer moves the camera and `v` is the fling held for release.
//! Per-tick factors are defined for
//! a nominal 60 Hz frame and rescaled by `dt`, so a slow frame decays as much
//! as the frames it replaced.
//!
//! `OrbitController` is the single owner of this state; input handlers and the
//! frame tick go through its methods.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::config::CameraConfig;

/// Frame rate the per-tick decay and smoothing factors are expressed at.
pub const NOMINAL_FPS: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitState {
    Dragging,
    Decelerating,
    IdleAutoRotating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    config: CameraConfig,
    angle: f32,
    velocity: f32,
    dragging: bool,
    /// Controller clock (seconds) at the last drag event, if any.
    last_interaction: Option<f32>,
    /// +1 or -1: the auto-rotation follows the last drag.
    last_direction: f32,
    clock: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl OrbitController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            angle: 0.0,
            velocity: 0.0,
            dragging: false,
            last_interaction: None,
            last_direction: 1.0,
            clock: 0.0,
        }
    }

    /// Back to the mount state, keeping the configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn last_direction(&self) -> f32 {
        self.last_direction
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn state(&self) -> OrbitState {
        if self.dragging {
            OrbitState::Dragging
        } else if self.within_resume_delay() {
            OrbitState::Decelerating
        } else {
            OrbitState::IdleAutoRotating
        }
    }

    fn within_resume_delay(&self) -> bool {
        self.last_interaction
            .is_some_and(|t| self.clock - t < self.config.resume_delay)
    }

    pub fn auto_rotation_target(&self) -> f32 {
        self.config.base_rotation_speed * self.last_direction
    }

    pub fn drag_start(&mut self) {
        self.dragging = true;
        self.last_interaction = Some(self.clock);
    }

    /// Apply a horizontal pointer delta in pixels.
    pub fn drag_move(&mut self, dx: f32) {
        if !dx.is_finite() || dx == 0.0 {
            return;
        }
        let max = self.config.max_drag_step;
        let step = (dx * self.config.drag_sensitivity).clamp(-max, max);
        self.angle = (self.angle + step).rem_euclid(TAU);
        // A drag step is one nominal frame of motion; that becomes the fling.
        self.velocity = step * NOMINAL_FPS;
        self.last_direction = dx.signum();
        self.last_interaction = Some(self.clock);
    }

    pub fn drag_end(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.last_interaction = Some(self.clock);
    }

    /// Advance by `dt` seconds of frame time.
    pub fn advance(&mut self, dt: f32) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        self.clock += dt;
        let frames = dt * NOMINAL_FPS;

        match self.state() {
            OrbitState::Dragging => {
                // A pointer held still lets the fling die out.
                self.velocity *= self.config.decay_factor.powf(frames);
                return;
            }
            OrbitState::Decelerating => {
                self.velocity *= self.config.decay_factor.powf(frames);
            }
            OrbitState::IdleAutoRotating => {
                let blend = 1.0 - (1.0 - self.config.smooth_factor).powf(frames);
                let target = self.auto_rotation_target();
                self.velocity += (target - self.velocity) * blend;
            }
        }

        self.angle = (self.angle + self.velocity * dt).rem_euclid(TAU);
    }

    /// Camera position on its circle.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.config.radius,
            self.config.height,
            self.angle.sin() * self.config.radius,
        )
    }

    /// Camera transform looking at the garden centre.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(Vec3::ZERO, Vec3::Y)
    }
}
