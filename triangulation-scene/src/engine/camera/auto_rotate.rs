use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::trackball::{InteractionStarted, TrackballControls};
use constants::interaction::{AUTO_ROTATE_IDLE_MS, AUTO_ROTATE_SPEED, AUTO_ROTATE_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoRotateSettings {
    pub speed: f32,
    pub idle_delay_ms: u64,
}

impl Default for AutoRotateSettings {
    fn default() -> Self {
        Self {
            speed: AUTO_ROTATE_SPEED,
            idle_delay_ms: AUTO_ROTATE_IDLE_MS,
        }
    }
}

/// Idle-driven turntable state: any manual gesture pauses rotation, which
/// resumes once the user has left the camera alone for the idle delay.
#[derive(Resource, Debug, Clone)]
pub struct AutoRotate {
    pub settings: AutoRotateSettings,
    enabled: bool,
    last_interaction: Option<Duration>,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self {
            settings: AutoRotateSettings::default(),
            enabled: true,
            last_interaction: None,
        }
    }
}

impl AutoRotate {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn last_interaction(&self) -> Option<Duration> {
        self.last_interaction
    }

    pub fn interaction_started(&mut self, now: Duration) {
        self.enabled = false;
        self.last_interaction = Some(now);
    }

    /// Re-enable rotation once more than the idle delay has passed since
    /// the last interaction. Returns whether rotation is on.
    pub fn rearm_if_idle(&mut self, now: Duration) -> bool {
        let idle_for = self
            .last_interaction
            .map_or(Duration::MAX, |last| now.saturating_sub(last));
        if idle_for > Duration::from_millis(self.settings.idle_delay_ms) {
            self.enabled = true;
        }
        self.enabled
    }

    /// Angle turned per frame. Fixed per call, so the rotation speed
    /// follows the display refresh rate.
    pub fn step_angle(&self) -> f32 {
        self.settings.speed * AUTO_ROTATE_STEP
    }
}

/// Pause on interaction, re-arm when idle, and turn the camera around the
/// vertical axis through the control target.
pub fn auto_rotate_system(
    mut interaction_events: EventReader<InteractionStarted>,
    mut auto_rotate: ResMut<AutoRotate>,
    mut controls: ResMut<TrackballControls>,
    time: Res<Time<Real>>,
) {
    let now = time.elapsed();

    if interaction_events.read().count() > 0 {
        auto_rotate.interaction_started(now);
    }

    if auto_rotate.rearm_if_idle(now) {
        let angle = auto_rotate.step_angle();
        controls.orbit(Vec3::Y, angle);
    }
}
