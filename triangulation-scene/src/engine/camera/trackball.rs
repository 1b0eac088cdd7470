use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use serde::{Deserialize, Serialize};

use constants::interaction::{
    DYNAMIC_DAMPING_FACTOR, MAX_DISTANCE, MIN_DISTANCE, PAN_SPEED, ROTATE_SPEED,
    WHEEL_LINE_SCALE, WHEEL_PIXEL_SCALE, ZOOM_SPEED,
};

/// Fired whenever the user begins a manual camera gesture.
#[derive(Event, Debug, Clone, Copy)]
pub struct InteractionStarted;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackballAction {
    Rotate,
    Zoom,
    Pan,
}

/// Touch gesture, chosen by how many fingers are down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchGesture {
    Rotate,
    ZoomPan,
}

/// Gesture bound to each mouse button; `None` disables the button.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseButtonMap {
    pub left: Option<TrackballAction>,
    pub middle: Option<TrackballAction>,
    pub right: Option<TrackballAction>,
}

impl Default for MouseButtonMap {
    fn default() -> Self {
        Self {
            left: Some(TrackballAction::Rotate),
            middle: Some(TrackballAction::Zoom),
            right: None,
        }
    }
}

impl MouseButtonMap {
    pub fn action_for(&self, button: MouseButton) -> Option<TrackballAction> {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Without static moving, motion keeps going and decays by this factor.
    pub dynamic_damping_factor: f32,
    pub static_moving: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for TrackballSettings {
    fn default() -> Self {
        Self {
            rotate_speed: ROTATE_SPEED,
            zoom_speed: ZOOM_SPEED,
            pan_speed: PAN_SPEED,
            dynamic_damping_factor: DYNAMIC_DAMPING_FACTOR,
            static_moving: false,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
        }
    }
}

/// Trackball camera manipulation around a target point.
///
/// Drag gestures are recorded in normalized screen coordinates and turned
/// into camera motion by [`TrackballControls::update`], once per frame.
/// Rotation moves the camera's up vector along with its position, so the
/// camera can roll freely over the poles.
#[derive(Resource, Debug, Clone)]
pub struct TrackballControls {
    pub settings: TrackballSettings,
    pub mouse_buttons: MouseButtonMap,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    screen: Vec2,
    state: Option<TrackballAction>,
    touch: Option<TouchGesture>,
    move_prev: Vec2,
    move_curr: Vec2,
    last_axis: Vec3,
    last_angle: f32,
    zoom_start: Vec2,
    zoom_end: Vec2,
    touch_zoom_distance_start: f32,
    touch_zoom_distance_end: f32,
    pan_start: Vec2,
    pan_end: Vec2,
}

impl TrackballControls {
    pub fn new(position: Vec3, target: Vec3, screen: Vec2) -> Self {
        Self {
            settings: TrackballSettings::default(),
            mouse_buttons: MouseButtonMap::default(),
            position,
            target,
            up: Vec3::Y,
            screen,
            state: None,
            touch: None,
            move_prev: Vec2::ZERO,
            move_curr: Vec2::ZERO,
            last_axis: Vec3::ZERO,
            last_angle: 0.0,
            zoom_start: Vec2::ZERO,
            zoom_end: Vec2::ZERO,
            touch_zoom_distance_start: 0.0,
            touch_zoom_distance_end: 0.0,
            pan_start: Vec2::ZERO,
            pan_end: Vec2::ZERO,
        }
    }

    /// Refresh the screen size used to normalize pointer coordinates.
    pub fn handle_resize(&mut self, screen: Vec2) {
        self.screen = screen;
    }

    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    pub fn active_gesture(&self) -> Option<TrackballAction> {
        self.state
    }

    pub fn active_touch(&self) -> Option<TouchGesture> {
        self.touch
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    fn mouse_on_screen(&self, cursor: Vec2) -> Vec2 {
        cursor / self.screen
    }

    fn mouse_on_circle(&self, cursor: Vec2) -> Vec2 {
        Vec2::new(
            (cursor.x - self.screen.x * 0.5) / (self.screen.x * 0.5),
            (self.screen.y - 2.0 * cursor.y) / self.screen.x,
        )
    }

    /// Begin a drag gesture. Returns false if another gesture is running.
    pub fn pointer_down(&mut self, action: TrackballAction, cursor: Vec2) -> bool {
        if self.state.is_some() || self.touch.is_some() {
            return false;
        }
        self.state = Some(action);
        match action {
            TrackballAction::Rotate => {
                self.move_curr = self.mouse_on_circle(cursor);
                self.move_prev = self.move_curr;
            }
            TrackballAction::Zoom => {
                self.zoom_start = self.mouse_on_screen(cursor);
                self.zoom_end = self.zoom_start;
            }
            TrackballAction::Pan => {
                self.pan_start = self.mouse_on_screen(cursor);
                self.pan_end = self.pan_start;
            }
        }
        true
    }

    pub fn pointer_move(&mut self, cursor: Vec2) {
        match self.state {
            Some(TrackballAction::Rotate) => {
                self.move_prev = self.move_curr;
                self.move_curr = self.mouse_on_circle(cursor);
            }
            Some(TrackballAction::Zoom) => self.zoom_end = self.mouse_on_screen(cursor),
            Some(TrackballAction::Pan) => self.pan_end = self.mouse_on_screen(cursor),
            None => {}
        }
    }

    pub fn pointer_up(&mut self) {
        self.state = None;
    }

    /// Fingers went down. One finger rotates, two or more pinch-zoom and pan
    /// around their midpoint.
    pub fn touch_start(&mut self, touches: &[Vec2]) {
        match touches {
            [] => self.touch = None,
            [finger] => {
                self.touch = Some(TouchGesture::Rotate);
                self.move_curr = self.mouse_on_circle(*finger);
                self.move_prev = self.move_curr;
            }
            [first, second, ..] => {
                self.touch = Some(TouchGesture::ZoomPan);
                let distance = first.distance(*second);
                self.touch_zoom_distance_start = distance;
                self.touch_zoom_distance_end = distance;
                self.pan_start = self.mouse_on_screen((*first + *second) * 0.5);
                self.pan_end = self.pan_start;
            }
        }
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) {
        match (self.touch, touches) {
            (Some(TouchGesture::Rotate), [finger, ..]) => {
                self.move_prev = self.move_curr;
                self.move_curr = self.mouse_on_circle(*finger);
            }
            (Some(TouchGesture::ZoomPan), [first, second, ..]) => {
                self.touch_zoom_distance_end = first.distance(*second);
                self.pan_end = self.mouse_on_screen((*first + *second) * 0.5);
            }
            _ => {}
        }
    }

    /// Fingers lifted; `remaining` are the ones still down. A single
    /// remaining finger falls back to rotation from where it rests.
    pub fn touch_end(&mut self, remaining: &[Vec2]) {
        match remaining {
            [] => self.touch = None,
            [finger] => {
                self.touch = Some(TouchGesture::Rotate);
                self.move_curr = self.mouse_on_circle(*finger);
                self.move_prev = self.move_curr;
            }
            _ => {}
        }
    }

    /// Queue a zoom step. `delta` follows the browser convention: positive
    /// when scrolling toward the user.
    pub fn wheel(&mut self, delta: f32, unit: MouseScrollUnit) {
        let scale = match unit {
            MouseScrollUnit::Line => WHEEL_LINE_SCALE,
            MouseScrollUnit::Pixel => WHEEL_PIXEL_SCALE,
        };
        self.zoom_start.y -= delta * scale;
    }

    /// Turn the camera around `axis` through the target, keeping the up vector.
    pub fn orbit(&mut self, axis: Vec3, angle: f32) {
        let eye = Quat::from_axis_angle(axis, angle) * (self.position - self.target);
        self.position = self.target + eye;
    }

    /// Apply pending gestures and damping, then clamp the orbit distance.
    pub fn update(&mut self) {
        let mut eye = self.position - self.target;

        self.rotate_camera(&mut eye);
        self.zoom_camera(&mut eye);
        self.pan_camera(eye);

        self.position = self.target + eye;
        self.check_distances();
    }

    pub fn camera_transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, self.up)
    }

    fn rotate_camera(&mut self, eye: &mut Vec3) {
        let delta = self.move_curr - self.move_prev;
        let angle = delta.length();

        if angle > 0.0 {
            let eye_direction = eye.normalize();
            let up = self.up.normalize();
            let sideways = up.cross(eye_direction).normalize();
            let move_direction = up * delta.y + sideways * delta.x;
            let axis = move_direction.cross(*eye).normalize();
            let angle = angle * self.settings.rotate_speed;

            let rotation = Quat::from_axis_angle(axis, angle);
            *eye = rotation * *eye;
            self.up = rotation * self.up;
            self.last_axis = axis;
            self.last_angle = angle;
        } else if !self.settings.static_moving && self.last_angle != 0.0 {
            self.last_angle *= (1.0 - self.settings.dynamic_damping_factor).sqrt();
            if self.last_angle.abs() < f32::EPSILON {
                self.last_angle = 0.0;
            }
            let rotation = Quat::from_axis_angle(self.last_axis, self.last_angle);
            *eye = rotation * *eye;
            self.up = rotation * self.up;
        }

        self.move_prev = self.move_curr;
    }

    fn zoom_camera(&mut self, eye: &mut Vec3) {
        if self.touch == Some(TouchGesture::ZoomPan) {
            *eye *= pinch_zoom_factor(self.touch_zoom_distance_start, self.touch_zoom_distance_end);
            self.touch_zoom_distance_start = self.touch_zoom_distance_end;
            return;
        }

        // Positive when dragging down or scrolling toward the user: zoom out.
        let factor = 1.0 + (self.zoom_end.y - self.zoom_start.y) * self.settings.zoom_speed;
        if factor != 1.0 && factor > 0.0 {
            *eye *= factor;
        }

        if self.settings.static_moving {
            self.zoom_start = self.zoom_end;
        } else {
            self.zoom_start.y +=
                (self.zoom_end.y - self.zoom_start.y) * self.settings.dynamic_damping_factor;
        }
    }

    fn pan_camera(&mut self, eye: Vec3) {
        let change = self.pan_end - self.pan_start;
        if change.length_squared() == 0.0 {
            return;
        }

        let change = change * eye.length() * self.settings.pan_speed;
        let pan = eye.cross(self.up).normalize() * change.x + self.up.normalize() * change.y;
        self.position += pan;
        self.target += pan;

        if self.settings.static_moving {
            self.pan_start = self.pan_end;
        } else {
            self.pan_start += (self.pan_end - self.pan_start) * self.settings.dynamic_damping_factor;
        }
    }

    fn check_distances(&mut self) {
        let eye = self.position - self.target;
        let distance = eye.length();
        let clamped = distance.clamp(self.settings.min_distance, self.settings.max_distance);
        if clamped != distance {
            self.position = self.target + eye.normalize() * clamped;
            self.zoom_start = self.zoom_end;
        }
    }
}

/// Eye scale for a pinch: spreading the fingers apart zooms in.
pub fn pinch_zoom_factor(start_distance: f32, end_distance: f32) -> f32 {
    if start_distance <= 0.0 || end_distance <= 0.0 {
        return 1.0;
    }
    start_distance / end_distance
}

/// Held key that overrides the gesture of the next drag (A rotate, S zoom, D pan).
fn key_override(keyboard: &ButtonInput<KeyCode>) -> Option<TrackballAction> {
    if keyboard.pressed(KeyCode::KeyA) {
        Some(TrackballAction::Rotate)
    } else if keyboard.pressed(KeyCode::KeyS) {
        Some(TrackballAction::Zoom)
    } else if keyboard.pressed(KeyCode::KeyD) {
        Some(TrackballAction::Pan)
    } else {
        None
    }
}

/// Feed pointer, touch and wheel input into the trackball and report
/// gesture starts. Any button press counts as a start, disabled buttons too.
pub fn trackball_input(
    mut controls: ResMut<TrackballControls>,
    mut interaction_events: EventWriter<InteractionStarted>,
    mut scroll_events: EventReader<MouseWheel>,
    mut active_button: Local<Option<MouseButton>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if let Some(button) = *active_button {
        if mouse_button.just_released(button) {
            controls.pointer_up();
            *active_button = None;
        }
    }

    for button in mouse_button.get_just_pressed() {
        interaction_events.write(InteractionStarted);
        let Some(cursor) = cursor else {
            continue;
        };
        let action = key_override(&keyboard).or(controls.mouse_buttons.action_for(*button));
        if let Some(action) = action {
            if controls.pointer_down(action, cursor) {
                *active_button = Some(*button);
            }
        }
    }

    if let (Some(cursor), Some(_)) = (cursor, controls.active_gesture()) {
        controls.pointer_move(cursor);
    }

    let mut fingers = touches.iter().collect::<Vec<_>>();
    fingers.sort_by_key(|touch| touch.id());
    let fingers = fingers.iter().map(|touch| touch.position()).collect::<Vec<_>>();

    if touches.any_just_pressed() {
        controls.touch_start(&fingers);
        interaction_events.write(InteractionStarted);
    } else if touches.any_just_released() || touches.any_just_canceled() {
        controls.touch_end(&fingers);
    } else if controls.active_touch().is_some() {
        controls.touch_move(&fingers);
    }

    let mut wheeled = false;
    for event in scroll_events.read() {
        // Bevy reports scrolling away from the user as positive.
        controls.wheel(-event.y, event.unit);
        wheeled = true;
    }
    if wheeled {
        interaction_events.write(InteractionStarted);
    }
}

/// Reconcile damped trackball motion and aim the camera.
pub fn trackball_update(
    mut controls: ResMut<TrackballControls>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };
    controls.update();
    *camera_transform = controls.camera_transform();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::camera::auto_rotate::{auto_rotate_system, AutoRotate};
    use std::f32::consts::FRAC_PI_2;

    fn controls() -> TrackballControls {
        TrackballControls::new(
            Vec3::new(4.0, 1.5, 5.0),
            Vec3::new(0.0, 0.8, 0.0),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn right_button_is_disabled_by_default() {
        let map = MouseButtonMap::default();
        assert_eq!(map.action_for(MouseButton::Right), None);
        assert_eq!(map.action_for(MouseButton::Left), Some(TrackballAction::Rotate));
    }

    #[test]
    fn idle_update_keeps_the_camera_still() {
        let mut controls = controls();
        let before = controls.position;
        controls.update();
        assert!(controls.position.abs_diff_eq(before, 1e-6));
    }

    #[test]
    fn drag_rotation_preserves_distance_and_keeps_coasting() {
        let mut controls = controls();
        let distance = controls.distance();

        assert!(controls.pointer_down(TrackballAction::Rotate, Vec2::new(400.0, 300.0)));
        controls.pointer_move(Vec2::new(440.0, 300.0));
        controls.update();
        let after_drag = controls.position;
        assert!((controls.distance() - distance).abs() < 1e-4);
        assert!(!after_drag.abs_diff_eq(Vec3::new(4.0, 1.5, 5.0), 1e-4));

        controls.pointer_up();
        controls.update();
        assert!(!controls.position.abs_diff_eq(after_drag, 1e-6));
        assert!((controls.distance() - distance).abs() < 1e-4);
    }

    #[test]
    fn static_moving_stops_when_the_pointer_stops() {
        let mut controls = controls();
        controls.settings.static_moving = true;
        controls.pointer_down(TrackballAction::Rotate, Vec2::new(400.0, 300.0));
        controls.pointer_move(Vec2::new(440.0, 300.0));
        controls.update();
        let after_drag = controls.position;
        controls.update();
        assert!(controls.position.abs_diff_eq(after_drag, 1e-6));
    }

    #[test]
    fn second_gesture_is_ignored_while_one_is_active() {
        let mut controls = controls();
        assert!(controls.pointer_down(TrackballAction::Rotate, Vec2::ZERO));
        assert!(!controls.pointer_down(TrackballAction::Zoom, Vec2::ZERO));
        controls.pointer_up();
        assert!(controls.pointer_down(TrackballAction::Zoom, Vec2::ZERO));
    }

    #[test]
    fn wheel_zoom_respects_distance_limits() {
        let mut controls = controls();
        for _ in 0..50 {
            controls.wheel(-2_000.0, MouseScrollUnit::Pixel);
            controls.update();
        }
        assert!((controls.distance() - controls.settings.min_distance).abs() < 1e-3);

        for _ in 0..200 {
            controls.wheel(2_000.0, MouseScrollUnit::Pixel);
            controls.update();
        }
        assert!((controls.distance() - controls.settings.max_distance).abs() < 1e-3);
    }

    #[test]
    fn scrolling_toward_the_user_zooms_out() {
        let mut controls = controls();
        let before = controls.distance();
        controls.wheel(100.0, MouseScrollUnit::Pixel);
        controls.update();
        assert!(controls.distance() > before);
        assert!((controls.distance() - before * 1.035).abs() < 1e-3);
    }

    #[test]
    fn dragging_down_with_zoom_moves_away() {
        let mut controls = controls();
        let before = controls.distance();
        controls.pointer_down(TrackballAction::Zoom, Vec2::new(400.0, 300.0));
        controls.pointer_move(Vec2::new(400.0, 330.0));
        controls.update();
        assert!(controls.distance() > before);
    }

    #[test]
    fn pinch_factor_follows_finger_spread() {
        assert_eq!(pinch_zoom_factor(100.0, 200.0), 0.5);
        assert_eq!(pinch_zoom_factor(200.0, 100.0), 2.0);
        assert_eq!(pinch_zoom_factor(0.0, 100.0), 1.0);
        assert_eq!(pinch_zoom_factor(100.0, 0.0), 1.0);
    }

    #[test]
    fn spreading_two_fingers_zooms_in() {
        let mut controls = controls();
        let before = controls.distance();
        controls.touch_start(&[Vec2::new(350.0, 300.0), Vec2::new(450.0, 300.0)]);
        assert_eq!(controls.active_touch(), Some(TouchGesture::ZoomPan));
        controls.touch_move(&[Vec2::new(330.0, 300.0), Vec2::new(470.0, 300.0)]);
        controls.update();
        assert!((controls.distance() - before * 100.0 / 140.0).abs() < 1e-3);

        // Applied once; holding still does not keep zooming.
        let after = controls.distance();
        controls.update();
        assert!((controls.distance() - after).abs() < 1e-4);
    }

    #[test]
    fn lifting_one_of_two_fingers_falls_back_to_rotation() {
        let mut controls = controls();
        controls.touch_start(&[Vec2::new(350.0, 300.0), Vec2::new(450.0, 300.0)]);
        controls.touch_end(&[Vec2::new(350.0, 300.0)]);
        assert_eq!(controls.active_touch(), Some(TouchGesture::Rotate));
        assert!(!controls.pointer_down(TrackballAction::Rotate, Vec2::ZERO));

        controls.touch_end(&[]);
        assert_eq!(controls.active_touch(), None);
        assert!(controls.pointer_down(TrackballAction::Rotate, Vec2::ZERO));
    }

    #[test]
    fn one_finger_drag_rotates() {
        let mut controls = controls();
        let start = controls.position;
        controls.touch_start(&[Vec2::new(400.0, 300.0)]);
        controls.touch_move(&[Vec2::new(440.0, 300.0)]);
        controls.update();
        assert!(!controls.position.abs_diff_eq(start, 1e-4));
    }

    fn input_app() -> App {
        let mut app = App::new();
        app.add_event::<InteractionStarted>()
            .add_event::<MouseWheel>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<Touches>()
            .init_resource::<AutoRotate>()
            .init_resource::<Time<Real>>()
            .insert_resource(controls())
            .add_systems(Update, (trackball_input, auto_rotate_system).chain());

        let mut window = Window::default();
        window.set_cursor_position(Some(Vec2::new(400.0, 300.0)));
        app.world_mut().spawn((window, PrimaryWindow));
        app
    }

    #[test]
    fn button_press_pauses_auto_rotation() {
        let mut app = input_app();
        app.update();
        assert!(app.world().resource::<AutoRotate>().is_enabled());

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();

        assert!(!app.world().resource::<AutoRotate>().is_enabled());
        assert_eq!(
            app.world().resource::<TrackballControls>().active_gesture(),
            Some(TrackballAction::Rotate)
        );
    }

    #[test]
    fn disabled_button_still_pauses_auto_rotation() {
        let mut app = input_app();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);
        app.update();

        assert!(!app.world().resource::<AutoRotate>().is_enabled());
        assert_eq!(app.world().resource::<TrackballControls>().active_gesture(), None);
    }

    #[test]
    fn wheel_pauses_auto_rotation() {
        let mut app = input_app();
        app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: 1.0,
            window: Entity::PLACEHOLDER,
        });
        app.update();

        assert!(!app.world().resource::<AutoRotate>().is_enabled());
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut controls = controls();
        let offset = controls.position - controls.target;
        controls.pointer_down(TrackballAction::Pan, Vec2::new(400.0, 300.0));
        controls.pointer_move(Vec2::new(420.0, 310.0));
        controls.update();
        assert_ne!(controls.target, Vec3::new(0.0, 0.8, 0.0));
        assert!((controls.position - controls.target).abs_diff_eq(offset, 1e-4));
    }

    #[test]
    fn orbit_turns_around_the_target() {
        let mut controls = controls();
        let distance = controls.distance();
        controls.orbit(Vec3::Y, FRAC_PI_2);
        assert!((controls.distance() - distance).abs() < 1e-5);
        assert_eq!(controls.up, Vec3::Y);
        assert!((controls.position.y - 1.5).abs() < 1e-5);
    }

    #[test]
    fn resize_rescales_pointer_mapping() {
        let mut controls = controls();
        controls.handle_resize(Vec2::new(1600.0, 1200.0));
        assert_eq!(controls.screen(), Vec2::new(1600.0, 1200.0));
        assert_eq!(controls.mouse_on_circle(Vec2::new(800.0, 600.0)), Vec2::ZERO);
    }
}
