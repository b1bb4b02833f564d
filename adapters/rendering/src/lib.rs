#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Arena Royale adapters.
//!
//! Backends render a [`Scene`] assembled from world queries and hand back a
//! per-frame [`FrameInput`] snapshot; the core never polls input devices or
//! touches a window directly. The [`Camera`] is the pure affine offset the
//! simulation consumes for cursor aiming, and backends consume for drawing.

use anyhow::Result as AnyResult;
use arena_royale_core::Rect;
use glam::Vec2;
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Pure affine world-to-screen offset that follows a focus point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Camera {
    offset: Vec2,
    viewport: Vec2,
}

impl Camera {
    /// Creates a camera for the provided viewport dimensions.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Recenters the viewport on the provided world-space focus point.
    ///
    /// Deliberately unclamped: the camera tracks its focus straight off the
    /// world's edge rather than pinning to the boundary.
    pub fn follow(&mut self, focus_x: f32, focus_y: f32) {
        self.offset = Vec2::new(
            focus_x - self.viewport.x / 2.0,
            focus_y - self.viewport.y / 2.0,
        );
    }

    /// Updates the viewport dimensions, keeping the current focus centered.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        let focus = self.offset + self.viewport / 2.0;
        self.viewport = Vec2::new(viewport_width, viewport_height);
        self.follow(focus.x, focus.y);
    }

    /// Converts a world-space position to screen space.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Converts a screen-space position to world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }

    /// Translates a world-space rectangle into screen space.
    #[must_use]
    pub fn apply_rect(&self, rect: &Rect) -> Rect {
        rect.offset(-self.offset.x, -self.offset.y)
    }

    /// Viewport dimensions in screen units.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

/// Input snapshot gathered by the backend before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Move the human agent toward decreasing y.
    pub move_up: bool,
    /// Move the human agent toward increasing y.
    pub move_down: bool,
    /// Move the human agent toward decreasing x.
    pub move_left: bool,
    /// Move the human agent toward increasing x.
    pub move_right: bool,
    /// Raise the human speed cap while held.
    pub sprint: bool,
    /// Whether the fire control is held this frame.
    pub fire: bool,
    /// Cursor position in screen space, when the window reports one.
    pub cursor_screen: Option<Vec2>,
    /// Whether the player asked to leave the match.
    pub quit_requested: bool,
}

/// Agent as presented to a rendering backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneAgent {
    /// Bounding rectangle in world space.
    pub rect: Rect,
    /// Aim rotation in radians.
    pub facing: f32,
    /// Remaining health as a fraction of full health.
    pub health_fraction: f32,
    /// Whether this is the human-controlled agent.
    pub is_human: bool,
    /// Body color.
    pub color: Color,
}

/// Projectile as presented to a rendering backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Bounding rectangle in world space.
    pub rect: Rect,
}

/// Complete description of one presentable frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Solid wall rectangles in world space.
    pub walls: Vec<Rect>,
    /// Passable door-gap rectangles in world space.
    pub doors: Vec<Rect>,
    /// Living agents.
    pub agents: Vec<SceneAgent>,
    /// Live projectiles.
    pub projectiles: Vec<SceneProjectile>,
    /// Safe-zone rectangle in world space.
    pub safe_zone: Option<Rect>,
    /// Camera used to project the scene onto the viewport.
    pub camera: Camera,
    /// Banner text shown centered near the top of the screen, if any.
    pub banner: Option<String>,
    /// World-space coordinates echoed in the debug readout, if enabled.
    pub debug_coords: Option<(f32, f32)>,
}

/// Wall and ground colors applied by backends that have no theme of their
/// own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Window clear color.
    pub background: Color,
    /// Solid wall fill.
    pub wall: Color,
    /// Door gap fill.
    pub door: Color,
    /// Safe-zone outline.
    pub safe_zone: Color,
    /// Projectile fill.
    pub projectile: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb_u8(0xff, 0xff, 0xff),
            wall: Color::from_rgb_u8(0x8b, 0x5a, 0x2b),
            door: Color::from_rgb_u8(0xd2, 0xb4, 0x8c),
            safe_zone: Color::from_rgb_u8(0xff, 0x00, 0x00),
            projectile: Color::from_rgb_u8(0x00, 0x00, 0x00),
        }
    }
}

/// Data required to boot a rendering backend.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title applied to the backend window.
    pub window_title: String,
    /// Colors applied to the static scenery.
    pub palette: Palette,
    /// Initial scene contents.
    pub scene: Scene,
}

/// Timing breakdown reported by the simulation for one frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameReport {
    /// Time spent advancing the simulation this frame.
    pub simulation: Duration,
    /// Whether the simulation asked the backend to close the window.
    pub exit_requested: bool,
}

/// Contract implemented by presentation backends.
pub trait RenderingBackend {
    /// Runs the frame loop until the window closes or the scene callback
    /// requests an exit.
    ///
    /// The callback receives the elapsed frame time and the freshly gathered
    /// input snapshot, mutates the scene in place, and reports frame timing.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameReport + 'static;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_round_trips_positions() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.follow(1500.0, 1500.0);

        let world = Vec2::new(1482.0, 1530.0);
        let screen = camera.world_to_screen(world);
        assert_eq!(camera.screen_to_world(screen), world);

        // The focus point lands in the middle of the viewport.
        assert_eq!(
            camera.world_to_screen(Vec2::new(1500.0, 1500.0)),
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn camera_applies_offsets_to_rects() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.follow(400.0, 300.0);

        let rect = Rect::new(10.0, 20.0, 32.0, 32.0);
        assert_eq!(camera.apply_rect(&rect), Rect::new(10.0, 20.0, 32.0, 32.0));

        camera.follow(500.0, 300.0);
        assert_eq!(camera.apply_rect(&rect), Rect::new(-90.0, 20.0, 32.0, 32.0));
    }

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(0x00, 0x80, 0xff);
        let lighter = color.lighten(0.5);

        assert!(lighter.red > color.red);
        assert!(lighter.green > color.green);
        assert!((lighter.blue - 1.0).abs() < 1e-6);
        assert_eq!(lighter.alpha, color.alpha);
    }
}
