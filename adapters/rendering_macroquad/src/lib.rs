#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rendering backend implemented on top of macroquad.
//!
//! The backend owns the window, polls keyboard and mouse state into a
//! [`FrameInput`] snapshot once per frame, hands the snapshot to the
//! simulation callback, and then draws whatever [`Scene`] the callback left
//! behind. Colors come from an optional `theme.toml` next to the binary;
//! missing files fall back to the built-in palette.

use std::time::Duration;

use anyhow::{Context, Result};
use arena_royale_rendering::{
    Color, FrameInput, FrameReport, Palette, Presentation, RenderingBackend, Scene, SceneAgent,
};
use glam::Vec2;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_down, mouse_position, KeyCode, MouseButton,
};
use serde::Deserialize;

const WINDOW_WIDTH: i32 = 800;
const WINDOW_HEIGHT: i32 = 600;
const HEALTH_BAR_WIDTH: f32 = 30.0;
const HEALTH_BAR_HEIGHT: f32 = 5.0;
const FACING_TICK_LENGTH: f32 = 18.0;

/// Colors loaded from a `theme.toml` file.
///
/// Every field is an `[r, g, b]` byte triple; omitted fields keep their
/// built-in defaults.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Window clear color.
    pub background: [u8; 3],
    /// Solid wall fill.
    pub wall: [u8; 3],
    /// Door gap fill.
    pub door: [u8; 3],
    /// Safe-zone outline.
    pub safe_zone: [u8; 3],
    /// Projectile fill.
    pub projectile: [u8; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: [0xff, 0xff, 0xff],
            wall: [0x8b, 0x5a, 0x2b],
            door: [0xd2, 0xb4, 0x8c],
            safe_zone: [0xff, 0x00, 0x00],
            projectile: [0x00, 0x00, 0x00],
        }
    }
}

impl Theme {
    /// Parses a theme from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse theme")
    }

    /// Loads a theme file from disk.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Converts the theme into the backend-agnostic palette.
    #[must_use]
    pub fn palette(&self) -> Palette {
        let rgb =
            |[red, green, blue]: [u8; 3]| Color::from_rgb_u8(red, green, blue);
        Palette {
            background: rgb(self.background),
            wall: rgb(self.wall),
            door: rgb(self.door),
            safe_zone: rgb(self.safe_zone),
            projectile: rgb(self.projectile),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = if enabled { Some(1) } else { Some(0) };
        self
    }

    /// Configures whether the backend prints frame timing once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

fn gather_frame_input() -> FrameInput {
    let (mouse_x, mouse_y) = mouse_position();
    FrameInput {
        move_up: is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
        move_down: is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
        move_left: is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        move_right: is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        sprint: is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift),
        fire: is_key_down(KeyCode::Space) || is_mouse_button_down(MouseButton::Left),
        cursor_screen: Some(Vec2::new(mouse_x, mouse_y)),
        quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    simulation_accum: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration, simulation: Duration) -> Option<(f32, Duration)> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.simulation_accum += simulation;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames.max(1);
        let per_second = self.frames as f32 / seconds.max(f32::EPSILON);
        let avg_simulation = self.simulation_accum / frames;

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.simulation_accum = Duration::ZERO;
        Some((per_second, avg_simulation))
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameReport + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let background = to_macroquad_color(palette.background);

            loop {
                let frame_input = gather_frame_input();
                if frame_input.quit_requested {
                    break;
                }

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                scene.camera.resize(screen_width, screen_height);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let report = update_scene(frame_dt, frame_input, &mut scene);
                if report.exit_requested {
                    break;
                }

                macroquad::window::clear_background(background);
                draw_scene(&scene, &palette, screen_width, screen_height);

                if show_fps {
                    if let Some((per_second, avg_simulation)) =
                        fps_counter.record_frame(frame_dt, report.simulation)
                    {
                        println!(
                            "FPS: {:.2} | sim: {:>6.2}ms",
                            per_second,
                            avg_simulation.as_secs_f64() * 1_000.0
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene, palette: &Palette, screen_width: f32, screen_height: f32) {
    let wall_color = to_macroquad_color(palette.wall);
    let door_color = to_macroquad_color(palette.door);
    for wall in &scene.walls {
        draw_world_rect(scene, wall, wall_color, screen_width, screen_height);
    }
    for door in &scene.doors {
        draw_world_rect(scene, door, door_color, screen_width, screen_height);
    }

    for agent in &scene.agents {
        draw_agent(scene, agent);
    }

    let projectile_color = to_macroquad_color(palette.projectile);
    for projectile in &scene.projectiles {
        draw_world_rect(
            scene,
            &projectile.rect,
            projectile_color,
            screen_width,
            screen_height,
        );
    }

    if let Some(area) = scene.safe_zone {
        let screen_area = scene.camera.apply_rect(&area);
        macroquad::shapes::draw_rectangle_lines(
            screen_area.x(),
            screen_area.y(),
            screen_area.width(),
            screen_area.height(),
            5.0,
            to_macroquad_color(palette.safe_zone),
        );
    }

    if let Some(banner) = &scene.banner {
        let font_size = 36.0;
        let metrics = macroquad::text::measure_text(banner, None, font_size as u16, 1.0);
        macroquad::text::draw_text(
            banner,
            (screen_width - metrics.width) / 2.0,
            50.0,
            font_size,
            macroquad::color::BLACK,
        );
    }

    if let Some((x, y)) = scene.debug_coords {
        macroquad::text::draw_text(
            &format!("X: {}, Y: {}", x as i32, y as i32),
            10.0,
            20.0,
            24.0,
            macroquad::color::BLACK,
        );
    }
}

fn draw_agent(scene: &Scene, agent: &SceneAgent) {
    let rect = scene.camera.apply_rect(&agent.rect);
    macroquad::shapes::draw_rectangle(
        rect.x(),
        rect.y(),
        rect.width(),
        rect.height(),
        to_macroquad_color(agent.color),
    );

    // Short heading tick from the body center toward the aim direction.
    let center_x = rect.x() + rect.width() / 2.0;
    let center_y = rect.y() + rect.height() / 2.0;
    macroquad::shapes::draw_line(
        center_x,
        center_y,
        center_x + agent.facing.cos() * FACING_TICK_LENGTH,
        center_y + agent.facing.sin() * FACING_TICK_LENGTH,
        2.0,
        macroquad::color::DARKGRAY,
    );

    let bar_x = rect.x() + 1.0;
    let bar_y = rect.y() - 10.0;
    macroquad::shapes::draw_rectangle(
        bar_x,
        bar_y,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
        macroquad::color::RED,
    );
    macroquad::shapes::draw_rectangle(
        bar_x,
        bar_y,
        HEALTH_BAR_WIDTH * agent.health_fraction.clamp(0.0, 1.0),
        HEALTH_BAR_HEIGHT,
        macroquad::color::GREEN,
    );
}

fn draw_world_rect(
    scene: &Scene,
    rect: &arena_royale_core::Rect,
    color: macroquad::color::Color,
    screen_width: f32,
    screen_height: f32,
) {
    let screen_rect = scene.camera.apply_rect(rect);
    if screen_rect.right() < 0.0
        || screen_rect.bottom() < 0.0
        || screen_rect.x() > screen_width
        || screen_rect.y() > screen_height
    {
        return;
    }
    macroquad::shapes::draw_rectangle(
        screen_rect.x(),
        screen_rect.y(),
        screen_rect.width(),
        screen_rect.height(),
        color,
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
