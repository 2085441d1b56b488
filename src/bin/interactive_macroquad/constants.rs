use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 960;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const PANEL_X: f32 = 18.0;
pub const PANEL_Y: f32 = 120.0;
pub const PANEL_W: f32 = 380.0;
pub const PANEL_H: f32 = 360.0;

pub const PLOT_LEFT: f32 = 470.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 120.0;
pub const BOTTOM_MARGIN: f32 = 50.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 86.0;
pub const SUMMARY_Y: f32 = PANEL_Y + PANEL_H + 36.0;
pub const SUMMARY_LINE_H: f32 = 26.0;

pub const SPHERE_RADIUS_PX: f32 = 9.0;
/// Readout anchors in world coordinates, top left of the tube view.
pub const READOUT_X_M: f64 = -0.045;
pub const TIME_READOUT_Y_M: f64 = 2.1;
pub const DISTANCE_READOUT_Y_M: f64 = 2.05;
/// Frames can stall (window drag, export); never replay more than this many ticks at once.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const TUBE_FILL: Color = Color::new(0.68, 0.85, 0.90, 0.6);
pub const TUBE_OUTLINE: Color = Color::new(0.36, 0.55, 0.62, 1.0);
pub const SPHERE_FILL: Color = Color::new(0.90, 0.16, 0.16, 1.0);
pub const SPHERE_OUTLINE: Color = Color::new(0.47, 0.08, 0.08, 1.0);
pub const ERROR_TEXT: Color = Color::new(0.75, 0.12, 0.12, 1.0);
