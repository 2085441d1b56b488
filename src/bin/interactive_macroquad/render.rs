use macroquad::prelude::*;
use viscous_fall::core::playback::FrameReadout;
use viscous_fall::core::window::{PlotRect, TUBE_HALF_WIDTH_M, height_ticks};

use crate::constants::{
    DISTANCE_READOUT_Y_M, READOUT_X_M, SPHERE_FILL, SPHERE_OUTLINE, SPHERE_RADIUS_PX,
    TIME_READOUT_Y_M, TUBE_FILL, TUBE_OUTLINE,
};

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_frame_border(rect: &PlotRect) {
    draw_rectangle_lines(
        rect.left,
        rect.top,
        rect.width,
        rect.height,
        1.5,
        Color::from_rgba(190, 196, 204, 255),
    );
}

pub(crate) fn draw_height_axis(rect: &PlotRect, tube_height_m: f64, font: Option<&Font>) {
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    for value in height_ticks(tube_height_m) {
        let (_, y) = rect.world_to_screen(0.0, value);
        draw_line(rect.left - 6.0, y, rect.left, y, 1.5, DARKGRAY);
        let label = format!("{value:.1}");
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (rect.left - 10.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }
    draw_ui_text(
        "Height (m)",
        rect.left - 60.0,
        rect.top - 10.0,
        18,
        label_color,
        font,
    );
}

pub(crate) fn draw_tube(rect: &PlotRect, tube_height_m: f64) {
    let (x0, y_top) = rect.world_to_screen(-TUBE_HALF_WIDTH_M, tube_height_m);
    let (x1, y_bottom) = rect.world_to_screen(TUBE_HALF_WIDTH_M, 0.0);
    draw_rectangle(x0, y_top, x1 - x0, y_bottom - y_top, TUBE_FILL);
    draw_line(x0, y_top, x0, y_bottom, 2.0, TUBE_OUTLINE);
    draw_line(x1, y_top, x1, y_bottom, 2.0, TUBE_OUTLINE);
    draw_line(x0, y_bottom, x1, y_bottom, 3.0, TUBE_OUTLINE);
}

pub(crate) fn draw_sphere(rect: &PlotRect, height_m: f64) {
    let (x, y) = rect.world_to_screen(0.0, height_m);
    draw_circle(x, y, SPHERE_RADIUS_PX, SPHERE_FILL);
    draw_circle_lines(x, y, SPHERE_RADIUS_PX, 2.0, SPHERE_OUTLINE);
}

pub(crate) fn draw_readouts(rect: &PlotRect, readout: &FrameReadout, font: Option<&Font>) {
    let (x, y_time) = rect.world_to_screen(READOUT_X_M, TIME_READOUT_Y_M);
    let (_, y_distance) = rect.world_to_screen(READOUT_X_M, DISTANCE_READOUT_Y_M);
    draw_ui_text(&readout.time_text(), x, y_time, 20, BLACK, font);
    draw_ui_text(&readout.distance_text(), x, y_distance + 6.0, 20, BLACK, font);
}
