use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, ERROR_TEXT, PANEL_X, SUMMARY_LINE_H, SUMMARY_Y, TITLE_Y};
use crate::controls::phase_text;
use crate::render::draw_ui_text;
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, font: Option<&Font>) {
    draw_header_block(font);
    draw_summary_block(state, font);
    draw_status_block(state, font);
}

fn draw_header_block(font: Option<&Font>) {
    draw_ui_text(
        "Viscous Fall - sphere settling in a fluid column",
        PANEL_X,
        TITLE_Y,
        30,
        Color::from_rgba(30, 30, 35, 255),
        font,
    );
    draw_ui_text(
        "Controls: sliders set the fluid and sphere | Space play/pause | S stop | R reset | E export GIF",
        PANEL_X,
        CONTROLS_Y,
        18,
        DARKGRAY,
        font,
    );
}

fn draw_summary_block(state: &AppRuntime, font: Option<&Font>) {
    let mut y = SUMMARY_Y;
    draw_ui_text("Results", PANEL_X, y, 22, BLACK, font);
    y += SUMMARY_LINE_H;

    match (&state.summary, &state.simulation) {
        (Some(summary), _) => {
            for line in summary.lines() {
                draw_ui_text(&line, PANEL_X, y, 18, DARKGRAY, font);
                y += SUMMARY_LINE_H;
            }
            draw_ui_text(
                &format!("Model: {}", summary.model),
                PANEL_X,
                y,
                16,
                GRAY,
                font,
            );
        }
        (None, Err(e)) => {
            draw_ui_text("Cannot simulate:", PANEL_X, y, 18, ERROR_TEXT, font);
            draw_ui_text(&e.to_string(), PANEL_X, y + SUMMARY_LINE_H, 16, ERROR_TEXT, font);
        }
        (None, Ok(_)) => {}
    }
}

fn draw_status_block(state: &AppRuntime, font: Option<&Font>) {
    let playback = state.playback;
    let frames = state
        .simulation
        .as_ref()
        .map_or(0, |sim| sim.trajectory.len());
    draw_ui_text(
        &format!(
            "State: {} | Frame {} of {} | {}",
            phase_text(playback.phase()),
            playback.frame_index + 1,
            frames,
            state.status_line
        ),
        PANEL_X,
        screen_height() - 18.0,
        18,
        BLUE,
        font,
    );
}
