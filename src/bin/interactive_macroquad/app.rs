use macroquad::prelude::*;
use viscous_fall::core::config::AppConfig;
use viscous_fall::core::window::fit_plot_rect;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES,
    PLOT_LEFT, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::playback::{apply_actions, step_playback};
use crate::render::{
    draw_frame_border, draw_height_axis, draw_readouts, draw_sphere, draw_tube,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Viscous Fall".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            log::warn!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid configuration: {err}. Using defaults.");
            AppConfig::default()
        }
    };
    let mut state = AppRuntime::new(config);

    loop {
        let frame_dt = get_frame_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let (panel_actions, params_changed) = draw_control_panel(&mut state);
        let actions = hotkey_actions(state.playback.is_playing).merge(panel_actions);
        if params_changed {
            state.recompute();
        }
        apply_actions(&mut state, actions);
        if state.take_full_redraw() {
            state.recompute();
        }
        step_playback(&mut state, frame_dt);

        let rect = fit_plot_rect(
            PLOT_LEFT,
            TOP_MARGIN,
            screen_w - PLOT_LEFT - RIGHT_MARGIN,
            screen_h - TOP_MARGIN - BOTTOM_MARGIN,
        );
        let tube_height_m = state.config.simulation.tube_height_m;

        clear_background(BACKGROUND);
        draw_frame_border(&rect);
        draw_height_axis(&rect, tube_height_m, ui_font.as_ref());
        draw_tube(&rect, tube_height_m);

        match state.readout() {
            Some(readout) => {
                draw_sphere(&rect, readout.height_m);
                draw_readouts(&rect, &readout, ui_font.as_ref());
            }
            None => draw_sphere(&rect, tube_height_m),
        }

        draw_hud(&state, ui_font.as_ref());

        next_frame().await;
    }
}
