use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};
use viscous_fall::core::controls::{SLIDERS, get, set};
use viscous_fall::core::playback::Phase;

use crate::constants::{PANEL_H, PANEL_W, PANEL_X, PANEL_Y};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) play: bool,
    pub(crate) pause: bool,
    pub(crate) stop: bool,
    pub(crate) reset: bool,
    pub(crate) export: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            play: self.play || other.play,
            pause: self.pause || other.pause,
            stop: self.stop || other.stop,
            reset: self.reset || other.reset,
            export: self.export || other.export,
        }
    }
}

pub(crate) fn hotkey_actions(is_playing: bool) -> FrameActions {
    let space = is_key_pressed(KeyCode::Space);
    FrameActions {
        play: space && !is_playing,
        pause: space && is_playing,
        stop: is_key_pressed(KeyCode::S),
        reset: is_key_pressed(KeyCode::R),
        export: is_key_pressed(KeyCode::E),
    }
}

/// Draws the parameter sliders and playback buttons. Returns the actions
/// clicked this frame and whether any snapped parameter changed.
pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> (FrameActions, bool) {
    let mut actions = FrameActions::default();
    let mut params_changed = false;

    widgets::Window::new(hash!(), vec2(PANEL_X, PANEL_Y), vec2(PANEL_W, PANEL_H))
        .label("Parameters")
        .ui(&mut *root_ui(), |ui| {
            for (i, spec) in SLIDERS.iter().enumerate() {
                let raw = &mut state.slider_values[i];
                ui.slider(
                    hash!("slider", i),
                    spec.label,
                    spec.min as f32..spec.max as f32,
                    raw,
                );
                let snapped = spec.snap(*raw as f64);
                *raw = snapped as f32;
                let current = get(&state.params, spec.parameter);
                if snapped != current {
                    set(&mut state.params, spec.parameter, snapped);
                    params_changed = true;
                }
                ui.label(None, &format!("    = {}", spec.format(snapped)));
            }
            ui.separator();
            if ui.button(None, "Play (Space)") {
                actions.play = true;
            }
            if ui.button(None, "Pause (Space)") {
                actions.pause = true;
            }
            if ui.button(None, "Stop (S)") {
                actions.stop = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(None, "Export GIF (E)") {
                actions.export = true;
            }
        });

    (actions, params_changed)
}

pub(crate) fn phase_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Settled => "Settled on the tube floor",
        Phase::Finished => "Finished without landing",
        other => other.label(),
    }
}
