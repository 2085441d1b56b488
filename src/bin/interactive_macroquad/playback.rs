use chrono::Local;
use viscous_fall::core::export::export_gif;
use viscous_fall::core::playback::{Action, Redraw, TickOutcome, apply, tick};

use crate::constants::MAX_TICKS_PER_FRAME;
use crate::controls::FrameActions;
use crate::state::AppRuntime;

fn dispatch(state: &mut AppRuntime, action: Action) {
    let transition = apply(state.playback, action);
    state.playback = transition.state;
    match transition.redraw {
        Redraw::None => {}
        Redraw::Frame => state.status_line = format!("{action:?}"),
        Redraw::Full => {
            state.tick_accumulator_s = 0.0;
            state.full_redraw_pending = true;
            state.status_line = "Reset: sphere back at the surface".to_string();
        }
    }
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.play {
        if state.simulation.is_ok() {
            dispatch(state, Action::Play);
        } else {
            state.status_line = "Fix the parameters before playing".to_string();
        }
    }
    if actions.pause {
        dispatch(state, Action::Pause);
    }
    if actions.stop {
        dispatch(state, Action::Stop);
    }
    if actions.reset {
        dispatch(state, Action::Reset);
    }
    if actions.export {
        export_current(state);
    }
}

fn export_current(state: &mut AppRuntime) {
    let sim = match &state.simulation {
        Ok(sim) => sim,
        Err(e) => {
            state.status_line = format!("Cannot export: {e}");
            return;
        }
    };
    state.status_line = match export_gif(sim, &state.config.export, Local::now()) {
        Ok(path) => format!("Saved {}", path.display()),
        Err(e) => {
            log::warn!("GIF export failed: {e}");
            format!("Export failed: {e}")
        }
    };
}

/// Feeds wall-clock frame time into the fixed-cadence frame advance.
pub(crate) fn step_playback(state: &mut AppRuntime, frame_dt: f32) {
    if !state.playback.is_playing {
        state.tick_accumulator_s = 0.0;
        return;
    }
    let sim = match &state.simulation {
        Ok(sim) => sim,
        Err(e) => {
            let message = format!("Cannot simulate: {e}");
            state.halt(message);
            return;
        }
    };

    let interval = state.tick_interval_s();
    state.tick_accumulator_s += frame_dt;
    let mut ticks = 0;
    while state.tick_accumulator_s >= interval && ticks < MAX_TICKS_PER_FRAME {
        state.tick_accumulator_s -= interval;
        ticks += 1;

        let step = tick(state.playback, &sim.trajectory);
        state.playback = step.state;
        match step.outcome {
            TickOutcome::Advanced(_) | TickOutcome::Held => {}
            TickOutcome::Settled => {
                state.status_line = "Sphere reached the tube floor".to_string();
                break;
            }
            TickOutcome::EndOfTrajectory => {
                state.status_line = "End of recorded horizon".to_string();
                break;
            }
        }
    }
    if ticks == MAX_TICKS_PER_FRAME {
        state.tick_accumulator_s = state.tick_accumulator_s.min(interval);
    }
}

#[cfg(test)]
mod tests {
    use viscous_fall::core::config::AppConfig;
    use viscous_fall::core::playback::Phase;

    use super::*;

    fn runtime() -> AppRuntime {
        AppRuntime::new(AppConfig::default())
    }

    #[test]
    fn playing_with_a_failed_simulation_halts() {
        let mut rt = runtime();
        dispatch(&mut rt, Action::Play);
        rt.params.sphere_density_kg_m3 = rt.params.fluid_density_kg_m3;
        rt.simulation = viscous_fall::core::settling::simulate(rt.params, &rt.config.simulation);
        assert!(rt.playback.is_playing);

        step_playback(&mut rt, 1.0);
        assert!(!rt.playback.is_playing);
        assert!(rt.playback.is_stopped);

        // Fixing the parameters does not restart playback on its own.
        rt.params.sphere_density_kg_m3 = 2500.0;
        rt.recompute();
        assert!(rt.simulation.is_ok());
        step_playback(&mut rt, 1.0);
        assert!(!rt.playback.is_playing);
        assert_eq!(rt.playback.frame_index, 0);
    }

    #[test]
    fn play_is_refused_while_parameters_are_invalid() {
        let mut rt = runtime();
        rt.params.sphere_density_kg_m3 = rt.params.fluid_density_kg_m3;
        rt.recompute();
        apply_actions(
            &mut rt,
            FrameActions {
                play: true,
                ..FrameActions::default()
            },
        );
        assert!(!rt.playback.is_playing);
        assert_eq!(rt.status_line, "Fix the parameters before playing");
    }

    #[test]
    fn fixed_cadence_advances_one_frame_per_interval() {
        let mut rt = runtime();
        dispatch(&mut rt, Action::Play);
        step_playback(&mut rt, 0.25);
        assert_eq!(rt.playback.frame_index, 2);
        assert_eq!(rt.playback.phase(), Phase::Playing);
    }
}
