use chrono::Local;
use viscous_fall::core::config::AppConfig;
use viscous_fall::core::controls::{SLIDERS, get, slider_defaults};
use viscous_fall::core::error::DomainError;
use viscous_fall::core::playback::{Action, FrameReadout, PlaybackState, apply, retarget};
use viscous_fall::core::report::Summary;
use viscous_fall::core::settling::{Simulation, SimulationParameters, simulate};

pub(crate) struct AppRuntime {
    pub(crate) config: AppConfig,
    pub(crate) params: SimulationParameters,
    /// Raw slider positions; snapped values live in `params`.
    pub(crate) slider_values: [f32; SLIDERS.len()],
    pub(crate) simulation: Result<Simulation, DomainError>,
    pub(crate) summary: Option<Summary>,
    pub(crate) playback: PlaybackState,
    pub(crate) tick_accumulator_s: f32,
    pub(crate) status_line: String,
    pub(crate) full_redraw_pending: bool,
}

impl AppRuntime {
    pub(crate) fn new(config: AppConfig) -> Self {
        let params = slider_defaults();
        let simulation = simulate(params, &config.simulation);
        let mut state = Self {
            config,
            params,
            slider_values: SLIDERS.map(|spec| get(&params, spec.parameter) as f32),
            simulation,
            summary: None,
            playback: PlaybackState::new(),
            tick_accumulator_s: 0.0,
            status_line: "Ready".to_string(),
            full_redraw_pending: false,
        };
        state.refresh_summary();
        state
    }

    /// Recomputes the trajectory for the current parameters. The playback
    /// index is kept and re-anchored on the new samples; parameters outside
    /// the physical domain halt playback.
    pub(crate) fn recompute(&mut self) {
        self.simulation = simulate(self.params, &self.config.simulation);
        match &self.simulation {
            Ok(sim) => self.playback = retarget(self.playback, &sim.trajectory),
            Err(e) => {
                let message = format!("Cannot simulate: {e}");
                self.halt(message);
            }
        }
        self.refresh_summary();
    }

    /// Stops a running playback and shows why.
    pub(crate) fn halt(&mut self, message: String) {
        if self.playback.is_playing {
            self.playback = apply(self.playback, Action::Stop).state;
            self.tick_accumulator_s = 0.0;
        }
        self.status_line = message;
    }

    fn refresh_summary(&mut self) {
        self.summary = self
            .simulation
            .as_ref()
            .ok()
            .map(|sim| Summary::new(sim, Local::now()));
        match &self.simulation {
            Ok(sim) => log::info!(
                "Trajectory: {} samples, settles at {}",
                sim.trajectory.len(),
                sim.trajectory
                    .settle_time_s()
                    .map_or("never".to_string(), |t| format!("{t:.2} s"))
            ),
            Err(e) => log::warn!("Cannot simulate {:?}: {e}", self.params),
        }
    }

    pub(crate) fn readout(&self) -> Option<FrameReadout> {
        let sim = self.simulation.as_ref().ok()?;
        FrameReadout::at(&sim.trajectory, self.playback.frame_index)
    }

    pub(crate) fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw_pending)
    }

    pub(crate) fn tick_interval_s(&self) -> f32 {
        self.config.playback.frame_interval_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use viscous_fall::core::controls::{Parameter, set};
    use viscous_fall::core::playback::{Phase, tick};

    use super::*;

    fn playing_runtime(ticks: usize) -> AppRuntime {
        let mut rt = AppRuntime::new(AppConfig::default());
        rt.playback = apply(rt.playback, Action::Play).state;
        let sim = rt.simulation.clone().expect("default parameters are valid");
        for _ in 0..ticks {
            rt.playback = tick(rt.playback, &sim.trajectory).state;
        }
        rt
    }

    #[test]
    fn recompute_releases_a_settled_sphere_when_the_new_fall_is_slower() {
        let mut rt = playing_runtime(20);
        assert!(rt.playback.has_settled);

        set(&mut rt.params, Parameter::SphereDensity, 1100.0);
        set(&mut rt.params, Parameter::SphereRadius, 0.001);
        rt.recompute();

        assert!(!rt.playback.has_settled);
        assert_ne!(rt.playback.phase(), Phase::Settled);
        let readout = rt.readout().expect("frame exists");
        assert!(readout.height_m > 0.0);
    }

    #[test]
    fn recompute_with_invalid_parameters_stops_playback() {
        let mut rt = playing_runtime(2);
        assert!(rt.playback.is_playing);

        rt.params.sphere_density_kg_m3 = rt.params.fluid_density_kg_m3;
        rt.recompute();

        assert!(rt.simulation.is_err());
        assert!(!rt.playback.is_playing);
        assert_eq!(rt.playback.phase(), Phase::Stopped);
        assert!(rt.status_line.starts_with("Cannot simulate"));
        assert!(rt.summary.is_none());
    }
}
