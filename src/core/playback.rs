use crate::core::settling::Trajectory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Play,
    Pause,
    Stop,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Stopped,
    /// The sphere is resting on the floor.
    Settled,
    /// The horizon ran out before the sphere reached the floor.
    Finished,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Settled => "Settled",
            Self::Finished => "Finished",
        }
    }
}

/// What the renderer has to do after a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Status or readouts changed; the scene is otherwise the same.
    Frame,
    /// Rebuild the whole view from scratch.
    Full,
}

/// Playback flags plus the frame the display currently shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_stopped: bool,
    pub has_settled: bool,
    /// Set when playback ran past the last sample without landing.
    pub has_finished: bool,
    pub frame_index: usize,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.is_stopped {
            Phase::Stopped
        } else if self.is_playing {
            Phase::Playing
        } else if self.has_settled {
            Phase::Settled
        } else if self.has_finished {
            Phase::Finished
        } else if self.frame_index > 0 {
            Phase::Paused
        } else {
            Phase::Idle
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: PlaybackState,
    pub redraw: Redraw,
}

/// Applies a user action. Actions that do not change the state are no-ops and
/// request no redraw.
pub fn apply(state: PlaybackState, action: Action) -> Transition {
    let next = match action {
        Action::Play => PlaybackState {
            is_playing: true,
            is_stopped: false,
            has_settled: false,
            has_finished: false,
            // A completed fall replays from the top of the tube.
            frame_index: if state.has_settled || state.has_finished {
                0
            } else {
                state.frame_index
            },
        },
        Action::Pause if state.is_playing => PlaybackState {
            is_playing: false,
            ..state
        },
        Action::Pause => state,
        Action::Stop => PlaybackState {
            is_playing: false,
            is_stopped: true,
            ..state
        },
        Action::Reset => PlaybackState::new(),
    };

    let redraw = if next == state {
        Redraw::None
    } else if action == Action::Reset {
        Redraw::Full
    } else {
        Redraw::Frame
    };
    log::debug!("{action:?}: {:?} -> {:?}", state.phase(), next.phase());
    Transition {
        state: next,
        redraw,
    }
}

/// Readouts for the frame being displayed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReadout {
    pub frame_index: usize,
    pub time_s: f64,
    pub height_m: f64,
    pub distance_m: f64,
}

impl FrameReadout {
    pub fn at(trajectory: &Trajectory, frame_index: usize) -> Option<Self> {
        let sample = trajectory.get(frame_index)?;
        Some(Self {
            frame_index,
            time_s: sample.time_s,
            height_m: sample.height_m,
            distance_m: trajectory.start_height_m() - sample.height_m,
        })
    }

    pub fn time_text(&self) -> String {
        format!("Time: {:.2} s", self.time_s)
    }

    pub fn distance_text(&self) -> String {
        format!("Distance: {:.2} m", self.distance_m)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Stopped, paused or idle: keep showing the current frame.
    Held,
    /// The sphere moved to a new sample.
    Advanced(FrameReadout),
    /// The current sample is on the floor; playback ended.
    Settled,
    /// The last sample of the horizon was reached above the floor.
    EndOfTrajectory,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    pub state: PlaybackState,
    pub outcome: TickOutcome,
    pub redraw: Redraw,
}

/// Frame-advance step, called on a fixed cadence by the render loop.
/// Only reads the trajectory.
pub fn tick(state: PlaybackState, trajectory: &Trajectory) -> Tick {
    let held = Tick {
        state,
        outcome: TickOutcome::Held,
        redraw: Redraw::None,
    };
    if state.is_stopped || !state.is_playing {
        return held;
    }

    let Some(current) = trajectory.get(state.frame_index) else {
        return Tick {
            state: PlaybackState {
                is_playing: false,
                has_finished: true,
                ..state
            },
            outcome: TickOutcome::EndOfTrajectory,
            redraw: Redraw::Frame,
        };
    };

    if current.height_m <= 0.0 {
        return Tick {
            state: PlaybackState {
                is_playing: false,
                has_settled: true,
                ..state
            },
            outcome: TickOutcome::Settled,
            redraw: Redraw::Frame,
        };
    }

    let next_index = state.frame_index + 1;
    match FrameReadout::at(trajectory, next_index) {
        Some(readout) => Tick {
            state: PlaybackState {
                frame_index: next_index,
                ..state
            },
            outcome: TickOutcome::Advanced(readout),
            redraw: Redraw::Frame,
        },
        None => Tick {
            state: PlaybackState {
                is_playing: false,
                has_finished: true,
                ..state
            },
            outcome: TickOutcome::EndOfTrajectory,
            redraw: Redraw::Frame,
        },
    }
}

/// Re-anchors the state on a freshly computed trajectory. The frame index is
/// kept (clamped to the horizon) and the settled/finished flags are re-derived
/// from the sample now under it, so a fall that no longer lands there resumes.
pub fn retarget(state: PlaybackState, trajectory: &Trajectory) -> PlaybackState {
    let last = trajectory.len().saturating_sub(1);
    let frame_index = state.frame_index.min(last);
    let Some(sample) = trajectory.get(frame_index) else {
        return PlaybackState::new();
    };
    let on_floor = sample.height_m <= 0.0;
    PlaybackState {
        frame_index,
        has_settled: state.has_settled && on_floor,
        has_finished: state.has_finished && frame_index == last && !on_floor,
        ..state
    }
}
