use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::viscosity::viscosity;

pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const TUBE_HEIGHT_M: f64 = 2.0;
pub const TIME_HORIZON_S: f64 = 30.0;
pub const TIME_STEP_S: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub fluid_density_kg_m3: f64,
    pub temperature_c: f64,
    pub pressure_atm: f64,
    pub sphere_density_kg_m3: f64,
    pub sphere_radius_m: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            fluid_density_kg_m3: 1000.0,
            temperature_c: 25.0,
            pressure_atm: 1.0,
            sphere_density_kg_m3: 2500.0,
            sphere_radius_m: 0.005,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DerivedQuantities {
    pub viscosity_pa_s: f64,
    pub sphere_volume_m3: f64,
    pub sphere_mass_kg: f64,
    pub effective_gravity_mps2: f64,
    pub terminal_velocity_mps: f64,
}

/// How heights are produced from the derived quantities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryModel {
    /// Forward recurrence with the absolute elapsed time inside the decay term.
    /// Reproduces the dashboard this tool replaces sample for sample.
    #[default]
    Recurrence,
    /// Direct evaluation of the exponential-approach position equation.
    /// Not sample-compatible with `Recurrence`.
    ClosedForm,
}

impl TrajectoryModel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Recurrence => "recurrence",
            Self::ClosedForm => "closed form",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tube_height_m: f64,
    pub time_horizon_s: f64,
    pub time_step_s: f64,
    pub gravity_mps2: f64,
    pub model: TrajectoryModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tube_height_m: TUBE_HEIGHT_M,
            time_horizon_s: TIME_HORIZON_S,
            time_step_s: TIME_STEP_S,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            model: TrajectoryModel::Recurrence,
        }
    }
}

impl SimulationConfig {
    /// Number of grid points in `[0, horizon)`, spaced by the step.
    pub fn sample_count(&self) -> usize {
        let raw = (self.time_horizon_s / self.time_step_s).ceil();
        if raw.is_finite() && raw >= 1.0 {
            raw as usize
        } else {
            1
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time_s: f64,
    pub height_m: f64,
}

/// Heights over the fixed time grid. Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    samples: Vec<Sample>,
    start_height_m: f64,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).copied()
    }

    pub fn start_height_m(&self) -> f64 {
        self.start_height_m
    }

    /// Distance fallen from the top of the tube at `index`.
    pub fn distance_at(&self, index: usize) -> Option<f64> {
        self.get(index)
            .map(|sample| self.start_height_m - sample.height_m)
    }

    /// Index of the first sample resting on the tube floor.
    pub fn settle_index(&self) -> Option<usize> {
        self.samples.iter().position(|s| s.height_m <= 0.0)
    }

    pub fn settle_time_s(&self) -> Option<f64> {
        self.settle_index().map(|i| self.samples[i].time_s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub parameters: SimulationParameters,
    pub derived: DerivedQuantities,
    pub trajectory: Trajectory,
    pub model: TrajectoryModel,
}

pub fn sphere_volume(radius_m: f64) -> f64 {
    (4.0 / 3.0) * PI * radius_m.powi(3)
}

/// Gravity reduced by buoyancy. Negative when the sphere is lighter than the fluid.
pub fn effective_gravity(gravity_mps2: f64, fluid_density: f64, sphere_density: f64) -> f64 {
    gravity_mps2 * (1.0 - (fluid_density / sphere_density))
}

pub fn terminal_velocity(
    radius_m: f64,
    effective_gravity_mps2: f64,
    sphere_density: f64,
    fluid_density: f64,
    viscosity_pa_s: f64,
) -> f64 {
    (2.0 / 9.0) * (radius_m.powi(2) * effective_gravity_mps2 * (sphere_density - fluid_density))
        / viscosity_pa_s
}

fn check_finite(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { name, value })
    }
}

pub fn derive_quantities(
    params: SimulationParameters,
    gravity_mps2: f64,
) -> Result<DerivedQuantities, DomainError> {
    check_finite("sphere density", params.sphere_density_kg_m3)?;
    check_finite("sphere radius", params.sphere_radius_m)?;
    if params.sphere_density_kg_m3 <= 0.0 {
        return Err(DomainError::NonPositiveSphereDensity(
            params.sphere_density_kg_m3,
        ));
    }
    if params.sphere_radius_m <= 0.0 {
        return Err(DomainError::NonPositiveRadius(params.sphere_radius_m));
    }

    let mu = viscosity(
        params.temperature_c,
        params.pressure_atm,
        params.fluid_density_kg_m3,
    )?;

    let volume = sphere_volume(params.sphere_radius_m);
    let mass = params.sphere_density_kg_m3 * volume;

    if params.fluid_density_kg_m3 == params.sphere_density_kg_m3 {
        return Err(DomainError::NeutralBuoyancy(params.sphere_density_kg_m3));
    }
    let g_eff = effective_gravity(
        gravity_mps2,
        params.fluid_density_kg_m3,
        params.sphere_density_kg_m3,
    );
    if g_eff < 0.0 {
        return Err(DomainError::Buoyant {
            sphere: params.sphere_density_kg_m3,
            fluid: params.fluid_density_kg_m3,
        });
    }

    let v_t = terminal_velocity(
        params.sphere_radius_m,
        g_eff,
        params.sphere_density_kg_m3,
        params.fluid_density_kg_m3,
        mu,
    );
    if !v_t.is_finite() || v_t <= 0.0 {
        return Err(DomainError::InvalidTerminalVelocity(v_t));
    }

    Ok(DerivedQuantities {
        viscosity_pa_s: mu,
        sphere_volume_m3: volume,
        sphere_mass_kg: mass,
        effective_gravity_mps2: g_eff,
        terminal_velocity_mps: v_t,
    })
}

fn recurrence_heights(derived: &DerivedQuantities, config: &SimulationConfig) -> Vec<Sample> {
    let count = config.sample_count();
    let dt = config.time_step_s;
    let g_eff = derived.effective_gravity_mps2;
    let v_t = derived.terminal_velocity_mps;

    let mut samples = Vec::with_capacity(count);
    samples.push(Sample {
        time_s: 0.0,
        height_m: config.tube_height_m,
    });
    for i in 1..count {
        let time_s = i as f64 * dt;
        let prev = samples[i - 1].height_m;
        let height_m = if prev > 0.0 {
            // Decay uses elapsed time since release, not time since the last step.
            let dy = v_t * (1.0 - (-g_eff * time_s / v_t).exp()) * dt;
            (prev - dy).max(0.0)
        } else {
            0.0
        };
        samples.push(Sample { time_s, height_m });
    }
    samples
}

fn closed_form_heights(derived: &DerivedQuantities, config: &SimulationConfig) -> Vec<Sample> {
    let count = config.sample_count();
    let g_eff = derived.effective_gravity_mps2;
    let v_t = derived.terminal_velocity_mps;
    let relax = v_t * v_t / g_eff;

    let mut landed = false;
    (0..count)
        .map(|i| {
            let time_s = i as f64 * config.time_step_s;
            let height_m = if landed {
                0.0
            } else {
                let y = config.tube_height_m - v_t * time_s
                    - relax * (-g_eff * time_s / v_t).exp_m1();
                y.max(0.0)
            };
            landed = height_m <= 0.0;
            Sample { time_s, height_m }
        })
        .collect()
}

pub fn generate_trajectory(derived: &DerivedQuantities, config: &SimulationConfig) -> Trajectory {
    let samples = match config.model {
        TrajectoryModel::Recurrence => recurrence_heights(derived, config),
        TrajectoryModel::ClosedForm => closed_form_heights(derived, config),
    };
    Trajectory {
        samples,
        start_height_m: config.tube_height_m,
    }
}

/// Validates the parameters, derives the physical quantities and produces the
/// full trajectory. Any domain error aborts before a single sample exists.
pub fn simulate(
    params: SimulationParameters,
    config: &SimulationConfig,
) -> Result<Simulation, DomainError> {
    let derived = derive_quantities(params, config.gravity_mps2)?;
    let trajectory = generate_trajectory(&derived, config);
    Ok(Simulation {
        parameters: params,
        derived,
        trajectory,
        model: config.model,
    })
}
