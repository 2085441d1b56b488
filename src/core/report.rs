use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::settling::Simulation;

/// Everything the results panel shows, in a serializable shape.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub generated_at: String,
    pub model: &'static str,
    pub fluid_density_kg_m3: f64,
    pub sphere_density_kg_m3: f64,
    pub sphere_radius_m: f64,
    pub viscosity_pa_s: f64,
    pub terminal_velocity_mps: f64,
    pub effective_gravity_mps2: f64,
    pub sphere_mass_kg: f64,
    pub settle_time_s: Option<f64>,
}

impl Summary {
    pub fn new(sim: &Simulation, generated_at: DateTime<Local>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339(),
            model: sim.model.label(),
            fluid_density_kg_m3: sim.parameters.fluid_density_kg_m3,
            sphere_density_kg_m3: sim.parameters.sphere_density_kg_m3,
            sphere_radius_m: sim.parameters.sphere_radius_m,
            viscosity_pa_s: sim.derived.viscosity_pa_s,
            terminal_velocity_mps: sim.derived.terminal_velocity_mps,
            effective_gravity_mps2: sim.derived.effective_gravity_mps2,
            sphere_mass_kg: sim.derived.sphere_mass_kg,
            settle_time_s: sim.trajectory.settle_time_s(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let settle = match self.settle_time_s {
            Some(t) => format!("Reaches tube floor: {t:.2} s"),
            None => "Reaches tube floor: not within horizon".to_string(),
        };
        vec![
            format!("Fluid density: {:.0} kg/m^3", self.fluid_density_kg_m3),
            format!("Sphere density: {:.0} kg/m^3", self.sphere_density_kg_m3),
            format!("Sphere radius: {:.3} m", self.sphere_radius_m),
            format!("Fluid viscosity: {:.6} Pa.s", self.viscosity_pa_s),
            format!("Terminal velocity: {:.4} m/s", self.terminal_velocity_mps),
            format!(
                "Effective acceleration: {:.4} m/s^2",
                self.effective_gravity_mps2
            ),
            settle,
        ]
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::settling::{SimulationConfig, SimulationParameters, simulate};

    fn summary() -> Summary {
        let sim = simulate(SimulationParameters::default(), &SimulationConfig::default())
            .expect("default parameters are valid");
        let at = Local
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("unambiguous local time");
        Summary::new(&sim, at)
    }

    #[test]
    fn lines_use_fixed_precision() {
        let lines = summary().lines();
        assert_eq!(lines[0], "Fluid density: 1000 kg/m^3");
        assert_eq!(lines[1], "Sphere density: 2500 kg/m^3");
        assert_eq!(lines[2], "Sphere radius: 0.005 m");
        assert_eq!(lines[3], "Fluid viscosity: 0.000767 Pa.s");
        assert_eq!(lines[4], "Terminal velocity: 63.9858 m/s");
        assert_eq!(lines[5], "Effective acceleration: 5.8860 m/s^2");
        assert_eq!(lines[6], "Reaches tube floor: 0.80 s");
    }

    #[test]
    fn json_carries_derived_values() {
        let json = summary().to_json().expect("summary serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["model"], "recurrence");
        assert_eq!(value["fluid_density_kg_m3"], 1000.0);
        assert!(value["generated_at"].as_str().is_some_and(|s| s.starts_with("2026-03-01")));
        assert!(value["settle_time_s"].as_f64().is_some());
    }
}
