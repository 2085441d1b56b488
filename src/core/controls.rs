use crate::core::settling::SimulationParameters;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parameter {
    FluidDensity,
    Temperature,
    Pressure,
    SphereDensity,
    SphereRadius,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub parameter: Parameter,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub decimals: usize,
}

pub const SLIDERS: [SliderSpec; 5] = [
    SliderSpec {
        parameter: Parameter::FluidDensity,
        label: "Fluid density (kg/m^3)",
        min: 500.0,
        max: 2000.0,
        step: 50.0,
        default: 1000.0,
        decimals: 0,
    },
    SliderSpec {
        parameter: Parameter::Temperature,
        label: "Fluid temperature (C)",
        min: 0.0,
        max: 100.0,
        step: 5.0,
        default: 25.0,
        decimals: 0,
    },
    SliderSpec {
        parameter: Parameter::Pressure,
        label: "Pressure (atm)",
        min: 0.5,
        max: 2.0,
        step: 0.1,
        default: 1.0,
        decimals: 1,
    },
    SliderSpec {
        parameter: Parameter::SphereDensity,
        label: "Sphere density (kg/m^3)",
        min: 1000.0,
        max: 5000.0,
        step: 100.0,
        default: 2500.0,
        decimals: 0,
    },
    SliderSpec {
        parameter: Parameter::SphereRadius,
        label: "Sphere radius (m)",
        min: 0.001,
        max: 0.02,
        step: 0.001,
        default: 0.005,
        decimals: 3,
    },
];

impl SliderSpec {
    pub fn for_parameter(parameter: Parameter) -> &'static SliderSpec {
        match parameter {
            Parameter::FluidDensity => &SLIDERS[0],
            Parameter::Temperature => &SLIDERS[1],
            Parameter::Pressure => &SLIDERS[2],
            Parameter::SphereDensity => &SLIDERS[3],
            Parameter::SphereRadius => &SLIDERS[4],
        }
    }

    /// Clamps to the range and rounds to the nearest step counted from `min`.
    /// The result is rounded to the slider's display precision so repeated
    /// snapping is stable.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).clamp(self.min, self.max);
        let scale = 10f64.powi(self.decimals as i32);
        (snapped * scale).round() / scale
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals)
    }
}

pub fn get(params: &SimulationParameters, parameter: Parameter) -> f64 {
    match parameter {
        Parameter::FluidDensity => params.fluid_density_kg_m3,
        Parameter::Temperature => params.temperature_c,
        Parameter::Pressure => params.pressure_atm,
        Parameter::SphereDensity => params.sphere_density_kg_m3,
        Parameter::SphereRadius => params.sphere_radius_m,
    }
}

pub fn set(params: &mut SimulationParameters, parameter: Parameter, value: f64) {
    let slot = match parameter {
        Parameter::FluidDensity => &mut params.fluid_density_kg_m3,
        Parameter::Temperature => &mut params.temperature_c,
        Parameter::Pressure => &mut params.pressure_atm,
        Parameter::SphereDensity => &mut params.sphere_density_kg_m3,
        Parameter::SphereRadius => &mut params.sphere_radius_m,
    };
    *slot = value;
}

/// Snaps every parameter onto its slider grid.
pub fn snap_all(params: SimulationParameters) -> SimulationParameters {
    let mut snapped = params;
    for spec in &SLIDERS {
        set(&mut snapped, spec.parameter, spec.snap(get(&params, spec.parameter)));
    }
    snapped
}

pub fn slider_defaults() -> SimulationParameters {
    let mut params = SimulationParameters::default();
    for spec in &SLIDERS {
        set(&mut params, spec.parameter, spec.default);
    }
    params
}
