use std::path::PathBuf;

/// Input combinations the viscosity correlation or the Stokes closed form
/// cannot evaluate to a finite, physically meaningful number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("pressure must be positive, got {0} atm")]
    NonPositivePressure(f64),
    #[error("temperature {0} °C sits on the viscosity correlation pole")]
    TemperaturePole(f64),
    #[error("fluid density cannot be negative, got {0} kg/m³")]
    NegativeFluidDensity(f64),
    #[error("sphere density must be positive, got {0} kg/m³")]
    NonPositiveSphereDensity(f64),
    #[error("sphere radius must be positive, got {0} m")]
    NonPositiveRadius(f64),
    #[error("viscosity evaluated to {0} Pa·s")]
    InvalidViscosity(f64),
    #[error("sphere and fluid share the same density ({0} kg/m³), effective gravity is zero")]
    NeutralBuoyancy(f64),
    #[error("sphere ({sphere} kg/m³) is lighter than the fluid ({fluid} kg/m³) and would float")]
    Buoyant { sphere: f64, fluid: f64 },
    #[error("terminal velocity evaluated to {0} m/s")]
    InvalidTerminalVelocity(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{key} override '{value}' is not valid")]
    Override { key: &'static str, value: String },
    #[error("{0} must be > 0")]
    NonPositive(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not create output directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not render animation: {0}")]
    Render(String),
    #[error("trajectory has no frames to export")]
    Empty,
}
