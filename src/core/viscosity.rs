use crate::core::error::DomainError;

/// Prefactor of the base correlation (Pa·s).
pub const CORRELATION_A: f64 = 2.414e-5;
pub const CORRELATION_B: f64 = 247.8;
/// Additive temperature offset (°C). The correlation has a pole at `-C`.
pub const CORRELATION_C: f64 = 140.0;
/// Reference density the empirical density factor is normalised against.
pub const REFERENCE_DENSITY_KG_M3: f64 = 1000.0;

/// Unchecked evaluation of the correlation.
///
/// `A * 10^(B / (T + C)) * sqrt(rho / 1000) / P`. Produces non-finite values
/// on the pole and for zero pressure; use [`viscosity`] for a checked result.
pub fn viscosity_raw(temperature_c: f64, pressure_atm: f64, fluid_density_kg_m3: f64) -> f64 {
    let base = CORRELATION_A * 10f64.powf(CORRELATION_B / (temperature_c + CORRELATION_C));
    let density_factor = (fluid_density_kg_m3 / REFERENCE_DENSITY_KG_M3).sqrt();
    (base * density_factor) / pressure_atm
}

/// Dynamic viscosity (Pa·s) for a fluid at the given temperature, pressure
/// and density.
pub fn viscosity(
    temperature_c: f64,
    pressure_atm: f64,
    fluid_density_kg_m3: f64,
) -> Result<f64, DomainError> {
    if !temperature_c.is_finite() {
        return Err(DomainError::NonFinite {
            name: "temperature",
            value: temperature_c,
        });
    }
    if !pressure_atm.is_finite() {
        return Err(DomainError::NonFinite {
            name: "pressure",
            value: pressure_atm,
        });
    }
    if !fluid_density_kg_m3.is_finite() {
        return Err(DomainError::NonFinite {
            name: "fluid density",
            value: fluid_density_kg_m3,
        });
    }
    if pressure_atm <= 0.0 {
        return Err(DomainError::NonPositivePressure(pressure_atm));
    }
    if temperature_c + CORRELATION_C == 0.0 {
        return Err(DomainError::TemperaturePole(temperature_c));
    }
    if fluid_density_kg_m3 < 0.0 {
        return Err(DomainError::NegativeFluidDensity(fluid_density_kg_m3));
    }

    let mu = viscosity_raw(temperature_c, pressure_atm, fluid_density_kg_m3);
    if !mu.is_finite() || mu <= 0.0 {
        return Err(DomainError::InvalidViscosity(mu));
    }
    Ok(mu)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn water_like_defaults() {
        let mu = viscosity(25.0, 1.0, 1000.0).expect("defaults are valid");
        assert_close(mu, 7.665764e-4, 1e-9);
    }

    #[test]
    fn hot_dense_fluid_at_high_pressure() {
        let mu = viscosity(100.0, 2.0, 1500.0).expect("inputs are valid");
        assert_close(mu, 1.593136e-4, 1e-9);
    }

    #[test]
    fn viscosity_drops_with_temperature() {
        let cold = viscosity(0.0, 1.0, 1000.0).expect("valid");
        let hot = viscosity(100.0, 1.0, 1000.0).expect("valid");
        assert!(cold > hot);
    }

    #[test]
    fn rejects_zero_pressure() {
        let err = viscosity(25.0, 0.0, 1000.0).expect_err("zero pressure must fail");
        assert_eq!(err, DomainError::NonPositivePressure(0.0));
    }

    #[test]
    fn rejects_correlation_pole() {
        let err = viscosity(-CORRELATION_C, 1.0, 1000.0).expect_err("pole must fail");
        assert_eq!(err, DomainError::TemperaturePole(-CORRELATION_C));
    }

    #[test]
    fn rejects_negative_density() {
        let err = viscosity(25.0, 1.0, -10.0).expect_err("negative density must fail");
        assert_eq!(err, DomainError::NegativeFluidDensity(-10.0));
    }

    #[test]
    fn zero_density_fluid_has_no_viscosity() {
        let err = viscosity(25.0, 1.0, 0.0).expect_err("zero viscosity must fail");
        assert_eq!(err, DomainError::InvalidViscosity(0.0));
    }

    #[test]
    fn raw_form_goes_non_finite_on_zero_pressure() {
        assert!(!viscosity_raw(25.0, 0.0, 1000.0).is_finite());
    }
}
