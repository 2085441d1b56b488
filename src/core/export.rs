use std::path::PathBuf;

use chrono::{DateTime, Local};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::config::ExportConfig;
use crate::core::error::ExportError;
use crate::core::playback::FrameReadout;
use crate::core::settling::Simulation;
use crate::core::window::{
    TUBE_HALF_WIDTH_M, VIEW_X_MAX, VIEW_X_MIN, VIEW_Y_MAX, VIEW_Y_MIN, height_ticks,
};

const TUBE_FILL: RGBColor = RGBColor(173, 216, 230);
const SPHERE_RADIUS_PX: i32 = 10;

/// Frames worth recording: every sample up to and including the first one on
/// the floor, or the whole horizon if the sphere never lands.
pub fn export_frames(sim: &Simulation) -> Vec<FrameReadout> {
    let trajectory = &sim.trajectory;
    let last = trajectory
        .settle_index()
        .unwrap_or_else(|| trajectory.len().saturating_sub(1));
    (0..trajectory.len().min(last + 1))
        .filter_map(|i| FrameReadout::at(trajectory, i))
        .collect()
}

pub fn gif_file_name(now: DateTime<Local>) -> String {
    format!("viscous_fall_{}.gif", now.format("%Y%m%d-%H%M%S"))
}

fn render_err<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Render(err.to_string())
}

fn draw_frame<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    tube_height_m: f64,
    frame: &FrameReadout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption("Sphere settling in a fluid column", ("sans-serif", 18).into_font())
        .margin(12)
        .y_label_area_size(48)
        .build_cartesian_2d(VIEW_X_MIN..VIEW_X_MAX, VIEW_Y_MIN..VIEW_Y_MAX)?;

    let ticks = height_ticks(tube_height_m);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(ticks.len())
        .y_label_formatter(&|y| format!("{y:.1}"))
        .y_desc("Height (m)")
        .draw()?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(-TUBE_HALF_WIDTH_M, 0.0), (TUBE_HALF_WIDTH_M, tube_height_m)],
        TUBE_FILL.mix(0.6).filled(),
    )))?;
    chart.draw_series(std::iter::once(Circle::new(
        (0.0, frame.height_m),
        SPHERE_RADIUS_PX,
        RED.filled(),
    )))?;

    let text_style = ("sans-serif", 16).into_font();
    root.draw(&Text::new(frame.time_text(), (60, 40), text_style.clone()))?;
    root.draw(&Text::new(frame.distance_text(), (60, 60), text_style))?;
    Ok(())
}

/// Renders the recorded frames into an animated GIF and returns its path.
pub fn export_gif(
    sim: &Simulation,
    config: &ExportConfig,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    let frames = export_frames(sim);
    if frames.is_empty() {
        return Err(ExportError::Empty);
    }

    std::fs::create_dir_all(&config.output_dir).map_err(|source| ExportError::Io {
        path: config.output_dir.clone(),
        source,
    })?;
    let path = config.output_dir.join(gif_file_name(now));

    let root = BitMapBackend::gif(
        &path,
        (config.width, config.height),
        config.frame_delay_ms(),
    )
    .map_err(render_err)?
    .into_drawing_area();

    let tube_height_m = sim.trajectory.start_height_m();
    for frame in &frames {
        draw_frame(&root, tube_height_m, frame).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }

    log::info!(
        "Exported {} frames at {} fps to {}",
        frames.len(),
        config.fps,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::core::settling::{SimulationConfig, SimulationParameters, simulate};

    #[test]
    fn frames_stop_at_first_floor_sample() {
        let sim = simulate(SimulationParameters::default(), &SimulationConfig::default())
            .expect("default parameters are valid");
        let frames = export_frames(&sim);
        assert_eq!(frames.len(), 9);
        assert_eq!(frames[0].height_m, 2.0);
        assert_eq!(frames[8].height_m, 0.0);
        assert_eq!(frames[8].distance_m, 2.0);
    }

    #[test]
    fn frames_cover_horizon_when_sphere_never_lands() {
        let params = SimulationParameters {
            fluid_density_kg_m3: 2000.0,
            temperature_c: 0.0,
            pressure_atm: 0.5,
            sphere_density_kg_m3: 2100.0,
            sphere_radius_m: 0.001,
        };
        let sim = simulate(params, &SimulationConfig::default()).expect("valid");
        assert_eq!(export_frames(&sim).len(), 300);
    }

    #[test]
    fn file_name_is_timestamped() {
        let at = Local
            .with_ymd_and_hms(2026, 10, 18, 9, 5, 7)
            .single()
            .expect("unambiguous local time");
        assert_eq!(gif_file_name(at), "viscous_fall_20261018-090507.gif");
    }
}
