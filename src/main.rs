use std::env;
use std::io::{self, Write};

use chrono::Local;
use viscous_fall::core::config::AppConfig;
use viscous_fall::core::controls::{SLIDERS, SliderSpec, get, set, slider_defaults};
use viscous_fall::core::export::export_gif;
use viscous_fall::core::report::Summary;
use viscous_fall::core::settling::{SimulationParameters, TrajectoryModel, simulate};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    json: bool,
    gif: bool,
    closed_form: bool,
    trajectory: bool,
}

fn parse_f64(value: &str, label: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid {label}: '{value}'. Expected a number."))
}

fn read_f64(spec: &SliderSpec, default: f64) -> Result<f64, String> {
    loop {
        print!(
            "{} [{}..{}, default {}]: ",
            spec.label,
            spec.format(spec.min),
            spec.format(spec.max),
            spec.format(default)
        );
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Could not read input: {e}"))?;

        if bytes == 0 {
            return Err("Input ended unexpectedly (EOF).".to_string());
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 1000 or 0.005)."),
        }
    }
}

fn get_inputs_from_user() -> Result<SimulationParameters, String> {
    let mut params = slider_defaults();
    for spec in &SLIDERS {
        let value = read_f64(spec, spec.default)?;
        set(&mut params, spec.parameter, value);
    }
    Ok(params)
}

fn get_inputs_from_args(values: &[&str]) -> Result<SimulationParameters, String> {
    if values.len() != SLIDERS.len() {
        return Err(
            "Expected exactly 5 values: <fluid_density> <temperature> <pressure> <sphere_density> <sphere_radius>."
                .to_string(),
        );
    }

    let mut params = slider_defaults();
    for (spec, raw) in SLIDERS.iter().zip(values) {
        let value = parse_f64(raw, spec.label)?;
        if !spec.contains(value) {
            eprintln!(
                "Warning: {} = {} is outside the slider range {}..{}",
                spec.label,
                raw,
                spec.format(spec.min),
                spec.format(spec.max)
            );
        }
        set(&mut params, spec.parameter, value);
    }
    Ok(params)
}

fn split_args(args: &[String]) -> Result<(Flags, Vec<&str>), String> {
    let mut flags = Flags::default();
    let mut values = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--json" => flags.json = true,
            "--gif" => flags.gif = true,
            "--closed-form" => flags.closed_form = true,
            "--trajectory" => flags.trajectory = true,
            other if other.starts_with("--") => {
                return Err(format!("Unknown flag '{other}'."));
            }
            other => values.push(other),
        }
    }
    Ok((flags, values))
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} [flags]");
    println!(
        "  {program} [flags] <fluid_density> <temperature> <pressure> <sphere_density> <sphere_radius>"
    );
    println!();
    println!("Flags:");
    println!("  --json         print the summary as JSON");
    println!("  --gif          export the animation as a GIF");
    println!("  --closed-form  use the closed-form position model instead of the recurrence");
    println!("  --trajectory   print every sample until the sphere lands");
    println!();
    println!("Examples:");
    println!("  {program}");
    println!("  {program} 1000 25 1.0 2500 0.005");
    println!("  {program} --gif 1200 40 1.0 3000 0.008");
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let (flags, values) = split_args(&args)?;
    let mut config = AppConfig::load().map_err(|e| e.to_string())?;
    if flags.closed_form {
        config.simulation.model = TrajectoryModel::ClosedForm;
    }

    let params = if values.is_empty() {
        get_inputs_from_user()?
    } else {
        get_inputs_from_args(&values)?
    };

    let sim = simulate(params, &config.simulation).map_err(|e| e.to_string())?;
    log::info!(
        "Computed {} samples ({} model)",
        sim.trajectory.len(),
        sim.model.label()
    );
    let summary = Summary::new(&sim, Local::now());

    if flags.json {
        let json = summary
            .to_json()
            .map_err(|e| format!("Could not serialize summary: {e}"))?;
        println!("{json}");
    } else {
        println!();
        for spec in &SLIDERS {
            log::debug!("{} = {}", spec.label, spec.format(get(&params, spec.parameter)));
        }
        for line in summary.lines() {
            println!("{line}");
        }
    }

    if flags.trajectory {
        println!();
        println!("{:>8} {:>10} {:>10}", "t (s)", "y (m)", "fallen (m)");
        let last = sim
            .trajectory
            .settle_index()
            .unwrap_or_else(|| sim.trajectory.len().saturating_sub(1));
        for (i, sample) in sim.trajectory.samples().iter().enumerate().take(last + 1) {
            let fallen = sim.trajectory.distance_at(i).unwrap_or_default();
            println!(
                "{:>8.2} {:>10.4} {:>10.4}",
                sample.time_s, sample.height_m, fallen
            );
        }
    }

    if flags.gif {
        let path = export_gif(&sim, &config.export, Local::now()).map_err(|e| e.to_string())?;
        println!("\nAnimation written to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("cargo run --");
        std::process::exit(1);
    }
}
