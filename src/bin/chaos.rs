//! Batch driver for the chaos-dynamics engines.
//!
//! Each subcommand loads the (optional) TOML config, runs one engine and
//! prints a summary of the artifact it produced:
//!
//! - `orbit`: a single logistic orbit
//! - `bifurcation`: bifurcation diagram and orbit surface
//! - `mandelbrot`: Mandelbrot escape-time field
//! - `julia`: Julia fields along the parameter circle
//! - `cardiac`: cardiac rhythm for a control value or every preset
//! - `config`: print the effective configuration
//!
//! Requires the `cli` feature: `cargo run --features cli --bin chaos -- cardiac`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use chaos_dynamics::{
    compute_escape_field, orbit_surface, sample_bifurcation, Bifurcating, CardiacModel,
    CardiacRhythm, ChaosConfig, ComplexIterationField, EscapeMode, LogisticMap, MapParameters,
    RhythmPreset,
};

#[derive(Parser)]
#[command(name = "chaos", about = "Logistic map, escape-time fractal and cardiac rhythm engines")]
struct Cli {
    /// TOML configuration file (defaults apply to missing keys)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Iterate the logistic map once
    Orbit {
        /// Override the growth rate r
        #[arg(long)]
        r: Option<f64>,
        /// Override the initial state x0
        #[arg(long)]
        x0: Option<f64>,
    },
    /// Sample the logistic bifurcation diagram
    Bifurcation {
        /// Report only samples with r below this fraction of the sweep
        #[arg(long, default_value_t = 1.0)]
        progress: f64,
    },
    /// Compute the Mandelbrot escape-time field
    Mandelbrot {
        /// Report only this fraction of the columns
        #[arg(long, default_value_t = 1.0)]
        progress: f64,
    },
    /// Compute Julia fields along the parameter circle
    Julia {
        /// Number of evenly spaced points on the circle
        #[arg(long, default_value_t = 4)]
        frames: usize,
    },
    /// Simulate the cardiac rhythm model
    Cardiac {
        /// Control value r (all presets when omitted)
        #[arg(long)]
        r: Option<f64>,
        /// Noise seed (overrides the config)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════════════════════════════\n");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ChaosConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    match cli.command {
        Commands::Orbit { r, x0 } => cmd_orbit(&config, r, x0),
        Commands::Bifurcation { progress } => cmd_bifurcation(&config, progress),
        Commands::Mandelbrot { progress } => cmd_mandelbrot(&config, progress),
        Commands::Julia { frames } => cmd_julia(&config, frames),
        Commands::Cardiac { r, seed } => cmd_cardiac(&config, r, seed),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn cmd_orbit(config: &ChaosConfig, r: Option<f64>, x0: Option<f64>) -> Result<()> {
    let params = MapParameters::new(
        r.unwrap_or(config.orbit.control),
        x0.unwrap_or(config.orbit.initial),
    );
    let orbit = params.orbit(&LogisticMap, config.orbit.iterations);

    banner("Logistic Map Orbit");
    println!("  r = {:.4}, x0 = {:.4}, {} iterations\n", params.control, params.initial, config.orbit.iterations);
    for (n, x) in orbit.iter().enumerate() {
        println!("  n = {:3}  x = {:.6}", n, x);
    }
    if !LogisticMap.is_bounded(params.control) {
        println!("\n  r outside [0, 4]: orbit is not confined to [0, 1]");
    }
    Ok(())
}

fn cmd_bifurcation(config: &ChaosConfig, progress: f64) -> Result<()> {
    let cfg = &config.bifurcation;
    let set = sample_bifurcation(cfg.r_min, cfg.r_max, cfg.steps, cfg.discard, cfg.keep)?;
    let surface = orbit_surface(cfg.r_min, cfg.r_max, cfg.surface_steps, cfg.surface_iterations)?;

    banner("Logistic Map Bifurcation Diagram");
    println!("Sweep:");
    println!("  r: {:.2} → {:.2} ({} values)", cfg.r_min, cfg.r_max, cfg.steps);
    println!("  transient = {}, kept = {}", cfg.discard, cfg.keep);
    println!("  samples = {}", set.len());
    println!("  orbit surface points = {}", surface.len());
    if let Some(r_inf) = LogisticMap.critical_parameter() {
        println!("  {} accumulates at r∞ ≈ {:.4}", LogisticMap.bifurcation_type(), r_inf);
    }

    println!("\nAttractor size along the sweep:");
    let stride = (set.steps() / 10).max(1);
    for k in (0..set.steps()).step_by(stride) {
        let column = set.column(k);
        if let Some(first) = column.first() {
            let distinct = set.distinct_states(k, 1e-6);
            println!("  r = {:.4}: {:3} distinct states", first.control, distinct.len());
        }
    }

    let visible = set.up_to_fraction(progress);
    println!("\nProgress {:.0}%: {} of {} samples visible", progress.clamp(0.0, 1.0) * 100.0, visible.len(), set.len());
    Ok(())
}

fn field_summary(field: &ComplexIterationField) {
    let counts = field.counts();
    let escaped: Vec<u32> = counts.iter().copied().filter(|&n| n < field.max_iter()).collect();
    let mean_escape = if escaped.is_empty() {
        0.0
    } else {
        escaped.iter().map(|&n| n as f64).sum::<f64>() / escaped.len() as f64
    };
    println!("  grid = {} × {} (width × height)", field.width(), field.height());
    println!("  bounded cells = {:.2}%", field.bounded_fraction() * 100.0);
    println!("  mean escape time = {:.2}", mean_escape);
}

fn cmd_mandelbrot(config: &ChaosConfig, progress: f64) -> Result<()> {
    let cfg = &config.mandelbrot;
    let field = compute_escape_field(EscapeMode::Mandelbrot, cfg.region(), cfg.resolution(), cfg.max_iter)?;

    banner("Mandelbrot Set: Escape-Time Field");
    println!("Region: [{:.3}, {:.3}] × [{:.3}, {:.3}], max_iter = {}", cfg.xmin, cfg.xmax, cfg.ymin, cfg.ymax, cfg.max_iter);
    field_summary(&field);

    let revealed = field.revealed(progress);
    println!(
        "\nProgress {:.0}%: {} columns, Re ∈ [{:.3}, {:.3}]",
        progress.clamp(0.0, 1.0) * 100.0,
        revealed.counts.ncols(),
        revealed.x_extent.0,
        revealed.x_extent.1
    );
    Ok(())
}

fn cmd_julia(config: &ChaosConfig, frames: usize) -> Result<()> {
    let cfg = &config.julia;
    let path = cfg.path()?;
    let frames = frames.max(1);

    banner("Julia Sets Along a Parameter Circle");
    println!(
        "Circle: center = {:.3} {:+.3}i, radius = {:.3}\n",
        path.center.re, path.center.im, path.radius
    );

    for k in 0..frames {
        let frac = k as f64 / frames as f64;
        let c = path.parameter(frac);
        let field = path.field(frac, cfg.grid.region(), cfg.grid.resolution(), cfg.grid.max_iter)?;
        println!("Frame {} (c = {:.3} {:+.3}i):", k + 1, c.re, c.im);
        field_summary(&field);
        println!();
    }
    Ok(())
}

fn print_rhythm(label: &str, rhythm: &CardiacRhythm) {
    println!("{} (r = {:.2}):", label, rhythm.control);
    println!("  mean interval = {:.1} ms", rhythm.intervals.mean() * 1000.0);
    println!("  beats in window = {} ({:.0} bpm)", rhythm.beats.len(), rhythm.beats.heart_rate_bpm());
    println!("  peak voltage = {:.3}", rhythm.voltage.peak());
    println!("  Poincaré points = {}, RMSSD = {:.2} ms", rhythm.poincare.len(), rhythm.poincare.rmssd() * 1000.0);
    println!();
}

fn cmd_cardiac(config: &ChaosConfig, r: Option<f64>, seed: Option<u64>) -> Result<()> {
    let model = CardiacModel::new(&config.cardiac)?;
    let seed = seed.or(config.cardiac.seed);

    banner("Cardiac Rhythm: Logistic Interval Dynamics");

    match r {
        Some(r) => {
            let rhythm = model.simulate_seeded(r, seed)?;
            print_rhythm("Custom", &rhythm);
        }
        None => {
            for preset in RhythmPreset::ALL {
                let rhythm = model.simulate_seeded(preset.control(), seed)?;
                print_rhythm(preset.label(), &rhythm);
            }
        }
    }
    Ok(())
}
