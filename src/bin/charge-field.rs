use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use charge_field::prelude::*;

/// Electric field and potential of 2D charge scenarios.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints field and potential at one point, with the per-charge breakdown.
    Probe {
        /// Scenario file (.toml or .json).
        scenario: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: Scalar,
        #[arg(long, allow_hyphen_values = true)]
        y: Scalar,
    },
    /// Renders the potential and field maps as text.
    Render {
        scenario: PathBuf,
        /// Use 24-bit ANSI colours.
        #[arg(long)]
        color: bool,
        /// Points per axis, overriding the scenario's potential grid.
        #[arg(long)]
        size: Option<usize>,
    },
    /// Writes the sampled potential map to a file.
    Export {
        scenario: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Vtk)]
        format: Format,
        #[arg(long, short)]
        output: PathBuf,
    },
    /// Traces field lines around every point charge.
    Lines {
        scenario: PathBuf,
        /// Seeds per point charge.
        #[arg(long, default_value_t = 8)]
        seeds: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Vtk,
}

fn load(path: &Path) -> Result<(ScenarioConfig, System)> {
    let scenario = ScenarioConfig::load(path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;
    let system = scenario
        .build_system()
        .with_context(|| format!("invalid charges in scenario `{}`", scenario.name))?;
    Ok((scenario, system))
}

fn probe(path: &Path, point: R2) -> Result<()> {
    let (scenario, system) = load(path)?;
    let sample = system.sample(point);
    let field = ElectricField::from_vector(sample.field);
    println!("{} at ({}, {})", scenario.display_title(), point.x, point.y);
    println!("  potential  {:.6e} V", sample.potential);
    println!(
        "  field      ({:.6e}, {:.6e}) N/C  |E| = {:.6e}  angle = {:.2} deg",
        field.vector.x,
        field.vector.y,
        field.magnitude,
        field.angle.to_degrees()
    );
    for (i, (e, v)) in system.fields(point).zip(system.potentials(point)).enumerate() {
        println!("  [{i}] potential {v:.6e} V  field ({:.6e}, {:.6e}) N/C", e.x, e.y);
    }
    Ok(())
}

fn render(path: &Path, color: bool, size: Option<usize>) -> Result<()> {
    let (scenario, system) = load(path)?;
    let view = scenario.plot.view()?;
    let potential_grid = match size {
        Some(n) => Grid::square(view, n)?,
        None => scenario.potential_grid()?,
    };
    let potential = FieldMap::sample(&system, potential_grid);
    let field = FieldMap::sample(&system, scenario.field_grid()?);

    let style = TextStyle {
        color,
        ..TextStyle::default()
    };
    println!("{}", scenario.display_title());
    print!("{}", render_potential(&potential, &style));
    println!();
    print!("{}", render_field(&field));
    Ok(())
}

fn export(path: &Path, format: Format, output: &Path) -> Result<()> {
    let (scenario, system) = load(path)?;
    let map = FieldMap::sample(&system, scenario.potential_grid()?);
    let file = File::create(output).with_context(|| format!("cannot create {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        Format::Csv => write_field_map_csv(&mut writer, &map)?,
        Format::Vtk => write_field_map_vtk(&mut writer, &map, scenario.display_title())?,
    }
    writer.flush()?;
    tracing::info!(output = %output.display(), points = map.grid().len(), "exported field map");
    Ok(())
}

fn lines(path: &Path, seeds: usize) -> Result<()> {
    let (scenario, system) = load(path)?;
    let mut tracing = LineTracing::new(scenario.plot.view()?);
    tracing.seeds_per_charge = seeds;
    let traced = trace_system(&system, &tracing);
    println!("{}: {} field lines", scenario.display_title(), traced.len());
    for (i, line) in traced.iter().enumerate() {
        let (Some(first), Some(last)) = (line.points.first(), line.points.last()) else {
            continue;
        };
        println!(
            "  [{i}] {} points ({:.3}, {:.3}) -> ({:.3}, {:.3}){}",
            line.len(),
            first.x,
            first.y,
            last.x,
            last.y,
            if line.truncated { " truncated" } else { "" }
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Probe { scenario, x, y } => probe(&scenario, R2::new(x, y)),
        Command::Render {
            scenario,
            color,
            size,
        } => render(&scenario, color, size),
        Command::Export {
            scenario,
            format,
            output,
        } => export(&scenario, format, &output),
        Command::Lines { scenario, seeds } => lines(&scenario, seeds),
    }
}
