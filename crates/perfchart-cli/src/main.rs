// File: crates/perfchart-cli/src/main.rs
// Summary: `perfchart` binary: probability (pp) and time-to-target (ttt) plots, plus JSON render jobs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Deserialize;

use perfchart_core::{
    load_dataset, render, save, ChartConfig, Color, LineStyle, Marker, OutputTarget, SeriesSpec,
};

const Y_LABEL: &str = "Probabilidade (%)";
const TTT_X_LABEL: &str = "Tempo para o sub-ótimo (s)";

#[derive(Debug, Parser)]
#[command(name = "perfchart", author, version, about, long_about = None)]
struct Opts {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Cumulative probability plot, one line per algorithm
    Pp {
        #[arg(long, default_value = "pp.csv")]
        input: PathBuf,

        #[arg(long, default_value = "pp.eps")]
        output: PathBuf,

        /// JSON chart options merged over the built-in ones
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Time-to-target plot, one scatter per algorithm
    Ttt {
        #[arg(long, default_value = "tttplot.csv")]
        input: PathBuf,

        #[arg(long, default_value = "ttt.eps")]
        output: PathBuf,

        /// JSON chart options merged over the built-in ones
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a chart described by a JSON job file
    Render {
        job: PathBuf,
    },
}

/// A chart described entirely in JSON. Relative paths resolve against the job file's directory.
#[derive(Debug, Deserialize)]
struct Job {
    input: PathBuf,
    output: OutputTarget,
    series: Vec<SeriesSpec>,
    #[serde(default)]
    config: ChartConfig,
}

fn pp_specs() -> Vec<SeriesSpec> {
    [
        ("GRASP", Color::rgb(0xFF, 0x63, 0x47)),
        ("TS", Color::rgb(0x41, 0x69, 0xE1)),
        ("GA", Color::rgb(0x3C, 0xB3, 0x71)),
        ("Model1", Color::rgb(0xFF, 0xD7, 0x00)),
        ("Model2", Color::rgb(0x4B, 0x00, 0x82)),
    ]
    .into_iter()
    .map(|(name, color)| {
        SeriesSpec::line(name, "Probabilidade", name)
            .with_color(color)
            .with_line_width(1.0)
            .with_line_style(LineStyle::Solid)
    })
    .collect()
}

fn ttt_specs() -> Vec<SeriesSpec> {
    [
        ("GRASPT3", "GRASP", Color::rgb(0xFF, 0x63, 0x47), Marker::HLine),
        ("TST3", "TS", Color::rgb(0x41, 0x69, 0xE1), Marker::TriDown),
        ("GAT3", "GA", Color::rgb(0x3C, 0xB3, 0x71), Marker::Plus),
    ]
    .into_iter()
    .map(|(column, label, color, marker)| {
        SeriesSpec::scatter(column, "x", label, marker)
            .with_color(color)
            .with_line_width(0.7)
    })
    .collect()
}

/// Overlay `src` onto `dst`. Objects merge per key at every depth; anything else replaces.
fn merge_json(dst: &mut serde_json::Value, src: serde_json::Value) {
    match (dst, src) {
        (serde_json::Value::Object(dst), serde_json::Value::Object(src)) => {
            for (key, value) in src {
                merge_json(dst.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (dst, src) => *dst = src,
    }
}

/// Merge the JSON object in `overlay` onto `base`, key by key.
fn merge_config(base: &ChartConfig, overlay: serde_json::Value) -> Result<ChartConfig> {
    if !overlay.is_object() {
        anyhow::bail!("chart config must be a JSON object, found {overlay}");
    }
    let mut merged = serde_json::to_value(base).context("serializing chart config")?;
    merge_json(&mut merged, overlay);
    serde_json::from_value(merged).context("invalid chart config")
}

fn load_config(base: ChartConfig, path: Option<&Path>) -> Result<ChartConfig> {
    let Some(path) = path else { return Ok(base) };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config '{}'", path.display()))?;
    let overlay: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config '{}'", path.display()))?;
    merge_config(&base, overlay).with_context(|| format!("in config '{}'", path.display()))
}

fn run(input: &Path, specs: &[SeriesSpec], config: &ChartConfig, target: &OutputTarget) -> Result<()> {
    let dataset = load_dataset(input)
        .with_context(|| format!("failed to load dataset '{}'", input.display()))?;
    let chart = render(&dataset, specs, config)
        .with_context(|| format!("failed to render chart from '{}'", input.display()))?;
    save(&chart, target)
        .with_context(|| format!("failed to save chart to '{}'", target.path.display()))?;
    info!("saved {}", target.path.display());
    Ok(())
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_job(path: &Path) -> Result<Job> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read job '{}'", path.display()))?;
    let mut job: Job = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse job '{}'", path.display()))?;
    let base = path.parent().unwrap_or(Path::new(""));
    job.input = resolve_against(base, &job.input);
    job.output.path = resolve_against(base, &job.output.path);
    Ok(job)
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let level = if opts.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match opts.command {
        Command::Pp { input, output, config } => {
            let base = ChartConfig::default().with_y_label(Y_LABEL);
            let config = load_config(base, config.as_deref())?;
            run(&input, &pp_specs(), &config, &OutputTarget::new(output))
        }
        Command::Ttt { input, output, config } => {
            let base = ChartConfig::default()
                .with_y_label(Y_LABEL)
                .with_x_label(TTT_X_LABEL);
            let config = load_config(base, config.as_deref())?;
            run(&input, &ttt_specs(), &config, &OutputTarget::new(output))
        }
        Command::Render { job } => {
            let job = load_job(&job)?;
            run(&job.input, &job.series, &job.config, &job.output)
        }
    }
}
