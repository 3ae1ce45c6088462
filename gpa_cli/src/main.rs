//! # Gradewise CLI
//!
//! Terminal front end for the gpa_core engine: pick a scale or institution
//! profile, feed it course entries from a file or prompts, and print the
//! rounded result with honors / Dean's List / standing classifications.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser, Subcommand};
use gpa_core::calculations::projection::{combine, required_average, Standing};
use gpa_core::format::round_display;
use gpa_core::{classify_all, compute, evaluate_profile, format, Entry, GradeScaleRegistry};
use log::{debug, info};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

mod input;
mod render;

#[derive(Parser)]
#[command(name = "gpa")]
#[command(about = "Weighted GPA and score calculator", long_about = None)]
struct Cli {
    /// Extra TOML file with scales/profiles, overlaid on the built-in table
    #[arg(long, global = true, env = "GPA_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available grade scales and institution profiles
    Scales,
    /// Show the grade table of one scale
    Show { scale: String },
    /// Calculate an average from a CSV or JSON entry file
    #[command(group(
        ArgGroup::new("source")
            .args(["profile", "scale"])
            .required(true)
            .multiple(false)
    ))]
    Calc {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        scale: Option<String>,
        /// Entry file (.csv with label,symbol,weight header, or .json array)
        #[arg(long)]
        input: PathBuf,
        /// Prior cumulative average to merge the result into
        #[arg(long, requires = "prior_weight")]
        prior_average: Option<f64>,
        /// Credits behind the prior cumulative average
        #[arg(long, requires = "prior_average")]
        prior_weight: Option<f64>,
        /// Print the display record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Average needed on remaining credits to reach a target
    Target {
        #[arg(long)]
        current_average: f64,
        #[arg(long)]
        current_weight: f64,
        #[arg(long)]
        target: f64,
        #[arg(long)]
        remaining_weight: f64,
        /// Scale whose maximum value bounds what is achievable
        #[arg(long, default_value = "standard")]
        scale: String,
    },
    /// Enter courses at the prompt
    Interactive {
        #[arg(long, default_value = "northfield-state")]
        profile: String,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second init only fails if a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn load_registry(config: Option<&PathBuf>) -> anyhow::Result<GradeScaleRegistry> {
    let mut registry = GradeScaleRegistry::builtin()
        .context("built-in grade scale table is invalid")?
        .clone();

    if let Some(path) = config {
        let overlay = gpa_core::config::RegistryConfig::from_toml_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        registry
            .apply(overlay)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        info!("loaded grade scale overlay from {}", path.display());
    }

    Ok(registry)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = load_registry(cli.config.as_ref())?;

    match cli.command {
        Commands::Scales => {
            print!("{}", render::render_registry(&registry));
        }
        Commands::Show { scale } => {
            let scale = registry.resolve(&scale)?;
            print!("{}", render::render_scale(scale));
        }
        Commands::Calc {
            profile,
            scale,
            input,
            prior_average,
            prior_weight,
            json,
        } => {
            let entries = input::load_entries(&input)?;
            debug!("loaded {} entries from {}", entries.len(), input.display());

            let (title, scale, sets) = match (profile.as_deref(), scale.as_deref()) {
                (Some(profile_id), _) => {
                    let (profile, scale) = registry.profile_with_scale(profile_id)?;
                    (profile.name.clone(), scale, profile.threshold_sets.as_slice())
                }
                (None, Some(scale_id)) => {
                    let scale = registry.resolve(scale_id)?;
                    (scale.name.clone(), scale, &[][..])
                }
                (None, None) => bail!("either --profile or --scale is required"),
            };

            let calc = compute(&entries, scale);
            let record = format(&calc, &classify_all(&calc, sets));

            if json {
                println!("{}", record.to_json()?);
            } else {
                print!("{}", render::render_record(&title, &record));
            }

            if let (Some(average), Some(weight)) = (prior_average, prior_weight) {
                let cumulative = combine(
                    Standing::new(average, weight),
                    Standing::from_calculation(&calc),
                )?;
                println!();
                println!(
                    "Cumulative average: {:.2} over {:.2} credits",
                    round_display(cumulative.average),
                    cumulative.weight
                );
            }
        }
        Commands::Target {
            current_average,
            current_weight,
            target,
            remaining_weight,
            scale,
        } => {
            let scale = registry.resolve(&scale)?;
            let plan = required_average(
                Standing::new(current_average, current_weight),
                target,
                remaining_weight,
                scale.max_points(),
            )?;
            println!("{}", render::render_target(&plan, target));
        }
        Commands::Interactive { profile } => {
            let (profile, scale) = registry.profile_with_scale(&profile)?;

            println!("{} - GPA Calculator", profile.name);
            println!("================================================");
            println!();

            let symbols: Vec<&str> = scale.symbols().collect();
            let entries: Vec<Entry> = input::prompt_entries(&symbols);

            println!();
            let record = evaluate_profile(&registry, &profile.id, &entries)?;
            print!("{}", render::render_record(&profile.name, &record));
        }
    }

    Ok(())
}
