use alttprando::catalog::Catalog;
use alttprando::randomize::{Randomization, Randomizer};
use alttprando::settings::{load_randomizer_settings, RandomizerSettings};
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 10 as usize)]
    test_cycles: usize,

    // Generate only this seed, instead of one seed per test cycle.
    #[arg(long)]
    random_seed: Option<u64>,

    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    catalog: Option<PathBuf>,

    // Directory to write each placement and spoiler log to; otherwise only summaries are logged.
    #[arg(long)]
    output_seeds: Option<PathBuf>,
}

struct TestAppData {
    random_seed: Option<u64>,
    output_dir: Option<PathBuf>,
    catalog: Catalog,
    settings: RandomizerSettings,
}

fn write_randomization(output_dir: &Path, randomization: &Randomization) -> Result<()> {
    let output_file_prefix = format!("alttprando-{}", randomization.seed);
    let placements_path = Path::join(output_dir, format!("{output_file_prefix}-placements.json"));
    info!("Writing placements to {}", placements_path.display());
    let placements_str = serde_json::to_string_pretty(&randomization.placements)?;
    std::fs::write(placements_path, placements_str)?;

    let spoiler_log_path = Path::join(output_dir, format!("{output_file_prefix}-spoiler.json"));
    info!("Writing spoiler log to {}", spoiler_log_path.display());
    let spoiler_str = serde_json::to_string_pretty(&randomization.spoiler_log)?;
    std::fs::write(spoiler_log_path, spoiler_str)?;
    Ok(())
}

fn perform_test_cycle(app: &TestAppData, cycle_count: usize) -> Result<()> {
    let seed: u64 = app.random_seed.unwrap_or(cycle_count as u64);
    info!("Test cycle {cycle_count} Start: seed={}", seed);

    let randomizer = Randomizer::new(&app.catalog, &app.settings)?;
    let randomization = randomizer.generate(seed)?;
    info!(
        "Test cycle {cycle_count}: item placement seed={0}, {1} locations filled, {2} spoiler steps",
        randomization.seed,
        randomization.placements.len(),
        randomization.spoiler_log.spheres.len()
    );

    if let Some(output_dir) = &app.output_dir {
        write_randomization(output_dir, &randomization)?;
    }
    Ok(())
}

fn build_app_data(args: &Args) -> Result<TestAppData> {
    let settings = match &args.settings {
        Some(path) => load_randomizer_settings(path)?,
        None => RandomizerSettings::default(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::standard(),
    };
    if let Some(output_dir) = &args.output_seeds {
        if !output_dir.is_dir() {
            bail!("{0} is not a directory", output_dir.display());
        }
    }
    info!(
        "Loaded {0} regions ({1} locations) with ruleset {2}",
        catalog.regions.len(),
        catalog.num_locations(),
        settings.ruleset
    );
    Ok(TestAppData {
        random_seed: args.random_seed,
        output_dir: args.output_seeds.clone(),
        catalog,
        settings,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let app_data = build_app_data(&args)?;

    for test_cycle in 0..args.test_cycles {
        perform_test_cycle(&app_data, test_cycle + 1)
            .with_context(|| format!("Failed during test cycle {}", test_cycle + 1))?;
        if args.random_seed.is_some() {
            break;
        }
    }

    Ok(())
}
