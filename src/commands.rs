//! Command handlers: load config, seed one random source, generate records.

use crate::args::{Commands, GenerateArgs, DEFAULT_SEED};
use crate::output::emit;
use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use synth_core::{RandomSource, SynthConfig};
use synth_generator::{
    AccessLogEngine, LogEntry, Series, SeriesPoint, SyntheticStrings, SyntheticUser, UserPool,
};
use tracing::info;

/// Load and validate a config file.
pub fn load_config(args: &GenerateArgs) -> anyhow::Result<SynthConfig> {
    SynthConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))
}

/// Random source seeded from the CLI, the config file, or the default.
pub fn random_source(config: &SynthConfig, seed: Option<u64>) -> RandomSource {
    RandomSource::new(seed.or(config.seed).unwrap_or(DEFAULT_SEED))
}

/// Time series points for the `series` section.
pub fn series_records(
    config: &SynthConfig,
    rng: &mut RandomSource,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<SeriesPoint>> {
    let series_config = config
        .series
        .as_ref()
        .ok_or_else(|| anyhow!("config has no `series` section"))?;
    let series = Series::from_config(series_config, now).map_err(|e| e.within("series"))?;
    let points = series
        .values(rng, &series_config.values)
        .map_err(|e| e.within("series.values"))?;
    Ok(points)
}

/// Access-log entries for the `access_log` section.
pub fn access_log_records(
    config: &SynthConfig,
    rng: &mut RandomSource,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<LogEntry>> {
    let log_config = config
        .access_log
        .as_ref()
        .ok_or_else(|| anyhow!("config has no `access_log` section"))?;
    let engine = AccessLogEngine::from_config(log_config, rng, now, SyntheticStrings)
        .map_err(|e| e.within("access_log"))?;
    Ok(engine.generate(rng))
}

/// The user pool of the `access_log` section.
///
/// Under the same seed this is the pool `access_log_records` draws from.
pub fn user_records(
    config: &SynthConfig,
    rng: &mut RandomSource,
) -> anyhow::Result<Vec<SyntheticUser>> {
    let log_config = config
        .access_log
        .as_ref()
        .ok_or_else(|| anyhow!("config has no `access_log` section"))?;
    let pool = UserPool::new(&log_config.users, rng, &SyntheticStrings)
        .map_err(|e| e.within("access_log.users"))?;
    Ok(pool.all().to_vec())
}

/// Run one CLI command.
pub fn run(command: Commands) -> anyhow::Result<()> {
    let now = Utc::now();

    match command {
        Commands::Series(args) => {
            let config = load_config(&args)?;
            let mut rng = random_source(&config, args.seed);
            info!("Generating series with seed {}", rng.current_seed());
            let points = series_records(&config, &mut rng, now)?;
            emit(&points, args.output.as_deref(), args.format)?;
        }
        Commands::AccessLog(args) => {
            let config = load_config(&args)?;
            let mut rng = random_source(&config, args.seed);
            info!("Generating access log with seed {}", rng.current_seed());
            let entries = access_log_records(&config, &mut rng, now)?;
            emit(&entries, args.output.as_deref(), args.format)?;
        }
        Commands::Users(args) => {
            let config = load_config(&args)?;
            let mut rng = random_source(&config, args.seed);
            let users = user_records(&config, &mut rng)?;
            emit(&users, args.output.as_deref(), args.format)?;
        }
    }

    Ok(())
}
