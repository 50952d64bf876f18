use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use log::error;

use vsv_ranking::config::RankingConfig;
use vsv_ranking::report::{LeagueFilter, RankingReport, filter_by_league, trigger_ranking};

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    // Optional first argument: `all` or a league id.
    let filter = std::env::args()
        .nth(1)
        .map(|raw| raw.parse::<LeagueFilter>())
        .transpose()?
        .unwrap_or(LeagueFilter::All);

    let cfg = RankingConfig::from_env();
    let mut report = trigger_ranking(&cfg);
    if let RankingReport::Success(ok) = &mut report {
        ok.teams = filter_by_league(&ok.teams, filter);
    }

    let json = serde_json::to_string_pretty(&report).context("serialize ranking report")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("write ranking report")?;
    Ok(report.is_success())
}
