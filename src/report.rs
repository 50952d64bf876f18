use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use log::{error, info};
use serde::Serialize;

use crate::config::RankingConfig;
use crate::leagues::{League, all_leagues, league_by_id};
use crate::page_source::HttpPageSource;
use crate::ranking::{RunOptions, TeamStats, run_ranking};
use crate::source::{LivesportSource, MatchSource, OddsSource};

/// Result document of one ranking run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RankingReport {
    Success(RankingSuccess),
    Failure(RankingFailure),
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingSuccess {
    success: bool,
    pub teams: Vec<TeamStats>,
    pub timestamp: String,
    pub partial: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingFailure {
    success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl RankingReport {
    pub fn success(teams: Vec<TeamStats>, partial: bool) -> Self {
        Self::Success(RankingSuccess {
            success: true,
            teams,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            partial,
        })
    }

    pub fn failure(err: &anyhow::Error, development: bool) -> Self {
        Self::Failure(RankingFailure {
            success: false,
            error: format!("{err:#}"),
            stack: development.then(|| format!("{err:?}")),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Run the full ranking against the live site.
pub fn trigger_ranking(cfg: &RankingConfig) -> RankingReport {
    let deadline = Instant::now() + cfg.run_deadline;
    info!("Starting page source...");
    let page = match HttpPageSource::new(&cfg.user_agent) {
        Ok(page) => page,
        Err(err) => {
            error!("Scraping error: {err:#}");
            return RankingReport::failure(&err, cfg.development);
        }
    };
    let source = LivesportSource::new(page, cfg).with_deadline(Some(deadline));
    let opts = RunOptions::from_config(cfg, Some(deadline));
    trigger_with_sources(all_leagues(), &source, &source, &opts)
}

pub fn trigger_with_sources(
    leagues: &[League],
    matches: &dyn MatchSource,
    odds: &dyn OddsSource,
    opts: &RunOptions,
) -> RankingReport {
    let run = run_ranking(leagues, matches, odds, opts);
    info!(
        "Ranked {} teams from {}/{} leagues",
        run.teams.len(),
        run.leagues_completed,
        leagues.len()
    );
    RankingReport::success(run.teams, run.partial)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueFilter {
    All,
    League(&'static League),
}

impl FromStr for LeagueFilter {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        league_by_id(raw)
            .map(Self::League)
            .ok_or_else(|| anyhow::anyhow!("unknown league filter {raw:?}, expected all or a league id"))
    }
}

/// Keep rows for one league (or all), preserving ranking order.
pub fn filter_by_league(teams: &[TeamStats], filter: LeagueFilter) -> Vec<TeamStats> {
    match filter {
        LeagueFilter::All => teams.to_vec(),
        LeagueFilter::League(league) => teams
            .iter()
            .filter(|t| t.league_id == league.id)
            .cloned()
            .collect(),
    }
}
