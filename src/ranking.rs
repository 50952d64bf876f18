use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::config::RankingConfig;
use crate::leagues::League;
use crate::model::{Match, MatchOdds};
use crate::records::build_per_team_records;
use crate::retry::{RetryPolicy, with_retry};
use crate::source::{MatchSource, OddsSource};
use crate::vsv::compute_stats;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub name: String,
    pub league: String,
    pub league_id: String,
    #[serde(serialize_with = "two_decimals")]
    pub total_stakes: f64,
    #[serde(serialize_with = "two_decimals")]
    pub total_returns: f64,
    #[serde(serialize_with = "two_decimals")]
    pub vsv: f64,
    pub favorite_count: u32,
    pub outsider_count: u32,
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let rounded = (value * 100.0).round() / 100.0;
    // keep "-0.0" out of the output
    serializer.serialize_f64(if rounded == 0.0 { 0.0 } else { rounded })
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub max_rounds: usize,
    pub parallelism: usize,
    pub attempts: u32,
    pub retry_pause: Duration,
    pub deadline: Option<Instant>,
}

impl RunOptions {
    pub fn from_config(cfg: &RankingConfig, deadline: Option<Instant>) -> Self {
        Self {
            max_rounds: cfg.max_rounds,
            parallelism: cfg.fetch_parallelism,
            attempts: cfg.fetch_attempts,
            retry_pause: cfg.retry_pause,
            deadline,
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.attempts,
            pause: self.retry_pause,
            deadline: self.deadline,
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default(), None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankingRun {
    pub teams: Vec<TeamStats>,
    /// Set when the deadline kept one or more leagues out of the ranking.
    pub partial: bool,
    pub leagues_completed: usize,
}

/// Score every team of one league from its (priced) matches, in order of
/// first appearance.
pub fn team_stats_for_league(league: &League, matches: &[Match]) -> Vec<TeamStats> {
    build_per_team_records(matches)
        .into_iter()
        .map(|team| {
            let s = compute_stats(&team.records);
            TeamStats {
                name: team.team,
                league: league.name.to_string(),
                league_id: league.id.to_string(),
                total_stakes: s.total_stakes,
                total_returns: s.total_returns,
                vsv: s.vsv,
                favorite_count: s.favorite_count,
                outsider_count: s.outsider_count,
            }
        })
        .collect()
}

/// Stable sort, best VSV first; ties keep their incoming order.
pub fn rank_teams(mut teams: Vec<TeamStats>) -> Vec<TeamStats> {
    teams.sort_by(|a, b| b.vsv.total_cmp(&a.vsv));
    teams
}

/// Drive discovery, pricing and scoring for every league in the given order
/// and return the combined ranking.
pub fn run_ranking(
    leagues: &[League],
    matches: &dyn MatchSource,
    odds: &dyn OddsSource,
    opts: &RunOptions,
) -> RankingRun {
    let pool = build_fetch_pool(opts.parallelism);
    let mut run = RankingRun::default();
    let mut all_teams = Vec::new();

    for league in leagues {
        if opts.expired() {
            warn!("Deadline reached before {}; skipping remaining leagues", league.name);
            run.partial = true;
            break;
        }
        match process_league(league, matches, odds, opts, &pool) {
            Some(teams) => {
                all_teams.extend(teams);
                run.leagues_completed += 1;
            }
            None => {
                warn!("Deadline reached while processing {}; league dropped", league.name);
                run.partial = true;
                break;
            }
        }
    }

    run.teams = rank_teams(all_teams);
    run
}

/// `None` when the deadline cut the league short: discovery or an odds fetch
/// was skipped, or failed with no time left to retry.
fn process_league(
    league: &League,
    source: &dyn MatchSource,
    odds: &dyn OddsSource,
    opts: &RunOptions,
    pool: &Option<rayon::ThreadPool>,
) -> Option<Vec<TeamStats>> {
    info!("Scraping {}...", league.name);
    let retry = opts.retry_policy();

    let found = match with_retry(&retry, league.id, || {
        source.list_recent_matches(league, opts.max_rounds)
    }) {
        Ok(found) => found,
        Err(err) if opts.expired() => {
            warn!("Scraping {} stopped by the deadline: {err:#}", league.name);
            return None;
        }
        Err(err) => {
            warn!("Error scraping {}: {err:#}", league.name);
            Vec::new()
        }
    };
    info!("Found {} matches for {}", found.len(), league.name);

    let priced: Option<Vec<Match>> = with_fetch_pool(pool, || {
        found
            .into_par_iter()
            .map(|m| price_match(m, odds, opts, &retry))
            .collect()
    });
    Some(team_stats_for_league(league, &priced?))
}

/// `None` when the deadline kept this match from being priced.
fn price_match(
    m: Match,
    odds: &dyn OddsSource,
    opts: &RunOptions,
    retry: &RetryPolicy,
) -> Option<Match> {
    if opts.expired() {
        return None;
    }
    let prices = match with_retry(retry, &m.id, || odds.fetch_odds(&m.id)) {
        Ok(prices) => prices,
        Err(err) if opts.expired() => {
            debug!("Odds for match {} stopped by the deadline: {err:#}", m.id);
            return None;
        }
        Err(err) => {
            warn!("Error getting odds for match {}: {err:#}", m.id);
            MatchOdds::default()
        }
    };
    debug!(
        "{} vs {}: {:?} / {:?}",
        m.home_team, m.away_team, prices.home, prices.away
    );
    Some(m.with_odds(prices))
}

fn build_fetch_pool(threads: usize) -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .ok()
}

fn with_fetch_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
