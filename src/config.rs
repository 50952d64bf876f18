use std::env;
use std::time::Duration;

const DEFAULT_MAX_ROUNDS: usize = 5;
const DEFAULT_RESULTS_TIMEOUT_SECS: u64 = 60;
const DEFAULT_ODDS_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RESULTS_SETTLE_MS: u64 = 3000;
const DEFAULT_ODDS_SETTLE_MS: u64 = 2000;
const DEFAULT_FETCH_PARALLELISM: usize = 6;
const DEFAULT_FETCH_ATTEMPTS: u32 = 2;
const DEFAULT_RETRY_PAUSE_MS: u64 = 500;
const DEFAULT_RUN_DEADLINE_SECS: u64 = 280;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct RankingConfig {
    pub max_rounds: usize,
    pub results_timeout: Duration,
    pub odds_timeout: Duration,
    pub results_settle: Duration,
    pub odds_settle: Duration,
    pub fetch_parallelism: usize,
    pub fetch_attempts: u32,
    pub retry_pause: Duration,
    pub run_deadline: Duration,
    pub user_agent: String,
    pub development: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            results_timeout: Duration::from_secs(DEFAULT_RESULTS_TIMEOUT_SECS),
            odds_timeout: Duration::from_secs(DEFAULT_ODDS_TIMEOUT_SECS),
            results_settle: Duration::from_millis(DEFAULT_RESULTS_SETTLE_MS),
            odds_settle: Duration::from_millis(DEFAULT_ODDS_SETTLE_MS),
            fetch_parallelism: DEFAULT_FETCH_PARALLELISM,
            fetch_attempts: DEFAULT_FETCH_ATTEMPTS,
            retry_pause: Duration::from_millis(DEFAULT_RETRY_PAUSE_MS),
            run_deadline: Duration::from_secs(DEFAULT_RUN_DEADLINE_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            development: false,
        }
    }
}

impl RankingConfig {
    pub fn from_env() -> Self {
        let max_rounds = env_parse("MAX_ROUNDS", DEFAULT_MAX_ROUNDS).clamp(1, 20);
        let results_timeout_secs =
            env_parse("RESULTS_TIMEOUT_SECS", DEFAULT_RESULTS_TIMEOUT_SECS).clamp(5, 300);
        let odds_timeout_secs =
            env_parse("ODDS_TIMEOUT_SECS", DEFAULT_ODDS_TIMEOUT_SECS).clamp(5, 120);
        let results_settle_ms =
            env_parse("RESULTS_SETTLE_MS", DEFAULT_RESULTS_SETTLE_MS).min(30_000);
        let odds_settle_ms = env_parse("ODDS_SETTLE_MS", DEFAULT_ODDS_SETTLE_MS).min(30_000);
        let fetch_parallelism =
            env_parse("FETCH_PARALLELISM", DEFAULT_FETCH_PARALLELISM).clamp(1, 32);
        let fetch_attempts = env_parse("FETCH_ATTEMPTS", DEFAULT_FETCH_ATTEMPTS).clamp(1, 5);
        let retry_pause_ms = env_parse("RETRY_PAUSE_MS", DEFAULT_RETRY_PAUSE_MS).min(10_000);
        let run_deadline_secs =
            env_parse("RUN_DEADLINE_SECS", DEFAULT_RUN_DEADLINE_SECS).clamp(10, 3600);
        let user_agent = env::var("VSV_USER_AGENT")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let development = env::var("APP_ENV")
            .map(|v| v.trim().eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        Self {
            max_rounds,
            results_timeout: Duration::from_secs(results_timeout_secs),
            odds_timeout: Duration::from_secs(odds_timeout_secs),
            results_settle: Duration::from_millis(results_settle_ms),
            odds_settle: Duration::from_millis(odds_settle_ms),
            fetch_parallelism,
            fetch_attempts,
            retry_pause: Duration::from_millis(retry_pause_ms),
            run_deadline: Duration::from_secs(run_deadline_secs),
            user_agent,
            development,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
