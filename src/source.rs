use std::time::Instant;

use anyhow::Result;

use crate::config::RankingConfig;
use crate::leagues::League;
use crate::model::{Match, MatchOdds};
use crate::odds_fetch::fetch_odds;
use crate::page_source::{PageLoad, PageSource};
use crate::results_fetch::discover_recent_matches;

/// Lists recently finished matches for a competition, odds not yet filled.
pub trait MatchSource: Sync {
    fn list_recent_matches(&self, league: &League, max_rounds: usize) -> Result<Vec<Match>>;
}

/// Looks up two-outcome prices for a single match.
pub trait OddsSource: Sync {
    fn fetch_odds(&self, match_id: &str) -> Result<MatchOdds>;
}

/// livesport.cz results listings and draw-no-bet odds pages.
pub struct LivesportSource<P> {
    page: P,
    results_load: PageLoad,
    odds_load: PageLoad,
}

impl<P: PageSource> LivesportSource<P> {
    pub fn new(page: P, cfg: &RankingConfig) -> Self {
        Self {
            page,
            results_load: PageLoad {
                timeout: cfg.results_timeout,
                settle: cfg.results_settle,
                deadline: None,
            },
            odds_load: PageLoad {
                timeout: cfg.odds_timeout,
                settle: cfg.odds_settle,
                deadline: None,
            },
        }
    }

    /// Bound every page load by the run deadline.
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.results_load.deadline = deadline;
        self.odds_load.deadline = deadline;
        self
    }
}

impl<P: PageSource> MatchSource for LivesportSource<P> {
    fn list_recent_matches(&self, league: &League, max_rounds: usize) -> Result<Vec<Match>> {
        discover_recent_matches(&self.page, league, max_rounds, self.results_load)
    }
}

impl<P: PageSource> OddsSource for LivesportSource<P> {
    fn fetch_odds(&self, match_id: &str) -> Result<MatchOdds> {
        fetch_odds(&self.page, match_id, self.odds_load)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use anyhow::Result;

    use super::{LivesportSource, MatchSource, OddsSource};
    use crate::config::RankingConfig;
    use crate::leagues::LEAGUES;
    use crate::page_source::{PageLoad, PageSource};

    struct CannedPages {
        pages: HashMap<String, String>,
        seen: Mutex<Vec<(String, Duration)>>,
    }

    impl PageSource for CannedPages {
        fn load(&self, url: &str, load: PageLoad) -> Result<String> {
            self.seen
                .lock()
                .expect("lock")
                .push((url.to_string(), load.request_timeout().unwrap_or_default()));
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("navigation timeout: {url}"))
        }
    }

    #[test]
    fn routes_league_and_match_urls_with_their_timeouts() {
        let league = &LEAGUES[0];
        let results = r#"<div class="sportName soccer"></div>
            <div id="g_1_abc" class="event__match">
              <div class="event__participant--home">Arsenal</div>
              <div class="event__participant--away">Chelsea</div>
              <div class="event__score--home">1</div>
              <div class="event__score--away">0</div>
            </div>"#;
        let odds = r#"<div class="ui-table__row"><span class="ui-table__cell">1</span><span class="ui-table__cell">1.7</span><span class="ui-table__cell">b</span></div>
            <div class="ui-table__row"><span class="ui-table__cell">2</span><span class="ui-table__cell">2.3</span><span class="ui-table__cell">b</span></div>"#;
        let pages = CannedPages {
            pages: HashMap::from([
                (league.source_url.to_string(), results.to_string()),
                (
                    "https://www.livesport.cz/zapas/abc/kurzy/draw-no-bet/zakladni-doba/".to_string(),
                    odds.to_string(),
                ),
            ]),
            seen: Mutex::new(Vec::new()),
        };
        let source = LivesportSource::new(pages, &RankingConfig::default());

        let matches = source.list_recent_matches(league, 5).expect("results");
        assert_eq!(matches.len(), 1);
        let priced = source.fetch_odds(&matches[0].id).expect("odds");
        assert_eq!(priced.home, Some(1.7));
        assert_eq!(priced.away, Some(2.3));

        let seen = source.page.seen.lock().expect("lock");
        assert_eq!(seen[0].1, Duration::from_secs(60));
        assert_eq!(seen[1].1, Duration::from_secs(30));
    }

    #[test]
    fn deadline_caps_the_navigation_timeout() {
        let pages = CannedPages {
            pages: HashMap::new(),
            seen: Mutex::new(Vec::new()),
        };
        let source = LivesportSource::new(pages, &RankingConfig::default())
            .with_deadline(Some(Instant::now() + Duration::from_secs(5)));

        assert!(source.fetch_odds("late").is_err());
        assert!(source.list_recent_matches(&LEAGUES[0], 5).is_err());

        let seen = source.page.seen.lock().expect("lock");
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(_, timeout)| *timeout <= Duration::from_secs(5)));
    }

    #[test]
    fn navigation_failure_surfaces_as_error() {
        let source = LivesportSource::new(
            CannedPages {
                pages: HashMap::new(),
                seen: Mutex::new(Vec::new()),
            },
            &RankingConfig::default(),
        );
        assert!(source.fetch_odds("missing").is_err());
        assert!(source.list_recent_matches(&LEAGUES[1], 5).is_err());
    }
}
