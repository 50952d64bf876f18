/// A finished match as listed on a competition's results page.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub score_home: u16,
    pub score_away: u16,
    pub home_odds: Option<f64>,
    pub away_odds: Option<f64>,
}

impl Match {
    pub fn new(
        id: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        score_home: u16,
        score_away: u16,
    ) -> Self {
        Self {
            id: id.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            score_home,
            score_away,
            home_odds: None,
            away_odds: None,
        }
    }

    pub fn with_odds(mut self, odds: MatchOdds) -> Self {
        self.home_odds = odds.home;
        self.away_odds = odds.away;
        self
    }

    pub fn is_draw(&self) -> bool {
        self.score_home == self.score_away
    }

    /// Both sides priced.
    pub fn odds_pair(&self) -> Option<(f64, f64)> {
        match (self.home_odds, self.away_odds) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }
}

/// Two-outcome decimal odds; either side may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchOdds {
    pub home: Option<f64>,
    pub away: Option<f64>,
}

impl MatchOdds {
    pub fn is_complete(&self) -> bool {
        self.home.is_some() && self.away.is_some()
    }
}
