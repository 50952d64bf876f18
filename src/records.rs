use std::collections::HashMap;

use crate::model::Match;

/// One team's side of one priced match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamMatchRecord {
    pub team_odds: f64,
    pub opponent_odds: f64,
    pub won: bool,
    pub is_draw: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecords {
    pub team: String,
    pub records: Vec<TeamMatchRecord>,
}

/// Split priced matches into per-team records, teams ordered by first
/// appearance. Matches missing either price are skipped for both teams.
pub fn build_per_team_records(matches: &[Match]) -> Vec<TeamRecords> {
    let mut out: Vec<TeamRecords> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for m in matches {
        let Some((home_odds, away_odds)) = m.odds_pair() else {
            continue;
        };
        let is_draw = m.is_draw();

        let home = TeamMatchRecord {
            team_odds: home_odds,
            opponent_odds: away_odds,
            won: m.score_home > m.score_away,
            is_draw,
        };
        let away = TeamMatchRecord {
            team_odds: away_odds,
            opponent_odds: home_odds,
            won: m.score_away > m.score_home,
            is_draw,
        };

        push_record(&mut out, &mut index, &m.home_team, home);
        push_record(&mut out, &mut index, &m.away_team, away);
    }

    out
}

fn push_record(
    out: &mut Vec<TeamRecords>,
    index: &mut HashMap<String, usize>,
    team: &str,
    record: TeamMatchRecord,
) {
    let slot = *index.entry(team.to_string()).or_insert_with(|| {
        out.push(TeamRecords {
            team: team.to_string(),
            records: Vec::new(),
        });
        out.len() - 1
    });
    out[slot].records.push(record);
}
