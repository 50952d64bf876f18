use crate::records::TeamMatchRecord;

pub const FAVORITE_STAKE: f64 = 100.0;
pub const OUTSIDER_STAKE: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VsvSummary {
    pub total_stakes: f64,
    pub total_returns: f64,
    pub vsv: f64,
    pub favorite_count: u32,
    pub outsider_count: u32,
}

/// Simulate the flat-stake strategy over one team's records: back the team
/// with 100 when it is priced shorter than its opponent, 50 otherwise. Draws
/// are not bets.
pub fn compute_stats(records: &[TeamMatchRecord]) -> VsvSummary {
    let mut out = VsvSummary::default();

    for r in records {
        if r.is_draw {
            continue;
        }
        let is_favorite = r.team_odds < r.opponent_odds;
        let stake = if is_favorite {
            out.favorite_count += 1;
            FAVORITE_STAKE
        } else {
            out.outsider_count += 1;
            OUTSIDER_STAKE
        };
        out.total_stakes += stake;
        if r.won {
            out.total_returns += stake * r.team_odds;
        }
    }

    out.vsv = vsv_percent(out.total_stakes, out.total_returns);
    out
}

pub fn vsv_percent(total_stakes: f64, total_returns: f64) -> f64 {
    if total_stakes > 0.0 {
        (total_returns - total_stakes) / total_stakes * 100.0
    } else {
        0.0
    }
}
