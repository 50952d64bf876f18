#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub id: &'static str,
    pub name: &'static str,
    pub source_url: &'static str,
    pub country_code: &'static str,
}

pub const LEAGUES: [League; 5] = [
    League {
        id: "premier-league",
        name: "Premier League",
        source_url: "https://www.livesport.cz/fotbal/anglie/premier-league/vysledky/",
        country_code: "anglie",
    },
    League {
        id: "ligue-1",
        name: "Ligue 1",
        source_url: "https://www.livesport.cz/fotbal/francie/ligue-1/vysledky/",
        country_code: "francie",
    },
    League {
        id: "serie-a",
        name: "Serie A",
        source_url: "https://www.livesport.cz/fotbal/italie/serie-a/vysledky/",
        country_code: "italie",
    },
    League {
        id: "bundesliga",
        name: "Bundesliga",
        source_url: "https://www.livesport.cz/fotbal/nemecko/bundesliga/vysledky/",
        country_code: "nemecko",
    },
    League {
        id: "laliga",
        name: "La Liga",
        source_url: "https://www.livesport.cz/fotbal/spanelsko/laliga/vysledky/",
        country_code: "spanelsko",
    },
];

pub fn all_leagues() -> &'static [League] {
    &LEAGUES
}

pub fn league_by_id(id: &str) -> Option<&'static League> {
    LEAGUES.iter().find(|l| l.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{LEAGUES, league_by_id};

    #[test]
    fn registry_ids_are_unique() {
        let ids: HashSet<&str> = LEAGUES.iter().map(|l| l.id).collect();
        assert_eq!(ids.len(), LEAGUES.len());
    }

    #[test]
    fn registry_order_is_fixed() {
        let ids: Vec<&str> = LEAGUES.iter().map(|l| l.id).collect();
        assert_eq!(
            ids,
            ["premier-league", "ligue-1", "serie-a", "bundesliga", "laliga"]
        );
    }

    #[test]
    fn lookup_by_id_ignores_case_and_padding() {
        let league = league_by_id(" Serie-A ").expect("known league");
        assert_eq!(league.name, "Serie A");
        assert!(league_by_id("eredivisie").is_none());
    }
}
