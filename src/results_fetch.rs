use std::collections::HashSet;

use anyhow::{Context, Result};
use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::leagues::League;
use crate::model::Match;
use crate::page_source::{PageLoad, PageSource};

const ROUND_MARKER: &str = ".sportName.soccer";
const ROUND_MARKER_CLASS: &str = "sportName";
const MATCH_ROW_CLASS: &str = "event__match";
const HOME_NAME: &str = ".event__participant--home";
const AWAY_NAME: &str = ".event__participant--away";
const HOME_SCORE: &str = ".event__score--home";
const AWAY_SCORE: &str = ".event__score--away";
const MATCH_ID_PREFIX: &str = "g_1_";

pub fn discover_recent_matches(
    page: &dyn PageSource,
    league: &League,
    max_rounds: usize,
    load: PageLoad,
) -> Result<Vec<Match>> {
    let html = page
        .load(league.source_url, load)
        .with_context(|| format!("results page for {} unavailable", league.name))?;
    parse_results_html(&html, max_rounds)
        .with_context(|| format!("results page for {} unreadable", league.name))
}

/// Walk the round markers of a results listing and collect finished matches
/// from the first `max_rounds` rounds.
pub fn parse_results_html(html: &str, max_rounds: usize) -> Result<Vec<Match>> {
    let document = Html::parse_document(html);
    let marker = selector(ROUND_MARKER)?;
    let parts = RowSelectors {
        home_name: selector(HOME_NAME)?,
        away_name: selector(AWAY_NAME)?,
        home_score: selector(HOME_SCORE)?,
        away_score: selector(AWAY_SCORE)?,
    };

    let mut out = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for round in document.select(&marker).take(max_rounds) {
        for sibling in round.next_siblings().filter_map(ElementRef::wrap) {
            if has_class(&sibling, ROUND_MARKER_CLASS) {
                break;
            }
            if !has_class(&sibling, MATCH_ROW_CLASS) {
                continue;
            }
            let Some(m) = parse_match_row(&sibling, &parts) else {
                debug!("skipping incomplete result row");
                continue;
            };
            if !seen.insert(m.id.clone()) {
                debug!("skipping repeated match {}", m.id);
                continue;
            }
            out.push(m);
        }
    }

    Ok(out)
}

struct RowSelectors {
    home_name: Selector,
    away_name: Selector,
    home_score: Selector,
    away_score: Selector,
}

fn parse_match_row(row: &ElementRef, parts: &RowSelectors) -> Option<Match> {
    let home = child_text(row, &parts.home_name)?;
    let away = child_text(row, &parts.away_name)?;
    let score_home = child_text(row, &parts.home_score)?.parse::<u16>().ok()?;
    let score_away = child_text(row, &parts.away_score)?.parse::<u16>().ok()?;
    let id = row
        .value()
        .attr("id")
        .map(|raw| raw.replacen(MATCH_ID_PREFIX, "", 1).trim().to_string())
        .filter(|id| !id.is_empty())?;

    Some(Match::new(id, home, away, score_home, score_away))
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("invalid selector {css}: {e:?}"))
}

pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn child_text(el: &ElementRef, sel: &Selector) -> Option<String> {
    el.select(sel)
        .next()
        .map(|child| element_text(&child))
        .filter(|text| !text.is_empty())
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}
