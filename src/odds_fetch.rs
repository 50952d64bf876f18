use anyhow::{Context, Result};
use scraper::Html;

use crate::model::MatchOdds;
use crate::page_source::{PageLoad, PageSource};
use crate::results_fetch::{element_text, selector};

const MATCH_BASE_URL: &str = "https://www.livesport.cz/zapas";
// Draw-no-bet market, regular time only.
const DNB_MARKET_PATH: &str = "kurzy/draw-no-bet/zakladni-doba/";
const ODDS_ROW: &str = ".ui-table__row";
const ODDS_CELL: &str = ".ui-table__cell";
const MIN_CELLS: usize = 3;
const HOME_LABEL: &str = "1";
const AWAY_LABEL: &str = "2";

pub fn odds_page_url(match_id: &str) -> String {
    format!("{MATCH_BASE_URL}/{}/{DNB_MARKET_PATH}", match_id.trim())
}

pub fn fetch_odds(page: &dyn PageSource, match_id: &str, load: PageLoad) -> Result<MatchOdds> {
    let url = odds_page_url(match_id);
    let html = page
        .load(&url, load)
        .with_context(|| format!("odds page for match {match_id} unavailable"))?;
    parse_dnb_odds_html(&html)
}

/// Read home/away prices from a draw-no-bet odds table. The first usable row
/// for each label wins.
pub fn parse_dnb_odds_html(html: &str) -> Result<MatchOdds> {
    let document = Html::parse_document(html);
    let row_sel = selector(ODDS_ROW)?;
    let cell_sel = selector(ODDS_CELL)?;

    let mut odds = MatchOdds::default();
    for row in document.select(&row_sel) {
        let cells: Vec<String> = row.select(&cell_sel).map(|c| element_text(&c)).collect();
        if cells.len() < MIN_CELLS {
            continue;
        }
        let slot = match cells[0].as_str() {
            HOME_LABEL => &mut odds.home,
            AWAY_LABEL => &mut odds.away,
            _ => continue,
        };
        if slot.is_none() {
            *slot = parse_decimal_odds(&cells[1]);
        }
        if odds.is_complete() {
            break;
        }
    }

    Ok(odds)
}

pub fn parse_decimal_odds(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (value.is_finite() && value > 1.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::{odds_page_url, parse_decimal_odds, parse_dnb_odds_html};

    fn table(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(label, price, book)| {
                format!(
                    r#"<div class="ui-table__row"><span class="ui-table__cell">{label}</span><span class="ui-table__cell">{price}</span><span class="ui-table__cell">{book}</span></div>"#
                )
            })
            .collect();
        format!("<html><body><div class=\"ui-table\">{body}</div></body></html>")
    }

    #[test]
    fn builds_market_url() {
        assert_eq!(
            odds_page_url("xYz123"),
            "https://www.livesport.cz/zapas/xYz123/kurzy/draw-no-bet/zakladni-doba/"
        );
    }

    #[test]
    fn first_row_per_label_wins() {
        let html = table(&[
            ("1", "1.45", "bet365"),
            ("2", "2.70", "bet365"),
            ("1", "1.50", "tipsport"),
            ("2", "2.60", "tipsport"),
        ]);
        let odds = parse_dnb_odds_html(&html).expect("parse");
        assert_eq!(odds.home, Some(1.45));
        assert_eq!(odds.away, Some(2.70));
    }

    #[test]
    fn missing_side_stays_absent() {
        let html = table(&[("1", "1.80", "bet365")]);
        let odds = parse_dnb_odds_html(&html).expect("parse");
        assert_eq!(odds.home, Some(1.80));
        assert_eq!(odds.away, None);
        assert!(!odds.is_complete());
    }

    #[test]
    fn short_rows_are_ignored() {
        let html = "<div class=\"ui-table__row\"><span class=\"ui-table__cell\">1</span><span class=\"ui-table__cell\">1.9</span></div>";
        let odds = parse_dnb_odds_html(html).expect("parse");
        assert_eq!(odds.home, None);
    }

    #[test]
    fn unparseable_price_leaves_label_open() {
        let html = table(&[("1", "-", "bet365"), ("1", "1.66", "tipsport"), ("2", "2.2", "x")]);
        let odds = parse_dnb_odds_html(&html).expect("parse");
        assert_eq!(odds.home, Some(1.66));
        assert_eq!(odds.away, Some(2.2));
    }

    #[test]
    fn decimal_prices_must_exceed_one() {
        assert_eq!(parse_decimal_odds(" 2.05 "), Some(2.05));
        assert_eq!(parse_decimal_odds("1.0"), None);
        assert_eq!(parse_decimal_odds("NaN"), None);
        assert_eq!(parse_decimal_odds(""), None);
    }
}
