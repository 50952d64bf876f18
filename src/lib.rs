//! Ranks football teams by the return of a flat-stake betting strategy over
//! their most recent results: back the shorter-priced side with 100, the
//! longer-priced side with 50, draws excluded.

pub mod config;
pub mod http_client;
pub mod leagues;
pub mod model;
pub mod odds_fetch;
pub mod page_source;
pub mod ranking;
pub mod records;
pub mod report;
pub mod results_fetch;
pub mod retry;
pub mod source;
pub mod vsv;
