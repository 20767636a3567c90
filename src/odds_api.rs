use std::env;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ev::{GameOdds, MoneylineQuote};
use crate::http_client::http_client;
use crate::teams::normalize;

const SPORT_KEY: &str = "americanfootball_nfl";
const MARKET_KEY: &str = "h2h";
const DEFAULT_BOOKMAKER: &str = "DraftKings";

#[derive(Debug, Clone)]
pub struct OddsApiConfig {
    pub api_key: Option<String>,
    pub regions: String,
    /// The one book whose moneyline we price against. Games it does not
    /// quote are skipped entirely; there is no fallback book.
    pub bookmaker: String,
}

impl OddsApiConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("ODDS_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let regions = env::var("ODDS_REGIONS")
            .unwrap_or_else(|_| "us".to_string())
            .trim()
            .to_ascii_lowercase();
        let bookmaker = env::var("ODDS_BOOKMAKER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BOOKMAKER.to_string());
        Self {
            api_key,
            regions,
            bookmaker,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OddsEvent {
    #[serde(default)]
    commence_time: Option<String>,
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<OddsBookmaker>,
}

#[derive(Debug, Deserialize)]
struct OddsBookmaker {
    #[serde(default)]
    title: String,
    #[serde(default)]
    markets: Vec<OddsMarket>,
}

#[derive(Debug, Deserialize)]
struct OddsMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<OddsOutcome>,
}

#[derive(Debug, Deserialize)]
struct OddsOutcome {
    name: String,
    price: f64,
}

/// Fetch upcoming NFL moneyline markets and keep the designated book's quote
/// per game.
pub fn fetch_odds(cfg: &OddsApiConfig) -> Result<Vec<GameOdds>> {
    let Some(api_key) = cfg.api_key.as_ref() else {
        return Err(anyhow::anyhow!("ODDS_API_KEY missing"));
    };

    let url = format!("https://api.the-odds-api.com/v4/sports/{SPORT_KEY}/odds");
    let client = http_client()?;
    let resp = client
        .get(&url)
        .query(&[
            ("apiKey", api_key.as_str()),
            ("regions", cfg.regions.as_str()),
            ("markets", MARKET_KEY),
        ])
        .send()
        .context("odds request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading odds body")?;
    if !status.is_success() {
        let snippet = body
            .trim()
            .replace('\n', " ")
            .chars()
            .take(220)
            .collect::<String>();
        return Err(anyhow::anyhow!("odds http {}: {}", status, snippet));
    }

    parse_odds_json(&body, &cfg.bookmaker)
}

/// Parse the odds feed and reduce each event to the designated bookmaker's
/// h2h market. Team names are normalized here so every downstream join is
/// against canonical names.
pub fn parse_odds_json(raw: &str, bookmaker: &str) -> Result<Vec<GameOdds>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let events: Vec<OddsEvent> = serde_json::from_str(trimmed).context("invalid odds json")?;

    Ok(events
        .iter()
        .filter_map(|event| event_to_game(event, bookmaker))
        .collect())
}

fn event_to_game(event: &OddsEvent, bookmaker: &str) -> Option<GameOdds> {
    let book = event
        .bookmakers
        .iter()
        .find(|b| b.title.eq_ignore_ascii_case(bookmaker))?;
    let market = book
        .markets
        .iter()
        .find(|m| m.key.eq_ignore_ascii_case(MARKET_KEY))?;
    if market.outcomes.is_empty() {
        return None;
    }

    Some(GameOdds {
        home: normalize(&event.home_team),
        away: normalize(&event.away_team),
        commence_time: event.commence_time.clone().unwrap_or_default(),
        outcomes: market
            .outcomes
            .iter()
            .map(|o| MoneylineQuote {
                team: normalize(&o.name),
                price: o.price,
            })
            .collect(),
    })
}
