use std::env;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_client::http_client;

const DEFAULT_BASE_URL: &str = "https://api.sportsdata.io/v3/nfl";

#[derive(Debug, Clone)]
pub struct SportsDataConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl SportsDataConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("SPORTSDATA_API_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let base_url = env::var("SPORTSDATA_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { api_key, base_url }
    }
}

/// Season standings rows for a season code like `2025REG`. Rows stay as raw
/// JSON objects; the aggregator absorbs provider field naming drift through
/// its synonym tables.
pub fn fetch_standings(cfg: &SportsDataConfig, season_code: &str) -> Result<Vec<Value>> {
    fetch_rows(cfg, &format!("scores/json/Standings/{season_code}"))
        .with_context(|| format!("standings fetch failed for {season_code}"))
}

/// Aggregate team season statistics for a season code.
pub fn fetch_team_season_stats(cfg: &SportsDataConfig, season_code: &str) -> Result<Vec<Value>> {
    fetch_rows(cfg, &format!("stats/json/TeamSeasonStats/{season_code}"))
        .with_context(|| format!("team season stats fetch failed for {season_code}"))
}

fn fetch_rows(cfg: &SportsDataConfig, path: &str) -> Result<Vec<Value>> {
    let api_key = cfg.api_key.as_ref().context("SPORTSDATA_API_KEY missing")?;

    let url = format!("{}/{path}", cfg.base_url);
    let client = http_client()?;
    let resp = client
        .get(&url)
        .query(&[("key", api_key.as_str())])
        .send()
        .context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let snippet = body.trim().chars().take(220).collect::<String>();
        return Err(anyhow::anyhow!("http {}: {}", status, snippet));
    }

    parse_rows_json(&body)
}

/// Tolerant row parsing: an empty or `null` body is an empty season, not an
/// error.
pub fn parse_rows_json(raw: &str) -> Result<Vec<Value>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid rows json")
}
