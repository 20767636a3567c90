use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::env;
use std::thread;

use anyhow::Result;
use rayon::prelude::*;

use crate::blend::blend_profiles;
use crate::ev::{EvRecord, GameOdds, score_game};
use crate::model::ModelParams;
use crate::odds_api::{OddsApiConfig, fetch_odds};
use crate::sportsdata::{SportsDataConfig, fetch_standings, fetch_team_season_stats};
use crate::team_db::{LeagueAverages, TeamProfile, build_team_db};

const DEFAULT_SEASON: i32 = 2025;
const DEFAULT_STAKE: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub season: i32,
    /// Stake size the EV figures are denominated in.
    pub stake: f64,
    pub sportsdata: SportsDataConfig,
    pub odds: OddsApiConfig,
    pub params: ModelParams,
    pub averages: LeagueAverages,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let season = env::var("NFL_SEASON")
            .ok()
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(DEFAULT_SEASON);
        let stake = env::var("EV_STAKE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_STAKE);
        Self {
            season,
            stake,
            sportsdata: SportsDataConfig::from_env(),
            odds: OddsApiConfig::from_env(),
            params: ModelParams::default(),
            averages: LeagueAverages::default(),
        }
    }
}

/// One full pipeline pass: fetch, aggregate, blend, model, fuse, rank.
///
/// Every upstream fetch fails open to an empty data set, so the worst case
/// for any single input is fewer (possibly zero) records, never an aborted
/// run. Repeated calls over identical upstream data are idempotent.
pub fn compute_ev_results(cfg: &PipelineConfig) -> Result<Vec<EvRecord>> {
    let current_code = format!("{}REG", cfg.season);
    let prior_code = format!("{}REG", cfg.season - 1);

    // The five provider calls have no ordering dependency; fan out and join
    // before building the team databases.
    let (st_cur, st_pri, ts_cur, ts_pri, games) = thread::scope(|s| {
        let st_cur = s.spawn(|| fetch_standings(&cfg.sportsdata, &current_code));
        let st_pri = s.spawn(|| fetch_standings(&cfg.sportsdata, &prior_code));
        let ts_cur = s.spawn(|| fetch_team_season_stats(&cfg.sportsdata, &current_code));
        let ts_pri = s.spawn(|| fetch_team_season_stats(&cfg.sportsdata, &prior_code));
        let games = s.spawn(|| fetch_odds(&cfg.odds));

        (
            fail_open("current standings", st_cur.join()),
            fail_open("prior standings", st_pri.join()),
            fail_open("current team stats", ts_cur.join()),
            fail_open("prior team stats", ts_pri.join()),
            fail_open("odds feed", games.join()),
        )
    });

    let current_db = build_team_db(&st_cur, &ts_cur, &cfg.averages);
    let prior_db = build_team_db(&st_pri, &ts_pri, &cfg.averages);
    let fused = fuse_team_dbs(&current_db, &prior_db);

    Ok(rank_games(&games, &fused, &cfg.params, cfg.stake))
}

fn fail_open<T>(label: &str, joined: thread::Result<Result<Vec<T>>>) -> Vec<T> {
    match joined {
        Ok(Ok(rows)) => rows,
        Ok(Err(err)) => {
            eprintln!("[WARN] {label} unavailable, continuing without it: {err:#}");
            Vec::new()
        }
        Err(_) => {
            eprintln!("[WARN] {label} worker panicked, continuing without it");
            Vec::new()
        }
    }
}

/// Blend current- and prior-season databases over the union of team names.
/// Teams with no profile in either season drop out here and are excluded
/// from modeling.
pub fn fuse_team_dbs(
    current: &HashMap<String, TeamProfile>,
    prior: &HashMap<String, TeamProfile>,
) -> HashMap<String, TeamProfile> {
    let names: HashSet<&String> = current.keys().chain(prior.keys()).collect();
    names
        .into_iter()
        .filter_map(|name| {
            blend_profiles(current.get(name), prior.get(name))
                .map(|profile| (name.clone(), profile))
        })
        .collect()
}

/// Score every game against the fused team database and rank the resulting
/// records by EV, best first. Games are independent, so scoring runs in
/// parallel over a read-only view of the database.
pub fn rank_games(
    games: &[GameOdds],
    teams: &HashMap<String, TeamProfile>,
    params: &ModelParams,
    stake: f64,
) -> Vec<EvRecord> {
    let mut records: Vec<EvRecord> = games
        .par_iter()
        .filter_map(|game| {
            let home = teams.get(&game.home)?;
            let away = teams.get(&game.away)?;
            Some(score_game(game, home, away, params, stake))
        })
        .flatten()
        .collect();

    records.sort_by(|a, b| b.ev.partial_cmp(&a.ev).unwrap_or(Ordering::Equal));
    records
}
