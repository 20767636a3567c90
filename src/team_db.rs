use std::collections::HashMap;

use serde_json::Value;

use crate::teams::normalize;

/// League-average fallback constants, substituted for any rate the providers
/// cannot support and used as the regression target for small samples.
#[derive(Debug, Clone, Copy)]
pub struct LeagueAverages {
    pub pfpg: f64,
    pub papg: f64,
    pub off_ypp: f64,
    pub def_ypp: f64,
    pub qb_eff: f64,
}

impl Default for LeagueAverages {
    fn default() -> Self {
        Self {
            pfpg: 22.5,
            papg: 22.5,
            off_ypp: 5.6,
            def_ypp: 5.6,
            qb_eff: 0.55,
        }
    }
}

/// Per-team strength profile for one season source. Rate fields are
/// regularized toward [`LeagueAverages`] with weight `min(1, games/8)`, so a
/// zero-game team carries league averages exactly.
#[derive(Debug, Clone, Copy)]
pub struct TeamProfile {
    pub games: u32,
    pub win_pct: f64,
    pub pfpg: f64,
    pub papg: f64,
    pub off_ypp: f64,
    pub def_ypp: f64,
    pub to_diff_pg: f64,
    pub qb_eff: f64,
    pub reliability: f64,
}

// Priority-ordered field synonyms per logical attribute. Earlier keys win;
// this is the single place provider naming drift is absorbed.
const STANDINGS_NAME_KEYS: &[&str] = &["FullName", "Team", "Key"];
const STANDINGS_KEY_KEYS: &[&str] = &["Key", "Team"];
const STATS_KEY_KEYS: &[&str] = &["Team", "Key", "TeamKey", "TeamAbbr"];
const STATS_NAME_KEYS: &[&str] = &["FullName", "Name", "TeamName"];
const POINTS_FOR_KEYS: &[&str] = &["PointsFor", "PF"];
const POINTS_AGAINST_KEYS: &[&str] = &["PointsAgainst", "PA"];
const QB_RATING_KEYS: &[&str] = &["QBRating", "QuarterbackRating", "PasserRating"];

// Stand-in row for a team with no statistics match; every lookup against it
// falls through to defaults.
static EMPTY_ROW: Value = Value::Null;

/// Resolve the first present, parseable numeric field among `keys`.
pub fn pick_f64(row: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match row.get(key) {
            Some(Value::Number(n)) => return n.as_f64(),
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<f64>() {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

pub fn pick_str(row: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = row.get(key).and_then(|v| v.as_str()) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn pick_f64_or(row: &Value, keys: &[&str], default: f64) -> f64 {
    pick_f64(row, keys).unwrap_or(default)
}

/// Join standings rows to team-season statistics rows and build one
/// [`TeamProfile`] per standings team. Statistics are matched by provider
/// team ID first, then uppercase team key, then normalized full name; a team
/// with no statistics row still gets a profile, populated from standings
/// totals and league averages.
pub fn build_team_db(
    standings: &[Value],
    stats: &[Value],
    avgs: &LeagueAverages,
) -> HashMap<String, TeamProfile> {
    let mut stats_by_id: HashMap<i64, &Value> = HashMap::new();
    let mut stats_by_key: HashMap<String, &Value> = HashMap::new();
    let mut stats_by_name: HashMap<String, &Value> = HashMap::new();

    for row in stats {
        if let Some(id) = pick_f64(row, &["TeamID"]) {
            stats_by_id.insert(id as i64, row);
        }
        if let Some(key) = pick_str(row, STATS_KEY_KEYS) {
            stats_by_key.insert(key.to_uppercase(), row);
        }
        if let Some(name) = pick_str(row, STATS_NAME_KEYS) {
            stats_by_name.insert(normalize(&name), row);
        }
    }

    let mut db = HashMap::new();
    for row in standings {
        let Some(raw_name) = pick_str(row, STANDINGS_NAME_KEYS) else {
            continue;
        };
        let name = normalize(&raw_name);

        let key = pick_str(row, STANDINGS_KEY_KEYS).map(|k| k.to_uppercase());
        let id = pick_f64(row, &["TeamID"]).map(|v| v as i64);

        let stat_row: &Value = id
            .and_then(|id| stats_by_id.get(&id).copied())
            .or_else(|| key.as_deref().and_then(|k| stats_by_key.get(k).copied()))
            .or_else(|| stats_by_name.get(&name).copied())
            .unwrap_or(&EMPTY_ROW);

        db.insert(name, build_profile(row, stat_row, avgs));
    }
    db
}

fn build_profile(standings_row: &Value, stat_row: &Value, avgs: &LeagueAverages) -> TeamProfile {
    let wins = pick_f64_or(standings_row, &["Wins"], 0.0);
    let losses = pick_f64_or(standings_row, &["Losses"], 0.0);
    let ties = pick_f64_or(standings_row, &["Ties"], 0.0);

    let record_games = (wins + losses + ties).max(0.0);
    let stat_games = pick_f64_or(stat_row, &["Games"], 0.0);
    let games = record_games.max(stat_games).max(0.0) as u32;
    let games_f = games as f64;

    let pf_total = pick_f64(standings_row, POINTS_FOR_KEYS)
        .or_else(|| pick_f64(stat_row, &["PointsFor"]))
        .unwrap_or(0.0);
    let pa_total = pick_f64(standings_row, POINTS_AGAINST_KEYS)
        .or_else(|| pick_f64(stat_row, &["PointsAgainst"]))
        .unwrap_or(0.0);

    let off_plays = pick_f64_or(stat_row, &["OffensivePlays"], 0.0);
    let def_plays = pick_f64_or(stat_row, &["DefensivePlays"], 0.0);
    let off_yards = pick_f64_or(stat_row, &["OffensiveYards"], 0.0);
    let yards_allowed = pick_f64_or(stat_row, &["YardsAllowed"], 0.0);

    let takeaways = pick_f64_or(stat_row, &["Takeaways"], 0.0);
    let giveaways = pick_f64_or(stat_row, &["Giveaways"], 0.0);

    // Small-sample regression weight: full trust in the raw rates at 8 games.
    let reg = (games_f / 8.0).min(1.0);
    let shrink = |raw: f64, league: f64| reg * raw + (1.0 - reg) * league;

    let pfpg_raw = if pf_total > 0.0 && games > 0 {
        pf_total / games_f
    } else {
        avgs.pfpg
    };
    let papg_raw = if pa_total > 0.0 && games > 0 {
        pa_total / games_f
    } else {
        avgs.papg
    };

    let off_ypp_raw = if off_plays > 0.0 {
        off_yards / off_plays
    } else {
        avgs.off_ypp
    };
    let def_ypp_raw = if def_plays > 0.0 {
        yards_allowed / def_plays
    } else {
        avgs.def_ypp
    };

    let qb_rating = pick_f64_or(stat_row, QB_RATING_KEYS, 0.0);
    let qb_eff = if qb_rating > 0.0 {
        qb_rating / 100.0
    } else {
        avgs.qb_eff
    };

    TeamProfile {
        games,
        win_pct: if games > 0 { wins / games_f } else { 0.5 },
        pfpg: shrink(pfpg_raw, avgs.pfpg),
        papg: shrink(papg_raw, avgs.papg),
        off_ypp: shrink(off_ypp_raw, avgs.off_ypp),
        def_ypp: shrink(def_ypp_raw, avgs.def_ypp),
        to_diff_pg: if games > 0 {
            (takeaways - giveaways) / games_f
        } else {
            0.0
        },
        qb_eff,
        reliability: (games_f / 17.0).min(1.0),
    }
}
