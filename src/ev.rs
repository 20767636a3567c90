use serde::Serialize;

use crate::model::{ModelParams, win_probability};
use crate::odds_math::{decimal_to_american, expected_value, implied_probability};
use crate::team_db::TeamProfile;
use crate::week::week_of;

const SPREAD_POINTS_PER_PROB: f64 = 24.0;
const SPREAD_CLAMP_PTS: f64 = 20.0;
const SPREAD_DAMPING: f64 = 0.8;

/// One team's moneyline quote from the designated book. Prices are American;
/// a feed value with magnitude below 10 is decimal odds and is converted at
/// the point of use.
#[derive(Debug, Clone)]
pub struct MoneylineQuote {
    pub team: String,
    pub price: f64,
}

/// A single upcoming game as quoted by the designated bookmaker, with team
/// names already normalized.
#[derive(Debug, Clone)]
pub struct GameOdds {
    pub home: String,
    pub away: String,
    pub commence_time: String,
    pub outcomes: Vec<MoneylineQuote>,
}

/// One betting signal: a team, its game, and the model's edge against the
/// book. Built once per pipeline run and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvRecord {
    pub game: String,
    pub team: String,
    pub opponent: String,
    pub is_home: bool,
    /// Signed American odds with an explicit `+` on positive prices.
    pub odds: String,
    pub book_implied_pct: f64,
    pub model_prob_pct: f64,
    /// Expected profit/loss in stake units.
    pub ev: f64,
    pub week: u32,
    /// "teamScore - oppScore", one decimal each.
    pub expected_score: String,
    pub predicted_winner: String,
    /// Team expected score minus opponent expected score.
    pub margin: f64,
}

/// Blend the model's home win probability with the book's implied one. The
/// model keeps the dominant share; the market acts as a sanity anchor.
pub fn fuse_probability(model_prob: f64, market_prob: f64, params: &ModelParams) -> f64 {
    let fused = params.model_share * model_prob + (1.0 - params.model_share) * market_prob;
    fused.clamp(0.01, 0.99)
}

/// Derive (home, away) expected final scores from both teams' scoring rates
/// and the fused home win probability. The probability edge is mapped onto a
/// point spread, damped, and split around the combined scoring baseline.
pub fn expected_scores(home: &TeamProfile, away: &TeamProfile, home_prob: f64) -> (f64, f64) {
    let total_baseline = (home.pfpg + away.pfpg + home.papg + away.papg) / 2.0;
    let spread_pts = ((home_prob - 0.5) * SPREAD_POINTS_PER_PROB)
        .clamp(-SPREAD_CLAMP_PTS, SPREAD_CLAMP_PTS);
    let adj_spread = spread_pts * SPREAD_DAMPING;

    (
        total_baseline / 2.0 + adj_spread / 2.0,
        total_baseline / 2.0 - adj_spread / 2.0,
    )
}

/// Score one game: model the home side, fuse with the book's implied
/// probability, and emit one record per quoted outcome.
///
/// A missing home quote reads as a 0.5 market probability; an outcome naming
/// neither side is dropped silently rather than guessed at.
pub fn score_game(
    game: &GameOdds,
    home: &TeamProfile,
    away: &TeamProfile,
    params: &ModelParams,
    stake: f64,
) -> Vec<EvRecord> {
    let week = week_of(&game.commence_time);

    let model_home_prob = win_probability(home, away, true, week, params);

    let market_home_prob = game
        .outcomes
        .iter()
        .find(|o| o.team == game.home)
        .map(|o| implied_probability(american_price(o.price)))
        .unwrap_or(0.5);

    let home_prob = fuse_probability(model_home_prob, market_home_prob, params);
    let away_prob = 1.0 - home_prob;

    let (home_exp, away_exp) = expected_scores(home, away, home_prob);
    // Home-favored on exact equality; a deliberate, documented tie-break.
    let predicted_winner = if home_exp >= away_exp {
        game.home.clone()
    } else {
        game.away.clone()
    };

    let mut records = Vec::with_capacity(game.outcomes.len());
    for outcome in &game.outcomes {
        let is_home = outcome.team == game.home;
        if !is_home && outcome.team != game.away {
            continue;
        }

        let (prob, team_exp, opp_exp, opponent) = if is_home {
            (home_prob, home_exp, away_exp, game.away.clone())
        } else {
            (away_prob, away_exp, home_exp, game.home.clone())
        };

        let odds = american_price(outcome.price);
        let book_implied = implied_probability(odds);
        let ev = expected_value(odds, prob, stake);

        let odds_int = odds.round() as i64;
        records.push(EvRecord {
            game: format!("{} vs {}", game.home, game.away),
            team: outcome.team.clone(),
            opponent,
            is_home,
            odds: if odds_int > 0 {
                format!("+{odds_int}")
            } else {
                format!("{odds_int}")
            },
            book_implied_pct: round2(book_implied * 100.0),
            model_prob_pct: round2(prob * 100.0),
            ev: round2(ev),
            week,
            expected_score: format!("{team_exp:.1} - {opp_exp:.1}"),
            predicted_winner: predicted_winner.clone(),
            margin: round1(team_exp - opp_exp),
        });
    }
    records
}

/// The odds feed mixes formats: anything with magnitude below 10 is a decimal
/// price and gets converted; real American prices pass through.
fn american_price(price: f64) -> f64 {
    if price.abs() < 10.0 {
        decimal_to_american(price) as f64
    } else {
        price
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
