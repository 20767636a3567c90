use crate::team_db::TeamProfile;

const PROB_FLOOR: f64 = 0.01;
const PROB_CEIL: f64 = 0.99;

/// Tuned model weights. These were fit by eye against historical seasons, not
/// derived, so they live in configuration rather than inline literals.
#[derive(Debug, Clone, Copy)]
pub struct ModelParams {
    pub win_pct_weight: f64,
    pub point_diff_weight: f64,
    /// Points-per-game differential is normalized by this before weighting.
    pub point_diff_scale: f64,
    pub ypp_weight: f64,
    pub ypp_scale: f64,
    pub turnover_weight: f64,
    pub qb_weight: f64,
    pub home_edge: f64,
    /// Post-temper compression toward 0.5 (0.85 keeps 85% of the deviation).
    pub squash: f64,
    /// Share of the final probability taken from the model; the rest comes
    /// from the book's implied probability.
    pub model_share: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            win_pct_weight: 0.35,
            point_diff_weight: 0.15,
            point_diff_scale: 14.0,
            ypp_weight: 0.15,
            ypp_scale: 1.5,
            turnover_weight: 0.07,
            qb_weight: 0.10,
            home_edge: 0.04,
            squash: 0.85,
            model_share: 0.85,
        }
    }
}

/// Confidence in season statistics grows as the season progresses; early
/// weeks get their log-odds shrunk hardest.
pub fn tempering_factor(week: u32) -> f64 {
    if week <= 4 {
        0.65
    } else if week <= 10 {
        0.75
    } else if week <= 14 {
        0.85
    } else {
        0.9
    }
}

/// Win probability for `team` against `opp`, clamped to [0.01, 0.99].
///
/// Five weighted differentials move the baseline 0.5, a fixed home edge is
/// added when applicable, then the result is tempered by week and squashed
/// toward 0.5 to keep the extremes honest. Pure and deterministic.
pub fn win_probability(
    team: &TeamProfile,
    opp: &TeamProfile,
    is_home: bool,
    week: u32,
    params: &ModelParams,
) -> f64 {
    let mut p = 0.5;

    p += params.win_pct_weight * (team.win_pct - opp.win_pct);
    p += params.point_diff_weight * ((team.pfpg - team.papg) - (opp.pfpg - opp.papg))
        / params.point_diff_scale;
    p += params.ypp_weight * ((team.off_ypp - opp.def_ypp) - (opp.off_ypp - team.def_ypp))
        / params.ypp_scale;
    p += params.turnover_weight * (team.to_diff_pg - opp.to_diff_pg);
    p += params.qb_weight * (team.qb_eff - opp.qb_eff);

    if is_home {
        p += params.home_edge;
    }

    p = p.clamp(PROB_FLOOR, PROB_CEIL);

    let t = tempering_factor(week);
    let logit = (p / (1.0 - p)).ln();
    let tempered = 1.0 / (1.0 + (-t * logit).exp());

    let squashed = 0.5 + params.squash * (tempered - 0.5);
    squashed.clamp(PROB_FLOOR, PROB_CEIL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team_db::LeagueAverages;

    fn league_average_profile(games: u32, win_pct: f64) -> TeamProfile {
        let avgs = LeagueAverages::default();
        TeamProfile {
            games,
            win_pct,
            pfpg: avgs.pfpg,
            papg: avgs.papg,
            off_ypp: avgs.off_ypp,
            def_ypp: avgs.def_ypp,
            to_diff_pg: 0.0,
            qb_eff: avgs.qb_eff,
            reliability: (games as f64 / 17.0).min(1.0),
        }
    }

    #[test]
    fn output_stays_in_clamp_range() {
        let params = ModelParams::default();
        let strong = TeamProfile {
            games: 17,
            win_pct: 1.0,
            pfpg: 40.0,
            papg: 10.0,
            off_ypp: 8.0,
            def_ypp: 4.0,
            to_diff_pg: 3.0,
            qb_eff: 1.3,
            reliability: 1.0,
        };
        let weak = TeamProfile {
            games: 17,
            win_pct: 0.0,
            pfpg: 10.0,
            papg: 40.0,
            off_ypp: 4.0,
            def_ypp: 8.0,
            to_diff_pg: -3.0,
            qb_eff: 0.3,
            reliability: 1.0,
        };
        for week in 1..=18 {
            let p = win_probability(&strong, &weak, true, week, &params);
            assert!((0.01..=0.99).contains(&p), "week {week}: {p}");
            let q = win_probability(&weak, &strong, false, week, &params);
            assert!((0.01..=0.99).contains(&q), "week {week}: {q}");
        }
    }

    #[test]
    fn identical_teams_without_home_edge_are_a_coin_flip() {
        let params = ModelParams::default();
        let a = league_average_profile(8, 0.5);
        let p = win_probability(&a, &a, false, 8, &params);
        assert!((p - 0.5).abs() < 1e-9);
    }

    #[test]
    fn tempering_is_monotonic_in_week() {
        let params = ModelParams::default();
        let favorite = league_average_profile(10, 0.8);
        let underdog = league_average_profile(10, 0.3);

        // Representative week per tempering tier.
        let tiers = [1u32, 8, 12, 16];
        let probs: Vec<f64> = tiers
            .iter()
            .map(|&w| win_probability(&favorite, &underdog, false, w, &params))
            .collect();
        for pair in probs.windows(2) {
            assert!(
                pair[1] > pair[0],
                "later weeks should push a favorite further from 0.5: {probs:?}"
            );
        }

        // And symmetrically for the underdog side.
        let probs: Vec<f64> = tiers
            .iter()
            .map(|&w| win_probability(&underdog, &favorite, false, w, &params))
            .collect();
        for pair in probs.windows(2) {
            assert!(pair[1] < pair[0], "underdog drifts down: {probs:?}");
        }
    }

    #[test]
    fn win_pct_gap_dominates_home_edge_alone() {
        let params = ModelParams::default();
        let home = league_average_profile(10, 0.700);
        let away = league_average_profile(10, 0.300);

        let with_gap = win_probability(&home, &away, true, 1, &params);
        let edge_only = win_probability(&away, &away, true, 1, &params);

        assert!(with_gap > edge_only);
        assert!(with_gap <= 0.99);
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let params = ModelParams::default();
        let a = league_average_profile(5, 0.6);
        let b = league_average_profile(5, 0.4);
        let p1 = win_probability(&a, &b, true, 6, &params);
        let p2 = win_probability(&a, &b, true, 6, &params);
        assert_eq!(p1, p2);
    }
}
