use crate::team_db::TeamProfile;

/// Fuse a team's current-season profile with the prior season's, weighted by
/// how much of the current season has been played: `w = min(1, games/17)`.
///
/// One side absent returns the other untouched; both absent returns `None`
/// and the team is excluded from modeling downstream. The fused profile's
/// `reliability` is the recency weight itself.
pub fn blend_profiles(
    current: Option<&TeamProfile>,
    prior: Option<&TeamProfile>,
) -> Option<TeamProfile> {
    match (current, prior) {
        (None, None) => None,
        (Some(cur), None) => Some(*cur),
        (None, Some(pri)) => Some(*pri),
        (Some(cur), Some(pri)) => {
            let w = ((cur.games as f64) / 17.0).clamp(0.0, 1.0);
            let mix = |a: f64, b: f64| w * a + (1.0 - w) * b;
            Some(TeamProfile {
                games: cur.games,
                win_pct: mix(cur.win_pct, pri.win_pct),
                pfpg: mix(cur.pfpg, pri.pfpg),
                papg: mix(cur.papg, pri.papg),
                off_ypp: mix(cur.off_ypp, pri.off_ypp),
                def_ypp: mix(cur.def_ypp, pri.def_ypp),
                to_diff_pg: mix(cur.to_diff_pg, pri.to_diff_pg),
                qb_eff: mix(cur.qb_eff, pri.qb_eff),
                reliability: w,
            })
        }
    }
}
