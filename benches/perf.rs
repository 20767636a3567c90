use std::collections::HashMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use nfl_edge::ev::{GameOdds, MoneylineQuote};
use nfl_edge::model::{ModelParams, win_probability};
use nfl_edge::pipeline::rank_games;
use nfl_edge::team_db::{LeagueAverages, TeamProfile, build_team_db};

fn sample_profile(seed: u32) -> TeamProfile {
    let t = (seed % 17) as f64 / 17.0;
    TeamProfile {
        games: 9,
        win_pct: 0.2 + 0.6 * t,
        pfpg: 18.0 + 10.0 * t,
        papg: 28.0 - 10.0 * t,
        off_ypp: 5.0 + 1.2 * t,
        def_ypp: 6.2 - 1.2 * t,
        to_diff_pg: -1.0 + 2.0 * t,
        qb_eff: 0.4 + 0.7 * t,
        reliability: 9.0 / 17.0,
    }
}

fn bench_win_probability(c: &mut Criterion) {
    let params = ModelParams::default();
    let home = sample_profile(3);
    let away = sample_profile(11);

    c.bench_function("win_probability", |b| {
        b.iter(|| {
            let p = win_probability(
                black_box(&home),
                black_box(&away),
                true,
                black_box(10),
                &params,
            );
            black_box(p);
        })
    });
}

fn bench_rank_games(c: &mut Criterion) {
    let params = ModelParams::default();

    let mut teams = HashMap::new();
    let mut games = Vec::new();
    for idx in 0..16u32 {
        let home = format!("Home Team {idx}");
        let away = format!("Away Team {idx}");
        teams.insert(home.clone(), sample_profile(idx));
        teams.insert(away.clone(), sample_profile(idx + 7));
        games.push(GameOdds {
            home: home.clone(),
            away: away.clone(),
            commence_time: "2025-11-09T18:00:00Z".to_string(),
            outcomes: vec![
                MoneylineQuote {
                    team: home,
                    price: -140.0,
                },
                MoneylineQuote {
                    team: away,
                    price: 120.0,
                },
            ],
        });
    }

    c.bench_function("rank_games_full_slate", |b| {
        b.iter(|| {
            let records = rank_games(black_box(&games), black_box(&teams), &params, 5.0);
            black_box(records.len());
        })
    });
}

fn bench_build_team_db(c: &mut Criterion) {
    let avgs = LeagueAverages::default();
    let standings: Vec<serde_json::Value> = (0..32)
        .map(|idx| {
            serde_json::json!({
                "TeamID": idx,
                "Key": format!("T{idx}"),
                "FullName": format!("Team {idx}"),
                "Wins": idx % 10,
                "Losses": 9 - (idx % 10),
                "PointsFor": 180 + idx * 3,
                "PointsAgainst": 210 - idx * 2,
            })
        })
        .collect();
    let stats: Vec<serde_json::Value> = (0..32)
        .map(|idx| {
            serde_json::json!({
                "TeamID": idx,
                "Games": 9,
                "OffensivePlays": 540,
                "OffensiveYards": 2900 + idx * 20,
                "DefensivePlays": 550,
                "YardsAllowed": 3100 - idx * 15,
                "Takeaways": 10,
                "Giveaways": 8,
                "QBRating": 88 + idx,
            })
        })
        .collect();

    c.bench_function("build_team_db", |b| {
        b.iter(|| {
            let db = build_team_db(black_box(&standings), black_box(&stats), &avgs);
            black_box(db.len());
        })
    });
}

criterion_group!(
    perf,
    bench_win_probability,
    bench_rank_games,
    bench_build_team_db
);
criterion_main!(perf);
