use anyhow::Result;

use nfl_edge::pipeline::{PipelineConfig, compute_ev_results};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = PipelineConfig::from_env();
    let records = compute_ev_results(&cfg)?;

    if records.is_empty() {
        println!("No quoted games to evaluate.");
        return Ok(());
    }

    if std::env::args().any(|arg| arg == "--json") {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!(
        "{:<44} {:>6} {:>5} {:>8} {:>8} {:>7}  {:<13} {}",
        "TEAM (game)", "ODDS", "WK", "BOOK%", "MODEL%", "EV", "EXP SCORE", "PICK"
    );
    for rec in &records {
        let side = if rec.is_home { "H" } else { "A" };
        println!(
            "{:<44} {:>6} {:>5} {:>8.2} {:>8.2} {:>7.2}  {:<13} {}",
            format!("{} ({}, {})", rec.team, rec.game, side),
            rec.odds,
            rec.week,
            rec.book_implied_pct,
            rec.model_prob_pct,
            rec.ev,
            rec.expected_score,
            rec.predicted_winner,
        );
    }

    Ok(())
}
