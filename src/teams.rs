use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Alias table covering provider abbreviations plus the alternate full names
/// the odds feed has been seen to use. Keys are stored lowercase; lookups are
/// case-insensitive.
static NAME_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs: &[(&str, &str)] = &[
        ("buf", "Buffalo Bills"),
        ("mia", "Miami Dolphins"),
        ("ne", "New England Patriots"),
        ("nyj", "New York Jets"),
        ("bal", "Baltimore Ravens"),
        ("cin", "Cincinnati Bengals"),
        ("cle", "Cleveland Browns"),
        ("pit", "Pittsburgh Steelers"),
        ("hou", "Houston Texans"),
        ("ind", "Indianapolis Colts"),
        ("jax", "Jacksonville Jaguars"),
        ("ten", "Tennessee Titans"),
        ("den", "Denver Broncos"),
        ("kc", "Kansas City Chiefs"),
        ("lv", "Las Vegas Raiders"),
        ("lac", "Los Angeles Chargers"),
        ("dal", "Dallas Cowboys"),
        ("nyg", "New York Giants"),
        ("phi", "Philadelphia Eagles"),
        ("wsh", "Washington Commanders"),
        ("was", "Washington Commanders"),
        ("chi", "Chicago Bears"),
        ("det", "Detroit Lions"),
        ("gb", "Green Bay Packers"),
        ("min", "Minnesota Vikings"),
        ("atl", "Atlanta Falcons"),
        ("car", "Carolina Panthers"),
        ("no", "New Orleans Saints"),
        ("tb", "Tampa Bay Buccaneers"),
        ("ari", "Arizona Cardinals"),
        ("lar", "Los Angeles Rams"),
        ("sf", "San Francisco 49ers"),
        ("sea", "Seattle Seahawks"),
        ("las vegas", "Las Vegas Raiders"),
        ("raiders", "Las Vegas Raiders"),
        ("washington", "Washington Commanders"),
        ("washington football team", "Washington Commanders"),
    ];
    pairs.iter().copied().collect()
});

/// Map a raw team identifier (abbreviation, alias, or full name) to the
/// canonical franchise name. Unmapped non-empty input is returned trimmed but
/// otherwise unchanged: downstream joins tolerate a miss by failing to match,
/// never by erroring.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return raw.to_string();
    }
    match NAME_ALIASES.get(trimmed.to_lowercase().as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => trimmed.to_string(),
    }
}
