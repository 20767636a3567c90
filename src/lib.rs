pub mod blend;
pub mod ev;
pub mod http_client;
pub mod model;
pub mod odds_api;
pub mod odds_math;
pub mod pipeline;
pub mod sportsdata;
pub mod team_db;
pub mod teams;
pub mod week;

pub use ev::{EvRecord, GameOdds, MoneylineQuote};
pub use model::ModelParams;
pub use pipeline::{PipelineConfig, compute_ev_results};
pub use team_db::{LeagueAverages, TeamProfile};
