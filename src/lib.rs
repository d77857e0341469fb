pub mod collector;
pub mod config;
pub mod dataset;
pub mod leader_rankings;
pub mod leaders;
pub mod normalize;
pub mod report;
pub mod scoreboard_fetch;
