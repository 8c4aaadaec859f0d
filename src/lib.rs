pub mod comparison;
pub mod config;
pub mod dataset;
pub mod head_to_head;
pub mod matchups;
pub mod persist;
pub mod player_stats;
pub mod report_export;
pub mod rounding;
pub mod state;
pub mod tables;
