pub mod filters;
pub mod scoring;

pub use filters::{filter_options, filter_underlying};
pub use scoring::{score_options, select_best, select_options};
