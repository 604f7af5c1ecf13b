mod common;
pub use self::common::*;
pub mod config;
pub use self::config::{Config, DAMPING, MAX_ITERATIONS, SAMPLES, TOLERANCE};
pub mod crawl;
pub use self::crawl::crawl;
pub mod error;
pub use self::error::{Error, Result};
mod estimate;
pub use self::estimate::*;
pub mod graph;
pub use self::graph::LinkGraph;
mod rank_map;
pub use self::rank_map::RankMap;

pub mod page_rank;
