//! Page-level entry points: graphs in, `RankMap`s out.

use crate::{
    config::Config,
    error::*,
    page_rank::{
        iterated::{self, IteratedPageRank},
        sampled::{self, SampledPageRank},
        PageRank, TransitionModel,
    },
    LinkGraph, RankMap,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::info;

/// Distribution of the surfer's next page when standing on `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<RankMap> {
    let model = TransitionModel::new(graph, damping)?;
    let u = graph.vertex(page)?;
    Ok(graph.label(&model.distribution(&u)?))
}

/// Estimates ranks from a random walk of `n` pages, drawn with the thread rng.
pub fn sample_rank(graph: &LinkGraph, damping: f64, n: usize) -> Result<RankMap> {
    let config = sampled::Config {
        damping,
        samples: n,
    };
    sample_rank_with(graph, &config, rand::rng())
}

pub fn sample_rank_with<R: Rng>(
    graph: &LinkGraph,
    config: &sampled::Config,
    rng: R,
) -> Result<RankMap> {
    let res = SampledPageRank::new(graph, config, rng)?.calc()?;
    let ranks = graph.label(&res.page_rank);
    info!(samples = config.samples, sum = ranks.sum(), "sampled page rank");
    Ok(ranks)
}

/// Estimates ranks by iterating the PageRank recurrence to a fixed point.
pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> Result<RankMap> {
    let config = iterated::Config {
        damping,
        ..iterated::Config::default()
    };
    iterate_rank_with(graph, &config)
}

pub fn iterate_rank_with(graph: &LinkGraph, config: &iterated::Config) -> Result<RankMap> {
    let res = IteratedPageRank::new(graph, config)?.calc()?;
    let ranks = graph.label(&res.page_rank);
    info!(
        iterations = res.iterations,
        sum = ranks.sum(),
        "iterated page rank"
    );
    Ok(ranks)
}

/// Both estimates under one configuration: `(sampled, iterated)`.
pub fn rank(graph: &LinkGraph, config: &Config) -> Result<(RankMap, RankMap)> {
    config.validate()?;
    let sampled = match config.seed {
        Some(seed) => sample_rank_with(graph, &config.sampled(), SmallRng::seed_from_u64(seed))?,
        None => sample_rank_with(graph, &config.sampled(), rand::rng())?,
    };
    let iterated = iterate_rank_with(graph, &config.iterated())?;
    Ok((sampled, iterated))
}
