use super::*;
use crate::{error, error::invalid, weighted_choice, DAMPING, SAMPLES};
use algograph::graph::{QueryableGraph, VertexId};
use rand::{seq::IndexedRandom, Rng};
use std::{cell::RefCell, collections::HashMap};
use tracing::debug;

/// Estimates PageRank as the visit frequencies of a single random walk.
pub struct SampledPageRank<'a, G, R>
where
    G: QueryableGraph,
    R: Rng,
{
    model: TransitionModel<'a, G>,
    samples: usize,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            samples: SAMPLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

impl<'a, G: QueryableGraph, R: Rng> SampledPageRank<'a, G, R> {
    pub fn new(g: &'a G, config: &Config, rng: R) -> error::Result<Self> {
        crate::config::check_damping(config.damping)?;
        crate::config::check_samples(config.samples)?;
        let model = TransitionModel::new(g, config.damping)?;
        Ok(Self {
            model,
            samples: config.samples,
            rng: RefCell::new(rng),
        })
    }
}

impl<G: QueryableGraph, R: Rng> PageRank for SampledPageRank<'_, G, R> {
    type Result = self::Result;

    fn calc(&self) -> error::Result<Self::Result> {
        let graph = self.model.graph();
        let mut rng = self.rng.borrow_mut();
        let mut vertices: Vec<_> = graph.iter_vertices().collect();
        vertices.sort();

        let mut visits: HashMap<_, _, ahash::RandomState> =
            vertices.iter().map(|v| (*v, 0usize)).collect();
        let Some(mut page) = vertices.choose(&mut *rng).copied() else {
            return invalid("empty graph");
        };
        *visits.entry(page).or_insert(0) += 1;

        // Rows of the transition matrix, computed the first time the walk
        // reaches a page.
        let mut rows: HashMap<VertexId, HashMap<VertexId, f64, ahash::RandomState>, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        for _ in 1..self.samples {
            if !rows.contains_key(&page) {
                rows.insert(page, self.model.distribution(&page)?);
            }
            page = weighted_choice(&rows[&page], &mut *rng)?;
            *visits.entry(page).or_insert(0) += 1;
        }

        let n = self.samples as f64;
        let page_rank = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        debug!(
            samples = self.samples,
            visited = visits.values().filter(|c| **c > 0).count(),
            "random walk finished"
        );
        Ok(Self::Result { page_rank, visits })
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a, G: QueryableGraph>(&'a self, graph: &'a G) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a, G: QueryableGraph> {
    graph: &'a G,
    result: &'a self::Result,
}

impl<G: QueryableGraph> std::fmt::Debug for ResultDebug<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).copied().unwrap_or(0.0);
            let c = self.result.visits.get(&v).copied().unwrap_or(0);
            writeln!(f, "{v:?}: {p:?}, {c}")?;
        }
        Ok(())
    }
}
