use super::*;
use crate::{error, error::Error, norm_inf_diff, DAMPING, MAX_ITERATIONS, TOLERANCE};
use algograph::graph::{QueryableGraph, VertexId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Where the rank held by pages without links goes each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DanglingPolicy {
    /// Spread uniformly over every page, as the surfer would teleport.
    /// Total rank stays 1.
    #[default]
    Redistribute,
    /// Dropped. Total rank drifts below 1 when dangling pages exist.
    Ignore,
}

pub struct IteratedPageRank<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
    tolerance: f64,
    max_iterations: usize,
    dangling: DanglingPolicy,
    incoming: IncomingIndex,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
    pub dangling: DanglingPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            tolerance: TOLERANCE,
            max_iterations: MAX_ITERATIONS,
            dangling: DanglingPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub iterations: usize,
}

impl<'a, G: QueryableGraph> IteratedPageRank<'a, G> {
    pub fn new(g: &'a G, config: &Config) -> error::Result<Self> {
        crate::config::check_damping(config.damping)?;
        crate::config::check_tolerance(config.tolerance)?;
        crate::config::check_max_iterations(config.max_iterations)?;
        if g.vertex_size() == 0 {
            return error::invalid("empty graph");
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            dangling: config.dangling,
            incoming: IncomingIndex::new(g),
        })
    }

    /// One application of the recurrence to the snapshot `p`, written into `r`.
    fn step(
        &self,
        p: &HashMap<VertexId, f64, ahash::RandomState>,
        r: &mut HashMap<VertexId, f64, ahash::RandomState>,
    ) {
        let damping = self.damping;
        let n = self.graph.vertex_size() as f64;
        let dangling_rank: f64 = match self.dangling {
            DanglingPolicy::Redistribute => self.incoming.dangling().map(|v| p[&v]).sum(),
            DanglingPolicy::Ignore => 0.0,
        };
        let base = (1.0 - damping) / n + damping * dangling_rank / n;
        r.clear();
        for v in self.graph.iter_vertices() {
            let linked: f64 = self
                .incoming
                .incoming(&v)
                .iter()
                .map(|u| p[u] / (self.incoming.out_degree(u) as f64))
                .sum();
            r.insert(v, base + damping * linked);
        }
    }
}

impl<G: QueryableGraph> PageRank for IteratedPageRank<'_, G> {
    type Result = self::Result;

    fn calc(&self) -> error::Result<Self::Result> {
        let mut p: HashMap<_, _, ahash::RandomState> = {
            let n = self.graph.vertex_size() as f64;
            self.graph.iter_vertices().map(|v| (v, 1.0 / n)).collect()
        };
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut last_delta = f64::INFINITY;
        for round in 1..=self.max_iterations {
            self.step(&p, &mut r);
            last_delta = norm_inf_diff(&r, &p);
            debug!(round, delta = last_delta, "iteration");
            if last_delta <= self.tolerance {
                let delta = r.iter().map(|(v, x)| (*v, x - p[v])).collect();
                return Ok(Self::Result {
                    page_rank: r,
                    delta,
                    iterations: round,
                });
            }
            std::mem::swap(&mut p, &mut r);
        }
        warn!(
            max_iterations = self.max_iterations,
            delta = last_delta,
            "page rank did not converge"
        );
        Err(Error::ConvergenceTimeout {
            iterations: self.max_iterations,
            delta: last_delta,
        })
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
        writeln!(f, "after {} iterations", self.result.iterations)?;
        for v in self.graph.iter_vertices() {
            let p = self.result.page_rank.get(&v).copied().unwrap_or(0.0);
            let d = self.result.delta.get(&v).copied().unwrap_or(0.0);
            writeln!(f, "{v:?}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{norm_1, LinkGraph};
    use quickcheck_macros::quickcheck;

    fn iterate(g: &LinkGraph, config: &Config) -> self::Result {
        IteratedPageRank::new(g, config).unwrap().calc().unwrap()
    }

    fn rank(g: &LinkGraph, res: &self::Result, page: &str) -> f64 {
        res.page_rank[&g.vertex(page).unwrap()]
    }

    #[test]
    fn two_cycle() {
        let g = LinkGraph::from_links([("A", vec!["B"]), ("B", vec!["A"])]);
        let res = iterate(&g, &Config::default());
        assert!((rank(&g, &res, "A") - 0.5).abs() < 1e-3, "{:?}", res.debug(&g));
        assert!((rank(&g, &res, "B") - 0.5).abs() < 1e-3, "{:?}", res.debug(&g));
    }

    #[test]
    fn three_cycle() {
        let g = LinkGraph::from_links([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec!["A"])]);
        let res = iterate(&g, &Config::default());
        for page in ["A", "B", "C"] {
            assert!((rank(&g, &res, page) - 1.0 / 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn star() {
        // Every leaf links to the hub; the hub links back to every leaf.
        let g = LinkGraph::from_links([
            ("hub", vec!["1", "2", "3"]),
            ("1", vec!["hub"]),
            ("2", vec!["hub"]),
            ("3", vec!["hub"]),
        ]);
        let res = iterate(&g, &Config::default());
        let hub = rank(&g, &res, "hub");
        for leaf in ["1", "2", "3"] {
            assert!(hub > rank(&g, &res, leaf));
        }
        assert!((norm_1(&res.page_rank) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn redistribute_keeps_mass() {
        let g = LinkGraph::from_links([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["A"]),
            ("D", vec![]),
        ]);
        let res = iterate(&g, &Config::default());
        assert!((norm_1(&res.page_rank) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ignore_loses_mass() {
        let g = LinkGraph::from_links([("A", vec!["B"]), ("B", vec![])]);
        let cfg = Config {
            dangling: DanglingPolicy::Ignore,
            ..Config::default()
        };
        let res = iterate(&g, &cfg);
        // A = 0.075, B = 0.075 + 0.85 * 0.075
        assert!((rank(&g, &res, "A") - 0.075).abs() < 1e-3);
        assert!((rank(&g, &res, "B") - 0.13875).abs() < 1e-3);
        assert!(norm_1(&res.page_rank) < 1.0);
    }

    #[test]
    fn times_out() {
        let g = LinkGraph::from_links([("A", vec!["B"]), ("B", vec![]), ("C", vec!["A", "B"])]);
        let cfg = Config {
            max_iterations: 1,
            ..Config::default()
        };
        let res = IteratedPageRank::new(&g, &cfg).unwrap().calc();
        assert!(
            matches!(res, Err(Error::ConvergenceTimeout { iterations: 1, .. })),
            "{res:?}"
        );
    }

    #[test]
    fn rejects_bad_config() {
        let g = LinkGraph::from_links([("A", vec!["B"]), ("B", vec!["A"])]);
        for cfg in [
            Config {
                damping: 0.0,
                ..Config::default()
            },
            Config {
                tolerance: 0.0,
                ..Config::default()
            },
            Config {
                max_iterations: 0,
                ..Config::default()
            },
        ] {
            assert!(matches!(
                IteratedPageRank::new(&g, &cfg),
                Err(Error::InvalidArgument(_))
            ));
        }
        let empty = LinkGraph::from_links(Vec::<(String, Vec<String>)>::new());
        assert!(IteratedPageRank::new(&empty, &Config::default()).is_err());
    }

    #[quickcheck]
    fn converges_to_a_distribution(g: crate::page_rank::tests::RandomGraph) {
        let g = &g.graph;
        if g.is_empty() {
            return;
        }
        let res = iterate(g, &Config::default());
        assert_eq!(res.page_rank.len(), g.len());
        assert!(res.page_rank.values().all(|p| (0.0..=1.0).contains(p)));
        assert!((norm_1(&res.page_rank) - 1.0).abs() < 1e-3, "{:?}", res.debug(g));
    }

    #[quickcheck]
    fn deterministic(g: crate::page_rank::tests::RandomGraph) {
        let g = &g.graph;
        if g.is_empty() {
            return;
        }
        let cfg = Config::default();
        let r0 = iterate(g, &cfg);
        let r1 = iterate(g, &cfg);
        for v in g.iter_vertices() {
            assert!((r0.page_rank[&v] - r1.page_rank[&v]).abs() <= 2.0 * cfg.tolerance);
        }
    }
}
