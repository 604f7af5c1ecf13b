use crate::out_links;
use algograph::graph::*;
use std::collections::HashMap;

/// Reverse adjacency of a graph: for each vertex, the distinct vertices linking
/// to it, plus every vertex's out degree.
#[derive(Debug, Clone)]
pub struct IncomingIndex {
    incoming: HashMap<VertexId, Vec<VertexId>, ahash::RandomState>,
    out_degrees: HashMap<VertexId, usize, ahash::RandomState>,
}

impl IncomingIndex {
    pub fn new<G: QueryableGraph>(g: &G) -> Self {
        let mut incoming: HashMap<VertexId, Vec<VertexId>, ahash::RandomState> =
            g.iter_vertices().map(|v| (v, vec![])).collect();
        let mut out_degrees = HashMap::with_hasher(ahash::RandomState::new());
        for u in g.iter_vertices() {
            let links = out_links(g, &u);
            out_degrees.insert(u, links.len());
            for v in links {
                incoming.entry(v).or_default().push(u);
            }
        }
        for sources in incoming.values_mut() {
            sources.sort();
        }
        Self {
            incoming,
            out_degrees,
        }
    }

    pub fn incoming(&self, v: &VertexId) -> &[VertexId] {
        self.incoming.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_degree(&self, v: &VertexId) -> usize {
        self.out_degrees.get(v).copied().unwrap_or(0)
    }

    pub fn dangling(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.out_degrees
            .iter()
            .filter(|(_, d)| **d == 0)
            .map(|(v, _)| *v)
    }
}
