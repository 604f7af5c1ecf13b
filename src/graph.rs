use crate::{
    error::{invalid, Result},
    RankMap,
};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// A closed hyperlink corpus: every page with the distinct other pages of the
/// corpus it links to.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    ids: BTreeMap<String, VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
}

impl LinkGraph {
    /// Builds a graph from `(page, targets)` pairs.
    ///
    /// Repeated pages are merged. Self links, duplicated links and links to
    /// pages that are not keys are dropped, so the result is always closed.
    pub fn from_links<I, P, L, T>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            raw.entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }
        Self::from_raw(raw)
    }

    fn from_raw(raw: BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let mut ids = BTreeMap::new();
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        for page in raw.keys() {
            let v = graph.add_vertex();
            ids.insert(page.clone(), v);
            names.insert(v, page.clone());
        }
        for (page, targets) in raw.iter() {
            let u = ids[page];
            for target in targets.iter() {
                if target == page {
                    debug!("{page}: dropping self link");
                    continue;
                }
                let Some(v) = ids.get(target) else {
                    debug!("{page}: dropping link to {target} outside the corpus");
                    continue;
                };
                let _ = graph.add_edge(u, *v);
            }
        }
        Self { graph, ids, names }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Page identifiers in ascending order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.keys().map(String::as_str)
    }

    pub fn vertex(&self, page: &str) -> Result<VertexId> {
        match self.ids.get(page) {
            Some(v) => Ok(*v),
            None => invalid(format!("page {page:?} is not in the corpus")),
        }
    }

    pub fn name(&self, v: &VertexId) -> Option<&str> {
        self.names.get(v).map(String::as_str)
    }

    /// Distinct pages linked to by `page`, in ascending order.
    pub fn links(&self, page: &str) -> Result<BTreeSet<&str>> {
        let u = self.vertex(page)?;
        Ok(self
            .graph
            .out_edges(&u)
            .filter_map(|e| self.name(&e.sink))
            .collect())
    }

    /// Pages without outgoing links.
    pub fn dangling(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids
            .iter()
            .filter(|(_, v)| self.graph.out_edges(v).next().is_none())
            .map(|(page, _)| page.as_str())
    }

    /// Names a per-vertex result. Vertices missing from `values` are reported as 0.
    pub fn label(&self, values: &HashMap<VertexId, f64, ahash::RandomState>) -> RankMap {
        self.ids
            .iter()
            .map(|(page, v)| (page.clone(), values.get(v).copied().unwrap_or(0.0)))
            .collect()
    }
}

impl QueryableGraph for LinkGraph {
    fn vertex_size(&self) -> usize {
        self.graph.vertex_size()
    }

    fn iter_vertices(&self) -> Box<dyn Iterator<Item = VertexId> + '_> {
        self.graph.iter_vertices()
    }

    fn contains_vertex(&self, v: &VertexId) -> bool {
        self.graph.contains_vertex(v)
    }

    fn edge_size(&self) -> usize {
        self.graph.edge_size()
    }

    fn iter_edges(&self) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.iter_edges()
    }

    fn contains_edge(&self, e: &EdgeId) -> bool {
        self.graph.contains_edge(e)
    }

    fn find_edge(&self, e: &EdgeId) -> Option<Edge> {
        self.graph.find_edge(e)
    }

    fn edges_connecting(
        &self,
        source: &VertexId,
        sink: &VertexId,
    ) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.edges_connecting(source, sink)
    }

    fn in_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.in_edges(v)
    }

    fn out_edges(&self, v: &VertexId) -> Box<dyn Iterator<Item = Edge> + '_> {
        self.graph.out_edges(v)
    }
}
