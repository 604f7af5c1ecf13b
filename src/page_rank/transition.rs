use crate::{
    error::{invalid, Result},
    out_links,
};
use algograph::graph::*;
use std::collections::HashMap;

/// Where a random surfer standing on a page goes next.
///
/// With probability `damping` the surfer follows one of the page's links,
/// chosen uniformly; otherwise it teleports to any page of the corpus. A page
/// without links always teleports.
pub struct TransitionModel<'a, G>
where
    G: QueryableGraph,
{
    graph: &'a G,
    damping: f64,
}

impl<'a, G: QueryableGraph> TransitionModel<'a, G> {
    pub fn new(graph: &'a G, damping: f64) -> Result<Self> {
        if graph.vertex_size() == 0 {
            return invalid("empty graph");
        }
        if !(0.0..=1.0).contains(&damping) {
            return invalid(format!("damping={damping}"));
        }
        Ok(Self { graph, damping })
    }

    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Probability of moving from `page` to every vertex of the graph.
    pub fn distribution(
        &self,
        page: &VertexId,
    ) -> Result<HashMap<VertexId, f64, ahash::RandomState>> {
        if !self.graph.contains_vertex(page) {
            return invalid(format!("{page:?} is not in the graph"));
        }
        let n = self.graph.vertex_size() as f64;
        let links = out_links(self.graph, page);
        if links.is_empty() {
            return Ok(self.graph.iter_vertices().map(|v| (v, 1.0 / n)).collect());
        }
        let pa = (1.0 - self.damping) / n;
        let pl = self.damping / (links.len() as f64);
        Ok(self
            .graph
            .iter_vertices()
            .map(|v| {
                if links.contains(&v) {
                    (v, pa + pl)
                } else {
                    (v, pa)
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{norm_1, Error, LinkGraph};
    use quickcheck_macros::quickcheck;

    fn dist(g: &LinkGraph, page: &str, damping: f64) -> HashMap<String, f64> {
        let model = TransitionModel::new(g, damping).unwrap();
        let u = g.vertex(page).unwrap();
        model
            .distribution(&u)
            .unwrap()
            .into_iter()
            .map(|(v, p)| (g.name(&v).unwrap().to_string(), p))
            .collect()
    }

    #[test]
    fn dangling_page_is_uniform() {
        let g = LinkGraph::from_links([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["A"]),
            ("D", vec![]),
        ]);
        let d = dist(&g, "D", 0.85);
        assert_eq!(d.len(), 4);
        for p in d.values() {
            assert_eq!(*p, 0.25);
        }
    }

    #[test]
    fn splits_damping_over_links() {
        let g = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["1", "3"]), ("3", vec!["2"])]);
        let d = dist(&g, "2", 0.85);
        let pa = 0.15 / 3.0;
        assert!((d["1"] - (pa + 0.425)).abs() < 1e-12);
        assert!((d["2"] - pa).abs() < 1e-12);
        assert!((d["3"] - (pa + 0.425)).abs() < 1e-12);
    }

    #[test]
    fn zero_damping_is_uniform() {
        let g = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["3"]), ("3", vec!["1"])]);
        for p in dist(&g, "1", 0.0).values() {
            assert!((p - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn full_damping_follows_links() {
        let g = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["3"]), ("3", vec!["1"])]);
        let d = dist(&g, "1", 0.999999);
        assert!(d["2"] > 0.9999);
        assert!(d["1"] < 1e-6);
        assert!(d["3"] < 1e-6);
    }

    #[test]
    fn rejects_bad_input() {
        let empty = LinkGraph::from_links(Vec::<(String, Vec<String>)>::new());
        assert!(matches!(
            TransitionModel::new(&empty, 0.85),
            Err(Error::InvalidArgument(_))
        ));
        let g = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["1"])]);
        assert!(TransitionModel::new(&g, 1.5).is_err());
        assert!(TransitionModel::new(&g, f64::NAN).is_err());
    }

    #[test]
    fn rejects_foreign_vertex() {
        let g = LinkGraph::from_links([("1", vec!["2"]), ("2", vec!["1"])]);
        let other = LinkGraph::from_links([("a", vec!["b"]), ("b", vec![]), ("c", vec![])]);
        let foreign = other.vertex("c").unwrap();
        let model = TransitionModel::new(&g, 0.85).unwrap();
        assert!(matches!(
            model.distribution(&foreign),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[quickcheck]
    fn is_a_distribution(g: crate::page_rank::tests::RandomGraph, damping: u8) {
        let g = &g.graph;
        if g.is_empty() {
            return;
        }
        let damping = f64::from(damping) / 255.0;
        let model = TransitionModel::new(g, damping).unwrap();
        for u in g.iter_vertices() {
            let d = model.distribution(&u).unwrap();
            assert_eq!(d.len(), g.len());
            assert!(d.values().all(|p| *p >= 0.0));
            assert!((norm_1(&d) - 1.0).abs() < 1e-9, "{d:?}");
        }
    }
}
