use crate::error::{Error, Result};
use algograph::graph::*;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};
use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Distinct vertices `u` links to, self loops excluded.
pub fn out_links<G: QueryableGraph>(graph: &G, u: &VertexId) -> HashSet<VertexId, ahash::RandomState> {
    graph
        .out_edges(u)
        .map(|e| e.sink)
        .filter(|v| v != u)
        .collect()
}

pub fn norm_1<K: Ord + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

/// Largest elementwise absolute difference between two vectors over the keys of `a`.
/// Keys missing from `b` count as zero.
pub fn norm_inf_diff<K: Ord + Hash>(
    a: &HashMap<K, f64, ahash::RandomState>,
    b: &HashMap<K, f64, ahash::RandomState>,
) -> f64 {
    a.iter()
        .map(|(k, x)| (x - b.get(k).copied().unwrap_or(0.0)).abs())
        .fold(0.0, f64::max)
}

/// Draws one key of `weights`, each with probability proportional to its weight.
///
/// Keys are ordered before drawing, so a seeded `rng` yields the same key
/// regardless of the map's hashing state.
pub fn weighted_choice<K, R>(weights: &HashMap<K, f64, ahash::RandomState>, rng: &mut R) -> Result<K>
where
    K: Ord + Hash + Copy,
    R: Rng + ?Sized,
{
    let mut pairs: Vec<(K, f64)> = weights.iter().map(|(k, w)| (*k, *w)).collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    let index = WeightedIndex::new(pairs.iter().map(|(_, w)| *w))
        .map_err(|e| Error::InvalidArgument(format!("bad weights: {e}")))?;
    Ok(pairs[index.sample(rng)].0)
}
