use std::{collections::BTreeMap, fmt};

/// Estimated rank of every page in a corpus, ordered by page identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankMap(BTreeMap<String, f64>);

impl RankMap {
    pub fn get(&self, page: &str) -> Option<f64> {
        self.0.get(page).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(page, rank)| (page.as_str(), *rank))
    }

    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Largest absolute difference against `other` over the pages of either map.
    pub fn max_diff(&self, other: &RankMap) -> f64 {
        self.0
            .keys()
            .chain(other.0.keys())
            .map(|page| {
                let a = self.get(page).unwrap_or(0.0);
                let b = other.get(page).unwrap_or(0.0);
                (a - b).abs()
            })
            .fold(0.0, f64::max)
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.0
    }
}

impl FromIterator<(String, f64)> for RankMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for RankMap {
    type Item = (String, f64);
    type IntoIter = std::collections::btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// One `  page: rank` line per page, four decimals.
impl fmt::Display for RankMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, rank) in self.0.iter() {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
