use std::collections::HashMap;

use crate::error::{RankError, Result};

/// Two items shown side by side, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    pub first: String,
    pub second: String,
}

impl Pair {
    pub fn contains(&self, item: &str) -> bool {
        self.first == item || self.second == item
    }

    /// The opponent of `item`, or `None` if `item` is not in this pair.
    pub fn other(&self, item: &str) -> Option<&str> {
        if self.first == item {
            Some(&self.second)
        } else if self.second == item {
            Some(&self.first)
        } else {
            None
        }
    }
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    pub item: String,
    pub rating: f64,
    /// How many displayed pairs included this item.
    pub shown: usize,
}

/// Internal indexed pair (usize indices into the item list, not names).
pub type IndexedPair = (usize, usize);

/// Maps between caller-provided item names and internal 0..N indices.
#[derive(Debug, Clone)]
pub(crate) struct ItemIndex {
    names: Vec<String>,
    name_to_idx: HashMap<String, usize>,
}

impl ItemIndex {
    pub fn from_items(items: &[String]) -> Result<Self> {
        if items.len() < 2 {
            return Err(RankError::TooFewItems(items.len()));
        }

        let mut name_to_idx = HashMap::with_capacity(items.len());
        for (idx, name) in items.iter().enumerate() {
            if name_to_idx.insert(name.clone(), idx).is_some() {
                return Err(RankError::DuplicateItem(name.clone()));
            }
        }

        Ok(ItemIndex {
            names: items.to_vec(),
            name_to_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn to_idx(&self, name: &str) -> Result<usize> {
        self.name_to_idx
            .get(name)
            .copied()
            .ok_or_else(|| RankError::UnknownItem(name.to_string()))
    }

    pub fn to_name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn to_pair(&self, (a, b): IndexedPair) -> Pair {
        Pair {
            first: self.names[a].clone(),
            second: self.names[b].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_item_index_round_trips_names() {
        let index = ItemIndex::from_items(&names(&["red", "green", "blue"])).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.to_idx("green").unwrap(), 1);
        assert_eq!(index.to_name(2), "blue");
    }

    #[test]
    fn test_item_index_rejects_duplicates() {
        let err = ItemIndex::from_items(&names(&["a", "b", "a"])).unwrap_err();
        assert_eq!(err, RankError::DuplicateItem("a".into()));
    }

    #[test]
    fn test_item_index_requires_two_items() {
        let err = ItemIndex::from_items(&names(&["solo"])).unwrap_err();
        assert_eq!(err, RankError::TooFewItems(1));
    }

    #[test]
    fn test_item_index_unknown_name() {
        let index = ItemIndex::from_items(&names(&["a", "b"])).unwrap();
        assert_eq!(index.to_idx("c").unwrap_err(), RankError::UnknownItem("c".into()));
    }

    #[test]
    fn test_pair_other() {
        let pair = Pair { first: "x".into(), second: "y".into() };
        assert_eq!(pair.other("x"), Some("y"));
        assert_eq!(pair.other("y"), Some("x"));
        assert_eq!(pair.other("z"), None);
        assert!(pair.contains("y"));
    }
}
