/// Pair selection for interactive comparison sessions.
///
/// Picks one pair per round: exposure-weighted so under-shown items come up
/// sooner, never re-using either item of the pair that was just shown as the
/// first pick, and avoiding pairs that were already compared.
/// Works on `usize` indices into `RatingStore::items()`.
use std::collections::HashSet;

use rand::Rng;

use crate::elo::RatingStore;
use crate::types::IndexedPair;

/// Selection weight for an item shown `show_count` times.
pub fn exposure_weight(show_count: usize) -> f64 {
    1.0 / (show_count as f64 + 1.0)
}

/// Upper bound on distinct pairs before a session must stop: `N·(N−1)`.
///
/// Pairs are recorded unordered, so only `N·(N−1)/2` can ever be recorded and
/// this ceiling is a safety stop rather than a limit sessions normally reach.
pub fn pair_ceiling(num_items: usize) -> usize {
    num_items * num_items.saturating_sub(1)
}

/// Number of distinct unordered pairs among `num_items` items.
pub fn unordered_pair_count(num_items: usize) -> usize {
    pair_ceiling(num_items) / 2
}

/// Outcome of a single weighted draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Drawn from the eligible candidates by weight.
    Weighted(usize),
    /// Every item was excluded; picked uniformly from all items instead.
    FellBack(usize),
}

impl Draw {
    pub fn index(self) -> usize {
        match self {
            Draw::Weighted(i) | Draw::FellBack(i) => i,
        }
    }

    pub fn fell_back(self) -> bool {
        matches!(self, Draw::FellBack(_))
    }
}

/// Draw one item index with probability proportional to `weights[i]`,
/// skipping indices in `excluded`.
///
/// If nothing is left after exclusion, falls back to a uniform pick over all
/// items and says so. `weights` must not be empty.
pub fn draw_item(weights: &[f64], excluded: &[usize], rng: &mut impl Rng) -> Draw {
    let candidates: Vec<usize> = (0..weights.len())
        .filter(|i| !excluded.contains(i))
        .collect();

    if candidates.is_empty() {
        return Draw::FellBack(rng.random_range(0..weights.len()));
    }

    let candidate_weights: Vec<f64> = candidates.iter().map(|&i| weights[i]).collect();
    let total_weight: f64 = candidate_weights.iter().sum();

    let local = if total_weight <= 0.0 {
        rng.random_range(0..candidates.len())
    } else {
        weighted_random_select(&candidate_weights, total_weight, rng)
    };

    Draw::Weighted(candidates[local])
}

/// Inverse-CDF sampling: draw r in [0, total), walk the weights until r falls
/// inside one of them.
fn weighted_random_select(weights: &[f64], total_weight: f64, rng: &mut impl Rng) -> usize {
    let mut r = rng.random::<f64>() * total_weight;
    for (j, &w) in weights.iter().enumerate() {
        if r < w {
            return j;
        }
        r -= w;
    }
    weights.len() - 1
}

/// Uniform pick over `0..num_items` other than `taken`. Needs `num_items >= 2`.
fn draw_other(num_items: usize, taken: usize, rng: &mut impl Rng) -> usize {
    let r = rng.random_range(0..num_items - 1);
    if r >= taken {
        r + 1
    } else {
        r
    }
}

/// Unordered pair key: `(a, b)` and `(b, a)` map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey(usize, usize);

impl PairKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            PairKey(a, b)
        } else {
            PairKey(b, a)
        }
    }
}

/// Pairs already presented, in either order.
#[derive(Debug, Clone, Default)]
pub struct ComparisonRecord {
    seen: HashSet<PairKey>,
}

impl ComparisonRecord {
    /// Returns `false` if the pair was already recorded.
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        self.seen.insert(PairKey::new(a, b))
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.seen.contains(&PairKey::new(a, b))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// A pair handed out by `PairSelector::select`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub pair: IndexedPair,
    /// Two-draw attempts used, 1..=max_attempts.
    pub attempts: usize,
    /// The attempt bound ran out and `pair` had already been compared.
    pub repeated: bool,
    /// At least one draw of the accepted attempt ignored its exclusion list.
    pub fell_back: bool,
}

#[derive(Debug, Clone)]
pub struct PairSelector {
    record: ComparisonRecord,
    last_shown: Option<IndexedPair>,
    max_attempts: usize,
}

impl PairSelector {
    /// `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: usize) -> Self {
        PairSelector {
            record: ComparisonRecord::default(),
            last_shown: None,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Choose the next pair, record it, and bump both items' show counts.
    ///
    /// The two items are always distinct. A previously compared pair comes back
    /// only after `max_attempts` draws all landed on seen pairs.
    pub fn select(&mut self, store: &mut RatingStore, rng: &mut impl Rng) -> Selection {
        let num_items = store.num_items();
        let weights: Vec<f64> = store.show_counts().iter().map(|&c| exposure_weight(c)).collect();
        let recent: Vec<usize> = match self.last_shown {
            Some((a, b)) => vec![a, b],
            None => Vec::new(),
        };

        let mut attempts = 0;
        let (a, b, fell_back, fresh) = loop {
            attempts += 1;

            let first = draw_item(&weights, &recent, rng);
            let mut excluded = recent.clone();
            excluded.push(first.index());

            let second = match draw_item(&weights, &excluded, rng) {
                Draw::FellBack(_) => Draw::FellBack(draw_other(num_items, first.index(), rng)),
                drawn => drawn,
            };

            let (a, b) = (first.index(), second.index());
            let fresh = !self.record.contains(a, b);
            if fresh || attempts >= self.max_attempts {
                break (a, b, first.fell_back() || second.fell_back(), fresh);
            }
        };

        if fell_back {
            tracing::debug!(attempts, "exclusion emptied the candidate set, drew from all items");
        }
        if !fresh {
            tracing::debug!(
                attempts,
                first = store.items()[a].as_str(),
                second = store.items()[b].as_str(),
                "no fresh pair within attempt bound, repeating a compared pair"
            );
        }

        self.record.insert(a, b);
        store.record_shown(a);
        store.record_shown(b);
        self.last_shown = Some((a, b));

        Selection {
            pair: (a, b),
            attempts,
            repeated: !fresh,
            fell_back,
        }
    }

    pub fn record(&self) -> &ComparisonRecord {
        &self.record
    }

    pub fn distinct_pairs(&self) -> usize {
        self.record.len()
    }

    pub fn last_shown(&self) -> Option<IndexedPair> {
        self.last_shown
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}
