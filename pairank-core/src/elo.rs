/// Elo rating store.
///
/// Holds one strength score and one exposure count per item. Ratings move only
/// through `apply_result`; exposure counts move only when the pair selector
/// shows an item.
use std::cmp::Ordering;

use crate::constants::ELO_SCALE;
use crate::error::{RankError, Result};
use crate::types::{ItemIndex, RankedItem};

/// Logistic expectation that an item rated `rating_a` beats one rated `rating_b`.
///
/// Always in (0, 1) for finite inputs, and
/// `expected_outcome(a, b) + expected_outcome(b, a) == 1` up to rounding.
pub fn expected_outcome(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / ELO_SCALE))
}

/// What a single `apply_result` call changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingUpdate {
    pub winner_rating: f64,
    pub loser_rating: f64,
    pub winner_delta: f64,
    pub loser_delta: f64,
    /// Pre-update expectation that the winner would win.
    pub expected_winner: f64,
    /// Pre-update expectation that the loser would win.
    pub expected_loser: f64,
}

#[derive(Debug, Clone)]
pub struct RatingStore {
    index: ItemIndex,
    ratings: Vec<f64>,
    show_counts: Vec<usize>,
    baseline: f64,
    k_factor: f64,
}

impl RatingStore {
    /// Every item starts at `baseline` with a show count of 0.
    pub fn new(items: &[String], baseline: f64, k_factor: f64) -> Result<Self> {
        if !baseline.is_finite() {
            return Err(RankError::InvalidConfig(format!("baseline rating must be finite, got {baseline}")));
        }
        if !(k_factor.is_finite() && k_factor > 0.0) {
            return Err(RankError::InvalidConfig(format!("K-factor must be a positive number, got {k_factor}")));
        }

        let index = ItemIndex::from_items(items)?;
        let num_items = index.len();

        Ok(RatingStore {
            index,
            ratings: vec![baseline; num_items],
            show_counts: vec![0; num_items],
            baseline,
            k_factor,
        })
    }

    /// Record that `winner` was preferred over `loser`.
    ///
    /// Both expectations are computed from the pre-update ratings, so the result
    /// does not depend on which side is written first. The exchange is zero-sum:
    /// `loser_delta == -winner_delta` exactly.
    pub fn apply_result(&mut self, winner: &str, loser: &str) -> Result<RatingUpdate> {
        let w = self.index.to_idx(winner)?;
        let l = self.index.to_idx(loser)?;
        if w == l {
            return Err(RankError::SelfComparison(winner.to_string()));
        }
        Ok(self.apply_result_indexed(w, l))
    }

    pub(crate) fn apply_result_indexed(&mut self, w: usize, l: usize) -> RatingUpdate {
        let rating_w = self.ratings[w];
        let rating_l = self.ratings[l];

        let expected_winner = expected_outcome(rating_w, rating_l);
        let expected_loser = expected_outcome(rating_l, rating_w);

        // K·(0 − E_loser) equals −K·(1 − E_winner) analytically; negating keeps the
        // rating sum exact instead of drifting by rounding error.
        let winner_delta = self.k_factor * (1.0 - expected_winner);
        let loser_delta = -winner_delta;

        self.ratings[w] = rating_w + winner_delta;
        self.ratings[l] = rating_l + loser_delta;

        tracing::trace!(
            winner = self.index.to_name(w),
            loser = self.index.to_name(l),
            winner_rating = self.ratings[w],
            loser_rating = self.ratings[l],
            "rating update"
        );

        RatingUpdate {
            winner_rating: self.ratings[w],
            loser_rating: self.ratings[l],
            winner_delta,
            loser_delta,
            expected_winner,
            expected_loser,
        }
    }

    pub(crate) fn record_shown(&mut self, idx: usize) {
        self.show_counts[idx] += 1;
    }

    /// Items sorted by rating, highest first. Ties keep the original item order.
    pub fn snapshot(&self) -> Vec<RankedItem> {
        let mut order: Vec<usize> = (0..self.index.len()).collect();
        order.sort_by(|&a, &b| {
            self.ratings[b]
                .partial_cmp(&self.ratings[a])
                .unwrap_or(Ordering::Equal)
        });

        order
            .into_iter()
            .map(|i| RankedItem {
                item: self.index.to_name(i).to_string(),
                rating: self.ratings[i],
                shown: self.show_counts[i],
            })
            .collect()
    }

    pub fn rating(&self, item: &str) -> Result<f64> {
        Ok(self.ratings[self.index.to_idx(item)?])
    }

    pub fn show_count(&self, item: &str) -> Result<usize> {
        Ok(self.show_counts[self.index.to_idx(item)?])
    }

    /// Ratings in the same order as `items()`.
    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    /// Show counts in the same order as `items()`.
    pub fn show_counts(&self) -> &[usize] {
        &self.show_counts
    }

    pub fn items(&self) -> &[String] {
        self.index.names()
    }

    pub fn num_items(&self) -> usize {
        self.index.len()
    }

    /// Sum of all show counts. Each displayed pair adds 2.
    pub fn total_shows(&self) -> usize {
        self.show_counts.iter().sum()
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn k_factor(&self) -> f64 {
        self.k_factor
    }

    pub(crate) fn index(&self) -> &ItemIndex {
        &self.index
    }
}
