/// Simulate command: runs a full session against an automated voter.
///
/// The input order is the ground truth (first item = best). The voter picks the
/// better item of each pair with probability `accuracy`, otherwise the worse one,
/// which shows how well a given round budget recovers a known order.
use pairank_core::{RankedItem, Result, Session, SessionConfig, SessionEvent};
use rand::Rng;

pub struct SimulationReport {
    pub rankings: Vec<RankedItem>,
    pub comparisons: usize,
    /// Kendall's tau between true and estimated order (1.0 = identical).
    pub kendall_tau: f64,
}

pub fn run_simulation<R: Rng>(
    items: &[String],
    config: SessionConfig,
    accuracy: f64,
    mut voter_rng: R,
    session_rng: R,
) -> Result<SimulationReport> {
    let mut session = Session::new(items, config, session_rng)?;
    let true_rank = |name: &str| items.iter().position(|i| i == name).unwrap_or(usize::MAX);

    let mut event = session.request_initial_pair()?;
    let rankings = loop {
        match event {
            SessionEvent::PairReady { pair, round, total_rounds } => {
                let (better, worse) = if true_rank(&pair.first) < true_rank(&pair.second) {
                    (pair.first, pair.second)
                } else {
                    (pair.second, pair.first)
                };
                let choice = if voter_rng.random::<f64>() < accuracy { better } else { worse };
                tracing::debug!(round = round + 1, total_rounds, choice = choice.as_str(), "simulated vote");
                event = session.vote_and_advance(&choice)?;
            }
            SessionEvent::Finished { rankings } => break rankings,
        }
    };

    let estimated: Vec<usize> = rankings.iter().map(|r| true_rank(&r.item)).collect();

    Ok(SimulationReport {
        kendall_tau: kendall_tau(&estimated),
        comparisons: session.round(),
        rankings,
    })
}

/// Kendall's tau of a permutation against the identity order.
///
/// `order[i]` is the true rank of the item placed at position `i`.
pub fn kendall_tau(order: &[usize]) -> f64 {
    let n = order.len();
    if n < 2 {
        return 1.0;
    }

    let mut concordant = 0i64;
    let mut discordant = 0i64;
    for i in 0..n {
        for j in (i + 1)..n {
            if order[i] < order[j] {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let total = (n * (n - 1) / 2) as f64;
    (concordant - discordant) as f64 / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item{i}")).collect()
    }

    #[test]
    fn test_kendall_tau_extremes() {
        assert_eq!(kendall_tau(&[0, 1, 2, 3]), 1.0);
        assert_eq!(kendall_tau(&[3, 2, 1, 0]), -1.0);
        assert_eq!(kendall_tau(&[1, 0, 2, 3]), (5.0 - 1.0) / 6.0);
    }

    #[test]
    fn test_perfect_voter_beats_random_voter() {
        let config = SessionConfig { total_rounds: 45, ..SessionConfig::default() };

        let perfect = run_simulation(
            &items(10), config.clone(), 1.0,
            SmallRng::seed_from_u64(1), SmallRng::seed_from_u64(2),
        ).unwrap();
        let coin_flip = run_simulation(
            &items(10), config, 0.5,
            SmallRng::seed_from_u64(1), SmallRng::seed_from_u64(2),
        ).unwrap();

        assert_eq!(perfect.comparisons, 45);
        assert_eq!(perfect.rankings.len(), 10);
        assert!(perfect.kendall_tau > 0.6, "tau was {}", perfect.kendall_tau);
        assert!(perfect.kendall_tau > coin_flip.kendall_tau);
    }

    #[test]
    fn test_inverted_voter_reverses_order() {
        let config = SessionConfig { total_rounds: 30, ..SessionConfig::default() };
        let report = run_simulation(
            &items(6), config, 0.0,
            SmallRng::seed_from_u64(5), SmallRng::seed_from_u64(6),
        ).unwrap();
        assert!(report.kendall_tau < 0.0, "tau was {}", report.kendall_tau);
    }
}
