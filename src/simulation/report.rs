use crate::simulation::engine::GameResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of a batch of automated games.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub games: usize,
    pub players: usize,
    pub finished: usize,
    pub stalemates: usize,
    pub avg_rounds: f64,
    pub avg_score: f64,
    /// Wins per seat, index = player number.
    pub wins_by_seat: Vec<usize>,
    /// Finished games per round count.
    pub round_distribution: BTreeMap<u32, usize>,
    pub results: Vec<GameResult>,
}

pub fn aggregate_results(results: Vec<GameResult>, players: usize) -> BatchReport {
    let mut report = BatchReport {
        generated_at: Utc::now(),
        games: results.len(),
        players,
        finished: 0,
        stalemates: 0,
        avg_rounds: 0.0,
        avg_score: 0.0,
        wins_by_seat: vec![0; players],
        round_distribution: BTreeMap::new(),
        results: Vec::new(),
    };

    let mut total_rounds = 0u64;
    let mut total_score = 0u64;

    for result in &results {
        total_rounds += u64::from(result.rounds);
        match result.winner {
            Some(seat) => {
                report.finished += 1;
                total_score += u64::from(result.score);
                if let Some(wins) = report.wins_by_seat.get_mut(seat) {
                    *wins += 1;
                }
                *report.round_distribution.entry(result.rounds).or_insert(0) += 1;
            }
            None => report.stalemates += 1,
        }
    }

    if !results.is_empty() {
        report.avg_rounds = total_rounds as f64 / results.len() as f64;
    }
    if report.finished > 0 {
        report.avg_score = total_score as f64 / report.finished as f64;
    }
    report.results = results;
    report
}

impl BatchReport {
    pub fn save(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<usize>, rounds: u32, score: u32) -> GameResult {
        GameResult {
            seed: 0,
            players: 2,
            winner,
            score,
            rounds,
            melds: 0,
        }
    }

    #[test]
    fn test_aggregate() {
        let report = aggregate_results(
            vec![
                result(Some(0), 4, 30),
                result(Some(1), 6, 10),
                result(Some(0), 4, 20),
                result(None, 200, 0),
            ],
            2,
        );

        assert_eq!(report.games, 4);
        assert_eq!(report.finished, 3);
        assert_eq!(report.stalemates, 1);
        assert_eq!(report.wins_by_seat, vec![2, 1]);
        assert_eq!(report.round_distribution.get(&4), Some(&2));
        assert!((report.avg_score - 20.0).abs() < 1e-9);
        assert!((report.avg_rounds - 53.5).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_empty() {
        let report = aggregate_results(Vec::new(), 3);
        assert_eq!(report.games, 0);
        assert_eq!(report.avg_rounds, 0.0);
        assert_eq!(report.wins_by_seat, vec![0, 0, 0]);
    }

    #[test]
    fn test_report_serializes() {
        let report = aggregate_results(vec![result(Some(1), 3, 12)], 2);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["finished"], 1);
        assert_eq!(json["results"][0]["winner"], 1);
        assert!(json["generated_at"].is_string());
    }
}
