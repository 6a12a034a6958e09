use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::LotteryConfig;
use crate::models::{Draw, Pool};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OddEven {
    pub odd: u32,
    pub even: u32,
}

/// Instantané dérivé de l'historique complet, recalculé à chaque changement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_draws: usize,
    pub frequency_front: BTreeMap<u8, u32>,
    pub frequency_back: BTreeMap<u8, u32>,
    pub hot_front: Vec<u8>,
    pub cold_front: Vec<u8>,
    pub hot_back: Vec<u8>,
    pub cold_back: Vec<u8>,
    pub odd_even_front: OddEven,
    pub odd_even_back: OddEven,
}

impl Statistics {
    pub fn frequency(&self, pool: Pool) -> &BTreeMap<u8, u32> {
        match pool {
            Pool::Front => &self.frequency_front,
            Pool::Back => &self.frequency_back,
        }
    }

    pub fn hot(&self, pool: Pool) -> &[u8] {
        match pool {
            Pool::Front => &self.hot_front,
            Pool::Back => &self.hot_back,
        }
    }

    pub fn cold(&self, pool: Pool) -> &[u8] {
        match pool {
            Pool::Front => &self.cold_front,
            Pool::Back => &self.cold_back,
        }
    }

    pub fn odd_even(&self, pool: Pool) -> OddEven {
        match pool {
            Pool::Front => self.odd_even_front,
            Pool::Back => self.odd_even_back,
        }
    }
}

pub fn compute_statistics(history: &[Draw], config: &LotteryConfig) -> Statistics {
    let (frequency_front, odd_even_front) = tally(history, Pool::Front, config.front_size);
    let (frequency_back, odd_even_back) = tally(history, Pool::Back, config.back_size);

    log::debug!("Statistiques recalculées sur {} tirages", history.len());

    Statistics {
        total_draws: history.len(),
        hot_front: hottest(&frequency_front, config.hot_cold_front),
        cold_front: coldest(&frequency_front, config.hot_cold_front),
        hot_back: hottest(&frequency_back, config.hot_cold_back),
        cold_back: coldest(&frequency_back, config.hot_cold_back),
        frequency_front,
        frequency_back,
        odd_even_front,
        odd_even_back,
    }
}

fn tally(history: &[Draw], pool: Pool, size: u8) -> (BTreeMap<u8, u32>, OddEven) {
    let mut frequency: BTreeMap<u8, u32> = (1..=size).map(|n| (n, 0)).collect();
    let mut odd_even = OddEven::default();

    for draw in history {
        for &n in pool.numbers_from(draw) {
            // Numéro hors univers : tirage mal formé, ignoré
            let Some(count) = frequency.get_mut(&n) else {
                continue;
            };
            *count += 1;
            if n % 2 != 0 {
                odd_even.odd += 1;
            } else {
                odd_even.even += 1;
            }
        }
    }

    (frequency, odd_even)
}

/// Numéros classés par fréquence décroissante ; à égalité, ordre croissant.
pub fn rank_by_frequency(frequency: &BTreeMap<u8, u32>) -> Vec<u8> {
    let mut entries: Vec<(u8, u32)> = frequency.iter().map(|(&n, &c)| (n, c)).collect();
    // sort_by est stable : l'ordre croissant des clés départage les égalités
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().map(|(n, _)| n).collect()
}

fn hottest(frequency: &BTreeMap<u8, u32>, len: usize) -> Vec<u8> {
    rank_by_frequency(frequency).into_iter().take(len).collect()
}

fn coldest(frequency: &BTreeMap<u8, u32>, len: usize) -> Vec<u8> {
    let mut entries: Vec<(u8, u32)> = frequency.iter().map(|(&n, &c)| (n, c)).collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1));
    entries.into_iter().take(len).map(|(n, _)| n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draw(id: &str, front: [u8; 5], back: [u8; 2]) -> Draw {
        let date = NaiveDate::from_ymd_opt(2025, 12, 10).unwrap();
        Draw::new(id, date, front, back, &LotteryConfig::default()).unwrap()
    }

    fn sample_history() -> Vec<Draw> {
        vec![
            draw("25141", [4, 9, 24, 28, 29], [2, 10]),
            draw("25140", [1, 12, 15, 20, 33], [5, 12]),
            draw("25139", [7, 8, 11, 25, 30], [3, 9]),
            draw("25138", [4, 9, 11, 20, 35], [2, 5]),
        ]
    }

    #[test]
    fn test_empty_history() {
        let stats = compute_statistics(&[], &LotteryConfig::default());
        assert_eq!(stats.total_draws, 0);
        assert_eq!(stats.frequency_front.len(), 35);
        assert_eq!(stats.frequency_back.len(), 12);
        assert!(stats.frequency_front.values().all(|&c| c == 0));
        assert_eq!(stats.hot_front, (1..=10).collect::<Vec<u8>>());
        assert_eq!(stats.cold_front, (1..=10).collect::<Vec<u8>>());
        assert_eq!(stats.hot_back, vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.cold_back, vec![1, 2, 3, 4, 5]);
        assert_eq!(stats.odd_even_front, OddEven::default());
    }

    #[test]
    fn test_frequency_sums() {
        let history = sample_history();
        let stats = compute_statistics(&history, &LotteryConfig::default());
        assert_eq!(stats.total_draws, 4);
        assert_eq!(stats.frequency_front.values().sum::<u32>(), 20);
        assert_eq!(stats.frequency_back.values().sum::<u32>(), 8);
        assert_eq!(stats.frequency_front[&4], 2);
        assert_eq!(stats.frequency_back[&2], 2);
    }

    #[test]
    fn test_hot_ranking_breaks_ties_ascending() {
        let stats = compute_statistics(&sample_history(), &LotteryConfig::default());
        // 4, 9, 11, 20 sortent deux fois
        assert_eq!(&stats.hot_front[..4], &[4, 9, 11, 20]);
        assert_eq!(stats.hot_front[4], 1);
        assert_eq!(stats.hot_front.len(), 10);
        assert_eq!(&stats.hot_back[..2], &[2, 5]);
    }

    #[test]
    fn test_cold_ranking_breaks_ties_ascending() {
        let stats = compute_statistics(&sample_history(), &LotteryConfig::default());
        assert_eq!(stats.cold_front, vec![2, 3, 5, 6, 10, 13, 14, 16, 17, 18]);
        assert_eq!(stats.cold_back, vec![1, 4, 6, 7, 8]);
    }

    #[test]
    fn test_odd_even_counts_every_ball() {
        let stats = compute_statistics(&sample_history(), &LotteryConfig::default());
        let front = stats.odd_even(Pool::Front);
        assert_eq!(front.odd + front.even, 20);
        // impairs : 9,29 | 1,15,33 | 7,11,25 | 9,11,35
        assert_eq!(front.odd, 11);
        let back = stats.odd_even(Pool::Back);
        assert_eq!(back, OddEven { odd: 4, even: 4 });
    }

    #[test]
    fn test_rank_by_frequency_is_total() {
        let stats = compute_statistics(&sample_history(), &LotteryConfig::default());
        let ranking = rank_by_frequency(stats.frequency(Pool::Back));
        assert_eq!(ranking.len(), 12);
        assert_eq!(&ranking[..2], &[2, 5]);
    }
}
