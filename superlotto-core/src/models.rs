use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LotteryConfig;
use crate::error::{CoreError, Result};

pub const FRONT_PICK: usize = 5;
pub const BACK_PICK: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub id: String,
    pub date: NaiveDate,
    pub front: [u8; FRONT_PICK],
    pub back: [u8; BACK_PICK],
}

impl Draw {
    /// Construit un tirage validé ; les numéros sont rangés par ordre croissant.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        mut front: [u8; FRONT_PICK],
        mut back: [u8; BACK_PICK],
        config: &LotteryConfig,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::InvalidArgument("identifiant de tirage vide".to_string()));
        }
        validate_draw(&front, &back, config)?;
        front.sort_unstable();
        back.sort_unstable();
        Ok(Self { id: id.trim().to_string(), date, front, back })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    Front,
    Back,
}

impl Pool {
    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Front => FRONT_PICK,
            Pool::Back => BACK_PICK,
        }
    }

    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Front => &draw.front,
            Pool::Back => &draw.back,
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Front => write!(f, "Zone avant"),
            Pool::Back => write!(f, "Zone arrière"),
        }
    }
}

/// Univers des numéros représentables : 1..=size.
pub fn number_pool(size: u8) -> Vec<u8> {
    (1..=size).collect()
}

/// Grille candidate, chaque zone triée par ordre croissant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    pub front: [u8; FRONT_PICK],
    pub back: [u8; BACK_PICK],
}

impl Pick {
    pub fn new(mut front: [u8; FRONT_PICK], mut back: [u8; BACK_PICK]) -> Self {
        front.sort_unstable();
        back.sort_unstable();
        Self { front, back }
    }

    pub fn odd_count(&self) -> usize {
        odd_count(&self.front)
    }

    pub fn big_count(&self, threshold: u8) -> usize {
        big_count(&self.front, threshold)
    }
}

pub fn odd_count(numbers: &[u8]) -> usize {
    numbers.iter().filter(|&&n| n % 2 != 0).count()
}

pub fn big_count(numbers: &[u8], threshold: u8) -> usize {
    numbers.iter().filter(|&&n| n > threshold).count()
}

pub fn validate_draw(front: &[u8; FRONT_PICK], back: &[u8; BACK_PICK], config: &LotteryConfig) -> Result<()> {
    validate_zone(front, Pool::Front, config)?;
    validate_zone(back, Pool::Back, config)
}

/// Vérifie une zone seule : numéros dans 1..=taille de l'univers, sans doublon.
pub fn validate_zone(numbers: &[u8], pool: Pool, config: &LotteryConfig) -> Result<()> {
    let size = config.universe_size(pool);
    for &n in numbers {
        if n < 1 || n > size {
            return Err(CoreError::InvalidArgument(format!(
                "{pool} : numéro {n} hors limites (1-{size})"
            )));
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                return Err(CoreError::InvalidArgument(format!(
                    "{pool} : numéro en double : {}",
                    numbers[i]
                )));
            }
        }
    }
    Ok(())
}

/// Ordre des identifiants : numérique si les deux sont des entiers, lexicographique sinon.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()
    }

    #[test]
    fn test_validate_draw_ok() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[1, 2], &config).is_ok());
        assert!(validate_draw(&[35, 34, 33, 32, 31], &[11, 12], &config).is_ok());
    }

    #[test]
    fn test_validate_draw_front_out_of_range() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&[0, 2, 3, 4, 5], &[1, 2], &config).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 36], &[1, 2], &config).is_err());
    }

    #[test]
    fn test_validate_draw_back_out_of_range() {
        let config = LotteryConfig::default();
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[0, 2], &config).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[1, 13], &config).is_err());
    }

    #[test]
    fn test_validate_draw_duplicates() {
        let config = LotteryConfig::default();
        assert!(matches!(
            validate_draw(&[1, 1, 3, 4, 5], &[1, 2], &config),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(validate_draw(&[1, 2, 3, 4, 5], &[3, 3], &config).is_err());
    }

    #[test]
    fn test_validate_draw_respects_configured_universe() {
        let config = LotteryConfig { front_size: 50, ..LotteryConfig::default() };
        assert!(validate_draw(&[46, 47, 48, 49, 50], &[1, 2], &config).is_ok());
    }

    #[test]
    fn test_validate_zone() {
        let config = LotteryConfig::default();
        assert!(validate_zone(&[12, 1], Pool::Back, &config).is_ok());
        assert!(validate_zone(&[1, 13], Pool::Back, &config).is_err());
        assert!(validate_zone(&[13, 20, 35, 1, 2], Pool::Front, &config).is_ok());
        assert!(validate_zone(&[5, 5, 6, 7, 8], Pool::Front, &config).is_err());
    }

    #[test]
    fn test_draw_new_sorts_numbers() {
        let draw = Draw::new("25141", date(), [29, 4, 24, 9, 28], [10, 2], &LotteryConfig::default()).unwrap();
        assert_eq!(draw.front, [4, 9, 24, 28, 29]);
        assert_eq!(draw.back, [2, 10]);
    }

    #[test]
    fn test_draw_new_rejects_empty_id() {
        let result = Draw::new("  ", date(), [1, 2, 3, 4, 5], [1, 2], &LotteryConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_number_pool() {
        assert_eq!(number_pool(12), (1..=12).collect::<Vec<u8>>());
        assert_eq!(number_pool(35).len(), 35);
        assert!(number_pool(0).is_empty());
    }

    #[test]
    fn test_pool_numbers_from() {
        let draw = Draw::new("001", date(), [1, 2, 3, 4, 5], [6, 7], &LotteryConfig::default()).unwrap();
        assert_eq!(Pool::Front.numbers_from(&draw), &[1, 2, 3, 4, 5]);
        assert_eq!(Pool::Back.numbers_from(&draw), &[6, 7]);
    }

    #[test]
    fn test_pick_counts() {
        let pick = Pick::new([35, 1, 19, 3, 21], [2, 1]);
        assert_eq!(pick.front, [1, 3, 19, 21, 35]);
        assert_eq!(pick.odd_count(), 5);
        assert_eq!(pick.big_count(18), 3);
    }

    #[test]
    fn test_compare_ids() {
        assert_eq!(compare_ids("9", "10"), Ordering::Less);
        assert_eq!(compare_ids("25141", "25140"), Ordering::Greater);
        assert_eq!(compare_ids("a", "b"), Ordering::Less);
        assert_eq!(compare_ids("25141", "25141"), Ordering::Equal);
    }
}
