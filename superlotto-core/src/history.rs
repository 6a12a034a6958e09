use std::collections::HashSet;

use crate::error::{CoreError, Result};
use crate::models::{Draw, compare_ids};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub skipped: usize,
}

/// Historique des tirages en mémoire, trié par identifiant décroissant
/// (draws()[0] = tirage le plus récent).
#[derive(Debug, Clone, Default)]
pub struct History {
    draws: Vec<Draw>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_draws(draws: impl IntoIterator<Item = Draw>) -> (Self, MergeReport) {
        let mut history = Self::new();
        let report = history.merge(draws);
        (history, report)
    }

    /// Fusion d'un import : les identifiants déjà présents sont ignorés.
    pub fn merge(&mut self, draws: impl IntoIterator<Item = Draw>) -> MergeReport {
        let mut report = MergeReport::default();
        let mut known: HashSet<String> = self.draws.iter().map(|d| d.id.clone()).collect();
        for draw in draws {
            if known.insert(draw.id.clone()) {
                self.draws.push(draw);
                report.added += 1;
            } else {
                report.skipped += 1;
            }
        }
        if report.added > 0 {
            self.sort();
        }
        log::debug!("Fusion : {} ajoutés, {} doublons ignorés", report.added, report.skipped);
        report
    }

    /// Saisie manuelle : un identifiant existant est une erreur.
    pub fn add(&mut self, draw: Draw) -> Result<()> {
        if self.contains(&draw.id) {
            return Err(CoreError::DuplicateDraw(draw.id));
        }
        self.draws.push(draw);
        self.sort();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Option<Draw> {
        let idx = self.draws.iter().position(|d| d.id == id)?;
        Some(self.draws.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Draw> {
        self.draws.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn latest(&self, n: usize) -> &[Draw] {
        &self.draws[..n.min(self.draws.len())]
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Identifiant suggéré pour le prochain tirage : le plus récent + 1, s'il est numérique
    /// et représentable.
    pub fn next_id(&self) -> Option<String> {
        let last = self.draws.first()?;
        let n: u64 = last.id.parse().ok()?;
        n.checked_add(1).map(|v| v.to_string())
    }

    fn sort(&mut self) {
        self.draws.sort_by(|a, b| compare_ids(&b.id, &a.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LotteryConfig;
    use chrono::NaiveDate;

    fn test_draw(id: &str, day: u32) -> Draw {
        let date = NaiveDate::from_ymd_opt(2025, 12, day).unwrap();
        Draw::new(id, date, [1, 2, 3, 4, 5], [1, 2], &LotteryConfig::default()).unwrap()
    }

    #[test]
    fn test_merge_skips_duplicates() {
        let mut history = History::new();
        let report = history.merge(vec![test_draw("25139", 6), test_draw("25140", 8)]);
        assert_eq!(report, MergeReport { added: 2, skipped: 0 });

        let report = history.merge(vec![test_draw("25140", 8), test_draw("25141", 10)]);
        assert_eq!(report, MergeReport { added: 1, skipped: 1 });
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_order_newest_first() {
        let (history, _) = History::from_draws(vec![
            test_draw("25139", 6),
            test_draw("25141", 10),
            test_draw("25140", 8),
        ]);
        let ids: Vec<&str> = history.draws().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["25141", "25140", "25139"]);
        assert_eq!(history.latest(2).len(), 2);
        assert_eq!(history.latest(10).len(), 3);
    }

    #[test]
    fn test_numeric_id_order() {
        let (history, _) = History::from_draws(vec![test_draw("9", 1), test_draw("10", 2)]);
        assert_eq!(history.draws()[0].id, "10");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut history = History::new();
        history.add(test_draw("25141", 10)).unwrap();
        let err = history.add(test_draw("25141", 10)).unwrap_err();
        assert_eq!(err, CoreError::DuplicateDraw("25141".to_string()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_remove() {
        let (mut history, _) = History::from_draws(vec![test_draw("25140", 8), test_draw("25141", 10)]);
        assert_eq!(history.remove("25140").map(|d| d.id), Some("25140".to_string()));
        assert!(history.remove("25140").is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(History::new().next_id(), None);
        let (history, _) = History::from_draws(vec![test_draw("25141", 10)]);
        assert_eq!(history.next_id(), Some("25142".to_string()));
        let (history, _) = History::from_draws(vec![test_draw("A12", 10)]);
        assert_eq!(history.next_id(), None);
    }

    #[test]
    fn test_next_id_at_u64_max() {
        let (history, _) = History::from_draws(vec![test_draw(&u64::MAX.to_string(), 10)]);
        assert_eq!(history.next_id(), None);
        let (history, _) = History::from_draws(vec![test_draw(&(u64::MAX - 1).to_string(), 10)]);
        assert_eq!(history.next_id(), Some(u64::MAX.to_string()));
    }

    #[test]
    fn test_merge_skips_duplicates_within_batch() {
        let mut history = History::new();
        history.add(test_draw("25139", 6)).unwrap();
        let report = history.merge(vec![
            test_draw("25141", 10),
            test_draw("25141", 10),
            test_draw("25139", 6),
            test_draw("25140", 8),
        ]);
        assert_eq!(report, MergeReport { added: 2, skipped: 2 });
        let ids: Vec<&str> = history.draws().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["25141", "25140", "25139"]);
    }
}
