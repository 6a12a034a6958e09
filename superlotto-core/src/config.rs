use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::Pool;

/// Paramètres du moteur. Les valeurs par défaut correspondent au Super Lotto
/// (5 numéros parmi 35, 2 parmi 12).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    pub front_size: u8,
    pub back_size: u8,
    pub hot_cold_front: usize,
    pub hot_cold_back: usize,
    pub matrix_cap: usize,
    pub strategy_front_pool: usize,
    pub strategy_back_pool: usize,
    pub balanced_attempts: usize,
    pub big_threshold: u8,
    /// P(4 numéros tirés du pool chaud/froid au lieu de 3)
    pub hot_front_split_high_probability: f64,
    /// P(2 numéros tirés du pool chaud/froid au lieu de 1)
    pub hot_back_split_high_probability: f64,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            front_size: 35,
            back_size: 12,
            hot_cold_front: 10,
            hot_cold_back: 5,
            matrix_cap: 2000,
            strategy_front_pool: 15,
            strategy_back_pool: 6,
            balanced_attempts: 100,
            big_threshold: 18,
            hot_front_split_high_probability: 0.5,
            hot_back_split_high_probability: 0.2,
        }
    }
}

impl LotteryConfig {
    pub fn universe_size(&self, pool: Pool) -> u8 {
        match pool {
            Pool::Front => self.front_size,
            Pool::Back => self.back_size,
        }
    }

    pub fn hot_cold_len(&self, pool: Pool) -> usize {
        match pool {
            Pool::Front => self.hot_cold_front,
            Pool::Back => self.hot_cold_back,
        }
    }

    pub fn strategy_pool_len(&self, pool: Pool) -> usize {
        match pool {
            Pool::Front => self.strategy_front_pool,
            Pool::Back => self.strategy_back_pool,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for pool in [Pool::Front, Pool::Back] {
            let universe = self.universe_size(pool) as usize;
            let picks = pool.pick_count();
            if universe < picks {
                return Err(CoreError::InvalidConfig(format!(
                    "{pool} : univers de {universe} numéros, {picks} requis au minimum"
                )));
            }
            let strategy_pool = self.strategy_pool_len(pool);
            if strategy_pool < picks || strategy_pool > universe {
                return Err(CoreError::InvalidConfig(format!(
                    "{pool} : pool de stratégie {strategy_pool} hors de [{picks}, {universe}]"
                )));
            }
            if self.hot_cold_len(pool) > universe {
                return Err(CoreError::InvalidConfig(format!(
                    "{pool} : classement chaud/froid de {} > univers de {universe}",
                    self.hot_cold_len(pool)
                )));
            }
        }
        for (name, p) in [
            ("hot_front_split_high_probability", self.hot_front_split_high_probability),
            ("hot_back_split_high_probability", self.hot_back_split_high_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::InvalidConfig(format!("{name} = {p} hors de [0, 1]")));
            }
        }
        Ok(())
    }
}
