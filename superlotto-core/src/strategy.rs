use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::LotteryConfig;
use crate::error::{CoreError, Result};
use crate::models::{BACK_PICK, FRONT_PICK, Pick, Pool, big_count, number_pool, odd_count};
use crate::stats::{Statistics, rank_by_frequency};

/// Nombre de numéros tirés du pool chaud/froid : (bas, haut).
const FRONT_SPLIT: (usize, usize) = (3, 4);
const BACK_SPLIT: (usize, usize) = (1, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Random,
    Hot,
    Cold,
    Balanced,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Random, Strategy::Hot, Strategy::Cold, Strategy::Balanced];

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Random => "Tirage uniforme, sans contrainte",
            Strategy::Hot => "3-4 numéros parmi les plus fréquents",
            Strategy::Cold => "3-4 numéros parmi les moins fréquents",
            Strategy::Balanced => "Équilibre pair/impair et petit/grand (2:3 ou 3:2)",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Random => "random",
            Strategy::Hot => "hot",
            Strategy::Cold => "cold",
            Strategy::Balanced => "balanced",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Strategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "hot" => Ok(Strategy::Hot),
            "cold" => Ok(Strategy::Cold),
            "balanced" => Ok(Strategy::Balanced),
            _ => Err(CoreError::UnrecognizedStrategy(s.to_string())),
        }
    }
}

/// Pools chauds et froids, dérivés une seule fois par appel à `generate_picks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyPools {
    pub hot_front: Vec<u8>,
    pub hot_back: Vec<u8>,
    pub cold_front: Vec<u8>,
    pub cold_back: Vec<u8>,
}

impl StrategyPools {
    pub fn derive(stats: &Statistics, config: &LotteryConfig) -> Self {
        let (hot_front, cold_front) = head_and_tail(stats, Pool::Front, config.strategy_front_pool);
        let (hot_back, cold_back) = head_and_tail(stats, Pool::Back, config.strategy_back_pool);
        Self { hot_front, hot_back, cold_front, cold_back }
    }
}

// Le froid est la queue du classement décroissant, pas la tête du classement croissant :
// à fréquence égale, ce sont les plus grands numéros qui y entrent.
fn head_and_tail(stats: &Statistics, pool: Pool, len: usize) -> (Vec<u8>, Vec<u8>) {
    let ranking = rank_by_frequency(stats.frequency(pool));
    let len = len.min(ranking.len());
    let head = ranking[..len].to_vec();
    let tail = ranking[ranking.len() - len..].to_vec();
    (head, tail)
}

pub fn is_balanced(front: &[u8], config: &LotteryConfig) -> bool {
    let odd = odd_count(front);
    let big = big_count(front, config.big_threshold);
    (2..=3).contains(&odd) && (2..=3).contains(&big)
}

pub fn generate_picks<R: Rng + ?Sized>(
    stats: &Statistics,
    count: i64,
    strategy: Strategy,
    config: &LotteryConfig,
    rng: &mut R,
) -> Result<Vec<Pick>> {
    let count = usize::try_from(count)
        .map_err(|_| CoreError::InvalidArgument(format!("nombre de grilles négatif : {count}")))?;
    config.validate()?;

    let front_universe = number_pool(config.front_size);
    let back_universe = number_pool(config.back_size);
    let pools = StrategyPools::derive(stats, config);

    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let pick = match strategy {
            Strategy::Random => Pick::new(
                to_array(&random_subset(&front_universe, FRONT_PICK, rng)),
                to_array(&random_subset(&back_universe, BACK_PICK, rng)),
            ),
            Strategy::Hot => biased_pick(&pools.hot_front, &pools.hot_back, &front_universe, &back_universe, config, rng),
            Strategy::Cold => biased_pick(&pools.cold_front, &pools.cold_back, &front_universe, &back_universe, config, rng),
            Strategy::Balanced => Pick::new(
                balanced_front(&front_universe, config, rng),
                to_array(&random_subset(&back_universe, BACK_PICK, rng)),
            ),
        };
        picks.push(pick);
    }

    Ok(picks)
}

fn biased_pick<R: Rng + ?Sized>(
    front_pool: &[u8],
    back_pool: &[u8],
    front_universe: &[u8],
    back_universe: &[u8],
    config: &LotteryConfig,
    rng: &mut R,
) -> Pick {
    let (front_split, back_split) = split_sizes(config, rng);
    let front = split_draw(front_pool, front_universe, front_split, FRONT_PICK, rng);
    let back = split_draw(back_pool, back_universe, back_split, BACK_PICK, rng);
    Pick::new(to_array(&front), to_array(&back))
}

/// Combien de numéros prendre dans le pool, par zone : la valeur haute avec la
/// probabilité configurée, sinon la basse.
fn split_sizes<R: Rng + ?Sized>(config: &LotteryConfig, rng: &mut R) -> (usize, usize) {
    let front = if rng.random_bool(config.hot_front_split_high_probability) {
        FRONT_SPLIT.1
    } else {
        FRONT_SPLIT.0
    };
    let back = if rng.random_bool(config.hot_back_split_high_probability) {
        BACK_SPLIT.1
    } else {
        BACK_SPLIT.0
    };
    (front, back)
}

/// `from_pool` numéros pris dans `pool`, le reste dans l'univers privé des numéros déjà choisis.
fn split_draw<R: Rng + ?Sized>(pool: &[u8], universe: &[u8], from_pool: usize, total: usize, rng: &mut R) -> Vec<u8> {
    let mut chosen = random_subset(pool, from_pool, rng);
    let remaining: Vec<u8> = universe.iter().copied().filter(|n| !chosen.contains(n)).collect();
    chosen.extend(random_subset(&remaining, total - chosen.len(), rng));
    chosen.sort_unstable();
    chosen
}

fn balanced_front<R: Rng + ?Sized>(universe: &[u8], config: &LotteryConfig, rng: &mut R) -> [u8; FRONT_PICK] {
    for _ in 0..config.balanced_attempts {
        let candidate = random_subset(universe, FRONT_PICK, rng);
        if is_balanced(&candidate, config) {
            return to_array(&candidate);
        }
    }
    log::debug!(
        "Aucune grille équilibrée en {} essais, repli sur un tirage libre",
        config.balanced_attempts
    );
    to_array(&random_subset(universe, FRONT_PICK, rng))
}

/// Sous-ensemble uniforme de taille `k`, trié.
fn random_subset<R: Rng + ?Sized>(pool: &[u8], k: usize, rng: &mut R) -> Vec<u8> {
    let mut subset: Vec<u8> = pool.choose_multiple(rng, k).copied().collect();
    subset.sort_unstable();
    subset
}

fn to_array<const N: usize>(numbers: &[u8]) -> [u8; N] {
    let mut arr = [0u8; N];
    for (slot, &n) in arr.iter_mut().zip(numbers) {
        *slot = n;
    }
    arr
}
