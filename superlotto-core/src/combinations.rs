use crate::models::{BACK_PICK, FRONT_PICK, Pick};

/// Itérateur paresseux sur les k-sous-ensembles de `pool`, dans l'ordre
/// lexicographique des indices (même ordre qu'un parcours en profondeur
/// qui choisit d'abord le plus petit indice libre).
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl<'a, T: Copy> Combinations<'a, T> {
    pub fn new(pool: &'a [T], k: usize) -> Self {
        Self {
            pool,
            indices: (0..k).collect(),
            started: false,
            done: k > pool.len(),
        }
    }

    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i]).collect()
    }
}

impl<T: Copy> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        let n = self.pool.len();
        let k = self.indices.len();
        // Indice le plus à droite qui peut encore avancer
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + n - k) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.current())
    }
}

/// Tous les k-sous-ensembles de `pool` ; vide si `pool.len() < k`.
pub fn k_subsets<T: Copy>(pool: &[T], k: usize) -> Vec<Vec<T>> {
    Combinations::new(pool, k).collect()
}

/// C(n, k), calculé itérativement. Sature à `u128::MAX`.
pub fn combination_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // result * (n - i) est divisible par (i + 1) à chaque étape
        result = match result.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}

/// Taille réelle de la matrice, avant plafonnement ; 0 si la sélection est incomplète.
pub fn matrix_size(front_len: usize, back_len: usize) -> u128 {
    combination_count(front_len, FRONT_PICK).saturating_mul(combination_count(back_len, BACK_PICK))
}

/// Produit cartésien des 5-combinaisons de `front` et des 2-combinaisons de
/// `back`, arrêté dès que `cap` grilles ont été produites.
pub fn cartesian_picks(front: &[u8], back: &[u8], cap: usize) -> Vec<Pick> {
    let front = as_set(front);
    let back = as_set(back);
    if front.len() < FRONT_PICK || back.len() < BACK_PICK {
        return Vec::new();
    }

    let back_combos: Vec<[u8; BACK_PICK]> = Combinations::new(&back, BACK_PICK)
        .map(|c| [c[0], c[1]])
        .collect();

    let total = usize::try_from(matrix_size(front.len(), back.len())).unwrap_or(usize::MAX);
    let mut picks = Vec::with_capacity(cap.min(total));
    'outer: for f in Combinations::new(&front, FRONT_PICK) {
        let f = [f[0], f[1], f[2], f[3], f[4]];
        for &b in &back_combos {
            if picks.len() >= cap {
                log::debug!("Matrice plafonnée à {cap} grilles");
                break 'outer;
            }
            picks.push(Pick { front: f, back: b });
        }
    }
    picks
}

fn as_set(numbers: &[u8]) -> Vec<u8> {
    let mut set = numbers.to_vec();
    set.sort_unstable();
    set.dedup();
    set
}
