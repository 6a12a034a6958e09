mod display;
mod import;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use superlotto_core::combinations::{cartesian_picks, matrix_size};
use superlotto_core::config::LotteryConfig;
use superlotto_core::history::History;
use superlotto_core::models::{BACK_PICK, Draw, FRONT_PICK, Pool, validate_zone};
use superlotto_core::stats::compute_statistics;
use superlotto_core::strategy::{Strategy, generate_picks};

use crate::display::{display_draws, display_import_summary, display_matrix, display_picks, display_stats};
use crate::import::{export_csv, import_csv, parse_date};

#[derive(Parser)]
#[command(name = "superlotto", about = "Statistiques et grilles pour le Super Lotto (5/35 + 2/12)")]
struct Cli {
    /// Fichier(s) CSV d'historique (id,date,f1..f5,b1,b2)
    #[arg(short, long, global = true, default_value = "data/history.csv")]
    file: Vec<PathBuf>,

    /// Configuration JSON (tailles des univers, plafonds, stratégies)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Afficher les statistiques (fréquences, chauds/froids, pair/impair)
    Stats,

    /// Développer une sélection de numéros en toutes ses combinaisons
    Matrix {
        /// Numéros de la zone avant (au moins 5)
        #[arg(long, value_delimiter = ',', required = true)]
        front: Vec<u8>,

        /// Numéros de la zone arrière (au moins 2)
        #[arg(long, value_delimiter = ',', required = true)]
        back: Vec<u8>,

        /// Nombre maximal de grilles (défaut : configuration)
        #[arg(long)]
        cap: Option<usize>,
    },

    /// Générer des grilles selon une stratégie
    Pick {
        /// random, hot, cold ou balanced
        #[arg(short, long, default_value = "random")]
        strategy: String,

        /// Nombre de grilles
        #[arg(short, long, default_value = "5", allow_negative_numbers = true)]
        count: i64,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Ajouter un tirage manuellement
    Add,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::List { last } => cmd_list(&cli.file, &config, last),
        Command::Stats => cmd_stats(&cli.file, &config),
        Command::Matrix { front, back, cap } => cmd_matrix(&config, &front, &back, cap),
        Command::Pick { strategy, count, seed } => cmd_pick(&cli.file, &config, &strategy, count, seed),
        Command::Add => cmd_add(&cli.file, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<LotteryConfig> {
    let config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Impossible de lire {:?}", path))?;
            serde_json::from_str(&json).with_context(|| format!("JSON invalide dans {:?}", path))?
        }
        None => LotteryConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_history(files: &[PathBuf], config: &LotteryConfig) -> Result<History> {
    let mut history = History::new();
    for file in files {
        let result = import_csv(&mut history, file, config)?;
        if result.errors > 0 || result.skipped > 0 {
            display_import_summary(&file.display().to_string(), &result);
        }
    }
    Ok(history)
}

fn cmd_list(files: &[PathBuf], config: &LotteryConfig, last: usize) -> Result<()> {
    let history = load_history(files, config)?;
    if history.is_empty() {
        println!("Historique vide. Ajoutez un tirage : superlotto add");
        return Ok(());
    }
    display_draws(history.latest(last));
    Ok(())
}

fn cmd_stats(files: &[PathBuf], config: &LotteryConfig) -> Result<()> {
    let history = load_history(files, config)?;
    let stats = compute_statistics(history.draws(), config);
    display_stats(&stats, config);
    Ok(())
}

fn cmd_matrix(config: &LotteryConfig, front: &[u8], back: &[u8], cap: Option<usize>) -> Result<()> {
    let front = selection(front, Pool::Front, config)?;
    let back = selection(back, Pool::Back, config)?;

    let total = matrix_size(front.len(), back.len());
    let picks = cartesian_picks(&front, &back, cap.unwrap_or(config.matrix_cap));
    display_matrix(&front, &back, total, &picks);
    Ok(())
}

fn selection(numbers: &[u8], pool: Pool, config: &LotteryConfig) -> Result<Vec<u8>> {
    let mut set = numbers.to_vec();
    set.sort_unstable();
    set.dedup();
    validate_zone(&set, pool, config)?;
    Ok(set)
}

fn cmd_pick(files: &[PathBuf], config: &LotteryConfig, strategy: &str, count: i64, seed: Option<u64>) -> Result<()> {
    let strategy: Strategy = strategy.parse()?;
    let history = load_history(files, config)?;
    if history.is_empty() && matches!(strategy, Strategy::Hot | Strategy::Cold) {
        log::warn!("Historique vide : les pools chauds et froids suivent l'ordre numérique");
    }
    let stats = compute_statistics(history.draws(), config);

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let picks = generate_picks(&stats, count, strategy, config, &mut rng)?;
    display_picks(&picks, Some(strategy));
    Ok(())
}

fn cmd_add(files: &[PathBuf], config: &LotteryConfig) -> Result<()> {
    let Some(target) = files.first() else {
        bail!("Aucun fichier d'historique indiqué");
    };
    let existing: Vec<PathBuf> = files.iter().filter(|f| f.exists()).cloned().collect();
    let mut history = load_history(&existing, config)?;

    println!("Ajout d'un tirage manuellement\n");

    let id = match history.next_id() {
        Some(suggested) => {
            let input = prompt(&format!("Identifiant du tirage [{suggested}] : "))?;
            if input.is_empty() { suggested } else { input }
        }
        None => prompt("Identifiant du tirage (ex: 25142) : ")?,
    };
    if history.contains(&id) {
        bail!("Le tirage {id} existe déjà");
    }

    let today = chrono::Local::now().date_naive();
    let raw_date = prompt(&format!("Date (AAAA-MM-JJ) [{today}] : "))?;
    let date = if raw_date.is_empty() { today } else { parse_date(&raw_date)? };

    let front = prompt_numbers::<FRONT_PICK>(Pool::Front, config)?;
    let back = prompt_numbers::<BACK_PICK>(Pool::Back, config)?;

    let draw = Draw::new(id, date, front, back, config)?;

    println!("\nTirage à insérer :");
    display_draws(std::slice::from_ref(&draw));

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        history.add(draw)?;
        export_csv(&history, target)?;
        println!("Tirage enregistré dans {}.", target.display());
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers<const N: usize>(pool: Pool, config: &LotteryConfig) -> Result<[u8; N]> {
    let size = config.universe_size(pool);
    loop {
        let input = prompt(&format!("{pool} : {N} numéros (séparés par des espaces, 1-{size}) : "))?;
        match parse_numbers::<N>(&input, pool, config) {
            Ok(numbers) => return Ok(numbers),
            Err(e) => println!("{e:#}. Réessayez."),
        }
    }
}

fn parse_numbers<const N: usize>(input: &str, pool: Pool, config: &LotteryConfig) -> Result<[u8; N]> {
    let nums = input
        .split_whitespace()
        .map(|s| s.parse::<u8>().with_context(|| format!("'{s}' n'est pas un numéro")))
        .collect::<Result<Vec<u8>>>()?;
    if nums.len() != N {
        bail!("Entrez exactement {N} numéros");
    }
    validate_zone(&nums, pool, config)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(&nums);
    Ok(arr)
}
