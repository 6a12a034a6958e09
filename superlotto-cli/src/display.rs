use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::{Chart, Plot, Shape};

use crate::import::ImportResult;
use superlotto_core::config::LotteryConfig;
use superlotto_core::models::{Draw, Pick, Pool};
use superlotto_core::stats::{Statistics, rank_by_frequency};
use superlotto_core::strategy::Strategy;

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Tirage", "Date", "Zone avant", "Zone arrière"]);
    for draw in draws {
        table.add_row(vec![
            draw.id.clone(),
            draw.date.format("%Y-%m-%d").to_string(),
            join_numbers(&draw.front),
            join_numbers(&draw.back),
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(path: &str, result: &ImportResult) {
    println!("Import de {path} :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Lignes rejetées   : {}", result.errors);
    }
}

pub fn display_stats(stats: &Statistics, config: &LotteryConfig) {
    println!("\n📊 Statistiques sur {} tirages\n", stats.total_draws);

    for pool in [Pool::Front, Pool::Back] {
        println!("── {} (1-{}) ──", pool, config.universe_size(pool));
        println!("  Chauds : {}", join_numbers(stats.hot(pool)));
        println!("  Froids : {}", join_numbers(stats.cold(pool)));
        let odd_even = stats.odd_even(pool);
        println!("  Impairs / pairs : {} / {}", odd_even.odd, odd_even.even);
        display_frequency_table(stats, pool);
        println!();
    }

    for pool in [Pool::Front, Pool::Back] {
        display_frequency_chart(stats, pool, config);
    }
}

fn display_frequency_table(stats: &Statistics, pool: Pool) {
    let mut table = new_table(vec!["Numéro", "Fréquence", "Tag"]);
    let frequency = stats.frequency(pool);

    for n in rank_by_frequency(frequency) {
        let (tag, color) = if stats.hot(pool).contains(&n) {
            ("HOT", Color::Red)
        } else if stats.cold(pool).contains(&n) {
            ("COLD", Color::Blue)
        } else {
            ("-", Color::White)
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", n)),
            Cell::new(frequency.get(&n).copied().unwrap_or(0)),
            Cell::new(tag).fg(color),
        ]);
    }
    println!("{table}");
}

fn display_frequency_chart(stats: &Statistics, pool: Pool, config: &LotteryConfig) {
    if let Some(chart) = frequency_chart(stats, pool, config) {
        println!("── Fréquences {} ──", pool.to_string().to_lowercase());
        println!("{chart}");
    }
}

fn frequency_chart(stats: &Statistics, pool: Pool, config: &LotteryConfig) -> Option<String> {
    if stats.total_draws == 0 {
        return None;
    }
    let points: Vec<(f32, f32)> = stats
        .frequency(pool)
        .iter()
        .map(|(&n, &c)| (n as f32, c as f32))
        .collect();
    let x_max = config.universe_size(pool) as f32 + 1.0;
    let mut chart = Chart::new(120, 40, 0.0, x_max);
    let rendered = chart.lineplot(&Shape::Bars(&points)).to_string();
    Some(rendered)
}

pub fn display_matrix(front: &[u8], back: &[u8], total: u128, picks: &[Pick]) {
    println!("\n🧮 Matrice de combinaisons\n");
    println!("  Zone avant   : {} numéros ({})", front.len(), join_numbers(front));
    println!("  Zone arrière : {} numéros ({})", back.len(), join_numbers(back));

    if total == 0 {
        println!(
            "\nSélection incomplète : au moins {} numéros avant et {} numéros arrière.",
            Pool::Front.pick_count(),
            Pool::Back.pick_count()
        );
        return;
    }

    println!("  Combinaisons : {total}");
    if (picks.len() as u128) < total {
        println!("  Affichées    : {} (plafond atteint)", picks.len());
    }
    display_picks(picks, None);
}

pub fn display_picks(picks: &[Pick], strategy: Option<Strategy>) {
    if let Some(strategy) = strategy {
        println!("\n🎲 Grilles « {} » : {}\n", strategy, strategy.description());
    }

    let mut table = new_table(vec!["#", "Zone avant", "Zone arrière", "Impairs", "Somme"]);
    for (i, pick) in picks.iter().enumerate() {
        let sum: u32 = pick.front.iter().map(|&n| n as u32).sum();
        table.add_row(vec![
            (i + 1).to_string(),
            join_numbers(&pick.front),
            join_numbers(&pick.back),
            pick.odd_count().to_string(),
            sum.to_string(),
        ]);
    }
    println!("{table}");
}
