use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::path::Path;

use superlotto_core::config::LotteryConfig;
use superlotto_core::history::History;
use superlotto_core::models::Draw;

const HEADER: [&str; 9] = ["id", "date", "f1", "f2", "f3", "f4", "f5", "b1", "b2"];

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("Format de date invalide: '{}'", raw))
}

fn parse_record(record: &csv::StringRecord, config: &LotteryConfig) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let id = get(0)?;
    if id.is_empty() {
        bail!("Identifiant de tirage manquant");
    }
    let date = parse_date(&get(1)?)?;

    let front = [get_u8(2)?, get_u8(3)?, get_u8(4)?, get_u8(5)?, get_u8(6)?];
    // Colonnes supplémentaires ignorées : seules les deux premières comptent
    let back = [get_u8(7)?, get_u8(8)?];

    Ok(Draw::new(id, date, front, back, config)?)
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(history: &mut History, path: &Path, config: &LotteryConfig) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    let mut draws = Vec::new();
    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record, config) {
                Ok(draw) => draws.push(draw),
                Err(e) => {
                    log::warn!("Ligne {} rejetée: {:#}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                log::warn!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    let report = history.merge(draws);
    result.inserted = report.added as u32;
    result.skipped = report.skipped as u32;

    log::info!("{:?} : {} tirages importés", path, result.inserted);
    Ok(result)
}

/// Réécrit l'historique complet, du plus récent au plus ancien.
pub fn export_csv(history: &History, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;

    writer.write_record(HEADER)?;
    for draw in history.draws() {
        let mut row = vec![draw.id.clone(), draw.date.format("%Y-%m-%d").to_string()];
        row.extend(draw.front.iter().chain(&draw.back).map(|n| n.to_string()));
        writer.write_record(&row)?;
    }
    writer.flush().context("Échec de l'écriture")?;
    Ok(())
}
