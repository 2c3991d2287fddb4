//! Importer for Tanzil-format translation files.
//!
//! A JSON manifest lists the editions. Each referenced file holds one
//! line per aya: "sura|aya|translated text". Lines starting with '#'
//! are comments.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use diesel::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use quran_backend::db::quran::{create_quran_translation, create_translated_aya};
use quran_backend::db::quran_models::{NewQuranTranslation, NewTranslatedAya};
use quran_backend::db::quran_schema::ayas;
use quran_backend::logger::{info, warn};

use crate::bootstrap::helpers::read_json_file;

use super::QuranImporter;

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    file: String,
    name: String,
    translator: String,
    source_name: String,
    source_url: String,
}

pub struct TranslationImporter {
    manifest_path: PathBuf,
}

impl TranslationImporter {
    pub fn new(manifest_path: PathBuf) -> Self {
        Self { manifest_path }
    }

    fn import_edition(
        &self,
        db_conn: &mut SqliteConnection,
        entry: &ManifestEntry,
        aya_ids: &HashMap<(i32, i32), i32>,
    ) -> Result<()> {
        let translation = create_quran_translation(db_conn, &NewQuranTranslation {
            name: &entry.name,
            translator: &entry.translator,
            source_name: &entry.source_name,
            source_url: &entry.source_url,
        })?;

        let file_path = match self.manifest_path.parent() {
            Some(dir) => dir.join(&entry.file),
            None => PathBuf::from(&entry.file),
        };
        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let lines: Vec<&str> = content
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        let progress_bar = ProgressBar::new(lines.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("Importing translation [{bar:40}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("=>-"),
        );

        let mut imported = 0;
        let mut skipped = 0;

        db_conn.transaction::<_, anyhow::Error, _>(|conn| {
            for line in &lines {
                progress_bar.inc(1);

                let mut parts = line.splitn(3, '|');
                let (sura_str, aya_str, text) = match (parts.next(), parts.next(), parts.next()) {
                    (Some(s), Some(a), Some(t)) => (s, a, t),
                    _ => {
                        skipped += 1;
                        continue;
                    }
                };

                let sura_number: i32 = match sura_str.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        skipped += 1;
                        continue;
                    }
                };
                let aya_number: i32 = match aya_str.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        skipped += 1;
                        continue;
                    }
                };

                // Missing ayas are expected on limited bootstrap runs
                let aya_id = match aya_ids.get(&(sura_number, aya_number)) {
                    Some(id) => *id,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };

                create_translated_aya(conn, &NewTranslatedAya {
                    sura_number,
                    aya_id,
                    translation_id: translation.id,
                    text,
                })?;
                imported += 1;
            }

            Ok(())
        })?;

        progress_bar.finish();
        info(&format!(
            "Imported translation '{}': {} ayas, {} lines skipped",
            entry.name, imported, skipped
        ));

        Ok(())
    }
}

impl QuranImporter for TranslationImporter {
    fn import(&mut self, db_conn: &mut SqliteConnection) -> Result<()> {
        info("TranslationImporter::import()");

        if !self.manifest_path.exists() {
            warn(&format!(
                "Translation manifest not found at {:?}, skipping translation import",
                self.manifest_path
            ));
            return Ok(());
        }

        let entries: Vec<ManifestEntry> = read_json_file(&self.manifest_path)?;

        let aya_ids: HashMap<(i32, i32), i32> = ayas::table
            .select((ayas::sura_number, ayas::number, ayas::id))
            .load::<(i32, i32, i32)>(db_conn)?
            .into_iter()
            .map(|(sura_number, aya_number, id)| ((sura_number, aya_number), id))
            .collect();

        for entry in &entries {
            self.import_edition(db_conn, entry, &aya_ids)?;
        }

        Ok(())
    }
}
