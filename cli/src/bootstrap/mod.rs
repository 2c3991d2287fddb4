pub mod helpers;
pub mod morphology;
pub mod tanzil;
pub mod translations;

use std::fs;
use std::path::Path;

use anyhow::Result;
use diesel::prelude::*;

use quran_backend::db::{create_database_connection, run_migrations, DatabaseHandle};
use quran_backend::{get_quran_db_path, logger};

pub use morphology::MorphologyImporter;
pub use tanzil::TanzilImporter;
pub use translations::TranslationImporter;

pub trait QuranImporter {
    fn import(&mut self, conn: &mut SqliteConnection) -> Result<()>;
}

/// Creates the database file, runs migrations and imports the source
/// data: Tanzil text and metadata, translation editions, morphology.
pub fn bootstrap(sources_dir: &Path, limit: Option<usize>) -> Result<()> {
    logger::info("=== bootstrap() ===");

    if !sources_dir.exists() {
        anyhow::bail!(
            "Source data directory not found: {}",
            sources_dir.display()
        );
    }

    let db_path = get_quran_db_path();

    if db_path.exists() {
        logger::info("Deleting existing database file");
        fs::remove_file(&db_path)?;
    }

    helpers::ensure_directory_exists(
        db_path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Invalid database path"))?,
    )?;

    logger::info(&format!("Creating quran database at: {:?}", db_path));
    let mut conn = create_database_connection(&db_path)?;

    logger::info("Running diesel migrations to create schema");
    run_migrations(&mut conn)?;

    let mut importers: Vec<Box<dyn QuranImporter>> = vec![
        Box::new(TanzilImporter::new(
            sources_dir.join("quran-data.xml"),
            sources_dir.join("quran-uthmani.xml"),
            limit,
        )),
        Box::new(TranslationImporter::new(sources_dir.join("translations.json"))),
        Box::new(MorphologyImporter::new(
            sources_dir.join("quranic-corpus-morphology.txt"),
        )),
    ];

    for importer in importers.iter_mut() {
        importer.import(&mut conn)?;
    }

    drop(conn);
    print_summary(&db_path)?;

    logger::info("bootstrap() done");
    Ok(())
}

fn print_summary(db_path: &Path) -> Result<()> {
    let db_url = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid database path"))?;
    let handle = DatabaseHandle::new(db_url)?;

    if let Some(counts) = handle.counts() {
        println!("Database created: {}", db_path.display());
        println!("  suras:           {}", counts.suras);
        println!("  ayas:            {}", counts.ayas);
        println!("  translations:    {}", counts.translations);
        println!("  translated ayas: {}", counts.translated_ayas);
        println!("  roots:           {}", counts.roots);
        println!("  lemmas:          {}", counts.lemmas);
        println!("  words:           {}", counts.words);
    }

    Ok(())
}
