mod bootstrap;

use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use quran_backend::buckwalter::buckwalter_to_unicode;
use quran_backend::db;

#[derive(Parser)]
#[command(name = "quran_cli", version, about = "Quran database bootstrap and query tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and import the source data
    Bootstrap {
        /// Directory containing quran-data.xml, quran-uthmani.xml,
        /// translations.json and the morphology file
        #[arg(long, env = "QURAN_SOURCES_DIR")]
        sources_dir: PathBuf,

        /// Only import the first N suras
        #[arg(long, env = "BOOTSTRAP_LIMIT")]
        limit: Option<usize>,
    },

    /// List all suras
    Suras,

    /// Show one sura and its ayas
    Sura {
        number: i32,
    },

    /// Show one aya with its translations and words
    Aya {
        sura: i32,
        number: i32,
    },

    /// Show the ayas containing a root (Arabic or Buckwalter letters)
    Root {
        letters: String,
    },

    /// Show the ayas containing a lemma (Arabic or Buckwalter token)
    Lemma {
        token: String,
    },
}

/// Query arguments can be given in Buckwalter ASCII instead of Arabic.
fn to_arabic(input: &str) -> String {
    if input.is_ascii() {
        buckwalter_to_unicode(input)
    } else {
        input.to_string()
    }
}

fn print_suras() {
    let dbm = db::get_dbm();

    for sura in dbm.quran.get_suras() {
        println!(
            "{:>3}. {} ({}) - {}, {} rukus",
            sura.number, sura.tname, sura.ename, sura.revelation_type, sura.rukus
        );
    }
}

fn print_sura(number: i32) {
    let dbm = db::get_dbm();

    let Some(sura) = dbm.quran.get_sura(number) else {
        eprintln!("Sura {} not found", number);
        exit(1);
    };

    println!("{}. {} ({}) {}", sura.number, sura.tname, sura.ename, sura.name);
    if let Some(bismillah) = &sura.bismillah {
        println!("{}", bismillah);
    }

    for aya in dbm.quran.get_ayas_for_sura(sura.number) {
        println!("{} {}", aya.text, aya.end_marker());
    }
}

fn print_aya(sura_number: i32, aya_number: i32) {
    let dbm = db::get_dbm();

    let Some(aya) = dbm.quran.get_aya(sura_number, aya_number) else {
        eprintln!("Aya {}:{} not found", sura_number, aya_number);
        exit(1);
    };

    println!("{}:{} {} {}", sura_number, aya.number, aya.text, aya.end_marker());

    for translation in dbm.quran.get_translations() {
        if let Some(translated) = dbm.quran.get_translated_aya(aya.id, translation.id) {
            println!("[{}] {}", translation.name, translated.text);
        }
    }

    let words = dbm.quran.get_words_for_aya(aya.id);
    if !words.is_empty() {
        println!("Words:");
        for word in &words {
            println!("  {:>2}. {} ({})", word.number, word.token, word);
        }
    }
}

fn print_root(letters: &str) {
    let dbm = db::get_dbm();

    let Some(root) = dbm.quran.get_root(&to_arabic(letters)) else {
        eprintln!("Root {} not found", letters);
        exit(1);
    };

    println!("Root: {} ({})", root.letters, root);

    let lemmas = dbm.quran.get_lemmas_for_root(root.id);
    if !lemmas.is_empty() {
        println!("Lemmas:");
        for lemma in &lemmas {
            println!("  {} ({})", lemma.token, lemma);
        }
    }

    println!("Ayas:");
    for aya in dbm.quran.get_ayas_for_root(root.id) {
        println!("  {}:{} {}", aya.sura_number, aya.number, aya.text);
    }
}

fn print_lemma(token: &str) {
    let dbm = db::get_dbm();

    let Some(lemma) = dbm.quran.get_lemma(&to_arabic(token)) else {
        eprintln!("Lemma {} not found", token);
        exit(1);
    };

    println!("Lemma: {} ({})", lemma.token, lemma);

    println!("Ayas:");
    for aya in dbm.quran.get_ayas_for_lemma(lemma.id) {
        println!("  {}:{} {}", aya.sura_number, aya.number, aya.text);
    }
}

fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bootstrap { sources_dir, limit } => {
            bootstrap::bootstrap(&sources_dir, limit)?;
        }
        Commands::Suras => {
            db::init_db()?;
            print_suras();
        }
        Commands::Sura { number } => {
            db::init_db()?;
            print_sura(number);
        }
        Commands::Aya { sura, number } => {
            db::init_db()?;
            print_aya(sura, number);
        }
        Commands::Root { letters } => {
            db::init_db()?;
            print_root(&letters);
        }
        Commands::Lemma { token } => {
            db::init_db()?;
            print_lemma(&token);
        }
    }

    Ok(())
}
