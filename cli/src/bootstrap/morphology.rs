//! Importer for the Quranic Arabic Corpus morphology file.
//!
//! Each line describes one morphological segment:
//!
//!   (1:1:1:2)	somi	N	STEM|POS:N|LEM:{som|ROOT:smw|M|GEN
//!
//! The location is (sura:aya:word:segment). Forms and the LEM/ROOT
//! feature values are Buckwalter encoded. Segments are aggregated into
//! words, roots and lemmas are created on first sight.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use diesel::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use quran_backend::buckwalter::buckwalter_to_unicode;
use quran_backend::db::quran::{create_words_batch, get_or_create_lemma, get_or_create_root};
use quran_backend::db::quran_models::NewWord;
use quran_backend::db::quran_schema::ayas;
use quran_backend::logger::{info, warn};

use super::QuranImporter;

const WORD_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
struct Segment {
    sura: i32,
    aya: i32,
    word: i32,
    form: String,
    features: String,
}

/// One word aggregated from its segments, still Buckwalter encoded.
#[derive(Debug, Clone)]
struct WordData {
    sura: i32,
    aya: i32,
    number: i32,
    token: String,
    lemma: Option<String>,
    root: Option<String>,
}

#[derive(Debug, Clone)]
struct StagedWord {
    sura_number: i32,
    aya_id: i32,
    number: i32,
    token: String,
    root_id: Option<i32>,
    lemma_id: i32,
}

fn feature_value(features: &str, key: &str) -> Option<String> {
    features
        .split('|')
        .find_map(|f| f.strip_prefix(key).map(|v| v.to_string()))
}

fn group_words(segments: Vec<Segment>) -> Vec<WordData> {
    let mut words: Vec<WordData> = Vec::new();

    for segment in segments {
        let lemma = feature_value(&segment.features, "LEM:");
        let root = feature_value(&segment.features, "ROOT:");

        match words.last_mut() {
            Some(word)
                if word.sura == segment.sura
                    && word.aya == segment.aya
                    && word.number == segment.word =>
            {
                word.token.push_str(&segment.form);
                if word.lemma.is_none() {
                    word.lemma = lemma;
                }
                if word.root.is_none() {
                    word.root = root;
                }
            }
            _ => {
                words.push(WordData {
                    sura: segment.sura,
                    aya: segment.aya,
                    number: segment.word,
                    token: segment.form,
                    lemma,
                    root,
                });
            }
        }
    }

    words
}

pub struct MorphologyImporter {
    corpus_path: PathBuf,
}

impl MorphologyImporter {
    pub fn new(corpus_path: PathBuf) -> Self {
        Self { corpus_path }
    }

    fn parse_segments(&self) -> Result<Vec<Segment>> {
        let content = fs::read_to_string(&self.corpus_path)
            .with_context(|| format!("Failed to read file: {}", self.corpus_path.display()))?;

        let location_re = Regex::new(r"^\((\d+):(\d+):(\d+):(\d+)\)$").expect("Invalid regex");

        let mut segments: Vec<Segment> = Vec::new();

        for line in content.lines() {
            // Header and comment lines carry no location
            if !line.starts_with('(') {
                continue;
            }

            let mut fields = line.split('\t');
            let (location, form, features) =
                match (fields.next(), fields.next(), fields.next(), fields.next()) {
                    (Some(l), Some(f), Some(_tag), Some(ft)) => (l, f, ft),
                    _ => {
                        warn(&format!("Malformed morphology line: {}", line));
                        continue;
                    }
                };

            let caps = match location_re.captures(location) {
                Some(c) => c,
                None => {
                    warn(&format!("Malformed location: {}", location));
                    continue;
                }
            };

            segments.push(Segment {
                sura: caps[1].parse()?,
                aya: caps[2].parse()?,
                word: caps[3].parse()?,
                form: form.to_string(),
                features: features.to_string(),
            });
        }

        Ok(segments)
    }
}

impl QuranImporter for MorphologyImporter {
    fn import(&mut self, db_conn: &mut SqliteConnection) -> Result<()> {
        info("MorphologyImporter::import()");

        if !self.corpus_path.exists() {
            warn(&format!(
                "Morphology file not found at {:?}, skipping morphology import",
                self.corpus_path
            ));
            return Ok(());
        }

        let segments = self.parse_segments()?;
        let words = group_words(segments);

        let aya_ids: HashMap<(i32, i32), i32> = ayas::table
            .select((ayas::sura_number, ayas::number, ayas::id))
            .load::<(i32, i32, i32)>(db_conn)?
            .into_iter()
            .map(|(sura_number, aya_number, id)| ((sura_number, aya_number), id))
            .collect();

        let progress_bar = ProgressBar::new(words.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("Importing words [{bar:40}] {pos}/{len}")
                .expect("Invalid progress bar template")
                .progress_chars("=>-"),
        );

        let mut skipped = 0;

        db_conn.transaction::<_, anyhow::Error, _>(|conn| {
            let mut root_ids: HashMap<String, i32> = HashMap::new();
            let mut lemma_ids: HashMap<String, i32> = HashMap::new();
            let mut staged: Vec<StagedWord> = Vec::new();

            for word in &words {
                progress_bar.inc(1);

                // Missing ayas are expected on limited bootstrap runs
                let aya_id = match aya_ids.get(&(word.sura, word.aya)) {
                    Some(id) => *id,
                    None => {
                        skipped += 1;
                        continue;
                    }
                };

                let root_id = match &word.root {
                    Some(root_bw) => {
                        let letters = buckwalter_to_unicode(root_bw);
                        let id = match root_ids.get(&letters) {
                            Some(id) => *id,
                            None => {
                                let root = get_or_create_root(conn, &letters)?;
                                root_ids.insert(letters.clone(), root.id);
                                root.id
                            }
                        };
                        Some(id)
                    }
                    None => None,
                };

                // A lemma row is required, words the corpus leaves
                // unlemmatized fall back to their surface form
                let lemma_token = match &word.lemma {
                    Some(lemma_bw) => buckwalter_to_unicode(lemma_bw),
                    None => buckwalter_to_unicode(&word.token),
                };
                let lemma_id = match lemma_ids.get(&lemma_token) {
                    Some(id) => *id,
                    None => {
                        let lemma = get_or_create_lemma(conn, &lemma_token, root_id)?;
                        lemma_ids.insert(lemma_token.clone(), lemma.id);
                        lemma.id
                    }
                };

                staged.push(StagedWord {
                    sura_number: word.sura,
                    aya_id,
                    number: word.number,
                    token: buckwalter_to_unicode(&word.token),
                    root_id,
                    lemma_id,
                });
            }

            for chunk in staged.chunks(WORD_BATCH_SIZE) {
                let new_words: Vec<NewWord> = chunk
                    .iter()
                    .map(|w| NewWord {
                        sura_number: w.sura_number,
                        aya_id: w.aya_id,
                        number: w.number,
                        token: &w.token,
                        root_id: w.root_id,
                        lemma_id: w.lemma_id,
                    })
                    .collect();
                create_words_batch(conn, &new_words)?;
            }

            Ok(())
        })?;

        progress_bar.finish();
        info(&format!(
            "Imported {} words, {} skipped",
            words.len() - skipped,
            skipped
        ));

        Ok(())
    }
}
