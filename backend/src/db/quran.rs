use diesel::prelude::*;

use crate::db::quran_models::*;
use crate::db::quran_schema::{
    ayas, lemmas, quran_translations, roots, suras, translated_ayas, words,
};
use crate::db::DatabaseHandle;
use crate::logger::error;
use crate::types::SchemaError;

pub type QuranDbHandle = DatabaseHandle;

/// Row counts per table, used for bootstrap summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuranDbCounts {
    pub suras: i64,
    pub ayas: i64,
    pub translations: i64,
    pub translated_ayas: i64,
    pub roots: i64,
    pub lemmas: i64,
    pub words: i64,
}

impl QuranDbHandle {
    /// All suras in canonical (mushaf) order.
    pub fn get_suras(&self) -> Vec<Sura> {
        let result = self.do_read(|db_conn| {
            suras::table
                .order(suras::number.asc())
                .select(Sura::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_suras(): {}", e));
                Vec::new()
            }
        }
    }

    pub fn get_sura(&self, sura_number: i32) -> Option<Sura> {
        let result = self.do_read(|db_conn| {
            suras::table
                .filter(suras::number.eq(sura_number))
                .select(Sura::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_sura(): {}", e));
                None
            }
        }
    }

    pub fn get_ayas_for_sura(&self, sura_number: i32) -> Vec<Aya> {
        let result = self.do_read(|db_conn| {
            ayas::table
                .filter(ayas::sura_number.eq(sura_number))
                .order(ayas::number.asc())
                .select(Aya::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_ayas_for_sura(): {}", e));
                Vec::new()
            }
        }
    }

    pub fn get_aya(&self, sura_number: i32, aya_number: i32) -> Option<Aya> {
        let result = self.do_read(|db_conn| {
            ayas::table
                .filter(ayas::sura_number.eq(sura_number))
                .filter(ayas::number.eq(aya_number))
                .select(Aya::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_aya(): {}", e));
                None
            }
        }
    }

    pub fn get_translations(&self) -> Vec<QuranTranslation> {
        let result = self.do_read(|db_conn| {
            quran_translations::table
                .order(quran_translations::name.asc())
                .select(QuranTranslation::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_translations(): {}", e));
                Vec::new()
            }
        }
    }

    /// The text of one aya in one translation edition. At most one row
    /// exists per (aya, translation) pair.
    pub fn get_translated_aya(&self, for_aya_id: i32, for_translation_id: i32) -> Option<TranslatedAya> {
        let result = self.do_read(|db_conn| {
            translated_ayas::table
                .filter(translated_ayas::aya_id.eq(for_aya_id))
                .filter(translated_ayas::translation_id.eq(for_translation_id))
                .select(TranslatedAya::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_translated_aya(): {}", e));
                None
            }
        }
    }

    pub fn get_translations_for_aya(&self, for_aya_id: i32) -> Vec<TranslatedAya> {
        let result = self.do_read(|db_conn| {
            translated_ayas::table
                .filter(translated_ayas::aya_id.eq(for_aya_id))
                .order(translated_ayas::translation_id.asc())
                .select(TranslatedAya::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_translations_for_aya(): {}", e));
                Vec::new()
            }
        }
    }

    pub fn get_root(&self, root_letters: &str) -> Option<Root> {
        let result = self.do_read(|db_conn| {
            roots::table
                .filter(roots::letters.eq(root_letters))
                .select(Root::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_root(): {}", e));
                None
            }
        }
    }

    pub fn get_lemma(&self, lemma_token: &str) -> Option<Lemma> {
        let result = self.do_read(|db_conn| {
            lemmas::table
                .filter(lemmas::token.eq(lemma_token))
                .select(Lemma::as_select())
                .first(db_conn)
                .optional()
        });

        match result {
            Ok(x) => x,
            Err(e) => {
                error(&format!("get_lemma(): {}", e));
                None
            }
        }
    }

    pub fn get_lemmas_for_root(&self, for_root_id: i32) -> Vec<Lemma> {
        let result = self.do_read(|db_conn| {
            lemmas::table
                .filter(lemmas::root_id.eq(for_root_id))
                .order(lemmas::token.asc())
                .select(Lemma::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_lemmas_for_root(): {}", e));
                Vec::new()
            }
        }
    }

    pub fn get_words_for_aya(&self, for_aya_id: i32) -> Vec<Word> {
        let result = self.do_read(|db_conn| {
            words::table
                .filter(words::aya_id.eq(for_aya_id))
                .order(words::number.asc())
                .select(Word::as_select())
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_words_for_aya(): {}", e));
                Vec::new()
            }
        }
    }

    /// Ayas containing a word derived from the root, through the words
    /// join table.
    pub fn get_ayas_for_root(&self, for_root_id: i32) -> Vec<Aya> {
        let result = self.do_read(|db_conn| {
            ayas::table
                .inner_join(words::table)
                .filter(words::root_id.eq(for_root_id))
                .select(Aya::as_select())
                .distinct()
                .order((ayas::sura_number.asc(), ayas::number.asc()))
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_ayas_for_root(): {}", e));
                Vec::new()
            }
        }
    }

    /// Ayas containing an occurrence of the lemma, through the words
    /// join table.
    pub fn get_ayas_for_lemma(&self, for_lemma_id: i32) -> Vec<Aya> {
        let result = self.do_read(|db_conn| {
            ayas::table
                .inner_join(words::table)
                .filter(words::lemma_id.eq(for_lemma_id))
                .select(Aya::as_select())
                .distinct()
                .order((ayas::sura_number.asc(), ayas::number.asc()))
                .load(db_conn)
        });

        match result {
            Ok(xs) => xs,
            Err(e) => {
                error(&format!("get_ayas_for_lemma(): {}", e));
                Vec::new()
            }
        }
    }

    pub fn counts(&self) -> Option<QuranDbCounts> {
        let result = self.do_read(|db_conn| {
            Ok(QuranDbCounts {
                suras: suras::table.count().get_result(db_conn)?,
                ayas: ayas::table.count().get_result(db_conn)?,
                translations: quran_translations::table.count().get_result(db_conn)?,
                translated_ayas: translated_ayas::table.count().get_result(db_conn)?,
                roots: roots::table.count().get_result(db_conn)?,
                lemmas: lemmas::table.count().get_result(db_conn)?,
                words: words::table.count().get_result(db_conn)?,
            })
        });

        match result {
            Ok(x) => Some(x),
            Err(e) => {
                error(&format!("counts(): {}", e));
                None
            }
        }
    }
}

// Write operations take an explicit connection. The bulk-load process
// owns one connection and wraps batches in its own transactions.

pub fn create_sura(db_conn: &mut SqliteConnection, new_sura: &NewSura) -> Result<Sura, SchemaError> {
    new_sura.validate()?;
    diesel::insert_into(suras::table)
        .values(new_sura)
        .returning(Sura::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_aya(db_conn: &mut SqliteConnection, new_aya: &NewAya) -> Result<Aya, SchemaError> {
    new_aya.validate()?;
    diesel::insert_into(ayas::table)
        .values(new_aya)
        .returning(Aya::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_quran_translation(
    db_conn: &mut SqliteConnection,
    new_translation: &NewQuranTranslation,
) -> Result<QuranTranslation, SchemaError> {
    new_translation.validate()?;
    diesel::insert_into(quran_translations::table)
        .values(new_translation)
        .returning(QuranTranslation::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_translated_aya(
    db_conn: &mut SqliteConnection,
    new_translated_aya: &NewTranslatedAya,
) -> Result<TranslatedAya, SchemaError> {
    new_translated_aya.validate()?;
    diesel::insert_into(translated_ayas::table)
        .values(new_translated_aya)
        .returning(TranslatedAya::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_root(db_conn: &mut SqliteConnection, new_root: &NewRoot) -> Result<Root, SchemaError> {
    new_root.validate()?;
    diesel::insert_into(roots::table)
        .values(new_root)
        .returning(Root::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_lemma(db_conn: &mut SqliteConnection, new_lemma: &NewLemma) -> Result<Lemma, SchemaError> {
    new_lemma.validate()?;
    diesel::insert_into(lemmas::table)
        .values(new_lemma)
        .returning(Lemma::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn get_or_create_root(db_conn: &mut SqliteConnection, root_letters: &str) -> Result<Root, SchemaError> {
    let existing = roots::table
        .filter(roots::letters.eq(root_letters))
        .select(Root::as_select())
        .first(db_conn)
        .optional()
        .map_err(SchemaError::from)?;

    match existing {
        Some(root) => Ok(root),
        None => create_root(db_conn, &NewRoot { letters: root_letters }),
    }
}

pub fn get_or_create_lemma(
    db_conn: &mut SqliteConnection,
    lemma_token: &str,
    for_root_id: Option<i32>,
) -> Result<Lemma, SchemaError> {
    let existing = lemmas::table
        .filter(lemmas::token.eq(lemma_token))
        .select(Lemma::as_select())
        .first(db_conn)
        .optional()
        .map_err(SchemaError::from)?;

    match existing {
        Some(lemma) => Ok(lemma),
        None => create_lemma(
            db_conn,
            &NewLemma {
                token: lemma_token,
                root_id: for_root_id,
            },
        ),
    }
}

pub fn create_word(db_conn: &mut SqliteConnection, new_word: &NewWord) -> Result<Word, SchemaError> {
    new_word.validate()?;
    diesel::insert_into(words::table)
        .values(new_word)
        .returning(Word::as_returning())
        .get_result(db_conn)
        .map_err(SchemaError::from)
}

pub fn create_words_batch(
    db_conn: &mut SqliteConnection,
    new_words: &[NewWord],
) -> Result<usize, SchemaError> {
    for new_word in new_words {
        new_word.validate()?;
    }
    diesel::insert_into(words::table)
        .values(new_words)
        .execute(db_conn)
        .map_err(SchemaError::from)
}

/// Deletes a sura. Its ayas, words and translated ayas cascade at the
/// SQLite level, foreign keys must be enabled on the connection.
pub fn delete_sura(db_conn: &mut SqliteConnection, sura_number: i32) -> Result<usize, SchemaError> {
    diesel::delete(suras::table.filter(suras::number.eq(sura_number)))
        .execute(db_conn)
        .map_err(SchemaError::from)
}

/// Deletes a root. Dependent lemmas cascade, and words cascade both
/// through their root foreign key and through deleted lemmas.
pub fn delete_root(db_conn: &mut SqliteConnection, root_letters: &str) -> Result<usize, SchemaError> {
    diesel::delete(roots::table.filter(roots::letters.eq(root_letters)))
        .execute(db_conn)
        .map_err(SchemaError::from)
}

/// Deletes a translation edition and its translated ayas.
pub fn delete_quran_translation(
    db_conn: &mut SqliteConnection,
    for_translation_id: i32,
) -> Result<usize, SchemaError> {
    diesel::delete(
        quran_translations::table.filter(quran_translations::id.eq(for_translation_id)),
    )
    .execute(db_conn)
    .map_err(SchemaError::from)
}
