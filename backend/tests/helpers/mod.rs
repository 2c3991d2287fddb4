use diesel::prelude::*;

use quran_backend::db::quran::*;
use quran_backend::db::quran_models::*;
use quran_backend::db::run_migrations;

/// Row ids of the sample records, for use in assertions.
#[allow(dead_code)]
pub struct Seed {
    pub aya1_id: i32,
    pub aya2_id: i32,
    pub translation_id: i32,
    pub root_smw_id: i32,
    pub lemma_ism_id: i32,
    pub lemma_allah_id: i32,
}

#[allow(dead_code)]
pub fn test_conn() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:")
        .expect("Can't open in-memory database");
    diesel::sql_query("PRAGMA foreign_keys = ON;")
        .execute(&mut conn)
        .expect("Can't enable foreign keys");
    run_migrations(&mut conn).expect("Migrations failed");
    conn
}

/// Seeds sura 1 with its first two ayas, one translation edition, the
/// root s-m-w and two lemmas, and the first two word occurrences of
/// aya 1. The second word has no identified root.
pub fn seed_al_fatihah(conn: &mut SqliteConnection) -> Seed {
    let sura = create_sura(conn, &NewSura {
        number: 1,
        name: "الفاتحة",
        tname: "Al-Fatihah",
        ename: "The Opening",
        revelation_order: 5,
        revelation_type: "Meccan",
        rukus: 1,
        bismillah: None,
    }).expect("Can't create sura");

    let aya1 = create_aya(conn, &NewAya {
        sura_number: sura.number,
        number: 1,
        text: "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    }).expect("Can't create aya 1");

    let aya2 = create_aya(conn, &NewAya {
        sura_number: sura.number,
        number: 2,
        text: "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ",
    }).expect("Can't create aya 2");

    let translation = create_quran_translation(conn, &NewQuranTranslation {
        name: "Saheeh International",
        translator: "Saheeh International",
        source_name: "Tanzil",
        source_url: "https://tanzil.net/trans/",
    }).expect("Can't create translation");

    create_translated_aya(conn, &NewTranslatedAya {
        sura_number: sura.number,
        aya_id: aya1.id,
        translation_id: translation.id,
        text: "In the name of Allah, the Entirely Merciful, the Especially Merciful.",
    }).expect("Can't create translated aya");

    let root_smw = create_root(conn, &NewRoot { letters: "سمو" })
        .expect("Can't create root");

    let lemma_ism = create_lemma(conn, &NewLemma {
        token: "ٱسْم",
        root_id: Some(root_smw.id),
    }).expect("Can't create lemma");

    let lemma_allah = create_lemma(conn, &NewLemma {
        token: "ٱللَّه",
        root_id: None,
    }).expect("Can't create lemma");

    create_word(conn, &NewWord {
        sura_number: sura.number,
        aya_id: aya1.id,
        number: 1,
        token: "بِسْمِ",
        root_id: Some(root_smw.id),
        lemma_id: lemma_ism.id,
    }).expect("Can't create word 1");

    create_word(conn, &NewWord {
        sura_number: sura.number,
        aya_id: aya1.id,
        number: 2,
        token: "ٱللَّهِ",
        root_id: None,
        lemma_id: lemma_allah.id,
    }).expect("Can't create word 2");

    Seed {
        aya1_id: aya1.id,
        aya2_id: aya2.id,
        translation_id: translation.id,
        root_smw_id: root_smw.id,
        lemma_ism_id: lemma_ism.id,
        lemma_allah_id: lemma_allah.id,
    }
}

#[allow(dead_code)]
pub fn seed_al_baqarah_stub(conn: &mut SqliteConnection) {
    create_sura(conn, &NewSura {
        number: 2,
        name: "البقرة",
        tname: "Al-Baqarah",
        ename: "The Cow",
        revelation_order: 87,
        revelation_type: "Medinan",
        rukus: 40,
        bismillah: None,
    }).expect("Can't create sura");

    create_aya(conn, &NewAya {
        sura_number: 2,
        number: 1,
        text: "الٓمٓ",
    }).expect("Can't create aya");
}
