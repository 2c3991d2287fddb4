use diesel::prelude::*;

use quran_backend::db::quran::*;
use quran_backend::db::quran_models::*;
use quran_backend::db::quran_schema::*;

mod helpers;
use helpers as h;

#[test]
fn test_cascade_delete_on_sura_removal() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let ayas_before: i64 = ayas::table
        .filter(ayas::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    let words_before: i64 = words::table
        .filter(words::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    let translated_before: i64 = translated_ayas::table
        .filter(translated_ayas::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");

    assert!(ayas_before > 0);
    assert!(words_before > 0);
    assert!(translated_before > 0);

    let deleted = delete_sura(&mut conn, 1).expect("Delete failed");
    assert_eq!(deleted, 1);

    let ayas_after: i64 = ayas::table
        .filter(ayas::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    let words_after: i64 = words::table
        .filter(words::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    let translated_after: i64 = translated_ayas::table
        .filter(translated_ayas::sura_number.eq(1))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");

    assert_eq!(ayas_after, 0, "CASCADE DELETE should have removed all ayas");
    assert_eq!(words_after, 0, "CASCADE DELETE should have removed all words");
    assert_eq!(translated_after, 0, "CASCADE DELETE should have removed all translated ayas");

    // The shared reference entities are not owned by the sura
    let roots_count: i64 = roots::table.count().get_result(&mut conn).expect("Query failed");
    let lemmas_count: i64 = lemmas::table.count().get_result(&mut conn).expect("Query failed");
    assert_eq!(roots_count, 1);
    assert_eq!(lemmas_count, 2);
}

#[test]
fn test_cascade_delete_on_root_removal() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    // A word with no direct root link, reachable only through its
    // lemma, which belongs to the root being deleted.
    create_word(&mut conn, &NewWord {
        sura_number: 1,
        aya_id: seed.aya2_id,
        number: 1,
        token: "بِٱسْمِ",
        root_id: None,
        lemma_id: seed.lemma_ism_id,
    }).expect("Can't create word");

    let deleted = delete_root(&mut conn, "سمو").expect("Delete failed");
    assert_eq!(deleted, 1);

    // Dependent lemma rows cascade
    let ism_lemmas: i64 = lemmas::table
        .filter(lemmas::id.eq(seed.lemma_ism_id))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    assert_eq!(ism_lemmas, 0, "CASCADE DELETE should have removed dependent lemmas");

    // Words referencing the root directly cascade through the root FK,
    // words referencing a cascaded lemma cascade through the lemma FK
    let root_words: i64 = words::table
        .filter(words::root_id.eq(seed.root_smw_id))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    assert_eq!(root_words, 0);

    let lemma_words: i64 = words::table
        .filter(words::lemma_id.eq(seed.lemma_ism_id))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    assert_eq!(lemma_words, 0);

    // The rootless lemma and its word are untouched
    let allah_words: i64 = words::table
        .filter(words::lemma_id.eq(seed.lemma_allah_id))
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    assert_eq!(allah_words, 1);

    let remaining_lemmas: i64 = lemmas::table.count().get_result(&mut conn).expect("Query failed");
    assert_eq!(remaining_lemmas, 1);
}

#[test]
fn test_cascade_delete_on_translation_removal() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let deleted = delete_quran_translation(&mut conn, seed.translation_id)
        .expect("Delete failed");
    assert_eq!(deleted, 1);

    let translated_after: i64 = translated_ayas::table
        .count()
        .get_result(&mut conn)
        .expect("Query failed");
    assert_eq!(translated_after, 0);

    // The ayas themselves stay
    let ayas_after: i64 = ayas::table.count().get_result(&mut conn).expect("Query failed");
    assert_eq!(ayas_after, 2);
}
