use quran_backend::db::quran::*;
use quran_backend::db::quran_models::*;
use quran_backend::types::SchemaError;

mod helpers;
use helpers as h;

#[test]
fn test_duplicate_sura_number_rejected() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let result = create_sura(&mut conn, &NewSura {
        number: 1,
        name: "الفاتحة",
        tname: "Al-Fatihah",
        ename: "The Opening",
        revelation_order: 5,
        revelation_type: "Meccan",
        rukus: 1,
        bismillah: None,
    });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_duplicate_aya_position_rejected() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let result = create_aya(&mut conn, &NewAya {
        sura_number: 1,
        number: 1,
        text: "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_duplicate_word_position_rejected() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let result = create_word(&mut conn, &NewWord {
        sura_number: 1,
        aya_id: seed.aya1_id,
        number: 1,
        token: "بِسْمِ",
        root_id: None,
        lemma_id: seed.lemma_ism_id,
    });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_duplicate_translated_aya_rejected() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    // A second text for the same (aya, translation) pair
    let result = create_translated_aya(&mut conn, &NewTranslatedAya {
        sura_number: 1,
        aya_id: seed.aya1_id,
        translation_id: seed.translation_id,
        text: "In the name of God, the Merciful, the Compassionate.",
    });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_duplicate_root_letters_rejected() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let result = create_root(&mut conn, &NewRoot { letters: "سمو" });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_duplicate_lemma_token_rejected() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let result = create_lemma(&mut conn, &NewLemma {
        token: "ٱسْم",
        root_id: Some(seed.root_smw_id),
    });

    assert!(matches!(result, Err(SchemaError::UniquenessViolation(_))));
}

#[test]
fn test_aya_requires_existing_sura() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let result = create_aya(&mut conn, &NewAya {
        sura_number: 99,
        number: 1,
        text: "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    });

    assert!(matches!(result, Err(SchemaError::ForeignKeyViolation(_))));
}

#[test]
fn test_empty_aya_text_rejected() {
    let mut conn = h::test_conn();
    h::seed_al_fatihah(&mut conn);

    let result = create_aya(&mut conn, &NewAya {
        sura_number: 1,
        number: 3,
        text: "  ",
    });

    assert!(matches!(result, Err(SchemaError::RequiredFieldMissing(_))));
}

#[test]
fn test_malformed_source_url_rejected() {
    let mut conn = h::test_conn();

    let result = create_quran_translation(&mut conn, &NewQuranTranslation {
        name: "Test Edition",
        translator: "Test Translator",
        source_name: "Test Source",
        source_url: "not a url",
    });

    assert!(matches!(result, Err(SchemaError::MalformedUrl(_))));
}

#[test]
fn test_word_without_root_is_allowed() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let word = create_word(&mut conn, &NewWord {
        sura_number: 1,
        aya_id: seed.aya2_id,
        number: 1,
        token: "ٱلْحَمْدُ",
        root_id: None,
        lemma_id: seed.lemma_ism_id,
    }).expect("Word with no root should insert");

    assert_eq!(word.root_id, None);
}

#[test]
fn test_word_requires_existing_lemma() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let result = create_word(&mut conn, &NewWord {
        sura_number: 1,
        aya_id: seed.aya2_id,
        number: 1,
        token: "ٱلْحَمْدُ",
        root_id: None,
        lemma_id: 9999,
    });

    assert!(matches!(result, Err(SchemaError::ForeignKeyViolation(_))));
}

#[test]
fn test_get_or_create_reuses_rows() {
    let mut conn = h::test_conn();
    let seed = h::seed_al_fatihah(&mut conn);

    let root = get_or_create_root(&mut conn, "سمو").expect("get_or_create_root failed");
    assert_eq!(root.id, seed.root_smw_id);

    let lemma = get_or_create_lemma(&mut conn, "ٱسْم", Some(root.id))
        .expect("get_or_create_lemma failed");
    assert_eq!(lemma.id, seed.lemma_ism_id);

    let new_root = get_or_create_root(&mut conn, "حمد").expect("get_or_create_root failed");
    assert_ne!(new_root.id, seed.root_smw_id);
}
