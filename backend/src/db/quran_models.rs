use std::fmt;

use diesel::prelude::*;
use url::Url;

use crate::buckwalter::{to_arabic_indic_digits, unicode_to_buckwalter};
use crate::db::quran_schema::*;
use crate::types::{ParseRevelationTypeError, Reference, RevelationType, SchemaError};

// No known Quranic root exceeds 7 letters, 10 leaves headroom.
pub const MAX_ROOT_LETTERS: usize = 10;

/// Sura (chapter) of the Quran.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = suras)]
#[diesel(primary_key(number))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Sura {
    pub number: i32,
    pub name: String,
    pub tname: String,
    pub ename: String,
    pub revelation_order: i32,
    pub revelation_type: String,
    pub rukus: i32,
    pub bismillah: Option<String>,
}

impl Sura {
    pub fn revelation(&self) -> Result<RevelationType, ParseRevelationTypeError> {
        self.revelation_type.parse()
    }

    pub fn reference(&self) -> Reference {
        Reference::Sura { number: self.number }
    }
}

impl fmt::Display for Sura {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tname)
    }
}

#[derive(Insertable)]
#[diesel(table_name = suras)]
pub struct NewSura<'a> {
    pub number: i32,
    pub name: &'a str,
    pub tname: &'a str,
    pub ename: &'a str,
    pub revelation_order: i32,
    pub revelation_type: &'a str,
    pub rukus: i32,
    pub bismillah: Option<&'a str>,
}

impl NewSura<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.number < 1 {
            return Err(SchemaError::InvalidValue {
                field: "number".to_string(),
                value: self.number.to_string(),
            });
        }
        for (field, value) in [("name", self.name), ("tname", self.tname), ("ename", self.ename)] {
            if value.trim().is_empty() {
                return Err(SchemaError::RequiredFieldMissing(field.to_string()));
            }
        }
        if self.revelation_type.parse::<RevelationType>().is_err() {
            return Err(SchemaError::InvalidValue {
                field: "revelation_type".to_string(),
                value: self.revelation_type.to_string(),
            });
        }
        Ok(())
    }
}

/// Aya (verse) of the Quran.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Sura, foreign_key = sura_number))]
#[diesel(table_name = ayas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Aya {
    pub id: i32,
    pub sura_number: i32,
    pub number: i32,
    pub text: String,
}

impl Aya {
    /// Decorative end-of-aya mark: the verse number in Arabic-Indic
    /// digits between ornate parentheses (U+FD3F / U+FD3E).
    pub fn end_marker(&self) -> String {
        format!("\u{FD3F}{}\u{FD3E}", to_arabic_indic_digits(self.number))
    }

    pub fn reference(&self) -> Reference {
        Reference::Aya {
            sura: self.sura_number,
            number: self.number,
        }
    }
}

impl fmt::Display for Aya {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", unicode_to_buckwalter(&self.text))
    }
}

#[derive(Insertable)]
#[diesel(table_name = ayas)]
pub struct NewAya<'a> {
    pub sura_number: i32,
    pub number: i32,
    pub text: &'a str,
}

impl NewAya<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.text.trim().is_empty() {
            return Err(SchemaError::RequiredFieldMissing("text".to_string()));
        }
        Ok(())
    }
}

/// Metadata relating to a translation of the Quran.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = quran_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuranTranslation {
    pub id: i32,
    pub name: String,
    pub translator: String,
    pub source_name: String,
    pub source_url: String,
}

impl QuranTranslation {
    pub fn reference(&self) -> Reference {
        Reference::Translation { id: self.id }
    }
}

impl fmt::Display for QuranTranslation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Insertable)]
#[diesel(table_name = quran_translations)]
pub struct NewQuranTranslation<'a> {
    pub name: &'a str,
    pub translator: &'a str,
    pub source_name: &'a str,
    pub source_url: &'a str,
}

impl NewQuranTranslation<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (field, value) in [
            ("name", self.name),
            ("translator", self.translator),
            ("source_name", self.source_name),
            ("source_url", self.source_url),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::RequiredFieldMissing(field.to_string()));
            }
        }
        if Url::parse(self.source_url).is_err() {
            return Err(SchemaError::MalformedUrl(self.source_url.to_string()));
        }
        Ok(())
    }
}

/// Translation of an aya in one edition.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Sura, foreign_key = sura_number))]
#[diesel(belongs_to(Aya, foreign_key = aya_id))]
#[diesel(belongs_to(QuranTranslation, foreign_key = translation_id))]
#[diesel(table_name = translated_ayas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TranslatedAya {
    pub id: i32,
    pub sura_number: i32,
    pub aya_id: i32,
    pub translation_id: i32,
    pub text: String,
}

impl fmt::Display for TranslatedAya {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Insertable)]
#[diesel(table_name = translated_ayas)]
pub struct NewTranslatedAya<'a> {
    pub sura_number: i32,
    pub aya_id: i32,
    pub translation_id: i32,
    pub text: &'a str,
}

impl NewTranslatedAya<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.text.trim().is_empty() {
            return Err(SchemaError::RequiredFieldMissing("text".to_string()));
        }
        Ok(())
    }
}

/// Root word. Related to ayas through the words join table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = roots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Root {
    pub id: i32,
    pub letters: String,
}

impl Root {
    pub fn reference(&self) -> Reference {
        Reference::Root { id: self.id }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", unicode_to_buckwalter(&self.letters))
    }
}

#[derive(Insertable)]
#[diesel(table_name = roots)]
pub struct NewRoot<'a> {
    pub letters: &'a str,
}

impl NewRoot<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.letters.trim().is_empty() {
            return Err(SchemaError::RequiredFieldMissing("letters".to_string()));
        }
        if self.letters.chars().count() > MAX_ROOT_LETTERS {
            return Err(SchemaError::InvalidValue {
                field: "letters".to_string(),
                value: self.letters.to_string(),
            });
        }
        Ok(())
    }
}

/// Distinct Arabic word (lemma) in the Quran.
///
/// root_id is nullable, some lemmas have no identified root.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Root, foreign_key = root_id))]
#[diesel(table_name = lemmas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Lemma {
    pub id: i32,
    pub token: String,
    pub root_id: Option<i32>,
}

impl Lemma {
    pub fn reference(&self) -> Reference {
        Reference::Lemma { id: self.id }
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", unicode_to_buckwalter(&self.token))
    }
}

#[derive(Insertable)]
#[diesel(table_name = lemmas)]
pub struct NewLemma<'a> {
    pub token: &'a str,
    pub root_id: Option<i32>,
}

impl NewLemma<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.token.trim().is_empty() {
            return Err(SchemaError::RequiredFieldMissing("token".to_string()));
        }
        Ok(())
    }
}

/// One occurrence of a token at a verse position, linking the surface
/// form to its lemma and root.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Sura, foreign_key = sura_number))]
#[diesel(belongs_to(Aya, foreign_key = aya_id))]
#[diesel(belongs_to(Root, foreign_key = root_id))]
#[diesel(belongs_to(Lemma, foreign_key = lemma_id))]
#[diesel(table_name = words)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Word {
    pub id: i32,
    pub sura_number: i32,
    pub aya_id: i32,
    pub number: i32,
    pub token: String,
    pub root_id: Option<i32>,
    pub lemma_id: i32,
}

impl Word {
    /// The word route addresses by verse number, not row id, so the
    /// owning aya is needed here.
    pub fn reference(&self, aya: &Aya) -> Reference {
        Reference::Word {
            sura: self.sura_number,
            aya: aya.number,
            number: self.number,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", unicode_to_buckwalter(&self.token))
    }
}

#[derive(Insertable)]
#[diesel(table_name = words)]
pub struct NewWord<'a> {
    pub sura_number: i32,
    pub aya_id: i32,
    pub number: i32,
    pub token: &'a str,
    pub root_id: Option<i32>,
    pub lemma_id: i32,
}

impl NewWord<'_> {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.token.trim().is_empty() {
            return Err(SchemaError::RequiredFieldMissing("token".to_string()));
        }
        if self.number < 1 {
            return Err(SchemaError::InvalidValue {
                field: "number".to_string(),
                value: self.number.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_aya() -> Aya {
        Aya {
            id: 1,
            sura_number: 1,
            number: 2,
            text: "\u{0627}\u{0644}\u{062D}\u{0645}\u{062F}".to_string(),
        }
    }

    #[test]
    fn test_end_marker_carries_verse_number() {
        let aya = sample_aya();
        assert_eq!(aya.end_marker(), "\u{FD3F}\u{0662}\u{FD3E}");

        let aya_255 = Aya { number: 255, ..sample_aya() };
        assert_eq!(
            aya_255.end_marker(),
            "\u{FD3F}\u{0662}\u{0665}\u{0665}\u{FD3E}"
        );
    }

    #[test]
    fn test_references() {
        let aya = sample_aya();
        let aya_ref = aya.reference();
        assert_eq!(aya_ref.route(), "quran_aya");
        assert_eq!(aya_ref.args(), vec!["1".to_string(), "2".to_string()]);

        let word = Word {
            id: 9,
            sura_number: 1,
            aya_id: 1,
            number: 3,
            token: "\u{0631}\u{0628}".to_string(),
            root_id: None,
            lemma_id: 4,
        };
        let word_ref = word.reference(&aya);
        assert_eq!(word_ref.route(), "quran_word");
        assert_eq!(
            word_ref.args(),
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_display_is_buckwalter() {
        let aya = sample_aya();
        assert_eq!(format!("{}", aya), "AlHmd");

        let root = Root {
            id: 1,
            letters: "\u{062D}\u{0645}\u{062F}".to_string(),
        };
        assert_eq!(format!("{}", root), "Hmd");
    }

    #[test]
    fn test_new_sura_validation() {
        let mut new_sura = NewSura {
            number: 1,
            name: "\u{0627}\u{0644}\u{0641}\u{0627}\u{062A}\u{062D}\u{0629}",
            tname: "Al-Fatihah",
            ename: "The Opening",
            revelation_order: 5,
            revelation_type: "Meccan",
            rukus: 1,
            bismillah: None,
        };
        assert!(new_sura.validate().is_ok());

        new_sura.revelation_type = "Unknown";
        assert!(matches!(
            new_sura.validate(),
            Err(SchemaError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_new_translation_url_validation() {
        let mut new_trans = NewQuranTranslation {
            name: "Saheeh International",
            translator: "Saheeh International",
            source_name: "Tanzil",
            source_url: "https://tanzil.net/trans/",
        };
        assert!(new_trans.validate().is_ok());

        new_trans.source_url = "not a url";
        assert!(matches!(
            new_trans.validate(),
            Err(SchemaError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_new_root_length_validation() {
        let ok_root = NewRoot { letters: "\u{0633}\u{0645}\u{0648}" };
        assert!(ok_root.validate().is_ok());

        let too_long = NewRoot { letters: "abcdefghijk" };
        assert!(matches!(
            too_long.validate(),
            Err(SchemaError::InvalidValue { .. })
        ));
    }
}
