//! Buckwalter transliteration of Arabic text.
//!
//! Characters outside the tables pass through unchanged, so both
//! directions are total functions and transliterating already-ASCII
//! output again is a no-op.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    static ref UNICODE_TO_BUCKWALTER: HashMap<char, char> = {
        let mut map = HashMap::new();
        map.insert('\u{0621}', '\''); // hamza
        map.insert('\u{0622}', '|'); // alef with madda above
        map.insert('\u{0623}', '>'); // alef with hamza above
        map.insert('\u{0624}', '&'); // waw with hamza above
        map.insert('\u{0625}', '<'); // alef with hamza below
        map.insert('\u{0626}', '}'); // yeh with hamza above
        map.insert('\u{0627}', 'A'); // alef
        map.insert('\u{0628}', 'b'); // beh
        map.insert('\u{0629}', 'p'); // teh marbuta
        map.insert('\u{062A}', 't'); // teh
        map.insert('\u{062B}', 'v'); // theh
        map.insert('\u{062C}', 'j'); // jeem
        map.insert('\u{062D}', 'H'); // hah
        map.insert('\u{062E}', 'x'); // khah
        map.insert('\u{062F}', 'd'); // dal
        map.insert('\u{0630}', '*'); // thal
        map.insert('\u{0631}', 'r'); // reh
        map.insert('\u{0632}', 'z'); // zain
        map.insert('\u{0633}', 's'); // seen
        map.insert('\u{0634}', '$'); // sheen
        map.insert('\u{0635}', 'S'); // sad
        map.insert('\u{0636}', 'D'); // dad
        map.insert('\u{0637}', 'T'); // tah
        map.insert('\u{0638}', 'Z'); // zah
        map.insert('\u{0639}', 'E'); // ain
        map.insert('\u{063A}', 'g'); // ghain
        map.insert('\u{0640}', '_'); // tatweel
        map.insert('\u{0641}', 'f'); // feh
        map.insert('\u{0642}', 'q'); // qaf
        map.insert('\u{0643}', 'k'); // kaf
        map.insert('\u{0644}', 'l'); // lam
        map.insert('\u{0645}', 'm'); // meem
        map.insert('\u{0646}', 'n'); // noon
        map.insert('\u{0647}', 'h'); // heh
        map.insert('\u{0648}', 'w'); // waw
        map.insert('\u{0649}', 'Y'); // alef maksura
        map.insert('\u{064A}', 'y'); // yeh
        map.insert('\u{064B}', 'F'); // fathatan
        map.insert('\u{064C}', 'N'); // dammatan
        map.insert('\u{064D}', 'K'); // kasratan
        map.insert('\u{064E}', 'a'); // fatha
        map.insert('\u{064F}', 'u'); // damma
        map.insert('\u{0650}', 'i'); // kasra
        map.insert('\u{0651}', '~'); // shadda
        map.insert('\u{0652}', 'o'); // sukun
        map.insert('\u{0670}', '`'); // superscript alef
        map.insert('\u{0671}', '{'); // alef wasla
        map
    };

    static ref BUCKWALTER_TO_UNICODE: HashMap<char, char> = {
        UNICODE_TO_BUCKWALTER.iter().map(|(u, b)| (*b, *u)).collect()
    };
}

pub fn unicode_to_buckwalter(text: &str) -> String {
    text.chars()
        .map(|c| UNICODE_TO_BUCKWALTER.get(&c).copied().unwrap_or(c))
        .collect()
}

pub fn buckwalter_to_unicode(text: &str) -> String {
    text.chars()
        .map(|c| BUCKWALTER_TO_UNICODE.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Renders a non-negative number with Arabic-Indic digits (U+0660..U+0669).
pub fn to_arabic_indic_digits(number: i32) -> String {
    number
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basmala_to_buckwalter() {
        // First words of the basmala, fully vocalized
        let arabic = "\u{0628}\u{0650}\u{0633}\u{0652}\u{0645}\u{0650} \u{0627}\u{0644}\u{0644}\u{0651}\u{064E}\u{0647}\u{0650}";
        assert_eq!(unicode_to_buckwalter(arabic), "bisomi All~ahi");
    }

    #[test]
    fn test_round_trip() {
        let arabic = "\u{0628}\u{0650}\u{0633}\u{0652}\u{0645}\u{0650}";
        let ascii = unicode_to_buckwalter(arabic);
        assert_eq!(buckwalter_to_unicode(&ascii), arabic);
    }

    #[test]
    fn test_idempotent_on_ascii_output() {
        let ascii = unicode_to_buckwalter("\u{0633}\u{0645}\u{0648}");
        assert_eq!(ascii, "smw");
        // Output contains no Arabic, transliterating again changes nothing
        assert_eq!(unicode_to_buckwalter(&ascii), ascii);
    }

    #[test]
    fn test_unknown_chars_pass_through() {
        assert_eq!(unicode_to_buckwalter("abc 123"), "abc 123");
        assert_eq!(buckwalter_to_unicode("123"), "123");
    }

    #[test]
    fn test_arabic_indic_digits() {
        assert_eq!(to_arabic_indic_digits(7), "\u{0667}");
        assert_eq!(to_arabic_indic_digits(286), "\u{0662}\u{0668}\u{0666}");
    }
}
