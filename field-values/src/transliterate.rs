// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! Folding of text into ASCII, used when a parameter needs an ASCII
//! fallback next to its extended form.

use std::borrow::Cow;

use phf::phf_map;

/// Produces an ASCII approximation of some text. Characters without an
/// approximation may be left untouched.
pub trait Transliterate {
    fn transliterate<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

/// Folds Latin letters with diacritics and the common ligatures to their
/// base letters, e.g. `Ærøskøbing` becomes `AEroskobing`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LatinFolding;

static LATIN_FOLDING_TABLE: phf::Map<char, &'static str> = phf_map!(
    'À' => "A", 'Á' => "A", 'Â' => "A", 'Ã' => "A", 'Ä' => "A", 'Å' => "A",
    'Ā' => "A", 'Ă' => "A", 'Ą' => "A",
    'à' => "a", 'á' => "a", 'â' => "a", 'ã' => "a", 'ä' => "a", 'å' => "a",
    'ā' => "a", 'ă' => "a", 'ą' => "a",
    'Æ' => "AE", 'æ' => "ae",
    'Ç' => "C", 'Ć' => "C", 'Č' => "C", 'Ĉ' => "C", 'Ċ' => "C",
    'ç' => "c", 'ć' => "c", 'č' => "c", 'ĉ' => "c", 'ċ' => "c",
    'Ď' => "D", 'Đ' => "D", 'Ð' => "D",
    'ď' => "d", 'đ' => "d", 'ð' => "d",
    'È' => "E", 'É' => "E", 'Ê' => "E", 'Ë' => "E", 'Ē' => "E", 'Ė' => "E",
    'Ę' => "E", 'Ě' => "E",
    'è' => "e", 'é' => "e", 'ê' => "e", 'ë' => "e", 'ē' => "e", 'ė' => "e",
    'ę' => "e", 'ě' => "e",
    'Ğ' => "G", 'Ģ' => "G", 'ğ' => "g", 'ģ' => "g",
    'Ì' => "I", 'Í' => "I", 'Î' => "I", 'Ï' => "I", 'Ī' => "I", 'Į' => "I",
    'İ' => "I",
    'ì' => "i", 'í' => "i", 'î' => "i", 'ï' => "i", 'ī' => "i", 'į' => "i",
    'ı' => "i",
    'Ķ' => "K", 'ķ' => "k",
    'Ĺ' => "L", 'Ļ' => "L", 'Ľ' => "L", 'Ł' => "L",
    'ĺ' => "l", 'ļ' => "l", 'ľ' => "l", 'ł' => "l",
    'Ñ' => "N", 'Ń' => "N", 'Ņ' => "N", 'Ň' => "N",
    'ñ' => "n", 'ń' => "n", 'ņ' => "n", 'ň' => "n",
    'Ò' => "O", 'Ó' => "O", 'Ô' => "O", 'Õ' => "O", 'Ö' => "O", 'Ø' => "O",
    'Ō' => "O", 'Ő' => "O",
    'ò' => "o", 'ó' => "o", 'ô' => "o", 'õ' => "o", 'ö' => "o", 'ø' => "o",
    'ō' => "o", 'ő' => "o",
    'Œ' => "OE", 'œ' => "oe",
    'Ŕ' => "R", 'Ř' => "R", 'ŕ' => "r", 'ř' => "r",
    'Ś' => "S", 'Ş' => "S", 'Š' => "S", 'Ș' => "S",
    'ś' => "s", 'ş' => "s", 'š' => "s", 'ș' => "s",
    'ß' => "ss", 'ẞ' => "SS",
    'Ţ' => "T", 'Ť' => "T", 'Ț' => "T", 'ţ' => "t", 'ť' => "t", 'ț' => "t",
    'Þ' => "TH", 'þ' => "th",
    'Ù' => "U", 'Ú' => "U", 'Û' => "U", 'Ü' => "U", 'Ū' => "U", 'Ů' => "U",
    'Ű' => "U", 'Ų' => "U",
    'ù' => "u", 'ú' => "u", 'û' => "u", 'ü' => "u", 'ū' => "u", 'ů' => "u",
    'ű' => "u", 'ų' => "u",
    'Ý' => "Y", 'Ÿ' => "Y", 'ý' => "y", 'ÿ' => "y",
    'Ź' => "Z", 'Ż' => "Z", 'Ž' => "Z", 'ź' => "z", 'ż' => "z", 'ž' => "z",
    'Ĳ' => "IJ", 'ĳ' => "ij",
);

impl Transliterate for LatinFolding {
    fn transliterate<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if input.is_ascii() {
            return Cow::Borrowed(input);
        }

        let mut result = String::with_capacity(input.len());
        for character in input.chars() {
            match LATIN_FOLDING_TABLE.get(&character) {
                Some(folded) => result.push_str(folded),
                None => result.push(character),
            }
        }

        Cow::Owned(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_table_folds_to_ascii() {
        for (character, folded) in LATIN_FOLDING_TABLE.entries() {
            assert!(!character.is_ascii());
            assert!(!folded.is_empty() && folded.is_ascii(), "bad folding for {character}");
        }
    }

    #[rstest]
    #[case("report.pdf", "report.pdf")]
    #[case("r\u{e9}sum\u{e9}.pdf", "resume.pdf")]
    #[case("\u{c6}r\u{f8}sk\u{f8}bing", "AEroskobing")]
    #[case("Stra\u{df}e", "Strasse")]
    #[case("\u{141}\u{f3}d\u{17a}", "Lodz")]
    #[case("\u{20ac} rate.txt", "\u{20ac} rate.txt")]
    #[case("\u{65e5}\u{672c}", "\u{65e5}\u{672c}")]
    fn test_latin_folding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(LatinFolding.transliterate(input), expected);
    }

    #[test]
    fn test_ascii_is_borrowed() {
        assert!(matches!(LatinFolding.transliterate("plain"), Cow::Borrowed("plain")));
    }
}
