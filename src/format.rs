//! Locale-aware rendering of numbers
//!
//! The same text is shown on screen and fed to the speech backend, so the
//! renderings here stay close to what a voice synthesizer reads naturally.

use std::sync::Arc;

use serde::Deserialize;

/// Renders a number as text for a BCP 47 language tag
pub trait NumberFormatter: Send + Sync {
    /// Format `number` for `language` (e.g. "en-US", "zh-TW")
    fn format(&self, number: u64, language: &str) -> String;
}

/// How numbers are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Grouped decimal digits ("4,300,000")
    #[default]
    Digits,
    /// Numeral words ("four million three hundred thousand")
    Words,
}

impl DisplayStyle {
    /// Build the formatter for this style
    #[must_use]
    pub fn formatter(self) -> Arc<dyn NumberFormatter> {
        match self {
            Self::Digits => Arc::new(GroupedDigits),
            Self::Words => Arc::new(NumeralWords),
        }
    }
}

impl std::str::FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "digits" => Ok(Self::Digits),
            "words" => Ok(Self::Words),
            other => Err(format!("unknown display style: {other}")),
        }
    }
}

/// Primary language subtag, lowercased ("zh-TW" -> "zh")
fn primary_subtag(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Decimal digits grouped in thousands
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedDigits;

impl GroupedDigits {
    /// Thousands separator used by `language`
    #[must_use]
    pub fn separator(language: &str) -> &'static str {
        match primary_subtag(language).as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => ".",
            "fr" => "\u{202f}",
            "ru" | "pl" | "sv" | "cs" | "fi" | "nb" | "uk" => "\u{a0}",
            _ => ",",
        }
    }
}

impl NumberFormatter for GroupedDigits {
    fn format(&self, number: u64, language: &str) -> String {
        let separator = Self::separator(language);
        let digits = number.to_string();
        let lead = digits.len() % 3;

        let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - lead) % 3 == 0 {
                out.push_str(separator);
            }
            out.push(ch);
        }
        out
    }
}

/// Numeral words: Chinese for `zh` tags, English otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct NumeralWords;

impl NumberFormatter for NumeralWords {
    fn format(&self, number: u64, language: &str) -> String {
        if primary_subtag(language) == "zh" {
            let simplified = is_simplified(language);
            chinese_words(number, simplified)
        } else {
            english_words(number)
        }
    }
}

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 7] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];

/// English words for `n` ("four quadrillion three hundred trillion")
#[must_use]
pub fn english_words(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut chunks = Vec::new();
    let mut rest = n;
    while rest > 0 {
        chunks.push(rest % 1000);
        rest /= 1000;
    }

    let mut parts = Vec::new();
    for (scale, chunk) in chunks.iter().enumerate().rev() {
        if *chunk == 0 {
            continue;
        }
        parts.push(english_below_thousand(*chunk));
        if !SCALES[scale].is_empty() {
            parts.push(SCALES[scale].to_string());
        }
    }
    parts.join(" ")
}

#[allow(clippy::cast_possible_truncation)]
fn english_below_thousand(n: u64) -> String {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    let mut parts = Vec::new();
    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds]));
    }
    match rest {
        0 => {}
        1..=19 => parts.push(ONES[rest].to_string()),
        _ if rest % 10 == 0 => parts.push(TENS[rest / 10].to_string()),
        _ => parts.push(format!("{}-{}", TENS[rest / 10], ONES[rest % 10])),
    }
    parts.join(" ")
}

const ZH_DIGITS: [char; 10] = ['零', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Whether a `zh` tag asks for simplified characters
fn is_simplified(language: &str) -> bool {
    let lower = language.to_lowercase();
    ["hans", "cn", "sg", "my"]
        .iter()
        .any(|region| lower.split(['-', '_']).skip(1).any(|part| part == *region))
}

/// Chinese numerals grouped by myriads (萬, 億, 兆, 京)
#[must_use]
pub fn chinese_words(n: u64, simplified: bool) -> String {
    if n == 0 {
        return ZH_DIGITS[0].to_string();
    }

    let myriads: [&str; 5] = if simplified {
        ["", "万", "亿", "兆", "京"]
    } else {
        ["", "萬", "億", "兆", "京"]
    };

    let mut groups = Vec::new();
    let mut rest = n;
    while rest > 0 {
        groups.push(rest % 10_000);
        rest /= 10_000;
    }

    let mut out = String::new();
    let mut gap = false;
    for (index, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            gap = !out.is_empty();
            continue;
        }
        if !out.is_empty() && (gap || *group < 1000) {
            out.push(ZH_DIGITS[0]);
        }
        gap = false;
        out.push_str(&chinese_group(*group));
        out.push_str(myriads[index]);
    }

    // 一十二 reads as 十二 at the start
    if out.starts_with("一十") {
        out.remove(0);
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn chinese_group(group: u64) -> String {
    const PLACES: [(u64, &str); 4] = [(1000, "千"), (100, "百"), (10, "十"), (1, "")];

    let mut out = String::new();
    let mut zero_pending = false;
    for (place, name) in PLACES {
        let digit = (group / place % 10) as usize;
        if digit == 0 {
            zero_pending = !out.is_empty();
            continue;
        }
        if zero_pending {
            out.push(ZH_DIGITS[0]);
            zero_pending = false;
        }
        out.push(ZH_DIGITS[digit]);
        out.push_str(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_digits_en() {
        let f = GroupedDigits;
        assert_eq!(f.format(0, "en-US"), "0");
        assert_eq!(f.format(99, "en-US"), "99");
        assert_eq!(f.format(100, "en-US"), "100");
        assert_eq!(f.format(1000, "en-US"), "1,000");
        assert_eq!(f.format(43_000, "en-US"), "43,000");
        assert_eq!(f.format(430_000, "en-US"), "430,000");
        assert_eq!(f.format(4_300_000_000_000_000, "en-US"), "4,300,000,000,000,000");
    }

    #[test]
    fn test_grouped_digits_other_locales() {
        let f = GroupedDigits;
        assert_eq!(f.format(1_500_000, "de-DE"), "1.500.000");
        assert_eq!(f.format(1_500_000, "fr-FR"), "1\u{202f}500\u{202f}000");
        assert_eq!(f.format(1_500_000, "zh-TW"), "1,500,000");
        assert_eq!(f.format(1_500_000, "xx"), "1,500,000");
    }

    #[test]
    fn test_english_words() {
        assert_eq!(english_words(0), "zero");
        assert_eq!(english_words(7), "seven");
        assert_eq!(english_words(40), "forty");
        assert_eq!(english_words(43), "forty-three");
        assert_eq!(english_words(430), "four hundred thirty");
        assert_eq!(english_words(43_000_000), "forty-three million");
        assert_eq!(
            english_words(4_300_000_000_000_000),
            "four quadrillion three hundred trillion"
        );
        assert_eq!(english_words(1_000_001), "one million one");
    }

    #[test]
    fn test_chinese_words() {
        assert_eq!(chinese_words(0, false), "零");
        assert_eq!(chinese_words(12, false), "十二");
        assert_eq!(chinese_words(43, false), "四十三");
        assert_eq!(chinese_words(1005, false), "一千零五");
        assert_eq!(chinese_words(43_000, false), "四萬三千");
        assert_eq!(chinese_words(100_010, false), "十萬零一十");
        assert_eq!(chinese_words(4_300_000_000_000_000, false), "四千三百兆");
        assert_eq!(chinese_words(430_000_000, true), "四亿三千万");
        assert_eq!(chinese_words(100_000_005, false), "一億零五");
    }

    #[test]
    fn test_numeral_words_language_selection() {
        let f = NumeralWords;
        assert_eq!(f.format(43_000, "zh-TW"), "四萬三千");
        assert_eq!(f.format(43_000, "zh-CN"), "四万三千");
        assert_eq!(f.format(43_000, "zh-Hans-CN"), "四万三千");
        assert_eq!(f.format(43_000, "en-US"), "forty-three thousand");
    }

    #[test]
    fn test_display_style_parse() {
        assert_eq!("digits".parse::<DisplayStyle>().unwrap(), DisplayStyle::Digits);
        assert_eq!(" Words ".parse::<DisplayStyle>().unwrap(), DisplayStyle::Words);
        assert!("roman".parse::<DisplayStyle>().is_err());
    }
}
