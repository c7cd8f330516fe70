//! Pairs price tokens with dish names.
//!
//! A menu line usually reads `1. Svíčková na smetaně (1, 3, 7) 189 Kč`, but
//! plenty of pages put the price alone on its own line below the dish. The
//! parser therefore falls back to the few lines above a bare price and picks
//! the most dish-like one.

use crate::domain::model::{ItemType, MenuItem};
use crate::parse::weekday::weekday_from_line;
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;

pub const MIN_PRICE: u32 = 30;
pub const MAX_PRICE: u32 = 500;
pub const MAX_ITEMS: usize = 12;
/// How many preceding lines may supply the name for a bare price.
pub const LOOKBEHIND_LINES: usize = 3;

const SOUP_KEYWORDS: [&str; 7] = ["polévka", "polevka", "soup", "vývar", "vyvar", "krém", "krem"];

const ENGLISH_TOKENS: [&str; 10] = [
    " with ",
    " and ",
    " grilled ",
    " roasted ",
    " soup",
    " chicken",
    " beef",
    " pork",
    " garlic",
    " mushroom",
];

const CZECH_DIACRITICS: &str = "áčďéěíňóřšťúůýž";

/// Weights used to rank candidate names found above a bare price.
///
/// The values were tuned by hand against real pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub czech_diacritics: f64,
    pub english_penalty: f64,
    pub uppercase: f64,
    pub distance_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            czech_diacritics: 3.0,
            english_penalty: 2.0,
            uppercase: 1.0,
            distance_penalty: 0.1,
        }
    }
}

fn currency_price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d{1,4})\s*(?:Kč|CZK)").expect("regex should be valid"))
}

fn dash_price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,4})\s*,-").expect("regex should be valid"))
}

fn ordinal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[.)]\s*").expect("regex should be valid"))
}

fn weight_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b\d+\s?g\b").expect("regex should be valid"))
}

fn numeric_parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\s*(?:\d+\s*,?\s*)+\)").expect("regex should be valid"))
}

fn empty_parens_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\s*\)").expect("regex should be valid"))
}

fn multi_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("regex should be valid"))
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[()\[\],.:;+\-/*]").expect("regex should be valid"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"))
}

/// A price token found on a line: the whole matched text and its value.
fn find_price(line: &str) -> Option<(String, u32)> {
    let caps: Captures = currency_price_re()
        .captures(line)
        .or_else(|| dash_price_re().captures(line))?;
    let token = caps.get(0)?.as_str().to_string();
    let price = caps.get(1)?.as_str().parse::<u32>().ok()?;
    Some((token, price))
}

fn strip_ordinal(line: &str) -> String {
    ordinal_re().replace(line, "").to_string()
}

fn normalize_once(name: &str) -> String {
    let name = weight_re().replace_all(name, " ");
    let name = numeric_parens_re().replace_all(&name, " ");
    let name = empty_parens_re().replace_all(&name, " ");
    let name = multi_space_re().replace_all(&name, " ");
    name.trim().to_string()
}

/// Removes allergen codes, empty parentheses, gram weights and doubled spaces.
///
/// Passes are repeated until nothing changes, so normalizing an already
/// normalized name is a no-op.
pub fn normalize_item_name(name: &str) -> String {
    let mut current = normalize_once(name);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// A name worth showing: has a letter and at least four characters once
/// punctuation is gone.
pub fn is_meaningful_name(name: &str) -> bool {
    if !name.chars().any(char::is_alphabetic) {
        return false;
    }
    let cleaned = punctuation_re().replace_all(name, " ");
    let cleaned = whitespace_re().replace_all(&cleaned, " ");
    cleaned.trim().chars().count() >= 4
}

pub fn is_valid_price(price: u32) -> bool {
    (MIN_PRICE..=MAX_PRICE).contains(&price)
}

pub fn classify(name: &str) -> ItemType {
    let low = name.to_lowercase();
    if SOUP_KEYWORDS.iter().any(|keyword| low.contains(keyword)) {
        ItemType::Soup
    } else {
        ItemType::Main
    }
}

pub fn has_czech_diacritics(value: &str) -> bool {
    value
        .to_lowercase()
        .chars()
        .any(|c| CZECH_DIACRITICS.contains(c))
}

/// Tokens only match whole words: the name is padded with spaces rather than
/// the tokens trimmed, so Czech names such as `Mandlový koláč` are not taken
/// for English just because they contain `and`.
pub fn looks_like_english(value: &str) -> bool {
    let padded = format!(" {} ", value.to_lowercase());
    ENGLISH_TOKENS.iter().any(|token| padded.contains(token))
}

/// Drops repeated name+price pairs (case-insensitive name) and caps the list,
/// keeping first-seen order.
pub fn dedupe_items(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(format!("{}::{}", item.name.to_lowercase(), item.price)))
        .take(MAX_ITEMS)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct ItemParser {
    prefer_czech: bool,
    weights: ScoringWeights,
}

impl ItemParser {
    pub fn new(prefer_czech: bool) -> Self {
        Self {
            prefer_czech,
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<MenuItem> {
        let mut items = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let Some((token, price)) = find_price(line) else {
                continue;
            };

            let without_price = line.replacen(&token, "", 1);
            let mut name = normalize_item_name(strip_ordinal(without_price.trim()).trim());

            if !is_meaningful_name(&name) {
                name = self.best_previous_name(lines, index, false);
            }

            if self.prefer_czech && looks_like_english(&name) {
                let localized = self.best_previous_name(lines, index, true);
                if is_meaningful_name(&localized) {
                    name = localized;
                }
            }

            if name.is_empty() || !is_meaningful_name(&name) || !is_valid_price(price) {
                continue;
            }

            tracing::trace!(name = %name, price, "menu item recognized");
            items.push(MenuItem::new(classify(&name), name, price));
        }

        dedupe_items(items)
    }

    /// Best dish name among the lines just above `index`, or an empty string.
    fn best_previous_name<S: AsRef<str>>(
        &self,
        lines: &[S],
        index: usize,
        reject_english: bool,
    ) -> String {
        let mut best: Option<(f64, String)> = None;

        for offset in 1..=LOOKBEHIND_LINES {
            let Some(line) = index.checked_sub(offset).and_then(|i| lines.get(i)) else {
                continue;
            };
            let cleaned = normalize_item_name(strip_ordinal(line.as_ref().trim()).trim());
            if !is_meaningful_name(&cleaned) || weekday_from_line(&cleaned).is_some() {
                continue;
            }
            let english = looks_like_english(&cleaned);
            if reject_english && english {
                continue;
            }

            let score = self.score(&cleaned, english, offset);
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, cleaned));
            }
        }

        best.map(|(_, name)| name).unwrap_or_default()
    }

    fn score(&self, candidate: &str, english: bool, offset: usize) -> f64 {
        let mut score = 0.0;
        if self.prefer_czech && has_czech_diacritics(candidate) {
            score += self.weights.czech_diacritics;
        }
        if self.prefer_czech && english {
            score -= self.weights.english_penalty;
        }
        if candidate == candidate.to_uppercase() {
            score += self.weights.uppercase;
        }
        score - offset as f64 * self.weights.distance_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Vec<MenuItem> {
        ItemParser::new(false).parse_lines(lines)
    }

    #[test]
    fn test_price_on_same_line() {
        let items = parse(&["1. Svíčková na smetaně, knedlík 189 Kč"]);
        assert_eq!(
            items,
            vec![MenuItem::new(ItemType::Main, "Svíčková na smetaně, knedlík", 189)]
        );
    }

    #[test]
    fn test_price_formats() {
        let items = parse(&[
            "Kuřecí řízek 150 CZK",
            "Smažený sýr 145,-",
            "Hovězí guláš 160 kč",
        ]);
        let prices: Vec<u32> = items.iter().map(|item| item.price).collect();
        assert_eq!(prices, vec![150, 145, 160]);
        assert_eq!(items[1].name, "Smažený sýr");
    }

    #[test]
    fn test_every_valid_price_yields_one_item() {
        for price in [30, 31, 99, 250, 499, 500] {
            let line = format!("Pečená kachna {} Kč", price);
            let items = parse(&[line.as_str()]);
            assert_eq!(items.len(), 1, "price {}", price);
            assert_eq!(items[0].price, price);
        }
    }

    #[test]
    fn test_prices_out_of_range_are_dropped() {
        for price in [0, 5, 29, 501, 999, 1200] {
            let line = format!("Pečená kachna {} Kč", price);
            assert!(parse(&[line.as_str()]).is_empty(), "price {}", price);
        }
    }

    #[test]
    fn test_lines_without_price_are_ignored() {
        assert!(parse(&["Polední menu", "Dobrou chuť", "Tel. 777 123 456"]).is_empty());
    }

    #[test]
    fn test_allergens_and_weights_are_stripped() {
        let items = parse(&["150 g Vepřová panenka (1, 3, 7) () 210 Kč"]);
        assert_eq!(items[0].name, "Vepřová panenka");
    }

    #[test]
    fn test_bare_price_takes_name_from_previous_line() {
        let items = parse(&["Hovězí vývar s nudlemi", "45 Kč"]);
        assert_eq!(items, vec![MenuItem::new(ItemType::Soup, "Hovězí vývar s nudlemi", 45)]);
    }

    #[test]
    fn test_uppercase_candidate_outranks_closer_line() {
        let items = parse(&["SEGEDÍNSKÝ GULÁŠ", "houskový knedlík", "175 Kč"]);
        assert_eq!(items[0].name, "SEGEDÍNSKÝ GULÁŠ");
    }

    #[test]
    fn test_lookbehind_stops_after_three_lines() {
        assert!(parse(&["Guláš s knedlíkem", "---", "...", "!!", "120 Kč"]).is_empty());

        let items = parse(&["Guláš s knedlíkem", "...", "!!", "120 Kč"]);
        assert_eq!(items, vec![MenuItem::new(ItemType::Main, "Guláš s knedlíkem", 120)]);
    }

    #[test]
    fn test_parenthesis_ordinal_is_stripped() {
        let items = parse(&["2) Kuřecí stehno, rýže 165 Kč"]);
        assert_eq!(items, vec![MenuItem::new(ItemType::Main, "Kuřecí stehno, rýže", 165)]);
    }

    #[test]
    fn test_czech_name_containing_and_is_not_english() {
        assert!(!looks_like_english("Mandlový koláč"));
        let items = ItemParser::new(true).parse_lines(&["Rizoto s houbami", "Mandlový koláč 89 Kč"]);
        assert_eq!(items[0].name, "Mandlový koláč");
    }

    #[test]
    fn test_weekday_lines_are_not_names() {
        let items = parse(&["Středa", "129 Kč"]);
        assert!(items.is_empty());
    }

    #[test]
    fn test_prefer_czech_replaces_english_translation() {
        let lines = [
            "Kuřecí prsa s bylinkovým máslem",
            "Chicken breast with herb butter 189 Kč",
        ];
        let plain = ItemParser::new(false).parse_lines(&lines);
        assert_eq!(plain[0].name, "Chicken breast with herb butter");

        let czech = ItemParser::new(true).parse_lines(&lines);
        assert_eq!(czech[0].name, "Kuřecí prsa s bylinkovým máslem");
    }

    #[test]
    fn test_diacritics_weight_only_with_czech_preference() {
        let lines = ["Zelný salát", "PASTA ALFREDO", "149 Kč"];
        assert_eq!(ItemParser::new(false).parse_lines(&lines)[0].name, "PASTA ALFREDO");
        assert_eq!(ItemParser::new(true).parse_lines(&lines)[0].name, "Zelný salát");

        let weights = ScoringWeights {
            czech_diacritics: 0.0,
            ..ScoringWeights::default()
        };
        let items = ItemParser::new(true).with_weights(weights).parse_lines(&lines);
        assert_eq!(items[0].name, "PASTA ALFREDO");
    }

    #[test]
    fn test_soup_classification() {
        assert_eq!(classify("Česnečka"), ItemType::Main);
        assert_eq!(classify("Dýňový krém"), ItemType::Soup);
        assert_eq!(classify("POLÉVKA DNE"), ItemType::Soup);
        assert_eq!(classify("Tomato soup"), ItemType::Soup);
    }

    #[test]
    fn test_duplicates_collapse_in_first_seen_order() {
        let items = parse(&[
            "Smažený řízek 169 Kč",
            "Rajská omáčka 159 Kč",
            "smažený řízek 169 Kč",
            "Smažený řízek 179 Kč",
        ]);
        let names: Vec<(&str, u32)> = items.iter().map(|i| (i.name.as_str(), i.price)).collect();
        assert_eq!(
            names,
            vec![
                ("Smažený řízek", 169),
                ("Rajská omáčka", 159),
                ("Smažený řízek", 179)
            ]
        );
    }

    #[test]
    fn test_output_is_capped_at_twelve() {
        let lines: Vec<String> = (1..=20).map(|i| format!("Jídlo číslo {} za {} Kč", i, 100 + i)).collect();
        let items = parse(&lines.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(items.len(), MAX_ITEMS);
        assert_eq!(items[0].price, 101);
        assert_eq!(items[11].price, 112);
    }

    #[test]
    fn test_meaningful_name() {
        assert!(is_meaningful_name("Guláš"));
        assert!(!is_meaningful_name("0,3"));
        assert!(!is_meaningful_name("a.b."));
        assert!(!is_meaningful_name("1234"));
        assert!(is_meaningful_name("Pho Bo"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "Řízek  (1,3,7)   200g",
            "Kuře (150 g) s rýží",
            "1 (2) g salát",
            "Polévka ( )",
        ] {
            let once = normalize_item_name(raw);
            assert_eq!(normalize_item_name(&once), once, "input {:?}", raw);
            assert!(!once.contains("  "));
        }
    }

    #[test]
    fn test_english_detection() {
        assert!(looks_like_english("Beef with onions"));
        assert!(looks_like_english("Garlic soup"));
        assert!(!looks_like_english("Mandlový koláč"));
        assert!(!looks_like_english("Hovězí guláš"));
    }
}
