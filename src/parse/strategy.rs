use crate::domain::model::{ParsedMenu, Source, StrategyKind};
use crate::parse::items::ItemParser;
use crate::parse::text::extract_text_lines;
use crate::parse::weekday::weekday_from_line;
use crate::utils::error::{MenuError, Result};
use chrono::Weekday;
use std::collections::HashMap;

pub const MSG_LOADED: &str = "Načteno.";
pub const MSG_LOADED_UNLABELED: &str =
    "Načteno (stránka neobsahuje označení dnešního dne, zobrazeny rozpoznané položky).";
pub const MSG_NO_MENU_TODAY: &str = "Menu pro dnešní den není na stránce dostupné.";
pub const MSG_NO_WEEKLY_MENU_TODAY: &str = "Týdenní menu pro dnešní den není dostupné.";
pub const MSG_NOT_RECOGNIZED: &str = "Nepodařilo se rozpoznat položky menu.";

/// Parsing strategy of one source, with the options it was configured with.
#[derive(Debug, Clone)]
pub enum ParsingStrategy {
    SingleDay {
        prefer_today_section: bool,
        parser: ItemParser,
    },
    Weekly {
        parser: ItemParser,
    },
}

impl ParsingStrategy {
    pub fn for_source(source: &Source) -> Self {
        let parser = ItemParser::new(source.prefer_czech);
        match source.strategy {
            StrategyKind::SingleDay => ParsingStrategy::SingleDay {
                prefer_today_section: source.prefer_today_section,
                parser,
            },
            StrategyKind::Weekly => ParsingStrategy::Weekly { parser },
        }
    }

    pub fn parse_html(&self, html: &str, today: Weekday) -> Result<ParsedMenu> {
        let lines = extract_text_lines(html);
        self.parse_lines(&lines, today)
    }

    pub fn parse_lines(&self, lines: &[String], today: Weekday) -> Result<ParsedMenu> {
        match self {
            ParsingStrategy::SingleDay {
                prefer_today_section,
                parser,
            } => parse_single_day(lines, today, *prefer_today_section, parser),
            ParsingStrategy::Weekly { parser } => parse_weekly(lines, today, parser),
        }
    }
}

/// Lines grouped under the weekday heading that precedes them.
///
/// A heading seen twice keeps appending to the same section. Lines before the
/// first heading belong to no section.
fn split_into_day_sections(lines: &[String]) -> HashMap<Weekday, Vec<&str>> {
    let mut sections: HashMap<Weekday, Vec<&str>> = HashMap::new();
    let mut current_day = None;

    for line in lines {
        if let Some(day) = weekday_from_line(line) {
            current_day = Some(day);
            sections.entry(day).or_default();
            continue;
        }
        if let Some(day) = current_day {
            sections.entry(day).or_default().push(line);
        }
    }

    sections
}

fn parse_single_day(
    lines: &[String],
    today: Weekday,
    prefer_today_section: bool,
    parser: &ItemParser,
) -> Result<ParsedMenu> {
    let sections = split_into_day_sections(lines);
    let has_day_labels = !sections.is_empty();
    let has_today = sections.contains_key(&today);

    if prefer_today_section && has_day_labels && !has_today {
        return Err(MenuError::no_menu_for_today(MSG_NO_MENU_TODAY));
    }

    let items = if prefer_today_section && has_day_labels {
        parser.parse_lines(sections.get(&today).map(Vec::as_slice).unwrap_or_default())
    } else {
        parser.parse_lines(lines)
    };

    if items.is_empty() {
        return Err(MenuError::extraction(MSG_NOT_RECOGNIZED));
    }

    let message = if has_day_labels && !has_today {
        MSG_LOADED_UNLABELED
    } else {
        MSG_LOADED
    };

    Ok(ParsedMenu {
        items,
        message: message.to_string(),
    })
}

fn parse_weekly(lines: &[String], today: Weekday, parser: &ItemParser) -> Result<ParsedMenu> {
    let mut current_day = None;
    let mut day_lines: Vec<&str> = Vec::new();

    for line in lines {
        if let Some(day) = weekday_from_line(line) {
            current_day = Some(day);
            continue;
        }
        if current_day == Some(today) {
            day_lines.push(line);
        }
    }

    if day_lines.is_empty() {
        return Err(MenuError::no_menu_for_today(MSG_NO_WEEKLY_MENU_TODAY));
    }

    let items = parser.parse_lines(&day_lines);
    if items.is_empty() {
        return Err(MenuError::extraction(MSG_NOT_RECOGNIZED));
    }

    Ok(ParsedMenu {
        items,
        message: MSG_LOADED.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ItemType, MenuItem};

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    fn single_day(prefer_today_section: bool) -> ParsingStrategy {
        ParsingStrategy::SingleDay {
            prefer_today_section,
            parser: ItemParser::new(false),
        }
    }

    fn weekly() -> ParsingStrategy {
        ParsingStrategy::Weekly {
            parser: ItemParser::new(false),
        }
    }

    #[test]
    fn test_weekly_picks_todays_block() {
        let page = lines(&["Pondělí", "Guláš 120 Kč", "Úterý", "Svíčková 180 Kč"]);
        let parsed = weekly().parse_lines(&page, Weekday::Tue).unwrap();
        assert_eq!(parsed.items, vec![MenuItem::new(ItemType::Main, "Svíčková", 180)]);
        assert_eq!(parsed.message, MSG_LOADED);
    }

    #[test]
    fn test_weekly_without_today_block() {
        let page = lines(&["Pondělí", "Guláš 120 Kč"]);
        let err = weekly().parse_lines(&page, Weekday::Wed).unwrap_err();
        assert!(matches!(err, MenuError::NoMenuForToday { .. }));
    }

    #[test]
    fn test_weekly_today_block_without_prices() {
        let page = lines(&["Středa", "Zavřeno z technických důvodů"]);
        let err = weekly().parse_lines(&page, Weekday::Wed).unwrap_err();
        assert!(matches!(err, MenuError::Extraction { .. }));
    }

    #[test]
    fn test_single_day_refuses_other_days_menu() {
        let page = lines(&["Středa", "Rizoto s houbami 145 Kč"]);
        let err = single_day(true).parse_lines(&page, Weekday::Mon).unwrap_err();
        assert!(matches!(err, MenuError::NoMenuForToday { .. }));
        assert_eq!(err.to_string(), MSG_NO_MENU_TODAY);
    }

    #[test]
    fn test_single_day_restricts_to_today_section() {
        let page = lines(&[
            "Polední menu",
            "Pondělí",
            "Čočka na kyselo 129 Kč",
            "Úterý",
            "Hovězí líčka 199 Kč",
            "Středa",
            "Pečené koleno 219 Kč",
        ]);
        let parsed = single_day(true).parse_lines(&page, Weekday::Tue).unwrap();
        assert_eq!(parsed.items, vec![MenuItem::new(ItemType::Main, "Hovězí líčka", 199)]);
        assert_eq!(parsed.message, MSG_LOADED);
    }

    #[test]
    fn test_single_day_without_preference_uses_whole_page() {
        let page = lines(&["Středa", "Rizoto s houbami 145 Kč"]);
        let parsed = single_day(false).parse_lines(&page, Weekday::Mon).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.message, MSG_LOADED_UNLABELED);
    }

    #[test]
    fn test_single_day_page_without_labels() {
        let page = lines(&["Denní menu", "Kulajda 59 Kč", "Vepřo knedlo zelo 169 Kč"]);
        let parsed = single_day(true).parse_lines(&page, Weekday::Thu).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].item_type, ItemType::Main);
        assert_eq!(parsed.message, MSG_LOADED);
    }

    #[test]
    fn test_single_day_nothing_recognized() {
        let page = lines(&["Dnes vaříme jen pro objednané skupiny"]);
        let err = single_day(false).parse_lines(&page, Weekday::Thu).unwrap_err();
        assert!(matches!(err, MenuError::Extraction { .. }));
    }

    #[test]
    fn test_parse_html_end_to_end() {
        let html = r#"<table>
            <tr><th>Čtvrtek</th></tr>
            <tr><td>Polévka: Dršťková</td><td>55 Kč</td></tr>
            <tr><td>1. Kuřecí řízek, bramborový salát (1,3,7)</td><td>165,-</td></tr>
        </table>"#;
        let strategy = ParsingStrategy::for_source(&Source {
            id: "t".to_string(),
            name: "T".to_string(),
            url: "https://t.example".to_string(),
            strategy: StrategyKind::SingleDay,
            prefer_today_section: true,
            prefer_czech: false,
        });
        let parsed = strategy.parse_html(html, Weekday::Thu).unwrap();
        assert_eq!(
            parsed.items,
            vec![
                MenuItem::new(ItemType::Soup, "Polévka: Dršťková", 55),
                MenuItem::new(ItemType::Main, "Kuřecí řízek, bramborový salát", 165),
            ]
        );
    }
}
