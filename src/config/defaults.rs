use crate::core::fallback::FallbackMenus;
use crate::domain::model::{ItemType, MenuItem, Source, StrategyKind};

fn source(id: &str, name: &str, url: &str, strategy: StrategyKind) -> Source {
    Source {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        strategy,
        prefer_today_section: false,
        prefer_czech: false,
    }
}

/// Restaurants scraped when no configuration file is given.
pub fn default_sources() -> Vec<Source> {
    vec![
        source(
            "bife-restaurant",
            "Bife Restaurant",
            "https://biferestaurant.cz/pages/denni-menu",
            StrategyKind::SingleDay,
        ),
        Source {
            prefer_today_section: true,
            prefer_czech: true,
            ..source(
                "corleone-andel",
                "Corleone Anděl",
                "https://www.corleone.cz/poledni-menu-andel",
                StrategyKind::SingleDay,
            )
        },
        source(
            "smichovna",
            "Smíchovna",
            "https://www.smichovna.cz/tydenni-nabidka",
            StrategyKind::Weekly,
        ),
        Source {
            prefer_today_section: true,
            ..source(
                "smichovska-formanka",
                "Smíchovská Formanka",
                "http://smichovskaformanka.cz/",
                StrategyKind::SingleDay,
            )
        },
        source(
            "u-mamlasu",
            "U Mámy Lásu",
            "https://www.umamlasu.cz/denni-menu-praha",
            StrategyKind::SingleDay,
        ),
    ]
}

fn soup(name: &str, price: u32) -> MenuItem {
    MenuItem::new(ItemType::Soup, name, price)
}

fn main_dish(name: &str, price: u32) -> MenuItem {
    MenuItem::new(ItemType::Main, name, price)
}

pub fn default_fallback_menus() -> FallbackMenus {
    let mut menus = FallbackMenus::default();
    menus.insert(
        "bife-restaurant",
        vec![
            soup("Drůbeží vývar se zeleninou", 49),
            main_dish("Kuřecí steak, pepřová omáčka, hranolky", 179),
            main_dish("Smažený sýr, vařené brambory, tatarská omáčka", 169),
        ],
    );
    menus.insert(
        "corleone-andel",
        vec![
            soup("Rajčatová polévka s bazalkou", 45),
            main_dish("Spaghetti Bolognese", 185),
            main_dish("Pizza Prosciutto", 195),
        ],
    );
    menus.insert(
        "smichovna",
        vec![
            soup("Hovězí vývar s nudlemi", 45),
            main_dish("Svíčková na smetaně, houskový knedlík", 199),
            main_dish("Vepřový řízek, bramborový salát", 189),
        ],
    );
    // Bramboračka is a soup even though no soup keyword gives it away.
    menus.insert(
        "smichovska-formanka",
        vec![
            soup("Bramboračka", 42),
            main_dish("Segedínský guláš, houskový knedlík", 175),
            main_dish("Kuřecí nudličky na kari, rýže", 172),
        ],
    );
    menus.insert(
        "u-mamlasu",
        vec![
            soup("Česnečka se sýrem", 49),
            main_dish("Vídeňský řízek z vepřové kýty, bramborová kaše", 189),
            main_dish("Penne arrabbiata", 169),
        ],
    );
    menus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::validate_sources;
    use chrono::Weekday;

    #[test]
    fn test_default_sources_are_valid() {
        assert!(validate_sources(&default_sources()).is_ok());
    }

    #[test]
    fn test_every_default_source_has_a_fallback() {
        let fallbacks = default_fallback_menus();
        for source in default_sources() {
            assert!(
                fallbacks.for_day(&source.id, Weekday::Mon).is_some(),
                "missing fallback for {}",
                source.id
            );
        }
    }
}
