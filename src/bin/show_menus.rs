use anyhow::Result;
use clap::Parser;
use menicka::config::toml_config::TomlConfig;
use menicka::config::AppConfig;
use menicka::core::ConfigProvider;
use menicka::display::{
    with_fallback, DisplayContext, Favorites, JsonFileStore, SnapshotView, SortOrder,
};
use menicka::parse::weekday::current_weekday;
use menicka::utils::logger;

#[derive(Parser)]
#[command(name = "show-menus")]
#[command(about = "Prints today's menus from a snapshot, highlighting favorite dishes")]
struct Args {
    /// Snapshot written by `menicka`
    #[arg(short, long, default_value = "./public/data/menus.json")]
    snapshot: String,

    /// Where favorite keywords are kept between runs
    #[arg(long, default_value = "./favorites.json")]
    favorites_file: String,

    /// Replace the stored favorites, e.g. "svíčková, guláš"
    #[arg(long)]
    set_favorites: Option<String>,

    /// Only show restaurants whose name contains this text
    #[arg(short, long)]
    filter: Option<String>,

    /// Item order: document, name or price
    #[arg(long, default_value = "document")]
    sort: SortOrder,

    /// TOML file providing the fallback menus
    #[arg(short, long)]
    config: Option<String>,

    /// Show empty menus as they are instead of substituting the sample menu
    #[arg(long)]
    no_fallback: bool,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let mut store = JsonFileStore::new(&args.favorites_file);
    let favorites = match &args.set_favorites {
        Some(input) => {
            let favorites = Favorites::parse(input);
            favorites.save(&mut store)?;
            tracing::info!("⭐ Favorites saved to {}", store.path().display());
            favorites
        }
        None => Favorites::load(&store)?,
    };

    let view = match SnapshotView::from_file(&args.snapshot) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("❌ Nepodařilo se načíst data menu: {}", e);
            std::process::exit(1);
        }
    };

    match &view.generated_at {
        Some(at) => println!("Poslední aktualizace: {}", at),
        None => println!("Data načtena."),
    }
    if !favorites.is_empty() {
        println!("Oblíbené: {}", favorites);
    }
    println!();

    let menus = if args.no_fallback {
        view.menus
    } else {
        let config = match &args.config {
            Some(path) => TomlConfig::from_file(path)?.into_app_config(),
            None => AppConfig::default(),
        };
        // The snapshot's weekday goes stale when later runs found nothing new.
        let today = current_weekday();
        if view.weekday.is_some_and(|day| day != today) {
            tracing::debug!("Snapshot was generated on {:?}, today is {:?}", view.weekday, today);
        }
        view.menus
            .into_iter()
            .map(|menu| with_fallback(menu, config.fallback_menus(), today))
            .collect()
    };

    let mut context = DisplayContext::new(favorites).with_sort(args.sort);
    if let Some(filter) = args.filter {
        context = context.with_filter(filter);
    }

    let cards = context.cards(&menus);
    if cards.is_empty() {
        println!("Nebyla nalezena žádná menu podle zvoleného filtru.");
        return Ok(());
    }

    for card in cards {
        println!("{}", card);
    }

    Ok(())
}
