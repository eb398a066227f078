//! Lunchpick: terminal lunch menu recommender.
//!
//! Without a subcommand, opens the interactive TUI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lunchpick::catalog::{Catalog, Category};
use lunchpick::config::Config;
use lunchpick::logging::{self, LogTarget};
use lunchpick::select::{ExclusionFilter, SelectionFilters, SpinFrame};
use lunchpick::session::{
    IntervalTicker, RecommendOutcome, RecommendationSession, SessionOptions, Ticker,
};
use lunchpick::share;
use lunchpick::taste::{DirStore, PreferenceStore};
use lunchpick::tui::App;

/// lunchpick - what should we eat for lunch?
#[derive(Parser)]
#[command(name = "lunchpick", version)]
#[command(about = "Weighted-random lunch menu recommender", long_about = None)]
struct Cli {
    /// Path to configuration file (default: ~/.lunchpick/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for stored preferences (overrides config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed the random source for repeatable picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive picker
    Tui,
    /// Pick a menu and print it
    Recommend {
        /// Restrict to categories (korean, chinese, japanese, western, snack)
        #[arg(long = "category", short = 'c', value_parser = parse_category)]
        categories: Vec<Category>,
        /// Apply exclusion filters (noSpicy, soupOnly)
        #[arg(long = "filter", short = 'f', value_parser = parse_filter)]
        filters: Vec<ExclusionFilter>,
        /// Print each spin frame
        #[arg(long)]
        animate: bool,
    },
    /// Toggle a like for a menu id
    Like { id: String },
    /// Toggle a dislike for a menu id
    Dislike { id: String },
    /// Show recent recommendations
    History,
    /// List the menu catalog
    Menu {
        #[arg(long = "category", short = 'c', value_parser = parse_category)]
        category: Option<Category>,
    },
    /// Forget all likes, dislikes, and history
    Reset,
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::from_key(s).ok_or_else(|| {
        let keys: Vec<&str> = Category::all().iter().map(|c| c.key()).collect();
        format!("unknown category '{s}' (expected one of: {})", keys.join(", "))
    })
}

fn parse_filter(s: &str) -> Result<ExclusionFilter, String> {
    ExclusionFilter::from_key(s).ok_or_else(|| {
        let keys: Vec<&str> = ExclusionFilter::all().iter().map(|f| f.key()).collect();
        format!("unknown filter '{s}' (expected one of: {})", keys.join(", "))
    })
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("lunchpick: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let data_dir = config.data_dir();

    let command = cli.command.unwrap_or(Commands::Tui);
    match &command {
        Commands::Tui => {
            let log_path = data_dir.join("lunchpick.log");
            if let Err(e) = logging::init(&config.log_level, LogTarget::File(&log_path)) {
                eprintln!("lunchpick: logging disabled ({}): {e}", log_path.display());
            }
        }
        _ => logging::init(&config.log_level, LogTarget::Stderr)?,
    }

    let catalog = Catalog::embedded()?;
    let store = PreferenceStore::load(Box::new(DirStore::new(&data_dir)), config.history_limit);
    let rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let session = RecommendationSession::new(
        catalog,
        store,
        rng,
        IntervalTicker::new(config.spin_interval()),
        SessionOptions::from(&config),
    );

    match command {
        Commands::Tui => {
            let mut app = App::new(session, config.map_search_base.clone());
            let mut terminal = ratatui::init();
            let result = app.run(&mut terminal);
            ratatui::restore();
            result?;
        }
        Commands::Recommend {
            categories,
            filters,
            animate,
        } => {
            let mut selection = if categories.is_empty() {
                SelectionFilters::new()
            } else {
                SelectionFilters::with_categories(categories).unwrap_or_default()
            };
            for filter in filters {
                selection.set_filter(filter, true);
            }
            let mut session = session.with_selection(selection);
            recommend(&mut session, animate, &config.map_search_base);
        }
        Commands::Like { id } => {
            ensure_known(session.catalog(), &id)?;
            let mut session = session;
            let liked = session.like(&id);
            println!("{id}: {}", if liked { "liked" } else { "like removed" });
        }
        Commands::Dislike { id } => {
            ensure_known(session.catalog(), &id)?;
            let mut session = session;
            let disliked = session.dislike(&id);
            println!(
                "{id}: {}",
                if disliked { "disliked" } else { "dislike removed" }
            );
        }
        Commands::History => {
            let history = session.preferences().history();
            if history.is_empty() {
                println!("no recommendations yet");
            }
            for (i, item) in history.iter().enumerate() {
                println!("{}. {} {} ({})", i + 1, item.icon, item.name, item.id);
            }
        }
        Commands::Menu { category } => {
            let prefs = session.preferences();
            for item in session.catalog().items() {
                if category.is_some_and(|c| c != item.category) {
                    continue;
                }
                let mark = if prefs.is_liked(&item.id) {
                    " ♥"
                } else if prefs.is_disliked(&item.id) {
                    " ✕"
                } else {
                    ""
                };
                println!(
                    "{:<18} {} {} ({}) [{}/{}] {}{mark}",
                    item.id,
                    item.icon,
                    item.name,
                    item.name_en,
                    item.category.label(),
                    item.category.label_en(),
                    item.tags.join(", ")
                );
            }
        }
        Commands::Reset => {
            let mut session = session;
            session.preferences_mut().reset()?;
            println!("preferences cleared");
        }
    }
    Ok(())
}

fn ensure_known(catalog: &Catalog, id: &str) -> Result<(), String> {
    match catalog.get(id) {
        Some(_) => Ok(()),
        None => Err(format!("unknown menu id '{id}' (see `lunchpick menu`)")),
    }
}

fn recommend<R: Rng, T: Ticker>(
    session: &mut RecommendationSession<R, T>,
    animate: bool,
    map_search_base: &str,
) {
    match session.recommend() {
        RecommendOutcome::Started => {}
        RecommendOutcome::Busy => return,
        RecommendOutcome::NoCandidates => {
            println!("조건에 맞는 메뉴가 없어요. 필터를 조정해 보세요.");
            return;
        }
    }

    if animate {
        while session.is_spinning() {
            std::thread::sleep(session.until_next_frame());
            if let Some(SpinFrame::Intermediate(item)) = session.tick() {
                println!("  … {}", item.name);
            }
        }
    } else {
        while session.step().is_some() {}
    }

    if let Some(item) = session.result() {
        println!(
            "{} {} / {} ({})",
            item.icon,
            item.name,
            item.name_en,
            item.category.label()
        );
        if !item.description.is_empty() {
            println!("   {}", item.description);
        }
        println!();
        println!("{}", share::share_text(&item.name));
        println!("{}", share::map_search_url(map_search_base, &item.name));
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommend_accepts_filter_keys() {
        let cli = Cli::try_parse_from([
            "lunchpick",
            "recommend",
            "-c",
            "korean",
            "--filter",
            "noSpicy",
            "-f",
            "soup-only",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Recommend {
                categories,
                filters,
                ..
            }) => {
                assert_eq!(categories, vec![Category::Korean]);
                assert_eq!(filters, vec![ExclusionFilter::NoSpicy, ExclusionFilter::SoupOnly]);
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["lunchpick", "recommend", "--filter", "vegan"]).is_err());
        assert!(parse_filter("vegan").unwrap_err().contains("noSpicy"));
    }
}
