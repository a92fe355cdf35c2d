mod alias_index;
mod config;
mod country_cache;
mod engine;
mod i18n;
mod storage;
mod suggest;
mod watch;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::Path;

use config::Config;
use engine::{Track, Translation};
use i18n::I18n;
use storage::CountryTable;
use suggest::Suggester;

#[derive(Parser)]
#[command(name = "nt")]
#[command(about = "")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a name once and print both translations
    Lookup {
        /// Character name in Chinese (canonical name or alias)
        #[arg(required = true)]
        name: String,
    },
    /// Show the record behind a name (country, HID, known names)
    Info {
        /// Character name in Chinese (canonical name or alias)
        #[arg(required = true)]
        name: String,
    },
    /// List country tables found in the database directory
    Countries,
    /// Translate interactively as you type
    Watch,
}

fn main() -> Result<()> {
    // First try to parse arguments to check if it's a help request
    let args: Vec<String> = std::env::args().collect();

    // Check if help is requested
    let needs_help = args.contains(&"--help".to_string())
        || args.contains(&"-h".to_string())
        || args.len() == 1
        || (args.len() >= 2 && args[1] == "help");

    if needs_help {
        // If it's a help request, load config first then display help
        let config = Config::new()?;
        let i18n = I18n::new(&config.get_effective_language());
        print_help(&i18n);
        return Ok(());
    }

    // If user typed `nt lookup` or `nt info` without a name, show help instead of an error.
    if args.len() == 2 && (args[1] == "lookup" || args[1] == "info") {
        let config = Config::new()?;
        let i18n = I18n::new(&config.get_effective_language());
        print_help(&i18n);
        return Ok(());
    }

    // Normal parsing and command processing
    let cli = Cli::parse();
    let config = Config::new()?;
    let i18n = I18n::new(&config.get_effective_language());
    let data_dir = config.effective_data_dir();
    let suggester = Suggester::new();

    match cli.command {
        Commands::Lookup { name } => {
            let mut tracks = load_tracks(&config, &data_dir, &i18n);
            run_lookup(&name, &mut tracks, &suggester, &config, &i18n);
        }
        Commands::Info { name } => {
            let tracks = load_tracks(&config, &data_dir, &i18n);
            run_info(&name, &tracks, &suggester, &config, &i18n);
        }
        Commands::Countries => {
            run_countries(&config, &data_dir, &i18n)?;
        }
        Commands::Watch => {
            let mut tracks = load_tracks(&config, &data_dir, &i18n);
            watch::run(
                &mut tracks,
                &suggester,
                &i18n,
                config.effective_alt_screen(),
                config.display.max_suggestions,
            )?;
        }
    }

    Ok(())
}

fn load_tracks(config: &Config, data_dir: &Path, i18n: &I18n) -> [Track; 2] {
    let prefix = &config.database.country_prefix;
    [
        Track::load(
            "track_en",
            &data_dir.join(&config.database.en_dict),
            data_dir,
            prefix,
            i18n,
        ),
        Track::load(
            "track_kr",
            &data_dir.join(&config.database.kr_dict),
            data_dir,
            prefix,
            i18n,
        ),
    ]
}

fn run_lookup(
    name: &str,
    tracks: &mut [Track; 2],
    suggester: &Suggester,
    config: &Config,
    i18n: &I18n,
) {
    for track in tracks.iter() {
        if let Some(err) = &track.load_error {
            eprintln!("{}", err.red());
        }
    }

    let mut all_missed = true;
    for track in tracks.iter_mut() {
        let outcome = track.translate(name, i18n);
        let rendered = match &outcome {
            Translation::Found(text) => text.green().bold().to_string(),
            Translation::TableMissing => outcome.render(i18n).red().to_string(),
            Translation::NoMatch => outcome.render(i18n).yellow().to_string(),
            Translation::Empty => String::new(),
        };
        println!("{}: {}", track.label.cyan(), rendered);
        if !matches!(outcome, Translation::NoMatch) {
            all_missed = false;
        }
    }

    if all_missed {
        print_suggestions(name, tracks, suggester, config, i18n);
    }
}

fn run_info(
    name: &str,
    tracks: &[Track; 2],
    suggester: &Suggester,
    config: &Config,
    i18n: &I18n,
) {
    // The English-track dictionary is the primary one; fall back to the
    // Korean track for names only it knows.
    let hit = tracks
        .iter()
        .find_map(|track| track.index.get(name).map(|record| (track, record)));

    match hit {
        Some((track, record)) => {
            println!("{}: {}", i18n.t("info_country").cyan(), record.country);
            println!("{}: {}", i18n.t("info_hid").cyan(), record.hid);
            let names = track.index.names_of(record);
            println!("{}: {}", i18n.t("info_names").cyan(), names.join("  "));
        }
        None => {
            println!("{}", i18n.t_format("info_not_found", &[name]).yellow());
            print_suggestions(name, tracks, suggester, config, i18n);
        }
    }
}

fn run_countries(config: &Config, data_dir: &Path, i18n: &I18n) -> Result<()> {
    let prefix = &config.database.country_prefix;

    let mut table_files: Vec<String> = Vec::new();
    let entries =
        std::fs::read_dir(data_dir).with_context(|| data_dir.display().to_string())?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        // The two track dictionaries share the prefix but are not country tables
        if file_name == config.database.en_dict || file_name == config.database.kr_dict {
            continue;
        }
        if let Some(stem) = file_name
            .strip_suffix(".json")
            .and_then(|s| s.strip_prefix(prefix.as_str()))
        {
            if !stem.is_empty() {
                table_files.push(stem.to_string());
            }
        }
    }

    if table_files.is_empty() {
        println!("{}", i18n.t("countries_none").yellow());
        return Ok(());
    }

    table_files.sort();
    println!(
        "{}",
        i18n.t_format("countries_header", &[&data_dir.display().to_string()])
            .bold()
    );
    for country in table_files {
        let path = data_dir.join(format!("{}{}.json", prefix, country));
        match std::fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|c| serde_json::from_str::<CountryTable>(&c).map_err(Into::into))
        {
            Ok(table) => {
                println!(
                    "  {}",
                    i18n.t_format("countries_entry", &[&country, &table.len().to_string()])
                );
            }
            Err(err) => {
                println!(
                    "  {}",
                    i18n.t_format("countries_invalid", &[&country, &err.to_string()])
                        .yellow()
                );
            }
        }
    }

    Ok(())
}

fn print_suggestions(
    name: &str,
    tracks: &[Track; 2],
    suggester: &Suggester,
    config: &Config,
    i18n: &I18n,
) {
    let mut names: Vec<&str> = tracks.iter().flat_map(|t| t.index.names()).collect();
    names.sort_unstable();
    names.dedup();

    let suggestions =
        suggester.suggest(name, names.into_iter(), config.display.max_suggestions);
    if !suggestions.is_empty() {
        println!(
            "{}",
            i18n.t_format("did_you_mean", &[&suggestions.join("  ")])
                .dimmed()
        );
    }
}

fn print_help(i18n: &I18n) {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1
        || (args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help"))
    {
        // Main help
        println!("{}", i18n.t("help_about"));
        println!();
        println!("{} nt <COMMAND>", i18n.t("help_label_usage"));
        println!();
        println!("{}", i18n.t("help_label_commands"));
        println!("  {}     {}", "lookup".green(), i18n.t("help_lookup"));
        println!("  {}       {}", "info".green(), i18n.t("help_info"));
        println!("  {}  {}", "countries".green(), i18n.t("help_countries"));
        println!("  {}      {}", "watch".green(), i18n.t("help_watch"));
        println!(
            "  {}       Print this message or the help of the given subcommand(s)",
            "help".green()
        );
        println!();
        println!("{}", i18n.t("help_label_options"));
        println!("  -h, --help  Print help");
        println!();
        println!("{}", i18n.t("help_config_section"));
        println!("  - {}", i18n.t("help_config_dir"));
        println!("  - {}", i18n.t("help_config_language"));
        println!("  - {}", i18n.t("help_config_alt_screen"));
    } else if args.len() >= 2 {
        match args[1].as_str() {
            "lookup" => {
                println!("{}", i18n.t("help_lookup"));
                println!();
                println!("{} nt lookup <NAME>", i18n.t("help_label_usage"));
                println!();
                println!("{}", i18n.t("help_label_arguments"));
                println!("  <NAME>  {}", i18n.t("help_lookup_arg"));
                println!();
                println!("{}", i18n.t("help_label_options"));
                println!("  -h, --help  Print help");
            }
            "info" => {
                println!("{}", i18n.t("help_info"));
                println!();
                println!("{} nt info <NAME>", i18n.t("help_label_usage"));
                println!();
                println!("{}", i18n.t("help_label_arguments"));
                println!("  <NAME>  {}", i18n.t("help_lookup_arg"));
                println!();
                println!("{}", i18n.t("help_label_options"));
                println!("  -h, --help  Print help");
            }
            "countries" => {
                println!("{}", i18n.t("help_countries"));
                println!();
                println!("{} nt countries", i18n.t("help_label_usage"));
                println!();
                println!("{}", i18n.t("help_label_options"));
                println!("  -h, --help  Print help");
            }
            "watch" => {
                println!("{}", i18n.t("help_watch"));
                println!();
                println!("{} nt watch", i18n.t("help_label_usage"));
                println!();
                println!("{}", i18n.t("help_label_options"));
                println!("  -h, --help  Print help");
                println!();
                println!("{}", i18n.t("help_config_section"));
                println!("  - {}", i18n.t("help_config_alt_screen"));
            }
            _ => {
                // Unknown subcommand, show main help
                println!("{}", i18n.t("help_about"));
                println!();
                println!("{} nt <COMMAND>", i18n.t("help_label_usage"));
                println!();
                println!("{}", i18n.t("help_label_commands"));
                println!("  {}     {}", "lookup".green(), i18n.t("help_lookup"));
                println!("  {}       {}", "info".green(), i18n.t("help_info"));
                println!("  {}  {}", "countries".green(), i18n.t("help_countries"));
                println!("  {}      {}", "watch".green(), i18n.t("help_watch"));
                println!();
                println!("{}", i18n.t("help_label_options"));
                println!("  -h, --help  Print help");
            }
        }
    }
}
