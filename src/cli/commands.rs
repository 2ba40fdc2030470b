use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};

use crate::catalog::{Catalog, CatalogLookup};
use crate::filters::{CategoryFilter, filter_symptoms};
use crate::models::{AnalysisResult, AnalysisSummary, Severity, SymptomId};
use crate::session::Session;
use crate::storage::FileStore;
use crate::utils::{get_catalog_path, get_data_dir};

#[derive(Parser)]
#[command(name = "symptom-insight")]
#[command(version = "0.1.0")]
#[command(about = "Cross-reference reported symptoms against a reference catalog", long_about = None)]
pub struct Cli {
    /// Catalog JSON file to use instead of the built-in catalog
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Directory for history, bookmarks and preferences
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List catalog symptoms, optionally filtered
    Symptoms {
        /// Case-insensitive substring of the symptom name
        #[arg(short, long, default_value = "")]
        search: String,
        /// Category to show, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List symptom categories
    Categories,
    /// Analyze symptoms given as ID or ID:SEVERITY (mild, moderate, severe)
    Analyze {
        #[arg(required = true, value_name = "ID[:SEVERITY]", value_parser = parse_symptom_arg)]
        symptoms: Vec<SymptomArg>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write a plain-text report to this file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Show, restore or delete past analyses
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or toggle bookmarked symptoms
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Show or set how analysis results are displayed
    View {
        mode: Option<ViewMode>,
    },
    /// Interactive symptom picker
    Tui,
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved analyses, newest first
    List,
    /// Re-display a saved analysis without recording a new one
    Restore { id: u64 },
    /// Delete a saved analysis
    Delete { id: u64 },
    /// Delete all saved analyses
    Clear,
}

#[derive(Subcommand)]
pub enum BookmarkAction {
    /// List bookmarked symptoms
    List,
    /// Add or remove a bookmark
    Toggle { id: SymptomId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    Detailed,
    Compact,
}

/// A symptom id with an optional severity, as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomArg {
    pub id: SymptomId,
    pub severity: Option<Severity>,
}

fn parse_symptom_arg(raw: &str) -> Result<SymptomArg, String> {
    let (id_part, severity_part) = match raw.split_once(':') {
        Some((id, severity)) => (id, Some(severity)),
        None => (raw, None),
    };
    let id = id_part.parse::<SymptomId>().map_err(|e| format!("Invalid symptom id '{}': {}", id_part, e))?;
    let severity = severity_part.map(str::parse::<Severity>).transpose()?;
    Ok(SymptomArg { id, severity })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Symptoms { ref search, ref category, json }) => {
            let catalog = load_catalog(&cli)?;
            let session = open_session(&cli, catalog)?;
            show_symptoms(&session, search, category, json)?;
        }
        Some(Commands::Categories) => {
            let catalog = load_catalog(&cli)?;
            show_categories(&catalog);
        }
        Some(Commands::Analyze { ref symptoms, json, ref export }) => {
            let mut session = open_session(&cli, load_catalog(&cli)?)?;
            analyze(&mut session, symptoms, json, export.as_ref())?;
        }
        Some(Commands::History { ref action }) => {
            let mut session = open_session(&cli, load_catalog(&cli)?)?;
            history(&mut session, action)?;
        }
        Some(Commands::Bookmarks { ref action }) => {
            let mut session = open_session(&cli, load_catalog(&cli)?)?;
            bookmarks(&mut session, action)?;
        }
        Some(Commands::View { mode }) => {
            let mut session = open_session(&cli, load_catalog(&cli)?)?;
            if let Some(mode) = mode {
                session.set_display_detailed(mode == ViewMode::Detailed);
            }
            let current = if session.display_detailed() { "detailed" } else { "compact" };
            println!("Result view: {}", current);
        }
        Some(Commands::Tui) => {
            let session = open_session(&cli, load_catalog(&cli)?)?;
            crate::tui::run_interactive(session)?;
        }
        None => {
            if std::io::stdout().is_terminal() && std::io::stdin().is_terminal() {
                let session = open_session(&cli, load_catalog(&cli)?)?;
                crate::tui::run_interactive(session)?;
            } else {
                println!("Use --help for usage information");
            }
        }
    }

    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match get_catalog_path(cli.catalog.clone()) {
        Some(path) => Catalog::from_path(&path)
            .with_context(|| format!("Failed to load catalog from {}", path.display())),
        None => Catalog::builtin().context("Failed to load built-in catalog"),
    }
}

fn open_session(cli: &Cli, catalog: Catalog) -> Result<Session<FileStore>> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => get_data_dir()?,
    };
    Ok(Session::new(catalog, FileStore::new(data_dir)))
}

fn show_symptoms(
    session: &Session<FileStore>,
    search: &str,
    category: &str,
    json: bool,
) -> Result<()> {
    let filter: CategoryFilter = category.parse().unwrap_or_default();
    let symptoms = filter_symptoms(session.catalog().symptoms(), search, &filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&symptoms)?);
        return Ok(());
    }

    if symptoms.is_empty() {
        println!("No symptoms match (search: '{}', category: {})", search, filter);
        return Ok(());
    }
    for symptom in symptoms {
        let mark = if session.is_bookmarked(symptom.id) { "*" } else { " " };
        println!("{} {:>4}  {:<24} {}", mark, symptom.id, symptom.name, symptom.category);
    }
    Ok(())
}

fn show_categories(catalog: &Catalog) {
    for category in catalog.categories() {
        let count = catalog.symptoms().iter().filter(|s| s.category == category).count();
        println!("{:<20} {} symptoms", category, count);
    }
}

fn analyze(
    session: &mut Session<FileStore>,
    symptoms: &[SymptomArg],
    json: bool,
    export: Option<&PathBuf>,
) -> Result<()> {
    for arg in symptoms {
        if session.catalog().symptom(arg.id).is_none() {
            bail!("Unknown symptom id {} (see `symptom-insight symptoms`)", arg.id);
        }
        // Repeating an id updates its severity instead of deselecting it
        if !session.selection().is_selected(arg.id) {
            session.toggle_selection(arg.id);
        }
        if arg.severity.is_some() {
            session.set_severity(arg.id, arg.severity);
        }
    }

    session.analyze()?;
    print_analysis(session, json)?;

    if let Some(path) = export {
        let report = session.export_report(Utc::now()).unwrap_or_default();
        fs::write(path, report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        if !json {
            println!("Report written to {}", path.display());
        }
    }
    Ok(())
}

fn history(session: &mut Session<FileStore>, action: &HistoryAction) -> Result<()> {
    match action {
        HistoryAction::List => {
            if session.history().is_empty() {
                println!("No saved analyses");
            }
            for entry in session.history() {
                let symptoms = entry
                    .symptoms
                    .iter()
                    .map(|s| format!("{} ({})", s.name, Severity::label_of(s.severity)))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}  {}  {}", entry.id, entry.timestamp.format("%Y-%m-%d %H:%M"), symptoms);
            }
        }
        HistoryAction::Restore { id } => {
            if !session.restore(*id) {
                bail!("No saved analysis with id {}", id);
            }
            print_analysis(session, false)?;
        }
        HistoryAction::Delete { id } => {
            if !session.delete_history(*id) {
                bail!("No saved analysis with id {}", id);
            }
            println!("Deleted analysis {}", id);
        }
        HistoryAction::Clear => {
            session.clear_history();
            println!("History cleared");
        }
    }
    Ok(())
}

fn bookmarks(session: &mut Session<FileStore>, action: &BookmarkAction) -> Result<()> {
    match action {
        BookmarkAction::List => {
            let bookmarked = session.bookmarks();
            if bookmarked.is_empty() {
                println!("No bookmarks");
            }
            for symptom in bookmarked {
                println!("{:>4}  {:<24} {}", symptom.id, symptom.name, symptom.category);
            }
        }
        BookmarkAction::Toggle { id } => match session.toggle_bookmark(*id) {
            Some(true) => println!("Bookmarked symptom {}", id),
            Some(false) => println!("Removed bookmark for symptom {}", id),
            None => bail!("Unknown symptom id {}", id),
        },
    }
    Ok(())
}

fn print_analysis(session: &Session<FileStore>, json: bool) -> Result<()> {
    let results = session.results();
    let summary = session.summary();

    if json {
        let payload = serde_json::json!({ "results": results, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for result in results {
        print_result(result, session.display_detailed());
    }
    print_summary(&summary);
    Ok(())
}

fn print_result(result: &AnalysisResult, detailed: bool) {
    println!("{} [{}] - severity: {}", result.name, result.category, result.severity_label());
    if result.conditions.is_empty() {
        println!("  No associated conditions listed");
    }
    for condition in &result.conditions {
        println!(
            "  - {} (probability: {}, urgency: {})",
            condition.condition, condition.probability, condition.urgency
        );
        if detailed {
            println!("      {}", condition.solution);
        }
    }
    if detailed {
        print_list("Products", result.products.iter().map(String::as_str));
        print_list("Devices", result.devices.iter().map(|d| d.name.as_str()));
        print_list("Tests", result.tests.iter().map(|t| t.test.as_str()));
        print_list("Tips", result.tips.iter().map(String::as_str));
    }
    println!();
}

fn print_list<'a>(title: &str, items: impl Iterator<Item = &'a str>) {
    let items: Vec<&str> = items.collect();
    if !items.is_empty() {
        println!("  {}: {}", title, items.join("; "));
    }
}

fn print_summary(summary: &AnalysisSummary) {
    println!("By category:");
    for category in &summary.categories {
        println!("  {:<20} {} ({})", category.category, category.count, category.member_names.join(", "));
    }
    println!("By urgency ({} conditions):", summary.total_conditions);
    for urgency in &summary.urgency {
        println!("  {:<20} {}", urgency.tier, urgency.count);
    }
}
