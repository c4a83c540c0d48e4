use std::collections::HashSet;

use anyhow::Context;
use clap::Parser;
use dialoguer::Confirm;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vdocs::cli::{
    Cli, CollectionCommand, Commands, ConfigCommand, DocumentCommand, DocumentDeleteArgs, PatternArgs,
};
use vdocs::commands::{self, DeleteReport};
use vdocs::config::{self, Config};
use vdocs::display;
use vdocs::pattern::Pattern;
use vdocs::record::MetadataFilter;
use vdocs::store::StoreBackend;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Some(path) = config::load_env_file(cli.env_file.as_deref())? {
        debug!(path = %path.display(), "loaded env file");
    }

    let Some(command) = cli.command else {
        Cli::parse_from(["vdocs", "--help"]);
        return Ok(());
    };

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match command {
        Commands::Config(ConfigCommand::Show) => {
            println!("{}", display::render_config(&config));
            Ok(())
        }
        Commands::Collection(command) => {
            let store = open_database(&config, cli.db.as_deref())?;
            run_collection(command, store.as_ref(), &config, cli.no_truncate)
        }
        Commands::Document(command) => {
            let store = open_database(&config, cli.db.as_deref())?;
            run_document(command, store.as_ref(), &config, cli.no_truncate)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn open_database(config: &Config, name: Option<&str>) -> anyhow::Result<Box<dyn StoreBackend>> {
    let db = config.database(name).with_context(|| {
        format!("Available databases: {}", config.database_names().join(", "))
    })?;
    Ok(commands::open_store(db))
}

fn run_collection(
    command: CollectionCommand,
    store: &dyn StoreBackend,
    config: &Config,
    no_truncate: bool,
) -> anyhow::Result<()> {
    match command {
        CollectionCommand::List { virtual_summary } => {
            let infos = commands::list_collections(store, virtual_summary)?;
            print!("{}", display::render_collections(&infos));
        }
        CollectionCommand::Count => {
            let count = commands::count_collections(store)?;
            println!("{count} collections");
        }
        CollectionCommand::Show { name, short, json } => {
            let details = commands::show_collection(store, &name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                let policy = config.truncation_policy(no_truncate, short);
                print!("{}", display::render_collection_details(&details, &policy));
            }
        }
        CollectionCommand::Delete {
            names,
            selection,
            dry_run,
            force,
        } => {
            let mut targets = names;
            if let Some(pattern) = compile_pattern(&selection)? {
                targets.extend(commands::select_collections(store, &pattern)?);
            } else if targets.is_empty() {
                anyhow::bail!("Specify collection names or --pattern");
            }
            let targets = dedup(targets);

            if dry_run || targets.is_empty() {
                println!("{}", display::render_dry_run(&targets, "collection"));
                return Ok(());
            }

            if let Some(pattern) = &selection.pattern
                && !force
                && !confirm(&format!(
                    "Delete {} collection(s) matching '{pattern}'? This cannot be undone.",
                    targets.len()
                ))
            {
                println!("Deletion cancelled");
                return Ok(());
            }

            let report = commands::delete_collections(store, &targets);
            finish_delete(&report, "collection")?;
        }
        CollectionCommand::DeleteAll { force } => {
            let count = commands::count_collections(store)?;
            if count == 0 {
                println!("No collections found");
                return Ok(());
            }
            if !force
                && !confirm(&format!("Delete all {count} collection(s)? This cannot be undone."))
            {
                println!("Deletion cancelled");
                return Ok(());
            }

            let report = commands::delete_all_collections(store)?;
            finish_delete(&report, "collection")?;
        }
    }

    Ok(())
}

fn run_document(
    command: DocumentCommand,
    store: &dyn StoreBackend,
    config: &Config,
    no_truncate: bool,
) -> anyhow::Result<()> {
    match command {
        DocumentCommand::List {
            collection,
            limit,
            virtual_view,
            summary,
            display: display_args,
        } => {
            let policy = config.truncation_policy(no_truncate, display_args.line_limit());
            if virtual_view {
                let docs = commands::list_virtual_documents(store, &collection, limit)?;
                print!(
                    "{}",
                    display::render_virtual_documents(&docs, &collection, &policy, summary)
                );
            } else {
                let records = commands::list_documents(store, &collection, limit)?;
                print!("{}", display::render_records(&records, &collection, &policy));
            }
        }
        DocumentCommand::Show {
            collection,
            id,
            metadata,
            name,
            schema,
            display: display_args,
        } => {
            let policy = config.truncation_policy(no_truncate, display_args.line_limit());

            if let Some(id) = id {
                let record = commands::show_document(store, &collection, &id)?;
                print!("{}", display::render_record(&record, &collection, &policy));
                if schema {
                    print!("{}", display::render_record_schema(&record));
                }
                return Ok(());
            }

            if let Some(name) = name {
                for (target, doc) in commands::find_virtual_document(store, &collection, &name)? {
                    println!("{}", display::render_virtual_document(&doc, &target, &policy));
                    if schema && let Some(first) = doc.members.first() {
                        println!("{}", display::render_record_schema(first));
                    }
                }
                return Ok(());
            }

            let filters = MetadataFilter::parse_all(&metadata)?;
            let records = commands::find_by_metadata(store, &collection, &filters)?;
            if records.is_empty() {
                anyhow::bail!(
                    "No document in collection '{collection}' matches {}",
                    metadata.join(", ")
                );
            }
            for record in &records {
                println!("{}", display::render_record(record, &collection, &policy));
                if schema {
                    println!("{}", display::render_record_schema(record));
                }
            }
        }
        DocumentCommand::Count { collections } => {
            let counts = commands::count_documents_in(store, &collections);
            print!("{}", display::render_document_counts(&counts));

            let failed = counts.iter().filter(|(_, count)| count.is_err()).count();
            if failed > 0 {
                anyhow::bail!("{failed} collection(s) could not be counted");
            }
        }
        DocumentCommand::Delete(args) => run_document_delete(store, args)?,
        DocumentCommand::DeleteAll { collection, force } => {
            run_document_delete_all(store, &collection, force)?;
        }
    }

    Ok(())
}

fn run_document_delete(store: &dyn StoreBackend, args: DocumentDeleteArgs) -> anyhow::Result<()> {
    commands::validate_collection_name(&args.collection)?;
    let bulk = args.is_bulk();
    let DocumentDeleteArgs {
        collection,
        ids,
        selection,
        metadata,
        original,
        dry_run,
        force,
    } = args;

    let report = if let Some(original) = original {
        let located = commands::locate_virtual_document(store, &collection, &original)?;
        if dry_run {
            let targets: Vec<String> = located
                .iter()
                .flat_map(|(target, ids)| ids.iter().map(move |id| format!("{id} ({target})")))
                .collect();
            println!("{}", display::render_dry_run(&targets, "document"));
            return Ok(());
        }

        let parts: usize = located.iter().map(|(_, ids)| ids.len()).sum();
        if !force
            && !confirm(&format!(
                "Delete all {parts} part(s) of '{original}'? This cannot be undone."
            ))
        {
            println!("Deletion cancelled");
            return Ok(());
        }
        commands::delete_virtual_document(store, &collection, &original)?
    } else {
        let targets = select_document_ids(store, &collection, ids, &selection, &metadata)?;
        if dry_run || targets.is_empty() {
            println!("{}", display::render_dry_run(&targets, "document"));
            return Ok(());
        }
        if bulk
            && !force
            && !confirm(&format!(
                "Delete {} document(s) from '{collection}'? This cannot be undone.",
                targets.len()
            ))
        {
            println!("Deletion cancelled");
            return Ok(());
        }
        commands::delete_documents(store, &collection, &targets)
    };

    finish_delete(&report, "document")
}

fn run_document_delete_all(store: &dyn StoreBackend, collection: &str, force: bool) -> anyhow::Result<()> {
    let count = commands::count_documents(store, collection)?;
    if count == 0 {
        println!("No documents found in collection '{collection}'");
        return Ok(());
    }
    if !force
        && !confirm(&format!(
            "Delete all {count} document(s) from '{collection}'? This cannot be undone."
        ))
    {
        println!("Deletion cancelled");
        return Ok(());
    }

    let report = commands::clear_collection(store, collection)?;
    finish_delete(&report, "document")
}

/// Print a delete report and fail if anything was left behind.
fn finish_delete(report: &DeleteReport, noun: &str) -> anyhow::Result<()> {
    println!("{}", display::render_delete_report(report, noun));
    if !report.is_clean() {
        anyhow::bail!("{} {noun}(s) could not be deleted", report.failed.len());
    }
    Ok(())
}

/// Ask before a bulk delete. Without a terminal the answer is no.
fn confirm(prompt: &str) -> bool {
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => answer,
        Err(e) => {
            debug!(error = %e, "confirmation prompt unavailable");
            false
        }
    }
}

/// Union of explicit ids, pattern matches and metadata matches.
fn select_document_ids(
    store: &dyn StoreBackend,
    collection: &str,
    ids: Vec<String>,
    selection: &PatternArgs,
    metadata: &[String],
) -> anyhow::Result<Vec<String>> {
    let pattern = compile_pattern(selection)?;
    if ids.is_empty() && pattern.is_none() && metadata.is_empty() {
        anyhow::bail!("Specify document IDs, --pattern, --metadata or --original");
    }

    let mut targets = ids;
    if let Some(pattern) = pattern {
        targets.extend(
            commands::select_documents(store, collection, &pattern)?
                .into_iter()
                .map(|record| record.id),
        );
    }
    if !metadata.is_empty() {
        let filters = MetadataFilter::parse_all(metadata)?;
        targets.extend(
            commands::find_by_metadata(store, collection, &filters)?
                .into_iter()
                .map(|record| record.id),
        );
    }

    Ok(dedup(targets))
}

fn compile_pattern(selection: &PatternArgs) -> anyhow::Result<Option<Pattern>> {
    match &selection.pattern {
        Some(raw) if selection.regex => Ok(Some(Pattern::regex(raw)?)),
        Some(raw) => Ok(Some(Pattern::new(raw))),
        None => Ok(None),
    }
}

/// Drop repeats, keeping first occurrences in order.
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}
