//! CLI interface for vdocs.
//!
//! Provides command-line argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default number of records read by `document list`.
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Command-line interface for vdocs.
#[derive(Parser)]
#[command(name = "vdocs")]
#[command(author, version, about = "Inspect and manage vector store collections as documents", long_about = None)]
pub struct Cli {
    /// Config file (overrides $VDOCS_CONFIG and the default location).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Environment file loaded before the config (default: ./.env).
    #[arg(long, global = true, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Database to use instead of the configured default.
    #[arg(long, global = true, value_name = "NAME")]
    pub db: Option<String>,

    /// Show every value in full.
    #[arg(long, global = true)]
    pub no_truncate: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage collections.
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// Inspect and delete documents within a collection.
    #[command(subcommand)]
    Document(DocumentCommand),

    /// Inspect the resolved configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum CollectionCommand {
    /// List collections with their record counts.
    List {
        /// Also show how records group into virtual documents.
        #[arg(long = "virtual")]
        virtual_summary: bool,
    },

    /// Count collections.
    Count,

    /// Show a collection's size, virtual structure and a sample record.
    Show {
        /// Collection name.
        name: String,

        /// Lines to show per value.
        #[arg(long, value_name = "N", conflicts_with = "json")]
        short: Option<usize>,

        /// Print the details as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete collections by name or pattern.
    Delete {
        /// Collection names.
        names: Vec<String>,

        #[command(flatten)]
        selection: PatternArgs,

        /// Show what would be deleted without deleting.
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt for pattern deletes.
        #[arg(short, long)]
        force: bool,
    },

    /// Delete every collection in the database.
    DeleteAll {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum DocumentCommand {
    /// List documents in a collection.
    List {
        /// Collection name.
        collection: String,

        /// Maximum number of records to read.
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: usize,

        /// Group chunks and images into their original documents.
        #[arg(long = "virtual")]
        virtual_view: bool,

        /// With --virtual, end with a one-line-per-document summary.
        #[arg(long, requires = "virtual_view")]
        summary: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Show one document by id, by metadata or by original name.
    Show {
        /// Collection name.
        collection: String,

        /// Document id.
        #[arg(required_unless_present_any = ["metadata", "name"])]
        id: Option<String>,

        /// Select by metadata instead of id (key=value, repeatable).
        #[arg(short, long, value_name = "KEY=VALUE", conflicts_with = "id")]
        metadata: Vec<String>,

        /// Show every chunk and image of this original document.
        #[arg(
            short,
            long,
            visible_alias = "filename",
            value_name = "NAME",
            conflicts_with_all = ["id", "metadata"]
        )]
        name: Option<String>,

        /// Also list metadata fields with their types.
        #[arg(long)]
        schema: bool,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Count documents in one or more collections.
    Count {
        /// Collection names.
        #[arg(required = true)]
        collections: Vec<String>,
    },

    /// Delete documents by id, pattern, metadata or original document.
    Delete(DocumentDeleteArgs),

    /// Delete every document in a collection, keeping the collection.
    DeleteAll {
        /// Collection name.
        collection: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration with secrets masked.
    Show,
}

/// Arguments of `document delete`.
#[derive(Args, Debug, Clone)]
pub struct DocumentDeleteArgs {
    /// Collection name.
    pub collection: String,

    /// Document ids.
    pub ids: Vec<String>,

    #[command(flatten)]
    pub selection: PatternArgs,

    /// Select by metadata (key=value, repeatable).
    #[arg(short, long, value_name = "KEY=VALUE")]
    pub metadata: Vec<String>,

    /// Delete every chunk and image of this original document.
    #[arg(
        long,
        visible_aliases = ["name", "filename"],
        value_name = "NAME",
        conflicts_with_all = ["ids", "pattern", "metadata"]
    )]
    pub original: Option<String>,

    /// Show what would be deleted without deleting.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt for pattern, metadata and original deletes.
    #[arg(short, long)]
    pub force: bool,
}

impl DocumentDeleteArgs {
    /// True when targets are chosen by a pattern or metadata rather than by id.
    #[must_use]
    pub fn is_bulk(&self) -> bool {
        self.selection.pattern.is_some() || !self.metadata.is_empty()
    }
}

/// Name-pattern selection shared by the delete commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PatternArgs {
    /// Glob or regex pattern, auto-detected.
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Always treat the pattern as a regex.
    #[arg(long, requires = "pattern")]
    pub regex: bool,
}

/// Truncation overrides for a single command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    /// Lines to show per value.
    #[arg(long, value_name = "N", conflicts_with = "long")]
    pub short: Option<usize>,

    /// Show full text values; binary values stay shortened.
    #[arg(long)]
    pub long: bool,
}

impl DisplayArgs {
    /// Line limit override, where 0 means unlimited.
    #[must_use]
    pub fn line_limit(&self) -> Option<usize> {
        if self.long { Some(0) } else { self.short }
    }
}
