//! vdocs - Inspect vector store collections as documents.
//!
//! Vector stores hold chunks of text and images extracted from files, not the
//! files themselves. This library reassembles those records into virtual
//! documents, selects records and collections by glob or regex, and renders
//! large values with content-aware truncation.
//!
//! # Modules
//!
//! - [`record`] - Records, nested metadata extraction and metadata filters
//! - [`vdoc`] - Grouping, aggregation and classification of virtual documents
//! - [`pattern`] - Glob/regex name matching
//! - [`truncate`] - Content-aware truncation
//! - [`store`] - Store backend trait and implementations
//! - [`commands`] - High-level operations (list, show, count, delete)
//! - [`display`] - Plain-text rendering
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod pattern;
pub mod record;
pub mod store;
pub mod truncate;
pub mod vdoc;
