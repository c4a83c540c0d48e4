//! Plain-text rendering of records, virtual documents and summaries.
//!
//! Renderers build `String`s so the binary only has to print them. Every
//! value that may be long goes through [`truncate`] with the caller's policy.

use std::fmt::Write;

use crate::commands::{CollectionDetails, CollectionInfo, DeleteReport};
use crate::config::Config;
use crate::record::{Record, value_text, value_type};
use crate::truncate::{TruncationPolicy, truncate};
use crate::vdoc::{Kind, VirtualDocument, VirtualSummary, classify};

/// Record list in stored order.
#[must_use]
pub fn render_records(records: &[Record], collection: &str, policy: &TruncationPolicy) -> String {
    let mut output = String::new();

    if records.is_empty() {
        let _ = writeln!(output, "No documents found in collection '{collection}'");
        return output;
    }

    let _ = writeln!(
        output,
        "Found {} documents in collection '{collection}':\n",
        records.len()
    );

    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(output, "{}. ID: {}", i + 1, record.id);
        write_record_body(&mut output, record, policy, "   ");
        output.push('\n');
    }

    output
}

/// Virtual documents with their members, optionally followed by a summary.
#[must_use]
pub fn render_virtual_documents(
    docs: &[VirtualDocument],
    collection: &str,
    policy: &TruncationPolicy,
    with_summary: bool,
) -> String {
    let mut output = String::new();

    if docs.is_empty() {
        let _ = writeln!(output, "No virtual documents found in collection '{collection}'");
        return output;
    }

    let total: usize = docs.iter().map(VirtualDocument::len).sum();
    let _ = writeln!(
        output,
        "Found {} virtual documents in collection '{collection}' (aggregated from {total} total documents):\n",
        docs.len()
    );

    for (i, doc) in docs.iter().enumerate() {
        let kind = classify(doc);
        let _ = writeln!(output, "{}. Document: {} [{kind}]", i + 1, doc.original_name);
        let _ = writeln!(output, "   {}", member_count_line(doc, kind));

        if !doc.representative_metadata.is_empty() {
            let _ = writeln!(output, "   Metadata:");
            for (key, value) in &doc.representative_metadata {
                if key == "id" {
                    continue;
                }
                let shown = truncate(&value_text(value), key, policy);
                let _ = writeln!(output, "     {key}: {shown}");
            }
        }

        let _ = writeln!(output, "   {}:", member_heading(kind));
        for (j, member) in doc.members.iter().enumerate() {
            let _ = writeln!(output, "     {}. ID: {}", j + 1, member.id);
            let content = truncate(&member.content, "content", policy);
            let _ = writeln!(output, "        Content: {content}");
        }
        output.push('\n');
    }

    if with_summary {
        let _ = writeln!(output, "Summary:");
        for (i, doc) in docs.iter().enumerate() {
            let _ = writeln!(
                output,
                "   {}. {} - {}",
                i + 1,
                doc.original_name,
                member_count_line(doc, classify(doc)).to_lowercase()
            );
        }
    }

    output
}

fn member_count_line(doc: &VirtualDocument, kind: Kind) -> String {
    match kind {
        Kind::Chunked if usize::try_from(doc.declared_total_chunks) == Ok(doc.len()) => {
            format!("Chunks: {}", doc.len())
        }
        Kind::Chunked => format!(
            "Chunks: {} of {} declared",
            doc.len(),
            doc.declared_total_chunks
        ),
        Kind::ImageBundle => format!("Images: {}", doc.len()),
        Kind::Standalone => format!("Documents: {}", doc.len()),
    }
}

fn member_heading(kind: Kind) -> &'static str {
    match kind {
        Kind::Chunked => "Chunk Details",
        Kind::ImageBundle => "Image Details",
        Kind::Standalone => "Details",
    }
}

/// Every member of one original document as found in one collection.
#[must_use]
pub fn render_virtual_document(doc: &VirtualDocument, collection: &str, policy: &TruncationPolicy) -> String {
    let mut output = String::new();
    let kind = classify(doc);
    let _ = writeln!(
        output,
        "Document '{}' in collection '{collection}' [{kind}]:",
        doc.original_name
    );
    let _ = writeln!(output, "  {}", member_count_line(doc, kind));

    for (i, member) in doc.members.iter().enumerate() {
        let _ = writeln!(output, "\n  {}. ID: {}", i + 1, member.id);
        write_record_body(&mut output, member, policy, "     ");
    }

    output
}

/// One record with every metadata field.
#[must_use]
pub fn render_record(record: &Record, collection: &str, policy: &TruncationPolicy) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Document '{}' in collection '{collection}':", record.id);
    write_record_body(&mut output, record, policy, "  ");
    output
}

/// Metadata field names with their JSON types, sorted by name.
#[must_use]
pub fn render_record_schema(record: &Record) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Schema:");
    let _ = writeln!(output, "  id (string)");
    let _ = writeln!(output, "  content (text)");

    let mut keys: Vec<_> = record.metadata.keys().collect();
    keys.sort();
    for key in keys {
        let _ = writeln!(output, "  {key} ({})", value_type(&record.metadata[key]));
    }
    output
}

fn write_record_body(output: &mut String, record: &Record, policy: &TruncationPolicy, indent: &str) {
    // Some ingesters store only a placeholder body
    if record.content != format!("Document ID: {}", record.id) {
        let content = truncate(&record.content, "content", policy);
        let _ = writeln!(output, "{indent}Content: {content}");
    }

    if record.metadata.is_empty() {
        return;
    }

    let _ = writeln!(output, "{indent}Metadata:");
    let mut keys: Vec<_> = record.metadata.keys().collect();
    keys.sort();
    for key in keys {
        if key == "id" {
            continue;
        }
        let shown = truncate(&value_text(&record.metadata[key]), key, policy);
        let _ = writeln!(output, "{indent}  {key}: {shown}");
    }
}

/// Collection names with record counts and optional virtual summaries.
#[must_use]
pub fn render_collections(collections: &[CollectionInfo]) -> String {
    let mut output = String::new();

    if collections.is_empty() {
        let _ = writeln!(output, "No collections found");
        return output;
    }

    let _ = writeln!(output, "Found {} collections:\n", collections.len());
    for (i, info) in collections.iter().enumerate() {
        match info.records {
            Some(count) => {
                let _ = writeln!(output, "{}. {} ({count} documents)", i + 1, info.name);
            }
            None => {
                let _ = writeln!(output, "{}. {} (unavailable)", i + 1, info.name);
            }
        }
        if let Some(summary) = &info.summary {
            output.push_str(&render_summary(summary, "   "));
        }
    }

    output
}

/// One collection: size, virtual structure and a sample record.
#[must_use]
pub fn render_collection_details(details: &CollectionDetails, policy: &TruncationPolicy) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Collection: {}", details.name);
    let _ = writeln!(output, "Documents: {}", details.records);
    output.push_str(&render_summary(&details.summary, ""));

    if let Some(sample) = &details.sample {
        let _ = writeln!(output, "\nSample document (ID: {}):", sample.id);
        write_record_body(&mut output, sample, policy, "  ");
        output.push_str(&render_record_schema(sample));
    }

    output
}

/// Virtual structure counts, one per line; zero-valued groups are skipped.
#[must_use]
pub fn render_summary(summary: &VirtualSummary, indent: &str) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{indent}Virtual Summary:");
    let _ = writeln!(output, "{indent}  Total Documents: {}", summary.total_records);
    let _ = writeln!(output, "{indent}  Virtual Documents: {}", summary.virtual_documents);

    if summary.chunked_documents > 0 {
        let _ = writeln!(
            output,
            "{indent}  Chunked Documents: {} ({} chunks)",
            summary.chunked_documents, summary.total_chunks
        );
    }
    if summary.total_images > 0 {
        let _ = writeln!(output, "{indent}  Images: {}", summary.total_images);
        if summary.image_stacks > 0 {
            let _ = writeln!(output, "{indent}  Image Stacks: {}", summary.image_stacks);
        }
        if summary.standalone_images > 0 {
            let _ = writeln!(output, "{indent}  Standalone Images: {}", summary.standalone_images);
        }
    }
    if summary.standalone_documents > 0 {
        let _ = writeln!(output, "{indent}  Standalone Documents: {}", summary.standalone_documents);
    }

    output
}

/// Per-collection record counts, with a total when more than one was asked for.
#[must_use]
pub fn render_document_counts(counts: &[(String, Result<usize, String>)]) -> String {
    let mut output = String::new();

    for (collection, count) in counts {
        match count {
            Ok(n) => {
                let _ = writeln!(output, "{n} documents in collection '{collection}'");
            }
            Err(e) => {
                let _ = writeln!(output, "Failed to count collection '{collection}': {e}");
            }
        }
    }

    if counts.len() > 1 {
        let total: usize = counts.iter().filter_map(|(_, count)| count.as_ref().ok()).sum();
        let _ = writeln!(output, "Total: {total} documents");
    }

    output
}

/// Outcome of a bulk delete.
#[must_use]
pub fn render_delete_report(report: &DeleteReport, noun: &str) -> String {
    let mut output = String::new();

    for target in &report.deleted {
        let _ = writeln!(output, "Deleted {noun} '{target}'");
    }
    for (target, error) in &report.failed {
        let _ = writeln!(output, "Failed to delete {noun} '{target}': {error}");
    }
    let _ = write!(
        output,
        "{} deleted, {} failed",
        report.deleted.len(),
        report.failed.len()
    );

    output
}

/// Targets a dry run would delete.
#[must_use]
pub fn render_dry_run(targets: &[String], noun: &str) -> String {
    let mut output = String::new();

    if targets.is_empty() {
        let _ = write!(output, "No matching {noun}s");
        return output;
    }

    let _ = writeln!(output, "Would delete {} {noun}(s):", targets.len());
    for target in targets {
        let _ = writeln!(output, "  - {target}");
    }
    let _ = write!(output, "Dry run: nothing was deleted");

    output
}

/// Resolved configuration with API keys masked.
#[must_use]
pub fn render_config(config: &Config) -> String {
    let mut output = String::new();
    let default = config.databases.default.as_deref().unwrap_or("");

    let _ = writeln!(output, "Databases:");
    for db in &config.databases.vector_databases {
        let marker = if db.name == default { " (default)" } else { "" };
        let _ = writeln!(output, "  {}{marker}", db.name);
        let _ = writeln!(output, "    type: {}", db.kind);
        if let Some(path) = &db.path {
            let _ = writeln!(output, "    path: {path}");
        }
        if let Some(url) = &db.url {
            let _ = writeln!(output, "    url: {url}");
        }
        if let Some(key) = db.masked_api_key() {
            let _ = writeln!(output, "    api_key: {key}");
        }
        if !db.collections.is_empty() {
            let _ = writeln!(output, "    collections: {}", db.collections.join(", "));
        }
    }

    let _ = writeln!(output, "Display:");
    let _ = writeln!(output, "  short_lines: {}", config.display.short_lines);
    let _ = writeln!(output, "  base64_chars: {}", config.display.base64_chars);
    let _ = write!(output, "  no_truncate: {}", config.display.no_truncate);

    output
}
