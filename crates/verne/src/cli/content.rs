//! Content management command handlers.

use super::commands::{ContentCommands, OutputFormat};
use super::wiring::build_store;
use verne::{ContentFilter, PageRequest, VerneConfig, VerneResult, parse_kind};

/// Handle content management commands.
pub async fn handle_content_command(
    config: &VerneConfig,
    cmd: ContentCommands,
) -> VerneResult<()> {
    match cmd {
        ContentCommands::List {
            kind,
            year,
            page,
            limit,
            format,
        } => list_content(config, kind.as_deref(), year, page, limit, format).await,

        ContentCommands::Show { id } => show_content(config, &id).await,

        ContentCommands::Delete { id } => delete_content(config, &id).await,

        ContentCommands::Years => list_years(config).await,
    }
}

/// List stored content summaries.
async fn list_content(
    config: &VerneConfig,
    kind: Option<&str>,
    year: Option<i32>,
    page: i64,
    limit: i64,
    format: OutputFormat,
) -> VerneResult<()> {
    let store = build_store(config)?;

    let mut filter = ContentFilter::new();
    if let Some(kind) = kind {
        filter = filter.with_kind(parse_kind(kind)?);
    }
    if let Some(year) = year {
        filter = filter.with_year(year);
    }

    let listing = store
        .list_summaries(&filter, &PageRequest::new(page, limit))
        .await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| verne::JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!(
                "{:<22} {:<10} {:<6} {:<6} {}",
                "ID", "Kind", "Year", "Image", "Title"
            );
            println!("{:-<80}", "");

            for item in &listing.items {
                println!(
                    "{:<22} {:<10} {:<6} {:<6} {}",
                    item.id,
                    item.kind.as_str(),
                    item.setting_year
                        .map(|y| y.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    if item.has_image { "yes" } else { "-" },
                    item.title
                );
            }

            let pagination = &listing.pagination;
            println!(
                "Page {}/{} ({} total)",
                pagination.page,
                pagination.total_pages.max(1),
                pagination.total
            );
        }
    }

    Ok(())
}

/// Show a specific content item.
async fn show_content(config: &VerneConfig, id: &str) -> VerneResult<()> {
    let store = build_store(config)?;

    match store.get(id).await? {
        Some(record) => {
            println!("ID: {}", record.id);
            println!("Title: {}", record.title);
            println!("Kind: {}", record.kind.as_str());
            if let Some(year) = record.setting_year {
                println!("Year: {}", year);
            }
            println!("Created: {}", record.created_at.format("%Y-%m-%d %H:%M"));
            println!("Updated: {}", record.updated_at.format("%Y-%m-%d %H:%M"));
            if let Some(image) = &record.image {
                println!("Image: {} bytes ({})", image.len(), image.format.extension());
            }
            if let Some(body) = &record.body {
                println!();
                println!("{}", body);
            }
        }
        None => {
            eprintln!("No content with id '{}'", id);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Delete a content item.
async fn delete_content(config: &VerneConfig, id: &str) -> VerneResult<()> {
    let store = build_store(config)?;

    match store.delete(id).await? {
        Some(record) => {
            println!("Deleted {} ({})", record.id, record.title);
        }
        None => {
            eprintln!("No content with id '{}'", id);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// List the distinct setting years present in the store.
async fn list_years(config: &VerneConfig) -> VerneResult<()> {
    let store = build_store(config)?;

    for year in store.distinct_years().await? {
        println!("{}", year);
    }

    Ok(())
}
