use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, bail};
use hifz_review::{
    InMemoryRevisionStore, IntervalEntry, ReviewConfig, ReviewService, RevisionEntry,
    tracing::init_tracing,
};
use hifz_srs::PageId;
use uuid::Uuid;

const USAGE: &str = "usage:
  hifz due <student-id>
  hifz page <student-id> <page>
  hifz propose <student-id> <page> <word-mistakes> <line-mistakes>
  hifz submit <student-id> <page> <word-mistakes> <line-mistakes> <interval>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ReviewConfig::from_env()?;
    init_tracing(&config.env);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!(USAGE);
    };

    let history_path = config
        .history_path
        .as_deref()
        .context("HIFZ_HISTORY_PATH is not set")?;
    let service = ReviewService::new(load_history(history_path)?);
    let today = config.today();

    match (command.as_str(), rest) {
        ("due", [student]) => {
            let due = service.due_pages(parse_student(student)?, today).await?;
            print_json(&due)?;
        }
        ("page", [student, page]) => {
            let summary = service
                .page_entry(parse_student(student)?, parse_page(page)?, today)
                .await?;
            print_json(&summary)?;
        }
        ("propose", [student, page, word, line]) => {
            let entry = RevisionEntry::from_form(word, line)?;
            let plan = service
                .propose_revision(parse_student(student)?, parse_page(page)?, entry, today)
                .await?;
            print_json(&plan)?;
        }
        ("submit", [student, page, word, line, interval]) => {
            let entry = RevisionEntry::from_form(word, line)?;
            let interval = IntervalEntry::from_form(interval)?;
            let row = service
                .submit_revision(
                    parse_student(student)?,
                    parse_page(page)?,
                    entry,
                    interval,
                    today,
                )
                .await?;

            service
                .store()
                .save_json_file(history_path)
                .await
                .with_context(|| format!("failed to write {}", history_path.display()))?;
            print_json(&row)?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn load_history(path: &Path) -> anyhow::Result<InMemoryRevisionStore> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let store = InMemoryRevisionStore::from_json_reader(BufReader::new(file))?;
    tracing::info!(path = %path.display(), "Revision history loaded");
    Ok(store)
}

fn parse_student(raw: &str) -> anyhow::Result<Uuid> {
    raw.parse()
        .with_context(|| format!("invalid student id '{raw}'"))
}

fn parse_page(raw: &str) -> anyhow::Result<PageId> {
    raw.parse().with_context(|| format!("invalid page '{raw}'"))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
