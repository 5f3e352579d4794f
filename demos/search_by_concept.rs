//! Search by Concept Example
//!
//! Searches the application's inputs for a concept and walks the first few pages.
//!
//! Run with: CLARIFAI_API_KEY=... cargo run --example search_by_concept -- dog

use clarifai_rust::operations::search::search_inputs;
use clarifai_rust::{ClarifaiClient, Pagination, SearchClause};
use tracing_subscriber::EnvFilter;

const MAX_PAGES: u32 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("clarifai_rust=debug")),
        )
        .init();

    let concept = std::env::args().nth(1).unwrap_or_else(|| "dog".to_string());
    let client = ClarifaiClient::from_env()?;

    let first = search_inputs(
        vec![SearchClause::by_concept_name(concept.as_str())?],
        Pagination::new(1, 10)?,
    )?;

    let mut page = Pagination::new(1, 10)?;
    for _ in 0..MAX_PAGES {
        let response = client.execute(&first.paginated(page)).await?;
        if !response.is_successful() {
            println!("search failed: {}", response.status());
            break;
        }
        let hits = response.into_value().unwrap_or_default();
        if hits.is_empty() {
            break;
        }
        println!("page {}:", page.page());
        for hit in &hits {
            println!("  {:.3}  {}", hit.score, hit.input.id.as_deref().unwrap_or("-"));
        }
        page = page.next_page();
    }

    Ok(())
}
