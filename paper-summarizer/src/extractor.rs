use crate::types::{Result, SummarizerError};
use scraper::{Html, Selector};
use tracing::debug;

/// Concatenate the text of every `<p>` element in `html`, in document order,
/// separated by single spaces. Empty paragraphs are kept.
pub fn extract_text(html: &[u8]) -> Result<String> {
    let document = Html::parse_document(&String::from_utf8_lossy(html));
    let paragraph = Selector::parse("p")
        .map_err(|e| SummarizerError::Parse(format!("Invalid paragraph selector: {:?}", e)))?;

    let paragraphs: Vec<String> = document
        .select(&paragraph)
        .map(|el| el.text().collect::<String>())
        .collect();

    debug!("Extracted {} paragraphs", paragraphs.len());
    Ok(paragraphs.join(" "))
}
