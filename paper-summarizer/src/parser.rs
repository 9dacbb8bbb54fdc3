use crate::types::{FeedEntry, Result, SummarizerError};
use feed_rs::model::{Entry, FeedType};
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info};

pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub struct FeedParser;

impl FeedParser {
    /// Extract every Atom entry from `content`, in document order.
    ///
    /// Non-Atom feeds and well-formed XML that is not a feed at all parse to
    /// an empty list. Malformed XML, or an Atom entry lacking one of its
    /// required elements, is a parse error.
    pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = match parser::parse(content.as_bytes()) {
            Ok(feed) => feed,
            Err(feed_error) => {
                check_well_formed(content)?;
                info!("Document is XML but not a feed ({}); no entries extracted", feed_error);
                return Ok(Vec::new());
            }
        };

        if !matches!(feed.feed_type, FeedType::Atom) {
            info!(
                "Feed is {:?}, not Atom ({}); no entries extracted",
                feed.feed_type, ATOM_NAMESPACE
            );
            return Ok(Vec::new());
        }

        let entries = feed
            .entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Self::parse_entry(index, entry))
            .collect::<Result<Vec<_>>>()?;

        info!("Parsed feed with {} entries", entries.len());
        Ok(entries)
    }

    fn parse_entry(index: usize, entry: Entry) -> Result<FeedEntry> {
        let title = entry
            .title
            .map(|t| t.content)
            .ok_or_else(|| missing(index, "title"))?;

        // feed-rs names an author without a <name> "unknown"
        if entry.authors.is_empty()
            || entry
                .authors
                .iter()
                .any(|a| a.name.trim().is_empty() || a.name == "unknown")
        {
            return Err(missing(index, "author"));
        }
        let authors = entry.authors.into_iter().map(|a| a.name).collect();

        let abstract_text = entry
            .summary
            .map(|s| s.content)
            .ok_or_else(|| missing(index, "summary"))?;

        // Only the first <link> counts, as long as it has an href
        let link = entry
            .links
            .into_iter()
            .next()
            .map(|l| l.href)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| missing(index, "link"))?;

        Ok(FeedEntry {
            title,
            authors,
            abstract_text,
            link,
        })
    }

    /// Emit one log event per entry. The entries never reach the response.
    pub fn log_entries(entries: &[FeedEntry]) {
        for entry in entries {
            info!(
                title = %entry.title,
                authors = %entry.authors.join(", "),
                abstract_text = %entry.abstract_text,
                link = %entry.link,
                "Feed entry"
            );
        }
    }
}

fn missing(index: usize, element: &str) -> SummarizerError {
    SummarizerError::Parse(format!("entry {} is missing a <{}> element", index, element))
}

/// Succeeds when `content` is a single well-formed XML document.
fn check_well_formed(content: &str) -> Result<()> {
    let mut reader = Reader::from_str(content);
    let mut depth: usize = 0;
    let mut saw_root = false;

    loop {
        let position = reader.buffer_position();
        let event = reader.read_event().map_err(|e| {
            SummarizerError::Parse(format!("Malformed XML at byte {}: {}", position, e))
        })?;

        match event {
            Event::Start(_) | Event::Empty(_) if depth == 0 && saw_root => {
                return Err(malformed("junk after document element"));
            }
            Event::Start(_) => {
                saw_root = true;
                depth += 1;
            }
            Event::Empty(_) => saw_root = true,
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("unexpected closing tag"))?;
            }
            Event::Text(text) if depth == 0 && !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(malformed("text outside the document element"));
            }
            Event::CData(_) if depth == 0 => {
                return Err(malformed("text outside the document element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(malformed("no element found"));
    }
    if depth != 0 {
        return Err(malformed("unclosed element at end of document"));
    }
    Ok(())
}

fn malformed(reason: &str) -> SummarizerError {
    SummarizerError::Parse(format!("Malformed XML: {}", reason))
}
