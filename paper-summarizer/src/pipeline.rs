use crate::extractor::extract_text;
use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::summarizer::Summarizer;
use crate::types::{Result, SummarizeRequest, SummarizerError};
use tracing::{debug, info};

/// Orchestrates one `/summarize` request:
/// validate, scrape, fetch feed, parse, summarize.
pub struct SummaryPipeline {
    fetcher: Fetcher,
    summarizer: Summarizer,
    scrape_page: bool,
}

impl SummaryPipeline {
    pub fn new(fetcher: Fetcher, summarizer: Summarizer) -> Self {
        Self {
            fetcher,
            summarizer,
            scrape_page: true,
        }
    }

    /// Skip the paragraph scrape of the page. Its text is never used, but a
    /// page that cannot be fetched still fails the request when enabled.
    pub fn with_page_scrape(mut self, enabled: bool) -> Self {
        self.scrape_page = enabled;
        self
    }

    pub fn adapter_name(&self) -> String {
        self.summarizer.adapter_name()
    }

    pub async fn run(&self, request: &SummarizeRequest) -> Result<String> {
        let (url, query) = request.validate()?;
        info!("Scraping website: {}", url);
        info!("Query: {}", query);

        if self.scrape_page {
            let html = self.fetcher.fetch(url).await?;
            let text = extract_text(&html)?;
            debug!("Scraped {} characters of paragraph text", text.len());
        }

        let feed_xml = self.fetcher.fetch_with_query(url, query).await?;
        if feed_xml.is_empty() {
            return Err(SummarizerError::EmptyFeed);
        }

        let entries = FeedParser::parse_feed(&feed_xml)?;
        FeedParser::log_entries(&entries);

        self.summarizer.summarize(&feed_xml).await
    }
}
