#![allow(dead_code)]

use paper_summarizer::{FetchConfig, Fetcher, LlmAdapter, Summarizer, SummaryPipeline};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn pipeline_with(adapter: Arc<dyn LlmAdapter>) -> SummaryPipeline {
    let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    SummaryPipeline::new(fetcher, Summarizer::new(adapter))
}

pub const SUMMARY_JSON: &str = r#"[{"Domain": "Physics", "Title": "Electron Transport in Graphene", "Authors": ["Ada Lovelace", "Alan Turing"], "Summary": "Electron transport.", "Link": "http://arxiv.org/abs/2401.00001v1"}]"#;

pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>arXiv API</title></head>
  <body>
    <p>First paragraph.</p>
    <div><p>Second <b>bold</b> paragraph.</p></div>
    <p></p>
  </body>
</html>"#;

pub const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>http://arxiv.org/api/query-electron</id>
  <title>ArXiv Query: search_query=all:electron</title>
  <updated>2024-01-03T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <published>2024-01-01T00:00:00Z</published>
    <title>Electron Transport in Graphene</title>
    <summary>We study electron transport in graphene sheets.</summary>
    <author><name>Ada Lovelace</name></author>
    <author><name>Alan Turing</name></author>
    <link href="http://arxiv.org/abs/2401.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00001v1" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <updated>2024-01-02T00:00:00Z</updated>
    <published>2024-01-02T00:00:00Z</published>
    <title>Spin Waves in Thin Films</title>
    <summary>Spin waves are measured in thin magnetic films.</summary>
    <author><name>Grace Hopper</name></author>
    <link href="http://arxiv.org/abs/2401.00002v1" rel="alternate" type="text/html"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00003v1</id>
    <updated>2024-01-03T00:00:00Z</updated>
    <published>2024-01-03T00:00:00Z</published>
    <title>Quantum Dots and Electron Pairs</title>
    <summary>Electron pairing in coupled quantum dots.</summary>
    <author><name>Emmy Noether</name></author>
    <author><name>Lise Meitner</name></author>
    <author><name>Marie Curie</name></author>
    <link href="http://arxiv.org/abs/2401.00003v1" rel="alternate" type="text/html"/>
  </entry>
</feed>"#;

pub const ATOM_FEED_WITHOUT_TITLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <id>http://arxiv.org/api/query-broken</id>
  <title>ArXiv Query</title>
  <updated>2024-01-01T00:00:00Z</updated>
  <entry>
    <id>http://arxiv.org/abs/2401.00009v1</id>
    <updated>2024-01-01T00:00:00Z</updated>
    <summary>An entry that lost its title.</summary>
    <author><name>Ada Lovelace</name></author>
    <link href="http://arxiv.org/abs/2401.00009v1" rel="alternate" type="text/html"/>
  </entry>
</feed>"#;

pub const RSS_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://example.com/</link>
    <description>Not an Atom feed</description>
    <item>
      <title>Item one</title>
      <link>https://example.com/1</link>
      <description>First item</description>
    </item>
  </channel>
</rss>"#;
