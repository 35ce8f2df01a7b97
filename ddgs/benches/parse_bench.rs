//! Benchmarks for page parsing and text normalization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ddgs::backends::{parse_feed_page, parse_html_page};
use ddgs::testing::{feed_body, html_page, FeedRowFixture, HtmlResultFixture};
use ddgs::text::{normalize_text, normalize_url};

fn normalize_benchmark(c: &mut Criterion) {
    let markup = "<b>Rust</b> is a <i>multi-paradigm</i> language &amp; toolchain &#x263A;".repeat(8);

    c.bench_function("normalize_text", |b| b.iter(|| normalize_text(black_box(&markup))));
    c.bench_function("normalize_url", |b| {
        b.iter(|| normalize_url(black_box("https://example.com/a%20path%2Fwith%3Fescapes")))
    });
}

fn parse_benchmark(c: &mut Criterion) {
    let rows: Vec<FeedRowFixture> = (0..30)
        .map(|n| {
            FeedRowFixture::new(
                &format!("Result <b>{n}</b>"),
                &format!("https://example.com/{n}"),
                &format!("Snippet with <b>markup</b> &amp; entities {n}"),
            )
        })
        .collect();
    let feed = feed_body(&rows);

    let results: Vec<HtmlResultFixture> = (0..30)
        .map(|n| {
            HtmlResultFixture::new(
                &format!("Result {n}"),
                &format!("https://example.com/{n}"),
                &format!("Snippet {n}"),
            )
        })
        .collect();
    let page = html_page(&results, Some(&[("q", "rust"), ("s", "30"), ("dc", "31")]), false);

    c.bench_function("parse_feed_page", |b| b.iter(|| parse_feed_page(black_box(&feed))));
    c.bench_function("parse_html_page", |b| b.iter(|| parse_html_page(black_box(&page))));
}

criterion_group!(benches, normalize_benchmark, parse_benchmark);
criterion_main!(benches);
