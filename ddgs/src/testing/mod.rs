//! Testing utilities for code built on the ddgs client.
//!
//! This module provides:
//! - A scripted transport that replays canned responses in order
//! - Builders for canned upstream bodies (feed pages, HTML pages, token pages)

mod fixtures;
mod mocks;

pub use fixtures::{feed_body, html_page, token_page, FeedRowFixture, HtmlResultFixture};
pub use mocks::{Reply, ScriptedTransport};
