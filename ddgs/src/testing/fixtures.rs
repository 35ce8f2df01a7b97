//! Canned upstream bodies.

use serde_json::json;

/// One row of a structured feed page.
#[derive(Debug, Clone, Default)]
pub struct FeedRowFixture {
    /// `t`: title markup.
    pub title: String,
    /// `u`: result URL.
    pub url: String,
    /// `a`: snippet markup.
    pub snippet: String,
}

impl FeedRowFixture {
    /// Creates a row.
    #[must_use]
    pub fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

/// Builds a structured feed body holding the given rows.
///
/// A trailing navigation row without a URL is appended, as the upstream does.
#[must_use]
pub fn feed_body(rows: &[FeedRowFixture]) -> String {
    let mut results: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            json!({
                "t": row.title,
                "u": row.url,
                "a": row.snippet,
                "c": row.url,
                "i": "",
            })
        })
        .collect();
    results.push(json!({"n": "/d.js?q=next&s=20"}));
    json!({ "results": results }).to_string()
}

/// Builds a root page embedding the given `vqd` token.
#[must_use]
pub fn token_page(vqd: &str) -> String {
    format!(
        "<html><head><script>DDG.deep.initialize('/d.js?q=x&t=D&l=wt-wt&s=0&vqd={vqd}&p_ent=');\
         </script></head><body>vqd=\"{vqd}\"</body></html>"
    )
}

/// One result block of an HTML page.
#[derive(Debug, Clone, Default)]
pub struct HtmlResultFixture {
    /// Title link text.
    pub title: String,
    /// Title link href. `None` renders a block without a title link.
    pub href: Option<String>,
    /// Snippet text.
    pub snippet: String,
}

impl HtmlResultFixture {
    /// Creates a result block.
    #[must_use]
    pub fn new(title: &str, href: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            href: Some(href.to_string()),
            snippet: snippet.to_string(),
        }
    }
}

/// Builds an HTML results page.
///
/// `next_page` holds the hidden fields of the "next" form; `None` renders a
/// last page.
#[must_use]
pub fn html_page(
    results: &[HtmlResultFixture],
    next_page: Option<&[(&str, &str)]>,
    no_results: bool,
) -> String {
    let mut body = String::from("<html><body><div id=\"links\" class=\"results\">");

    if no_results {
        body.push_str("<div class=\"no-results\">No results.</div>");
    }

    for result in results {
        body.push_str("<div class=\"result results_links results_links_deep web-result\">");
        body.push_str("<div class=\"links_main links_deep result__body\">");
        match &result.href {
            Some(href) => body.push_str(&format!(
                "<h2 class=\"result__title\"><a rel=\"nofollow\" class=\"result__a\" href=\"{href}\">{}</a></h2>",
                result.title
            )),
            None => body.push_str(&format!("<h2 class=\"result__title\">{}</h2>", result.title)),
        }
        body.push_str(&format!(
            "<a class=\"result__snippet\" href=\"#\">\n  {}  \n</a>",
            result.snippet
        ));
        body.push_str("</div></div>");
    }

    if let Some(fields) = next_page {
        body.push_str("<div class=\"nav-link\"><form action=\"/html/\" method=\"post\">");
        body.push_str("<input type=\"submit\" class=\"btn btn--alt\" value=\"Next\" />");
        for (name, value) in fields {
            body.push_str(&format!(
                "<input type=\"hidden\" name=\"{name}\" value=\"{value}\" />"
            ));
        }
        body.push_str("</form></div>");
    }

    body.push_str("</div></body></html>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_body_is_json() {
        let body = feed_body(&[FeedRowFixture::new("T", "https://a.example", "S")]);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let rows = value["results"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["u"], "https://a.example");
    }

    #[test]
    fn test_html_page_shapes() {
        let page = html_page(
            &[HtmlResultFixture::new("T", "https://a.example", "S")],
            Some(&[("q", "cats"), ("s", "30")]),
            false,
        );
        assert!(page.contains("result__a"));
        assert!(page.contains("name=\"s\" value=\"30\""));
        assert!(!page.contains("no-results"));
    }
}
