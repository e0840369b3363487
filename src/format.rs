//! Rendering of provider results into the single text block returned to callers.

use crate::ddgs::{BookResult, ImageResult, NewsResult, SearchResults, TextResult, VideoResult};

const NO_TITLE: &str = "No title";
const NO_DESCRIPTION: &str = "No description";
const NOT_AVAILABLE: &str = "N/A";
const DESCRIPTION_CHARS: usize = 200;

pub fn format_results(results: &SearchResults) -> String {
    match results {
        SearchResults::Text(items) => render(items, "results", "No results found.", text_entry),
        SearchResults::Images(items) => render(items, "images", "No images found.", image_entry),
        SearchResults::Videos(items) => render(items, "videos", "No videos found.", video_entry),
        SearchResults::News(items) => render(items, "news articles", "No news found.", news_entry),
        SearchResults::Books(items) => render(items, "books", "No books found.", book_entry),
    }
}

fn render<T>(items: &[T], noun: &str, empty: &str, entry: fn(usize, &T) -> String) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let entries: Vec<String> = items.iter().enumerate().map(|(i, item)| entry(i + 1, item)).collect();
    format!("Found {} {noun}:\n\n{}", items.len(), entries.join("\n"))
}

fn text_entry(i: usize, r: &TextResult) -> String {
    let url = r.href.as_deref().and_then(non_blank).map(normalize_url);
    format!(
        "{i}. {}\n   URL: {}\n   {}\n",
        or(&r.title, NO_TITLE),
        url.as_deref().unwrap_or(NOT_AVAILABLE),
        or(&r.body, NO_DESCRIPTION),
    )
}

fn image_entry(i: usize, r: &ImageResult) -> String {
    let dim = |d: Option<u64>| d.map_or_else(|| "?".to_string(), |n| n.to_string());
    let source = r
        .url
        .as_deref()
        .and_then(non_blank)
        .or_else(|| r.source.as_deref().and_then(non_blank))
        .unwrap_or(NOT_AVAILABLE);
    format!(
        "{i}. **{}**\n   Image: {}\n   Thumbnail: {}\n   Source: {source}\n   Dimensions: {}x{}\n",
        or(&r.title, NO_TITLE),
        or(&r.image, NOT_AVAILABLE),
        or(&r.thumbnail, NOT_AVAILABLE),
        dim(r.width),
        dim(r.height),
    )
}

fn video_entry(i: usize, r: &VideoResult) -> String {
    let description = or(&r.description, NO_DESCRIPTION);
    format!(
        "{i}. **{}**\n   URL: {}\n   Duration: {}\n   Publisher: {}\n   Published: {}\n   Description: {}...\n",
        or(&r.title, NO_TITLE),
        or(&r.content, NOT_AVAILABLE),
        or(&r.duration, NOT_AVAILABLE),
        or(&r.publisher, NOT_AVAILABLE),
        or(&r.published, NOT_AVAILABLE),
        truncate_chars(description, DESCRIPTION_CHARS),
    )
}

fn news_entry(i: usize, r: &NewsResult) -> String {
    format!(
        "{i}. **{}**\n   Source: {}\n   Date: {}\n   URL: {}\n   {}\n",
        or(&r.title, NO_TITLE),
        or(&r.source, NOT_AVAILABLE),
        or(&r.date, NOT_AVAILABLE),
        or(&r.url, NOT_AVAILABLE),
        or(&r.body, NO_DESCRIPTION),
    )
}

fn book_entry(i: usize, r: &BookResult) -> String {
    format!(
        "{i}. **{}**\n   Author: {}\n   Publisher: {}\n   Info: {}\n   URL: {}\n",
        or(&r.title, NO_TITLE),
        or(&r.author, NOT_AVAILABLE),
        or(&r.publisher, NOT_AVAILABLE),
        or(&r.info, NOT_AVAILABLE),
        or(&r.url, NOT_AVAILABLE),
    )
}

/// Prefixes a scheme onto text-result URLs that lack one.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with("//") {
        format!("https:{url}")
    } else {
        format!("https://{url}")
    }
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value.as_deref().and_then(non_blank).unwrap_or(fallback)
}

fn non_blank(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(title: &str, href: &str, body: &str) -> TextResult {
        TextResult { title: Some(title.into()), href: Some(href.into()), body: Some(body.into()) }
    }

    #[test]
    fn text_results_render_numbered_entries() {
        let results = SearchResults::Text(vec![
            text("Rust", "https://www.rust-lang.org/", "A language empowering everyone."),
            text("The Book", "doc.rust-lang.org/book", "Learn Rust."),
        ]);
        assert_eq!(
            format_results(&results),
            "Found 2 results:\n\n\
             1. Rust\n   URL: https://www.rust-lang.org/\n   A language empowering everyone.\n\n\
             2. The Book\n   URL: https://doc.rust-lang.org/book\n   Learn Rust.\n"
        );
    }

    #[rstest]
    #[case("example.com/x", "https://example.com/x")]
    #[case("//example.com/x", "https://example.com/x")]
    #[case("https://example.com/x", "https://example.com/x")]
    #[case("http://example.com/x", "http://example.com/x")]
    fn url_normalization(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(input), expected);
    }

    #[test]
    fn missing_fields_degrade_to_placeholders() {
        let results = SearchResults::Text(vec![TextResult { title: None, href: Some("  ".into()), body: None }]);
        assert_eq!(format_results(&results), "Found 1 results:\n\n1. No title\n   URL: N/A\n   No description\n");

        let results = SearchResults::Images(vec![ImageResult::default()]);
        assert_eq!(
            format_results(&results),
            "Found 1 images:\n\n1. **No title**\n   Image: N/A\n   Thumbnail: N/A\n   Source: N/A\n   Dimensions: ?x?\n"
        );
    }

    #[rstest]
    #[case(SearchResults::Text(vec![]), "No results found.")]
    #[case(SearchResults::Images(vec![]), "No images found.")]
    #[case(SearchResults::Videos(vec![]), "No videos found.")]
    #[case(SearchResults::News(vec![]), "No news found.")]
    #[case(SearchResults::Books(vec![]), "No books found.")]
    fn empty_results_render_literal_message(#[case] results: SearchResults, #[case] expected: &str) {
        assert_eq!(format_results(&results), expected);
    }

    #[test]
    fn image_source_falls_back_to_engine() {
        let results = SearchResults::Images(vec![ImageResult {
            title: Some("Ferris".into()),
            image: Some("https://x/f.png".into()),
            thumbnail: Some("https://t/f.png".into()),
            source: Some("Bing".into()),
            width: Some(460),
            height: Some(307),
            ..ImageResult::default()
        }]);
        let out = format_results(&results);
        assert!(out.contains("   Source: Bing\n"));
        assert!(out.contains("   Dimensions: 460x307\n"));
    }

    #[test]
    fn video_description_is_truncated_by_chars() {
        let long = "é".repeat(250);
        let results = SearchResults::Videos(vec![VideoResult {
            title: Some("Talk".into()),
            description: Some(long),
            ..VideoResult::default()
        }]);
        let out = format_results(&results);
        let expected = format!("   Description: {}...\n", "é".repeat(200));
        assert!(out.ends_with(&expected));
        assert!(out.contains("   URL: N/A\n   Duration: N/A\n"));
    }

    #[test]
    fn short_video_description_still_gets_ellipsis() {
        let results = SearchResults::Videos(vec![VideoResult::default()]);
        assert!(format_results(&results).ends_with("   Description: No description...\n"));
    }

    #[test]
    fn news_and_books_templates() {
        let news = SearchResults::News(vec![NewsResult {
            title: Some("Rust 1.80".into()),
            source: Some("Rust Blog".into()),
            date: Some("2024-07-25T00:00:00+00:00".into()),
            url: Some("https://blog.rust-lang.org/".into()),
            body: Some("LazyLock is stable.".into()),
        }]);
        assert_eq!(
            format_results(&news),
            "Found 1 news articles:\n\n1. **Rust 1.80**\n   Source: Rust Blog\n   Date: 2024-07-25T00:00:00+00:00\n   URL: https://blog.rust-lang.org/\n   LazyLock is stable.\n"
        );

        let books = SearchResults::Books(vec![BookResult { title: Some("Dune".into()), ..BookResult::default() }]);
        assert_eq!(
            format_results(&books),
            "Found 1 books:\n\n1. **Dune**\n   Author: N/A\n   Publisher: N/A\n   Info: N/A\n   URL: N/A\n"
        );
    }

    #[test]
    fn non_text_urls_are_left_alone() {
        let news = SearchResults::News(vec![NewsResult { url: Some("example.com/x".into()), ..NewsResult::default() }]);
        assert!(format_results(&news).contains("   URL: example.com/x\n"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let results = SearchResults::Text(vec![text("a", "//a.example", "b"), text("c", "c.example", "d")]);
        let first = format_results(&results);
        for _ in 0..10 {
            assert_eq!(format_results(&results), first);
        }
    }
}
