//! Pure parsers for provider responses. No I/O happens here.

use super::results::{BookResult, ImageResult, NewsResult, TextResult, VideoResult};
use crate::error::Result;
use chrono::DateTime;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

const ANNAS_ARCHIVE_BASE: &str = "https://annas-archive.org";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static DDG_RESULT: LazyLock<Selector> = LazyLock::new(|| selector("div.result"));
static DDG_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.result__a"));
static DDG_SNIPPET: LazyLock<Selector> = LazyLock::new(|| selector(".result__snippet"));
static MOJEEK_RESULT: LazyLock<Selector> = LazyLock::new(|| selector("ul.results-standard > li"));
static MOJEEK_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a.title"));
static MOJEEK_SNIPPET: LazyLock<Selector> = LazyLock::new(|| selector("p.s"));
static AA_RECORD: LazyLock<Selector> = LazyLock::new(|| selector("div.record-list-outer > div"));
static AA_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("a.text-lg"));
static AA_INFO: LazyLock<Selector> = LazyLock::new(|| selector("div.text-gray-800"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));

/// One page of a paginated JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Offset to request the following page with, if any.
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JsonPage {
    #[serde(default)]
    results: Vec<Value>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WikiResponse {
    #[serde(default)]
    query: WikiQuery,
}

#[derive(Debug, Default, Deserialize)]
struct WikiQuery {
    #[serde(default)]
    search: Vec<WikiHit>,
}

#[derive(Debug, Deserialize)]
struct WikiHit {
    title: Option<String>,
    #[serde(default)]
    snippet: String,
}

/// Pulls the `vqd` token DuckDuckGo embeds in its search page.
pub fn extract_vqd(body: &str) -> Option<String> {
    for (open, close) in [("vqd=\"", '"'), ("vqd='", '\''), ("vqd=", '&')] {
        let Some(start) = body.find(open) else { continue };
        let rest = &body[start + open.len()..];
        if let Some(end) = rest.find(close) {
            let token = rest[..end].trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

pub fn duckduckgo_html(html: &str) -> Vec<TextResult> {
    let document = Html::parse_document(html);
    document
        .select(&DDG_RESULT)
        .filter(|el| !has_class_containing(el, "result--ad"))
        .filter_map(|el| {
            let link = el.select(&DDG_LINK).next()?;
            let href = decode_ddg_redirect(link.value().attr("href")?);
            if href.contains("duckduckgo.com/y.js") {
                return None;
            }
            Some(TextResult {
                title: non_empty(element_text(&link)),
                href: non_empty(href),
                body: el.select(&DDG_SNIPPET).next().and_then(|s| non_empty(element_text(&s))),
            })
        })
        .collect()
}

pub fn mojeek_html(html: &str) -> Vec<TextResult> {
    let document = Html::parse_document(html);
    document
        .select(&MOJEEK_RESULT)
        .filter_map(|el| {
            let link = el.select(&MOJEEK_LINK).next()?;
            Some(TextResult {
                title: non_empty(element_text(&link)),
                href: link.value().attr("href").and_then(|h| non_empty(h.to_string())),
                body: el.select(&MOJEEK_SNIPPET).next().and_then(|s| non_empty(element_text(&s))),
            })
        })
        .collect()
}

/// MediaWiki `list=search` response.
pub fn wikipedia_json(body: &str, lang: &str) -> Result<Vec<TextResult>> {
    let response: WikiResponse = serde_json::from_str(body)?;
    let results = response
        .query
        .search
        .into_iter()
        .map(|hit| {
            let title = hit.title.and_then(non_empty);
            let href = title.as_deref().and_then(|t| wikipedia_article_url(lang, t));
            TextResult { title, href, body: non_empty(strip_tags(&hit.snippet)) }
        })
        .collect();
    Ok(results)
}

/// Article link with the title percent-encoded as a single path segment.
fn wikipedia_article_url(lang: &str, title: &str) -> Option<String> {
    let mut url = Url::parse(&format!("https://{lang}.wikipedia.org/wiki/")).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().push(&title.replace(' ', "_"));
    Some(url.to_string())
}

pub fn duckduckgo_images(body: &str) -> Result<Page<ImageResult>> {
    json_page(body, |r| ImageResult {
        title: str_field(r, "title"),
        image: str_field(r, "image"),
        thumbnail: str_field(r, "thumbnail"),
        url: str_field(r, "url"),
        source: str_field(r, "source"),
        width: u64_field(r, "width"),
        height: u64_field(r, "height"),
    })
}

pub fn duckduckgo_videos(body: &str) -> Result<Page<VideoResult>> {
    json_page(body, |r| VideoResult {
        title: str_field(r, "title"),
        content: str_field(r, "content"),
        duration: str_field(r, "duration"),
        publisher: str_field(r, "publisher"),
        published: str_field(r, "published"),
        description: str_field(r, "description"),
    })
}

pub fn duckduckgo_news(body: &str) -> Result<Page<NewsResult>> {
    json_page(body, |r| NewsResult {
        title: str_field(r, "title").map(|t| strip_tags(&t)),
        source: str_field(r, "source"),
        date: r["date"]
            .as_i64()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|d| d.to_rfc3339())
            .or_else(|| str_field(r, "date")),
        url: str_field(r, "url"),
        body: str_field(r, "excerpt").and_then(|e| non_empty(strip_tags(&e))),
    })
}

pub fn annas_archive_html(html: &str) -> Vec<BookResult> {
    let document = Html::parse_document(html);
    document
        .select(&AA_RECORD)
        .filter_map(|el| {
            let title = el.select(&AA_TITLE).next().and_then(|t| non_empty(element_text(&t)))?;
            let url = el
                .select(&ANCHOR)
                .find_map(|a| a.value().attr("href"))
                .map(|href| {
                    if href.starts_with('/') { format!("{ANNAS_ARCHIVE_BASE}{href}") } else { href.to_string() }
                });
            Some(BookResult {
                title: Some(title),
                author: labelled_link(&el, "mdi--user-edit"),
                publisher: labelled_link(&el, "mdi--company"),
                info: el.select(&AA_INFO).next().and_then(|i| non_empty(element_text(&i))),
                url,
            })
        })
        .collect()
}

/// Text of the first link carrying an icon span whose class contains `icon`.
fn labelled_link(el: &ElementRef<'_>, icon: &str) -> Option<String> {
    el.select(&ANCHOR)
        .find(|a| a.select(&SPAN).any(|s| has_class_containing(&s, icon)))
        .and_then(|a| non_empty(element_text(&a)))
}

fn json_page<T>(body: &str, map: impl Fn(&Value) -> T) -> Result<Page<T>> {
    let page: JsonPage = serde_json::from_str(body)?;
    let items = page.results.iter().map(map).collect();
    let next = page.next.as_deref().and_then(next_offset);
    Ok(Page { items, next })
}

/// Extracts the `s` offset from a relative `next` link such as `i.js?q=x&s=100`.
pub fn next_offset(next: &str) -> Option<String> {
    let url = Url::parse("https://duckduckgo.com/").ok()?.join(next).ok()?;
    url.query_pairs().find(|(k, _)| k == "s").map(|(_, v)| v.into_owned())
}

/// Unwraps DuckDuckGo's `/l/?uddg=<target>` redirect links.
pub fn decode_ddg_redirect(href: &str) -> String {
    if !href.contains("uddg=") {
        return href.to_string();
    }
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };
    Url::parse(&absolute)
        .ok()
        .and_then(|u| u.query_pairs().find(|(k, _)| k == "uddg").map(|(_, v)| v.into_owned()))
        .unwrap_or_else(|| href.to_string())
}

pub fn strip_tags(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    collapse_whitespace(&html.root_element().text().collect::<String>())
}

fn element_text(el: &ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_class_containing(el: &ElementRef<'_>, needle: &str) -> bool {
    el.value().attr("class").is_some_and(|c| c.contains(needle))
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).and_then(|s| non_empty(s.to_string()))
}

fn u64_field(v: &Value, key: &str) -> Option<u64> {
    match v.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
