use super::parse::{self, Page};
use super::results::{BookResult, ImageResult, NewsResult, TextResult, VideoResult};
use super::{ClientConfig, ClientFactory, SearchClient};
use crate::error::{ProviderError, Result};
use crate::tools::choice::{Choice, SafeSearch, TimeLimit};
use crate::tools::{BookSearchRequest, ImageSearchRequest, NewsSearchRequest, TextSearchRequest, VideoSearchRequest};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::REFERER;
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const TOR_BROWSER_PROXY: &str = "socks5h://127.0.0.1:9150";

const DDG_HOME: &str = "https://duckduckgo.com/";
const DDG_HTML: &str = "https://html.duckduckgo.com/html/";
const DDG_IMAGES: &str = "https://duckduckgo.com/i.js";
const DDG_VIDEOS: &str = "https://duckduckgo.com/v.js";
const DDG_NEWS: &str = "https://duckduckgo.com/news.js";
const MOJEEK_SEARCH: &str = "https://www.mojeek.com/search";
const ANNAS_ARCHIVE_SEARCH: &str = "https://annas-archive.org/search";

/// Upper bound on pages fetched for one request, whatever `max_results` asks for.
const MAX_PAGES: usize = 10;

/// HTTP-backed provider client.
#[derive(Debug)]
pub struct DdgsClient {
    http: Client,
}

impl DdgsClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls());

        if let Some(proxy) = config.proxy() {
            let url = expand_proxy(proxy);
            let proxy = reqwest::Proxy::all(&url)
                .map_err(|e| ProviderError::InvalidProxy { proxy: url.clone(), message: e.to_string() })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self { http: builder.build()? })
    }

    fn fetch(&self, backend: &'static str, request: RequestBuilder) -> Result<String> {
        let resp = request.send()?;
        let status = resp.status();
        // DuckDuckGo signals rate limiting with 202, so anything but 200 is a failure.
        if status != StatusCode::OK {
            return Err(ProviderError::Status { backend, status: status.as_u16() });
        }
        Ok(resp.text()?)
    }

    fn vqd(&self, query: &str) -> Result<String> {
        let body = self.fetch("duckduckgo", self.http.get(DDG_HOME).query(&[("q", query)]))?;
        parse::extract_vqd(&body).ok_or(ProviderError::MissingToken { backend: "duckduckgo" })
    }

    fn text_duckduckgo(&self, req: &TextSearchRequest) -> Result<Vec<TextResult>> {
        paged_text(req.max_results, |offset| {
            let mut form = vec![
                ("q", req.query.clone()),
                ("b", String::new()),
                ("kl", req.region.clone()),
                ("kp", safesearch_param(req.safesearch).into()),
            ];
            if let Some(t) = req.timelimit {
                form.push(("df", t.as_str().into()));
            }
            if offset > 0 {
                form.push(("s", offset.to_string()));
                form.push(("dc", (offset + 1).to_string()));
            }
            let html = self.fetch("duckduckgo", self.http.post(DDG_HTML).form(&form))?;
            Ok(parse::duckduckgo_html(&html))
        })
    }

    fn text_mojeek(&self, req: &TextSearchRequest) -> Result<Vec<TextResult>> {
        paged_text(req.max_results, |offset| {
            let mut query = vec![("q", req.query.clone())];
            if req.safesearch == SafeSearch::On {
                query.push(("safe", "1".into()));
            }
            if offset > 0 {
                query.push(("s", (offset + 1).to_string()));
            }
            let html = self.fetch("mojeek", self.http.get(MOJEEK_SEARCH).query(&query))?;
            Ok(parse::mojeek_html(&html))
        })
    }

    fn text_wikipedia(&self, req: &TextSearchRequest) -> Result<Vec<TextResult>> {
        let lang = wikipedia_lang(&req.region);
        let url = format!("https://{lang}.wikipedia.org/w/api.php");
        let limit = req.max_results.to_string();
        let query = [
            ("action", "query"),
            ("list", "search"),
            ("format", "json"),
            ("srsearch", req.query.as_str()),
            ("srlimit", limit.as_str()),
        ];
        let body = self.fetch("wikipedia", self.http.get(&url).query(&query))?;
        parse::wikipedia_json(&body, &lang)
    }

    /// Follows DuckDuckGo's `next` offsets until `max` items are collected.
    fn paged_json<T>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        max: u32,
        parse_page: fn(&str) -> Result<Page<T>>,
    ) -> Result<Vec<T>> {
        let max = max as usize;
        let mut items = Vec::new();
        for _ in 0..MAX_PAGES {
            let request = self.http.get(endpoint).header(REFERER, DDG_HOME).query(&params);
            let page = parse_page(&self.fetch("duckduckgo", request)?)?;
            let empty = page.items.is_empty();
            items.extend(page.items);
            if empty || items.len() >= max {
                break;
            }
            let Some(next) = page.next else { break };
            params.retain(|(k, _)| *k != "s");
            params.push(("s", next));
        }
        items.truncate(max);
        Ok(items)
    }
}

impl SearchClient for DdgsClient {
    fn text(&self, req: &TextSearchRequest) -> Result<Vec<TextResult>> {
        if let Some(other) = req.backends().find(|b| !super::TEXT_BACKENDS.contains(b)) {
            return Err(ProviderError::UnsupportedBackend { backend: other.into(), kind: "text" });
        }
        let max = req.max_results as usize;
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for backend in req.backends() {
            debug!("text search via {backend}");
            let results = match backend {
                "duckduckgo" => self.text_duckduckgo(req)?,
                "wikipedia" => self.text_wikipedia(req)?,
                "mojeek" => self.text_mojeek(req)?,
                other => {
                    return Err(ProviderError::UnsupportedBackend { backend: other.into(), kind: "text" });
                }
            };
            for r in results {
                let key = r.href.clone().unwrap_or_default();
                if key.is_empty() || seen.insert(key) {
                    merged.push(r);
                }
            }
        }
        merged.truncate(max);
        Ok(merged)
    }

    fn images(&self, req: &ImageSearchRequest) -> Result<Vec<ImageResult>> {
        let vqd = self.vqd(&req.query)?;
        let filters = format!(
            "time:{},size:{},color:{},type:{},layout:{},license:{}",
            req.timelimit.map(image_timelimit).unwrap_or_default(),
            opt_str(req.size),
            opt_str(req.color),
            opt_str(req.type_image),
            opt_str(req.layout),
            opt_str(req.license_image),
        );
        let safe = match req.safesearch {
            SafeSearch::On | SafeSearch::Moderate => "1",
            SafeSearch::Off => "-1",
        };
        let params = vec![
            ("l", req.region.clone()),
            ("o", "json".into()),
            ("q", req.query.clone()),
            ("vqd", vqd),
            ("f", filters),
            ("p", safe.into()),
        ];
        self.paged_json(DDG_IMAGES, params, req.max_results, parse::duckduckgo_images)
    }

    fn videos(&self, req: &VideoSearchRequest) -> Result<Vec<VideoResult>> {
        let vqd = self.vqd(&req.query)?;
        let filters = format!(
            "publishedAfter:{},videoDefinition:{},videoDuration:{},videoLicense:{}",
            opt_str(req.timelimit),
            opt_str(req.resolution),
            opt_str(req.duration),
            opt_str(req.license_videos),
        );
        let params = vec![
            ("l", req.region.clone()),
            ("o", "json".into()),
            ("q", req.query.clone()),
            ("vqd", vqd),
            ("f", filters),
            ("p", safesearch_param(req.safesearch).into()),
        ];
        self.paged_json(DDG_VIDEOS, params, req.max_results, parse::duckduckgo_videos)
    }

    fn news(&self, req: &NewsSearchRequest) -> Result<Vec<NewsResult>> {
        if let Some(other) = req.backends().find(|b| !super::NEWS_BACKENDS.contains(b)) {
            return Err(ProviderError::UnsupportedBackend { backend: other.into(), kind: "news" });
        }
        let vqd = self.vqd(&req.query)?;
        let mut params = vec![
            ("l", req.region.clone()),
            ("o", "json".into()),
            ("noamp", "1".into()),
            ("q", req.query.clone()),
            ("vqd", vqd),
            ("p", safesearch_param(req.safesearch).into()),
        ];
        if let Some(t) = req.timelimit {
            params.push(("df", t.as_str().into()));
        }
        self.paged_json(DDG_NEWS, params, req.max_results, parse::duckduckgo_news)
    }

    fn books(&self, req: &BookSearchRequest) -> Result<Vec<BookResult>> {
        let html = self.fetch("annas_archive", self.http.get(ANNAS_ARCHIVE_SEARCH).query(&[("q", &req.query)]))?;
        let mut results = parse::annas_archive_html(&html);
        results.truncate(req.max_results as usize);
        Ok(results)
    }
}

/// Builds a fresh [`DdgsClient`] per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdgsClientFactory;

impl ClientFactory for DdgsClientFactory {
    fn build(&self, config: &ClientConfig) -> Result<Arc<dyn SearchClient>> {
        debug!("Building search client (proxy: {})", config.proxy().unwrap_or("none"));
        Ok(Arc::new(DdgsClient::new(config)?))
    }
}

/// Fetches pages through `fetch_page(offset)` until `max` distinct results are
/// collected or a page adds nothing new.
fn paged_text(max: u32, mut fetch_page: impl FnMut(usize) -> Result<Vec<TextResult>>) -> Result<Vec<TextResult>> {
    let max = max as usize;
    let mut seen = HashSet::new();
    let mut results = Vec::new();
    let mut offset = 0;
    for _ in 0..MAX_PAGES {
        let page = fetch_page(offset)?;
        offset += page.len();
        let before = results.len();
        for r in page {
            let key = r.href.clone().unwrap_or_default();
            if key.is_empty() || seen.insert(key) {
                results.push(r);
            }
        }
        if results.len() == before || results.len() >= max {
            break;
        }
    }
    results.truncate(max);
    Ok(results)
}

fn expand_proxy(proxy: &str) -> String {
    if proxy == "tb" { TOR_BROWSER_PROXY.to_string() } else { proxy.to_string() }
}

/// Two-letter Wikipedia language from a `cc-lang` region, defaulting to English.
fn wikipedia_lang(region: &str) -> String {
    region
        .split('-')
        .nth(1)
        .filter(|l| l.len() == 2 && l.chars().all(|c| c.is_ascii_alphabetic()) && *l != "wt")
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "en".into())
}

/// DuckDuckGo's `kp`/`p` safesearch values.
fn safesearch_param(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::On => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

fn image_timelimit(t: TimeLimit) -> &'static str {
    match t {
        TimeLimit::Day => "Day",
        TimeLimit::Week => "Week",
        TimeLimit::Month => "Month",
        TimeLimit::Year => "Year",
    }
}

fn opt_str<T: Choice>(value: Option<T>) -> &'static str {
    value.map(Choice::as_str).unwrap_or_default()
}
