use crate::tools::SearchKind;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResult {
    pub title: Option<String>,
    pub href: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResult {
    pub title: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    /// Page the image was found on.
    pub url: Option<String>,
    /// Engine that reported the image.
    pub source: Option<String>,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoResult {
    pub title: Option<String>,
    /// Video page URL.
    pub content: Option<String>,
    pub duration: Option<String>,
    pub publisher: Option<String>,
    pub published: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsResult {
    pub title: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookResult {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub info: Option<String>,
    pub url: Option<String>,
}

/// Provider output for one request, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResults {
    Text(Vec<TextResult>),
    Images(Vec<ImageResult>),
    Videos(Vec<VideoResult>),
    News(Vec<NewsResult>),
    Books(Vec<BookResult>),
}

impl SearchResults {
    pub fn kind(&self) -> SearchKind {
        match self {
            SearchResults::Text(_) => SearchKind::Text,
            SearchResults::Images(_) => SearchKind::Images,
            SearchResults::Videos(_) => SearchKind::Videos,
            SearchResults::News(_) => SearchKind::News,
            SearchResults::Books(_) => SearchKind::Books,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Text(r) => r.len(),
            SearchResults::Images(r) => r.len(),
            SearchResults::Videos(r) => r.len(),
            SearchResults::News(r) => r.len(),
            SearchResults::Books(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
