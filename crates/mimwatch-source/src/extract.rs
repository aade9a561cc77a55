//! Heuristic extraction of the latest news link from the USR Lombardia page.
//!
//! The page has no feed and no stable markup, so the extractor walks a list
//! of selectors from most to least specific and returns the first link that
//! passes the URL and title filters.

use mimwatch_core::{error::WatchError, message::NewsItem, traits::Extractor};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Candidate link selectors, most specific first.
const CANDIDATE_SELECTORS: &[&str] = &[
    "li.asset-tab-home a[href]",
    "li.bg_today a[href]",
    ".news-item a[href]",
    ".comunicazione a[href]",
    "article a[href]",
    "li a[href]",
    "a[href]",
];

/// Substrings that mark navigation or boilerplate links.
const INVALID_HREF_PATTERNS: &[&str] = &[
    "javascript:",
    "mailto:",
    "#content",
    "#tab",
    "cookie-policy",
    "privacy-policy",
    "accessibilita",
    "/cerca",
    "/search",
];

/// Substrings that mark navigation titles rather than news.
const INVALID_TITLE_PATTERNS: &[&str] = &[
    "home",
    "cerca",
    "contatti",
    "privacy",
    "cookie",
    "accessibilità",
    "vai al contenuto",
    "menu principale",
    "ultime comunicazioni",
];

/// Shortest title, in characters, accepted as a news headline.
const MIN_TITLE_CHARS: usize = 10;

/// Extractor tuned for the MiM regional office pages.
pub struct MimExtractor {
    base: Url,
}

impl MimExtractor {
    /// `base_url` is the page URL; relative links are resolved against it.
    pub fn new(base_url: &str) -> Result<Self, WatchError> {
        let base = Url::parse(base_url)
            .map_err(|e| WatchError::Config(format!("invalid source url {base_url:?}: {e}")))?;
        Ok(Self { base })
    }
}

impl Extractor for MimExtractor {
    fn extract_latest(&self, html: &str) -> Option<NewsItem> {
        let document = Html::parse_document(html);
        let scope = news_container(&document).unwrap_or_else(|| document.root_element());

        for raw in CANDIDATE_SELECTORS {
            let selector = match Selector::parse(raw) {
                Ok(s) => s,
                Err(e) => {
                    warn!("skipping bad selector {raw}: {e}");
                    continue;
                }
            };

            for link in scope.select(&selector) {
                let title = link_text(&link);
                let href = link.value().attr("href").unwrap_or("").trim();

                if !is_valid_news_url(href) || !is_valid_news_title(&title) {
                    continue;
                }

                let absolute = match self.base.join(href) {
                    Ok(u) => u,
                    Err(e) => {
                        debug!("unresolvable href {href:?}: {e}");
                        continue;
                    }
                };

                debug!("latest item via {raw}: {title} -> {href}");
                return Some(NewsItem::new(title, absolute.as_str(), href));
            }
        }

        warn!("no valid news link found on page");
        None
    }
}

/// The tab container holding the news list, when the page has one.
fn news_container(document: &Html) -> Option<ElementRef<'_>> {
    let with_id = Selector::parse("[id]").ok()?;
    document.select(&with_id).find(|el| {
        el.value()
            .id()
            .is_some_and(|id| id.trim().starts_with("tab-container"))
    })
}

/// Visible text of a link: trimmed fragments joined without separator.
fn link_text(link: &ElementRef<'_>) -> String {
    link.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("")
}

/// Whether `href` can point at a news article.
pub fn is_valid_news_url(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    let lower = href.to_lowercase();
    !INVALID_HREF_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Whether `title` looks like a headline rather than navigation.
pub fn is_valid_news_title(title: &str) -> bool {
    let title = title.trim();
    if title.chars().count() < MIN_TITLE_CHARS {
        return false;
    }
    let lower = title.to_lowercase();
    !INVALID_TITLE_PATTERNS.iter().any(|p| lower.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.mim.gov.it/web/usr-lombardia";

    fn extractor() -> MimExtractor {
        MimExtractor::new(BASE).unwrap()
    }

    #[test]
    fn test_prefers_tab_container_asset_link() {
        let html = r#"
            <html><body>
              <nav><a href="/web/usr-lombardia/altro-articolo-lungo">Altro articolo molto lungo</a></nav>
              <div id=" tab-container-123">
                <ul>
                  <li class="asset-tab-home">
                    <a href="/web/usr-lombardia/-/avviso-1"> Avviso 1: graduatorie </a>
                  </li>
                </ul>
              </div>
            </body></html>"#;
        let item = extractor().extract_latest(html).unwrap();
        assert_eq!(item.title(), "Avviso 1: graduatorie");
        assert_eq!(item.key(), "/web/usr-lombardia/-/avviso-1");
        assert_eq!(
            item.url(),
            "https://www.mim.gov.it/web/usr-lombardia/-/avviso-1"
        );
    }

    #[test]
    fn test_skips_navigation_links() {
        let html = r##"
            <ul>
              <li><a href="#content">Vai al contenuto principale</a></li>
              <li><a href="/privacy-policy">Informativa completa sul trattamento</a></li>
              <li><a href="/web/home">Torna alla Home del sito</a></li>
              <li><a href="mailto:info@example.org">Scrivi alla redazione regionale</a></li>
              <li><a href="/news/nomine-docenti">Nomine docenti a tempo determinato</a></li>
            </ul>"##;
        let item = extractor().extract_latest(html).unwrap();
        assert_eq!(item.key(), "/news/nomine-docenti");
    }

    #[test]
    fn test_short_titles_rejected() {
        let html = r#"<ul><li><a href="/news/x">Breve</a></li></ul>"#;
        assert!(extractor().extract_latest(html).is_none());
    }

    #[test]
    fn test_falls_back_to_any_link() {
        let html = r#"<p>Leggi <a href="https://other.example/bando-2026">Bando regionale 2026 per le scuole</a></p>"#;
        let item = extractor().extract_latest(html).unwrap();
        assert_eq!(item.url(), "https://other.example/bando-2026");
        assert_eq!(item.key(), "https://other.example/bando-2026");
    }

    #[test]
    fn test_title_joins_nested_text() {
        let html = r#"<article><a href="/n/1"><span> Calendario </span><b>scolastico 2026</b></a></article>"#;
        let item = extractor().extract_latest(html).unwrap();
        assert_eq!(item.title(), "Calendarioscolastico 2026");
    }

    #[test]
    fn test_empty_page_yields_none() {
        assert!(extractor().extract_latest("").is_none());
        assert!(extractor().extract_latest("<html></html>").is_none());
    }

    #[test]
    fn test_url_filters() {
        assert!(is_valid_news_url("/news/a"));
        assert!(!is_valid_news_url("  "));
        assert!(!is_valid_news_url("#top"));
        assert!(!is_valid_news_url("JavaScript:void(0)"));
        assert!(!is_valid_news_url("/web/usr/cerca?q=x"));
    }

    #[test]
    fn test_title_filters() {
        assert!(is_valid_news_title("Mobilità personale ATA 2026"));
        assert!(!is_valid_news_title("Contatti dell'ufficio scolastico"));
        assert!(!is_valid_news_title("Ultime comunicazioni dall'USR"));
        // Nine multi-byte characters are still too short.
        assert!(!is_valid_news_title("àèìòùàèìò"));
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            MimExtractor::new("not a url"),
            Err(WatchError::Config(_))
        ));
    }
}
