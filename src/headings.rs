use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::HeadingOrder;

/// Decoration Wikipedia appends to section titles.
const EDIT_MARKER: &str = "[edit]";

// Create static selectors to avoid recompiling them each time
static LEVEL_SELECTORS: Lazy<Vec<(u8, Selector)>> = Lazy::new(|| {
    (1..=6u8)
        .map(|level| {
            let selector = Selector::parse(&format!("h{}", level))
                .expect("Failed to parse heading selector");
            (level, selector)
        })
        .collect()
});

static ANY_HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("Failed to parse heading selector")
});

/// A section title with its depth in the article hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    level: u8,
    text: String,
}

impl Heading {
    /// Returns `None` unless `level` is within 1..=6.
    pub fn new(level: u8, text: impl Into<String>) -> Option<Self> {
        (1..=6).contains(&level).then(|| Heading {
            level,
            text: text.into(),
        })
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Collects the non-empty `h1`..`h6` headings of a document.
///
/// With [`HeadingOrder::ByLevel`] the result is grouped by level: every
/// `h1` precedes every `h2`, whatever their position in the markup.
pub fn extract_headings(html: &str, order: HeadingOrder) -> Vec<Heading> {
    let document = Html::parse_document(html);

    let headings: Vec<Heading> = match order {
        HeadingOrder::ByLevel => LEVEL_SELECTORS
            .iter()
            .flat_map(|(level, selector)| {
                document
                    .select(selector)
                    .filter_map(move |element| heading_at(*level, element))
            })
            .collect(),
        HeadingOrder::Document => document
            .select(&ANY_HEADING_SELECTOR)
            .filter_map(|element| {
                let level = element
                    .value()
                    .name()
                    .strip_prefix('h')
                    .and_then(|digit| digit.parse::<u8>().ok())?;
                heading_at(level, element)
            })
            .collect(),
    };

    debug!(count = headings.len(), ?order, "extracted headings");
    headings
}

fn heading_at(level: u8, element: ElementRef<'_>) -> Option<Heading> {
    let text = clean_heading_text(&element.text().collect::<String>());
    if text.is_empty() {
        return None;
    }
    Heading::new(level, text)
}

fn clean_heading_text(raw: &str) -> String {
    raw.trim().replace(EDIT_MARKER, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(headings: &[Heading]) -> Vec<(u8, &str)> {
        headings.iter().map(|h| (h.level(), h.text())).collect()
    }

    #[test]
    fn overview_and_history() {
        let headings = extract_headings(
            "<h1>Overview</h1><h2>History[edit]</h2>",
            HeadingOrder::ByLevel,
        );
        assert_eq!(pairs(&headings), vec![(1, "Overview"), (2, "History")]);
    }

    #[test]
    fn wikipedia_edit_section_is_stripped() {
        let html = r#"
            <h2><span class="mw-headline" id="History">History</span>
                <span class="mw-editsection"><span class="mw-editsection-bracket">[</span><a href="/w/index.php?action=edit">edit</a><span class="mw-editsection-bracket">]</span></span>
            </h2>"#;
        let headings = extract_headings(html, HeadingOrder::ByLevel);
        assert_eq!(pairs(&headings), vec![(2, "History")]);
    }

    #[test]
    fn nested_inline_text_is_concatenated() {
        let headings = extract_headings(
            "<h3>Flora <i>and</i> <b>fauna</b></h3>",
            HeadingOrder::ByLevel,
        );
        assert_eq!(pairs(&headings), vec![(3, "Flora and fauna")]);
    }

    #[test]
    fn empty_and_decoration_only_headings_are_skipped() {
        let headings = extract_headings(
            "<h1>   </h1><h2>[edit]</h2><h3> [edit] </h3><h4></h4><h5>Kept</h5>",
            HeadingOrder::ByLevel,
        );
        assert_eq!(pairs(&headings), vec![(5, "Kept")]);
    }

    #[test]
    fn by_level_groups_instead_of_interleaving() {
        let html = "<h2>Geography</h2><h1>Japan</h1><h3>Climate</h3><h2>Economy</h2>";
        let headings = extract_headings(html, HeadingOrder::ByLevel);
        assert_eq!(
            pairs(&headings),
            vec![(1, "Japan"), (2, "Geography"), (2, "Economy"), (3, "Climate")]
        );
    }

    #[test]
    fn document_order_interleaves_levels() {
        let html = "<h2>Geography</h2><h1>Japan</h1><h3>Climate</h3><h2>Economy</h2>";
        let headings = extract_headings(html, HeadingOrder::Document);
        assert_eq!(
            pairs(&headings),
            vec![(2, "Geography"), (1, "Japan"), (3, "Climate"), (2, "Economy")]
        );
    }

    #[test]
    fn only_six_levels_are_considered() {
        let headings = extract_headings(
            "<h6>Deepest</h6><h7>Not a heading</h7><header>Nope</header>",
            HeadingOrder::Document,
        );
        assert_eq!(pairs(&headings), vec![(6, "Deepest")]);
    }

    #[test]
    fn malformed_markup_still_parses() {
        let headings = extract_headings("<h1>Unclosed <b>title", HeadingOrder::ByLevel);
        assert_eq!(pairs(&headings), vec![(1, "Unclosed title")]);
    }

    #[test]
    fn heading_level_is_bounded() {
        assert!(Heading::new(0, "zero").is_none());
        assert!(Heading::new(7, "seven").is_none());
        assert_eq!(Heading::new(6, "six").map(|h| h.level()), Some(6));
    }
}
