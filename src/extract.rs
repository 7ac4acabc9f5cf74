//! Product extraction from rendered listing markup.
//!
//! Extraction is a pure function of the markup: no I/O, no shared state.
//! The structural selectors are coupled to the retailer's unversioned page
//! layout, so they live only in [`ListingExtractor`]; orchestration code
//! depends on the [`ProductExtractor`] trait and never sees a selector.

use scraper::{ElementRef, Html, Selector};

use crate::api::models::ProductRecord;

/// Availability is constant: the scoped listing only shows stocked items.
const AVAILABILITY_IN_STOCK: &str = "In Stock";

/// Size shown when a candidate has no size element.
const SIZE_FALLBACK: &str = "N/A";

/// Strategy seam for turning raw markup into product records.
///
/// `cap` bounds the number of candidate containers examined: scanning stops
/// once `cap` candidates have been seen, so later candidates are ignored
/// rather than merely excluded from the output.
pub trait ProductExtractor: Send + Sync {
    fn extract(&self, markup: &str, cap: usize) -> Vec<ProductRecord>;
}

/// Extractor for the store department listing page.
pub struct ListingExtractor {
    item: Selector,
    title: Selector,
    price: Selector,
    size: Selector,
}

impl ListingExtractor {
    pub fn new() -> Self {
        Self {
            item: Selector::parse("div[data-item-id]").expect("valid selector"),
            title: Selector::parse(r#"span[data-automation-id="product-title"]"#)
                .expect("valid selector"),
            price: Selector::parse(r#"[data-automation-id="product-price"] .f2"#)
                .expect("valid selector"),
            size: Selector::parse(r#"div[data-automation-id="product-size"]"#)
                .expect("valid selector"),
        }
    }
}

impl Default for ListingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductExtractor for ListingExtractor {
    fn extract(&self, markup: &str, cap: usize) -> Vec<ProductRecord> {
        let document = Html::parse_document(markup);
        let mut records = Vec::new();

        for candidate in document.select(&self.item).take(cap) {
            let name = first_text(candidate, &self.title);
            let price = first_text(candidate, &self.price);

            // Candidates missing a name or price are dropped silently.
            if name.is_empty() || price.is_empty() {
                continue;
            }

            let size = match first_text(candidate, &self.size) {
                s if s.is_empty() => SIZE_FALLBACK.to_string(),
                s => s,
            };

            records.push(ProductRecord {
                name,
                price,
                size,
                availability: AVAILABILITY_IN_STOCK.to_string(),
            });
        }

        records
    }
}

/// Trimmed text content of the first element under `scope` matching `selector`.
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
