// extract.rs
//
// Heuristic listing-card extraction for the featured-listings widget. The
// upstream markup has no stable contract, so every field is recovered through
// its own fallback chain and simply stays empty when nothing matches.
use crate::featured::models::ListingRecord;
use crate::featured::urls::{absolutize, is_on_domain, site_domain};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

pub const MAX_LISTINGS: usize = 24;

/// How far up from an anchor we look for its card.
const MAX_CARD_DEPTH: usize = 6;

const CARD_TAGS: &[&str] = &["li", "tr"];
const CARD_CLASS_HINTS: &[&str] = &["card", "listing", "property", "result", "item"];
const LAZY_IMAGE_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-original"];

static RE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s?\d[\d,]*(?:\.\d+)?(?:\s?[KkMm]\b)?").unwrap());
static RE_BEDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:bedrooms?|beds?|bds?|br)\b").unwrap()
});
static RE_BATHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:bathrooms?|baths?|ba)\b").unwrap()
});
static RE_SQFT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d+)\s*(?:sq\.?\s*ft|sqft|sf)\b").unwrap()
});

/// Parse `html` and extract listing cards from it.
pub fn extract_from_html(html: &str, origin: &Url) -> Vec<ListingRecord> {
    let document = Html::parse_document(html);
    extract(&document, origin)
}

/// Find listing cards in a parsed widget page.
///
/// Every anchor that links into the widget's own domain is a candidate, unless
/// its card is about a different link. The result keeps the first occurrence of each `url + image` pair, drops entries
/// without a photo or price, and never holds more than [`MAX_LISTINGS`].
pub fn extract(document: &Html, origin: &Url) -> Vec<ListingRecord> {
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return vec![];
    };
    let domain = site_domain(origin);

    let records = document
        .select(&anchor_sel)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href").unwrap_or_default();
            let url = absolutize(href, origin);
            if url.is_empty() || !is_on_domain(&url, &domain) {
                return None;
            }
            record_for_anchor(anchor, url, origin, &domain)
        })
        .filter(ListingRecord::is_listing);

    dedup_and_cap(records)
}

/// Keep first occurrences by `url + image`, in order, up to [`MAX_LISTINGS`].
pub fn dedup_and_cap<I>(records: I) -> Vec<ListingRecord>
where
    I: IntoIterator<Item = ListingRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert(r.dedup_key()))
        .take(MAX_LISTINGS)
        .collect()
}

/// Build the record for one anchor. Secondary links inside a card (agent
/// profile, "more photos") yield nothing; only the card's main link does.
fn record_for_anchor(
    anchor: ElementRef,
    url: String,
    origin: &Url,
    domain: &str,
) -> Option<ListingRecord> {
    let card = find_card(anchor, origin, domain);
    if primary_link(card, origin, domain).is_some_and(|main| main != url) {
        return None;
    }
    let text = flatten_text(card);

    let image = first_image(card)
        .map(|src| absolutize(&src, origin))
        .unwrap_or_default();

    Some(ListingRecord {
        url,
        image,
        price: RE_PRICE
            .find(&text)
            .map(|m| m.as_str().replace(' ', "").trim_end_matches(',').to_string())
            .unwrap_or_default(),
        beds: first_capture(&RE_BEDS, &text),
        baths: first_capture(&RE_BATHS, &text),
        sqft: first_capture(&RE_SQFT, &text).replace(',', ""),
        address: address_for(anchor, card),
    })
}

/// Nearest ancestor that looks like a card and holds at most one photo link.
/// Falls back to the anchor's parent, then to the anchor itself.
fn find_card<'a>(anchor: ElementRef<'a>, origin: &Url, domain: &str) -> ElementRef<'a> {
    let ancestors: Vec<ElementRef<'a>> = anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .take(MAX_CARD_DEPTH)
        .collect();
    let fits = |el: &ElementRef<'a>| holds_one_listing(*el, origin, domain);

    let by_tag = |tag: &&str| {
        ancestors
            .iter()
            .find(|el| el.value().name() == *tag && fits(*el))
            .copied()
    };
    let by_class = || {
        ancestors
            .iter()
            .find(|el| has_card_class(el) && fits(*el))
            .copied()
    };

    by_tag(&"article")
        .or_else(by_class)
        .or_else(|| CARD_TAGS.iter().find_map(by_tag))
        .or_else(|| ancestors.first().copied().filter(fits))
        .unwrap_or(anchor)
}

fn has_card_class(el: &ElementRef) -> bool {
    el.value().classes().any(|class| {
        let class = class.to_ascii_lowercase();
        CARD_CLASS_HINTS.iter().any(|hint| class.contains(hint))
    })
}

// A wrapper around several cards would hand every anchor the same photo.
fn holds_one_listing(el: ElementRef, origin: &Url, domain: &str) -> bool {
    let photo_links: HashSet<String> = site_links(el, origin, domain)
        .into_iter()
        .filter(|(_, has_photo)| *has_photo)
        .map(|(url, _)| url)
        .collect();
    photo_links.len() <= 1
}

/// The link a card is about: its first photo link, else its first link.
fn primary_link(card: ElementRef, origin: &Url, domain: &str) -> Option<String> {
    let links = site_links(card, origin, domain);
    links
        .iter()
        .find(|(_, has_photo)| *has_photo)
        .or(links.first())
        .map(|(url, _)| url.clone())
}

/// Same-site anchors below `el`, in document order, flagged when they wrap an image.
fn site_links(el: ElementRef, origin: &Url, domain: &str) -> Vec<(String, bool)> {
    let (Ok(anchor_sel), Ok(img_sel)) = (Selector::parse("a[href]"), Selector::parse("img")) else {
        return vec![];
    };
    el.select(&anchor_sel)
        .filter_map(|a| {
            let url = absolutize(a.value().attr("href")?, origin);
            if url.is_empty() || !is_on_domain(&url, domain) {
                return None;
            }
            Some((url, a.select(&img_sel).next().is_some()))
        })
        .collect()
}

fn first_image(card: ElementRef) -> Option<String> {
    let img_sel = Selector::parse("img").ok()?;
    let img = card.select(&img_sel).next()?;
    let attrs = img.value();

    let usable = |v: &&str| !v.trim().is_empty() && !v.trim_start().starts_with("data:");

    attrs
        .attr("src")
        .filter(usable)
        .or_else(|| {
            LAZY_IMAGE_ATTRS
                .iter()
                .find_map(|name| attrs.attr(name).filter(usable))
        })
        .or_else(|| {
            attrs
                .attr("srcset")
                .and_then(|set| set.split(',').next())
                .and_then(|first| first.split_whitespace().next())
                .filter(usable)
        })
        .map(|s| s.trim().to_string())
}

/// Title attribute, then anchor text, then an address-classed element, then
/// the card photo's alt text.
fn address_for(anchor: ElementRef, card: ElementRef) -> String {
    if let Some(title) = anchor.value().attr("title").map(collapse_ws) {
        if !title.is_empty() {
            return title;
        }
    }

    let own_text = flatten_text(anchor);
    if !own_text.is_empty() {
        return own_text;
    }

    if let Ok(sel) = Selector::parse(r#"[class*="address"], address"#) {
        if let Some(text) = card.select(&sel).map(flatten_text).find(|t| !t.is_empty()) {
            return text;
        }
    }

    Selector::parse("img[alt]")
        .ok()
        .and_then(|sel| {
            card.select(&sel)
                .filter_map(|img| img.value().attr("alt"))
                .map(collapse_ws)
                .find(|alt| !alt.is_empty())
        })
        .unwrap_or_default()
}

fn flatten_text(el: ElementRef) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn first_capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
