// mapper.rs
//
// The listings API has shipped two record layouts: a friendly lowerCamel one
// (`property.bedrooms`, `address.city`) and a verbose PascalCase one
// (`BedroomsTotal`, `Address.City`). Each output field lists the paths to try,
// in priority order.
use crate::listings::models::MappedListing;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Dotted path into the raw record, e.g. `"property.bedrooms"`.
type FieldPath = &'static str;

const ID: &[FieldPath] = &["id", "ListingID", "mlsNumber"];
const PRICE_FORMATTED: &[FieldPath] = &["listPriceFormatted", "ListPriceFormatted"];
const PRICE_NUMBER: &[FieldPath] = &["listPrice", "ListPrice"];

const ADDRESS_FULL: &[FieldPath] = &["address.full", "Address.Full"];
const ADDRESS_CITY: &[FieldPath] = &["address.city", "Address.City"];
const ADDRESS_STATE: &[FieldPath] = &["address.state", "Address.StateOrProvince", "Address.State"];
const ADDRESS_ZIP: &[FieldPath] = &["address.zip", "Address.PostalCode"];

const BEDS: &[FieldPath] = &["property.bedrooms", "BedroomsTotal"];
const BATHS: &[FieldPath] = &["property.bathrooms", "BathroomsTotalInteger"];
const SQFT: &[FieldPath] = &["property.sqft", "LivingArea"];
const LOT: &[FieldPath] = &["property.lotSize", "LotSizeArea"];
const YEAR: &[FieldPath] = &["property.yearBuilt", "YearBuilt"];
const FEATURES: &[FieldPath] = &["property.features", "InteriorFeatures"];
const IDX_URL: &[FieldPath] = &["urls.public", "PublicURL"];

const BROCHURE_URL: &str = "#";

// Newline, bullet, the bullet as UTF-8 misread as cp1252, or comma.
static RE_FEATURE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\n|\u{e2}\u{20ac}\u{a2}|\u{2022}|,").unwrap());

/// Pick the listing record out of an API response body: first element of a
/// `data` array, else a `data` object, else the body itself.
pub fn select_raw(body: &Value) -> &Value {
    match body.get("data") {
        Some(Value::Array(items)) => items.first().unwrap_or(&Value::Null),
        Some(data) if is_truthy(data) => data,
        _ => body,
    }
}

pub fn map_listing(raw: &Value) -> MappedListing {
    let address = [ADDRESS_FULL, ADDRESS_CITY, ADDRESS_STATE, ADDRESS_ZIP]
        .iter()
        .filter_map(|paths| first_truthy(raw, paths))
        .map(display)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    MappedListing {
        id: first_truthy(raw, ID).map(display).unwrap_or_default(),
        price: price(raw),
        address,
        beds: scalar(raw, BEDS),
        baths: scalar(raw, BATHS),
        sqft: scalar(raw, SQFT),
        lot: scalar(raw, LOT),
        year: scalar(raw, YEAR),
        features: features(raw),
        brochure_url: BROCHURE_URL.to_string(),
        idx_url: first_truthy(raw, IDX_URL).map(display).unwrap_or_default(),
    }
}

/// Follow a dotted path. Missing keys and JSON `null` both resolve to `None`.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(raw, |current, key| match current {
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => current.get(key),
        })
        .filter(|v| !v.is_null())
}

/// First path that resolves to anything but null.
fn first_present<'a>(raw: &'a Value, paths: &[FieldPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| lookup(raw, path))
}

/// First path that resolves to a non-empty, non-zero, non-false value.
fn first_truthy<'a>(raw: &'a Value, paths: &[FieldPath]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(raw, path))
        .find(|v| is_truthy(v))
}

fn scalar(raw: &Value, paths: &[FieldPath]) -> Value {
    first_present(raw, paths)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

fn price(raw: &Value) -> String {
    if let Some(formatted) = first_truthy(raw, PRICE_FORMATTED) {
        return display(formatted);
    }

    first_truthy(raw, PRICE_NUMBER)
        .and_then(as_number)
        .map(format_usd)
        .unwrap_or_default()
}

fn features(raw: &Value) -> Vec<Value> {
    match first_truthy(raw, FEATURES) {
        Some(Value::Array(items)) => items.clone(),
        Some(other) => RE_FEATURE_SPLIT
            .split(&display(other))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Value::String(s.to_string()))
            .collect(),
        None => vec![],
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn as_number(v: &Value) -> Option<f64> {
    let n: Option<f64> = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    n.filter(|f| f.is_finite())
}

/// `$` plus en-US digit grouping, at most three decimals: `450000` -> `$450,000`.
pub fn format_usd(amount: f64) -> String {
    let rounded = (amount * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();

    let fraction = format!("{:.3}", abs.fract());
    let fraction = fraction
        .trim_start_matches('0')
        .trim_end_matches('0')
        .trim_end_matches('.');

    format!("${sign}{}{fraction}", group_thousands(abs.trunc() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
