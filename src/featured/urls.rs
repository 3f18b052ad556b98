use url::Url;

/// Turn an href or image src from the widget into an absolute URL.
///
/// - `//host/x` becomes `https://host/x`
/// - `http(s)://...` is returned unchanged
/// - anything else is resolved against `origin`
///
/// Fragments, `javascript:`, `mailto:`, `tel:` and `data:` values yield `""`.
pub fn absolutize(raw: &str, origin: &Url) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return String::new();
    }

    let lower = raw.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return String::new();
    }

    if raw.starts_with("//") {
        return format!("https:{raw}");
    }
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return raw.to_string();
    }

    origin
        .join(raw)
        .map(|u| u.to_string())
        .unwrap_or_default()
}

/// True when `absolute` points at `domain` or one of its subdomains.
pub fn is_on_domain(absolute: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(absolute) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => {
            let host = host.trim_start_matches("www.");
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        None => false,
    }
}

/// Registrable part of the origin's host (`www.har.com` -> `har.com`).
pub fn site_domain(origin: &Url) -> String {
    origin
        .host_str()
        .unwrap_or_default()
        .trim_start_matches("www.")
        .to_string()
}
