use astra::{Request, Response};
use http::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
};

/// Browser origins allowed to call the proxy: local dev servers on any port
/// and any https site.
pub fn origin_allowed(origin: &str) -> bool {
    if let Some(rest) = origin.strip_prefix("http://localhost:") {
        return !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit());
    }
    origin
        .strip_prefix("https://")
        .is_some_and(|rest| !rest.is_empty())
}

/// Origin header of `req`, when present and allowed.
pub fn allowed_origin(req: &Request) -> Option<HeaderValue> {
    req.headers()
        .get(ORIGIN)
        .filter(|v| v.to_str().is_ok_and(origin_allowed))
        .cloned()
}

pub fn apply_cors(resp: &mut Response, origin: Option<HeaderValue>) {
    let Some(origin) = origin else {
        return;
    };
    let headers = resp.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(VARY, HeaderValue::from_static("Origin"));
}
