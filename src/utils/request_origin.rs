//! Request origin extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;
use url::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Determines the `<scheme>://<host[:port]>` a client used to reach the service.
///
/// Resolution order:
///
/// 1. `public_base_url`, when configured
/// 2. With `behind_proxy`, `X-Forwarded-Proto` and `X-Forwarded-Host`
///    (first value of each), falling back to `http` and the `Host` header
/// 3. `http://` + the `Host` header
///
/// Unlike domain extraction for routing, the port is kept: the origin is
/// embedded in generated redirect URLs and must be reachable as-is.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no host can be determined or the
/// header value is not a plausible authority.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "localhost:3000".parse().unwrap());
///
/// let origin = resolve_request_origin(&headers, None, false).unwrap();
/// assert_eq!(origin, "http://localhost:3000");
/// ```
pub fn resolve_request_origin(
    headers: &HeaderMap,
    public_base_url: Option<&str>,
    behind_proxy: bool,
) -> Result<String, AppError> {
    if let Some(base) = public_base_url {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let (scheme, forwarded_host) = if behind_proxy {
        (
            first_forwarded(headers, FORWARDED_PROTO),
            first_forwarded(headers, FORWARDED_HOST),
        )
    } else {
        (None, None)
    };

    let host = match forwarded_host {
        Some(host) => host,
        None => headers
            .get(header::HOST)
            .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
            .trim(),
    };

    if host.is_empty() || host.contains(['/', '\\', '@', ' ']) {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    let scheme = match scheme {
        Some(s) if s.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };

    let origin = format!("{scheme}://{host}");
    if !is_bare_origin(&origin) {
        return Err(AppError::bad_request(
            "Invalid Host header",
            json!({ "host": host }),
        ));
    }

    Ok(origin)
}

/// True when `origin` parses to scheme and authority only.
fn is_bare_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => {
            url.host_str().is_some()
                && url.path() == "/"
                && url.query().is_none()
                && url.fragment().is_none()
                && url.username().is_empty()
                && url.password().is_none()
        }
        Err(_) => false,
    }
}

/// First non-empty entry of a comma-separated forwarding header.
fn first_forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
