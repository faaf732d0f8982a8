use std::fmt;
use std::sync::Arc;

use swagger_ui_base::pal::http::HttpRequest;

/// Host callback computing the absolute root URL (`scheme://host[:port][/base]`) for a request.
#[derive(Clone)]
pub struct RootUrlResolver(Arc<dyn Fn(&HttpRequest) -> String + Send + Sync>);

impl RootUrlResolver {
    pub fn new(resolver: impl Fn(&HttpRequest) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(resolver))
    }

    pub fn resolve(&self, request: &HttpRequest) -> String {
        (self.0)(request)
    }
}

impl Default for RootUrlResolver {
    fn default() -> Self {
        Self::new(default_root_url)
    }
}

impl fmt::Debug for RootUrlResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootUrlResolver")
    }
}

/// `{scheme}://{host}` from `X-Forwarded-Proto` (default `http`) and `Host`
/// (default `localhost`). Only the first value of a comma-separated proxy list is used.
pub fn default_root_url(request: &HttpRequest) -> String {
    let headers = request.headers();
    let scheme = headers
        .get("X-Forwarded-Proto")
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");
    let host = headers
        .get("Host")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("localhost");
    format!("{}://{}", scheme, host)
}
