/* 📖 # Why an HttpService adapter?

The engine resolves logical asset paths; hosts think in request URLs. SwaggerUiService
percent-decodes the path and strips the query string and mount prefix. "No such asset"
becomes a 404; every other failure goes back to the host as an error, so a packaging
defect surfaces as a server error instead of a silent 404. The bare prefix without trailing slash redirects to the entry page
so relative asset links in it resolve.
*/

use percent_encoding::percent_decode_str;
use swagger_ui_base::SwaggerUiResult;
use swagger_ui_base::pal::http::{HttpMethod, HttpRequest, HttpResponse, HttpService, HttpStatusCode};
use tracing::{debug, error};

use crate::config::SwaggerUiConfig;
use crate::path_map::INDEX_PATH;
use crate::provider::AssetProvider;
use crate::root_url::RootUrlResolver;

/// Mount point used by [`SwaggerUiService::new`].
pub const DEFAULT_ROUTE_PREFIX: &str = "/swagger/ui/";

/// Serves a frozen [`AssetProvider`] below a route prefix.
#[derive(Debug, Clone)]
pub struct SwaggerUiService {
    provider: AssetProvider,
    root_url_resolver: RootUrlResolver,
    route_prefix: String,
}

impl SwaggerUiService {
    pub fn new(provider: AssetProvider, root_url_resolver: RootUrlResolver) -> Self {
        Self::with_route_prefix(provider, root_url_resolver, DEFAULT_ROUTE_PREFIX)
    }

    /// Mount below `route_prefix`; a missing leading or trailing `/` is added.
    pub fn with_route_prefix(
        provider: AssetProvider,
        root_url_resolver: RootUrlResolver,
        route_prefix: &str,
    ) -> Self {
        let trimmed = route_prefix.trim_matches('/');
        let route_prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        Self {
            provider,
            root_url_resolver,
            route_prefix,
        }
    }

    /// Service for the current state of `config`, mounted at [`DEFAULT_ROUTE_PREFIX`].
    pub fn from_config(config: &SwaggerUiConfig) -> Self {
        Self::new(config.provider(), config.root_url_resolver().clone())
    }

    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    pub fn provider(&self) -> &AssetProvider {
        &self.provider
    }

    fn redirect_to_index(&self, request: &HttpRequest) -> HttpResponse {
        let location = format!(
            "{}{}{}",
            self.root_url_resolver.resolve(request),
            self.route_prefix,
            INDEX_PATH
        );
        debug!(location = %location, "Redirecting to entry page");
        HttpResponse::moved_permanently(location)
    }
}

impl HttpService for SwaggerUiService {
    fn handle_request(&self, request: HttpRequest) -> SwaggerUiResult<HttpResponse> {
        let method = request.method();
        if !matches!(method, HttpMethod::Get | HttpMethod::Head) {
            debug!(method = %method, "Rejecting non-GET request");
            return Ok(
                HttpResponse::new(HttpStatusCode::MethodNotAllowed).with_header("Allow", "GET, HEAD")
            );
        }

        let Ok(decoded) = percent_decode_str(request.path_without_query()).decode_utf8() else {
            debug!(path = request.path(), "Request path is not valid UTF-8 after decoding");
            return Ok(HttpResponse::not_found());
        };
        let path: &str = &decoded;
        let mount_point = self.route_prefix.trim_end_matches('/');
        if !mount_point.is_empty() && path == mount_point {
            return Ok(self.redirect_to_index(&request));
        }
        let Some(asset_path) = path.strip_prefix(self.route_prefix.as_str()) else {
            debug!(path, "Request outside of route prefix");
            return Ok(HttpResponse::not_found());
        };
        let asset_path = if asset_path.is_empty() {
            INDEX_PATH
        } else {
            asset_path
        };

        match self.provider.resolve(asset_path) {
            Ok(asset) => {
                let response = HttpResponse::ok().with_content_type(asset.content_type);
                if *method == HttpMethod::Head {
                    Ok(response.with_header("Content-Length", asset.content.len().to_string()))
                } else {
                    Ok(response.with_body(asset.content))
                }
            }
            Err(e) if e.is_asset_not_found() => {
                debug!(path = asset_path, "Asset not found");
                Ok(HttpResponse::not_found())
            }
            Err(e) => {
                error!(path = asset_path, error = %e, "Failed to serve asset");
                Err(e)
            }
        }
    }
}
