/* 📖 # Why a mutable builder that hands out frozen providers?

Hosts configure the UI once at startup, in whatever order their setup code runs, and then
serve it from many threads. SwaggerUiConfig is that single mutable place. `provider()`
copies the path map and token values into an AssetProvider that never changes again, so
request handling needs no locks and a late configuration call cannot affect a provider that
is already serving.
*/

use std::fmt;

use serde::{Deserialize, Serialize};
use swagger_ui_base::pal::http::HttpRequest;
use swagger_ui_base::{SwaggerUiError, SwaggerUiResult};
use tracing::debug;

use crate::asset::AssetDescriptor;
use crate::bundle::BundleHandle;
use crate::path_map::{INDEX_PATH, PathMap, escape_resource_name};
use crate::provider::AssetProvider;
use crate::root_url::{RootUrlResolver, default_root_url};
use crate::template::{TemplateParameters, TemplateToken, join_values};

/// Resource names containing this namespace are replacements shipped for the stock UI
/// distribution and are never bulk-discovered.
pub const CUSTOM_ASSETS_NAMESPACE: &str = "custom-assets/";

/// Media attribute used for injected stylesheets when none is given.
pub const DEFAULT_STYLESHEET_MEDIA: &str = "screen";

const DISCOVERY_URL_SELECTOR_SCRIPT: &str = "custom-assets/discoveryUrlSelector.js";

/// Entry page and stylesheets that are always rendered from the custom namespace.
const CUSTOM_PAGES: &[(&str, &str, bool)] = &[
    (INDEX_PATH, "custom-assets/index.html", true),
    ("css/screen-css", "custom-assets/screen.css", false),
    ("css/typography-css", "custom-assets/typography.css", false),
];

/// Library, stylesheet and image overrides for the stock UI distribution.
/// Paths are kept exactly as the distribution references them.
const LIBRARY_OVERRIDES: &[(&str, &str)] = &[
    ("lib/object-assign-pollyfill-js", "lib-object-assign-pollyfill.js"),
    ("lib/jquery-1-8-0-min-js", "lib-jquery-1.8.0.min.js"),
    ("lib/jquery-slideto-min-js", "lib-jquery.slideto.min.js"),
    ("lib/jquery-wiggle-min-js", "lib-jquery.wiggle.min.js"),
    ("lib/jquery-ba-bbq-min-js", "lib-jquery.ba-bbq.min.js"),
    ("lib/handlebars-4-0-5-js", "lib-handlebars-4.0.5.js"),
    ("lib/lodash-min-js", "lib-lodash.min.js"),
    ("lib/backbone-min-js", "lib-backbone-min.js"),
    ("swagger-ui-min-js", "swagger-ui.min.js"),
    ("lib/highlight-9-1-0-pack-js", "lib-highlight.9.1.0.pack.js"),
    ("lib/highlight-9-1-0-pack_extended-js", "lib-highlight.9.1.0.pack_extended.js"),
    ("lib/jsoneditor-min-js", "lib-jsoneditor.min.js"),
    ("lib/marked-js", "lib-marked.js"),
    ("lib/swagger-oauth-js", "lib-swagger-oauth.js"),
    ("lib/lang-zh-cn-js", "lang-zh-cn.js"),
    ("lang/translator-js", "lang-translator.js"),
    ("css/print-css", "css-print.css"),
    ("css/reset-css", "css-reset.css"),
    ("css/style-css", "css-style.css"),
    ("images/explorer_icons.png", "images-explorer_icons.png"),
    ("images/favicon-16x16-png", "images-favicon-16x16.png"),
    ("images/favicon-32x32-png", "images-favicon-32x32.png"),
    ("images/logo_small.png", "images-logo_small.png"),
    ("images/pet_store_api.png", "images-pet_store_api.png"),
    ("images/wordnik_api.png", "images-wordnik_api.png"),
    ("images/logo_small-png", "images-logo_small.png"),
];

/// True for resources in the reserved custom-assets namespace.
pub fn is_custom_asset(resource_name: &str) -> bool {
    resource_name.contains(CUSTOM_ASSETS_NAMESPACE)
}

/// How the operation list is expanded when the page loads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocExpansion {
    #[default]
    None,
    List,
    Full,
}

impl DocExpansion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DocExpansion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 client settings rendered into the entry page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth2Options {
    client_id: String,
    client_secret: String,
    realm: String,
    app_name: String,
    scope_separator: String,
    additional_query_string_params: Option<String>,
}

impl OAuth2Options {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        realm: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            realm: realm.into(),
            app_name: app_name.into(),
            scope_separator: " ".to_string(),
            additional_query_string_params: None,
        }
    }

    pub fn with_scope_separator(mut self, scope_separator: impl Into<String>) -> Self {
        self.scope_separator = scope_separator.into();
        self
    }

    /// Extra parameters appended to the authorization request, stored as compact JSON.
    ///
    /// Fails with `Serialization` unless `params` serializes to a JSON object.
    pub fn with_additional_query_string_params<T>(mut self, params: &T) -> SwaggerUiResult<Self>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(params)
            .map_err(|e| Box::new(SwaggerUiError::serialization(e.to_string())))?;
        if !json.starts_with('{') {
            return Err(Box::new(SwaggerUiError::serialization(format!(
                "additional query string parameters must serialize to a JSON object, got {}",
                json
            ))));
        }
        self.additional_query_string_params = Some(json);
        Ok(self)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn additional_query_string_params(&self) -> Option<&str> {
        self.additional_query_string_params.as_deref()
    }
}

/// Host-side configuration of the embedded UI.
pub struct SwaggerUiConfig {
    ui_bundle: BundleHandle,
    path_map: PathMap,
    parameters: TemplateParameters,
    root_url_resolver: RootUrlResolver,
}

impl SwaggerUiConfig {
    /// Discover `ui_bundle` and register the built-in entry page and overrides.
    pub fn new<I, S, F>(ui_bundle: BundleHandle, discovery_paths: I, root_url_resolver: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&HttpRequest) -> String + Send + Sync + 'static,
    {
        let mut path_map = PathMap::new();
        path_map.discover(&ui_bundle, is_custom_asset);

        for (path, resource_name, is_template) in CUSTOM_PAGES {
            path_map.register(
                *path,
                AssetDescriptor::new(ui_bundle.clone(), *resource_name, *is_template),
            );
        }
        for (path, resource_name) in LIBRARY_OVERRIDES {
            path_map.register(
                *path,
                AssetDescriptor::raw(
                    ui_bundle.clone(),
                    format!("{}{}", CUSTOM_ASSETS_NAMESPACE, resource_name),
                ),
            );
        }
        debug!(
            bundle = ui_bundle.name(),
            asset_count = path_map.len(),
            "Configured built-in assets"
        );

        Self {
            ui_bundle,
            path_map,
            parameters: TemplateParameters::new(discovery_paths),
            root_url_resolver: RootUrlResolver::new(root_url_resolver),
        }
    }

    /// Same as [`new`](Self::new) with [`default_root_url`] as resolver.
    pub fn with_default_root_url<I, S>(ui_bundle: BundleHandle, discovery_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(ui_bundle, discovery_paths, default_root_url)
    }

    pub fn document_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.parameters.set(TemplateToken::DocumentTitle, title);
        self
    }

    pub fn set_validator_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.parameters.set(TemplateToken::ValidatorUrl, url);
        self
    }

    pub fn disable_validator(&mut self) -> &mut Self {
        self.parameters.set(TemplateToken::ValidatorUrl, "null");
        self
    }

    pub fn boolean_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parameters
            .set(TemplateToken::BooleanValues, join_values(values));
        self
    }

    pub fn doc_expansion(&mut self, doc_expansion: DocExpansion) -> &mut Self {
        self.parameters
            .set(TemplateToken::DocExpansion, doc_expansion.as_str());
        self
    }

    pub fn supported_submit_methods<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parameters.set(
            TemplateToken::SupportedSubmitMethods,
            join_values(methods).to_lowercase(),
        );
        self
    }

    /// Serve `resource_name` from `bundle` under `ext/...` and link it from the entry page.
    pub fn inject_stylesheet(
        &mut self,
        bundle: &BundleHandle,
        resource_name: &str,
        media: &str,
        is_template: bool,
    ) -> &mut Self {
        let path = escape_resource_name(resource_name);
        self.parameters.append_stylesheet(&path, media);
        self.custom_asset(path, bundle, resource_name, is_template)
    }

    /// Serve `resource_name` from `bundle` under `ext/...` and load it from the entry page.
    pub fn inject_javascript(
        &mut self,
        bundle: &BundleHandle,
        resource_name: &str,
        is_template: bool,
    ) -> &mut Self {
        let path = escape_resource_name(resource_name);
        self.parameters.append_script(&path);
        self.custom_asset(path, bundle, resource_name, is_template)
    }

    /// Register an asset at `path`, replacing whatever was there.
    pub fn custom_asset(
        &mut self,
        path: impl Into<String>,
        bundle: &BundleHandle,
        resource_name: &str,
        is_template: bool,
    ) -> &mut Self {
        self.path_map.register(
            path,
            AssetDescriptor::new(bundle.clone(), resource_name, is_template),
        );
        self
    }

    pub fn enable_discovery_url_selector(&mut self) -> &mut Self {
        let ui_bundle = self.ui_bundle.clone();
        self.inject_javascript(&ui_bundle, DISCOVERY_URL_SELECTOR_SCRIPT, false)
    }

    pub fn enable_oauth2_support(&mut self, options: OAuth2Options) -> &mut Self {
        let OAuth2Options {
            client_id,
            client_secret,
            realm,
            app_name,
            scope_separator,
            additional_query_string_params,
        } = options;
        self.parameters.set(TemplateToken::OAuth2Enabled, "true");
        self.parameters.set(TemplateToken::OAuth2ClientId, client_id);
        self.parameters
            .set(TemplateToken::OAuth2ClientSecret, client_secret);
        self.parameters.set(TemplateToken::OAuth2Realm, realm);
        self.parameters.set(TemplateToken::OAuth2AppName, app_name);
        self.parameters
            .set(TemplateToken::OAuth2ScopeSeperator, scope_separator);
        if let Some(params) = additional_query_string_params {
            self.parameters
                .set(TemplateToken::OAuth2AdditionalQueryStringParams, params);
        }
        self
    }

    pub fn enable_oauth2_support_without_secret(
        &mut self,
        client_id: impl Into<String>,
        realm: impl Into<String>,
        app_name: impl Into<String>,
    ) -> &mut Self {
        self.enable_oauth2_support(OAuth2Options::new(client_id, "N/A", realm, app_name))
    }

    pub fn enable_api_key_support(
        &mut self,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> &mut Self {
        self.parameters.set(TemplateToken::ApiKeyName, name);
        self.parameters.set(TemplateToken::ApiKeyIn, location);
        self
    }

    /// Set a token by name; fails with `InvalidToken` for unknown names.
    pub fn set_template_parameter(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> SwaggerUiResult<&mut Self> {
        self.parameters.set_named(name, value)?;
        Ok(self)
    }

    pub fn template_parameters(&self) -> &TemplateParameters {
        &self.parameters
    }

    pub fn path_map(&self) -> &PathMap {
        &self.path_map
    }

    pub fn ui_bundle(&self) -> &BundleHandle {
        &self.ui_bundle
    }

    pub fn root_url_resolver(&self) -> &RootUrlResolver {
        &self.root_url_resolver
    }

    /// Snapshot the current configuration into a provider.
    pub fn provider(&self) -> AssetProvider {
        AssetProvider::new(self.path_map.clone(), self.parameters.clone())
    }

    pub fn root_url(&self, request: &HttpRequest) -> String {
        self.root_url_resolver.resolve(request)
    }
}

impl fmt::Debug for SwaggerUiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwaggerUiConfig")
            .field("ui_bundle", &self.ui_bundle)
            .field("asset_count", &self.path_map.len())
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
