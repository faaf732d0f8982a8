/* 📖 # Why a settings file on top of the builder API?

Most deployments only change the title, auth settings and a stylesheet or two. A TOML
file lets operators adjust those without recompiling the host. Every field maps onto one
SwaggerUiConfig mutator, and `[template_parameters]` goes through the same checked setter,
so a misspelled token fails at startup just like it would in code.
*/

use std::collections::BTreeMap;

use serde::Deserialize;
use swagger_ui_base::{FilePath, PalHandle, ResultExt, SwaggerUiResult, err};
use tracing::{debug, info};

use crate::bundle::BundleHandle;
use crate::config::{DEFAULT_STYLESHEET_MEDIA, DocExpansion, OAuth2Options, SwaggerUiConfig};
use crate::template::TemplateToken;

/// Contents of a Swagger UI settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwaggerUiSettings {
    pub title: Option<String>,
    pub validator_url: Option<String>,
    pub disable_validator: bool,
    pub boolean_values: Option<Vec<String>>,
    pub doc_expansion: Option<DocExpansion>,
    pub supported_submit_methods: Option<Vec<String>>,
    pub discovery_url_selector: bool,
    pub api_key: Option<ApiKeySettings>,
    pub oauth2: Option<OAuth2Settings>,
    pub template_parameters: BTreeMap<String, String>,
    pub stylesheets: Vec<StylesheetSettings>,
    pub scripts: Vec<ScriptSettings>,
    pub custom_assets: Vec<CustomAssetSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeySettings {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OAuth2Settings {
    pub client_id: String,
    /// Defaults to `N/A` when omitted.
    pub client_secret: Option<String>,
    #[serde(default)]
    pub realm: String,
    #[serde(default)]
    pub app_name: String,
    pub scope_separator: Option<String>,
    pub additional_query_string_params: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StylesheetSettings {
    pub resource: String,
    pub media: Option<String>,
    #[serde(default)]
    pub template: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptSettings {
    pub resource: String,
    #[serde(default)]
    pub template: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomAssetSettings {
    pub path: String,
    pub resource: String,
    #[serde(default)]
    pub template: bool,
}

impl SwaggerUiSettings {
    pub fn from_toml(text: &str) -> SwaggerUiResult<Self> {
        toml::from_str(text).map_err(|e| err!("Invalid settings: {}", e))
    }

    /// Apply the settings to `config`. Stylesheets, scripts and custom assets are loaded
    /// from `bundle`.
    ///
    /// Template parameter names and OAuth2 parameters are checked before anything is
    /// changed, so a failed apply leaves `config` untouched.
    pub fn apply(&self, config: &mut SwaggerUiConfig, bundle: &BundleHandle) -> SwaggerUiResult<()> {
        let template_parameters = self
            .template_parameters
            .iter()
            .map(|(name, value)| {
                name.parse::<TemplateToken>()
                    .map(|token| (token, value.as_str()))
            })
            .collect::<SwaggerUiResult<Vec<_>>>()
            .context("Invalid [template_parameters]")?;
        let oauth2 = self
            .oauth2
            .as_ref()
            .map(OAuth2Settings::to_options)
            .transpose()
            .context("Invalid [oauth2] settings")?;

        if let Some(title) = &self.title {
            config.document_title(title.as_str());
        }
        if let Some(url) = &self.validator_url {
            config.set_validator_url(url.as_str());
        }
        if self.disable_validator {
            config.disable_validator();
        }
        if let Some(values) = &self.boolean_values {
            config.boolean_values(values);
        }
        if let Some(doc_expansion) = self.doc_expansion {
            config.doc_expansion(doc_expansion);
        }
        if let Some(methods) = &self.supported_submit_methods {
            config.supported_submit_methods(methods);
        }
        if let Some(api_key) = &self.api_key {
            config.enable_api_key_support(api_key.name.as_str(), api_key.location.as_str());
        }
        if let Some(options) = oauth2 {
            config.enable_oauth2_support(options);
        }
        if self.discovery_url_selector {
            config.enable_discovery_url_selector();
        }
        for stylesheet in &self.stylesheets {
            let media = stylesheet.media.as_deref().unwrap_or(DEFAULT_STYLESHEET_MEDIA);
            config.inject_stylesheet(bundle, &stylesheet.resource, media, stylesheet.template);
        }
        for script in &self.scripts {
            config.inject_javascript(bundle, &script.resource, script.template);
        }
        for asset in &self.custom_assets {
            config.custom_asset(asset.path.as_str(), bundle, &asset.resource, asset.template);
        }
        for (token, value) in template_parameters {
            config.set_template_parameter(token.name(), value)?;
        }
        debug!(
            stylesheets = self.stylesheets.len(),
            scripts = self.scripts.len(),
            custom_assets = self.custom_assets.len(),
            "Applied settings"
        );
        Ok(())
    }
}

impl OAuth2Settings {
    fn to_options(&self) -> SwaggerUiResult<OAuth2Options> {
        let mut options = OAuth2Options::new(
            self.client_id.as_str(),
            self.client_secret.as_deref().unwrap_or("N/A"),
            self.realm.as_str(),
            self.app_name.as_str(),
        );
        if let Some(separator) = &self.scope_separator {
            options = options.with_scope_separator(separator.as_str());
        }
        if let Some(params) = &self.additional_query_string_params {
            options = options.with_additional_query_string_params(params)?;
        }
        Ok(options)
    }
}

/// Read and parse a TOML settings file through the PAL.
pub fn load_settings(pal: &PalHandle, path: &FilePath) -> SwaggerUiResult<SwaggerUiSettings> {
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path))?;
    let settings =
        SwaggerUiSettings::from_toml(&text).with_context(|| format!("Failed to parse settings file {}", path))?;
    info!(path = %path, "Loaded Swagger UI settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StaticBundle;
    use crate::path_map::INDEX_PATH;
    use expect_test::expect;
    use swagger_ui_base::{ErrorKind, MockPal};

    const SETTINGS: &str = r#"
title = "Petstore"
validator_url = "https://validator.example.com"
disable_validator = true
boolean_values = ["1", "0"]
doc_expansion = "full"
supported_submit_methods = ["GET", "POST"]
discovery_url_selector = true

[api_key]
name = "X-Api-Key"
location = "header"

[oauth2]
client_id = "petstore-ui"
realm = "petstore"
app_name = "Petstore UI"
additional_query_string_params = { audience = "petstore" }

[template_parameters]
"%(ApiKeyIn)" = "query"

[[stylesheets]]
resource = "theme.css"

[[stylesheets]]
resource = "print.css"
media = "print"

[[scripts]]
resource = "extra.js"
template = true

[[custom_assets]]
path = "lib/other-js"
resource = "patched-other.js"
"#;

    fn ui_bundle() -> BundleHandle {
        BundleHandle::new(
            StaticBundle::new("swagger-ui")
                .with_resource(
                    "custom-assets/index.html",
                    b"<title>%(DocumentTitle)</title>\n%(StylesheetIncludes)scripts=%(CustomScripts)\nvalidator=%(ValidatorUrl) oauth=%(OAuth2Enabled)/%(OAuth2ClientSecret)/%(OAuth2AdditionalQueryStringParams)\napikey=%(ApiKeyName)@%(ApiKeyIn) submit=%(SupportedSubmitMethods) expand=%(DocExpansion) bools=%(BooleanValues)".to_vec(),
                )
                .with_resource("custom-assets/discoveryUrlSelector.js", b"selector()".to_vec())
                .with_resource("lib/other.js", b"other()".to_vec()),
        )
    }

    fn host_bundle() -> BundleHandle {
        BundleHandle::new(
            StaticBundle::new("host")
                .with_resource("theme.css", b"body {}".to_vec())
                .with_resource("print.css", b"@media print {}".to_vec())
                .with_resource("extra.js", b"var title = '%(DocumentTitle)';".to_vec())
                .with_resource("patched-other.js", b"patched()".to_vec()),
        )
    }

    #[test]
    fn test_apply_full_settings() {
        let settings = SwaggerUiSettings::from_toml(SETTINGS).unwrap();
        let mut config = SwaggerUiConfig::with_default_root_url(ui_bundle(), ["/swagger/docs/v1"]);
        settings.apply(&mut config, &host_bundle()).unwrap();
        let provider = config.provider();

        let index = provider.resolve(INDEX_PATH).unwrap();
        expect![[r#"
            <title>Petstore</title>
            <link href='ext/theme-css' media='screen' rel='stylesheet' type='text/css' />
            <link href='ext/print-css' media='print' rel='stylesheet' type='text/css' />
            scripts=ext/custom-assets/discoveryUrlSelector-js|ext/extra-js
            validator=null oauth=true/N/A/{"audience":"petstore"}
            apikey=X-Api-Key@query submit=get|post expand=full bools=1|0"#]]
        .assert_eq(index.content_as_str().unwrap());

        let script = provider.resolve("ext/extra-js").unwrap();
        assert_eq!(script.content_as_str(), Some("var title = 'Petstore';"));
        let other = provider.resolve("lib/other-js").unwrap();
        assert_eq!(other.content, b"patched()");
    }

    #[test]
    fn test_empty_settings_change_nothing() {
        let settings = SwaggerUiSettings::from_toml("").unwrap();
        assert_eq!(settings, SwaggerUiSettings::default());

        let mut config = SwaggerUiConfig::with_default_root_url(ui_bundle(), ["/swagger/docs/v1"]);
        let before = config.template_parameters().clone();
        settings.apply(&mut config, &host_bundle()).unwrap();
        assert_eq!(config.template_parameters(), &before);
    }

    #[test]
    fn test_unknown_template_parameter_leaves_config_untouched() {
        let settings = SwaggerUiSettings::from_toml(
            "title = \"Changed\"\n[template_parameters]\nDocumentTitel = \"typo\"\n",
        )
        .unwrap();
        let mut config = SwaggerUiConfig::with_default_root_url(ui_bundle(), ["/swagger/docs/v1"]);

        let err = settings.apply(&mut config, &host_bundle()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidToken { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid [template_parameters]: Unknown template token 'DocumentTitel'"
        );
        assert_eq!(
            config.template_parameters().get(TemplateToken::DocumentTitle),
            "Swagger UI"
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SwaggerUiSettings::from_toml("titel = \"x\"").unwrap_err();
        assert!(err.to_string().starts_with("Invalid settings: "));
        assert!(err.to_string().contains("titel"));
    }

    #[test]
    fn test_load_settings_through_pal() {
        let mock = MockPal::new();
        mock.add_file(FilePath::from("config/swagger.toml"), b"title = \"From file\"".to_vec());
        mock.add_file(FilePath::from("config/broken.toml"), b"title = ".to_vec());
        let pal = PalHandle::new(mock);

        let settings = load_settings(&pal, &FilePath::from("config/swagger.toml")).unwrap();
        assert_eq!(settings.title.as_deref(), Some("From file"));

        let err = load_settings(&pal, &FilePath::from("config/broken.toml")).unwrap_err();
        assert_eq!(
            err.get_context(),
            ["Failed to parse settings file config/broken.toml"]
        );

        let err = load_settings(&pal, &FilePath::from("config/missing.toml")).unwrap_err();
        assert_eq!(
            err.get_context(),
            ["Failed to read settings file config/missing.toml"]
        );
    }
}
