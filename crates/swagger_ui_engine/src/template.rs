/* 📖 # Why a closed token enum instead of a string map?

The entry page knows a fixed set of `%(Name)` markers. Modelling them as an enum means a
typo in host configuration fails at startup with `InvalidToken` instead of silently
rendering nothing, and every token is guaranteed to have a value.

Rendering is a single left-to-right scan. A value inserted for one marker is never scanned
again, so a document title that itself contains `%(ApiKeyName)` is rendered verbatim.
*/

use std::fmt;
use std::str::FromStr;

use swagger_ui_base::{SwaggerUiError, SwaggerUiResult};

const MARKER_OPEN: &str = "%(";
const MARKER_CLOSE: char = ')';

/// The template markers understood by the entry page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateToken {
    DocumentTitle,
    StylesheetIncludes,
    DiscoveryPaths,
    BooleanValues,
    ValidatorUrl,
    CustomScripts,
    DocExpansion,
    SupportedSubmitMethods,
    OAuth2Enabled,
    OAuth2ClientId,
    OAuth2ClientSecret,
    OAuth2Realm,
    OAuth2AppName,
    OAuth2ScopeSeperator,
    OAuth2AdditionalQueryStringParams,
    ApiKeyName,
    ApiKeyIn,
}

impl TemplateToken {
    pub const COUNT: usize = 17;

    pub const ALL: [TemplateToken; Self::COUNT] = [
        Self::DocumentTitle,
        Self::StylesheetIncludes,
        Self::DiscoveryPaths,
        Self::BooleanValues,
        Self::ValidatorUrl,
        Self::CustomScripts,
        Self::DocExpansion,
        Self::SupportedSubmitMethods,
        Self::OAuth2Enabled,
        Self::OAuth2ClientId,
        Self::OAuth2ClientSecret,
        Self::OAuth2Realm,
        Self::OAuth2AppName,
        Self::OAuth2ScopeSeperator,
        Self::OAuth2AdditionalQueryStringParams,
        Self::ApiKeyName,
        Self::ApiKeyIn,
    ];

    /// Bare token name as it appears between `%(` and `)`.
    pub fn name(self) -> &'static str {
        match self {
            Self::DocumentTitle => "DocumentTitle",
            Self::StylesheetIncludes => "StylesheetIncludes",
            Self::DiscoveryPaths => "DiscoveryPaths",
            Self::BooleanValues => "BooleanValues",
            Self::ValidatorUrl => "ValidatorUrl",
            Self::CustomScripts => "CustomScripts",
            Self::DocExpansion => "DocExpansion",
            Self::SupportedSubmitMethods => "SupportedSubmitMethods",
            Self::OAuth2Enabled => "OAuth2Enabled",
            Self::OAuth2ClientId => "OAuth2ClientId",
            Self::OAuth2ClientSecret => "OAuth2ClientSecret",
            Self::OAuth2Realm => "OAuth2Realm",
            Self::OAuth2AppName => "OAuth2AppName",
            Self::OAuth2ScopeSeperator => "OAuth2ScopeSeperator",
            Self::OAuth2AdditionalQueryStringParams => "OAuth2AdditionalQueryStringParams",
            Self::ApiKeyName => "ApiKeyName",
            Self::ApiKeyIn => "ApiKeyIn",
        }
    }

    /// Marker text, e.g. `%(DocumentTitle)`.
    pub fn marker(self) -> String {
        format!("{}{}{}", MARKER_OPEN, self.name(), MARKER_CLOSE)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }

    fn default_value(self, discovery_paths: &str) -> String {
        let value = match self {
            Self::DocumentTitle => "Swagger UI",
            Self::DiscoveryPaths => discovery_paths,
            Self::BooleanValues => "true|false",
            Self::DocExpansion => "none",
            Self::SupportedSubmitMethods => "get|put|post|delete|options|head|patch",
            Self::OAuth2Enabled => "false",
            Self::OAuth2ScopeSeperator => " ",
            Self::OAuth2AdditionalQueryStringParams => "{}",
            Self::ApiKeyName => "api_key",
            Self::ApiKeyIn => "query",
            Self::StylesheetIncludes
            | Self::ValidatorUrl
            | Self::CustomScripts
            | Self::OAuth2ClientId
            | Self::OAuth2ClientSecret
            | Self::OAuth2Realm
            | Self::OAuth2AppName => "",
        };
        value.to_string()
    }
}

impl fmt::Display for TemplateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses either the bare name (`DocumentTitle`) or the marker form (`%(DocumentTitle)`).
impl FromStr for TemplateToken {
    type Err = Box<SwaggerUiError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .strip_prefix(MARKER_OPEN)
            .and_then(|rest| rest.strip_suffix(MARKER_CLOSE))
            .unwrap_or(s);
        Self::from_name(name).ok_or_else(|| Box::new(SwaggerUiError::invalid_token(s)))
    }
}

/// Current value of every template token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParameters {
    values: [String; TemplateToken::COUNT],
}

impl TemplateParameters {
    /// Seed every token with its default; `DiscoveryPaths` is the `|`-joined list.
    pub fn new<I, S>(discovery_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let discovery_paths = join_values(discovery_paths);
        Self {
            values: std::array::from_fn(|index| {
                TemplateToken::ALL[index].default_value(&discovery_paths)
            }),
        }
    }

    pub fn get(&self, token: TemplateToken) -> &str {
        &self.values[token.index()]
    }

    /// Replace the value of `token`.
    pub fn set(&mut self, token: TemplateToken, value: impl Into<String>) {
        self.values[token.index()] = value.into();
    }

    /// Replace the value of the token called `name`, failing with `InvalidToken` for
    /// names outside the known set.
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> SwaggerUiResult<()> {
        let token: TemplateToken = name.parse()?;
        self.set(token, value);
        Ok(())
    }

    /// Append one `<link>` line to `StylesheetIncludes`.
    pub fn append_stylesheet(&mut self, path: &str, media: &str) {
        let includes = &mut self.values[TemplateToken::StylesheetIncludes.index()];
        includes.push_str(&format!(
            "<link href='{}' media='{}' rel='stylesheet' type='text/css' />\n",
            path, media
        ));
    }

    /// Append a script path to the `|`-separated `CustomScripts` list.
    pub fn append_script(&mut self, path: &str) {
        let scripts = &mut self.values[TemplateToken::CustomScripts.index()];
        if !scripts.is_empty() {
            scripts.push('|');
        }
        scripts.push_str(path);
    }

    /// Tokens paired with their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (TemplateToken, &str)> {
        TemplateToken::ALL
            .into_iter()
            .map(|token| (token, self.get(token)))
    }

    /// Replace every known `%(Name)` marker in `template` with its value.
    ///
    /// Unknown markers are copied unchanged and inserted values are not scanned again.
    ///
    /// ```
    /// use swagger_ui_engine::template::TemplateParameters;
    ///
    /// let parameters = TemplateParameters::new(["/swagger/docs/v1"]);
    /// assert_eq!(parameters.render("Title: %(DocumentTitle)"), "Title: Swagger UI");
    /// ```
    pub fn render(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find(MARKER_OPEN) {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + MARKER_OPEN.len()..];
            let token = after_open.find(MARKER_CLOSE).and_then(|end| {
                TemplateToken::from_name(&after_open[..end]).map(|token| (token, end))
            });
            match token {
                Some((token, end)) => {
                    output.push_str(self.get(token));
                    rest = &after_open[end + 1..];
                }
                None => {
                    output.push_str(MARKER_OPEN);
                    rest = after_open;
                }
            }
        }
        output.push_str(rest);
        output
    }
}

pub(crate) fn join_values<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("|")
}
