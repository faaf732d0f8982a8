use swagger_ui_base::SwaggerUiResult;

use crate::bundle::BundleHandle;

/// Where an asset's bytes live: a bundle plus a resource name inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
    bundle: BundleHandle,
    resource_name: String,
}

impl AssetSource {
    pub fn new(bundle: BundleHandle, resource_name: impl Into<String>) -> Self {
        Self {
            bundle,
            resource_name: resource_name.into(),
        }
    }

    pub fn bundle(&self) -> &BundleHandle {
        &self.bundle
    }

    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn load(&self) -> SwaggerUiResult<Vec<u8>> {
        self.bundle.load(&self.resource_name)
    }
}

/// A servable asset: its source and whether its content is rendered as a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDescriptor {
    source: AssetSource,
    is_template: bool,
}

impl AssetDescriptor {
    pub fn new(bundle: BundleHandle, resource_name: impl Into<String>, is_template: bool) -> Self {
        Self {
            source: AssetSource::new(bundle, resource_name),
            is_template,
        }
    }

    /// Descriptor served byte-for-byte.
    pub fn raw(bundle: BundleHandle, resource_name: impl Into<String>) -> Self {
        Self::new(bundle, resource_name, false)
    }

    /// Descriptor whose content is rendered with the template parameters.
    pub fn template(bundle: BundleHandle, resource_name: impl Into<String>) -> Self {
        Self::new(bundle, resource_name, true)
    }

    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    pub fn bundle(&self) -> &BundleHandle {
        self.source.bundle()
    }

    pub fn resource_name(&self) -> &str {
        self.source.resource_name()
    }

    pub fn is_template(&self) -> bool {
        self.is_template
    }

    pub(crate) fn into_template(self) -> Self {
        Self {
            is_template: true,
            ..self
        }
    }
}

/// Resolved asset content ready to be written to a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content: Vec<u8>,
    pub content_type: &'static str,
}

impl Asset {
    /// Content as text, if it is valid UTF-8.
    pub fn content_as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/* 📖 # Why infer the content type from the asset path?

Asset paths replace dots with dashes (`lib/marked-js`), so the last dash-separated
segment is what used to be the file extension. A few built-in override paths keep their
dots (`images/logo_small.png`); for those the dotted extension is used instead. Hosts
serve the result directly, and browsers refuse scripts and stylesheets sent with a generic
type.
*/

pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

/// Guess the content type of an asset from its path.
pub fn content_type_for_path(path: &str) -> &'static str {
    if path == crate::path_map::INDEX_PATH {
        return "text/html; charset=utf-8";
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    ['-', '.']
        .into_iter()
        .filter_map(|separator| file_name.rsplit_once(separator))
        .find_map(|(_, extension)| content_type_for_extension(extension))
        .unwrap_or(OCTET_STREAM)
}

fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    let content_type = match extension.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json",
        "png" => "image/png",
        "gif" => "image/gif",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "map" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        _ => return None,
    };
    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StaticBundle;

    #[test]
    fn test_descriptor_equality_uses_bundle_identity() {
        let bundle = BundleHandle::new(StaticBundle::new("ui"));
        let other = BundleHandle::new(StaticBundle::new("ui"));

        assert_eq!(
            AssetDescriptor::raw(bundle.clone(), "a.js"),
            AssetDescriptor::raw(bundle.clone(), "a.js")
        );
        assert_ne!(
            AssetDescriptor::raw(bundle.clone(), "a.js"),
            AssetDescriptor::raw(other, "a.js")
        );
        assert_ne!(
            AssetDescriptor::raw(bundle.clone(), "a.js"),
            AssetDescriptor::template(bundle, "a.js")
        );
    }

    #[test]
    fn test_into_template() {
        let bundle = BundleHandle::new(StaticBundle::new("ui"));
        let descriptor = AssetDescriptor::raw(bundle, "index.html").into_template();
        assert!(descriptor.is_template());
        assert_eq!(descriptor.resource_name(), "index.html");
    }

    #[test]
    fn test_source_load() {
        let bundle = BundleHandle::new(StaticBundle::new("ui").with_resource("a.js", b"a()".to_vec()));
        let descriptor = AssetDescriptor::raw(bundle, "a.js");
        assert_eq!(descriptor.source().load().unwrap(), b"a()");
    }

    #[test]
    fn test_content_type_for_path() {
        let cases = [
            ("index", "text/html; charset=utf-8"),
            ("lib/marked-js", "application/javascript; charset=utf-8"),
            ("css/screen-css", "text/css; charset=utf-8"),
            ("images/logo_small-PNG", "image/png"),
            ("fonts/droid-sans-v6-latin-700-woff2", "font/woff2"),
            ("o2c-html", "text/html; charset=utf-8"),
            ("ext/swagger-ext-custom-unknown", OCTET_STREAM),
            ("lib.dir/noextension", OCTET_STREAM),
            ("images/logo_small.png", "image/png"),
            ("images/explorer_icons.png", "image/png"),
            ("images/favicon-16x16-png", "image/png"),
        ];
        for (path, expected) in cases {
            assert_eq!(content_type_for_path(path), expected, "path {}", path);
        }
    }
}
