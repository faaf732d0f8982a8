use std::sync::Arc;

use swagger_ui_base::{SwaggerUiError, SwaggerUiResult};
use tracing::{debug, warn};

use crate::asset::{Asset, AssetDescriptor, content_type_for_path};
use crate::path_map::PathMap;
use crate::template::TemplateParameters;

/// Frozen view of a configuration that resolves request paths to asset content.
///
/// Cloning is cheap and clones share the same snapshot.
#[derive(Debug, Clone)]
pub struct AssetProvider {
    path_map: Arc<PathMap>,
    parameters: Arc<TemplateParameters>,
}

impl AssetProvider {
    pub fn new(path_map: PathMap, parameters: TemplateParameters) -> Self {
        Self {
            path_map: Arc::new(path_map),
            parameters: Arc::new(parameters),
        }
    }

    /// Load the asset registered at `path`, rendering it when it is a template.
    pub fn resolve(&self, path: &str) -> SwaggerUiResult<Asset> {
        let descriptor = self
            .path_map
            .get(path)
            .ok_or_else(|| Box::new(SwaggerUiError::asset_not_found(path)))?;
        let content = self.load_content(descriptor)?;
        debug!(
            path,
            resource = descriptor.resource_name(),
            is_template = descriptor.is_template(),
            content_size = content.len(),
            "Resolved asset"
        );
        Ok(Asset {
            content,
            content_type: content_type_for_path(path),
        })
    }

    fn load_content(&self, descriptor: &AssetDescriptor) -> SwaggerUiResult<Vec<u8>> {
        let bytes = descriptor.source().load()?;
        if !descriptor.is_template() {
            return Ok(bytes);
        }
        let template = String::from_utf8(bytes).map_err(|e| {
            Box::new(SwaggerUiError::resource_load(
                descriptor.bundle().name(),
                descriptor.resource_name(),
                format!("template is not valid UTF-8: {}", e),
            ))
        })?;
        Ok(self.parameters.render(&template).into_bytes())
    }

    /// Load every registered asset and report all failures at once.
    pub fn validate(&self) -> SwaggerUiResult<()> {
        let errors: Vec<SwaggerUiError> = self
            .path_map
            .iter()
            .filter_map(|(path, descriptor)| {
                self.load_content(descriptor)
                    .err()
                    .map(|e| (*e).context(format!("asset '{}'", path)))
            })
            .collect();
        match errors.len() {
            0 => Ok(()),
            count => {
                warn!(count, "Asset validation failed");
                Err(Box::new(SwaggerUiError::multiple(errors)))
            }
        }
    }

    /// Registered paths in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        self.path_map.paths().collect()
    }

    pub fn template_parameters(&self) -> &TemplateParameters {
        &self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::{BundleHandle, StaticBundle};
    use crate::path_map::INDEX_PATH;
    use crate::template::TemplateToken;
    use expect_test::expect;
    use swagger_ui_base::ErrorKind;

    fn provider() -> AssetProvider {
        let bundle = BundleHandle::new(
            StaticBundle::new("ui")
                .with_resource("index.html", b"<title>%(DocumentTitle)</title><p>%(Unknown)</p>".to_vec())
                .with_resource("lib/marked.js", b"var x = '%(DocumentTitle)';".to_vec())
                .with_resource("images/logo.png", vec![0x89, b'P', b'N', b'G', 0xFF]),
        );
        let mut map = PathMap::new();
        map.register(INDEX_PATH, AssetDescriptor::raw(bundle.clone(), "index.html"));
        map.register("lib/marked-js", AssetDescriptor::raw(bundle.clone(), "lib/marked.js"));
        map.register("images/logo-png", AssetDescriptor::raw(bundle, "images/logo.png"));

        let mut parameters = TemplateParameters::new(["/swagger/docs/v1"]);
        parameters.set(TemplateToken::DocumentTitle, "Petstore");
        AssetProvider::new(map, parameters)
    }

    #[test]
    fn test_resolve_renders_index() {
        let asset = provider().resolve(INDEX_PATH).unwrap();
        assert_eq!(asset.content_type, "text/html; charset=utf-8");
        assert_eq!(
            asset.content_as_str(),
            Some("<title>Petstore</title><p>%(Unknown)</p>")
        );
    }

    #[test]
    fn test_resolve_raw_assets_unchanged() {
        let provider = provider();
        let script = provider.resolve("lib/marked-js").unwrap();
        assert_eq!(script.content, b"var x = '%(DocumentTitle)';");
        assert_eq!(script.content_type, "application/javascript; charset=utf-8");

        let image = provider.resolve("images/logo-png").unwrap();
        assert_eq!(image.content, vec![0x89, b'P', b'N', b'G', 0xFF]);
        assert_eq!(image.content_type, "image/png");
    }

    #[test]
    fn test_resolve_unknown_path() {
        let err = provider().resolve("nonexistent-path").unwrap_err();
        assert!(err.is_asset_not_found());
        assert_eq!(err.to_string(), "No asset registered for path 'nonexistent-path'");
    }

    #[test]
    fn test_template_must_be_utf8() {
        let bundle = BundleHandle::new(StaticBundle::new("ui").with_resource("bad.html", vec![0xFFu8, 0xFE]));
        let mut map = PathMap::new();
        map.register(INDEX_PATH, AssetDescriptor::raw(bundle, "bad.html"));
        let provider = AssetProvider::new(map, TemplateParameters::new(Vec::<&str>::new()));

        let err = provider.resolve(INDEX_PATH).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ResourceLoad { .. }));
    }

    #[test]
    fn test_validate_reports_every_broken_asset() {
        let bundle = BundleHandle::new(StaticBundle::new("ui").with_resource("ok.js", b"ok".to_vec()));
        let mut map = PathMap::new();
        map.register("ok-js", AssetDescriptor::raw(bundle.clone(), "ok.js"));
        map.register("missing-css", AssetDescriptor::raw(bundle.clone(), "missing.css"));
        map.register(INDEX_PATH, AssetDescriptor::raw(bundle, "missing.html"));
        let provider = AssetProvider::new(map, TemplateParameters::new(["/docs"]));

        let err = provider.validate().unwrap_err();
        expect![[r#"
            Multiple errors occurred (2 total): asset 'index': Failed to load resource 'missing.html' from bundle 'ui': resource not present in bundle
            ├─ error: Failed to load resource 'missing.html' from bundle 'ui': resource not present in bundle
            │  └─ asset 'index'
            └─ error: Failed to load resource 'missing.css' from bundle 'ui': resource not present in bundle
               └─ asset 'missing-css'

        "#]]
        .assert_debug_eq(&err);
    }

    #[test]
    fn test_validate_ok_and_paths() {
        let provider = provider();
        provider.validate().unwrap();
        assert_eq!(provider.paths(), vec!["images/logo-png", "index", "lib/marked-js"]);
        assert_eq!(
            provider.template_parameters().get(TemplateToken::DocumentTitle),
            "Petstore"
        );
    }

    #[test]
    fn test_clones_share_snapshot() {
        let provider = provider();
        let clone = provider.clone();
        assert!(Arc::ptr_eq(&provider.path_map, &clone.path_map));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_provider_and_service_are_send_sync() {
        assert_send_sync::<AssetProvider>();
        assert_send_sync::<crate::service::SwaggerUiService>();
    }

    #[test]
    fn test_resolve_from_many_threads() {
        let provider = provider();
        let expected = provider.resolve(INDEX_PATH).unwrap();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                std::thread::spawn(move || provider.resolve(INDEX_PATH).unwrap())
            })
            .collect();
        for worker in workers {
            assert_eq!(worker.join().unwrap(), expected);
        }
    }
}
