use std::borrow::Cow;
use std::collections::BTreeMap;

use swagger_ui_base::{SwaggerUiError, SwaggerUiResult};

use super::traits::ResourceBundle;

/// In-memory bundle, typically filled from `include_bytes!` tables.
///
/// # Examples
/// ```
/// use swagger_ui_engine::bundle::{ResourceBundle, StaticBundle};
///
/// let bundle = StaticBundle::new("ui")
///     .with_resource("custom-assets/index.html", b"<title>%(DocumentTitle)</title>".as_slice());
/// assert_eq!(bundle.resource_names(), vec!["custom-assets/index.html".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticBundle {
    name: String,
    resources: BTreeMap<String, Cow<'static, [u8]>>,
}

impl StaticBundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: BTreeMap::new(),
        }
    }

    /// Build a bundle from a static `(name, bytes)` table without copying the bytes.
    pub fn from_static(name: impl Into<String>, entries: &'static [(&'static str, &'static [u8])]) -> Self {
        let mut bundle = Self::new(name);
        for (resource_name, content) in entries {
            bundle
                .resources
                .insert((*resource_name).to_string(), Cow::Borrowed(*content));
        }
        bundle
    }

    pub fn with_resource(
        mut self,
        resource_name: impl Into<String>,
        content: impl Into<Cow<'static, [u8]>>,
    ) -> Self {
        self.insert(resource_name, content);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, resource_name: impl Into<String>, content: impl Into<Cow<'static, [u8]>>) {
        self.resources.insert(resource_name.into(), content.into());
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceBundle for StaticBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_names(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }

    fn load(&self, resource_name: &str) -> SwaggerUiResult<Vec<u8>> {
        self.resources
            .get(resource_name)
            .map(|content| content.to_vec())
            .ok_or_else(|| {
                Box::new(SwaggerUiError::resource_load(
                    &self.name,
                    resource_name,
                    "resource not present in bundle",
                ))
            })
    }

    fn contains(&self, resource_name: &str) -> bool {
        self.resources.contains_key(resource_name)
    }
}
