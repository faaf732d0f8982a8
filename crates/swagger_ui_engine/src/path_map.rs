/* 📖 # Why extensionless asset paths?

Some hosting setups route every request whose path ends in a file extension to the static
file handler before application code sees it. Serving `lib/marked-js` instead of
`lib/marked.js` keeps every UI request inside the asset engine. The rule is a plain
character replacement, so `a.b-c` and `a-b.c` collide on `a-b-c`; the later registration
simply wins.
*/

use std::collections::BTreeMap;

use tracing::debug;

use crate::asset::AssetDescriptor;
use crate::bundle::BundleHandle;

/// Path of the entry page. Always rendered as a template.
pub const INDEX_PATH: &str = "index";

/// Derive the request path for a discovered resource name.
///
/// ```
/// use swagger_ui_engine::path_map::derive_asset_path;
///
/// assert_eq!(derive_asset_path("lib\\swagger-oauth.js"), "lib/swagger-oauth-js");
/// ```
pub fn derive_asset_path(resource_name: &str) -> String {
    resource_name.replace('\\', "/").replace('.', "-")
}

/// Request path under which an injected stylesheet or script is served.
pub fn escape_resource_name(resource_name: &str) -> String {
    format!("ext/{}", resource_name.replace('.', "-"))
}

/// Logical request path to asset descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    entries: BTreeMap<String, AssetDescriptor>,
}

impl PathMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the descriptor for `path`.
    pub fn register(&mut self, path: impl Into<String>, descriptor: AssetDescriptor) {
        let path = path.into();
        let descriptor = if path == INDEX_PATH {
            descriptor.into_template()
        } else {
            descriptor
        };
        if let Some(previous) = self.entries.insert(path.clone(), descriptor) {
            debug!(
                path = %path,
                previous = previous.resource_name(),
                "Replaced asset registration"
            );
        }
    }

    /// Register every resource of `bundle` for which `is_reserved` returns false.
    ///
    /// Returns the number of resources registered.
    pub fn discover(&mut self, bundle: &BundleHandle, is_reserved: impl Fn(&str) -> bool) -> usize {
        let mut registered = 0;
        for resource_name in bundle.resource_names() {
            if is_reserved(&resource_name) {
                continue;
            }
            let path = derive_asset_path(&resource_name);
            let is_template = path == INDEX_PATH;
            self.register(
                path,
                AssetDescriptor::new(bundle.clone(), resource_name, is_template),
            );
            registered += 1;
        }
        debug!(bundle = bundle.name(), registered, "Discovered bundle resources");
        registered
    }

    pub fn get(&self, path: &str) -> Option<&AssetDescriptor> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Registered paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetDescriptor)> {
        self.entries.iter().map(|(path, descriptor)| (path.as_str(), descriptor))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
