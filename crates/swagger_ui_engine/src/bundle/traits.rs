use std::sync::Arc;

use swagger_ui_base::SwaggerUiResult;

/// A named collection of embedded resources.
///
/// Resource names use `/` as separator. Implementations return a
/// [`ResourceLoad`](swagger_ui_base::ErrorKind::ResourceLoad) error from [`load`](Self::load)
/// when the name is not present or its bytes cannot be read.
pub trait ResourceBundle: Send + Sync + 'static {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// All resource names in the bundle, in a stable order.
    fn resource_names(&self) -> Vec<String>;

    /// Load the raw bytes of a resource.
    fn load(&self, resource_name: &str) -> SwaggerUiResult<Vec<u8>>;

    fn contains(&self, resource_name: &str) -> bool {
        self.resource_names().iter().any(|name| name == resource_name)
    }
}

/// Shared handle to a resource bundle.
///
/// Cheap to clone; asset descriptors keep one to know where their bytes live.
/// Two handles are equal when they point at the same bundle instance.
#[derive(Clone)]
pub struct BundleHandle(Arc<dyn ResourceBundle>);

impl BundleHandle {
    pub fn new(bundle: impl ResourceBundle) -> Self {
        Self(Arc::new(bundle))
    }
}

impl std::ops::Deref for BundleHandle {
    type Target = dyn ResourceBundle;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for BundleHandle {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for BundleHandle {}

impl std::fmt::Debug for BundleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BundleHandle").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::StaticBundle;

    #[test]
    fn test_handles_compare_by_identity() {
        let first = BundleHandle::new(StaticBundle::new("ui"));
        let second = BundleHandle::new(StaticBundle::new("ui"));

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
        assert_eq!(format!("{:?}", first), "BundleHandle(\"ui\")");
    }
}
