use std::collections::BTreeSet;

use swagger_ui_base::{FilePath, PalHandle, ResultExt, SwaggerUiError, SwaggerUiResult};
use tracing::{debug, instrument};

use super::traits::ResourceBundle;

/// Bundle backed by a directory, read through the PAL.
///
/// The file listing is taken once on construction. Resource names are the file paths
/// relative to the root directory.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    name: String,
    pal: PalHandle,
    root: FilePath,
    resource_names: BTreeSet<String>,
}

impl DirectoryBundle {
    /// Bundle every file below `root`.
    pub fn new(name: impl Into<String>, pal: PalHandle, root: FilePath) -> SwaggerUiResult<Self> {
        Self::with_globs(name, pal, root, &["**".to_string()])
    }

    /// Bundle the files below `root` that match one of `globs`.
    #[instrument(skip(name, pal), fields(root = %root))]
    pub fn with_globs(
        name: impl Into<String>,
        pal: PalHandle,
        root: FilePath,
        globs: &[String],
    ) -> SwaggerUiResult<Self> {
        let name = name.into();
        let root = root.normalized();
        let mut resource_names = BTreeSet::new();
        for path in pal
            .walk_directory(&root, globs)
            .with_context(|| format!("Failed to list directory bundle '{}'", name))?
        {
            let path = path?;
            if let Some(relative) = path.strip_prefix(&root) {
                resource_names.insert(relative.as_str().to_string());
            }
        }
        debug!(bundle = %name, resource_count = resource_names.len(), "Listed directory bundle");

        Ok(Self {
            name,
            pal,
            root,
            resource_names,
        })
    }
}

impl ResourceBundle for DirectoryBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_names(&self) -> Vec<String> {
        self.resource_names.iter().cloned().collect()
    }

    fn load(&self, resource_name: &str) -> SwaggerUiResult<Vec<u8>> {
        // Only listed names are readable, so `..` segments cannot leave the root.
        if !self.resource_names.contains(resource_name) {
            return Err(Box::new(SwaggerUiError::resource_load(
                &self.name,
                resource_name,
                "resource not present in bundle",
            )));
        }
        self.pal
            .read_file_to_bytes(&self.root.join(resource_name))
            .map_err(|e| {
                Box::new(SwaggerUiError::resource_load(
                    &self.name,
                    resource_name,
                    e.to_string(),
                ))
            })
    }

    fn contains(&self, resource_name: &str) -> bool {
        self.resource_names.contains(resource_name)
    }
}
