use std::io::{Cursor, Read};

use swagger_ui_base::{PalHandle, ResultExt, SwaggerUiError, SwaggerUiResult, err};
use tracing::{debug, info, warn};

use super::traits::ResourceBundle;

/* 📖 # Why serve UI assets from a zip appended to the executable?

Release builds append the Swagger UI distribution as a zip to the end of the binary, so
a single file carries both the program and its assets. The zip crate locates the central
directory from the end of the data and follows its offsets, so the executable bytes in
front of the archive do not need to be stripped.
*/

/// End-of-central-directory record signature.
const EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// Bundle backed by an in-memory zip archive.
#[derive(Debug, Clone)]
pub struct ZipBundle {
    name: String,
    archive_bytes: Vec<u8>,
    resource_names: Vec<String>,
}

impl ZipBundle {
    /// Open a zip archive held in memory. Directory entries are not listed as resources.
    pub fn from_bytes(name: impl Into<String>, archive_bytes: Vec<u8>) -> SwaggerUiResult<Self> {
        let name = name.into();
        let archive = zip::ZipArchive::new(Cursor::new(archive_bytes.as_slice()))
            .map_err(|e| err!("Failed to open zip archive for bundle '{}': {}", name, e))?;

        let mut resource_names: Vec<String> = archive
            .file_names()
            .filter(|entry| !entry.ends_with('/'))
            .map(str::to_string)
            .collect();
        resource_names.sort();
        debug!(bundle = %name, resource_count = resource_names.len(), "Opened zip bundle");

        Ok(Self {
            name,
            archive_bytes,
            resource_names,
        })
    }

    /// Read the zip archive appended to the current executable.
    pub fn from_executable(name: impl Into<String>, pal: &PalHandle) -> SwaggerUiResult<Self> {
        let name = name.into();
        let mut reader = pal.read_executable_file()?;
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| err!("Failed to read executable content: {}", e))?;
        debug!(binary_size = content.len(), "Read binary content");

        match find_signature_backwards(&content, &EOCD_SIGNATURE) {
            Some(offset) => debug!(offset, "Found EOCD signature"),
            None => {
                warn!("No embedded zip found - EOCD signature not present");
                return Err(err!("No embedded zip archive found in executable"));
            }
        }

        let bundle = Self::from_bytes(name, content).context("Failed to open embedded assets")?;
        info!(
            bundle = %bundle.name,
            resource_count = bundle.resource_names.len(),
            "Embedded zip bundle initialized"
        );
        Ok(bundle)
    }

    fn load_failed(&self, resource_name: &str, reason: impl std::fmt::Display) -> Box<SwaggerUiError> {
        Box::new(SwaggerUiError::resource_load(
            &self.name,
            resource_name,
            reason.to_string(),
        ))
    }
}

impl ResourceBundle for ZipBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_names(&self) -> Vec<String> {
        self.resource_names.clone()
    }

    fn load(&self, resource_name: &str) -> SwaggerUiResult<Vec<u8>> {
        if !self.contains(resource_name) {
            return Err(self.load_failed(resource_name, "resource not present in bundle"));
        }
        let mut archive = zip::ZipArchive::new(Cursor::new(self.archive_bytes.as_slice()))
            .map_err(|e| self.load_failed(resource_name, e))?;
        let mut file = archive
            .by_name(resource_name)
            .map_err(|e| self.load_failed(resource_name, e))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|e| self.load_failed(resource_name, e))?;
        debug!(
            bundle = %self.name,
            resource = resource_name,
            content_size = content.len(),
            "Extracted resource from zip"
        );
        Ok(content)
    }

    fn contains(&self, resource_name: &str) -> bool {
        self.resource_names
            .binary_search_by(|name| name.as_str().cmp(resource_name))
            .is_ok()
    }
}

/// Find a signature by searching backwards from the end of data.
fn find_signature_backwards(data: &[u8], signature: &[u8]) -> Option<usize> {
    if data.len() < signature.len() {
        return None;
    }
    (0..=data.len() - signature.len())
        .rev()
        .find(|&i| &data[i..i + signature.len()] == signature)
}
