/* 📖 # How a request becomes a page

The host builds a SwaggerUiConfig from the UI bundle: every stock resource is discovered
under an extensionless path, the custom entry page and library overrides are registered on
top, and host calls adjust template tokens or add stylesheets and scripts. `provider()`
freezes that into an AssetProvider; SwaggerUiService (or the host's own routing) hands it a
path and gets bytes plus a content type back, with `index` rendered from the tokens.
*/

pub mod asset;
pub mod bundle;
pub mod config;
mod engine_tests;
pub mod path_map;
pub mod provider;
pub mod root_url;
pub mod service;
pub mod settings;
pub mod template;

pub use asset::{Asset, AssetDescriptor, AssetSource, content_type_for_path};
pub use bundle::{BundleHandle, DirectoryBundle, ResourceBundle, StaticBundle, ZipBundle};
pub use config::{
    CUSTOM_ASSETS_NAMESPACE, DEFAULT_STYLESHEET_MEDIA, DocExpansion, OAuth2Options, SwaggerUiConfig,
};
pub use path_map::{INDEX_PATH, PathMap, derive_asset_path, escape_resource_name};
pub use provider::AssetProvider;
pub use root_url::{RootUrlResolver, default_root_url};
pub use service::{DEFAULT_ROUTE_PREFIX, SwaggerUiService};
pub use settings::{SwaggerUiSettings, load_settings};
pub use template::{TemplateParameters, TemplateToken};
