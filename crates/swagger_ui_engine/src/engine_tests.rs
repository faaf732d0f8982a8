/* 📖 # End-to-end tests

Each module tests its own piece with StaticBundle fixtures. These tests wire real bundle
sources (a zip archive and a directory on disk) through configuration, settings and the
HTTP adapter the way a host would at startup.
*/

#[cfg(test)]
mod end_to_end_tests {
    use std::fs;
    use std::io::{Cursor, Write};

    use swagger_ui_base::pal::http::{HttpRequest, HttpService, HttpStatusCode};
    use swagger_ui_base::{ErrorKind, FilePath, PalHandle, RealPal};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    use crate::{
        BundleHandle, DirectoryBundle, SwaggerUiConfig, SwaggerUiService, ZipBundle, load_settings,
    };

    const INDEX_TEMPLATE: &str = "<!DOCTYPE html>\n<title>%(DocumentTitle)</title>\n%(StylesheetIncludes)<script>\nwindow.swashbuckleConfig = {\n  discoveryPaths: arrayFrom('%(DiscoveryPaths)'),\n  customScripts: arrayFrom('%(CustomScripts)'),\n  oAuth2Enabled: ('%(OAuth2Enabled)' == 'true'),\n  oAuth2ScopeSeperator: '%(OAuth2ScopeSeperator)'\n};\n</script>";

    fn ui_zip() -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let entries: &[(&str, &[u8])] = &[
            ("custom-assets/index.html", INDEX_TEMPLATE.as_bytes()),
            ("custom-assets/screen.css", b".swagger-section {}"),
            ("custom-assets/lib-marked.js", b"patched marked"),
            ("lib/marked.js", b"stock marked"),
            ("lib/shred.bundle.js", b"shred"),
            ("o2c.html", b"<script>window.opener.onOAuthComplete()</script>"),
        ];
        for (name, content) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn config() -> SwaggerUiConfig {
        let ui = BundleHandle::new(ZipBundle::from_bytes("swagger-ui", ui_zip()).unwrap());
        SwaggerUiConfig::with_default_root_url(ui, ["/swagger/docs/v1", "/swagger/docs/v2"])
    }

    #[test]
    fn test_zip_bundle_through_service() {
        let service = SwaggerUiService::from_config(&config());

        let get = |path: &str| service.handle_request(HttpRequest::get(path)).unwrap();
        assert_eq!(get("/swagger/ui/lib/marked-js").body(), b"patched marked");
        assert_eq!(get("/swagger/ui/lib/shred-bundle-js").body(), b"shred");
        assert_eq!(
            get("/swagger/ui/o2c-html").headers().get("Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(
            get("/swagger/ui/css/screen-css").body_as_str(),
            Some(".swagger-section {}")
        );
        assert_eq!(get("/swagger/ui/custom-assets/index-html").status(), HttpStatusCode::NotFound);

        let index = get("/swagger/ui/index");
        let body = index.body_as_str().unwrap();
        assert!(body.contains("<title>Swagger UI</title>"));
        assert!(body.contains("arrayFrom('/swagger/docs/v1|/swagger/docs/v2')"));
        assert!(body.contains("oAuth2ScopeSeperator: ' '"));
    }

    #[test]
    fn test_validate_reports_missing_builtin_overrides() {
        let err = config().provider().validate().unwrap_err();
        match err.kind() {
            ErrorKind::Multiple { errors, count } => {
                // 3 entry-page assets and 26 overrides are registered; the fixture ships
                // index.html, screen.css and lib-marked.js.
                assert_eq!(*count, 26);
                assert!(
                    errors
                        .iter()
                        .all(|e| matches!(e.kind(), ErrorKind::ResourceLoad { .. }))
                );
            }
            other => panic!("Expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_bundle_with_settings_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("theme/css")).unwrap();
        fs::write(root.join("theme/css/brand.css"), "body { color: teal; }").unwrap();
        fs::write(root.join("theme/custom.js"), "console.log('%(DocumentTitle)');").unwrap();
        fs::write(
            root.join("swagger.toml"),
            r#"
title = "Inventory API"

[oauth2]
client_id = "inventory"
scope_separator = ","

[[stylesheets]]
resource = "css/brand.css"

[[scripts]]
resource = "custom.js"
template = true
"#,
        )
        .unwrap();

        let pal = PalHandle::new(RealPal::new(root.to_path_buf()));
        let theme = BundleHandle::new(
            DirectoryBundle::new("theme", pal.clone(), FilePath::from("theme")).unwrap(),
        );
        let settings = load_settings(&pal, &FilePath::from("swagger.toml")).unwrap();

        let mut config = config();
        settings.apply(&mut config, &theme).unwrap();
        let service = SwaggerUiService::from_config(&config);
        let get = |path: &str| service.handle_request(HttpRequest::get(path)).unwrap();

        let index = get("/swagger/ui/");
        let body = index.body_as_str().unwrap();
        assert!(body.contains("<title>Inventory API</title>"));
        assert!(body.contains(
            "<link href='ext/css/brand-css' media='screen' rel='stylesheet' type='text/css' />"
        ));
        assert!(body.contains("customScripts: arrayFrom('ext/custom-js')"));
        assert!(body.contains("oAuth2Enabled: ('true' == 'true')"));
        assert!(body.contains("oAuth2ScopeSeperator: ','"));

        assert_eq!(
            get("/swagger/ui/ext/css/brand-css").body_as_str(),
            Some("body { color: teal; }")
        );
        assert_eq!(
            get("/swagger/ui/ext/custom-js").body_as_str(),
            Some("console.log('Inventory API');")
        );
    }
}
