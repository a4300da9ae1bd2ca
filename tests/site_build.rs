use std::fs;

use pretty_assertions::assert_eq;
use sitegen::Config;
use sitegen::site::{self, SiteError};
use tempfile::TempDir;

fn config_for(root: &std::path::Path, base_path: &str) -> Config {
    let mut config = Config::compiled_default();
    config.site.base_path = base_path.to_string();
    config.paths.content = root.join("content");
    config.paths.static_dir = root.join("static");
    config.paths.template = root.join("template.html");
    config.paths.output = root.join("docs");
    config
}

#[test]
fn builds_pages_and_static_assets() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("content/contact")).unwrap();
    fs::create_dir_all(root.join("static/images")).unwrap();
    fs::write(
        root.join("content/index.md"),
        "# Tolkien Fan Club\n\n![castle](/images/castle.png)\n\n[Contact](/contact)",
    )
    .unwrap();
    fs::write(root.join("content/contact/index.md"), "# Contact\n\nWrite to us.").unwrap();
    fs::write(root.join("static/index.css"), "body { color: #333; }").unwrap();
    fs::write(root.join("static/images/castle.png"), [1u8, 2, 3]).unwrap();
    fs::write(
        root.join("template.html"),
        "<title>{{ Title }}</title><link href=\"/index.css\">{{ Content }}",
    )
    .unwrap();

    let config = config_for(root, "/fanclub/");
    let report = site::build(&config).unwrap();

    assert_eq!(report.static_files, 2);
    assert_eq!(
        report.pages,
        vec![
            root.join("docs/contact/index.html"),
            root.join("docs/index.html"),
        ]
    );
    assert_eq!(
        fs::read_to_string(root.join("docs/index.html")).unwrap(),
        "<title>Tolkien Fan Club</title><link href=\"/fanclub/index.css\">\
         <div><h1>Tolkien Fan Club</h1>\
         <p><img src=\"/fanclub/images/castle.png\" alt=\"castle\"></p>\
         <p><a href=\"/fanclub/contact\">Contact</a></p></div>"
    );
    assert!(root.join("docs/images/castle.png").exists());
}

#[test]
fn missing_title_aborts_the_build() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("content")).unwrap();
    fs::write(root.join("content/untitled.md"), "## Only a subheading").unwrap();
    fs::write(root.join("template.html"), "{{ Content }}").unwrap();

    let err = site::build(&config_for(root, "/")).unwrap_err();
    assert!(matches!(err, SiteError::Render { .. }));
    assert!(err.to_string().contains("untitled.md"));
    assert!(!root.join("docs/untitled.html").exists());
}
