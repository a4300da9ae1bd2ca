//! Site generation around the Markdown pipeline: static asset copying,
//! template substitution and recursive page generation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::error::MarkdownError;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";
const MARKDOWN_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to render {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        source: MarkdownError,
    },

    #[error("Content directory not found: {}", .0.display())]
    ContentNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> SiteError {
    let path = path.to_path_buf();
    move |source| SiteError::Io {
        action,
        path,
        source,
    }
}

/// What a full build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub static_files: usize,
}

/// Fill `template` with the rendered document and its title, then point
/// root-relative links at `base_path`.
pub fn render_page(
    markdown: &str,
    template: &str,
    base_path: &str,
) -> Result<String, MarkdownError> {
    let content = crate::render_markdown(markdown)?;
    let title = crate::extract_title(markdown)?;

    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content)
        .replace("href=\"/", &format!("href=\"{base_path}"))
        .replace("src=\"/", &format!("src=\"{base_path}")))
}

/// Render one Markdown file through `template` and write it to `dest`.
pub fn generate_page(
    source: &Path,
    template: &str,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    log::info!(
        "Generating page from {} to {}",
        source.display(),
        dest.display()
    );

    let markdown = fs::read_to_string(source).map_err(io_error("read", source))?;
    let page = render_page(&markdown, template, base_path).map_err(|source_err| {
        SiteError::Render {
            path: source.to_path_buf(),
            source: source_err,
        }
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }
    fs::write(dest, page).map_err(io_error("write", dest))
}

/// Generate an `.html` page for every Markdown file under `content_dir`,
/// mirroring its directory layout under `dest_dir`.
///
/// Returns the written pages in the order they were generated.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    base_path: &str,
) -> Result<Vec<PathBuf>, SiteError> {
    if !content_dir.exists() {
        return Err(SiteError::ContentNotFound(content_dir.to_path_buf()));
    }
    if !content_dir.is_dir() {
        return Err(SiteError::NotADirectory(content_dir.to_path_buf()));
    }
    if !template_path.exists() {
        return Err(SiteError::TemplateNotFound(template_path.to_path_buf()));
    }

    let template = fs::read_to_string(template_path).map_err(io_error("read", template_path))?;
    log::debug!("using template {}", template_path.display());

    let mut pages = Vec::new();
    generate_dir(content_dir, &template, dest_dir, base_path, &mut pages)?;
    Ok(pages)
}

fn generate_dir(
    dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
    pages: &mut Vec<PathBuf>,
) -> Result<(), SiteError> {
    fs::create_dir_all(dest_dir).map_err(io_error("create directory", dest_dir))?;

    for path in sorted_entries(dir)? {
        if path.is_dir() {
            let Some(name) = path.file_name() else {
                continue;
            };
            generate_dir(&path, template, &dest_dir.join(name), base_path, pages)?;
        } else if path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION) {
            let Some(stem) = path.file_stem() else {
                continue;
            };
            let mut file_name = stem.to_os_string();
            file_name.push(".html");
            let dest = dest_dir.join(file_name);
            generate_page(&path, template, &dest, base_path)?;
            pages.push(dest);
        } else {
            log::warn!("Skipping non-Markdown file {}", path.display());
        }
    }

    Ok(())
}

/// Replace the contents of `dest` with a recursive copy of `source`.
///
/// `dest` itself is kept (only emptied), and a missing `source` is created
/// empty. Returns the number of files copied.
pub fn copy_static(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    remove_contents(dest)?;
    if !source.exists() {
        log::warn!("Static directory {} missing, creating it", source.display());
        fs::create_dir_all(source).map_err(io_error("create directory", source))?;
    }
    copy_dir(source, dest)
}

fn remove_contents(dir: &Path) -> Result<(), SiteError> {
    if !dir.exists() {
        return Ok(());
    }
    for path in sorted_entries(dir)? {
        // symlink_metadata so a link to a directory is unlinked, not emptied
        let is_dir = fs::symlink_metadata(&path)
            .map_err(io_error("inspect", &path))?
            .is_dir();
        if is_dir {
            fs::remove_dir_all(&path).map_err(io_error("remove", &path))?;
        } else {
            fs::remove_file(&path).map_err(io_error("remove", &path))?;
        }
    }
    Ok(())
}

fn copy_dir(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(dest).map_err(io_error("create directory", dest))?;

    let mut copied = 0;
    for path in sorted_entries(source)? {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dest.join(name);
        if path.is_dir() {
            copied += copy_dir(&path, &target)?;
        } else {
            log::info!("Copying {} to {}", path.display(), target.display());
            fs::copy(&path, &target).map_err(io_error("copy", &path))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut paths = fs::read_dir(dir)
        .map_err(io_error("read directory", dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(io_error("read directory", dir))?;
    paths.sort();
    Ok(paths)
}

/// Copy static assets into the output directory, then generate every page.
pub fn build(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;
    let static_files = copy_static(&paths.static_dir, &paths.output)?;
    let pages = generate_pages_recursive(
        &paths.content,
        &paths.template,
        &paths.output,
        &config.site.base_path,
    )?;
    Ok(BuildReport {
        pages,
        static_files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<html><head><title>{{ Title }}</title>\
        <link href=\"/index.css\" rel=\"stylesheet\"></head>\
        <body>{{ Content }}</body></html>";

    #[test]
    fn render_page_fills_placeholders() {
        let page = render_page("# Hi\n\nThere", TEMPLATE, "/").unwrap();
        assert_eq!(
            page,
            "<html><head><title>Hi</title><link href=\"/index.css\" rel=\"stylesheet\"></head>\
             <body><div><h1>Hi</h1><p>There</p></div></body></html>"
        );
    }

    #[test]
    fn render_page_rewrites_root_relative_links() {
        let page = render_page(
            "# T\n\n[home](/) ![logo](/images/logo.png) [ext](https://x.dev)",
            "{{ Title }}|{{ Content }}",
            "/repo/",
        )
        .unwrap();
        assert_eq!(
            page,
            "T|<div><h1>T</h1><p><a href=\"/repo/\">home</a> \
             <img src=\"/repo/images/logo.png\" alt=\"logo\"> \
             <a href=\"https://x.dev\">ext</a></p></div>"
        );
    }

    #[test]
    fn render_page_needs_a_title() {
        assert_eq!(
            render_page("## Sub only", TEMPLATE, "/").unwrap_err(),
            MarkdownError::NoTitleFound
        );
    }

    #[test]
    fn generate_mirrors_content_tree() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        let out = tmp.path().join("public");
        let template = tmp.path().join("template.html");
        fs::create_dir_all(content.join("blog/post")).unwrap();
        fs::write(content.join("index.md"), "# Home\n\nWelcome").unwrap();
        fs::write(content.join("blog/post/index.md"), "# Post\n\n- a\n- b").unwrap();
        fs::write(content.join("notes.txt"), "ignored").unwrap();
        fs::write(&template, "{{ Content }}").unwrap();

        let pages = generate_pages_recursive(&content, &template, &out, "/").unwrap();

        assert_eq!(
            pages,
            vec![out.join("blog/post/index.html"), out.join("index.html")]
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/post/index.html")).unwrap(),
            "<div><h1>Post</h1><ul><li>a</li><li>b</li></ul></div>"
        );
        assert!(!out.join("notes.html").exists());
    }

    #[test]
    fn generate_reports_the_failing_file() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        let template = tmp.path().join("template.html");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("bad.md"), "# Bad\n\n```\nnever closed").unwrap();
        fs::write(&template, "{{ Content }}").unwrap();

        let out = tmp.path().join("out");
        let err = generate_pages_recursive(&content, &template, &out, "/").unwrap_err();
        match err {
            SiteError::Render { path, source } => {
                assert_eq!(path, content.join("bad.md"));
                assert_eq!(source, MarkdownError::UnterminatedCodeBlock);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn generate_checks_inputs() {
        let tmp = TempDir::new().unwrap();
        let template = tmp.path().join("template.html");
        let out = tmp.path().join("out");

        assert!(matches!(
            generate_pages_recursive(&tmp.path().join("missing"), &template, &out, "/"),
            Err(SiteError::ContentNotFound(_))
        ));

        fs::write(tmp.path().join("file.md"), "# x").unwrap();
        assert!(matches!(
            generate_pages_recursive(&tmp.path().join("file.md"), &template, &out, "/"),
            Err(SiteError::NotADirectory(_))
        ));

        assert!(matches!(
            generate_pages_recursive(tmp.path(), &template, &out, "/"),
            Err(SiteError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn copy_static_replaces_destination_contents() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        let dest = tmp.path().join("public");
        fs::create_dir_all(src.join("images")).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(src.join("images/logo.png"), [0u8, 1, 2]).unwrap();
        fs::create_dir_all(dest.join("stale")).unwrap();
        fs::write(dest.join("old.html"), "old").unwrap();

        let copied = copy_static(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert!(dest.join("index.css").exists());
        assert_eq!(fs::read(dest.join("images/logo.png")).unwrap(), vec![0, 1, 2]);
        assert!(!dest.join("old.html").exists());
        assert!(!dest.join("stale").exists());
    }

    #[test]
    fn copy_static_creates_missing_source() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("static");
        let dest = tmp.path().join("public");

        assert_eq!(copy_static(&src, &dest).unwrap(), 0);
        assert!(src.is_dir());
        assert!(dest.is_dir());
    }
}
