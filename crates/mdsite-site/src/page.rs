//! Markdown page to HTML file generation.

use std::fs;
use std::path::{Path, PathBuf};

use mdsite_renderer::markdown_to_html;

use crate::copy::sorted_entries;
use crate::error::SiteError;
use crate::template::{extract_title, render_template};

/// Extension of source pages.
const MARKDOWN_SUFFIX: &str = ".md";

/// Convert one markdown file into a full HTML page at `dest`.
///
/// Parent directories of `dest` are created as needed.
///
/// # Errors
///
/// Returns [`SiteError::Io`] if a file cannot be read or written,
/// [`SiteError::Convert`] if the markdown is invalid and
/// [`SiteError::MissingTitle`] if the page has no `# ` heading.
pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest: &Path,
    basepath: &str,
) -> Result<(), SiteError> {
    tracing::info!(
        source = %from.display(),
        template = %template_path.display(),
        destination = %dest.display(),
        "Generating page"
    );

    let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;
    let template = fs::read_to_string(template_path).map_err(SiteError::io(template_path))?;

    let content = markdown_to_html(&markdown).map_err(|source| SiteError::Convert {
        path: from.to_path_buf(),
        source,
    })?;
    let title =
        extract_title(&markdown).ok_or_else(|| SiteError::MissingTitle(from.to_path_buf()))?;

    let html = render_template(&template, title, &content, basepath);

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(dest, html).map_err(SiteError::io(dest))
}

/// Generate a page for every `.md` file under `content_dir`.
///
/// Each `content_dir/<rel>.md` is written to `dest_dir/<rel>.html`; other
/// files are ignored. Returns the generated paths in traversal order.
///
/// # Errors
///
/// Stops at the first page that fails and returns its error.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
) -> Result<Vec<PathBuf>, SiteError> {
    let mut pages = Vec::new();
    walk_pages(content_dir, template_path, dest_dir, basepath, &mut pages)?;
    tracing::debug!(count = pages.len(), dir = %content_dir.display(), "Generated pages");
    Ok(pages)
}

fn walk_pages(
    dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
    pages: &mut Vec<PathBuf>,
) -> Result<(), SiteError> {
    for entry in sorted_entries(dir)? {
        let path = entry.path();
        let is_dir = entry.file_type().map_err(SiteError::io(&path))?.is_dir();

        if is_dir {
            walk_pages(
                &path,
                template_path,
                &dest_dir.join(entry.file_name()),
                basepath,
                pages,
            )?;
        } else if entry
            .file_name()
            .to_string_lossy()
            .ends_with(MARKDOWN_SUFFIX)
        {
            let dest = dest_dir.join(entry.file_name()).with_extension("html");
            generate_page(&path, template_path, &dest, basepath)?;
            pages.push(dest);
        }
    }
    Ok(())
}
