//! Page title extraction and template substitution.

/// Title placeholder in page templates.
const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Content placeholder in page templates.
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Return the text of the first line starting with `"# "`.
///
/// Deeper headings (`## `) do not count. The remainder of the line is
/// returned as-is.
///
/// # Example
///
/// ```
/// use mdsite_site::extract_title;
///
/// assert_eq!(extract_title("intro\n# Hello\n## Sub"), Some("Hello"));
/// assert_eq!(extract_title("## Only a subheading"), None);
/// ```
pub fn extract_title(markdown: &str) -> Option<&str> {
    markdown.split('\n').find_map(|line| line.strip_prefix("# "))
}

/// Fill a page template and rewrite root-relative URLs.
///
/// `{{ Content }}` is replaced before `{{ Title }}`, so a placeholder that
/// appears inside the rendered content is also substituted. Afterwards every
/// `href="/` and `src="/` is rewritten to start with `basepath`.
pub fn render_template(template: &str, title: &str, content: &str, basepath: &str) -> String {
    template
        .replace(CONTENT_PLACEHOLDER, content)
        .replace(TITLE_PLACEHOLDER, title)
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}"))
}
