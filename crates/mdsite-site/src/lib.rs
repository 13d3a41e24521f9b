//! Static site generation for mdsite.
//!
//! Turns a directory of markdown pages into HTML files using a single page
//! template, next to a verbatim copy of a static asset directory.
//!
//! # Architecture
//!
//! - [`copy_dir_recursive`]: replaces the output directory with the static assets
//! - [`generate_pages_recursive`]: mirrors the content tree as `.html` pages
//! - [`generate_page`]: markdown to HTML, title extraction, template fill and
//!   basepath rewriting for one page
//! - [`SiteBuilder`]: runs the two steps above in order
//!
//! Markdown conversion is provided by [`mdsite_renderer`].

mod builder;
mod copy;
mod error;
mod page;
mod template;

pub use builder::{BuildConfig, BuildReport, SiteBuilder};
pub use copy::copy_dir_recursive;
pub use error::SiteError;
pub use page::{generate_page, generate_pages_recursive};
pub use template::{extract_title, render_template};
