//! Corefile template loading and rendering.
//!
//! Templates use [Jinja] syntax as implemented by [`minijinja`]. Three variables are available:
//!
//! * `domain`: the tailnet domain, possibly empty.
//! * `hosts_file`: path to a hosts file, or `none` when there is no hosts file.
//! * `forward_to`: upstream resolver(s) for the `forward` plugin.
//!
//! E.g.
//! ```jinja
//! . {
//!     tailscale {{ domain }}
//! {%- if hosts_file %}
//!     hosts {{ hosts_file }}
//! {%- endif %}
//!     forward . {{ forward_to }}
//! }
//! ```
//!
//! As with Jinja, a single trailing newline at the end of the template is not rendered.
//!
//! [Jinja]: https://jinja.palletsprojects.com/

use crate::error::Error;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Values substituted into the Corefile template.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorefileContext<'a> {
    pub domain: &'a str,
    pub hosts_file: Option<&'a str>,
    pub forward_to: &'a str,
}

/// Read the template source at `path`.
///
/// # Errors
///
/// Returns [`Error::TemplateRead`] if the file is missing or unreadable.
pub fn load(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::TemplateRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Render template `source` with `context`.
///
/// # Errors
///
/// Returns [`Error::TemplateRender`] if `source` is not a valid template.
pub fn render(source: &str, context: &CorefileContext<'_>) -> Result<String, Error> {
    let env = Environment::new();
    Ok(env.render_str(source, context)?)
}
