//! Error types.

use std::ffi::OsString;
use std::path::PathBuf;

/// Error enumerates the ways generating a Corefile can fail.
///
/// None of these are recoverable: the generator runs once at container start and any failure
/// should abort startup.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when the [template][crate::template] can't be read from
    /// [`Config::template_path`][`crate::config::Config::template_path`].
    #[error("unable to read Corefile template {}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Returned when the template is not valid Jinja syntax, or fails while rendering.
    #[error("unable to render Corefile template")]
    TemplateRender(#[from] minijinja::Error),

    /// Returned when the rendered Corefile can't be written to
    /// [`Config::output_path`][`crate::config::Config::output_path`].
    #[error("unable to write Corefile to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a `TS_*` environment variable is set to a value that isn't valid UTF-8.
    #[error("environment variable {var} is not valid UTF-8: {value:?}")]
    NotUnicode { var: &'static str, value: OsString },

    /// Returned when an additional configuration file exists but can't be read.
    #[error("unable to read additional configuration {}", path.display())]
    AdditionalConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
