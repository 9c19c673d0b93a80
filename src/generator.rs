//! Corefile generation.
//!
//! [`generate`] renders the template and appends any additional configuration, without touching
//! the output path. [`write`] does the same and then overwrites
//! [`Config::output_path`][`crate::config::Config::output_path`] with the result.

use crate::config::Config;
use crate::error::Error;
use crate::template;
use std::fs::File;
use std::io::Write;

/// Join a rendered template and optional additional configuration into the final Corefile.
///
/// Additional configuration is appended verbatim after a single newline.
#[must_use]
pub fn compose(rendered: String, additional_config: Option<&str>) -> String {
    match additional_config {
        Some(additional) => format!("{rendered}\n{additional}"),
        None => rendered,
    }
}

/// Produce the Corefile contents for `config`.
///
/// # Errors
///
/// Returns [`Error::TemplateRead`] or [`Error::TemplateRender`] if the template can't be loaded
/// or rendered.
pub fn generate(config: &Config) -> Result<String, Error> {
    let source = template::load(&config.template_path)?;
    let rendered = template::render(&source, &config.context())?;
    Ok(compose(rendered, config.additional_config.as_deref()))
}

/// Generate the Corefile for `config` and write it to the configured output path, returning the
/// written contents.
///
/// The output file is only opened once the contents have been generated, so template failures
/// leave any existing output untouched.
///
/// # Errors
///
/// Returns the errors of [`generate`], or [`Error::OutputWrite`] if the output path can't be
/// written.
pub fn write(config: &Config) -> Result<String, Error> {
    let contents = generate(config)?;
    let output_error = |source: std::io::Error| Error::OutputWrite {
        path: config.output_path.clone(),
        source,
    };

    let mut output_file = File::create(&config.output_path).map_err(output_error)?;
    output_file
        .write_all(contents.as_bytes())
        .map_err(output_error)?;
    output_file.flush().map_err(output_error)?;

    tracing::info!(
        "wrote {} bytes to {}",
        contents.len(),
        config.output_path.display()
    );
    Ok(contents)
}
