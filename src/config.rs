//! Generator configuration.
//!
//! A [`Config`] is resolved once at startup from environment variables and is then passed
//! explicitly to the [generator][crate::generator]. Nothing past this module reads the process
//! environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `TS_DOMAIN` | empty |
//! | `TS_HOSTS_FILE` | [`Defaults::hosts_file`] if that path exists, otherwise no hosts file |
//! | `TS_FORWARD_TO` | [`DEFAULT_FORWARD_TO`] |
//! | `TS_ADDITIONAL_CONFIG` | contents of `TS_ADDITIONAL_CONFIG_FILE`, if any |
//! | `TS_ADDITIONAL_CONFIG_FILE` | [`Defaults::additional_config_file`] |
//! | `TS_COREFILE_TEMPLATE` | [`Defaults::template_path`] |
//! | `TS_COREFILE_OUTPUT` | [`Defaults::output_path`] |

use crate::error::Error;
use crate::template::CorefileContext;
use std::collections::HashMap;
use std::env::VarError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DOMAIN_VAR: &str = "TS_DOMAIN";
pub const HOSTS_FILE_VAR: &str = "TS_HOSTS_FILE";
pub const FORWARD_TO_VAR: &str = "TS_FORWARD_TO";
pub const ADDITIONAL_CONFIG_VAR: &str = "TS_ADDITIONAL_CONFIG";
pub const ADDITIONAL_CONFIG_FILE_VAR: &str = "TS_ADDITIONAL_CONFIG_FILE";
pub const TEMPLATE_PATH_VAR: &str = "TS_COREFILE_TEMPLATE";
pub const OUTPUT_PATH_VAR: &str = "TS_COREFILE_OUTPUT";

const VARS: [&str; 7] = [
    DOMAIN_VAR,
    HOSTS_FILE_VAR,
    FORWARD_TO_VAR,
    ADDITIONAL_CONFIG_VAR,
    ADDITIONAL_CONFIG_FILE_VAR,
    TEMPLATE_PATH_VAR,
    OUTPUT_PATH_VAR,
];

/// Upstream used by the `forward` plugin when `TS_FORWARD_TO` is not set.
pub const DEFAULT_FORWARD_TO: &str = "/etc/resolv.conf";

/// Fixed filesystem locations used when the environment doesn't say otherwise.
#[derive(Debug, Clone)]
pub struct Defaults {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    /// Probed for existence when `TS_HOSTS_FILE` is unset or blank.
    pub hosts_file: PathBuf,
    /// Read when `TS_ADDITIONAL_CONFIG` is unset or blank.
    pub additional_config_file: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("/templates/Corefile.j2"),
            output_path: PathBuf::from("/Corefile"),
            hosts_file: PathBuf::from("/etc/ts-dns/hosts/custom_hosts"),
            additional_config_file: PathBuf::from("/etc/ts-dns/additional/additional.conf"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub domain: String,
    pub hosts_file: Option<String>,
    pub forward_to: String,
    /// Raw text appended after the rendered template. Never blank when present.
    pub additional_config: Option<String>,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
}

impl Config {
    /// Resolve a [`Config`] from the process environment and the standard [`Defaults`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotUnicode`] if one of the `TS_*` variables is not valid UTF-8.
    ///
    /// Returns [`Error::AdditionalConfigRead`] if an additional configuration file exists but
    /// can't be read.
    pub fn from_env() -> Result<Self, Error> {
        let vars = read_vars(|key| std::env::var(key))?;
        Self::from_lookup(|key| vars.get(key).cloned(), &Defaults::default())
    }

    /// Resolve a [`Config`] using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdditionalConfigRead`] if an additional configuration file exists but
    /// can't be read.
    pub fn from_lookup<F>(lookup: F, defaults: &Defaults) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let domain = lookup(DOMAIN_VAR).unwrap_or_default();

        let hosts_file = match non_blank(HOSTS_FILE_VAR) {
            Some(hosts_file) => {
                if !Path::new(&hosts_file).exists() {
                    tracing::warn!("hosts file {hosts_file} does not exist");
                }
                Some(hosts_file)
            }
            None => probe_hosts_file(&defaults.hosts_file),
        };

        let forward_to = non_blank(FORWARD_TO_VAR).unwrap_or_else(|| DEFAULT_FORWARD_TO.into());

        let additional_config = match non_blank(ADDITIONAL_CONFIG_VAR) {
            Some(text) => Some(text),
            None => {
                let path = non_blank(ADDITIONAL_CONFIG_FILE_VAR)
                    .map_or_else(|| defaults.additional_config_file.clone(), PathBuf::from);
                load_additional_config_file(&path)?
            }
        };

        let template_path = non_blank(TEMPLATE_PATH_VAR)
            .map_or_else(|| defaults.template_path.clone(), PathBuf::from);
        let output_path = non_blank(OUTPUT_PATH_VAR)
            .map_or_else(|| defaults.output_path.clone(), PathBuf::from);

        let config = Self {
            domain,
            hosts_file,
            forward_to,
            additional_config,
            template_path,
            output_path,
        };
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }

    /// The values substituted into the template.
    #[must_use]
    pub fn context(&self) -> CorefileContext<'_> {
        CorefileContext {
            domain: &self.domain,
            hosts_file: self.hosts_file.as_deref(),
            forward_to: &self.forward_to,
        }
    }
}

/// Snapshot every `TS_*` variable through `read`, refusing values that aren't UTF-8 rather than
/// treating them as unset.
fn read_vars<F>(read: F) -> Result<HashMap<&'static str, String>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut vars = HashMap::new();
    for var in VARS {
        match read(var) {
            Ok(value) => {
                vars.insert(var, value);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(value)) => return Err(Error::NotUnicode { var, value }),
        }
    }
    Ok(vars)
}

// Only a confirmed absence disables the default; metadata errors leave it to the DNS server.
fn probe_hosts_file(default: &Path) -> Option<String> {
    match default.try_exists() {
        Ok(false) => return None,
        Ok(true) => tracing::info!("using default hosts file {}", default.display()),
        Err(err) => tracing::warn!(
            "unable to check default hosts file {}, using it anyway: {err}",
            default.display()
        ),
    }
    Some(default.display().to_string())
}

/// Load additional Corefile configuration from `path`.
///
/// Blank lines and `#` comment lines are dropped. Returns `None` when the file doesn't exist or
/// has no remaining content.
///
/// # Errors
///
/// Returns [`Error::AdditionalConfigRead`] if the file exists but can't be read.
pub fn load_additional_config_file(path: &Path) -> Result<Option<String>, Error> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(Error::AdditionalConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let lines: Vec<&str> = contents
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect();

    if lines.is_empty() {
        return Ok(None);
    }
    tracing::info!("loaded additional configuration from {}", path.display());
    Ok(Some(lines.join("\n")))
}
