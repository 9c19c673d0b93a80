//! Corefile Generator
//!
//! Renders a [CoreDNS] Corefile for a [Tailscale] DNS server from a [Jinja] template, using
//! settings taken from `TS_*` environment variables.
//!
//! The generator runs once at container start, before the DNS server process. It reads the
//! [template][template], substitutes the resolved [configuration][config], optionally appends
//! raw additional configuration, and overwrites the output Corefile. It never validates the
//! rendered Corefile, and never starts or signals the DNS server.
//!
//! [CoreDNS]: https://coredns.io
//! [Tailscale]: https://tailscale.com
//! [Jinja]: https://jinja.palletsprojects.com/
//!
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod generator;
pub mod template;

pub use config::{Config, Defaults};
pub use error::Error;
pub use generator::{generate, write};
pub use template::CorefileContext;
