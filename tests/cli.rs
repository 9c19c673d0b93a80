use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::os::unix::ffi::OsStringExt;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const TEMPLATE: &str = include_str!("../templates/Corefile.j2");

fn run(dir: &Path, vars: &[(&str, &str)]) -> Output {
    command(dir, vars)
        .output()
        .expect("failed to execute corefile-gen")
}

fn command(dir: &Path, vars: &[(&str, &str)]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corefile-gen"));
    cmd.env_clear()
        .env("TS_COREFILE_TEMPLATE", dir.join("Corefile.j2"))
        .env("TS_COREFILE_OUTPUT", dir.join("Corefile"))
        .env("TS_ADDITIONAL_CONFIG_FILE", dir.join("additional.conf"))
        .env("TS_HOSTS_FILE", dir.join("custom_hosts"));
    for (key, value) in vars {
        cmd.env(key, value);
    }
    cmd
}

#[test]
fn writes_and_echoes_corefile() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Corefile.j2"), TEMPLATE).unwrap();

    let output = run(
        dir.path(),
        &[
            ("TS_DOMAIN", "example.com"),
            ("TS_FORWARD_TO", "8.8.8.8"),
            ("TS_ADDITIONAL_CONFIG", "extra { block }"),
        ],
    );
    assert!(
        output.status.success(),
        "corefile-gen failed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(dir.path().join("Corefile")).unwrap();
    assert!(written.contains("tailscale example.com"));
    assert!(written.contains("forward . 8.8.8.8"));
    assert!(written.ends_with("}\nextra { block }"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, format!("Corefile generated:\n{written}\n"));
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Corefile.j2"), TEMPLATE).unwrap();
    let vars = [("TS_DOMAIN", "tail.example")];

    assert!(run(dir.path(), &vars).status.success());
    let first = fs::read(dir.path().join("Corefile")).unwrap();
    assert!(run(dir.path(), &vars).status.success());
    assert_eq!(first, fs::read(dir.path().join("Corefile")).unwrap());
}

#[test]
fn missing_template_exits_non_zero() {
    let dir = tempdir().unwrap();

    let output = run(dir.path(), &[]);
    assert!(!output.status.success());
    assert!(!dir.path().join("Corefile").exists());
    assert!(output.stdout.is_empty());
}

#[test]
fn non_utf8_output_path_exits_non_zero() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Corefile.j2"), TEMPLATE).unwrap();

    let mut requested = dir.path().as_os_str().to_os_string().into_vec();
    requested.extend_from_slice(b"/out\xff");
    let output = command(dir.path(), &[])
        .env("TS_COREFILE_OUTPUT", OsString::from_vec(requested))
        .output()
        .expect("failed to execute corefile-gen");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TS_COREFILE_OUTPUT"));
}

#[test]
fn failed_echo_exits_with_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Corefile.j2"), TEMPLATE).unwrap();
    let full = OpenOptions::new().write(true).open("/dev/full").unwrap();

    let output = command(dir.path(), &[("TS_DOMAIN", "example.com")])
        .stdout(full)
        .output()
        .expect("failed to execute corefile-gen");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("echoing Corefile"));
    assert!(fs::read_to_string(dir.path().join("Corefile"))
        .unwrap()
        .contains("tailscale example.com"));
}
