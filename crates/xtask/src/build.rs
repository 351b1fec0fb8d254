use crate::constants::{FIRMWARE_BIN, FIRMWARE_MANIFEST, HOST_CRATES, TARGET};
use anyhow::{Context, Result};
use std::process::Command;

/// Location of the firmware ELF for the chosen profile.
pub fn elf_path(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/{FIRMWARE_BIN}")
}

pub fn build_firmware(features: Option<&str>, release: bool) -> Result<()> {
    let mut cargo_build = Command::new("cargo");
    cargo_build
        .arg("build")
        .arg("--manifest-path")
        .arg(FIRMWARE_MANIFEST)
        .arg("--target")
        .arg(TARGET);

    if release {
        cargo_build.arg("--release");
    }

    // Features replace the defaults so `--features ""` builds without defmt
    if let Some(features) = features {
        cargo_build.arg("--no-default-features");
        cargo_build.args(["--features", features]);
    }

    run_cargo(cargo_build, FIRMWARE_MANIFEST)
}

pub fn test_host_crates() -> Result<()> {
    let mut cargo_test = Command::new("cargo");
    cargo_test.arg("test");
    for name in HOST_CRATES {
        cargo_test.args(["-p", name]);
    }
    run_cargo(cargo_test, "host crates")
}

fn run_cargo(mut cmd: Command, what: &str) -> Result<()> {
    let status = cmd
        .status()
        .with_context(|| format!("Failed to run cargo for {what}"))?;

    if !status.success() {
        anyhow::bail!("cargo failed for {what}");
    }

    Ok(())
}
