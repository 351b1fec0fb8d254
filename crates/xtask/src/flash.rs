use anyhow::{Context, Result};
use std::process::Command;

use crate::build::{build_firmware, elf_path};
use crate::constants::CHIP;

pub fn flash_firmware(
    features: Option<&str>,
    release: bool,
    erase: bool,
) -> Result<()> {
    build_firmware(features, release)?;

    if erase {
        println!("Erasing chip...");
        probe_rs(&["erase", "--chip", CHIP, "--allow-erase-all"])
            .context("Failed to erase chip")?;
    }

    println!("Flashing firmware...");
    let elf = elf_path(release);
    probe_rs(&["download", "--chip", CHIP, &elf, "--preverify"])
        .context("Failed to flash firmware")?;
    probe_rs(&["reset", "--chip", CHIP]).context("Failed to reset target")?;

    Ok(())
}

pub(crate) fn probe_rs(args: &[&str]) -> Result<()> {
    let status = Command::new("probe-rs")
        .args(args)
        .status()
        .context("Failed to start probe-rs")?;

    if !status.success() {
        anyhow::bail!("probe-rs {} failed", args.first().unwrap_or(&""));
    }

    Ok(())
}
