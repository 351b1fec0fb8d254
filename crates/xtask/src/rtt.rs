use anyhow::{Context, Result};

use crate::constants::CHIP;
use crate::flash::probe_rs;

/// Flash `elf` and stream its RTT output.
pub fn run(elf: &str) -> Result<()> {
    probe_rs(&["run", "--chip", CHIP, elf]).context("probe-rs run failed")
}

/// Stream RTT from firmware that is already running.
pub fn attach(elf: &str) -> Result<()> {
    probe_rs(&["attach", "--chip", CHIP, elf])
        .context("probe-rs attach failed")
}
