mod build;
mod cli;
mod constants;
mod flash;
mod rtt;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Build { features, release } => {
            println!("Building firmware...");
            build::build_firmware(features.as_deref(), *release)?;
            println!("Build complete!");
        }
        Commands::Flash {
            features,
            release,
            erase,
        } => {
            flash::flash_firmware(features.as_deref(), *release, *erase)?;
        }
        Commands::Run { features, release } => {
            build::build_firmware(features.as_deref(), *release)?;
            // probe-rs flashes before attaching RTT
            rtt::run(&build::elf_path(*release))?;
        }
        Commands::Attach { release } => {
            rtt::attach(&build::elf_path(*release))?;
        }
        Commands::Test => {
            build::test_host_crates()?;
        }
    }

    Ok(())
}
