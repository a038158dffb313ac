use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use taskapp_tools::config::Config;
use taskapp_tools::icons;
use taskapp_tools::ios_fix::{self, FixOptions};

#[derive(Parser)]
#[command(name = "taskapp-tools")]
#[command(about = "Build-pipeline helpers for the Simple Task Manager app", long_about = None)]
#[command(version)]
struct Cli {
    /// Flutter project root (the directory containing ios/ and android/)
    #[arg(short, long, global = true, default_value = ".")]
    project_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the app icon and write all iOS and Android variants plus Contents.json
    GenerateIcons,
    /// Patch the Xcode project, reinstall CocoaPods and try a simulator build
    FixIos {
        /// Skip the verification build
        #[arg(long)]
        skip_build: bool,
    },
    /// Write a taskapp-tools.yaml with the default settings
    InitConfig {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::GenerateIcons => icons::run_in_project(&cli.project_dir).map(|_| ()),
        Commands::FixIos { skip_build } => {
            ios_fix::run_in_project(&cli.project_dir, FixOptions { skip_build });
            Ok(())
        }
        Commands::InitConfig { force } => init_config_command(&cli.project_dir, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_config_command(project_dir: &Path, force: bool) -> Result<()> {
    let config_path = Config::config_path(project_dir);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    let path = Config::default().save(project_dir)?;
    println!("✓ Created default config at: {}", path.display());

    Ok(())
}
