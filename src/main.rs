use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};

use shortcut_composer::PluginContext;
use shortcut_composer::catalog;
use shortcut_composer::config::{ConfigStore, Location};
use shortcut_composer::host::{Host, MemoryHost};

#[derive(Parser, Debug)]
#[command(name = "shortcut-composer")]
#[command(version, about = "Inspect and edit Shortcut Composer settings")]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the location of the settings file
    Path,
    /// Print every setting with its current value
    Show,
    /// Print one setting
    Get { group: String, name: String },
    /// Change one setting; the value is validated before anything is written
    Set {
        group: String,
        name: String,
        value: String,
    },
    /// Reset settings to their defaults, optionally only one group
    Reset { group: Option<String> },
    /// List the stock actions
    Actions,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let path = match cli.config {
        Some(path) => path,
        None => ConfigStore::default_path().context("Failed to locate settings file")?,
    };

    if let Command::Path = cli.command {
        println!("{}", path.display());
        return Ok(());
    }

    let store = ConfigStore::load(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;

    // Building the catalog registers every persisted field with the store.
    let host: Arc<dyn Host> = Arc::new(MemoryHost::new());
    let ctx = PluginContext::new(host, Arc::clone(&store));
    let registry = catalog::build_registry(&ctx).context("Failed to build the action catalog")?;

    match cli.command {
        Command::Path => {}
        Command::Show => {
            let mut current_group = None;
            for spec in store.specs() {
                if spec.location != Location::Global {
                    continue;
                }
                if current_group.as_ref() != Some(&spec.group) {
                    if current_group.is_some() {
                        println!();
                    }
                    println!("[{}]", spec.group);
                    current_group = Some(spec.group.clone());
                }
                let value = store
                    .read_raw(Location::Global, &spec.group, &spec.name)
                    .unwrap_or_else(|| spec.default_raw().to_string());
                println!("{} = {}", spec.name, value);
            }
        }
        Command::Get { group, name } => {
            let spec = store
                .spec(Location::Global, &group, &name)
                .ok_or_else(|| anyhow!("Unknown setting {group}/{name}"))?;
            let value = store
                .read_raw(Location::Global, &group, &name)
                .unwrap_or_else(|| spec.default_raw().to_string());
            println!("{value}");
        }
        Command::Set { group, name, value } => {
            store
                .write_checked(Location::Global, &group, &name, &value)
                .with_context(|| format!("Failed to set {group}/{name}"))?;
            store.save().context("Failed to save settings")?;
            log::info!("Set {group}/{name}");
        }
        Command::Reset { group } => {
            if let Some(group) = &group {
                let known = store.specs().iter().any(|spec| &spec.group == group);
                if !known {
                    return Err(anyhow!("Unknown settings group '{group}'"));
                }
            }
            store.reset_defaults(group.as_deref());
            store.save().context("Failed to save settings")?;
            match group {
                Some(group) => println!("Reset settings of '{group}'"),
                None => println!("Reset all settings"),
            }
        }
        Command::Actions => {
            for name in registry.names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}
