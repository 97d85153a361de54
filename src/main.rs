mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ps_core::{Config, MediaSettings};
use ps_engine::{parse_line, Engine, EngineEvent};
use ps_settings::open_store;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise use defaults based on the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "playshell=trace,ps_core=debug,ps_engine=trace,ps_settings=debug".to_string()
        } else {
            "playshell=info,ps_engine=info,ps_settings=info".to_string()
        }
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::load_or_default(cli.config.as_deref());
    for warning in config.validate() {
        tracing::warn!("Config: {warning}");
    }

    match cli.command {
        Commands::Play { file, fresh } => play(&config, &file, fresh).await,
        Commands::Info { file } => info(&config, &file),
        Commands::Hash { file } => hash(&file),
        Commands::CheckTools => check_tools(&config),
    }
}

/// Resolve the engine executable from config or PATH.
fn resolve_engine(config: &Config) -> Result<PathBuf> {
    if let Some(ref path) = config.engine.path {
        return Ok(path.clone());
    }
    which::which(&config.engine.name).map_err(|e| {
        anyhow::anyhow!("engine '{}' not found on PATH: {e}", config.engine.name)
    })
}

async fn play(config: &Config, file: &Path, fresh: bool) -> Result<()> {
    let engine_path = resolve_engine(config)?;
    let settings_dir = config.settings.resolved_dir();
    let mut store = open_store(config.settings.method, &settings_dir);

    let mut mset = MediaSettings::default();
    if !fresh && store.exist_settings_for(file) {
        store.load_settings_for(file, &mut mset);
        tracing::info!("Resuming {} at {:.1}s", file.display(), mset.current_sec);
    }

    let mut engine = Engine::new(engine_path);
    engine.arg("-slave").arg("-quiet");
    engine.args(config.engine.args.iter().cloned());
    if mset.current_sec > 0.0 {
        engine.arg("-ss").arg(format!("{:.1}", mset.current_sec));
    }
    engine.arg(file.to_string_lossy().into_owned());

    let mut handle = engine.spawn()?;
    let mut finished = false;

    loop {
        tokio::select! {
            line = handle.next_line() => {
                let Some(line) = line else { break };
                match parse_line(&line) {
                    EngineEvent::Position(secs) => mset.current_sec = secs,
                    EngineEvent::Property { name, value } => {
                        tracing::debug!("Engine property {name}={value}");
                    }
                    EngineEvent::Answer { name, value } => {
                        tracing::debug!("Engine answer {name}={value}");
                    }
                    EngineEvent::EndOfFile => finished = true,
                    EngineEvent::Other(text) => tracing::trace!("{text}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted; asking engine to quit");
                let grace = Duration::from_millis(config.engine.quit_grace_ms);
                let _ = handle.quit(grace).await;
                break;
            }
        }
    }

    let status = handle.wait().await?;
    tracing::info!("Engine exited with {status}");

    if finished {
        // A file watched to the end restarts from the beginning next time.
        mset.current_sec = 0.0;
    }
    if !fresh {
        store.save_settings_for(file, &mset);
    }
    Ok(())
}

fn info(config: &Config, file: &Path) -> Result<()> {
    let store = open_store(config.settings.method, &config.settings.resolved_dir());
    if !store.exist_settings_for(file) {
        println!("No saved settings for {}", file.display());
        return Ok(());
    }

    let mut mset = MediaSettings::default();
    store.load_settings_for(file, &mut mset);
    print!("{}", toml::to_string_pretty(&mset)?);
    Ok(())
}

fn hash(file: &Path) -> Result<()> {
    match ps_settings::content_hash(file) {
        Some(hash) => {
            println!("{hash}");
            Ok(())
        }
        None => anyhow::bail!("cannot read {}", file.display()),
    }
}

fn check_tools(config: &Config) -> Result<()> {
    match resolve_engine(config) {
        Ok(path) => {
            println!("engine: {} ({})", config.engine.name, path.display());
            Ok(())
        }
        Err(e) => {
            println!("engine: {} NOT FOUND", config.engine.name);
            Err(e)
        }
    }
}
