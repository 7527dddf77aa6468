use anyhow::Result;
use bookshelf::console::{self, Command, Console, Flow, HELP};
use bookshelf::services::{ConsoleNavigator, DemoAuthService, Navigator};
use bookshelf::{build_store, effects, logger};
use bookshelf_config::AppConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting bookshelf");
    let config = AppConfig::load();

    let store = build_store(&config)?;
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);
    let auth = Arc::new(DemoAuthService::from_config(&config.auth));
    let effect_tasks = effects::register(auth, Arc::clone(&navigator)).start(&store)?;
    let watchers = console::spawn_watchers(&store);
    let console = Console::new(store, navigator);

    println!("bookshelf (log: {})", log_file.display());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if console.execute(command) == Flow::Quit {
                    break;
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    for watcher in watchers {
        watcher.abort();
    }
    effect_tasks.shutdown();

    log::info!("Exiting bookshelf");
    Ok(())
}
