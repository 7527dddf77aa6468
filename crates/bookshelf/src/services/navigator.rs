//! Navigation

/// Moves the user to another page
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator for the console front end: prints the new location
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, path: &str) {
        log::info!("Navigating to {}", path);
        println!("→ {}", path);
    }
}
