use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".bookshelf.toml";

/// Load config file content from CWD first, then home directory
///
/// Searches for the config file in:
/// 1. Current working directory as .bookshelf.toml
/// 2. Home directory as .bookshelf.toml
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file() -> Option<String> {
    let home = dirs::home_dir().map(|home| home.join(CONFIG_FILE));
    let candidates = std::iter::once(PathBuf::from(CONFIG_FILE)).chain(home);
    load_first(candidates)
}

fn load_first(candidates: impl IntoIterator<Item = PathBuf>) -> Option<String> {
    candidates.into_iter().find_map(|path| {
        let content = read(&path)?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn read(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
