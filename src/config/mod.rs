pub mod generate;
pub mod parse;
pub mod types;

use regex::Regex;
use std::path::{Path, PathBuf};

pub use parse::{load_config, ConfigError};
pub use types::Config;

/// Expands `$env{VAR_NAME}` references in a string. Unset variables are left
/// unchanged so the parser can report them with context.
pub fn expand_env_vars(text: &str) -> String {
    let re = Regex::new(r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex");

    re.replace_all(text, |caps: &regex::Captures| {
        let var_name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        std::env::var(var_name)
            .unwrap_or_else(|_| caps.get(0).map(|m| m.as_str()).unwrap_or_default().to_string())
    })
    .to_string()
}

/// Expands a leading tilde to the user's home directory. Paths without a
/// tilde, or systems without a resolvable home, pass through unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    } else if path_str == "~" {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir;
        }
    }

    path.to_path_buf()
}

/// Resolves the config file path: the explicit `--config` argument if given,
/// then `~/.config/cmx-anonymiser/config.yml`, then
/// `/etc/cmx-anonymiser/config.yml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(path));
    }

    if let Some(home_dir) = dirs::home_dir() {
        let user_config = home_dir.join(".config/cmx-anonymiser/config.yml");
        if user_config.exists() {
            return Some(user_config);
        }
    }

    let system_config = PathBuf::from("/etc/cmx-anonymiser/config.yml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}
