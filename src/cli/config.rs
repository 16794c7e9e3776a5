use crate::config::generate::generate_starter_config;
use std::fs;
use std::path::PathBuf;

/// Writes a starter config to the default user location, or prints it.
pub fn init(stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_content = generate_starter_config();

    if stdout {
        print!("{}", config_content);
        return Ok(());
    }

    let config_path = match dirs::home_dir() {
        Some(home_dir) => home_dir.join(".config/cmx-anonymiser/config.yml"),
        None => PathBuf::from("/etc/cmx-anonymiser/config.yml"),
    };

    if config_path.exists() {
        eprintln!(
            "Error: Config file already exists at {}",
            config_path.display()
        );
        eprintln!("Remove it first or use --stdout to print the config");
        std::process::exit(1);
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, config_content)?;

    println!("Config file written to {}", config_path.display());
    Ok(())
}

/// Loads and validates a config file, reporting problems without running.
pub fn validate(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path.ok_or("No config file found. Use --config to specify a path.")?;

    println!("Validating config file: {}", path.display());

    match crate::config::load_config(&path) {
        Ok(_) => {
            println!("Config is valid");
            Ok(())
        }
        Err(e) => {
            eprintln!("Config validation failed:\n{}", e);
            std::process::exit(1);
        }
    }
}
