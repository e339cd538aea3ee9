//! Server configuration loading.

use lattice_core::GatewayConfig;
use std::{env, fs, path::PathBuf};

/// Load the gateway configuration.
///
/// Reads the TOML file named by `LATTICE_SERVER_CONFIG`, falling back to
/// `lattice.toml` in the working directory. A missing default file yields
/// the built-in defaults; an explicitly configured path must exist.
pub fn load() -> anyhow::Result<GatewayConfig> {
    match env::var("LATTICE_SERVER_CONFIG") {
        Ok(path) => read_config(PathBuf::from(path)),
        Err(_) => {
            let path = PathBuf::from("lattice.toml");
            if path.exists() {
                read_config(path)
            } else {
                Ok(GatewayConfig::default())
            }
        }
    }
}

fn read_config(path: PathBuf) -> anyhow::Result<GatewayConfig> {
    let raw = fs::read_to_string(&path)?;
    let cfg: GatewayConfig = toml::from_str(&raw)?;
    Ok(cfg)
}
