//! Runtime server configuration
//!
//! Config is the single source of truth for what the running process uses.
//! It is read from environment variables once at startup and is immutable
//! for the process lifetime. Unparseable values fall back to defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use sysmap_core::MapLimits;

/// Runtime configuration, derived from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port (`PORT`, default 3000)
    pub port: u16,

    /// Directory holding the embedded store (`DATA_DIR`, default `./data`)
    pub data_dir: PathBuf,

    /// Directory holding the static frontend (`STATIC_DIR`, default
    /// `./public`)
    pub static_dir: PathBuf,

    /// Name given to the bootstrap map (`DEFAULT_MAP_NAME`)
    pub default_map_name: String,

    /// Map count cap, 0 = unlimited (`MAX_MAPS`)
    pub max_maps: usize,

    /// Per-map node cap, 0 = unlimited (`MAX_NODES_PER_MAP`)
    pub max_nodes_per_map: usize,

    /// `*` or a comma-separated origin list (`CORS_ORIGINS`)
    pub cors_origins: String,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", 3000),
            data_dir: PathBuf::from(env_string("DATA_DIR", "./data")),
            static_dir: PathBuf::from(env_string("STATIC_DIR", "./public")),
            default_map_name: env_string("DEFAULT_MAP_NAME", "My System Map"),
            max_maps: env_or("MAX_MAPS", 0),
            max_nodes_per_map: env_or("MAX_NODES_PER_MAP", 0),
            cors_origins: env_string("CORS_ORIGINS", "*"),
        }
    }

    /// The count caps handed to the map service.
    pub fn limits(&self) -> MapLimits {
        MapLimits {
            max_maps: self.max_maps,
            max_nodes_per_map: self.max_nodes_per_map,
        }
    }
}
