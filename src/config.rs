use std::str::FromStr;

use log::warn;

use crate::blockchain::DEFAULT_DIFFICULTY;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_HTTP_PORT: u16 = 3001;
pub const DEFAULT_P2P_PORT: u16 = 6001;

/// Node settings read from the environment (optionally seeded by `.env`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub host: String,
    pub http_port: u16,
    pub p2p_port: u16,
    pub peers: Vec<String>,
    pub difficulty: u32,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let peers = lookup("PEERS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            http_port: parsed(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT),
            p2p_port: parsed(&lookup, "P2P_PORT", DEFAULT_P2P_PORT),
            peers,
            difficulty: parsed(&lookup, "DIFFICULTY", DEFAULT_DIFFICULTY),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={raw:?}, using default");
            default
        }),
    }
}
