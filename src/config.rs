use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/moodTrackerEntries.json";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub host: [u8; 4],
    pub port: u16,
}

impl Config {
    /// Reads `APP_DATA_PATH`, `HOST` and `PORT`, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self {
            data_path: resolve_data_path(),
            host: env::var("HOST")
                .ok()
                .and_then(|value| value.parse::<std::net::Ipv4Addr>().ok())
                .map(|addr| addr.octets())
                .unwrap_or([127, 0, 0, 1]),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

pub fn resolve_data_path() -> PathBuf {
    env::var("APP_DATA_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH))
}
