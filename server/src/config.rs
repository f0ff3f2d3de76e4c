use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_PUBLIC_DIR: &str = "client/public";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Built client bundle (`trunk build` output).
    pub static_dir: PathBuf,
    /// Root holding `styles/` and `data/`.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: server_port(),
            static_dir: dir_from_env("STATIC_DIR", DEFAULT_STATIC_DIR),
            public_dir: dir_from_env("PUBLIC_DIR", DEFAULT_PUBLIC_DIR),
        }
    }
}

pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

fn dir_from_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}
