use std::{
    env,
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_HOST: [u8; 4] = [0, 0, 0, 0];
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub addr: SocketAddr,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("APP_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let host: IpAddr = lookup("HOST")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let seed_demo = lookup("APP_SEED_DEMO")
            .map(|value| !matches!(value.trim(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            data_path,
            addr: SocketAddr::new(host, port),
            seed_demo,
        }
    }
}
