use analyzers::batch::AnalysisLimit;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Limit applied to batch requests that do not name one.
    pub default_limit: AnalysisLimit,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            default_limit: AnalysisLimit::All,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("ADSCAN_HOST")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .filter(|port| *port != 0)
                .unwrap_or(defaults.port),
            default_limit: lookup("ADSCAN_DEFAULT_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_limit),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn fallback_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port.wrapping_add(1))
    }
}
