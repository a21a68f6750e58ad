use serde::{Deserialize, Serialize};

pub const DEFAULT_CDN_HOST: &str = "masterani.me";

/// Poster URL builder for the image CDN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cdn {
    host: String,
}

impl Cdn {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// `https://cdn.<host>/poster/1/<file>`.
    ///
    /// Catalog entries pass `poster.file`; releases and detail records pass
    /// their bare `poster` string.
    pub fn poster_url(&self, file: &str) -> String {
        format!("https://cdn.{}/poster/1/{file}", self.host)
    }
}

impl Default for Cdn {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_HOST)
    }
}
