use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use orcamento_core::company::CompanyProfile;

const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Server settings, read from `ORCAMENTO_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Where the template renderer stages PDFs.
    pub output_dir: PathBuf,
    pub keep_pdfs: bool,
    pub company: CompanyProfile,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset and empty values fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("ORCAMENTO_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid ORCAMENTO_BIND {bind_raw:?}: {e}"))?;

        let output_dir = get("ORCAMENTO_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(env::temp_dir);

        let keep_pdfs = match get("ORCAMENTO_KEEP_PDFS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                eyre::eyre!("invalid ORCAMENTO_KEEP_PDFS {raw:?}: expected true or false")
            })?,
            None => false,
        };

        let company = match get("ORCAMENTO_COMPANY_FILE") {
            Some(path) => {
                let path = PathBuf::from(path);
                let profile = CompanyProfile::load(&path).map_err(|e| {
                    eyre::eyre!("failed to load company profile at {}: {e}", path.display())
                })?;
                tracing::info!(path = %path.display(), "company profile loaded");
                profile
            }
            None => CompanyProfile::default(),
        };

        Ok(Self {
            bind,
            output_dir,
            keep_pdfs,
            company,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
