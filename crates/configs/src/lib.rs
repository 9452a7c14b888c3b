use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Missing keys fall back to `ServerConfig::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
    pub frontend_dir: String,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            worker_threads: Some(4),
            frontend_dir: default_frontend_dir(),
            json_logs: false,
        }
    }
}

/// Google Sheets connection settings.
///
/// `client_email` and `private_key` are normally supplied through
/// `GOOGLE_SERVICE_ACCOUNT_EMAIL` / `GOOGLE_PRIVATE_KEY` rather than the file.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            api_base: default_api_base(),
            token_uri: default_token_uri(),
            client_email: None,
            private_key: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sheets,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheets" => Ok(StoreBackend::Sheets),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("unknown store backend `{other}` (expected sheets or memory)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
}

fn default_frontend_dir() -> String { "frontend".into() }
fn default_api_base() -> String { "https://sheets.googleapis.com".into() }
fn default_token_uri() -> String { "https://oauth2.googleapis.com/token".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if present) + process environment, normalized.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables; `lookup` abstracts `std::env::var` for tests.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT `{port}` is not a valid port"))?;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS") {
            let threads = w
                .parse()
                .map_err(|_| anyhow!("TOKIO_WORKER_THREADS `{w}` is not a valid thread count"))?;
            self.server.worker_threads = Some(threads);
        }
        if let Some(id) = lookup("GOOGLE_SHEET_ID") {
            self.sheets.spreadsheet_id = id;
        }
        if let Some(email) = lookup("GOOGLE_SERVICE_ACCOUNT_EMAIL") {
            self.sheets.client_email = Some(email);
        }
        if let Some(key) = lookup("GOOGLE_PRIVATE_KEY") {
            self.sheets.private_key = Some(key);
        }
        if let Some(backend) = lookup("SHEET_STORE") {
            self.store.backend = backend.parse()?;
        }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.sheets.normalize();
        if self.store.backend == StoreBackend::Sheets && self.sheets.spreadsheet_id.is_empty() {
            return Err(anyhow!(
                "sheets.spreadsheet_id is empty; set it in config.toml or GOOGLE_SHEET_ID, or use SHEET_STORE=memory"
            ));
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.frontend_dir.trim().is_empty() {
            self.frontend_dir = default_frontend_dir();
        }
        Ok(())
    }
}

impl SheetsConfig {
    fn normalize(&mut self) {
        self.spreadsheet_id = self.spreadsheet_id.trim().to_string();
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        // Blank credentials behave like absent ones: auth fails on first use.
        if self.client_email.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.client_email = None;
        }
        if self.private_key.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.private_key = None;
        }
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}
