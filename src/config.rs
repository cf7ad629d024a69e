use std::path::Path;

use derive_getters::Getters;
use ini::{Ini, ParseOption, Properties};
use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.ini";
pub const DEFAULT_DB_SECTION: &str = "redshift";
pub const DEFAULT_BASE_URL: &str = "http://api.marketstack.com/v1/tickers";
pub const DEFAULT_SYMBOL: &str = "YPF";
pub const DEFAULT_TABLE: &str = "api";

/// Values are read literally: credentials may contain `\` and quotes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// Everything a run needs, read once from the INI file.
#[derive(Clone, Debug, Getters)]
pub struct AppConfig {
    api: ApiConfig,
    database: DatabaseConfig,
    smtp: SmtpConfig,
    email: EmailConfig,
}

#[derive(Clone, Debug, Getters)]
pub struct ApiConfig {
    key: String,
    base_url: String,
    symbol: String,
}

#[derive(Clone, Debug, Getters)]
pub struct DatabaseConfig {
    user: String,
    pwd: String,
    host: String,
    port: u16,
    dbname: String,
    schema: String,
    table: String,
}

#[derive(Clone, Debug, Getters)]
pub struct SmtpConfig {
    server: String,
    port: u16,
    username: String,
    password: String,
}

#[derive(Clone, Debug, Getters)]
pub struct EmailConfig {
    sender: String,
    receiver: String,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>, db_section: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ini =
            Ini::load_from_file_opt(path, parse_option()).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_ini(&ini, db_section)?;

        info!(path = %path.display(), db_section, "Configuration loaded");

        Ok(config)
    }

    /// Parses INI text with the same options as [`AppConfig::load`].
    pub fn from_ini_str(contents: &str, db_section: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str_opt(contents, parse_option())?;
        Self::from_ini(&ini, db_section)
    }

    pub fn from_ini(ini: &Ini, db_section: &str) -> Result<Self, ConfigError> {
        let api = Section::find(ini, "api")?;
        let db = Section::find(ini, db_section)?;
        let smtp = Section::find(ini, "SMTP")?;
        let email = Section::find(ini, "Email")?;

        Ok(Self {
            api: ApiConfig {
                key: api.required("key")?,
                base_url: api.optional("base_url", DEFAULT_BASE_URL),
                symbol: api.optional("symbol", DEFAULT_SYMBOL),
            },
            database: DatabaseConfig {
                user: db.required("user")?,
                pwd: db.required("pwd")?,
                host: db.required("host")?,
                port: db.port("port")?,
                dbname: db.required("dbname")?,
                schema: db.required("schema")?,
                table: db.optional("table", DEFAULT_TABLE),
            },
            smtp: SmtpConfig {
                server: smtp.required("server")?,
                port: smtp.port("port")?,
                username: smtp.required("username")?,
                password: smtp.required("password")?,
            },
            email: EmailConfig {
                sender: email.required("sender")?,
                receiver: email.required("receiver")?,
            },
        })
    }

    /// Splits the configuration so each component takes its own part by value.
    pub fn into_parts(self) -> (ApiConfig, DatabaseConfig, SmtpConfig, EmailConfig) {
        (self.api, self.database, self.smtp, self.email)
    }
}

impl DatabaseConfig {
    /// Connection URL with the password masked, safe to log.
    pub fn redacted_url(&self) -> String {
        format!(
            "postgresql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.dbname
        )
    }
}

/// A named INI section. Keys match case-insensitively.
struct Section<'a> {
    name: &'a str,
    props: &'a Properties,
}

impl<'a> Section<'a> {
    fn find(ini: &'a Ini, name: &'a str) -> Result<Self, ConfigError> {
        ini.section(Some(name))
            .map(|props| Self { name, props })
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))
    }

    fn get(&self, key: &str) -> Option<&'a str> {
        self.props
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey {
                section: self.name.to_string(),
                key: key.to_string(),
            })
    }

    fn optional(&self, key: &str, default: &str) -> String {
        self.get(key)
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
            .to_string()
    }

    fn port(&self, key: &str) -> Result<u16, ConfigError> {
        let value = self.required(key)?;
        value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value,
        })
    }
}
