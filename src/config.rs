use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::utils::pagination_utils::DEFAULT_PAGE_SIZE;

/// Server configuration, from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "medical-records-api", version, about = "REST API over the medical records database")]
pub struct Config {
    /// Full MySQL URL; when unset it is assembled from the DB_* settings below
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database user
    #[arg(long, env = "DBUSER", default_value = "root")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DBPASS", default_value = "", hide_env_values = true)]
    pub db_pass: String,

    /// Database address as host:port
    #[arg(long, env = "DB_HOST", default_value = "127.0.0.1:3306")]
    pub db_host: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "medical_records")]
    pub db_name: String,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Rows per page on list and search endpoints
    #[arg(long, env = "PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(i64).range(1..))]
    pub page_size: i64,

    /// Maximum pooled database connections
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// HTTP worker threads, one per core if unset
    #[arg(long)]
    pub workers: Option<usize>,

    /// Serve from an in-memory store instead of MySQL. Only the reference
    /// catalogs (units, shapes, formulations, vital signs, exams) are seeded
    /// and nothing is persisted
    #[arg(long)]
    pub in_memory: bool,

    /// Log filter (error, warn, info, debug, trace or a full directive)
    #[arg(short, long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

impl Config {
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => mysql_url(&self.db_user, &self.db_pass, &self.db_host, &self.db_name),
        }
    }

    /// The filter to install. A directive that does not parse falls back to
    /// `info` and its parse error is handed back for logging.
    pub fn log_filter(&self) -> (EnvFilter, Option<String>) {
        match self.log_level.as_deref().map(EnvFilter::try_new) {
            Some(Ok(filter)) => (filter, None),
            Some(Err(e)) => (EnvFilter::new("info"), Some(e.to_string())),
            None => (EnvFilter::new("info"), None),
        }
    }
}

pub fn mysql_url(user: &str, pass: &str, host: &str, name: &str) -> String {
    if pass.is_empty() {
        format!("mysql://{}@{}/{}", user, host, name)
    } else {
        format!("mysql://{}:{}@{}/{}", user, pass, host, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_from_parts() {
        assert_eq!(
            mysql_url("doc", "secret", "db:3306", "medical_records"),
            "mysql://doc:secret@db:3306/medical_records"
        );
        assert_eq!(
            mysql_url("doc", "", "127.0.0.1:3306", "mr"),
            "mysql://doc@127.0.0.1:3306/mr"
        );
    }

    #[test]
    fn explicit_url_wins() {
        let config = Config::try_parse_from([
            "medical-records-api",
            "--database-url",
            "mysql://a:b@c/d",
            "--db-user",
            "ignored",
        ])
        .unwrap();
        assert_eq!(config.database_url(), "mysql://a:b@c/d");
    }

    #[test]
    fn page_size_flag() {
        let config =
            Config::try_parse_from(["medical-records-api", "--page-size", "25", "--in-memory"]).unwrap();
        assert_eq!(config.page_size, 25);
        assert!(config.in_memory);
    }

    #[test]
    fn bad_log_directive_is_reported() {
        let config =
            Config::try_parse_from(["medical-records-api", "--log-level", "medical=loud"]).unwrap();
        let (_, rejected) = config.log_filter();
        assert!(rejected.is_some());

        let config = Config::try_parse_from(["medical-records-api", "--log-level", "debug"]).unwrap();
        assert!(config.log_filter().1.is_none());
    }

    #[test]
    fn page_size_must_be_positive() {
        assert!(Config::try_parse_from(["medical-records-api", "--page-size", "0"]).is_err());
        assert!(Config::try_parse_from(["medical-records-api", "--page-size", "-3"]).is_err());
    }
}
