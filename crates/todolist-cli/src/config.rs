use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Deserialize, Debug)]
pub struct SchedulerConfig {
    /// Period of the overdue-closure daemon, in minutes.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
}

fn default_database_path() -> String {
    "todolist.db".to_string()
}

fn default_interval_minutes() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("todolist.toml"))
            .merge(Env::prefixed("TODOLIST_").split("__"))
            .extract()
    }
}
