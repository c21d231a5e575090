pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var(DATABASE_PATH_ENV)
                .unwrap_or_else(|_| "swiss_tournament.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TournamentSettings {
    /// Name given to the tournament created on first registration
    pub default_name: String,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            default_name: "First tournament".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub tournament: TournamentSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            tournament: TournamentSettings::default(),
        }
    }

    /// Config with the database path taken from the command line, if given
    pub fn with_database_path(path: Option<&str>) -> Self {
        let mut config = Self::new();
        if let Some(path) = path {
            config.database.path = path.to_string();
        }
        config
    }
}
