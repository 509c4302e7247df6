//! Deployment environment detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the shell is running; selects logging defaults and the `.env` file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Variables consulted in order; the first one set wins
const ENVIRONMENT_VARS: [&str; 2] = ["ENVIRONMENT", "RV_ENV"];

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }

    /// Read `ENVIRONMENT` (or `RV_ENV`); unset or unknown means development
    pub fn from_env() -> Self {
        Self::detect(std::iter::empty())
    }

    /// Like [`Environment::from_env`], falling back to `file_vars` when the
    /// process sets neither variable
    ///
    /// `file_vars` are the entries of a dotenv file that has not been loaded
    /// yet, so a `.env` naming the environment can pick `.env.<environment>`.
    pub fn detect<I>(file_vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let from_process = ENVIRONMENT_VARS
            .iter()
            .find_map(|key| std::env::var(key).ok());

        from_process
            .or_else(|| {
                let file_vars: Vec<(String, String)> = file_vars.into_iter().collect();
                ENVIRONMENT_VARS.iter().find_map(|key| {
                    file_vars
                        .iter()
                        .find(|(name, _)| name == key)
                        .map(|(_, value)| value.clone())
                })
            })
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Environment specific dotenv file, loaded before the generic `.env`
    pub fn env_file(&self) -> &'static str {
        match self {
            Environment::Development => ".env.development",
            Environment::Staging => ".env.staging",
            Environment::Production => ".env.production",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let env = match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            other => return Err(format!("Unknown environment '{}'", other)),
        };
        Ok(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_aliases() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(" Stage ".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Development));
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for env in [
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn test_detect_falls_back_to_file_entries() {
        // assumes the test process itself sets neither variable
        if ENVIRONMENT_VARS.iter().any(|key| std::env::var(key).is_ok()) {
            return;
        }

        let file = vec![
            ("RV_LOG_LEVEL".to_string(), "info".to_string()),
            ("ENVIRONMENT".to_string(), "production".to_string()),
        ];
        assert_eq!(Environment::detect(file), Environment::Production);

        let aliased = vec![("RV_ENV".to_string(), "stage".to_string())];
        assert_eq!(Environment::detect(aliased), Environment::Staging);

        assert_eq!(Environment::detect(Vec::new()), Environment::Development);
    }

    #[test]
    fn test_env_file_names() {
        assert_eq!(Environment::Production.env_file(), ".env.production");
        assert!(Environment::default().is_development());
    }
}
