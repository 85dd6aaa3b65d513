use crate::api::error;

pub struct Env {
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub friend_event_buffer: usize,
}

impl Env {
    /// Reads the process environment, after loading `.env` when present.
    pub fn load() -> Result<Self, error::SystemError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, error::SystemError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        let database_min_connections = parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", 1u32)?;
        if database_min_connections > database_max_connections {
            return Err(error::SystemError::config(
                "DATABASE_MIN_CONNECTIONS must not exceed DATABASE_MAX_CONNECTIONS",
            ));
        }

        let friend_event_buffer = parse_or(&lookup, "FRIEND_EVENT_BUFFER", 256usize)?;
        if friend_event_buffer == 0 {
            return Err(error::SystemError::config("FRIEND_EVENT_BUFFER must be greater than 0"));
        }

        Ok(Env {
            database_url,
            database_max_connections,
            database_min_connections,
            friend_event_buffer,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, error::SystemError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| error::SystemError::config(format!("{key} must be a valid integer"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Result<Env, error::SystemError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Env::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let env = env(&[]).unwrap();
        assert!(env.database_url.is_none());
        assert_eq!(env.database_max_connections, 5);
        assert_eq!(env.database_min_connections, 1);
        assert_eq!(env.friend_event_buffer, 256);
    }

    #[test]
    fn test_overrides() {
        let env = env(&[
            ("DATABASE_URL", "postgres://localhost/friends"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
            ("FRIEND_EVENT_BUFFER", "8"),
        ])
        .unwrap();
        assert_eq!(env.database_url.as_deref(), Some("postgres://localhost/friends"));
        assert_eq!(env.database_max_connections, 10);
        assert_eq!(env.friend_event_buffer, 8);
    }

    #[test]
    fn test_invalid_values() {
        assert!(env(&[("DATABASE_MAX_CONNECTIONS", "many")]).is_err());
        assert!(env(&[("DATABASE_MIN_CONNECTIONS", "6")]).is_err());
        assert!(env(&[("FRIEND_EVENT_BUFFER", "0")]).is_err());
    }
}
