use serde::Deserialize;
use std::fmt;

use crate::DispatchError;

pub const EMAIL_ADDRESS_VAR: &str = "EMAIL_ADDRESS";
pub const GMAIL_PASSKEY_VAR: &str = "GMAIL_PASSKEY";
pub const TELEGRAM_BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// The four credentials a dispatch needs. Empty means absent.
#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub gmail_passkey: String,
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("email_address", &self.email_address)
            .field("gmail_passkey", &present(&self.gmail_passkey))
            .field("telegram_bot_token", &present(&self.telegram_bot_token))
            .field("telegram_chat_id", &present(&self.telegram_chat_id))
            .finish()
    }
}

fn present(value: &str) -> &'static str {
    if value.trim().is_empty() {
        "<missing>"
    } else {
        "<redacted>"
    }
}

impl Secrets {
    /// Environment variable names of every secret that is empty.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (EMAIL_ADDRESS_VAR, &self.email_address),
            (GMAIL_PASSKEY_VAR, &self.gmail_passkey),
            (TELEGRAM_BOT_TOKEN_VAR, &self.telegram_bot_token),
            (TELEGRAM_CHAT_ID_VAR, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(self) -> Result<ValidSecrets, DispatchError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(DispatchError::ConfigurationMissing(missing));
        }

        Ok(ValidSecrets(self))
    }
}

/// Secrets that passed [`Secrets::validate`]; every field is non-empty.
#[derive(Clone, Debug)]
pub struct ValidSecrets(Secrets);

impl ValidSecrets {
    pub fn email_address(&self) -> &str {
        self.0.email_address.trim()
    }

    pub fn gmail_passkey(&self) -> &str {
        &self.0.gmail_passkey
    }

    pub fn telegram_bot_token(&self) -> &str {
        self.0.telegram_bot_token.trim()
    }

    pub fn telegram_chat_id(&self) -> &str {
        self.0.telegram_chat_id.trim()
    }
}

/// Where the dispatcher reads its credentials from, once per request.
pub trait SecretSource: Send + Sync {
    fn load(&self) -> Secrets;
}

impl SecretSource for Secrets {
    fn load(&self) -> Secrets {
        self.clone()
    }
}

/// Looks a secret up by variable name at call time.
pub type Lookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads the process environment on every call, falling back to the values
/// the configuration was loaded with.
#[derive(Clone, Debug)]
pub struct EnvSecrets {
    fallback: Secrets,
    lookup: Lookup,
}

impl EnvSecrets {
    pub fn new(fallback: Secrets) -> Self {
        Self::with_lookup(fallback, process_env)
    }

    pub fn with_lookup(fallback: Secrets, lookup: Lookup) -> Self {
        Self { fallback, lookup }
    }

    fn get(&self, key: &str, fallback: &str) -> String {
        (self.lookup)(key)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| fallback.to_owned())
    }
}

impl Default for EnvSecrets {
    fn default() -> Self {
        Self::new(Secrets::default())
    }
}

impl SecretSource for EnvSecrets {
    fn load(&self) -> Secrets {
        Secrets {
            email_address: self.get(EMAIL_ADDRESS_VAR, &self.fallback.email_address),
            gmail_passkey: self.get(GMAIL_PASSKEY_VAR, &self.fallback.gmail_passkey),
            telegram_bot_token: self.get(TELEGRAM_BOT_TOKEN_VAR, &self.fallback.telegram_bot_token),
            telegram_chat_id: self.get(TELEGRAM_CHAT_ID_VAR, &self.fallback.telegram_chat_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn full() -> Secrets {
        Secrets {
            email_address: "me@example.com".to_owned(),
            gmail_passkey: "app-passkey".to_owned(),
            telegram_bot_token: "123:abc".to_owned(),
            telegram_chat_id: "42".to_owned(),
        }
    }

    #[test]
    fn test_complete_secrets_validate() {
        let valid = full().validate().unwrap();
        assert_eq!(valid.email_address(), "me@example.com");
        assert_eq!(valid.telegram_chat_id(), "42");
    }

    #[test]
    fn test_each_missing_secret_is_reported() {
        let mut secrets = full();
        secrets.gmail_passkey = String::new();
        secrets.telegram_chat_id = "   ".to_owned();

        match secrets.validate() {
            Err(DispatchError::ConfigurationMissing(missing)) => {
                assert_eq!(missing, vec![GMAIL_PASSKEY_VAR, TELEGRAM_CHAT_ID_VAR]);
            }
            other => panic!("expected missing configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let debug = format!("{:?}", full());
        assert!(!debug.contains("app-passkey"));
        assert!(!debug.contains("123:abc"));
        assert!(debug.contains("<redacted>"));
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_env_source_falls_back_to_config() {
        let source = EnvSecrets::with_lookup(full(), no_env);
        assert_eq!(source.load(), full());
    }

    #[test]
    fn test_env_value_overrides_config() {
        fn chat_id_only(key: &str) -> Option<String> {
            match key {
                TELEGRAM_CHAT_ID_VAR => Some("99".to_owned()),
                GMAIL_PASSKEY_VAR => Some(String::new()),
                _ => None,
            }
        }

        let loaded = EnvSecrets::with_lookup(full(), chat_id_only).load();

        assert_eq!(loaded.telegram_chat_id, "99");
        assert_eq!(loaded.gmail_passkey, "app-passkey");
        assert_eq!(loaded.email_address, "me@example.com");
    }

    #[test]
    fn test_env_is_read_on_every_load() {
        static TOKEN: Mutex<Option<String>> = Mutex::new(None);

        fn token(key: &str) -> Option<String> {
            match key {
                TELEGRAM_BOT_TOKEN_VAR => TOKEN.lock().unwrap().clone(),
                _ => None,
            }
        }

        let source = EnvSecrets::with_lookup(Secrets::default(), token);
        assert!(source.load().validate().is_err());

        *TOKEN.lock().unwrap() = Some("456:def".to_owned());
        assert_eq!(source.load().telegram_bot_token, "456:def");

        *TOKEN.lock().unwrap() = Some("789:ghi".to_owned());
        assert_eq!(source.load().telegram_bot_token, "789:ghi");
    }
}
