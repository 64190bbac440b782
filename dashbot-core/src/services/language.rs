use parking_lot::RwLock;
use tracing::info;

use dashbot_common::models::Language;

use crate::Error;

/// Process-wide reply language shared by the control API and every connection.
#[derive(Debug, Default)]
pub struct LanguageSetting {
    current: RwLock<Language>,
}

impl LanguageSetting {
    pub fn new(initial: Language) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    pub fn get(&self) -> Language {
        *self.current.read()
    }

    pub fn set(&self, lang: Language) -> Language {
        *self.current.write() = lang;
        info!("Language set to '{lang}'");
        lang
    }

    /// Leaves the current value untouched when `raw` is not a supported language.
    pub fn set_from_str(&self, raw: &str) -> Result<Language, Error> {
        let lang = raw.parse::<Language>()?;
        Ok(self.set(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_korean() {
        assert_eq!(LanguageSetting::default().get(), Language::Ko);
    }

    #[test]
    fn invalid_value_keeps_previous_setting() {
        let setting = LanguageSetting::new(Language::En);
        assert!(setting.set_from_str("fr").is_err());
        assert_eq!(setting.get(), Language::En);

        assert_eq!(setting.set_from_str("KO").unwrap(), Language::Ko);
        assert_eq!(setting.get(), Language::Ko);
    }
}
