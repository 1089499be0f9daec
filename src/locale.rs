use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A language with an optional country, e.g. `en` or `pt_BR`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    pub lang: String,
    pub country: Option<String>,
}

impl Locale {
    /// Parse `<language>` or `<language>_<COUNTRY>`, case-insensitively.
    ///
    /// The language is lower-cased and the country upper-cased, so `EN_us`
    /// parses to `en_US`.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('_');
        let lang = parts.next().unwrap_or_default();
        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidLocale {
                value: value.to_owned(),
            });
        }
        let country = match parts.next() {
            Some(country) if !country.is_empty() => Some(country.to_uppercase()),
            Some(_) => {
                return Err(Error::InvalidLocale {
                    value: value.to_owned(),
                });
            }
            None => None,
        };
        if parts.next().is_some() {
            return Err(Error::InvalidLocale {
                value: value.to_owned(),
            });
        }
        Ok(Locale {
            lang: lang.to_lowercase(),
            country,
        })
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.lang, country),
            None => f.write_str(&self.lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("EN").unwrap();
        assert_eq!(locale.lang, "en");
        assert_eq!(locale.country, None);
        assert_eq!(locale.to_string(), "en");
    }

    #[test]
    fn test_parse_language_and_country() {
        assert_eq!(Locale::parse("ru_ua").unwrap().to_string(), "ru_UA");
        assert_eq!(Locale::parse("custom_DE").unwrap().to_string(), "custom_DE");
        assert_eq!("En_us".parse::<Locale>().unwrap().to_string(), "en_US");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            Locale::parse(""),
            Err(Error::InvalidLocale { .. })
        ));
        assert!(Locale::parse("en_").is_err());
        assert!(Locale::parse("en_US_x").is_err());
        assert!(Locale::parse("e n").is_err());
    }
}
