use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two languages the site is published in.
///
/// Spanish is the site default and the language of the primary text fields of
/// generated recipes. The store keeps recipes in [`Locale::CANONICAL`] and
/// overlays translations on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Locale in which persisted recipes are stored without a translation lookup.
    pub const CANONICAL: Locale = Locale::En;

    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Locale::default()
    }

    /// Parse a locale tag, falling back to the site default for anything unknown.
    pub fn parse_or_default(tag: &str) -> Locale {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts `es`/`en` in any case, with or without a region (`es-MX`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "-").to_lowercase();
        let language = normalized.split('-').next().unwrap_or_default();
        match language {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
        assert!(Locale::Es.is_default());
        assert!(!Locale::En.is_default());
    }

    #[test]
    fn test_parse_with_region() {
        assert_eq!("es-MX".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn test_unknown_locale() {
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::parse_or_default("fr"), Locale::Es);
        assert_eq!(Locale::parse_or_default(""), Locale::Es);
    }

    #[test]
    fn test_display_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }
}
