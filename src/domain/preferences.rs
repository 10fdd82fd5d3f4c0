use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Display currency. Amounts are never converted between currencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyOption {
    pub code: String,
    pub symbol: String,
    pub name: String,
    pub locale: String,
}

impl CurrencyOption {
    pub fn new(
        code: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into().to_uppercase(),
            symbol: symbol.into(),
            name: name.into(),
            locale: locale.into(),
        }
    }

    /// Finds a built-in option by its ISO 4217 code, ignoring case.
    pub fn by_code(code: &str) -> Option<CurrencyOption> {
        let needle = code.trim().to_uppercase();
        Self::catalogue()
            .iter()
            .find(|option| option.code == needle)
            .cloned()
    }

    /// Built-in options in picker order; the first one is the default.
    pub fn catalogue() -> &'static [CurrencyOption] {
        &CURRENCY_CATALOGUE
    }
}

impl Default for CurrencyOption {
    fn default() -> Self {
        CURRENCY_CATALOGUE[0].clone()
    }
}

static CURRENCY_CATALOGUE: Lazy<Vec<CurrencyOption>> = Lazy::new(|| {
    vec![
        CurrencyOption::new("USD", "$", "US Dollar", "en-US"),
        CurrencyOption::new("EUR", "€", "Euro", "de-DE"),
        CurrencyOption::new("GBP", "£", "British Pound", "en-GB"),
        CurrencyOption::new("JPY", "¥", "Japanese Yen", "ja-JP"),
        CurrencyOption::new("INR", "₹", "Indian Rupee", "en-IN"),
        CurrencyOption::new("CAD", "CA$", "Canadian Dollar", "en-CA"),
        CurrencyOption::new("AUD", "A$", "Australian Dollar", "en-AU"),
        CurrencyOption::new("CHF", "CHF", "Swiss Franc", "de-CH"),
        CurrencyOption::new("CNY", "¥", "Chinese Yuan", "zh-CN"),
        CurrencyOption::new("BRL", "R$", "Brazilian Real", "pt-BR"),
        CurrencyOption::new("MXN", "MX$", "Mexican Peso", "es-MX"),
    ]
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        })
    }
}

pub const DEFAULT_REMINDER_HOUR: u8 = 20;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub daily_reminder_enabled: bool,
    pub daily_reminder_hour: u8,
    pub daily_reminder_minute: u8,
}

impl NotificationPreferences {
    /// Clamps hour to 0–23 and minute to 0–59.
    pub fn clamped(self) -> Self {
        Self {
            daily_reminder_enabled: self.daily_reminder_enabled,
            daily_reminder_hour: self.daily_reminder_hour.min(23),
            daily_reminder_minute: self.daily_reminder_minute.min(59),
        }
    }
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            daily_reminder_enabled: false,
            daily_reminder_hour: DEFAULT_REMINDER_HOUR,
            daily_reminder_minute: DEFAULT_REMINDER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_lookup_ignores_case() {
        let euro = CurrencyOption::by_code("eur").expect("euro present");
        assert_eq!(euro.symbol, "€");
        assert!(CurrencyOption::by_code("XYZ").is_none());
        assert_eq!(CurrencyOption::default().code, "USD");
    }

    #[test]
    fn catalogue_codes_are_unique_and_default_leads() {
        let catalogue = CurrencyOption::catalogue();
        assert_eq!(catalogue[0], CurrencyOption::default());
        let mut codes: Vec<_> = catalogue.iter().map(|option| option.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalogue.len());
    }

    #[test]
    fn reminder_time_is_clamped() {
        let prefs = NotificationPreferences {
            daily_reminder_enabled: true,
            daily_reminder_hour: 31,
            daily_reminder_minute: 75,
        }
        .clamped();
        assert_eq!(prefs.daily_reminder_hour, 23);
        assert_eq!(prefs.daily_reminder_minute, 59);
    }
}
