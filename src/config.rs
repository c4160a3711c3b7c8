// Site configuration: where the catalogs live and which locales are served

use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data/strings";
pub const DEFAULT_SITE_NAME: &str = "SmartlingHotels";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub data_dir: PathBuf,
    pub site_name: String,
    pub supported_locales: Vec<String>,
    pub default_locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            site_name: DEFAULT_SITE_NAME.to_string(),
            supported_locales: vec!["en".to_string(), "es".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

impl SiteConfig {
    // Defaults overridden by SITE_DATA_DIR, SITE_NAME and SITE_LOCALES (comma separated)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("SITE_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("SITE_NAME").filter(|n| !n.trim().is_empty()) {
            config.site_name = name;
        }

        if let Some(raw) = lookup("SITE_LOCALES") {
            let locales: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect();
            if let Some(first) = locales.first() {
                config.default_locale = first.clone();
                config.supported_locales = locales;
            }
        }

        config
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_locales.iter().any(|l| l == code)
    }

    // Falls back to the default locale for anything the site does not serve.
    // Choosing between Accept-Language candidates stays with the caller.
    pub fn resolve_locale<'a>(&'a self, code: &'a str) -> &'a str {
        if self.is_supported(code) {
            code
        } else {
            &self.default_locale
        }
    }
}
