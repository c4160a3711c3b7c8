// Localized strings the dispatcher formats itself
//
// The locale is always an argument. There is no "current locale" anywhere, so
// concurrent requests for different locales cannot see each other's strings.

use crate::catalog::Locale;
use std::collections::HashMap;

// The msgid doubles as the text for any locale without an injected template,
// the same as an untranslated gettext lookup.
const BROWSE_CITY_MSGID: &str = "SmartlingHotels is currently displaying all hotels present in the SmartlingHotels Database that are located in the area of: %s";

pub trait Translator: Send + Sync {
    // Description of the hotel results page for one city label
    fn browse_city_description(&self, locale: &Locale, city: &str) -> String;
}

// sprintf-style substitution of the first %s
pub fn format_template(template: &str, value: &str) -> String {
    template.replacen("%s", value, 1)
}

#[derive(Debug, Clone, Default)]
pub struct BuiltinTranslator {
    browse_city: HashMap<String, String>,
}

impl BuiltinTranslator {
    pub fn with_browse_city_template(
        mut self,
        locale: &Locale,
        template: impl Into<String>,
    ) -> Self {
        self.browse_city
            .insert(locale.as_str().to_string(), template.into());
        self
    }
}

impl Translator for BuiltinTranslator {
    fn browse_city_description(&self, locale: &Locale, city: &str) -> String {
        let template = self
            .browse_city
            .get(locale.as_str())
            .map_or(BROWSE_CITY_MSGID, String::as_str);
        format_template(template, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    #[test]
    fn test_english_description() {
        let translator = BuiltinTranslator::default();
        assert_eq!(
            translator.browse_city_description(&locale("en"), "Paris, France"),
            "SmartlingHotels is currently displaying all hotels present in the SmartlingHotels Database that are located in the area of: Paris, France"
        );
    }

    #[test]
    fn test_spanish_description() {
        let translator = BuiltinTranslator::default()
            .with_browse_city_template(&locale("es"), "Hoteles en la zona de: %s");
        assert_eq!(
            translator.browse_city_description(&locale("es"), "Paris, Francia"),
            "Hoteles en la zona de: Paris, Francia"
        );
        assert!(translator
            .browse_city_description(&locale("en"), "Paris, France")
            .ends_with("area of: Paris, France"));
    }

    #[test]
    fn test_untranslated_locales_use_the_msgid() {
        let translator = BuiltinTranslator::default();
        for code in ["es", "de", "es-MX"] {
            assert_eq!(
                translator.browse_city_description(&locale(code), "Berlin"),
                format_template(BROWSE_CITY_MSGID, "Berlin")
            );
        }
    }

    #[test]
    fn test_custom_template() {
        let translator =
            BuiltinTranslator::default().with_browse_city_template(&locale("fr"), "Hotels a %s");
        assert_eq!(
            translator.browse_city_description(&locale("fr"), "Lyon"),
            "Hotels a Lyon"
        );
    }

    #[test]
    fn test_format_template_substitutes_once() {
        assert_eq!(format_template("%s and %s", "a"), "a and %s");
        assert_eq!(format_template("no placeholder", "a"), "no placeholder");
        assert_eq!(format_template("city: %s", ""), "city: ");
    }
}
