// Booking form parsing: query parameters -> BookingDraft
// No field is validated here; an unparseable night count is carried as Nights::Invalid.

use serde::{Serialize, Serializer};
use std::collections::HashMap;

pub const FIRST_NAME_PARAM: &str = "firstName";
pub const LAST_NAME_PARAM: &str = "lastName";
pub const EMAIL_PARAM: &str = "email";
pub const NIGHTS_PARAM: &str = "nights";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nights {
    Count(i64),
    #[default]
    Invalid,
}

impl Nights {
    pub fn count(self) -> Option<i64> {
        match self {
            Nights::Count(n) => Some(n),
            Nights::Invalid => None,
        }
    }

    pub fn is_invalid(self) -> bool {
        matches!(self, Nights::Invalid)
    }
}

// The renderer sees a number, or null for the invalid sentinel
impl Serialize for Nights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nights::Count(n) => serializer.serialize_i64(*n),
            Nights::Invalid => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub nights: Nights,
}

// Query parameters as handed over by the router; first value per key
pub type QueryParams = HashMap<String, String>;

pub struct BookingFormParser;

impl BookingFormParser {
    pub fn parse(params: &QueryParams) -> BookingDraft {
        BookingDraft {
            first_name: params.get(FIRST_NAME_PARAM).cloned(),
            last_name: params.get(LAST_NAME_PARAM).cloned(),
            email: params.get(EMAIL_PARAM).cloned(),
            nights: params
                .get(NIGHTS_PARAM)
                .map_or(Nights::Invalid, |raw| parse_nights(raw)),
        }
    }

    pub fn parse_query(raw_query: &str) -> BookingDraft {
        Self::parse(&query_params(raw_query))
    }
}

// Decodes an application/x-www-form-urlencoded query string, keeping the first value per key
pub fn query_params(raw_query: &str) -> QueryParams {
    let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query);
    let mut params = QueryParams::new();
    for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

// Lenient integer parse: leading whitespace, optional sign, optional 0x prefix,
// then as many digits as are present. Trailing garbage is ignored.
pub fn parse_nights(raw: &str) -> Nights {
    let trimmed = raw.trim_start();

    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map_or(digits.len(), |(i, _)| i);
    let digits = &digits[..end];

    if digits.is_empty() {
        return Nights::Invalid;
    }

    // Widened so i64::MIN, whose magnitude is not an i64, still parses
    let value = match i128::from_str_radix(digits, radix) {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => return Nights::Invalid,
    };
    i64::try_from(value).map_or(Nights::Invalid, Nights::Count)
}
