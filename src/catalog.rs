// Locale-scoped catalogs: page metadata, hotels and locations
// Every load re-reads the documents; nothing is cached between requests.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const META_FILE: &str = "meta.json";
pub const HOTELS_FILE: &str = "hotels.json";
pub const LOCATIONS_FILE: &str = "locations.json";

#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No catalog registered for locale {0}")]
    UnknownLocale(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Locale code is empty")]
    Empty,

    #[error("Invalid locale code: {0:?}")]
    InvalidCode(String),
}

// A resolved locale code such as "en" or "es-MX".
// The code doubles as a directory name under the catalog root, so only ASCII
// alphanumerics, '-' and '_' are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Result<Self, LocaleError> {
        let code = code.into();
        if code.is_empty() {
            return Err(LocaleError::Empty);
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(LocaleError::InvalidCode(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title_text: String,
    pub description: String,
}

// Page name -> title/description, including the page404, results404 and checkout404 entries
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PageMetaMap(HashMap<String, PageMeta>);

impl PageMetaMap {
    pub fn get(&self, page: &str) -> Option<&PageMeta> {
        self.0.get(page)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, PageMeta)> for PageMetaMap {
    fn from_iter<I: IntoIterator<Item = (K, PageMeta)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    // Primary slug, matched against /:hotelPath
    pub link: String,
    // City slug, matched against /browse/:city
    pub prev_link: String,
    pub name: String,
    #[serde(default)]
    pub description1: String,
    // Remaining descriptive fields are passed through to the renderer untouched
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Location {
    pub link: String,
    pub txt: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub meta: PageMetaMap,
    pub hotels: Vec<Hotel>,
    pub locations: Vec<Location>,
}

#[derive(Deserialize)]
struct MetaDocument {
    meta: PageMetaMap,
}

#[derive(Deserialize)]
struct HotelsDocument {
    hotels: Vec<Hotel>,
}

#[derive(Deserialize)]
struct LocationsDocument {
    locations: Vec<Location>,
}

// Source of locale-scoped catalogs
pub trait CatalogSource: Send + Sync {
    fn load(&self, locale: &Locale) -> Result<Catalog, CatalogLoadError>;
}

// Reads <data_dir>/<locale>/{meta,hotels,locations}.json on every call
#[derive(Debug, Clone)]
pub struct FsCatalogStore {
    root: PathBuf,
}

impl FsCatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn locale_dir(&self, locale: &Locale) -> PathBuf {
        self.root.join(locale.as_str())
    }

    pub async fn load_async(&self, locale: &Locale) -> Result<Catalog, CatalogLoadError> {
        let dir = self.locale_dir(locale);
        debug!(locale = %locale, dir = %dir.display(), "Loading catalog");

        let (meta, hotels, locations) = futures::try_join!(
            read_document_async::<MetaDocument>(dir.join(META_FILE)),
            read_document_async::<HotelsDocument>(dir.join(HOTELS_FILE)),
            read_document_async::<LocationsDocument>(dir.join(LOCATIONS_FILE)),
        )?;

        Ok(Catalog {
            meta: meta.meta,
            hotels: hotels.hotels,
            locations: locations.locations,
        })
    }
}

impl CatalogSource for FsCatalogStore {
    fn load(&self, locale: &Locale) -> Result<Catalog, CatalogLoadError> {
        let dir = self.locale_dir(locale);
        debug!(locale = %locale, dir = %dir.display(), "Loading catalog");

        let meta: MetaDocument = read_document(&dir.join(META_FILE))?;
        let hotels: HotelsDocument = read_document(&dir.join(HOTELS_FILE))?;
        let locations: LocationsDocument = read_document(&dir.join(LOCATIONS_FILE))?;

        Ok(Catalog {
            meta: meta.meta,
            hotels: hotels.hotels,
            locations: locations.locations,
        })
    }
}

fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CatalogLoadError> {
    serde_json::from_str(content).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogLoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(path, &content)
}

async fn read_document_async<T: DeserializeOwned>(path: PathBuf) -> Result<T, CatalogLoadError> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CatalogLoadError::Io {
            path: path.clone(),
            source,
        })?;
    parse_document(&path, &content)
}

// Catalogs held in memory, handed out as fresh copies per load.
// Used for previews and tests where the catalog is built in code.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    catalogs: HashMap<Locale, Catalog>,
}

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, locale: Locale, catalog: Catalog) -> Self {
        self.catalogs.insert(locale, catalog);
        self
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self, locale: &Locale) -> Result<Catalog, CatalogLoadError> {
        self.catalogs
            .get(locale)
            .cloned()
            .ok_or_else(|| CatalogLoadError::UnknownLocale(locale.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_load_catalog_from_disk() {
        let dir = sample_catalog_dir();
        let store = FsCatalogStore::new(&dir.0);

        let catalog = store.load(&Locale::new("en").unwrap()).unwrap();
        assert_eq!(catalog.hotels.len(), 3);
        assert_eq!(catalog.locations.len(), 2);
        assert_eq!(catalog.meta.len(), 10);

        let hotel = &catalog.hotels[0];
        assert_eq!(hotel.link, "paris-hotel");
        assert_eq!(hotel.prev_link, "Paris");
        assert_eq!(hotel.name, "Grand Paris");
        assert_eq!(hotel.description1, "Nice");
        assert_eq!(hotel.details["description2"], "Near the river");
        assert_eq!(hotel.details["stars"], 4);

        let page404 = catalog.meta.get("page404").unwrap();
        assert_eq!(page404.title_text, "Page Not Found");
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let dir = sample_catalog_dir();
        let store = FsCatalogStore::new(&dir.0);
        let catalog = store.load(&Locale::new("en").unwrap()).unwrap();

        let links: Vec<&str> = catalog.hotels.iter().map(|h| h.link.as_str()).collect();
        assert_eq!(links, vec!["paris-hotel", "left-bank-inn", "madrid-central"]);
    }

    #[test]
    fn test_each_load_rereads_storage() {
        let dir = sample_catalog_dir();
        let store = FsCatalogStore::new(&dir.0);
        let en = Locale::new("en").unwrap();

        assert_eq!(store.load(&en).unwrap().hotels.len(), 3);
        dir.write("en", HOTELS_FILE, r#"{ "hotels": [] }"#);
        assert!(store.load(&en).unwrap().hotels.is_empty());
    }

    #[test]
    fn test_missing_locale_directory_is_io_error() {
        let dir = sample_catalog_dir();
        let store = FsCatalogStore::new(&dir.0);

        let err = store.load(&Locale::new("fr").unwrap()).unwrap_err();
        match err {
            CatalogLoadError::Io { path, .. } => assert!(path.ends_with("fr/meta.json")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test_case(META_FILE, "{ not json"; "meta is not json")]
    #[test_case(HOTELS_FILE, r#"{ "hotel": [] }"#; "hotels key missing")]
    #[test_case(HOTELS_FILE, r#"{ "hotels": [ { "link": "x", "name": "X" } ] }"#; "hotel without prevLink")]
    #[test_case(LOCATIONS_FILE, r#"{ "locations": { "link": "x" } }"#; "locations not a list")]
    fn test_malformed_document_is_parse_error(file: &str, content: &str) {
        let dir = sample_catalog_dir();
        dir.write("en", file, content);
        let store = FsCatalogStore::new(&dir.0);

        let err = store.load(&Locale::new("en").unwrap()).unwrap_err();
        match err {
            CatalogLoadError::Parse { path, .. } => assert!(path.ends_with(file)),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_async_matches_sync_load() {
        let dir = sample_catalog_dir();
        let store = FsCatalogStore::new(&dir.0);
        let es = Locale::new("es").unwrap();

        let sync_catalog = store.load(&es).unwrap();
        let async_catalog = tokio_test::block_on(store.load_async(&es)).unwrap();
        assert_eq!(sync_catalog, async_catalog);
        assert_eq!(async_catalog.hotels[0].name, "Gran Paris");
    }

    #[tokio::test]
    async fn test_load_async_reports_missing_file() {
        let dir = sample_catalog_dir();
        std::fs::remove_file(dir.0.join("es").join(LOCATIONS_FILE)).unwrap();
        let store = FsCatalogStore::new(&dir.0);

        let err = store.load_async(&Locale::new("es").unwrap()).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }

    #[test_case("en" ; "language")]
    #[test_case("es-MX" ; "language and region")]
    #[test_case("zh_Hant" ; "underscore")]
    fn test_valid_locale_codes(code: &str) {
        assert_eq!(Locale::new(code).unwrap().as_str(), code);
    }

    #[test_case("", LocaleError::Empty ; "empty")]
    #[test_case("../en", LocaleError::InvalidCode("../en".to_string()) ; "parent directory")]
    #[test_case("en/x", LocaleError::InvalidCode("en/x".to_string()) ; "separator")]
    #[test_case("e n", LocaleError::InvalidCode("e n".to_string()) ; "whitespace")]
    fn test_invalid_locale_codes(code: &str, expected: LocaleError) {
        assert_eq!(Locale::new(code).unwrap_err(), expected);
    }

    #[test]
    fn test_static_source_hands_out_copies() {
        let source = sample_source();
        let en = Locale::new("en").unwrap();

        let mut first = source.load(&en).unwrap();
        first.hotels.clear();
        assert_eq!(source.load(&en).unwrap().hotels.len(), 3);

        let err = source.load(&Locale::new("fr").unwrap()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::UnknownLocale(code) if code == "fr"));
    }
}
