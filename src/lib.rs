// Catalog resolution and route dispatch for the locale-aware hotel listing site

pub mod booking;
pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod i18n;
pub mod slug;
pub mod view;

// Re-export key types for convenience
pub use booking::{BookingDraft, BookingFormParser, Nights, QueryParams};
pub use catalog::{
    Catalog, CatalogLoadError, CatalogSource, FsCatalogStore, Hotel, Locale, LocaleError,
    Location, PageMeta, PageMetaMap, StaticCatalogSource,
};
pub use config::SiteConfig;
pub use dispatch::{DispatchError, Route, RouteDispatcher};
pub use i18n::{BuiltinTranslator, Translator};
pub use slug::{filter_all, find_first, MatchMode, SlugIndex};
pub use view::ViewModel;
