// Route dispatch: catalog lookups -> view-models
//
// Each call loads the catalog for the given locale, runs the route's lookups and
// returns exactly one view-model. A lookup miss selects the matching *404 page;
// only infrastructure problems come back as errors.

use crate::booking::{query_params, BookingFormParser, QueryParams};
use crate::catalog::{Catalog, CatalogLoadError, CatalogSource, Hotel, Locale, PageMeta};
use crate::config::SiteConfig;
use crate::i18n::{BuiltinTranslator, Translator};
use crate::slug::{filter_all, find_first, MatchMode};
use crate::view::{
    BrowseView, CheckoutView, HotelPageView, HotelResultsView, Page404View, Results404View,
    ThankYouView, ViewModel,
};
use thiserror::Error;
use tracing::{debug, warn};

// Hotel slugs from the URL ignore case
pub const HOTEL_LINK_MODE: MatchMode = MatchMode::CaseInsensitive;
// Hotels are grouped under a city slug regardless of case
pub const HOTEL_CITY_MODE: MatchMode = MatchMode::CaseInsensitive;
// Location labels only resolve for the exact slug. This differs from
// HOTEL_CITY_MODE on purpose; do not unify without a product decision.
pub const LOCATION_LINK_MODE: MatchMode = MatchMode::Exact;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    #[error("Page metadata missing for {0}")]
    MissingPageMeta(String),

    #[error("No route matches {0}")]
    NoRoute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Index,
    AboutUs,
    Browse,
    SiteMap,
    Support,
    BrowseCity { city: String },
    Hotel { hotel_path: String },
    Book { hotel_path: String },
    ReservationConfirmed { hotel_path: String },
}

impl Route {
    // Resolves a request path in routing-table order. Static segments ignore
    // case, one trailing slash is accepted and static pages shadow hotel slugs.
    // Segments are taken as given; percent-decoding is the router's job.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.strip_prefix('/')?;
        if path.is_empty() {
            return Some(Route::Index);
        }
        let path = path.strip_suffix('/').unwrap_or(path);

        let segments: Vec<&str> = path.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        fn is(segment: &str, name: &str) -> bool {
            segment.eq_ignore_ascii_case(name)
        }

        let route = match segments.as_slice() {
            [browse, city] if is(browse, "browse") => Route::BrowseCity {
                city: city.to_string(),
            },
            [page] if is(page, "about_us") => Route::AboutUs,
            [page] if is(page, "browse") => Route::Browse,
            [page] if is(page, "site_map") => Route::SiteMap,
            [page] if is(page, "support") => Route::Support,
            [hotel, checkout, confirmed]
                if is(checkout, "checkout") && is(confirmed, "reservation_confirmed") =>
            {
                Route::ReservationConfirmed {
                    hotel_path: hotel.to_string(),
                }
            }
            // The booking pattern has an optional trailing "k"
            [hotel, book] if is(book, "book") || is(book, "boo") => Route::Book {
                hotel_path: hotel.to_string(),
            },
            [hotel] => Route::Hotel {
                hotel_path: hotel.to_string(),
            },
            _ => return None,
        };

        Some(route)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Index => "index",
            Route::AboutUs => "about_us",
            Route::Browse => "browse",
            Route::SiteMap => "site_map",
            Route::Support => "support",
            Route::BrowseCity { .. } => "browse_city",
            Route::Hotel { .. } => "hotel",
            Route::Book { .. } => "book",
            Route::ReservationConfirmed { .. } => "reservation_confirmed",
        }
    }
}

pub struct RouteDispatcher<S, T = BuiltinTranslator> {
    source: S,
    translator: T,
    site_name: String,
}

impl<S: CatalogSource> RouteDispatcher<S, BuiltinTranslator> {
    pub fn new(source: S, config: &SiteConfig) -> Self {
        Self::with_translator(source, BuiltinTranslator::default(), config)
    }
}

impl<S: CatalogSource, T: Translator> RouteDispatcher<S, T> {
    pub fn with_translator(source: S, translator: T, config: &SiteConfig) -> Self {
        Self {
            source,
            translator,
            site_name: config.site_name.clone(),
        }
    }

    // Dispatches a raw request target such as "/paris-hotel/book?nights=2"
    pub fn dispatch_path(&self, locale: &Locale, target: &str) -> Result<ViewModel, DispatchError> {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let route = Route::parse(path).ok_or_else(|| DispatchError::NoRoute(path.to_string()))?;
        self.dispatch(locale, &route, &query_params(query))
    }

    pub fn dispatch(
        &self,
        locale: &Locale,
        route: &Route,
        query: &QueryParams,
    ) -> Result<ViewModel, DispatchError> {
        let catalog = self.source.load(locale).map_err(|e| {
            warn!(locale = %locale, route = route.name(), error = %e, "Catalog load failed");
            e
        })?;

        let view = self.render(&catalog, locale, route, query);
        match &view {
            Ok(view) if view.is_not_found() => {
                debug!(locale = %locale, route = route.name(), template = view.template(), "Lookup miss")
            }
            Ok(_) => {}
            Err(e) => warn!(locale = %locale, route = route.name(), error = %e, "Dispatch failed"),
        }
        view
    }

    // Pure part of dispatch: the same catalog, route and query always give the same view
    pub fn render(
        &self,
        catalog: &Catalog,
        locale: &Locale,
        route: &Route,
        query: &QueryParams,
    ) -> Result<ViewModel, DispatchError> {
        match route {
            Route::Index => Ok(ViewModel::Index(page_meta(catalog, "index")?.into())),
            Route::AboutUs => Ok(ViewModel::AboutUs(page_meta(catalog, "about_us")?.into())),
            Route::SiteMap => Ok(ViewModel::SiteMap(page_meta(catalog, "site_map")?.into())),
            Route::Support => Ok(ViewModel::Support(page_meta(catalog, "support")?.into())),
            Route::Browse => {
                let meta = page_meta(catalog, "browse")?;
                Ok(ViewModel::Browse(BrowseView {
                    locations: catalog.locations.clone(),
                    title_text: meta.title_text.clone(),
                    description: meta.description.clone(),
                }))
            }
            Route::BrowseCity { city } => self.browse_city(catalog, locale, city),
            Route::Hotel { hotel_path } => self.hotel_page(catalog, hotel_path),
            Route::Book { hotel_path } => book(catalog, hotel_path, query),
            Route::ReservationConfirmed { hotel_path } => reservation_confirmed(catalog, hotel_path),
        }
    }

    fn browse_city(
        &self,
        catalog: &Catalog,
        locale: &Locale,
        city: &str,
    ) -> Result<ViewModel, DispatchError> {
        let results = filter_all(&catalog.hotels, |h| h.prev_link.as_str(), city, HOTEL_CITY_MODE);
        let current_location = find_first(
            &catalog.locations,
            |l| l.link.as_str(),
            city,
            LOCATION_LINK_MODE,
        )
        .map(|l| l.txt.clone())
        .unwrap_or_default();

        if results.is_empty() {
            let meta = page_meta(catalog, "results404")?;
            return Ok(ViewModel::Results404(Results404View {
                locations: catalog.locations.clone(),
                city: city.to_string(),
                results: 0,
                title_text: meta.title_text.clone(),
                description: meta.description.clone(),
            }));
        }

        let meta = page_meta(catalog, "browse")?;
        Ok(ViewModel::HotelResults(HotelResultsView {
            hotels: results.into_iter().cloned().collect(),
            locations: catalog.locations.clone(),
            description: self
                .translator
                .browse_city_description(locale, &current_location),
            city: current_location,
            title_text: meta.title_text.clone(),
        }))
    }

    fn hotel_page(&self, catalog: &Catalog, hotel_path: &str) -> Result<ViewModel, DispatchError> {
        match find_hotel(catalog, hotel_path) {
            Some(hotel) => Ok(ViewModel::HotelPage(HotelPageView {
                title_text: format!("{} | {}", hotel.name, self.site_name),
                description: hotel.description1.clone(),
                hotel: hotel.clone(),
                locations: catalog.locations.clone(),
            })),
            None => {
                let meta = page_meta(catalog, "page404")?;
                Ok(ViewModel::Page404(Page404View {
                    locations: catalog.locations.clone(),
                    title_text: meta.title_text.clone(),
                    description: meta.description.clone(),
                }))
            }
        }
    }
}

fn page_meta<'a>(catalog: &'a Catalog, page: &str) -> Result<&'a PageMeta, DispatchError> {
    catalog
        .meta
        .get(page)
        .ok_or_else(|| DispatchError::MissingPageMeta(page.to_string()))
}

fn find_hotel<'a>(catalog: &'a Catalog, hotel_path: &str) -> Option<&'a Hotel> {
    find_first(&catalog.hotels, |h| h.link.as_str(), hotel_path, HOTEL_LINK_MODE)
}

fn checkout_not_found(catalog: &Catalog) -> Result<ViewModel, DispatchError> {
    Ok(ViewModel::Checkout404(page_meta(catalog, "checkout404")?.into()))
}

fn book(catalog: &Catalog, hotel_path: &str, query: &QueryParams) -> Result<ViewModel, DispatchError> {
    let Some(hotel) = find_hotel(catalog, hotel_path) else {
        return checkout_not_found(catalog);
    };

    let meta = page_meta(catalog, "checkout")?;
    Ok(ViewModel::Checkout(CheckoutView {
        hotel: hotel.clone(),
        title_text: meta.title_text.clone(),
        description: meta.description.clone(),
        form_data: BookingFormParser::parse(query),
    }))
}

fn reservation_confirmed(catalog: &Catalog, hotel_path: &str) -> Result<ViewModel, DispatchError> {
    let Some(hotel) = find_hotel(catalog, hotel_path) else {
        return checkout_not_found(catalog);
    };

    let meta = page_meta(catalog, "thank_you")?;
    Ok(ViewModel::ThankYou(ThankYouView {
        hotel: hotel.clone(),
        title_text: meta.title_text.clone(),
        description: meta.description.clone(),
    }))
}
