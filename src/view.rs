// View-models handed to the page renderer, one struct per page.
// Field names serialize to the camelCase keys the templates read.

use crate::booking::BookingDraft;
use crate::catalog::{Hotel, Location, PageMeta};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub title_text: String,
    pub description: String,
}

impl From<&PageMeta> for PageView {
    fn from(meta: &PageMeta) -> Self {
        Self {
            title_text: meta.title_text.clone(),
            description: meta.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseView {
    pub locations: Vec<Location>,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResultsView {
    pub hotels: Vec<Hotel>,
    pub locations: Vec<Location>,
    // Display label of the resolved location, empty when none matched
    pub city: String,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Results404View {
    pub locations: Vec<Location>,
    // The city segment exactly as requested
    pub city: String,
    pub results: usize,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPageView {
    pub hotel: Hotel,
    pub locations: Vec<Location>,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page404View {
    pub locations: Vec<Location>,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub hotel: Hotel,
    pub title_text: String,
    pub description: String,
    pub form_data: BookingDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouView {
    pub hotel: Hotel,
    pub title_text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewModel {
    Index(PageView),
    AboutUs(PageView),
    Browse(BrowseView),
    SiteMap(PageView),
    Support(PageView),
    HotelResults(HotelResultsView),
    Results404(Results404View),
    HotelPage(HotelPageView),
    Page404(Page404View),
    Checkout(CheckoutView),
    Checkout404(PageView),
    ThankYou(ThankYouView),
}

impl ViewModel {
    pub fn template(&self) -> &'static str {
        match self {
            ViewModel::Index(_) => "pages/index",
            ViewModel::AboutUs(_) => "pages/about_us",
            ViewModel::Browse(_) => "pages/browse",
            ViewModel::SiteMap(_) => "pages/site_map",
            ViewModel::Support(_) => "pages/support",
            ViewModel::HotelResults(_) => "pages/hotel_results",
            ViewModel::Results404(_) => "pages/results404",
            ViewModel::HotelPage(_) => "pages/hotel_page",
            ViewModel::Page404(_) => "pages/page404",
            ViewModel::Checkout(_) => "pages/checkout",
            ViewModel::Checkout404(_) => "pages/checkout404",
            ViewModel::ThankYou(_) => "pages/thank_you",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ViewModel::Results404(_) | ViewModel::Page404(_) | ViewModel::Checkout404(_)
        )
    }

    pub fn title_text(&self) -> &str {
        match self {
            ViewModel::Index(v)
            | ViewModel::AboutUs(v)
            | ViewModel::SiteMap(v)
            | ViewModel::Support(v)
            | ViewModel::Checkout404(v) => &v.title_text,
            ViewModel::Browse(v) => &v.title_text,
            ViewModel::HotelResults(v) => &v.title_text,
            ViewModel::Results404(v) => &v.title_text,
            ViewModel::HotelPage(v) => &v.title_text,
            ViewModel::Page404(v) => &v.title_text,
            ViewModel::Checkout(v) => &v.title_text,
            ViewModel::ThankYou(v) => &v.title_text,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ViewModel::Index(v)
            | ViewModel::AboutUs(v)
            | ViewModel::SiteMap(v)
            | ViewModel::Support(v)
            | ViewModel::Checkout404(v) => &v.description,
            ViewModel::Browse(v) => &v.description,
            ViewModel::HotelResults(v) => &v.description,
            ViewModel::Results404(v) => &v.description,
            ViewModel::HotelPage(v) => &v.description,
            ViewModel::Page404(v) => &v.description,
            ViewModel::Checkout(v) => &v.description,
            ViewModel::ThankYou(v) => &v.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::Nights;

    fn hotel() -> Hotel {
        Hotel {
            link: "paris-hotel".to_string(),
            prev_link: "Paris".to_string(),
            name: "Grand Paris".to_string(),
            description1: "Nice".to_string(),
            details: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_not_found_pages() {
        let page = PageView {
            title_text: "t".to_string(),
            description: "d".to_string(),
        };
        assert!(ViewModel::Checkout404(page.clone()).is_not_found());
        assert!(!ViewModel::Index(page).is_not_found());
        assert!(ViewModel::Page404(Page404View {
            locations: vec![],
            title_text: "t".to_string(),
            description: "d".to_string(),
        })
        .is_not_found());
    }

    #[test]
    fn test_checkout_serializes_with_template_keys() {
        let view = ViewModel::Checkout(CheckoutView {
            hotel: hotel(),
            title_text: "Checkout".to_string(),
            description: "Book your stay".to_string(),
            form_data: BookingDraft {
                first_name: Some("Ada".to_string()),
                last_name: None,
                email: None,
                nights: Nights::Count(2),
            },
        });

        assert_eq!(view.template(), "pages/checkout");
        assert_eq!(
            serde_json::to_value(&view).unwrap(),
            serde_json::json!({
                "hotel": {
                    "link": "paris-hotel",
                    "prevLink": "Paris",
                    "name": "Grand Paris",
                    "description1": "Nice"
                },
                "titleText": "Checkout",
                "description": "Book your stay",
                "formData": {
                    "firstName": "Ada",
                    "lastName": null,
                    "email": null,
                    "nights": 2
                }
            })
        );
    }

    #[test]
    fn test_results404_serializes_zero_results() {
        let view = ViewModel::Results404(Results404View {
            locations: vec![Location {
                link: "Paris".to_string(),
                txt: "Paris, France".to_string(),
            }],
            city: "lisbon".to_string(),
            results: 0,
            title_text: "No Results".to_string(),
            description: "No hotels here".to_string(),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["results"], 0);
        assert_eq!(json["city"], "lisbon");
        assert_eq!(json["locations"][0]["txt"], "Paris, France");
        assert_eq!(view.title_text(), "No Results");
        assert_eq!(view.description(), "No hotels here");
    }
}
