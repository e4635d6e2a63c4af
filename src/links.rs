//! Listing search links
//!
//! Pure string construction: nothing here checks that a target page exists.

use crate::outcome::QueryOutcome;
use serde::Serialize;

const FORECLOSURE_SEARCH: &str = "https://mls.foreclosure.com/listing/search.html?q=";
const RENTAL_SEARCH: &str = "https://www.apartments.com/";

/// Which apartments.com listing set the rental link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalTarget {
    AllRentals,
    HousesOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLinks {
    pub foreclosure_url: String,
    pub rental_url: String,
}

impl ListingLinks {
    pub fn foreclosure_anchor(&self) -> String {
        anchor(&self.foreclosure_url, "Foreclosures")
    }

    pub fn rental_anchor(&self) -> String {
        anchor(&self.rental_url, "Rentals")
    }
}

/// Foreclosure and rental search URLs for one county.
pub fn links(county_name: &str, state_postal_code: &str) -> ListingLinks {
    links_for(county_name, state_postal_code, RentalTarget::AllRentals)
}

pub fn links_for(county_name: &str, state_postal_code: &str, target: RentalTarget) -> ListingLinks {
    ListingLinks {
        foreclosure_url: foreclosure_url(county_name, state_postal_code),
        rental_url: rental_url(county_name, state_postal_code, target),
    }
}

/// Links for a county picked in the presentation layer. A blank county or state is `Empty`.
pub fn selected_county_links(county_name: &str, state_postal_code: &str) -> QueryOutcome<ListingLinks> {
    if county_name.trim().is_empty() || state_postal_code.trim().is_empty() {
        return QueryOutcome::Empty;
    }
    QueryOutcome::Found(links(county_name, state_postal_code))
}

fn foreclosure_url(county_name: &str, state_postal_code: &str) -> String {
    format!(
        "{}{}%20county,%20{}",
        FORECLOSURE_SEARCH,
        county_name.replace(' ', "%20"),
        state_postal_code
    )
}

fn rental_url(county_name: &str, state_postal_code: &str, target: RentalTarget) -> String {
    let slug = format!(
        "{}-{}",
        county_name.replace(' ', "-").to_lowercase(),
        state_postal_code.to_lowercase()
    );
    match target {
        RentalTarget::AllRentals => format!("{}{}/", RENTAL_SEARCH, slug),
        RentalTarget::HousesOnly => format!("{}houses/{}/", RENTAL_SEARCH, slug),
    }
}

fn anchor(href: &str, label: &str) -> String {
    format!("<a target=\"_blank\" href=\"{}\">{}</a>", href, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_for_multi_word_county() {
        let links = links("Santa Clara", "CA");
        assert!(links.foreclosure_url.contains("Santa%20Clara%20county,%20CA"));
        assert!(links.rental_url.contains("santa-clara-ca"));
        assert_eq!(links.rental_url, "https://www.apartments.com/santa-clara-ca/");
    }

    #[test]
    fn test_every_space_is_encoded() {
        let links = links("Prince George's County Area", "MD");
        assert_eq!(
            links.foreclosure_url,
            "https://mls.foreclosure.com/listing/search.html?q=Prince%20George's%20County%20Area%20county,%20MD"
        );
        assert_eq!(
            links.rental_url,
            "https://www.apartments.com/prince-george's-county-area-md/"
        );
    }

    #[test]
    fn test_houses_target() {
        let links = links_for("St. Louis", "MO", RentalTarget::HousesOnly);
        assert_eq!(links.rental_url, "https://www.apartments.com/houses/st.-louis-mo/");
    }

    #[test]
    fn test_anchors() {
        let links = links("Jefferson", "AL");
        assert_eq!(
            links.rental_anchor(),
            "<a target=\"_blank\" href=\"https://www.apartments.com/jefferson-al/\">Rentals</a>"
        );
        assert!(links.foreclosure_anchor().ends_with(">Foreclosures</a>"));
    }

    #[test]
    fn test_selected_county_links() {
        assert!(selected_county_links("Jefferson", "AL").is_found());
        assert_eq!(selected_county_links("  ", "AL"), QueryOutcome::Empty);
    }
}
