//! Catalogue of experiences the factory draws from.
//!
//! Entries are listed in recommendation order. Each has a stable id so
//! that explanation records and selections can refer to it.

use crate::domain::{Activity, ActivityId, ActivityKind, InvalidActivityId, Location};

use super::Interest;
use super::Interest::*;

/// One experience the planner can schedule.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub cost: u64,
    pub interests: &'static [Interest],
    pub hidden_gem: bool,
    pub why_this: &'static str,
    /// (lat, lng, address)
    pub place: Option<(f64, f64, &'static str)>,
}

impl CatalogEntry {
    /// True if the entry serves any of the given interests.
    pub fn matches(&self, interests: &[Interest]) -> bool {
        self.interests.iter().any(|i| interests.contains(i))
    }

    /// Turn the entry into an activity at the given display time.
    pub fn to_activity(&self, time: &str) -> Result<Activity, InvalidActivityId> {
        let mut activity = Activity::new(
            ActivityId::parse(self.id)?,
            time,
            self.title,
            self.description,
            self.cost,
            ActivityKind::Activity,
        )
        .with_why_this(self.why_this);

        if self.hidden_gem {
            activity = activity.hidden_gem();
        }
        if let Some((lat, lng, address)) = self.place {
            activity = activity.at(Location::new(lat, lng, address));
        }
        Ok(activity)
    }
}

/// The built-in catalogue.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "beach",
        title: "Explore Calangute Beach",
        description: "Relax and enjoy water sports",
        cost: 1200,
        interests: &[Beaches, Adventure],
        hidden_gem: false,
        why_this: "Popular beach with great water sports facilities matching your adventure interests.",
        place: Some((15.2832, 73.9712, "Calangute Beach, Goa")),
    },
    CatalogEntry {
        id: "oldgoa",
        title: "Old Goa Heritage Tour",
        description: "Visit Basilica of Bom Jesus & Se Cathedral",
        cost: 800,
        interests: &[Cultural],
        hidden_gem: false,
        why_this: "Perfect match for your cultural interests, UNESCO World Heritage sites.",
        place: Some((15.5010, 73.9120, "Basilica of Bom Jesus, Goa")),
    },
    CatalogEntry {
        id: "spicefarm",
        title: "Sahakari Spice Farm Experience",
        description: "Authentic Goan spice plantation tour with traditional lunch",
        cost: 1500,
        interests: &[Food, Cultural],
        hidden_gem: true,
        why_this: "Hidden gem that combines your food and cultural interests with authentic local experience.",
        place: Some((15.3820, 74.1500, "Sahakari Spice Farm, Goa")),
    },
    CatalogEntry {
        id: "baga-nights",
        title: "Baga Beach Shacks & Nightlife",
        description: "Seafood dinner followed by live music on Tito's Lane",
        cost: 2500,
        interests: &[Nightlife, Food, Beaches],
        hidden_gem: false,
        why_this: "The liveliest evening strip in North Goa, close to your resort.",
        place: Some((15.2760, 73.9673, "Baga Beach, Goa")),
    },
    CatalogEntry {
        id: "aguada",
        title: "Aguada Fort Sunset Walk",
        description: "17th-century Portuguese fort and lighthouse over the Mandovi",
        cost: 500,
        interests: &[Cultural, Adventure],
        hidden_gem: false,
        why_this: "Best sunset viewpoint on the coast, with history on the way up.",
        place: Some((15.4909, 73.8278, "Aguada Fort, Goa")),
    },
    CatalogEntry {
        id: "mapusa",
        title: "Mapusa Friday Market",
        description: "Local produce, spices and Goan sausages",
        cost: 300,
        interests: &[Food],
        hidden_gem: true,
        why_this: "Where locals shop; a food lover's introduction to Goan ingredients.",
        place: Some((15.2832, 74.1240, "Mapusa Market, Goa")),
    },
    CatalogEntry {
        id: "anjuna-cafes",
        title: "Anjuna Flea Market & Cafe Crawl",
        description: "Wednesday flea market and clifftop cafes",
        cost: 900,
        interests: &[Food, Nightlife],
        hidden_gem: false,
        why_this: "Relaxed cafe culture that runs from afternoon into the night.",
        place: Some((15.2760, 73.9673, "Anjuna Beach, Goa")),
    },
    CatalogEntry {
        id: "mangueshi",
        title: "Mangueshi Temple Visit",
        description: "One of Goa's oldest and most revered temples",
        cost: 200,
        interests: &[Cultural, Wellness],
        hidden_gem: false,
        why_this: "A calm counterpoint to the beaches, steeped in local tradition.",
        place: Some((15.3004, 74.1402, "Mangeshi Temple, Goa")),
    },
    CatalogEntry {
        id: "mollem-trek",
        title: "Bhagwan Mahavir Sanctuary Trek",
        description: "Guided jungle trek to Dudhsagar Falls",
        cost: 2000,
        interests: &[Adventure],
        hidden_gem: true,
        why_this: "Waterfalls and wildlife most beach-bound visitors never see.",
        place: Some((15.4218, 74.1100, "Bhagwan Mahavir Sanctuary, Goa")),
    },
    CatalogEntry {
        id: "ayurveda",
        title: "Ayurvedic Spa Session",
        description: "Traditional massage and herbal therapy",
        cost: 3000,
        interests: &[Wellness],
        hidden_gem: false,
        why_this: "A restorative break matched to your wellness interest.",
        place: None,
    },
    CatalogEntry {
        id: "chorao-kayak",
        title: "Mangrove Kayaking at Chorao",
        description: "Paddle through the Salim Ali bird sanctuary",
        cost: 1800,
        interests: &[Adventure, Wellness],
        hidden_gem: true,
        why_this: "Quiet waterways and birdlife a short ferry ride from Panaji.",
        place: None,
    },
    CatalogEntry {
        id: "palolem",
        title: "Palolem Beach Day Trip",
        description: "Crescent bay in South Goa with calm swimming water",
        cost: 1600,
        interests: &[Beaches, Wellness],
        hidden_gem: false,
        why_this: "Calmer water and fewer crowds than the northern beaches.",
        place: None,
    },
];

/// Catalogue entries ordered for a traveller: entries matching their
/// interests first, then the rest, each group in catalogue order.
pub fn ranked_for(interests: &[Interest]) -> Vec<&'static CatalogEntry> {
    let (mut matching, rest): (Vec<_>, Vec<_>) =
        CATALOG.iter().partition(|e| e.matches(interests));
    matching.extend(rest);
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_valid() {
        let mut seen = HashSet::new();
        for entry in CATALOG {
            assert!(ActivityId::parse(entry.id).is_ok(), "bad id {}", entry.id);
            assert!(seen.insert(entry.id), "duplicate id {}", entry.id);
        }
    }

    #[test]
    fn ranking_puts_matches_first() {
        let ranked = ranked_for(&[Interest::Wellness]);
        let ids: Vec<&str> = ranked.iter().map(|e| e.id).collect();
        assert_eq!(&ids[..4], &["mangueshi", "ayurveda", "chorao-kayak", "palolem"]);
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(ids[4], "beach");
    }

    #[test]
    fn no_interests_keeps_catalog_order() {
        let ranked = ranked_for(&[]);
        let ids: Vec<&str> = ranked.iter().map(|e| e.id).collect();
        let expected: Vec<&str> = CATALOG.iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn to_activity_copies_fields() {
        let farm = CATALOG.iter().find(|e| e.id == "spicefarm").unwrap();
        let activity = farm.to_activity("2:00 PM").unwrap();

        assert_eq!(activity.id.as_str(), "spicefarm");
        assert_eq!(activity.time, "2:00 PM");
        assert_eq!(activity.cost, 1500);
        assert_eq!(activity.kind, ActivityKind::Activity);
        assert!(activity.hidden_gem);
        assert!(activity.why_this.is_some());
        assert_eq!(
            activity.location.unwrap().address,
            "Sahakari Spice Farm, Goa"
        );
    }
}
