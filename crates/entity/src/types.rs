//! Shared JSON value objects stored in entity columns.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Postal address, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct Address {
    #[serde(default)]
    pub name:     Option<String>,
    #[serde(default)]
    pub street:   Option<String>,
    #[serde(default)]
    pub city:     Option<String>,
    #[serde(default)]
    pub state:    Option<String>,
    #[serde(default)]
    pub country:  Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub phone:    Option<String>,
}

/// Uploaded image reference: the upload mechanism is an external
/// collaborator, only the metadata tuple is stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageRef {
    pub url:       String,
    #[serde(default)]
    pub alt:       Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
}

/// List of image references, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct ImageList(pub Vec<ImageRef>);

/// Free-form string list (tags, materials, skills), stored as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct StringList(pub Vec<String>);

/// User profile details, stored as a JSON column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub avatar:              Option<String>,
    #[serde(default)]
    pub bio:                 Option<String>,
    #[serde(default)]
    pub location:            Option<String>,
    #[serde(default)]
    pub phone:               Option<String>,
    #[serde(default)]
    pub skills:              Vec<String>,
    #[serde(default)]
    pub disabilities:        Vec<String>,
    #[serde(default)]
    pub accessibility_needs: Option<AccessibilityNeeds>,
}

/// Accessibility requirements declared on a user profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccessibilityNeeds {
    #[serde(default)]
    pub visual:    bool,
    #[serde(default)]
    pub motor:     bool,
    #[serde(default)]
    pub cognitive: bool,
    #[serde(default)]
    pub hearing:   bool,
}

/// Accessibility aids attached to a product listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct ProductAccessibility {
    #[serde(default)]
    pub audio_description: Option<String>,
    #[serde(default)]
    pub alt_text:          Option<String>,
    #[serde(default)]
    pub braille_available: bool,
}

/// Physical dimensions of a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct Dimensions {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width:  Option<f64>,
    #[serde(default)]
    pub depth:  Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Shipment tracking details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, Default)]
pub struct Tracking {
    #[serde(default)]
    pub carrier:         Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub tracking_url:    Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_round_trip() {
        let address = Address {
            street: Some("12 Rue des Artisans".to_string()),
            city: Some("Marrakesh".to_string()),
            country: Some("Morocco".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&address).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_image_list_defaults_missing_fields() {
        let json = r#"[{"url": "https://cdn.example.com/p1.jpg"}]"#;
        let images: ImageList = serde_json::from_str(json).unwrap();
        assert_eq!(images.0.len(), 1);
        assert!(images.0[0].alt.is_none());
    }

    #[test]
    fn test_profile_partial_json() {
        let json = r#"{"bio": "Weaver from Atlas mountains", "skills": ["weaving"]}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.skills, vec!["weaving"]);
        assert!(profile.accessibility_needs.is_none());
    }
}
