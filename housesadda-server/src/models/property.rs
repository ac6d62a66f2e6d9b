//! Listing title validation and the validated write payload

use serde_json::Value;

use super::{TransactionType, ValidationError};

/// Maximum length for listing titles
const MAX_TITLE_LEN: usize = 200;

/// Validated listing title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTitle(String);

impl PropertyTitle {
    /// Trim and validate a listing title.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if trimmed.len() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PropertyTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated listing payload, ready for the repository.
///
/// Type and location are resolved separately: the handlers look the names up
/// against the controlled vocabularies before any insert happens.
#[derive(Debug, Clone)]
pub struct PropertyDraft {
    pub title: PropertyTitle,
    pub city: String,
    pub price: i64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub sqft: i32,
    pub description: Option<String>,
    pub transaction_type: TransactionType,
    pub is_featured: bool,
    pub is_active: bool,
    pub amenities: Value,
    pub highlights: Value,
    pub brochure_url: Option<String>,
    pub map_url: Option<String>,
    pub video_url: Option<String>,
}

impl PropertyDraft {
    /// Validate the raw field values of a create/update request.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        city: &str,
        price: i64,
        bedrooms: i32,
        bathrooms: i32,
        sqft: i32,
        description: Option<String>,
        transaction_type: &str,
        is_featured: bool,
        is_active: bool,
        amenities: Vec<String>,
        highlights: Vec<String>,
        brochure_url: Option<String>,
        map_url: Option<String>,
        video_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = PropertyTitle::new(title)?;

        let city = city.trim();
        if city.is_empty() {
            return Err(ValidationError::Empty { field: "city" });
        }

        if price < 0 {
            return Err(ValidationError::Negative { field: "price" });
        }
        if bedrooms < 0 {
            return Err(ValidationError::Negative { field: "bedrooms" });
        }
        if bathrooms < 0 {
            return Err(ValidationError::Negative { field: "bathrooms" });
        }
        if sqft < 0 {
            return Err(ValidationError::Negative { field: "sqft" });
        }

        let transaction_type = transaction_type.parse::<TransactionType>()?;

        Ok(Self {
            title,
            city: city.to_owned(),
            price,
            bedrooms,
            bathrooms,
            sqft,
            description: description.filter(|d| !d.trim().is_empty()),
            transaction_type,
            is_featured,
            is_active,
            amenities: Value::from(amenities),
            highlights: Value::from(highlights),
            brochure_url: brochure_url.filter(|u| !u.trim().is_empty()),
            map_url: map_url.filter(|u| !u.trim().is_empty()),
            video_url: video_url.filter(|u| !u.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(price: i64, transaction_type: &str) -> Result<PropertyDraft, ValidationError> {
        PropertyDraft::new(
            "3BHK in Madhapur",
            "Hyderabad",
            price,
            3,
            2,
            1650,
            Some("Spacious flat".into()),
            transaction_type,
            false,
            true,
            vec!["Lift".into(), "Parking".into()],
            vec![],
            None,
            None,
            None,
        )
    }

    #[test]
    fn valid_draft() {
        let d = draft(8_500_000, "Sale").unwrap();
        assert_eq!(d.title.as_str(), "3BHK in Madhapur");
        assert_eq!(d.transaction_type, TransactionType::Sale);
        assert_eq!(d.amenities, serde_json::json!(["Lift", "Parking"]));
    }

    #[test]
    fn title_is_trimmed() {
        let title = PropertyTitle::new("  Villa  ").unwrap();
        assert_eq!(title.as_str(), "Villa");
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(matches!(
            PropertyTitle::new("   ").unwrap_err(),
            ValidationError::Empty { field: "title" }
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(matches!(
            draft(-1, "Sale").unwrap_err(),
            ValidationError::Negative { field: "price" }
        ));
    }

    #[test]
    fn unknown_transaction_type_is_rejected() {
        assert!(matches!(
            draft(100, "Barter").unwrap_err(),
            ValidationError::InvalidVariant { .. }
        ));
    }

    #[test]
    fn blank_optionals_become_none() {
        let d = PropertyDraft::new(
            "Plot", "Pune", 0, 0, 0, 0,
            Some("  ".into()),
            "Rent", false, true,
            vec![], vec![],
            Some(String::new()), None, None,
        )
        .unwrap();
        assert!(d.description.is_none());
        assert!(d.brochure_url.is_none());
    }
}
