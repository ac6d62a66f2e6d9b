//! Listing filter normalization and SQL composition
//!
//! The storefront passes its filters straight through as query parameters.
//! Absent, empty, and the literal string "undefined" (a stringified JS
//! `undefined`) all mean "no filter" for that dimension.

use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};

/// Raw query parameters as they arrive on `GET /api/properties`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQueryParams {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub featured: Option<String>,
    pub active: Option<String>,
    pub transaction_type: Option<String>,
}

/// Normalized listing filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Case-insensitive substring over title, description, and city
    pub search: Option<String>,
    /// Property type name, exact
    pub property_type: Option<String>,
    /// City, exact
    pub city: Option<String>,
    /// Location (area) name, exact
    pub area: Option<String>,
    pub featured: Option<bool>,
    pub active: Option<bool>,
    /// Transaction type wire value, exact
    pub transaction_type: Option<String>,
}

impl PropertyFilter {
    /// Append this filter's WHERE clauses to a query that already has a
    /// WHERE section open. Assumes the listing query aliases:
    /// `p` = properties, `t` = property_types, `l` = locations.
    pub fn apply(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if let Some(search) = &self.search {
            let pattern = format!("%{search}%");
            qb.push(" AND (p.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.city ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(name) = &self.property_type {
            qb.push(" AND t.name = ").push_bind(name.clone());
        }
        if let Some(city) = &self.city {
            qb.push(" AND p.city = ").push_bind(city.clone());
        }
        if let Some(area) = &self.area {
            qb.push(" AND l.name = ").push_bind(area.clone());
        }
        if let Some(featured) = self.featured {
            qb.push(" AND p.is_featured = ").push_bind(featured);
        }
        if let Some(active) = self.active {
            qb.push(" AND p.is_active = ").push_bind(active);
        }
        if let Some(tt) = &self.transaction_type {
            qb.push(" AND p.transaction_type = ").push_bind(tt.clone());
        }
    }
}

impl From<PropertyQueryParams> for PropertyFilter {
    fn from(params: PropertyQueryParams) -> Self {
        Self {
            search: normalize(params.search),
            property_type: normalize(params.property_type),
            city: normalize(params.city),
            area: normalize(params.area),
            featured: normalize(params.featured).and_then(parse_flag),
            active: normalize(params.active).and_then(parse_flag),
            transaction_type: normalize(params.transaction_type),
        }
    }
}

/// Collapse absent, blank, and stringified-undefined values to None.
fn normalize(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Boolean flags arrive as strings; anything but true/false is no filter.
fn parse_flag(value: String) -> Option<bool> {
    match value.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(featured: &str, transaction_type: &str) -> PropertyQueryParams {
        PropertyQueryParams {
            featured: Some(featured.to_string()),
            transaction_type: Some(transaction_type.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn undefined_and_blank_mean_no_filter() {
        let filter = PropertyFilter::from(params("undefined", ""));
        assert_eq!(filter, PropertyFilter::default());

        let filter = PropertyFilter::from(params("  ", "undefined"));
        assert_eq!(filter, PropertyFilter::default());
    }

    #[test]
    fn flags_parse_strictly() {
        assert_eq!(PropertyFilter::from(params("true", "Rent")).featured, Some(true));
        assert_eq!(PropertyFilter::from(params("false", "Rent")).featured, Some(false));
        assert_eq!(PropertyFilter::from(params("yes", "Rent")).featured, None);
    }

    #[test]
    fn values_are_trimmed() {
        let params = PropertyQueryParams {
            city: Some(" Hyderabad ".into()),
            ..Default::default()
        };
        assert_eq!(PropertyFilter::from(params).city.as_deref(), Some("Hyderabad"));
    }

    #[test]
    fn empty_filter_adds_no_clauses() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        PropertyFilter::default().apply(&mut qb);
        assert_eq!(qb.sql(), "SELECT 1 WHERE 1=1");
    }

    #[test]
    fn clauses_and_placeholders_line_up() {
        let filter = PropertyFilter {
            search: Some("lake".into()),
            property_type: Some("Apartment".into()),
            city: Some("Hyderabad".into()),
            area: Some("Madhapur".into()),
            featured: Some(true),
            active: Some(true),
            transaction_type: Some("Rent".into()),
        };

        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        filter.apply(&mut qb);
        let sql = qb.sql();

        assert!(sql.contains("p.title ILIKE $1"));
        assert!(sql.contains("p.description ILIKE $2"));
        assert!(sql.contains("p.city ILIKE $3"));
        assert!(sql.contains("t.name = $4"));
        assert!(sql.contains("p.city = $5"));
        assert!(sql.contains("l.name = $6"));
        assert!(sql.contains("p.is_featured = $7"));
        assert!(sql.contains("p.is_active = $8"));
        assert!(sql.contains("p.transaction_type = $9"));
    }

    #[test]
    fn single_filter_gets_first_placeholder() {
        let filter = PropertyFilter {
            transaction_type: Some("Rent".into()),
            ..Default::default()
        };
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1 WHERE 1=1");
        filter.apply(&mut qb);
        assert!(qb.sql().ends_with("AND p.transaction_type = $1"));
    }
}
