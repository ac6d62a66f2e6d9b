//! Transaction type vocabulary
//!
//! The enumerated intent label attached to every listing. Stored as text in
//! the database, matched exactly by the listing filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Intent label attached to a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Sale,
    Rent,
    Lease,
    #[serde(rename = "PG")]
    Pg,
}

impl TransactionType {
    /// Wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Rent => "Rent",
            Self::Lease => "Lease",
            Self::Pg => "PG",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sale" => Ok(Self::Sale),
            "Rent" => Ok(Self::Rent),
            "Lease" => Ok(Self::Lease),
            "PG" => Ok(Self::Pg),
            other => Err(ValidationError::InvalidVariant {
                field: "transactionType",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_variants() {
        assert_eq!("Sale".parse::<TransactionType>().unwrap(), TransactionType::Sale);
        assert_eq!("Rent".parse::<TransactionType>().unwrap(), TransactionType::Rent);
        assert_eq!("Lease".parse::<TransactionType>().unwrap(), TransactionType::Lease);
        assert_eq!("PG".parse::<TransactionType>().unwrap(), TransactionType::Pg);
    }

    #[test]
    fn rejects_unknown_and_wrong_case() {
        assert!("Swap".parse::<TransactionType>().is_err());
        assert!("rent".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&TransactionType::Pg).unwrap(), "\"PG\"");
        assert_eq!(
            serde_json::from_str::<TransactionType>("\"Lease\"").unwrap(),
            TransactionType::Lease
        );
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(TransactionType::Sale.to_string(), "Sale");
    }
}
