//! Customer profile and the closed categorical fields of the training data

use crate::error::ChurnError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer gender as encoded at training time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Integer code used when the model was fit
    pub fn code(self) -> i64 {
        match self {
            Gender::Female => 0,
            Gender::Male => 1,
        }
    }

    /// Display strings in menu order
    pub const CHOICES: [&'static str; 2] = ["Female", "Male"];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl FromStr for Gender {
    type Err = ChurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Female" => Ok(Gender::Female),
            "Male" => Ok(Gender::Male),
            other => Err(ChurnError::UnknownCategory {
                field: "gender",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internet service tier (0 = DSL, 1 = Fiber optic, 2 = No service)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl InternetService {
    pub fn code(self) -> i64 {
        match self {
            InternetService::Dsl => 0,
            InternetService::FiberOptic => 1,
            InternetService::No => 2,
        }
    }

    pub const CHOICES: [&'static str; 3] = ["DSL", "Fiber optic", "No"];

    pub fn as_str(self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::No => "No",
        }
    }
}

impl FromStr for InternetService {
    type Err = ChurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DSL" => Ok(InternetService::Dsl),
            "Fiber optic" => Ok(InternetService::FiberOptic),
            "No" => Ok(InternetService::No),
            other => Err(ChurnError::UnknownCategory {
                field: "InternetService",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for InternetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract term (0 = month-to-month, 1 = one year, 2 = two year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Contract {
    pub fn code(self) -> i64 {
        match self {
            Contract::MonthToMonth => 0,
            Contract::OneYear => 1,
            Contract::TwoYear => 2,
        }
    }

    pub const CHOICES: [&'static str; 3] = ["Month-to-month", "One year", "Two year"];

    pub fn as_str(self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }
}

impl FromStr for Contract {
    type Err = ChurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Month-to-month" => Ok(Contract::MonthToMonth),
            "One year" => Ok(Contract::OneYear),
            "Two year" => Ok(Contract::TwoYear),
            other => Err(ChurnError::UnknownCategory {
                field: "Contract",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One customer as collected by the form, before encoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub gender: Gender,

    /// Tenure in months (0-72)
    pub tenure_months: u32,

    /// Current monthly charges (0.0-200.0)
    pub monthly_charges: f64,

    /// Lifetime total charges (0.0-10000.0)
    pub total_charges: f64,

    pub internet_service: InternetService,

    pub contract: Contract,
}

impl CustomerProfile {
    /// The form's default answers, matching the original widget defaults
    pub fn example() -> Self {
        Self {
            gender: Gender::Female,
            tenure_months: 12,
            monthly_charges: 70.0,
            total_charges: 1000.0,
            internet_service: InternetService::Dsl,
            contract: Contract::MonthToMonth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_codes() {
        assert_eq!(Gender::Female.code(), 0);
        assert_eq!(Gender::Male.code(), 1);
        assert_eq!(InternetService::Dsl.code(), 0);
        assert_eq!(InternetService::FiberOptic.code(), 1);
        assert_eq!(InternetService::No.code(), 2);
        assert_eq!(Contract::MonthToMonth.code(), 0);
        assert_eq!(Contract::OneYear.code(), 1);
        assert_eq!(Contract::TwoYear.code(), 2);
    }

    #[test]
    fn test_parse_exact_training_strings() {
        assert_eq!("Fiber optic".parse::<InternetService>().unwrap().code(), 1);
        assert_eq!("Two year".parse::<Contract>().unwrap().code(), 2);
        assert_eq!("Male".parse::<Gender>().unwrap().code(), 1);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "Satellite".parse::<InternetService>().unwrap_err();
        match err {
            ChurnError::UnknownCategory { field, value } => {
                assert_eq!(field, "InternetService");
                assert_eq!(value, "Satellite");
            }
            other => panic!("expected UnknownCategory, got {other:?}"),
        }

        assert!("female".parse::<Gender>().is_err()); // case-sensitive
        assert!("Month to month".parse::<Contract>().is_err());
    }

    #[test]
    fn test_profile_serialization() {
        let profile = CustomerProfile::example();
        let json = serde_json::to_string(&profile).unwrap();
        let back: CustomerProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(back.gender, profile.gender);
        assert_eq!(back.tenure_months, profile.tenure_months);
        assert_eq!(back.contract, profile.contract);
    }
}
