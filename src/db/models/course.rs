use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewCourse {
    #[validate(length(min = 1, max = 200, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(max = 200))]
    pub description: String,
    #[validate(custom(function = validate_price))]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourse {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    #[validate(custom(function = validate_optional_price))]
    pub price: Option<Decimal>,
}

// Price sign is checked here and only here; billing downstream trusts it.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

fn validate_optional_price(price: &Decimal) -> Result<(), ValidationError> {
    validate_price(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected_at_creation() {
        let course = NewCourse {
            name: "Python Basics".to_string(),
            description: "Learn Python fundamentals".to_string(),
            price: Decimal::new(-9999, 2),
        };
        assert!(course.validate().is_err());
    }

    #[test]
    fn zero_price_is_allowed() {
        let course = NewCourse {
            name: "Intro Session".to_string(),
            description: "Free taster".to_string(),
            price: Decimal::ZERO,
        };
        assert!(course.validate().is_ok());
    }
}
