use super::entity::{ReturnItem, ReturnRecord};
use crate::domain::{DomainError, DomainResult};

/// Validates the engine input.
/// The condition is valid by construction; the remaining checks cover the
/// fields the type system cannot.
pub fn validate_return_item(item: &ReturnItem) -> DomainResult<()> {
    validate_product_name(&item.product_name)?;
    validate_estimated_value(item.estimated_value)?;
    Ok(())
}

/// Validates a persisted return and the consistency of its decision
pub fn validate_return_record(record: &ReturnRecord) -> DomainResult<()> {
    validate_return_item(&record.item)?;

    if let Some(decision) = &record.decision {
        decision.check_resale_invariant()?;
    }

    if record.manual_override.is_some() && record.decision.is_none() {
        return Err(DomainError::InvalidInput(
            "Manual override recorded without an engine decision".to_string(),
        ));
    }

    if record.created_at > record.updated_at {
        return Err(DomainError::InvalidInput(format!(
            "Created timestamp {} is after updated timestamp {}",
            record.created_at, record.updated_at
        )));
    }

    Ok(())
}

fn validate_product_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput(
            "Product name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Must be a finite, non-negative amount
fn validate_estimated_value(value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::InvalidInput(format!(
            "Estimated value must be a finite number, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "Estimated value cannot be negative, got {}",
            value
        )));
    }
    Ok(())
}

/// Invariants that must hold for returns:
///
/// 1. Product name is never blank
/// 2. Estimated value is finite and >= 0
/// 3. A stored decision carries a resale recommendation iff its disposition
///    is marketplace resale
/// 4. An override only exists on top of an engine decision
/// 5. Created timestamp never exceeds updated timestamp

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::return_item::{
        ItemCategory, ItemCondition, ReturnItemInput, ReturnReason,
    };

    fn item() -> ReturnItem {
        ReturnItem::new(
            "Linen shirt",
            ItemCategory::Apparel,
            ReturnReason::WrongSize,
            ItemCondition::New,
        )
    }

    #[test]
    fn test_valid_item() {
        assert!(validate_return_item(&item()).is_ok());
    }

    #[test]
    fn test_blank_product_name_fails() {
        let mut blank = item();
        blank.product_name = "   ".to_string();
        assert!(matches!(
            validate_return_item(&blank),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_negative_value_fails() {
        let negative = item().with_estimated_value(-0.01);
        assert!(matches!(
            validate_return_item(&negative),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nan_value_fails() {
        let nan = item().with_estimated_value(f64::NAN);
        assert!(validate_return_item(&nan).is_err());
    }

    #[test]
    fn test_zero_value_is_allowed() {
        assert!(validate_return_item(&item().with_estimated_value(0.0)).is_ok());
    }

    #[test]
    fn test_unknown_condition_is_invalid_input() {
        let input = ReturnItemInput {
            product_name: "Watch".to_string(),
            condition: "mint".to_string(),
            ..Default::default()
        };
        let result = ReturnItem::try_from(input);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_input_conversion_defaults_value_to_zero() {
        let input = ReturnItemInput {
            product_name: "Watch".to_string(),
            category: "Luxury Watches".to_string(),
            return_reason: "Changed mind".to_string(),
            condition: " Excellent ".to_string(),
            notes: None,
            estimated_value: None,
        };
        let item = ReturnItem::try_from(input).unwrap();
        assert_eq!(item.condition, ItemCondition::Excellent);
        assert_eq!(item.category, ItemCategory::Other("Luxury Watches".to_string()));
        assert!(item.category.is_high_value());
        assert_eq!(item.return_reason, ReturnReason::ChangedMind);
        assert_eq!(item.estimated_value, 0.0);
    }

    #[test]
    fn test_record_without_decision_is_valid() {
        let record = ReturnRecord::new(item(), Some("ORD-1".to_string()), None);
        assert!(validate_return_record(&record).is_ok());
    }
}
