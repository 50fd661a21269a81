//! Order commands.

use common::ValidationError;

use super::{CustomerId, OrderItem};

/// Command to create a new order.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    /// The customer placing the order.
    pub customer_id: CustomerId,

    /// Line items, in request order.
    pub items: Vec<OrderItem>,
}

impl CreateOrder {
    /// Creates a new CreateOrder command.
    pub fn new(customer_id: impl Into<CustomerId>, items: Vec<OrderItem>) -> Self {
        Self {
            customer_id: customer_id.into(),
            items,
        }
    }

    /// Checks the order invariants, returning every violation found.
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.customer_id.is_blank() {
            errors.push(ValidationError::new("customerId", "must not be blank"));
        }
        if self.items.is_empty() {
            errors.push(ValidationError::new("items", "must not be empty"));
        }

        for (i, item) in self.items.iter().enumerate() {
            if item.product_id.is_blank() {
                errors.push(ValidationError::new(
                    format!("items[{i}].productId"),
                    "must not be blank",
                ));
            }
            if item.quantity == 0 {
                errors.push(ValidationError::new(
                    format!("items[{i}].quantity"),
                    "must be greater than 0",
                ));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                errors.push(ValidationError::new(
                    format!("items[{i}].price"),
                    "must not be negative",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_command_has_no_violations() {
        let cmd = CreateOrder::new("c1", vec![OrderItem::new("p1", 2, 10.0)]);
        assert!(cmd.violations().is_empty());
    }

    #[test]
    fn test_blank_customer_and_no_items() {
        let cmd = CreateOrder::new("  ", vec![]);
        let fields: Vec<_> = cmd.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["customerId", "items"]);
    }

    #[test]
    fn test_item_violations_carry_index() {
        let cmd = CreateOrder::new(
            "c1",
            vec![OrderItem::new("p1", 1, 1.0), OrderItem::new("", 0, -1.0)],
        );
        let fields: Vec<_> = cmd.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec!["items[1].productId", "items[1].quantity", "items[1].price"]
        );
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let cmd = CreateOrder::new("c1", vec![OrderItem::new("free-sample", 1, 0.0)]);
        assert!(cmd.violations().is_empty());
    }
}
