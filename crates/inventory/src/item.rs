use serde::{Deserialize, Serialize};

use mason_core::{required_text, DomainError, DomainResult, Entity, InventoryItemId};

/// A validated stock record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub material_name: String,
    pub quantity: f64,
    pub reorder_level: f64,
}

impl NewInventoryItem {
    pub fn new(material_name: &str, quantity: f64, reorder_level: f64) -> DomainResult<Self> {
        let material_name = required_text("material_name", material_name)?;
        ensure_amount("quantity", quantity)?;
        ensure_amount("reorder_level", reorder_level)?;

        Ok(Self {
            material_name,
            quantity,
            reorder_level,
        })
    }
}

/// Quantities are real numbers but must be finite and non-negative.
fn ensure_amount(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// Persisted stock record for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub material_name: String,
    pub quantity: f64,
    pub reorder_level: f64,
}

impl InventoryItem {
    pub fn from_new(id: InventoryItemId, new: NewInventoryItem) -> Self {
        Self {
            id,
            material_name: new.material_name,
            quantity: new.quantity,
            reorder_level: new.reorder_level,
        }
    }

    /// Stock has fallen strictly below the reorder level.
    ///
    /// An item sitting exactly at its level (including `0` of `0`) does not
    /// need restocking.
    pub fn needs_reorder(&self) -> bool {
        self.quantity < self.reorder_level
    }
}

impl Entity for InventoryItem {
    type Id = InventoryItemId;

    const KIND: &'static str = "inventory item";

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, reorder_level: f64) -> InventoryItem {
        let new = NewInventoryItem::new("Granite", quantity, reorder_level).unwrap();
        InventoryItem::from_new(InventoryItemId::new(1), new)
    }

    #[test]
    fn zero_quantity_and_level_are_valid() {
        let new = NewInventoryItem::new("Marble", 0.0, 0.0).unwrap();
        assert_eq!(new.quantity, 0.0);
        assert_eq!(new.reorder_level, 0.0);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let err = NewInventoryItem::new("Marble", -1.0, 0.0).unwrap_err();
        assert_eq!(err, DomainError::Validation("quantity cannot be negative".into()));
    }

    #[test]
    fn negative_reorder_level_is_rejected() {
        let err = NewInventoryItem::new("Marble", 3.0, -0.5).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("reorder_level cannot be negative".into())
        );
    }

    #[test]
    fn nan_is_rejected() {
        let err = NewInventoryItem::new("Marble", f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn empty_material_name_is_rejected() {
        let err = NewInventoryItem::new("", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn material_name_is_trimmed() {
        let new = NewInventoryItem::new("  Black granite ", 2.0, 1.0).unwrap();
        assert_eq!(new.material_name, "Black granite");
    }

    #[test]
    fn reorder_threshold_is_strict() {
        assert!(!item(0.0, 0.0).needs_reorder());
        assert!(!item(5.0, 5.0).needs_reorder());
        assert!(item(4.5, 5.0).needs_reorder());
        assert!(!item(10.0, 2.0).needs_reorder());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every non-negative finite pair is accepted unchanged.
            #[test]
            fn non_negative_amounts_are_accepted(
                quantity in 0.0f64..1.0e9,
                reorder_level in 0.0f64..1.0e9,
            ) {
                let new = NewInventoryItem::new("Limestone", quantity, reorder_level).unwrap();
                prop_assert_eq!(new.quantity, quantity);
                prop_assert_eq!(new.reorder_level, reorder_level);
            }

            /// Property: any negative quantity is rejected.
            #[test]
            fn negative_quantities_are_rejected(quantity in -1.0e9f64..-f64::EPSILON) {
                prop_assert!(NewInventoryItem::new("Limestone", quantity, 0.0).is_err());
            }
        }
    }
}
