use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mason_core::{required_text, DomainError, DomainResult, Entity, OrderId};

/// Fixed label sets stored as text. Each variant's label is its name.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident, $what:literal, [$($variant:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $(stringify!($variant) => Ok($name::$variant),)+
                    other => Err(DomainError::validation(format!(
                        "unknown {}: {other:?}",
                        $what
                    ))),
                }
            }
        }
    };
}

labelled_enum!(
    /// Kind of monument being made.
    MonumentType,
    "monument type",
    [Headstone, Plaque, Other]
);

labelled_enum!(
    /// Stone the monument is cut from.
    Material,
    "material",
    [Granite, Marble, Limestone]
);

labelled_enum!(
    /// Order status lifecycle.
    ///
    /// Orders move strictly forward one stage at a time:
    /// `Inquiry -> Design -> Production -> Completed`. `Completed` is terminal.
    OrderStatus,
    "order status",
    [Inquiry, Design, Production, Completed]
);

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Inquiry
    }
}

impl OrderStatus {
    /// The stage that follows this one, or `None` once completed.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Inquiry => Some(OrderStatus::Design),
            OrderStatus::Design => Some(OrderStatus::Production),
            OrderStatus::Production => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.next() == Some(target)
    }
}

/// A validated order that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub monument_type: MonumentType,
    pub material: Material,
    pub engraving_details: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    /// Build a new order in the `Inquiry` stage.
    ///
    /// The customer name is trimmed; blank engraving details are normalized
    /// to `None`.
    pub fn new(
        customer_name: &str,
        monument_type: MonumentType,
        material: Material,
        engraving_details: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let customer_name = required_text("customer_name", customer_name)?;

        let engraving_details = engraving_details.filter(|d| !d.trim().is_empty());

        Ok(Self {
            customer_name,
            monument_type,
            material,
            engraving_details,
            status: OrderStatus::Inquiry,
            created_at,
        })
    }
}

/// Persisted customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub monument_type: MonumentType,
    pub material: Material,
    pub engraving_details: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Attach a storage-assigned identifier to a new order.
    pub fn from_new(id: OrderId, new: NewOrder) -> Self {
        Self {
            id,
            customer_name: new.customer_name,
            monument_type: new.monument_type,
            material: new.material,
            engraving_details: new.engraving_details,
            status: new.status,
            created_at: new.created_at,
        }
    }

    /// Move the order one stage forward.
    pub fn advance(&mut self) -> DomainResult<OrderStatus> {
        let next = self.status.next().ok_or_else(|| {
            DomainError::invariant(format!("order {} is already completed", self.id))
        })?;
        self.transition_to(next)?;
        Ok(next)
    }

    /// Move the order to `target`, which must be the immediate successor of
    /// the current stage.
    pub fn transition_to(&mut self, target: OrderStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::invariant(format!(
                "order {} cannot move from {} to {}",
                self.id, self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    const KIND: &'static str = "order";

    fn id(&self) -> Self::Id {
        self.id
    }
}
