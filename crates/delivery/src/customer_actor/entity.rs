//! [`ActorEntity`] implementation for [`Customer`].
//!
//! The cached `membership_tier` is only ever written from [`Customer::computed_tier`], after
//! a completed order or on an explicit refresh.

use super::actions::{CustomerAction, CustomerActionResult, TierChange};
use super::error::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use resource_store::ActorEntity;
use rust_decimal::Decimal;
use tracing::info;

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), CustomerError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CustomerError::ValidationError(format!(
            "invalid email: {email}"
        ))),
    }
}

impl Customer {
    fn refresh_tier(&mut self) -> TierChange {
        let previous = self.membership_tier;
        self.membership_tier = self.computed_tier();
        let change = TierChange {
            previous,
            current: self.membership_tier,
        };
        if change.changed() {
            info!(customer = %self.id, from = %previous, to = %change.current, "Tier changed");
        }
        change
    }
}

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Action = CustomerAction;
    type ActionResult = CustomerActionResult;
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        validate_email(&params.email)?;
        Ok(Self::new(id, params.name, params.email))
    }

    /// Validates every provided field before applying any of them.
    async fn on_update(&mut self, update: CustomerUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(address) = update.selected_address {
            self.selected_address = address;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CustomerAction,
        _ctx: &(),
    ) -> Result<CustomerActionResult, Self::Error> {
        match action {
            CustomerAction::RecordCompletedOrder { total } => {
                if total < Decimal::ZERO {
                    return Err(CustomerError::ValidationError(format!(
                        "order total must not be negative: {total}"
                    )));
                }
                self.lifetime_order_count = self.lifetime_order_count.saturating_add(1);
                self.lifetime_spend += total;
                let change = self.refresh_tier();
                Ok(CustomerActionResult::RecordCompletedOrder(change.current))
            }
            CustomerAction::RefreshTier => Ok(CustomerActionResult::RefreshTier(self.refresh_tier())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::membership::Tier;
    use crate::model::Address;

    fn customer() -> Customer {
        Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: "Ayse".to_string(),
                email: "ayse@example.com".to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_rejects_bad_profile() {
        let blank = Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: "  ".to_string(),
                email: "a@b.c".to_string(),
            },
        );
        assert!(matches!(blank, Err(CustomerError::ValidationError(_))));

        let no_at = Customer::from_create_params(
            CustomerId(1),
            CustomerCreate {
                name: "Ayse".to_string(),
                email: "ayse.example.com".to_string(),
            },
        );
        assert!(matches!(no_at, Err(CustomerError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_invalid_update_changes_nothing() {
        let mut customer = customer();
        let result = customer
            .on_update(
                CustomerUpdate {
                    name: Some("Ayse Yilmaz".to_string()),
                    email: Some("broken".to_string()),
                    selected_address: None,
                },
                &(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(customer.name, "Ayse");
    }

    #[tokio::test]
    async fn test_select_and_clear_address() {
        let mut customer = customer();
        let home = Address::new("Home", GeoPoint::new(41.0, 29.0));

        customer
            .on_update(
                CustomerUpdate {
                    selected_address: Some(Some(home.clone())),
                    ..Default::default()
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(customer.selected_address, Some(home));

        customer
            .on_update(
                CustomerUpdate {
                    selected_address: Some(None),
                    ..Default::default()
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(customer.selected_address, None);
    }

    #[tokio::test]
    async fn test_completed_orders_promote_by_spend() {
        let mut customer = customer();
        let result = customer
            .handle_action(
                CustomerAction::RecordCompletedOrder {
                    total: Decimal::from(1_200),
                },
                &(),
            )
            .await
            .unwrap();

        assert_eq!(result, CustomerActionResult::RecordCompletedOrder(Tier::Silver));
        assert_eq!(customer.lifetime_order_count, 1);
        assert_eq!(customer.membership_tier, Tier::Silver);
    }

    #[tokio::test]
    async fn test_negative_total_is_rejected() {
        let mut customer = customer();
        let result = customer
            .handle_action(
                CustomerAction::RecordCompletedOrder {
                    total: Decimal::from(-5),
                },
                &(),
            )
            .await;

        assert!(result.is_err());
        assert_eq!(customer.lifetime_order_count, 0);
    }

    #[tokio::test]
    async fn test_refresh_repairs_stale_cache() {
        let mut customer = customer();
        customer.lifetime_order_count = 360;
        customer.membership_tier = Tier::Silver;

        let result = customer
            .handle_action(CustomerAction::RefreshTier, &())
            .await
            .unwrap();
        assert_eq!(
            result,
            CustomerActionResult::RefreshTier(TierChange {
                previous: Tier::Silver,
                current: Tier::Diamond,
            })
        );

        let again = customer
            .handle_action(CustomerAction::RefreshTier, &())
            .await
            .unwrap();
        assert!(matches!(again, CustomerActionResult::RefreshTier(c) if !c.changed()));
    }
}
