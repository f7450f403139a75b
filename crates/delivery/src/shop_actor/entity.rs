//! [`ActorEntity`] implementation for [`Shop`].

use super::actions::{ShopAction, ShopActionResult};
use super::error::ShopError;
use crate::model::{Shop, ShopCreate, ShopId, ShopUpdate};
use async_trait::async_trait;
use resource_store::ActorEntity;

fn validate_name(name: &str) -> Result<(), ShopError> {
    if name.trim().is_empty() {
        return Err(ShopError::ValidationError(
            "name must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Shop {
    type Id = ShopId;
    type Create = ShopCreate;
    type Update = ShopUpdate;
    type Action = ShopAction;
    type ActionResult = ShopActionResult;
    type Context = ();
    type Error = ShopError;

    fn from_create_params(id: ShopId, params: ShopCreate) -> Result<Self, Self::Error> {
        validate_name(&params.name)?;
        Ok(Self::new(id, params.name, params.location))
    }

    fn action_mutates(_action: &ShopAction) -> bool {
        false
    }

    /// Hours are written strictly: all seven days, every open day with `HH:MM` times.
    async fn on_update(&mut self, update: ShopUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(hours) = &update.hours {
            hours.validate()?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
        if let Some(hours) = update.hours {
            self.hours = hours;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ShopAction,
        _ctx: &(),
    ) -> Result<ShopActionResult, Self::Error> {
        match action {
            ShopAction::Availability { now } => {
                Ok(ShopActionResult::Availability(self.availability(now)))
            }
            ShopAction::HasOpenHours => Ok(ShopActionResult::HasOpenHours(self.has_open_hours())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::{DaySchedule, HoursError, WeeklyHours};
    use chrono::{NaiveDate, Weekday};

    fn shop() -> Shop {
        Shop::from_create_params(
            ShopId(1),
            ShopCreate {
                name: "Kebapci".to_string(),
                location: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_shop_gets_standard_hours() {
        let shop = shop();
        assert_eq!(shop.hours, WeeklyHours::standard());
        assert!(shop.has_open_hours());
    }

    #[tokio::test]
    async fn test_incomplete_hours_are_rejected() {
        let mut shop = shop();
        let mut partial = WeeklyHours::new();
        partial.set(Weekday::Mon, DaySchedule::open("10:00", "18:00"));

        let result = shop
            .on_update(
                ShopUpdate {
                    name: Some("Renamed".to_string()),
                    hours: Some(partial),
                    ..Default::default()
                },
                &(),
            )
            .await;

        assert_eq!(
            result,
            Err(ShopError::InvalidHours(HoursError::MissingDay { day: "tuesday" }))
        );
        assert_eq!(shop.name, "Kebapci");
        assert_eq!(shop.hours, WeeklyHours::standard());
    }

    #[tokio::test]
    async fn test_availability_follows_updated_hours() {
        let mut shop = shop();
        let hours = WeeklyHours::standard().with(Weekday::Mon, DaySchedule::closed());
        shop.on_update(
            ShopUpdate {
                hours: Some(hours),
                ..Default::default()
            },
            &(),
        )
        .await
        .unwrap();

        // 2024-06-03 is a Monday.
        let now = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let result = shop
            .handle_action(ShopAction::Availability { now }, &())
            .await
            .unwrap();
        let ShopActionResult::Availability(availability) = result else {
            panic!("expected availability");
        };
        assert!(!availability.is_open_now);
        assert_eq!(availability.status_label(), "closed today");
    }
}
