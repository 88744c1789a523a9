use serde::{Deserialize, Deserializer};

use crate::domain::month_year::MonthYear;
use crate::domain::subscription::Subscription;

/// Changes requested by a partial update. `None` means "leave as is".
///
/// `end_date` is doubly optional: `Some(None)` clears the end date and makes the
/// subscription open-ended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<Option<MonthYear>>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SubscriptionPatchBody {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub end_date: Option<Option<String>>,
}

// Distinguishes an explicit `null` from a missing key.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl SubscriptionPatch {
    pub fn apply_to(self, subscription: &mut Subscription) {
        if let Some(service_name) = self.service_name {
            subscription.service_name = service_name;
        }

        if let Some(price) = self.price {
            subscription.price = price;
        }

        if let Some(start_date) = self.start_date {
            subscription.start_date = start_date;
        }

        if let Some(end_date) = self.end_date {
            subscription.end_date = end_date;
        }
    }
}

impl TryFrom<SubscriptionPatchBody> for SubscriptionPatch {
    type Error = String;

    fn try_from(body: SubscriptionPatchBody) -> Result<Self, Self::Error> {
        let start_date = body
            .start_date
            .as_deref()
            .map(MonthYear::parse)
            .transpose()
            .map_err(|err| format!("invalid start_date: {}", err))?;
        let end_date = match body.end_date {
            Some(Some(end_date)) => Some(Some(
                MonthYear::parse(&end_date).map_err(|err| format!("invalid end_date: {}", err))?,
            )),
            Some(None) => Some(None),
            None => None,
        };

        Ok(SubscriptionPatch {
            service_name: body.service_name,
            price: body.price,
            start_date,
            end_date,
        })
    }
}
