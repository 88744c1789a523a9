use uuid::Uuid;

use crate::domain::month_year::MonthYear;

/// Window and optional filters for summing subscription prices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
    pub from: MonthYear,
    pub to: MonthYear,
}

impl TotalFilter {
    pub fn validate(&self) -> Result<(), String> {
        if self.from.is_zero() || self.to.is_zero() {
            return Err(String::from("'from' and 'to' dates are required"));
        }

        if self.to < self.from {
            return Err(String::from("'to' must be after 'from'"));
        }

        Ok(())
    }
}
