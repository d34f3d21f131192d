//! Recurring-subscription templates and their billing cadence.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::common::{shift_month, Amounted, Displayable, Identifiable, NamedEntity};

/// Enumerates the supported billing cadences.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    /// Returns the cadence expressed in calendar months.
    pub fn months(self) -> i32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::Yearly => 12,
        }
    }

    /// Calculates the next payment date after `from`, calendar-aware so a
    /// month-end anchor never drifts into the following month.
    pub fn next_date(self, from: NaiveDate) -> NaiveDate {
        shift_month(from, self.months())
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// A recurring-payment template. Materialization turns it into concrete
/// expense transactions on its due dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub cycle: BillingCycle,
    pub next_payment_date: NaiveDate,
    pub category: Category,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        cycle: BillingCycle,
        first_payment: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            cycle,
            next_payment_date: first_payment,
            category,
        }
    }

    /// Returns `true` when the subscription falls due on the given day.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.next_payment_date == date
    }

    /// Moves `next_payment_date` one cycle forward.
    pub fn advance(&mut self) {
        self.next_payment_date = self.cycle.next_date(self.next_payment_date);
    }
}

impl Identifiable for Subscription {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Subscription {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Subscription {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Subscription {
    fn display_label(&self) -> String {
        format!("{} ({}, next {})", self.name, self.cycle, self.next_payment_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_cycle_advances_one_calendar_month() {
        let mut sub = Subscription::new(
            "Streaming",
            390.0,
            BillingCycle::Monthly,
            date(2025, 8, 7),
            Category::Entertainment,
        );
        sub.advance();
        assert_eq!(sub.next_payment_date, date(2025, 9, 7));
    }

    #[test]
    fn quarterly_and_yearly_cycles_stay_calendar_aware() {
        assert_eq!(
            BillingCycle::Quarterly.next_date(date(2025, 11, 30)),
            date(2026, 2, 28)
        );
        assert_eq!(
            BillingCycle::Yearly.next_date(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn month_end_anchor_does_not_drift() {
        let mut sub = Subscription::new(
            "Rent",
            12000.0,
            BillingCycle::Monthly,
            date(2025, 1, 31),
            Category::Housing,
        );
        sub.advance();
        assert_eq!(sub.next_payment_date, date(2025, 2, 28));
        sub.advance();
        assert_eq!(sub.next_payment_date, date(2025, 3, 28));
    }

    #[test]
    fn display_label_names_the_cycle_and_next_payment() {
        let sub = Subscription::new(
            "Streaming",
            390.0,
            BillingCycle::Monthly,
            date(2025, 8, 7),
            Category::Entertainment,
        );
        assert_eq!(sub.name(), "Streaming");
        assert_eq!(sub.display_label(), "Streaming (Monthly, next 2025-08-07)");
    }

    #[test]
    fn due_check_is_exact_date_equality() {
        let sub = Subscription::new(
            "Gym",
            900.0,
            BillingCycle::Monthly,
            date(2025, 8, 7),
            Category::Essentials,
        );
        assert!(sub.is_due_on(date(2025, 8, 7)));
        assert!(!sub.is_due_on(date(2025, 8, 8)));
    }
}
