//! Travel-mode tagging context.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Displayable, Identifiable, NamedEntity};

/// An optional scoping context. Transactions recorded while a trip is
/// active carry its id; the tag is assigned at creation and never changed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

impl Trip {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            end_date,
            is_active: false,
        }
    }
}

impl Identifiable for Trip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Trip {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Trip {
    fn display_label(&self) -> String {
        format!("{} ({} to {})", self.name, self.start_date, self.end_date)
    }
}
