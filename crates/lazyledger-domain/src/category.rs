//! The closed category taxonomy shared by transactions and subscriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transaction::TransactionKind;

/// Categorises ledger activity. The set is closed: eight expense-side tags
/// and four income-side tags, partitioned by [`Category::kind`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Clothing,
    Housing,
    Transportation,
    Entertainment,
    Shopping,
    Essentials,
    Others,
    Salary,
    Investment,
    Gift,
    SideHustle,
}

impl Category {
    /// Every category, expense tags first, in canonical order.
    pub const ALL: [Category; 12] = [
        Category::Food,
        Category::Clothing,
        Category::Housing,
        Category::Transportation,
        Category::Entertainment,
        Category::Shopping,
        Category::Essentials,
        Category::Others,
        Category::Salary,
        Category::Investment,
        Category::Gift,
        Category::SideHustle,
    ];

    /// Returns which side of the ledger the category groups.
    pub fn kind(self) -> TransactionKind {
        match self {
            Category::Salary | Category::Investment | Category::Gift | Category::SideHustle => {
                TransactionKind::Income
            }
            _ => TransactionKind::Expense,
        }
    }

    /// Iterates the categories valid for the given transaction kind.
    pub fn of_kind(kind: TransactionKind) -> impl Iterator<Item = Category> {
        Self::ALL.iter().copied().filter(move |c| c.kind() == kind)
    }

    /// Returns the canonical tag name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Essentials => "Essentials",
            Category::Others => "Others",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Gift => "Gift",
            Category::SideHustle => "SideHustle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
