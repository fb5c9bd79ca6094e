use crate::model::TransactionType;
use serde::{Deserialize, Serialize};

const INCOME: [&str; 8] = [
    "Salary",
    "Bonus",
    "Interest",
    "Other income",
    "Side income",
    "Allowance",
    "Incentive",
    "Financial income",
];

const EXPENSE: [&str; 15] = [
    "Food",
    "Transport",
    "Shopping",
    "Housing",
    "Other expense",
    "Transport/Vehicle",
    "Culture",
    "Mart/Convenience store",
    "Fashion/Beauty",
    "Household goods",
    "Housing/Telecom",
    "Health",
    "Education",
    "Events/Dues",
    "Parents",
];

/// The category names offered for each transaction type.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Categories {
    income: Vec<String>,
    expense: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(INCOME, EXPENSE)
    }
}

impl Categories {
    pub fn new<S1, S2>(
        income: impl IntoIterator<Item = S1>,
        expense: impl IntoIterator<Item = S2>,
    ) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            income: income.into_iter().map(Into::into).collect(),
            expense: expense.into_iter().map(Into::into).collect(),
        }
    }

    pub fn income(&self) -> &[String] {
        &self.income
    }

    pub fn expense(&self) -> &[String] {
        &self.expense
    }

    /// The list for `ty`, or an empty list when there is no type.
    pub fn for_type(&self, ty: Option<TransactionType>) -> &[String] {
        match ty {
            Some(TransactionType::Income) => &self.income,
            Some(TransactionType::Expense) => &self.expense,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_type() {
        let c = Categories::new(["a", "b"], ["x"]);
        assert_eq!(c.for_type(Some(TransactionType::Income)), ["a", "b"]);
        assert_eq!(c.for_type(Some(TransactionType::Expense)), ["x"]);
        assert!(c.for_type(None).is_empty());
    }

    #[test]
    fn test_default_lists_are_disjoint() {
        let c = Categories::default();
        assert_eq!(c.income().len(), 8);
        assert_eq!(c.expense().len(), 15);
        assert!(c.income().iter().all(|name| !c.expense().contains(name)));
    }
}
