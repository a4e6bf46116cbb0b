use super::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub value: &'static str,
    pub label: &'static str,
}

pub const INCOME_CATEGORIES: &[Category] = &[
    Category { value: "salary", label: "Salary" },
    Category { value: "freelance", label: "Freelance" },
    Category { value: "investment", label: "Investment" },
    Category { value: "gift", label: "Gift" },
    Category { value: "other", label: "Other" },
];

pub const EXPENSE_CATEGORIES: &[Category] = &[
    Category { value: "food", label: "Food" },
    Category { value: "rent", label: "Rent" },
    Category { value: "utilities", label: "Utilities" },
    Category { value: "transport", label: "Transport" },
    Category { value: "entertainment", label: "Entertainment" },
    Category { value: "health", label: "Health" },
    Category { value: "shopping", label: "Shopping" },
    Category { value: "education", label: "Education" },
    Category { value: "other", label: "Other" },
];

impl Category {
    pub fn for_kind(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Find a category of the given kind by value or label (case-insensitive).
    pub fn find(kind: TransactionKind, name: &str) -> Option<&'static Category> {
        let lower = name.trim().to_lowercase();
        Self::for_kind(kind)
            .iter()
            .find(|c| c.value == lower || c.label.to_lowercase() == lower)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Display label for a raw category id. Unknown ids (e.g. from an older
/// save file) are shown with their first letter upper-cased.
pub fn display_label(category: &str) -> String {
    if let Some(known) = INCOME_CATEGORIES
        .iter()
        .chain(EXPENSE_CATEGORIES)
        .find(|c| c.value == category)
    {
        return known.label.to_string();
    }
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
