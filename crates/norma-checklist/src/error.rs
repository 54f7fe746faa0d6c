//! Checklist errors.

/// Errors from checklist mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecklistError {
    /// No item with the given identifier exists anywhere in the checklist.
    #[error("checklist item not found: {item_id}")]
    ItemNotFound {
        /// The identifier that failed to match.
        item_id: String,
    },
    /// A status label did not match any item status.
    #[error("unknown item status: {value}")]
    UnknownStatus {
        /// The label that failed to parse.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_item() {
        let err = ChecklistError::ItemNotFound {
            item_id: "fire-resistance-rating".into(),
        };
        assert_eq!(
            err.to_string(),
            "checklist item not found: fire-resistance-rating"
        );
    }
}
