//! Table rendering for the customer list.

use std::fmt;

use super::datetime::DisplayDate;
use crate::models::Customer;

/// Markdown table of customers, one row each, borrowed from the registry.
///
/// # Examples
///
/// ```rust
/// use harvis_core::{CustomerRegistry, display::Customers};
///
/// let registry = CustomerRegistry::with_sample_data();
/// let output = Customers(registry.search("cloud")).to_string();
/// assert!(output.contains("| 8 | CloudShift Inc | APP-2025-9123 |"));
/// ```
pub struct Customers<'a>(pub Vec<&'a Customer>);

impl fmt::Display for Customers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No customers found.");
        }

        writeln!(
            f,
            "| ID | Company | Application | Submitted | Stage | Status | Updated |"
        )?;
        writeln!(f, "|---|---|---|---|---|---|---|")?;
        for customer in &self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} |",
                customer.id,
                customer.company,
                customer.application_id,
                DisplayDate(&customer.submission_date),
                customer.current_stage,
                customer.status,
                DisplayDate(&customer.last_updated),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::CustomerStatus;

    fn create_test_customer(id: u64, company: &str) -> Customer {
        Customer {
            id,
            company: company.to_string(),
            application_id: format!("APP-2025-{id:04}"),
            submission_date: date(2025, 3, 5),
            current_stage: "Validation".to_string(),
            status: CustomerStatus::OnHold,
            last_updated: date(2025, 3, 6),
        }
    }

    #[test]
    fn test_customers_display_empty() {
        assert_eq!(Customers(vec![]).to_string(), "No customers found.\n");
    }

    #[test]
    fn test_customers_display_rows() {
        let acme = create_test_customer(1, "Acme");
        let globex = create_test_customer(2, "Globex");
        let output = Customers(vec![&acme, &globex]).to_string();

        assert!(output.starts_with("| ID | Company |"));
        assert!(output.contains(
            "| 1 | Acme | APP-2025-0001 | 05 Mar 2025 | Validation | On Hold | 06 Mar 2025 |"
        ));
        assert!(output.contains("| 2 | Globex |"));
        assert_eq!(output.lines().count(), 4);
    }
}
