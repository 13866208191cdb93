//! Customer registry behind the onboarding dashboard.
//!
//! The registry is seeded with the dashboard's sample applications and lives
//! in memory only. It answers the dashboard's search box and status cards
//! and validates the add-customer form.

use jiff::{Zoned, civil::Date};
use log::info;

use crate::{
    error::{OnboardingError, Result},
    models::{Customer, CustomerCounts, CustomerStatus, NewCustomer, UploadedDocument},
};

/// In-memory list of customer applications.
#[derive(Debug, Clone, Default)]
pub struct CustomerRegistry {
    customers: Vec<Customer>,
}

impl CustomerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the sample applications.
    pub fn with_sample_data() -> Self {
        use CustomerStatus::*;

        let seed = [
            ("Global Logistics", "APP-2025-4716", 14, "Account Creation", InProgress),
            ("Nippon Trading", "APP-2025-8501", 13, "Mareva Injunction", OnHold),
            ("Technova", "APP-2025-8732", 13, "Mareva Injunction", InProgress),
            ("FinTech Global Ltd", "APP-2025-1881", 13, "Completed", Completed),
            ("TechNova", "APP-2025-8234", 13, "Completed", Completed),
            ("JerCorp", "APP-2025-7435", 13, "Completed", Completed),
            ("Trushop", "APP-2025-3074", 13, "Mareva Injunction", InProgress),
            ("CloudShift Inc", "APP-2025-9123", 12, "Validation", InProgress),
            ("AgriWorld Pvt Ltd", "APP-2025-5678", 11, "AML Check", OnHold),
        ];

        let customers = seed
            .into_iter()
            .enumerate()
            .map(|(index, (company, application_id, day, stage, status))| {
                let date = Date::constant(2025, 3, day);
                Customer {
                    id: index as u64 + 1,
                    company: company.to_string(),
                    application_id: application_id.to_string(),
                    submission_date: date,
                    current_stage: stage.to_string(),
                    status,
                    last_updated: date,
                }
            })
            .collect();

        Self { customers }
    }

    /// All customers in insertion order.
    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    /// Looks up a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::CustomerNotFound` if no customer has the id
    pub fn get(&self, id: u64) -> Result<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or(OnboardingError::CustomerNotFound { id })
    }

    /// Case-insensitive match on company name or application id. A blank
    /// term matches every customer.
    pub fn search(&self, term: &str) -> Vec<&Customer> {
        let needle = term.trim().to_lowercase();
        self.customers
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.company.to_lowercase().contains(&needle)
                    || c.application_id.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Totals for the dashboard status cards.
    pub fn counts(&self) -> CustomerCounts {
        let count = |status| self.customers.iter().filter(|c| c.status == status).count();
        CustomerCounts {
            total: self.customers.len(),
            in_progress: count(CustomerStatus::InProgress),
            completed: count(CustomerStatus::Completed),
            on_hold: count(CustomerStatus::OnHold),
        }
    }

    /// Adds a customer submitted through the add-customer form.
    pub fn add(&mut self, form: NewCustomer) -> Result<Customer> {
        self.add_on(form, Zoned::now().date())
    }

    /// Adds a customer with an explicit submission date.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::InvalidInput` naming the offending field
    /// when the name is blank or the document is missing, of an unsupported
    /// type, or too large
    pub fn add_on(&mut self, form: NewCustomer, date: Date) -> Result<Customer> {
        let company = form.company.trim();
        if company.is_empty() {
            return Err(OnboardingError::invalid_input("customer_name")
                .with_reason("Please enter a customer name."));
        }

        let document = form.document.ok_or_else(|| {
            OnboardingError::invalid_input("document").with_reason("Please upload a document.")
        })?;
        validate_document(&document)?;

        let id = self.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let customer = Customer {
            id,
            company: company.to_string(),
            application_id: format!("APP-{}-{:04}", date.year(), id),
            submission_date: date,
            current_stage: "OCR Processing".to_string(),
            status: CustomerStatus::InProgress,
            last_updated: date,
        };

        info!(
            "Added customer {} ({}) with document {}",
            customer.company, customer.application_id, document.file_name
        );
        self.customers.push(customer.clone());
        Ok(customer)
    }
}

fn validate_document(document: &UploadedDocument) -> Result<()> {
    if document.document_type.is_none() {
        return Err(OnboardingError::invalid_input("document")
            .with_reason("Please upload PDF, DOC, DOCX, JPG, or PNG files only."));
    }
    if document.size_bytes > UploadedDocument::MAX_SIZE_BYTES {
        return Err(OnboardingError::invalid_input("document")
            .with_reason("File size must be less than 10MB."));
    }
    Ok(())
}
