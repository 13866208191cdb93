//! Account type selection and the issued account record.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Account product chosen in the account type dialog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Savings,
    Current,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Current => "current",
        }
    }

    /// Product name shown on the account card.
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Savings => "Savings Account",
            AccountType::Current => "Current Account",
        }
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "current" => Ok(AccountType::Current),
            _ => Err(format!("Invalid account type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    Active,
}

/// The account record produced when the account-creation step completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountDetails {
    pub account_number: String,
    pub account_type: AccountType,
    pub customer_name: String,
    pub branch_code: String,
    pub created_on: Date,
    pub state: AccountState,
}

impl AccountDetails {
    pub const ACCOUNT_NUMBER: &'static str = "4716-8935-2401";
    pub const BRANCH_CODE: &'static str = "HARV001";

    /// Issues the fixed account record for a customer.
    pub fn issue(customer_name: &str, account_type: AccountType, created_on: Date) -> Self {
        Self {
            account_number: Self::ACCOUNT_NUMBER.to_string(),
            account_type,
            customer_name: customer_name.to_string(),
            branch_code: Self::BRANCH_CODE.to_string(),
            created_on,
            state: AccountState::Active,
        }
    }
}
