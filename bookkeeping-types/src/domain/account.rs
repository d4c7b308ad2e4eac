//! Account domain model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use exchange_rates::CurrencyCode;

/// What kind of money an account holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    Cash = 1,
    CheckingAccount = 2,
    CreditCard = 3,
    VirtualAccount = 4,
    DebtAccount = 5,
    Receivables = 6,
    InvestmentAccount = 7,
    SavingsAccount = 8,
    CertificateOfDeposit = 9,
}

/// Categories whose balance counts towards net assets.
pub const ASSET_CATEGORIES: &[AccountCategory] = &[
    AccountCategory::Cash,
    AccountCategory::CheckingAccount,
    AccountCategory::VirtualAccount,
    AccountCategory::Receivables,
    AccountCategory::InvestmentAccount,
    AccountCategory::SavingsAccount,
    AccountCategory::CertificateOfDeposit,
];

/// Categories whose balance counts as money owed.
pub const LIABILITY_CATEGORIES: &[AccountCategory] =
    &[AccountCategory::CreditCard, AccountCategory::DebtAccount];

impl AccountCategory {
    pub fn is_asset(&self) -> bool {
        ASSET_CATEGORIES.contains(self)
    }

    pub fn is_liability(&self) -> bool {
        LIABILITY_CATEGORIES.contains(self)
    }
}

/// Whether an account stands alone or groups sub-accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    SingleAccount = 1,
    MultiSubAccounts = 2,
}

/// A stored account. `parent_account_id` is 0 for top-level accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub uid: i64,
    pub deleted: bool,
    pub category: AccountCategory,
    pub account_type: AccountType,
    pub parent_account_id: i64,
    pub name: String,
    pub display_order: i32,
    pub icon: i64,
    pub color: String,
    pub currency: CurrencyCode,
    /// Balance in the currency's smallest unit.
    pub balance: i64,
    pub comment: String,
    pub hidden: bool,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

impl Account {
    pub fn to_info_response(&self) -> AccountInfoResponse {
        AccountInfoResponse {
            id: self.account_id,
            name: self.name.clone(),
            parent_id: self.parent_account_id,
            category: self.category,
            account_type: self.account_type,
            icon: self.icon,
            color: self.color.clone(),
            currency: self.currency,
            balance: self.balance,
            comment: self.comment.clone(),
            display_order: self.display_order,
            is_asset: self.category.is_asset(),
            is_liability: self.category.is_liability(),
            hidden: self.hidden,
            sub_accounts: Vec::new(),
        }
    }
}

/// View object for an account, with its sub-accounts nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfoResponse {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    pub category: AccountCategory,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub icon: i64,
    pub color: String,
    pub currency: CurrencyCode,
    pub balance: i64,
    pub comment: String,
    pub display_order: i32,
    pub is_asset: bool,
    pub is_liability: bool,
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub sub_accounts: Vec<AccountInfoResponse>,
}

fn compare_account_info(a: &AccountInfoResponse, b: &AccountInfoResponse) -> Ordering {
    a.category
        .cmp(&b.category)
        .then(a.display_order.cmp(&b.display_order))
        .then(a.id.cmp(&b.id))
}

/// Orders accounts by category, then display order, then id.
pub fn sort_account_info_responses(accounts: &mut [AccountInfoResponse]) {
    accounts.sort_by(compare_account_info);
}

/// Builds the top-level account list with each parent's sub-accounts nested
/// and every level sorted. Deleted accounts and orphaned sub-accounts are
/// left out.
pub fn build_account_tree(accounts: &[Account]) -> Vec<AccountInfoResponse> {
    let mut parents: Vec<AccountInfoResponse> = accounts
        .iter()
        .filter(|a| !a.deleted && a.parent_account_id == 0)
        .map(Account::to_info_response)
        .collect();

    for parent in &mut parents {
        parent.sub_accounts = accounts
            .iter()
            .filter(|a| !a.deleted && a.parent_account_id == parent.id)
            .map(Account::to_info_response)
            .collect();
        sort_account_info_responses(&mut parent.sub_accounts);
    }

    sort_account_info_responses(&mut parents);
    parents
}
