//! Domain models for the bookkeeping service.
//!
//! Only users and custom exchange rates are persisted; the account,
//! category, tag and template models are library-only view types.

pub mod account;
pub mod transaction_category;
pub mod transaction_tag;
pub mod transaction_template;
pub mod user;
pub mod user_custom_exchange_rate;

pub use account::{
    Account, AccountCategory, AccountInfoResponse, AccountType, build_account_tree,
    sort_account_info_responses,
};
pub use transaction_category::{
    TransactionCategory, TransactionCategoryInfoResponse, TransactionCategoryType,
    build_category_tree, sort_transaction_category_info_responses,
};
pub use transaction_tag::{
    TransactionTag, TransactionTagInfoResponse, sort_transaction_tag_info_responses,
};
pub use transaction_template::{
    TransactionTemplate, TransactionTemplateInfoResponse, sort_transaction_template_info_responses,
};
pub use user::{User, UserBasicInfo};
pub use user_custom_exchange_rate::{
    FIXED_POINT_SCALE, UserCustomExchangeRate, format_fixed_point_rate, parse_fixed_point_rate,
};
