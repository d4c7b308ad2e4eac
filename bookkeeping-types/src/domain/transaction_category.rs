//! Transaction categories: two levels, primary and secondary.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategoryType {
    Income = 1,
    Expense = 2,
    Transfer = 3,
}

/// A stored category. Primary categories have `parent_category_id == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCategory {
    pub category_id: i64,
    pub uid: i64,
    pub deleted: bool,
    pub category_type: TransactionCategoryType,
    pub parent_category_id: i64,
    pub name: String,
    pub display_order: i32,
    pub icon: i64,
    pub color: String,
    pub hidden: bool,
    pub comment: String,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

impl TransactionCategory {
    pub fn is_primary(&self) -> bool {
        self.parent_category_id == 0
    }

    pub fn to_info_response(&self) -> TransactionCategoryInfoResponse {
        TransactionCategoryInfoResponse {
            id: self.category_id,
            name: self.name.clone(),
            parent_id: self.parent_category_id,
            category_type: self.category_type,
            icon: self.icon,
            color: self.color.clone(),
            comment: self.comment.clone(),
            display_order: self.display_order,
            hidden: self.hidden,
            sub_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCategoryInfoResponse {
    pub id: i64,
    pub name: String,
    pub parent_id: i64,
    #[serde(rename = "type")]
    pub category_type: TransactionCategoryType,
    pub icon: i64,
    pub color: String,
    pub comment: String,
    pub display_order: i32,
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub sub_categories: Vec<TransactionCategoryInfoResponse>,
}

fn compare_category_info(
    a: &TransactionCategoryInfoResponse,
    b: &TransactionCategoryInfoResponse,
) -> Ordering {
    a.category_type
        .cmp(&b.category_type)
        .then(a.display_order.cmp(&b.display_order))
        .then(a.id.cmp(&b.id))
}

/// Orders categories by type, then display order, then id.
pub fn sort_transaction_category_info_responses(categories: &mut [TransactionCategoryInfoResponse]) {
    categories.sort_by(compare_category_info);
}

/// Groups secondary categories under their primary category.
///
/// Deleted categories and secondary categories whose parent is missing are
/// left out; both levels come back sorted.
pub fn build_category_tree(categories: &[TransactionCategory]) -> Vec<TransactionCategoryInfoResponse> {
    let mut primaries: Vec<TransactionCategoryInfoResponse> = categories
        .iter()
        .filter(|c| !c.deleted && c.is_primary())
        .map(TransactionCategory::to_info_response)
        .collect();

    for primary in &mut primaries {
        primary.sub_categories = categories
            .iter()
            .filter(|c| !c.deleted && c.parent_category_id == primary.id)
            .map(TransactionCategory::to_info_response)
            .collect();
        sort_transaction_category_info_responses(&mut primary.sub_categories);
    }

    sort_transaction_category_info_responses(&mut primaries);
    primaries
}
