//! Transaction templates: saved drafts for recurring entries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction_category::TransactionCategoryType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTemplate {
    pub template_id: i64,
    pub uid: i64,
    pub deleted: bool,
    pub name: String,
    pub transaction_type: TransactionCategoryType,
    pub category_id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub tag_ids: Vec<i64>,
    pub comment: String,
    pub display_order: i32,
    pub hidden: bool,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

impl TransactionTemplate {
    pub fn to_info_response(&self) -> TransactionTemplateInfoResponse {
        TransactionTemplateInfoResponse {
            id: self.template_id,
            name: self.name.clone(),
            transaction_type: self.transaction_type,
            category_id: self.category_id,
            account_id: self.account_id,
            amount: self.amount,
            tag_ids: self.tag_ids.clone(),
            comment: self.comment.clone(),
            display_order: self.display_order,
            hidden: self.hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTemplateInfoResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionCategoryType,
    pub category_id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub tag_ids: Vec<i64>,
    pub comment: String,
    pub display_order: i32,
    pub hidden: bool,
}

/// Orders templates by display order, then id.
pub fn sort_transaction_template_info_responses(templates: &mut [TransactionTemplateInfoResponse]) {
    templates.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: i64, display_order: i32) -> TransactionTemplate {
        TransactionTemplate {
            template_id: id,
            uid: 1,
            deleted: false,
            name: format!("template {id}"),
            transaction_type: TransactionCategoryType::Expense,
            category_id: 100,
            account_id: 10,
            amount: 1250,
            tag_ids: vec![1, 2],
            comment: String::new(),
            display_order,
            hidden: false,
            created_unix_time: 0,
            updated_unix_time: 0,
        }
    }

    #[test]
    fn test_sort_by_display_order_then_id() {
        let mut templates: Vec<_> = [template(7, 1), template(2, 3), template(5, 1)]
            .iter()
            .map(TransactionTemplate::to_info_response)
            .collect();

        sort_transaction_template_info_responses(&mut templates);

        let ids: Vec<i64> = templates.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 7, 2]);
    }

    #[test]
    fn test_info_response_json_shape() {
        let json = serde_json::to_value(template(1, 0).to_info_response()).unwrap();

        assert_eq!(json["type"], "expense");
        assert_eq!(json["tagIds"], serde_json::json!([1, 2]));
    }
}
