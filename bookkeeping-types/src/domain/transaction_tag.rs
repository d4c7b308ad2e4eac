//! Transaction tags.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTag {
    pub tag_id: i64,
    pub uid: i64,
    pub deleted: bool,
    pub name: String,
    pub display_order: i32,
    pub hidden: bool,
    pub created_unix_time: i64,
    pub updated_unix_time: i64,
}

impl TransactionTag {
    pub fn to_info_response(&self) -> TransactionTagInfoResponse {
        TransactionTagInfoResponse {
            id: self.tag_id,
            name: self.name.clone(),
            display_order: self.display_order,
            hidden: self.hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTagInfoResponse {
    pub id: i64,
    pub name: String,
    pub display_order: i32,
    pub hidden: bool,
}

/// Orders tags by display order, then id.
pub fn sort_transaction_tag_info_responses(tags: &mut [TransactionTagInfoResponse]) {
    tags.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, display_order: i32) -> TransactionTagInfoResponse {
        TransactionTagInfoResponse {
            id,
            name: format!("tag {id}"),
            display_order,
            hidden: false,
        }
    }

    #[test]
    fn test_sort_by_display_order_then_id() {
        let mut tags = vec![tag(3, 2), tag(9, 1), tag(1, 2), tag(4, 0)];

        sort_transaction_tag_info_responses(&mut tags);
        let ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 9, 1, 3]);

        let before = tags.clone();
        sort_transaction_tag_info_responses(&mut tags);
        assert_eq!(tags, before);
    }
}
