//! Dataset DTOs

use serde::{Deserialize, Serialize};

use crate::domain::item::ResultItem;

/// Query string accepted by item endpoints (`?limit=n`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ItemsQuery {
    /// Requested item cap; zero means no cap
    pub fn limit(&self) -> Option<u32> {
        self.limit.filter(|n| *n > 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetItemsResponse {
    pub success: bool,
    pub items: Vec<ResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_means_unbounded() {
        assert_eq!(ItemsQuery { limit: Some(0) }.limit(), None);
        assert_eq!(ItemsQuery { limit: Some(5) }.limit(), Some(5));
        assert_eq!(ItemsQuery::default().limit(), None);
    }
}
