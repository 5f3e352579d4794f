//! Page cursor for list and search operations.

use crate::{proto, Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 1-based page number and page size.
///
/// Owned by the caller: requests copy it and never advance it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PaginationFields")]
pub struct Pagination {
    page: u32,
    per_page: u32,
}

#[derive(Deserialize)]
struct PaginationFields {
    page: u32,
    per_page: u32,
}

impl TryFrom<PaginationFields> for Pagination {
    type Error = Error;

    fn try_from(fields: PaginationFields) -> Result<Self> {
        Self::new(fields.page, fields.per_page)
    }
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: u32 = 20;

    pub fn new(page: u32, per_page: u32) -> Result<Self> {
        if page == 0 {
            return Err(Error::construction_with_context(
                "page numbers start at 1",
                ErrorContext::new().with_field_path("page"),
            ));
        }
        if per_page == 0 {
            return Err(Error::construction_with_context(
                "per_page must be at least 1",
                ErrorContext::new().with_field_path("per_page"),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn first_page() -> Self {
        Self {
            page: 1,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }

    pub fn next_page(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            per_page: self.per_page,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn to_query(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_wire(&self) -> proto::Pagination {
        proto::Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Append the cursor to `path` as query parameters.
    pub(crate) fn apply_to_path(&self, path: &str) -> String {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}", path, sep, self.to_query())
    }

    /// Merge the cursor into a JSON request body. A missing or non-object body
    /// becomes an object holding only the cursor.
    pub(crate) fn apply_to_body(&self, body: Option<Value>) -> Value {
        let mut obj = match body {
            Some(Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        obj.insert("pagination".into(), self.to_json());
        Value::Object(obj)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first_page()
    }
}
