//! Request and response bodies of the HTTP API.

use crate::db::models::{AccountFields, CategoryFields};
use crate::error::VaultError;
use crate::types::extra_info::ExtraInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of both login routes. Anything that is not `{"password": "<string>"}`
/// counts as an empty password, so a malformed attempt is rejected like a wrong one.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<Value>,
}

impl LoginRequest {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        match &self.password {
            Some(Value::String(password)) => password,
            _ => "",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: SuccessResponse = SuccessResponse { success: true };
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CategoryRequest {
    /// Full replacement set: omitted optional fields become empty strings.
    pub fn into_fields(self) -> Result<CategoryFields, VaultError> {
        let name = required_text(self.name, "name")?;
        Ok(CategoryFields {
            name,
            description: self.description.unwrap_or_default(),
            icon: self.icon.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountRequest {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// A string is stored as-is; an object of fields is serialized to JSON.
    pub extra_info: Option<Value>,
    pub url: Option<String>,
}

impl AccountRequest {
    pub fn into_new_fields(self) -> Result<AccountFields, VaultError> {
        let category_id = self
            .category_id
            .ok_or_else(|| VaultError::validation("category_id is required"))?;
        let mut fields = self.into_update_fields()?;
        fields.category_id = category_id;
        Ok(fields)
    }

    /// Fields for an update. `category_id` is ignored: accounts stay in their category.
    pub fn into_update_fields(self) -> Result<AccountFields, VaultError> {
        let title = required_text(self.title, "title")?;
        Ok(AccountFields {
            category_id: 0,
            title,
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            extra_info: stored_extra_info(self.extra_info)?,
            url: self.url.unwrap_or_default(),
        })
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, VaultError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(VaultError::validation(format!("{field} is required"))),
    }
}

fn stored_extra_info(value: Option<Value>) -> Result<String, VaultError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(raw)) => Ok(ExtraInfo::FreeText(raw).into_stored()),
        Some(Value::Object(map)) => Ok(ExtraInfo::from_object(map).into_stored()),
        Some(_) => Err(VaultError::validation(
            "extra_info must be a string or an object of fields",
        )),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountsQuery {
    pub category_id: Option<String>,
}

impl AccountsQuery {
    /// An empty `category_id=` means no filter.
    pub fn category_filter(&self) -> Result<Option<i64>, VaultError> {
        match self.category_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| VaultError::validation("category_id must be an integer")),
        }
    }
}
