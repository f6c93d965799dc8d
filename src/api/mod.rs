use crate::models::{AccountInfo, Item, SortSpec};
use crate::storage::{TOKEN_KEY, USER_KEY};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:7171".to_string();

        // Deployment injects `window.ENV.API_URL`; fall back to the legacy
        // lowercase key, then to the local dev default.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"API_URL".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }

                    if let Ok(api_url) = js_sys::Reflect::get(&env, &"api_url".into()) {
                        if let Some(url_str) = api_url.as_string() {
                            return Self { api_url: url_str };
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn get_api_url() -> String {
    EnvConfig::new().api_url
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginResponse {
    pub token: String,
    pub account: AccountInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SignupResponse {
    pub token: String,
    pub account: AccountInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ListItemsRequest {
    #[serde(rename = "owner-id")]
    pub owner_id: String,

    /// Store column to order by. The backend applies this server-side.
    #[serde(rename = "order-by")]
    pub order_by: String,

    pub direction: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct InsertItemRequest {
    #[serde(rename = "owner-id")]
    pub owner_id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // `position` is intentionally absent: new rows start unpositioned and are
    // backfilled on the next load.
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct UpdateItemPositionRequest {
    pub id: String,

    /// Both keys scope the update; the backend rejects cross-owner writes.
    #[serde(rename = "owner-id")]
    pub owner_id: String,

    pub position: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DeleteItemRequest {
    pub id: String,

    #[serde(rename = "owner-id")]
    pub owner_id: String,
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    #[allow(dead_code)]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let base_url = get_api_url();
        let token = leptos::web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten());

        Self { base_url, token }
    }

    pub fn save_to_storage(&self) {
        if let Some(storage) =
            leptos::web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        {
            if let Some(token) = &self.token {
                let _ = storage.set_item(TOKEN_KEY, token);
            }
        }
    }

    pub fn clear_storage() {
        if let Some(storage) =
            leptos::web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn get_auth_token(&self) -> Option<String> {
        self.token.clone()
    }

    pub fn logout(&mut self) {
        self.token = None;
        Self::clear_storage();
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        token: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    async fn request_api<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&impl serde::Serialize>,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);
        let mut req = client.post(url);
        req = Self::with_auth_headers(req, self.get_auth_token());

        if let Some(b) = body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, "Request failed"))
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.request_api(
            "/auth/login",
            Some(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    pub async fn signup(&self, email: &str, password: &str) -> ApiResult<SignupResponse> {
        self.request_api(
            "/auth/signup",
            Some(&SignupRequest {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
    }

    /// Verify the stored token and fetch the account behind it.
    pub async fn current_account(&self) -> ApiResult<AccountInfo> {
        let data: serde_json::Value = self
            .request_api("/auth/me", Some(&serde_json::json!({})))
            .await?;

        let account = data.get("account").cloned().unwrap_or(data);
        serde_json::from_value(account).map_err(ApiError::parse)
    }

    pub async fn list_items(&self, owner_id: &str, sort: &SortSpec) -> ApiResult<Vec<Item>> {
        let data: serde_json::Value = self
            .request_api(
                "/items/list",
                Some(&ListItemsRequest {
                    owner_id: owner_id.to_string(),
                    order_by: sort.field.to_string(),
                    direction: sort.direction.to_string(),
                }),
            )
            .await?;
        Ok(Self::parse_item_list_response(data))
    }

    pub async fn insert_item(
        &self,
        owner_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> ApiResult<Item> {
        let data: serde_json::Value = self
            .request_api(
                "/items/create",
                Some(&InsertItemRequest {
                    owner_id: owner_id.to_string(),
                    name: name.to_string(),
                    description: description.map(|s| s.to_string()),
                }),
            )
            .await?;

        let item = data.get("item").cloned().unwrap_or(data);
        serde_json::from_value(item).map_err(ApiError::parse)
    }

    pub async fn update_item_position(
        &self,
        id: &str,
        owner_id: &str,
        position: i64,
    ) -> ApiResult<()> {
        let _: serde_json::Value = self
            .request_api(
                "/items/update-position",
                Some(&UpdateItemPositionRequest {
                    id: id.to_string(),
                    owner_id: owner_id.to_string(),
                    position,
                }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_item(&self, id: &str, owner_id: &str) -> ApiResult<()> {
        let _: serde_json::Value = self
            .request_api(
                "/items/delete",
                Some(&DeleteItemRequest {
                    id: id.to_string(),
                    owner_id: owner_id.to_string(),
                }),
            )
            .await?;
        Ok(())
    }

    pub(crate) fn parse_item_list_response(data: serde_json::Value) -> Vec<Item> {
        let list = data
            .get("item-list")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        let mut out: Vec<Item> = Vec::with_capacity(list.len());
        for entry in list {
            // Preferred: the canonical kebab-case contract.
            if let Ok(item) = serde_json::from_value::<Item>(entry.clone()) {
                if !item.id.trim().is_empty() && !item.owner_id.trim().is_empty() {
                    out.push(item);
                }
                continue;
            }

            // Defensive: accept snake_case variants observed from older
            // backend builds.
            let get_s = |k: &str| entry.get(k).and_then(|v| v.as_str()).map(|s| s.to_string());

            let id = get_s("id").unwrap_or_default();
            let owner_id = get_s("owner_id").unwrap_or_default();

            if !id.trim().is_empty() && !owner_id.trim().is_empty() {
                out.push(Item {
                    id,
                    owner_id,
                    name: get_s("name").unwrap_or_default(),
                    description: get_s("description").filter(|s| !s.trim().is_empty()),
                    created_at: get_s("created_at").unwrap_or_default(),
                    position: entry.get("position").and_then(|v| v.as_i64()),
                });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortDirection, SortField};

    #[test]
    fn test_api_client_new_has_no_token() {
        let client = ApiClient::new("http://localhost:7171".to_string());
        assert_eq!(client.base_url, "http://localhost:7171");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_api_client_set_token() {
        let mut client = ApiClient::new("http://localhost:7171".to_string());
        client.set_token("test-token".to_string());
        assert_eq!(client.get_auth_token().as_deref(), Some("test-token"));
        assert!(client.is_authenticated());
    }

    #[test]
    fn test_list_items_request_wire_format() {
        let req = ListItemsRequest {
            owner_id: "acc-1".to_string(),
            order_by: SortField::CreatedAt.to_string(),
            direction: SortDirection::Desc.to_string(),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["owner-id"], "acc-1");
        assert_eq!(v["order-by"], "created-at");
        assert_eq!(v["direction"], "desc");
    }

    #[test]
    fn test_insert_item_request_omits_empty_description_and_position() {
        let req = InsertItemRequest {
            owner_id: "acc-1".to_string(),
            name: "Buy milk".to_string(),
            description: None,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert!(v.get("description").is_none());
        assert!(v.get("position").is_none());
    }

    #[test]
    fn test_update_position_request_is_scoped_by_id_and_owner() {
        let req = UpdateItemPositionRequest {
            id: "it-1".to_string(),
            owner_id: "acc-1".to_string(),
            position: 2000,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["id"], "it-1");
        assert_eq!(v["owner-id"], "acc-1");
        assert_eq!(v["position"], 2000);
    }

    #[test]
    fn test_parse_item_list_canonical_shape() {
        let data = serde_json::json!({
            "item-list": [
                {"id": "it-1", "owner-id": "acc-1", "name": "A", "position": 0},
                {"id": "it-2", "owner-id": "acc-1", "name": "B"}
            ]
        });
        let items = ApiClient::parse_item_list_response(data);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].position, Some(0));
        assert!(items[1].position.is_none());
    }

    #[test]
    fn test_parse_item_list_accepts_snake_case_fallback() {
        let data = serde_json::json!({
            "item-list": [
                {"id": "it-1", "owner_id": "acc-1", "name": "A", "created_at": "t", "position": 5}
            ]
        });
        let items = ApiClient::parse_item_list_response(data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].owner_id, "acc-1");
        assert_eq!(items[0].created_at, "t");
        assert_eq!(items[0].position, Some(5));
    }

    #[test]
    fn test_parse_item_list_skips_rows_missing_identity() {
        let data = serde_json::json!({
            "item-list": [
                {"id": "", "owner-id": "acc-1", "name": "no id"},
                {"name": "no ids at all"},
                {"id": "it-2", "owner-id": "acc-1", "name": "ok"}
            ]
        });
        let items = ApiClient::parse_item_list_response(data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "it-2");
    }

    #[test]
    fn test_parse_item_list_tolerates_missing_list_key() {
        let items = ApiClient::parse_item_list_response(serde_json::json!({}));
        assert!(items.is_empty());
    }

    #[test]
    fn test_login_response_contract_deserialize() {
        let json = r#"{
            "token": "jwt-token",
            "account": {"id": "acc-1", "email": "u@example.com", "role": "user"}
        }"#;
        let parsed: LoginResponse = serde_json::from_str(json).expect("login response should parse");
        assert_eq!(parsed.token, "jwt-token");
        assert_eq!(parsed.account.id, "acc-1");
        assert_eq!(parsed.account.extra["role"], "user");
    }
}
