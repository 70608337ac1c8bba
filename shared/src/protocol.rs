use crate::{
    DiaryList, MessageResponse, RecommendResponse, SortOrder, Spot, SpotSortKey, UserResponse,
    UserUpdate,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 该方法的请求是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the client's base address. Path parameters are already encoded.
    fn path(&self) -> String;
    /// Query parameters, encoded by the client.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// 编码单个路径段 (景点名、用户名可能包含中文或空格)
fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

// =========================================================
// 用户接口 (Users)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for RegisterRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/register".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应：用户信息，部分后端版本额外携带 token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    #[serde(default)]
    pub token: Option<String>,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/login".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetailsRequest {
    #[serde(skip)]
    pub username: String,
}

impl ApiRequest for UserDetailsRequest {
    type Response = UserResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/users/{}/details", segment(&self.username))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip)]
    pub username: String,
    #[serde(flatten)]
    pub update: UserUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub message: String,
    pub user: UserResponse,
}

impl ApiRequest for UpdateUserRequest {
    type Response = UpdateUserResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/users/{}/details", segment(&self.username))
    }
}

// =========================================================
// 景点接口 (Spots)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotRequest {
    #[serde(skip)]
    pub name: String,
}

impl ApiRequest for SpotRequest {
    type Response = Spot;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/spots/{}", segment(&self.name))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSpotsRequest {
    pub sort_key: SpotSortKey,
    pub sort_order: SortOrder,
}

impl ApiRequest for ListSpotsRequest {
    type Response = Vec<Spot>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/spots/".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort_key", self.sort_key.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotsByTagRequest {
    pub tag: String,
}

impl ApiRequest for SpotsByTagRequest {
    type Response = Vec<Spot>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/spots/tag/".to_string()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("tag", self.tag.clone())]
    }
}

// =========================================================
// 日记接口 (Diaries)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiarySortKey {
    #[default]
    Id,
    Date,
    Title,
    Rating,
    Views,
}

impl DiarySortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiarySortKey::Id => "id",
            DiarySortKey::Date => "date",
            DiarySortKey::Title => "title",
            DiarySortKey::Rating => "rating",
            DiarySortKey::Views => "views",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDiariesRequest {
    #[serde(skip)]
    pub username: String,
    pub sort_key: DiarySortKey,
    pub sort_order: SortOrder,
}

impl ListDiariesRequest {
    /// 按默认排序 (id 降序) 查询指定用户的日记
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            sort_key: DiarySortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ApiRequest for ListDiariesRequest {
    type Response = DiaryList;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/diaries/{}", segment(&self.username))
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sort_key", self.sort_key.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ]
    }
}

/// 日记内容 (新增与更新共用)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryDraft {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// 新增日记，服务端分配 id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddDiaryRequest(pub DiaryDraft);

impl AddDiaryRequest {
    pub fn new(mut draft: DiaryDraft) -> Self {
        draft.id = None;
        Self(draft)
    }
}

impl ApiRequest for AddDiaryRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/diaries".to_string()
    }
}

/// 更新已有日记，必须携带 id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateDiaryRequest(pub DiaryDraft);

impl UpdateDiaryRequest {
    pub fn new(id: i64, mut draft: DiaryDraft) -> Self {
        draft.id = Some(id);
        Self(draft)
    }
}

impl ApiRequest for UpdateDiaryRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        "/diaries".to_string()
    }
}

// =========================================================
// 推荐接口 (Recommend)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(skip)]
    pub username: String,
}

impl ApiRequest for RecommendRequest {
    type Response = RecommendResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/recommend/{}", segment(&self.username))
    }
}

// =========================================================
// 生成式 AI 接口 (经开发代理 /AIGen 转发)
// =========================================================

fn default_quality() -> String {
    "speed".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextToVideoRequest {
    pub username: String,
    pub diary_id: i64,
    pub prompt: String,
    #[serde(default = "default_quality")]
    pub quality: String,
}

impl ApiRequest for TextToVideoRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/text_generate_video".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageToVideoRequest {
    pub username: String,
    pub diary_id: i64,
    pub prompt: String,
    pub image_url: String,
    #[serde(default = "default_quality")]
    pub quality: String,
}

impl ApiRequest for ImageToVideoRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/image_generate_video".to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStatusRequest {}

impl ApiRequest for VideoStatusRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/check_video_status".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_parameters_are_encoded() {
        let req = SpotRequest {
            name: "故宫 博物院".to_string(),
        };
        assert_eq!(
            req.path(),
            "/spots/%E6%95%85%E5%AE%AB%20%E5%8D%9A%E7%89%A9%E9%99%A2"
        );

        let req = UserDetailsRequest {
            username: "alice".to_string(),
        };
        assert_eq!(req.path(), "/users/alice/details");
    }

    #[test]
    fn test_list_diaries_defaults_to_id_desc() {
        let req = ListDiariesRequest::for_user(crate::ALL_USERS);
        assert_eq!(req.path(), "/diaries/__all__");
        assert_eq!(
            req.query(),
            vec![("sort_key", "id".to_string()), ("sort_order", "desc".to_string())]
        );
    }

    #[test]
    fn test_update_user_body_omits_username() {
        let req = UpdateUserRequest {
            username: "alice".to_string(),
            update: UserUpdate {
                hobbies: Some(vec!["hiking".to_string()]),
                ..Default::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"hobbies": ["hiking"]})
        );
    }

    #[test]
    fn test_diary_requests_control_id() {
        let draft = DiaryDraft {
            username: "alice".to_string(),
            id: Some(9),
            title: "t".to_string(),
            content: "c".to_string(),
            ..Default::default()
        };

        let add = AddDiaryRequest::new(draft.clone());
        assert!(serde_json::to_value(&add).unwrap().get("id").is_none());

        let update = UpdateDiaryRequest::new(42, draft);
        assert_eq!(serde_json::to_value(&update).unwrap()["id"], json!(42));
    }

    #[test]
    fn test_image_to_video_request_body_and_default_quality() {
        let req: ImageToVideoRequest = serde_json::from_value(json!({
            "username": "alice",
            "diary_id": 7,
            "prompt": "sunset over the lake",
            "image_url": "/static/lake.jpg"
        }))
        .unwrap();
        assert_eq!(req.quality, "speed");
        assert_eq!(req.path(), "/image_generate_video");
        assert_eq!(ImageToVideoRequest::METHOD, HttpMethod::Post);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "username": "alice",
                "diary_id": 7,
                "prompt": "sunset over the lake",
                "image_url": "/static/lake.jpg",
                "quality": "speed"
            })
        );
    }

    #[test]
    fn test_login_response_with_and_without_token() {
        let plain: LoginResponse = serde_json::from_value(json!({
            "id": 1, "username": "alice", "role": "user"
        }))
        .unwrap();
        assert_eq!(plain.token, None);

        let with_token: LoginResponse = serde_json::from_value(json!({
            "id": 1, "username": "alice", "role": "user", "token": "abc123"
        }))
        .unwrap();
        assert_eq!(with_token.token.as_deref(), Some("abc123"));
        assert_eq!(with_token.user.username, "alice");
    }

    #[test]
    fn test_only_post_and_put_carry_bodies() {
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
    }
}
