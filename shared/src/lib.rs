use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 未登录时用户 id 的哨兵值
pub const UNAUTHENTICATED_ID: i64 = -1;

/// 查询全部用户日记时使用的特殊用户名
pub const ALL_USERS: &str = "__all__";

// =========================================================
// 用户模型 (User Models)
// =========================================================

/// 用户资料记录
///
/// 字段名与后端保持一致 (camelCase)。默认值即"未登录"状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub is_logged_in: bool,
    pub id: i64,
    pub username: String,
    pub avatar_path: String,
    pub role: String,
    pub signature: String,
    pub hobbies: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            is_logged_in: false,
            id: UNAUTHENTICATED_ID,
            username: String::new(),
            avatar_path: String::new(),
            role: String::new(),
            signature: String::new(),
            hobbies: Vec::new(),
        }
    }
}

impl UserProfile {
    /// 由后端返回的用户信息构造已登录的资料记录
    pub fn from_response(resp: UserResponse) -> Self {
        Self {
            is_logged_in: true,
            id: resp.id,
            username: resp.username,
            avatar_path: resp.avatar_path.unwrap_or_default(),
            role: resp.role,
            signature: resp.signature.unwrap_or_default(),
            hobbies: resp.hobbies.unwrap_or_default(),
        }
    }
}

/// 后端返回的用户信息 (可选字段可能缺失或为 null)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub avatar_path: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub hobbies: Option<Vec<String>>,
}

/// 用户资料更新内容，仅序列化实际设置的字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
}

/// 后端通用的 `{"message": ...}` 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================
// 景点模型 (Spot Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenHours {
    pub weekday: String,
    pub weekend: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub name: String,
    pub description: String,
    pub location: String,
    pub coordinates: Coordinates,
    pub rating: f64,
    pub popularity: i64,
    pub tags: Vec<String>,
    pub price_range: String,
    pub open_hours: OpenHours,
}

/// 景点排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpotSortKey {
    #[default]
    Rating,
    Popularity,
}

impl SpotSortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotSortKey::Rating => "rating",
            SpotSortKey::Popularity => "popularity",
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// =========================================================
// 日记模型 (Diary Models)
// =========================================================

/// 后端存储的日记条目
///
/// 存储文件里图片/视频字段名为 `image`/`video`，请求模型里为 `images`/`videos`，两者都接受。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    #[serde(default, alias = "image")]
    pub images: Vec<String>,
    #[serde(default, alias = "video")]
    pub videos: Vec<String>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryList {
    pub diaries: Vec<DiaryEntry>,
}

// =========================================================
// 推荐模型 (Recommendation Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendItem {
    pub item: serde_json::Value,
    pub match_score: f64,
    pub final_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub schools: Vec<RecommendItem>,
    pub scenic_spots: Vec<RecommendItem>,
    pub foods: Vec<RecommendItem>,
    pub diaries: Vec<RecommendItem>,
}
