//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的数据与匹配逻辑，不依赖于 DOM 或 web_sys。
//! 路由表是静态声明的 `(pattern, name)` 列表；pattern 中以 `:` 开头的段是命名参数，
//! 其余为字面量。匹配规则：按表顺序取第一个段数相同且字面量全部相等的条目。

use std::collections::BTreeMap;
use std::fmt::Display;

/// 路由表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub name: &'static str,
}

/// 应用路由表
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        pattern: "/Recommend",
        name: "Recommend",
    },
    RouteEntry {
        pattern: "/Plan",
        name: "Plan",
    },
    RouteEntry {
        pattern: "/Diary",
        name: "Diary",
    },
    RouteEntry {
        pattern: "/LoginRegister",
        name: "LoginRegister",
    },
    RouteEntry {
        pattern: "/CustomMap",
        name: "CustomMap",
    },
    RouteEntry {
        pattern: "/SpotDetail/:name",
        name: "SpotDetail",
    },
    RouteEntry {
        pattern: "/DiaryDetail/:id",
        name: "DiaryDetail",
    },
];

/// 匹配结果：路由名与提取出的命名参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub params: BTreeMap<&'static str, String>,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// 按 `/` 切分路径，忽略空段（前导、末尾或重复的斜杠）以及查询串
fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split('?').next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty())
}

impl RouteEntry {
    pub fn matches(&self, path: &str) -> Option<RouteMatch> {
        let pattern: Vec<&'static str> = segments(self.pattern).collect();
        let actual: Vec<&str> = segments(path).collect();

        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, got) in pattern.into_iter().zip(actual) {
            if let Some(key) = expected.strip_prefix(':') {
                // 非法的百分号编码 (如 `%FF`) 原样保留，由页面按普通文本处理
                let value = urlencoding::decode(got)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| got.to_string());
                params.insert(key, value);
            } else if expected != got {
                return None;
            }
        }

        Some(RouteMatch {
            name: self.name,
            params,
        })
    }
}

/// 在路由表中查找第一个匹配的条目
pub fn resolve(path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|entry| entry.matches(path))
}

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 推荐页 (默认路由)
    #[default]
    Recommend,
    Plan,
    Diary,
    LoginRegister,
    CustomMap,
    SpotDetail {
        name: String,
    },
    DiaryDetail {
        id: i64,
    },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        if segments(path).next().is_none() {
            return Self::default();
        }

        let Some(matched) = resolve(path) else {
            return Self::NotFound;
        };

        match matched.name {
            "Recommend" => Self::Recommend,
            "Plan" => Self::Plan,
            "Diary" => Self::Diary,
            "LoginRegister" => Self::LoginRegister,
            "CustomMap" => Self::CustomMap,
            "SpotDetail" => match matched.param("name") {
                Some(name) => Self::SpotDetail {
                    name: name.to_string(),
                },
                None => Self::NotFound,
            },
            "DiaryDetail" => match matched.param("id").and_then(|id| id.parse().ok()) {
                Some(id) => Self::DiaryDetail { id },
                None => Self::NotFound,
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Recommend => "/Recommend".to_string(),
            Self::Plan => "/Plan".to_string(),
            Self::Diary => "/Diary".to_string(),
            Self::LoginRegister => "/LoginRegister".to_string(),
            Self::CustomMap => "/CustomMap".to_string(),
            Self::SpotDetail { name } => format!("/SpotDetail/{}", urlencoding::encode(name)),
            Self::DiaryDetail { id } => format!("/DiaryDetail/{}", id),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 路由表中的名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Recommend => "Recommend",
            Self::Plan => "Plan",
            Self::Diary => "Diary",
            Self::LoginRegister => "LoginRegister",
            Self::CustomMap => "CustomMap",
            Self::SpotDetail { .. } => "SpotDetail",
            Self::DiaryDetail { .. } => "DiaryDetail",
            Self::NotFound => "NotFound",
        }
    }

    /// 已登录用户是否应该离开此路由（登录注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::LoginRegister)
    }

    /// 登录成功后的跳转目标
    pub fn auth_success_redirect() -> Self {
        Self::Recommend
    }

    /// 导航守卫：返回实际应当进入的路由
    ///
    /// 已登录用户访问登录注册页时改为跳转目标，其余路由原样返回。
    pub fn guard(self, is_authenticated: bool) -> Self {
        if is_authenticated && self.should_redirect_when_authenticated() {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_detail_captures_name() {
        let matched = resolve("/SpotDetail/Paris").unwrap();
        assert_eq!(matched.name, "SpotDetail");
        assert_eq!(matched.param("name"), Some("Paris"));
    }

    #[test]
    fn test_diary_detail_captures_id_as_text() {
        let matched = resolve("/DiaryDetail/42").unwrap();
        assert_eq!(matched.name, "DiaryDetail");
        assert_eq!(matched.param("id"), Some("42"));
    }

    #[test]
    fn test_static_routes_have_no_params() {
        for name in ["Recommend", "Plan", "Diary", "LoginRegister", "CustomMap"] {
            let matched = resolve(&format!("/{}", name)).unwrap();
            assert_eq!(matched.name, name);
            assert!(matched.params.is_empty());
        }
    }

    #[test]
    fn test_segment_count_must_match() {
        assert_eq!(resolve("/SpotDetail"), None);
        assert_eq!(resolve("/SpotDetail/Paris/extra"), None);
        assert_eq!(resolve("/Plan/1"), None);
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        assert_eq!(resolve("/plan"), None);
    }

    #[test]
    fn test_trailing_slash_and_query_are_ignored() {
        assert_eq!(resolve("/Diary/").unwrap().name, "Diary");
        assert_eq!(
            resolve("/SpotDetail/Paris?from=home").unwrap().param("name"),
            Some("Paris")
        );
    }

    #[test]
    fn test_captured_values_are_percent_decoded() {
        let matched = resolve("/SpotDetail/%E6%95%85%E5%AE%AB").unwrap();
        assert_eq!(matched.param("name"), Some("故宫"));
    }

    #[test]
    fn test_invalid_percent_encoding_is_kept_verbatim() {
        let matched = resolve("/SpotDetail/%FF").unwrap();
        assert_eq!(matched.param("name"), Some("%FF"));
        assert_eq!(
            AppRoute::from_path("/SpotDetail/%FF"),
            AppRoute::SpotDetail {
                name: "%FF".to_string()
            }
        );
    }

    #[test]
    fn test_guard_sends_authenticated_user_away_from_login() {
        assert_eq!(AppRoute::LoginRegister.guard(true), AppRoute::Recommend);
    }

    #[test]
    fn test_guard_keeps_login_page_for_guests() {
        assert_eq!(AppRoute::LoginRegister.guard(false), AppRoute::LoginRegister);
    }

    #[test]
    fn test_guard_leaves_other_routes_alone() {
        let routes = [
            AppRoute::Recommend,
            AppRoute::Plan,
            AppRoute::Diary,
            AppRoute::CustomMap,
            AppRoute::SpotDetail {
                name: "Paris".to_string(),
            },
            AppRoute::DiaryDetail { id: 42 },
            AppRoute::NotFound,
        ];
        for route in routes {
            assert_eq!(route.clone().guard(true), route);
            assert_eq!(route.clone().guard(false), route);
        }
    }

    #[test]
    fn test_app_route_from_path() {
        assert_eq!(AppRoute::from_path(""), AppRoute::Recommend);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Recommend);
        assert_eq!(AppRoute::from_path("/Plan"), AppRoute::Plan);
        assert_eq!(
            AppRoute::from_path("/SpotDetail/Paris"),
            AppRoute::SpotDetail {
                name: "Paris".to_string()
            }
        );
        assert_eq!(
            AppRoute::from_path("/DiaryDetail/42"),
            AppRoute::DiaryDetail { id: 42 }
        );
        assert_eq!(AppRoute::from_path("/DiaryDetail/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/nowhere"), AppRoute::NotFound);
    }

    #[test]
    fn test_to_path_resolves_back_to_same_route() {
        let routes = [
            AppRoute::Recommend,
            AppRoute::LoginRegister,
            AppRoute::SpotDetail {
                name: "故宫 博物院".to_string(),
            },
            AppRoute::DiaryDetail { id: 7 },
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn test_every_table_entry_maps_to_a_named_route() {
        for entry in ROUTES {
            let path = entry.pattern.replace(":name", "x").replace(":id", "1");
            assert_eq!(AppRoute::from_path(&path).name(), entry.name);
        }
    }
}
