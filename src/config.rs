//! 运行配置
//!
//! 后端地址在构建时确定，可以通过环境变量 `TRIPDIARY_API_BASE`、
//! `TRIPDIARY_AI_BASE` 覆盖（例如 `TRIPDIARY_API_BASE=https://api.example.com trunk build`）。

/// 这些是默认值，构建环境中没有设置对应变量时使用
const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// 生成式 AI 接口走开发服务器代理，代理会去掉该前缀后转发到后端
const DEFAULT_AI_BASE: &str = "/AIGen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub ai_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_overrides(None, None)
    }
}

impl AppConfig {
    /// 读取构建时环境变量
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("TRIPDIARY_API_BASE"),
            option_env!("TRIPDIARY_AI_BASE"),
        )
    }

    fn with_overrides(api_base: Option<&str>, ai_base: Option<&str>) -> Self {
        let pick = |value: Option<&str>, default: &str| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };

        Self {
            api_base_url: pick(api_base, DEFAULT_API_BASE),
            ai_base_url: pick(ai_base, DEFAULT_AI_BASE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.ai_base_url, "/AIGen");
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let config = AppConfig::with_overrides(Some("https://api.example.com"), Some("  "));
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.ai_base_url, "/AIGen");
    }
}
