//! HTTP 请求封装模块
//!
//! 请求在发出之前是纯数据 (`HttpRequest`)，拦截器可以在其上修改请求头；
//! 真正的网络发送通过 `HttpTransport` trait 抽象，生产环境使用 `gloo-net`，
//! 测试环境使用 `MockTransport`。

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tripdiary_shared::protocol::HttpMethod;

#[cfg(test)]
use std::cell::RefCell;

/// HTTP 错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// 请求构建失败 (序列化、拦截器、请求对象构造)
    #[error("请求构建失败: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("网络错误: {0}")]
    Network(String),
    /// 服务端返回非 2xx 状态
    #[error("请求失败 ({status}): {detail}")]
    Status { status: u16, detail: String },
    /// 响应解析失败
    #[error("响应解析失败: {0}")]
    Decode(String),
}

/// 发出前的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    #[allow(dead_code)]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

/// 已读取完毕的响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// 失败响应的错误描述
    ///
    /// 后端的错误体形如 `{"detail": "..."}`，取出其中的 detail；否则使用原始文本。
    pub fn error_detail(&self) -> String {
        serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| self.body.clone())
    }
}

#[async_trait::async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// =========================================================
// 实现层: 浏览器 fetch (gloo-net)
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        use gloo_net::http::Request;

        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| HttpError::RequestBuild(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 测试工具: MockTransport
// =========================================================

#[cfg(test)]
pub struct MockTransport {
    // URL -> (Status, Response Body)
    responses: RefCell<HashMap<String, (u16, String)>>,
    /// 记录发出的请求
    pub requests: RefCell<Vec<HttpRequest>>,
    /// 设置后 send 直接返回该错误
    pub fail_with: RefCell<Option<HttpError>>,
}

#[cfg(test)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
            fail_with: RefCell::new(None),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = req.url.clone();
        self.requests.borrow_mut().push(req);

        if let Some(err) = self.fail_with.borrow().clone() {
            return Err(err);
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&url) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: r#"{"detail":"Not Found"}"#.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok_range() {
        let resp = |status| HttpResponse {
            status,
            body: String::new(),
        };
        assert!(resp(200).ok());
        assert!(resp(204).ok());
        assert!(!resp(302).ok());
        assert!(!resp(400).ok());
    }

    #[test]
    fn test_error_detail_prefers_detail_field() {
        let resp = HttpResponse {
            status: 400,
            body: r#"{"detail":"用户名已存在"}"#.to_string(),
        };
        assert_eq!(resp.error_detail(), "用户名已存在");

        let resp = HttpResponse {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(resp.error_detail(), "Internal Server Error");
    }

    #[test]
    fn test_json_decode_error() {
        let resp = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        let result: Result<serde_json::Value, _> = resp.json();
        assert!(matches!(result, Err(HttpError::Decode(_))));
    }
}
