//! 后端 API 客户端
//!
//! 每个后端地址只构造一个 `ApiClient`，请求管线为：
//! 构建请求 -> 拦截器 (注入 Bearer token) -> 传输层发送 -> 状态检查 -> JSON 解码。

mod interceptor;

pub use interceptor::{BearerAuth, RequestInterceptor};

use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::web::{FetchTransport, HttpError, HttpRequest, HttpResponse, HttpTransport};
use leptos::prelude::*;
use std::sync::Arc;
use tripdiary_shared::protocol::ApiRequest;

#[derive(Clone)]
pub struct ApiClient<T = FetchTransport> {
    base_url: String,
    transport: T,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            interceptors: Vec::new(),
        }
    }

    /// 追加一个拦截器，按添加顺序执行
    pub fn with_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[allow(dead_code)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str, query: &[(&'static str, String)]) -> String {
        let mut url = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// 由接口定义构建请求（尚未经过拦截器）
    pub fn build<R: ApiRequest>(&self, request: &R) -> Result<HttpRequest, HttpError> {
        let url = self.url(&request.path(), &request.query());
        let req = HttpRequest::new(&url, R::METHOD);

        if R::METHOD.has_body() {
            let body = serde_json::to_string(request)
                .map_err(|e| HttpError::RequestBuild(e.to_string()))?;
            Ok(req
                .with_header("Content-Type", "application/json")
                .with_body(body))
        } else {
            Ok(req)
        }
    }

    /// 执行拦截器并发送请求
    ///
    /// 拦截器或传输层构造请求时的错误不做包装、不重试，直接返回。
    pub async fn execute(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut req = req;
        for interceptor in &self.interceptors {
            req = interceptor.on_request(req)?;
        }

        log::debug!("[Api] {} {}", req.method.as_str(), req.url);
        self.transport.send(req).await
    }

    /// 调用一个类型化接口
    pub async fn call<R: ApiRequest>(&self, request: &R) -> Result<R::Response, HttpError> {
        let req = self.build(request)?;
        let res = self.execute(req).await?;

        if !res.ok() {
            let detail = res.error_detail();
            log::warn!("[Api] {} failed: {} {}", request.path(), res.status, detail);
            return Err(HttpError::Status {
                status: res.status,
                detail,
            });
        }

        res.json::<R::Response>()
    }
}

/// 应用使用的两个客户端
///
/// - `backend`: 主后端
/// - `ai`: 生成式 AI 接口（经开发代理转发）
#[derive(Clone)]
pub struct ApiClients {
    pub backend: ApiClient,
    pub ai: ApiClient,
}

impl ApiClients {
    /// 按配置构造客户端，两者都注入同一会话的 Bearer 鉴权
    pub fn new(config: &AppConfig, session: SessionStore) -> Self {
        Self {
            backend: ApiClient::new(config.api_base_url.clone(), FetchTransport)
                .with_interceptor(BearerAuth::new(session)),
            ai: ApiClient::new(config.ai_base_url.clone(), FetchTransport)
                .with_interceptor(BearerAuth::new(session)),
        }
    }
}

/// 创建客户端并提供到 Context
pub fn provide_api(config: &AppConfig, session: SessionStore) -> ApiClients {
    let clients = ApiClients::new(config, session);
    provide_context(clients.clone());
    clients
}

/// 从 Context 获取客户端
pub fn use_api() -> ApiClients {
    use_context::<ApiClients>().expect("ApiClients should be provided")
}

#[cfg(test)]
mod tests;
