//! 请求拦截器
//!
//! 拦截器在客户端构造时组合进请求管线，每次发送前按顺序执行。
//! 返回 `Err` 会终止本次请求，错误原样交给调用方。

use crate::session::SessionStore;
use crate::web::{HttpError, HttpRequest};
use tripdiary_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};

pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, req: HttpRequest) -> Result<HttpRequest, HttpError>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(HttpRequest) -> Result<HttpRequest, HttpError> + Send + Sync,
{
    fn on_request(&self, req: HttpRequest) -> Result<HttpRequest, HttpError> {
        self(req)
    }
}

/// Bearer 鉴权
///
/// 每次请求时读取会话中的当前 token；没有 token 时不修改请求头，请求照常发出。
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth {
    session: SessionStore,
}

impl BearerAuth {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, req: HttpRequest) -> Result<HttpRequest, HttpError> {
        match self.session.token() {
            Some(token) => {
                let value = format!("{}{}", BEARER_PREFIX, token);
                Ok(req.with_header(HEADER_AUTHORIZATION, &value))
            }
            None => Ok(req),
        }
    }
}
