//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 发送共享层构造好的 `HttpRequest`。
//! 只关心请求能否送达；状态码的含义由共享层的客户端解释。

use goalpad_shared::{HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// fetch 失败的原因
#[derive(Debug)]
pub enum FetchError {
    /// 请求构建失败
    Build(String),
    /// 请求没有得到响应（离线、CORS、DNS 等）
    Network(String),
    /// 响应体读取失败
    Body(String),
}

impl core::fmt::Display for FetchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FetchError::Build(msg) => write!(f, "failed to build request: {}", msg),
            FetchError::Network(msg) => write!(f, "network error: {}", msg),
            FetchError::Body(msg) => write!(f, "failed to read response body: {}", msg),
        }
    }
}

fn build_request(req: &HttpRequest) -> Result<Request, FetchError> {
    let headers = Headers::new().map_err(|e| FetchError::Build(format!("{:?}", e)))?;
    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| FetchError::Build(format!("header {}: {:?}", key, e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());
    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    Request::new_with_str_and_init(&req.url, &opts)
        .map_err(|e| FetchError::Build(format!("{:?}", e)))
}

async fn read_text(resp: &Response) -> Result<String, FetchError> {
    let promise = resp.text().map_err(|e| FetchError::Body(format!("{:?}", e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| FetchError::Body(format!("{:?}", e)))?;
    text.as_string()
        .ok_or_else(|| FetchError::Body("body is not a string".to_string()))
}

/// 发送请求并读取完整响应体
pub async fn fetch(req: &HttpRequest) -> Result<HttpResponse, FetchError> {
    let request = build_request(req)?;

    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| FetchError::Network(format!("{:?}", e)))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|e| FetchError::Body(format!("unexpected fetch result: {:?}", e)))?;

    let status = response.status();
    let body = read_text(&response).await?;
    Ok(HttpResponse { status, body })
}
