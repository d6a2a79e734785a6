//! 浏览器 HTTP 传输层
//!
//! 使用 `web_sys::fetch` 实现核心库的 `HttpClient`，非 2xx 状态原样返回，
//! 只有请求未能送达时才报错。

use flightontime::error::{ClientError, ClientResult};
use flightontime::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 基于 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| ClientError::network(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::network(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ClientError::network(format!("请求构建失败: {:?}", e)))?;

        let window = web_sys::window()
            .ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::network(format!("网络错误: {:?}", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ClientError::network(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let body = read_text(&response).await?;

        Ok(HttpResponse { status, body })
    }
}

/// 读取响应体文本（204 等空响应返回空字符串）
async fn read_text(response: &Response) -> ClientResult<String> {
    let promise = response
        .text()
        .map_err(|e| ClientError::network(format!("读取响应失败: {:?}", e)))?;

    let text = JsFuture::from(promise)
        .await
        .map_err(|e| ClientError::network(format!("读取响应失败: {:?}", e)))?;

    Ok(text.as_string().unwrap_or_default())
}
