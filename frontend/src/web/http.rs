//! HTTP 传输层
//!
//! 用 `gloo-net` 的 fetch 封装实现核心库的 [`HttpClient`]。
//! 只负责把请求发出去、把状态码和响应体原样带回来，状态码的解释交给 `ApiClient`。

use gloo_net::http::{Request, RequestBuilder};
use pixshare::{ApiError, ApiResponse, HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResponse<HttpResponse> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("请求构建失败: {}", e)))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("网络错误: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("读取响应体失败: {}", e)).with_status(status))?;

        Ok(HttpResponse::new(status, body))
    }
}
