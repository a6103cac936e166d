//! 浏览器 API 封装模块
//!
//! 核心库只认识 `HttpClient`、`Storage`、`Scheduler` 三个 trait，
//! 这里是它们在浏览器里的实现，外加基于 History API 的路由。

mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::BrowserHttpClient;
pub use storage::BrowserStorage;
pub use timer::BrowserScheduler;
