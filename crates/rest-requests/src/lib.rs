//! Asynchronous REST compatible requests.
//!
//! This crate issues a single HTTP request with a JSON payload and decodes
//! a JSON or plain-text response. It supports the basic HTTP methods,
//! optional headers, SOCKS/HTTP proxying, per-phase timeouts and a dry-run
//! mode that skips the network entirely. There is no retry policy and no
//! connection reuse across calls; every call owns its own client.
//!
//! # Example
//!
//! ```no_run
//! use rest_requests::{request, RequestMethod, ResponseBody};
//! use serde_json::json;
//!
//! async fn submit_job() -> Result<(), rest_requests::Error> {
//!     let response = request(RequestMethod::Post, "http://localhost:6820/slurm/v0.0.40/job/submit")
//!         .header("X-SLURM-USER-TOKEN", "token")
//!         .body(json!({"job": {"name": "example"}}))
//!         .send()
//!         .await?;
//!
//!     match response {
//!         ResponseBody::Json(value) => println!("{value}"),
//!         ResponseBody::Text(text) => println!("{text}"),
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod method;
mod request;
mod response;

pub use error::Error;
pub use method::RequestMethod;
pub use request::{request, Request, DEFAULT_TIMEOUT_SECS};
pub use response::ResponseBody;
