#![forbid(unsafe_code)]

mod cache;
mod pattern;
mod router;
mod segment;
mod table;
mod vars;

pub use self::router::{Router, RouterError};
pub use self::vars::PathVars;

pub use http::Method;
