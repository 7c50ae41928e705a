pub mod action;
pub mod fetch;
pub mod module;
pub mod pagination;
pub mod route;
pub mod units;

pub use action::{Action, NotifyLevel};
pub use fetch::{Fetch, FetchState, RequestId, RequestSeq};
pub use module::Module;
pub use pagination::Pagination;
pub use route::Route;
