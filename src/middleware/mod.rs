pub mod error_detail;
pub mod logging;

pub use error_detail::error_detail_middleware;
pub use logging::http_logging_middleware;
