pub mod http;
pub mod stub;
