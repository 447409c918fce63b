pub mod conf;
pub mod resolve;
