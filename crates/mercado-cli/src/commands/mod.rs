pub mod migrate;
pub mod notify;
