pub mod audit_log;
pub mod contract;
pub mod customer;
pub mod fields;
pub mod filter;
pub mod functionality;
pub mod page;
pub mod role;
pub mod types;
pub mod user;
