pub mod api;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod ledger;
pub mod observability;
pub mod worker;
