pub mod ledger;
pub mod tenant;
pub mod user;
