pub mod customer;
pub mod profile;
