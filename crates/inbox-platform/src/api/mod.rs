pub mod rest;

pub use rest::RestInboxApi;
