// Data models

pub mod form;
pub mod requests;
pub mod responses;
