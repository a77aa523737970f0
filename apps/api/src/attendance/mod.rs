//! Face-verified attendance: capture decoding, reference lookup, verification,
//! emotion tagging and append-only persistence.

pub mod capture;
pub mod handlers;
pub mod reference;
pub mod service;
pub mod store;
