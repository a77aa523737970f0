//! Resume field extraction: uploaded document → plain text → contact fields,
//! profile links and recognizer-selected entities.

pub mod contact;
pub mod documents;
pub mod entities;
pub mod extract;
pub mod handlers;
pub mod links;
