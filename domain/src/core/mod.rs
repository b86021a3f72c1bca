//! Core domain types shared across the debate engine

pub mod error;
pub mod model;
pub mod question;
pub mod string;
