// file: src/currency/mod.rs
// description: currency conversion module exports
// reference: internal module structure

pub mod converter;

pub use converter::{BASE_CURRENCY, CurrencyConverter};
