//! Domain types: line items, payin bands, lines of business and the rule table.

pub mod line_item;
pub mod line_of_business;
pub mod payin;
pub mod ports;
pub mod rule;
