//! Style rules, declaration merging, typed values, and the cascade.

pub mod cascade;
pub mod declarations;
pub mod default;
pub mod rule;
pub mod values;
