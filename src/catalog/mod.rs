pub mod faker;
pub mod field_kind;
pub mod generator;
pub mod test_case;
