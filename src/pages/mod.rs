pub mod base_page;
pub mod routes;
pub mod web_tables_page;
