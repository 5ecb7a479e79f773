pub mod constituent_import;
pub mod ingest_service;
pub mod price_service;
pub mod search_index;
pub mod summary;
