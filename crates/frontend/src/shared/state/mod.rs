pub mod form_store;
