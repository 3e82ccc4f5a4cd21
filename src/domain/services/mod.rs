pub mod catalog;
pub mod form_config;
pub mod form_view;
pub mod question_store;
pub mod renderer;
pub mod registration;
pub mod matchmaking;
