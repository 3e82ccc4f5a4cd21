pub mod health;
pub mod event;
pub mod form_config;
pub mod form_question;
pub mod participant;
pub mod venue;
pub mod matching;
