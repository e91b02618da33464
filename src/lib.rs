// Weather preference evaluation - library root
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
