pub mod entity;
pub mod form;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
