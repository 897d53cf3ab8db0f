pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod storage;
pub mod task_api;
pub mod view;
