// Library for tests to access modules

pub mod config;
pub mod dashboard;
pub mod format;
pub mod history;
pub mod models;
pub mod netinfo;
pub mod render;
pub mod sampler;
pub mod version;
