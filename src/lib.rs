// Library for tests to access modules

pub mod config;
pub mod disk_repo;
pub mod history_repo;
pub mod models;
pub mod patterns;
pub mod report;
pub mod report_worker;
pub mod routes;
pub mod survey;
pub mod units;
pub mod version;
