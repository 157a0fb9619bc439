// Library for tests to access modules

pub mod aggregator;
pub mod click_through;
pub mod config;
pub mod hover;
pub mod models;
pub mod net_repo;
pub mod pointer;
pub mod renderer;
pub mod scheduler;
pub mod sensor_repo;
pub mod version;
