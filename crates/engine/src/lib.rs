pub mod charts;
pub mod dashboards;
pub mod domain;
pub mod pipeline;
pub mod projections;
pub mod shared;
pub mod usecases;
