mod gate;
mod profile;
mod routes;
mod selection;
mod telemetry;
mod views;

#[cfg(test)]
mod test_support;

pub mod app;
pub mod config;
mod server;

pub use app::start_app;
