pub mod events;
pub mod service_flow;
pub mod view;
