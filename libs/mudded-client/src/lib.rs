pub mod contracts;
pub mod ops;
pub mod provider;
pub mod state;
pub mod view;
