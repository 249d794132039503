pub mod example;
pub mod links;
pub mod recent;
pub mod resolve;
pub mod view;
