mod log;

pub use log::LogControllerDecorator;
