pub mod dispatcher;
pub mod issuer;
pub mod proc_loader;
pub mod proc_validator;
pub mod resolver;
pub mod settings;
pub mod types;
