pub mod common;

mod config_validation;
mod static_credentials;
mod trusted_params;
