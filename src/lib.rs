pub mod assets;
pub mod config;
pub mod content;
pub mod logger;
pub mod site_builder;
pub mod site_config;
pub mod text_utils;
pub mod view;
mod test_data;
