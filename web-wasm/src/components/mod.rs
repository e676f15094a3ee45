pub mod header;
pub mod image_uploader;
pub mod plant_details;
pub mod settings_panel;
pub mod spinner;
