pub mod add_token_modal;
pub mod app;
pub mod character_panel;
pub mod drawing_panel;
pub mod exit_overlay;
pub mod home_view;
pub mod settings_modal;
pub mod toolbar;
pub mod zone_view;

pub use app::App;
