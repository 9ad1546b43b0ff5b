pub mod archery_field;
pub mod filter_panel;
pub mod history_panel;
