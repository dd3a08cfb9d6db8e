pub mod pane_chrome;
pub mod popup;
pub mod search_input;
pub mod status_bar;
