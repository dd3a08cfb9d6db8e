pub mod card_grid;
pub mod controls;
pub mod detail_overlay;
pub mod help_overlay;
pub mod preview_card;
