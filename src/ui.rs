pub mod layout_hud;
