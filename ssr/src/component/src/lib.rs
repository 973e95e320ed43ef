pub mod catalog;
pub mod popup;
pub mod section;
pub mod video_player;
