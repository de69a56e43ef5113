//! 유스케이스 모음.

mod comic_page;
pub mod inspect_config;
pub mod make_comic;
pub mod segment_text;
