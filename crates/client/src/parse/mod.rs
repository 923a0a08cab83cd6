//! HTML structure extraction for listing, movie, and subtitle pages.
//!
//! All functions here are synchronous: they take fetched document text,
//! query it with scraper selectors, and return owned data. The document
//! tree never crosses an await point.

pub mod listing;
pub mod movie;
pub mod subtitle;

pub use listing::extract_detail_pages;
pub use movie::parse_movie_page;
pub use subtitle::extract_archive_url;
