pub mod movie_info;
pub mod review;
