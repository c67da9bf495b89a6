pub mod movie_info;
pub mod movies;
pub mod review;
