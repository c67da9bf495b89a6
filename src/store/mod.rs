mod movie_info;
mod review;

pub use movie_info::MovieInfoStore;
pub use review::ReviewStore;

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
