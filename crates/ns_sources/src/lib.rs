pub mod manager;
pub mod normalize;
pub mod providers;

pub use manager::NewsManager;
pub use normalize::normalize_record;
pub use providers::NewsProvider;

pub mod prelude {
    pub use super::providers::NewsProvider;
    pub use super::NewsManager;
    pub use ns_core::{Article, Error, NewsReport, Result};
}
