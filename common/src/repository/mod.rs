pub mod index_trait;
pub mod index_util;
pub mod repository_util;
