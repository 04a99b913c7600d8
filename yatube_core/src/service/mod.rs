pub mod authors;
pub mod authorship;
pub mod comments;
pub mod groups;
pub mod listings;
pub mod posts;
