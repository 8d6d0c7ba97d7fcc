pub mod join_index;

pub use join_index::JoinIndex;
