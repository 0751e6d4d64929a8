pub mod merge;

pub use merge::MergeIter;
