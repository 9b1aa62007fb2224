mod create;

pub use create::{CreateArgs, create};
