pub mod error;
pub mod response;
pub mod tree;
pub mod value;

pub use error::DialogueError;
pub use response::*;
pub use tree::*;
pub use value::*;
