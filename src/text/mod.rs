pub mod escape;

pub use escape::{append_escaped, append_quoted, append_quoted_str, escape, is_safe};
