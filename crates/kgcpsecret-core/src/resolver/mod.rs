//! Scoped secret resolution
//!
//! The pipeline for one run, leaf first:
//! 1. `candidates`: qualified names to try for a logical key, most specific first
//! 2. `resolve_value`: first candidate in the inventory that fetches non-empty
//! 3. `transform`: raw value to base64 `data` entries (plain, or a KEY=VALUE
//!    block read by `parse_env_block`)
//! 4. `SecretAssembler`: all keys of a request merged into a `Secret`

mod key_matcher;
mod value_resolver;
mod env_block;
mod transformer;
mod assembler;

pub use key_matcher::{candidates, Candidates};
pub use value_resolver::resolve_value;
pub use env_block::{parse_env_block, EnvBlockError};
pub use transformer::{encode_value, transform};
pub use assembler::{annotations_for, SecretAssembler, BEHAVIOR_ANNOTATION, NEEDS_HASH_ANNOTATION};
