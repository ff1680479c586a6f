//! Build artifact serialization

pub mod output_data;
pub mod output_operations;

pub use output_data::{IdentifierFormat, IdentifierListing, OutputFiles, WrittenOutputs};
pub use output_operations::{
    generate_identifier_listing, is_cpp_reserved, mapping_to_json, registry_to_json,
    validate_listing_names, write_outputs,
};
