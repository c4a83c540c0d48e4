//! Virtual document reconstruction.
//!
//! Records are resolved to a group key ([`group`]), partitioned into
//! [`VirtualDocument`]s ([`aggregate`]), classified ([`classify`]) and
//! summarized per collection ([`summary`]).

pub mod aggregate;
pub mod classify;
pub mod group;
pub mod summary;

pub use aggregate::{VirtualDocument, aggregate};
pub use classify::{Kind, classify, is_image_record};
pub use group::{FALLBACK_GROUP_KEY, Resolution, resolve};
pub use summary::VirtualSummary;

/// Name of the image collection paired with a text collection.
///
/// `FooDocs` pairs with `FooImages`; names that already look like image
/// collections pair with themselves.
#[must_use]
pub fn paired_image_collection(name: &str) -> String {
    const IMAGE_SUFFIXES: [&str; 4] = ["Images", "Image", "images", "image"];

    if IMAGE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return name.to_string();
    }
    if let Some(stem) = name.strip_suffix("Docs") {
        return format!("{stem}Images");
    }
    if let Some(stem) = name.strip_suffix("docs") {
        return format!("{stem}images");
    }
    format!("{name}Images")
}
