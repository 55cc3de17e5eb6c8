//! Extraction of loosely-typed records from uploaded bytes.
//!
//! Most callers go through [`crate::analyzer::analyze`]. The extraction stage on its own is
//! [`extract_dataset`] (from [`unified`]), which:
//!
//! - picks a [`SourceFormat`] from the declared media type and file name
//! - runs the matching extractor
//! - degrades format failures into a single diagnostic record
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`excel`] (Cargo feature `excel`)
//! - [`pdf`]
//! - [`text`]

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod pdf;
pub mod text;
pub mod unified;

pub use unified::{Extraction, SourceFormat, diagnostic_record, extract_dataset};

/// Make header names unique: a repeated name gets `_1`, `_2`, ... appended, skipping any name
/// already taken.
pub(crate) fn unique_header_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for base in names {
        let mut name = base.clone();
        let mut suffix = 1;
        while unique.contains(&name) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        unique.push(name);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::unique_header_names;

    #[test]
    fn repeated_header_names_get_numeric_suffixes() {
        let names = ["id", "id", "id_1", "id", "x"].map(String::from);
        assert_eq!(unique_header_names(names), vec!["id", "id_1", "id_1_1", "id_2", "x"]);
    }
}
