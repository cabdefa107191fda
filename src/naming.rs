//! Identifier and module-path transforms shared by every stage of the
//! generator.

use crate::error::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// File extension of generated modules.
pub const MODULE_EXTENSION: &str = "hs";

/// Converts an underscore-delimited name to PascalCase.
///
/// Empty segments (leading, trailing or doubled underscores) are skipped.
///
/// ```
/// use aeson_infer::naming::pascal_case;
///
/// assert_eq!(pascal_case("user_id"), "UserId");
/// assert_eq!(pascal_case("id"), "Id");
/// assert_eq!(pascal_case("__private_"), "Private");
/// ```
pub fn pascal_case(s: &str) -> String {
    s.split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Drops one trailing `s`. There is no handling of irregular plurals.
///
/// ```
/// use aeson_infer::naming::singularize;
///
/// assert_eq!(singularize("users"), "user");
/// assert_eq!(singularize("data"), "data");
/// ```
pub fn singularize(s: &str) -> &str {
    s.strip_suffix('s').unwrap_or(s)
}

/// Maps a path-like string to a dotted module name under `prefix`.
///
/// The path is split on `/` and `.`, its first segment is dropped, and each
/// remaining non-empty segment is PascalCased.
///
/// ```
/// use aeson_infer::naming::path_to_module_name;
///
/// assert_eq!(
///     path_to_module_name("Slack", "/methods/users.list"),
///     "Slack.Methods.Users.List",
/// );
/// ```
pub fn path_to_module_name(prefix: &str, path: &str) -> String {
    let segments = path
        .split(['/', '.'])
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .map(pascal_case)
        .filter(|segment| !segment.is_empty());

    Some(prefix.to_owned())
        .filter(|prefix| !prefix.is_empty())
        .into_iter()
        .chain(segments)
        .collect::<Vec<_>>()
        .join(".")
}

/// Derives a module name from the path of a documentation URL.
pub fn module_name_from_doc_url(prefix: &str, doc_url: &str) -> Result<String> {
    let url = Url::parse(doc_url)?;
    let module_name = path_to_module_name(prefix, url.path());

    if module_name.is_empty() || module_name == prefix {
        return Err(Error::EmptyModulePath {
            url: doc_url.to_owned(),
        });
    }

    Ok(module_name)
}

/// Maps `A.B.C` to `A/B/C.hs`.
pub fn module_name_to_file_path(name: &str) -> PathBuf {
    let mut path: PathBuf = name.split('.').collect();
    path.set_extension(MODULE_EXTENSION);
    path
}
