//! Field visibility encoded in stored object field names.
//!
//! Object snapshots keep each instance field under a stored name that also
//! records where the field was declared:
//!
//! | Declared as             | Stored name        |
//! |-------------------------|--------------------|
//! | `public $name`          | `name`             |
//! | `protected $name`       | `\0*\0name`        |
//! | `private $name` in `C`  | `\0C\0name`        |
//!
//! [`Visibility::mangle`] produces these names and [`classify`] reads them
//! back.

use alloc::{format, string::String};
use core::fmt;

const PROTECTED_MARKER: &str = "\0*\0";

/// The declared visibility of an object field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Accessible from anywhere.
    Public,
    /// Accessible from the declaring class and its descendants.
    Protected,
    /// Accessible only from the declaring class.
    Private,
}

impl Visibility {
    /// The keyword used to declare a field with this visibility.
    pub const fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    /// Encodes `name`, declared by `declaring_class`, as a stored field name.
    ///
    /// # Examples
    ///
    /// ```
    /// use plaintrace::visibility::Visibility;
    ///
    /// assert_eq!(Visibility::Private.mangle("id", "User"), "\0User\0id");
    /// assert_eq!(Visibility::Protected.mangle("id", "User"), "\0*\0id");
    /// assert_eq!(Visibility::Public.mangle("id", "User"), "id");
    /// ```
    pub fn mangle(self, name: &str, declaring_class: &str) -> String {
        match self {
            Visibility::Public => String::from(name),
            Visibility::Protected => format!("{PROTECTED_MARKER}{name}"),
            Visibility::Private => format!("\0{declaring_class}\0{name}"),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Recovers the visibility and plain name of a stored field name.
///
/// Only the private marker of `declaring_class` itself is recognised; a
/// private field inherited from another class is reported as public under
/// its full stored name.
///
/// # Examples
///
/// ```
/// use plaintrace::visibility::{Visibility, classify};
///
/// assert_eq!(classify("\0User\0id", "User"), (Visibility::Private, "id"));
/// assert_eq!(classify("\0*\0id", "User"), (Visibility::Protected, "id"));
/// assert_eq!(classify("id", "User"), (Visibility::Public, "id"));
/// ```
pub fn classify<'k>(stored_name: &'k str, declaring_class: &str) -> (Visibility, &'k str) {
    if let Some(name) = strip_private_marker(stored_name, declaring_class) {
        (Visibility::Private, name)
    } else if let Some(name) = stored_name.strip_prefix(PROTECTED_MARKER) {
        (Visibility::Protected, name)
    } else {
        (Visibility::Public, stored_name)
    }
}

/// Decodes a stored field name declared by any class.
///
/// Returns the visibility, the declaring class of a private field and the
/// plain name. Unlike [`classify`], private fields inherited from another
/// class are recognised.
///
/// # Examples
///
/// ```
/// use plaintrace::visibility::{Visibility, decode};
///
/// assert_eq!(decode("\0Parent\0id"), (Visibility::Private, Some("Parent"), "id"));
/// assert_eq!(decode("\0*\0id"), (Visibility::Protected, None, "id"));
/// assert_eq!(decode("id"), (Visibility::Public, None, "id"));
/// ```
pub fn decode(stored_name: &str) -> (Visibility, Option<&str>, &str) {
    if let Some(name) = stored_name.strip_prefix(PROTECTED_MARKER) {
        return (Visibility::Protected, None, name);
    }
    match stored_name
        .strip_prefix('\0')
        .and_then(|rest| rest.split_once('\0'))
    {
        Some((class_name, name)) => (Visibility::Private, Some(class_name), name),
        None => (Visibility::Public, None, stored_name),
    }
}

fn strip_private_marker<'k>(stored_name: &'k str, declaring_class: &str) -> Option<&'k str> {
    stored_name
        .strip_prefix('\0')?
        .strip_prefix(declaring_class)?
        .strip_prefix('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_for_each_visibility() {
        for visibility in [
            Visibility::Public,
            Visibility::Protected,
            Visibility::Private,
        ] {
            let stored = visibility.mangle("token", r"Auth\Session");
            assert_eq!(
                classify(&stored, r"Auth\Session"),
                (visibility, "token"),
                "{visibility} field did not survive encoding"
            );
        }
    }

    #[test]
    fn test_private_marker_of_other_class_is_public() {
        let stored = Visibility::Private.mangle("token", "ParentSession");
        let (visibility, name) = classify(&stored, "Session");
        assert_eq!(visibility, Visibility::Public);
        assert_eq!(name, stored);
    }

    #[test]
    fn test_private_marker_requires_exact_class() {
        // `\0Session\0` must not match a class named `Sess`.
        let stored = Visibility::Private.mangle("token", "Session");
        assert_eq!(classify(&stored, "Sess").0, Visibility::Public);
    }

    #[test]
    fn test_protected_field_named_like_marker() {
        assert_eq!(
            classify("\0*\0\0*\0x", "C"),
            (Visibility::Protected, "\0*\0x")
        );
    }

    #[test]
    fn test_decode_inherited_private_field() {
        let stored = Visibility::Private.mangle("token", r"Auth\ParentSession");
        assert_eq!(
            decode(&stored),
            (Visibility::Private, Some(r"Auth\ParentSession"), "token")
        );
        assert_eq!(decode("\0broken"), (Visibility::Public, None, "\0broken"));
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(classify("", "C"), (Visibility::Public, ""));
        assert_eq!(classify("\0C\0", "C"), (Visibility::Private, ""));
    }
}
