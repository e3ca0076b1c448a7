/// Path utilities for route comparison
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
///
/// Unlike router pattern normalization, these helpers only ever touch a
/// single trailing slash. Double slashes and backslashes are left alone,
/// since route descriptors compare paths exactly as they were navigated to.
use std::borrow::Cow;

/// Removes one trailing `/`, if present
///
/// Zero-copy: always borrows from the input.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::path::strip_trailing_slash;
///
/// assert_eq!(strip_trailing_slash("/users/"), "/users");
/// assert_eq!(strip_trailing_slash("/users"), "/users");
/// assert_eq!(strip_trailing_slash("/users//"), "/users/");
/// assert_eq!(strip_trailing_slash("/"), "");
/// ```
pub fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Appends a `/` unless the path already ends with one
///
/// Returns `Cow::Borrowed` when the path already ends with `/`.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::path::ensure_trailing_slash;
/// use std::borrow::Cow;
///
/// let path = ensure_trailing_slash("/users/");
/// assert!(matches!(path, Cow::Borrowed("/users/")));
///
/// assert_eq!(ensure_trailing_slash("/users"), "/users/");
/// assert_eq!(ensure_trailing_slash(""), "/");
/// ```
pub fn ensure_trailing_slash(path: &str) -> Cow<'_, str> {
    if path.ends_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{}/", path))
    }
}

/// Checks whether `current` lies under `target`, ignoring trailing slashes
///
/// Both sides get a trailing slash first, so `/users` is under `/users/`
/// and `/users/1` is under `/users`, but `/usersettings` is not under `/users`.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::path::is_path_prefix;
///
/// assert!(is_path_prefix("/users/1", "/users"));
/// assert!(is_path_prefix("/users", "/users/"));
/// assert!(!is_path_prefix("/usersettings", "/users"));
/// ```
pub fn is_path_prefix(current: &str, target: &str) -> bool {
    ensure_trailing_slash(current).starts_with(&*ensure_trailing_slash(target))
}
