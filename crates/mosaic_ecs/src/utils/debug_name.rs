use alloc::string::{String, ToString};
use core::fmt;

// -----------------------------------------------------------------------------
// DebugName

/// The display name of a registered type, collapsed for readability.
///
/// Stores a `fn() -> &'static str` rather than the string itself so the
/// value stays `Copy` and `const`-constructible; the module-path collapsing
/// happens at format time.
///
/// # Examples
///
/// ```
/// use mosaic_ecs::utils::DebugName;
///
/// struct Position;
/// let name = DebugName::type_name::<Position>();
/// assert_eq!(name.parse(), "Position");
/// ```
#[derive(Clone, Copy)]
pub struct DebugName {
    name: fn() -> &'static str,
}

impl DebugName {
    /// The name of type `T`.
    #[inline(always)]
    pub const fn type_name<T>() -> Self {
        Self {
            name: ::core::any::type_name::<T>,
        }
    }

    /// Formats the name into an owned [`String`].
    #[inline]
    pub fn parse(&self) -> String {
        ToString::to_string(self)
    }
}

/// Collapses a fully-qualified type name into its short form, preserving
/// generic syntax: `alloc::string::String` becomes `String`, and
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
#[inline(never)]
fn collapse_fmt(full_name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn collapse_segment(name: &str) -> &str {
        let mut segments = name.rsplit("::");
        let last = segments.next().unwrap();

        // Enum variants keep their enum prefix; as a heuristic, type-level
        // segments start uppercase.
        if let Some(second_last) = segments.next()
            && second_last.starts_with(char::is_uppercase)
        {
            let index = name.len() - last.len() - second_last.len() - 2;
            &name[index..]
        } else {
            last
        }
    }

    const SPECIAL_CHARS: [char; 9] = [' ', '<', '>', '(', ')', '[', ']', ',', ';'];

    let mut rest = full_name;

    while !rest.is_empty() {
        if let Some(index) = rest.find(|c| SPECIAL_CHARS.contains(&c)) {
            f.write_str(collapse_segment(&rest[0..index]))?;
            f.write_str(&rest[index..=index])?;
            rest = &rest[(index + 1)..];
        } else {
            f.write_str(collapse_segment(rest))?;
            return Ok(());
        }
    }

    Ok(())
}

impl fmt::Display for DebugName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        collapse_fmt((self.name)(), f)
    }
}

impl fmt::Debug for DebugName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        collapse_fmt((self.name)(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::DebugName;

    #[test]
    fn collapses_paths() {
        assert_eq!(DebugName::type_name::<String>().parse(), "String");
        assert_eq!(
            DebugName::type_name::<Option<String>>().parse(),
            "Option<String>",
        );
    }
}
