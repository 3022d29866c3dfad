/// Suffix identifying compiled class entries inside an archive.
pub const CLASS_FILE_SUFFIX: &str = ".class";

/// Suffix identifying Java source files.
pub const JAVA_SOURCE_SUFFIX: &str = ".java";

/// Separator between path segments inside an archive.
pub const PATH_SEPARATOR: char = '/';

/// Separator between packages and between package/class.
pub const TYPE_SEPARATOR: char = '.';

/// Separator between a class and a method in test selectors.
pub const MEMBER_SEPARATOR: char = '#';

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNamingConvention;

impl JavaNamingConvention {
    /// Whether an archive entry path names a compiled class.
    pub fn is_class_file(path: &str) -> bool {
        path.ends_with(CLASS_FILE_SUFFIX)
    }

    /// Convert an archive-internal class path into a fully qualified name.
    ///
    /// # Examples
    /// ```ignore
    /// class_name_from_resource("org/example/FooTest.class") => "org.example.FooTest"
    /// class_name_from_resource("org/example/Outer$Inner.class") => "org.example.Outer$Inner"
    /// ```
    pub fn class_name_from_resource(path: &str) -> String {
        path.strip_suffix(CLASS_FILE_SUFFIX)
            .unwrap_or(path)
            .replace(PATH_SEPARATOR, &TYPE_SEPARATOR.to_string())
    }

    /// Convert a fully qualified class name back into its archive path.
    ///
    /// # Examples
    /// ```ignore
    /// resource_from_class_name("org.example.FooTest") => "org/example/FooTest.class"
    /// ```
    pub fn resource_from_class_name(fqn: &str) -> String {
        let mut path = fqn.replace(TYPE_SEPARATOR, &PATH_SEPARATOR.to_string());
        path.push_str(CLASS_FILE_SUFFIX);
        path
    }

    /// Strip a trailing `.class` or `.java` suffix.
    pub fn strip_type_suffix(path: &str) -> &str {
        path.strip_suffix(CLASS_FILE_SUFFIX)
            .or_else(|| path.strip_suffix(JAVA_SOURCE_SUFFIX))
            .unwrap_or(path)
    }

    /// Split `Class#method` into its parts.
    pub fn parse_member_selector(selector: &str) -> (&str, Option<&str>) {
        match selector.split_once(MEMBER_SEPARATOR) {
            Some((class, method)) => (class, Some(method)),
            None => (selector, None),
        }
    }
}
