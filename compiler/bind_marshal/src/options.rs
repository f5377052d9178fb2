//! Generation surface and marshalling options.

use std::fmt;

/// Which binding surface code is generated for.
///
/// Some type mappings only exist on one surface; the registry filters on
/// this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorTarget {
    /// C++/CLI wrappers compiled next to the native library.
    NativeAdjacent,
    /// Pure C# bindings calling through P/Invoke.
    #[default]
    Managed,
}

impl GeneratorTarget {
    /// Local variable declaration keyword on this surface.
    pub const fn local_keyword(self) -> &'static str {
        match self {
            Self::NativeAdjacent => "auto",
            Self::Managed => "var",
        }
    }
}

impl fmt::Display for GeneratorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeAdjacent => write!(f, "cli"),
            Self::Managed => write!(f, "csharp"),
        }
    }
}

/// Which side of the boundary a signature type is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SignatureKind {
    /// Public API type seen by host callers.
    #[default]
    Managed,
    /// Internal ABI struct type used in P/Invoke declarations.
    Native,
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Managed => write!(f, "managed"),
            Self::Native => write!(f, "native"),
        }
    }
}

/// Options shared by every marshalling context of a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarshalOptions {
    pub target: GeneratorTarget,
    /// Property exposing a wrapper's native pointer.
    pub instance_identifier: String,
    /// Static factory wrapping a native pointer without taking ownership.
    pub create_instance_identifier: String,
    /// clix encoding used for narrow strings on the native-adjacent surface.
    pub narrow_encoding: String,
    /// clix encoding used for wide strings on the native-adjacent surface.
    pub wide_encoding: String,
    /// Variable receiving a call's raw return value.
    pub return_var: String,
    /// Spaces per indentation level in emitted fragments.
    pub indent_width: usize,
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            target: GeneratorTarget::default(),
            instance_identifier: "__Instance".to_owned(),
            create_instance_identifier: "__CreateInstance".to_owned(),
            narrow_encoding: "clix::E_UTF8".to_owned(),
            wide_encoding: "clix::E_UTF16".to_owned(),
            return_var: "__ret".to_owned(),
            indent_width: 4,
        }
    }
}

impl MarshalOptions {
    /// Default options for `target`.
    pub fn for_target(target: GeneratorTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: GeneratorTarget) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_return_var(mut self, name: impl Into<String>) -> Self {
        self.return_var = name.into();
        self
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn with_instance_identifiers(
        mut self,
        instance: impl Into<String>,
        create_instance: impl Into<String>,
    ) -> Self {
        self.instance_identifier = instance.into();
        self.create_instance_identifier = create_instance.into();
        self
    }
}
