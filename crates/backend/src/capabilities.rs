//! Capability sets advertised by backends

bitflags::bitflags! {
    /// Set of primitives a backend provides
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Build an expression from a format string
        const SEXP_BUILD = 1 << 0;
        /// Public-key encryption
        const PK_ENCRYPT = 1 << 1;
        /// Extract a named integer parameter from an expression
        const SEXP_EXTRACT_PARAM = 1 << 2;
        /// Construct an empty point
        const POINT_NEW = 1 << 3;
        /// Decode a point from an integer
        const POINT_DECODE = 1 << 4;
        /// Construct an integer
        const MPI_NEW = 1 << 5;
        /// Move a point's x-coordinate into an integer
        const POINT_SNATCH = 1 << 6;
        /// Serialize an integer
        const MPI_PRINT = 1 << 7;
        /// Release expressions
        const SEXP_RELEASE = 1 << 8;
        /// Release integers
        const MPI_RELEASE = 1 << 9;
        /// Release points
        const POINT_RELEASE = 1 << 10;
        /// Error source and description strings
        const ERROR_STRINGS = 1 << 11;
        /// Direct scalar multiplication
        const SCALAR_MULT = 1 << 12;
    }
}

impl Capabilities {
    /// Everything the expression-driven exchange uses
    pub const EXPRESSION_REQUIRED: Self = Self::SEXP_BUILD
        .union(Self::PK_ENCRYPT)
        .union(Self::SEXP_EXTRACT_PARAM)
        .union(Self::POINT_NEW)
        .union(Self::POINT_DECODE)
        .union(Self::MPI_NEW)
        .union(Self::POINT_SNATCH)
        .union(Self::MPI_PRINT)
        .union(Self::SEXP_RELEASE)
        .union(Self::MPI_RELEASE)
        .union(Self::POINT_RELEASE)
        .union(Self::ERROR_STRINGS);

    /// Everything the direct exchange uses
    pub const NATIVE_REQUIRED: Self = Self::SCALAR_MULT
        .union(Self::MPI_PRINT)
        .union(Self::ERROR_STRINGS);

    /// Names of the primitives in `required` that this set lacks
    pub fn missing(self, required: Self) -> impl Iterator<Item = &'static str> {
        (required - self).iter_names().map(|(name, _)| name)
    }
}
