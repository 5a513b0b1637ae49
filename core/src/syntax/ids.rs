use core::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            pub(crate) const fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Index into the owning workspace's backing vector.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id! {
    /// Handle to a [`Module`](super::Module) in a workspace.
    ModuleId
}

define_id! {
    /// Handle to a [`Definition`](super::Definition) in a workspace.
    DefId
}

define_id! {
    /// Handle to a [`DeclaredParameter`](super::DeclaredParameter) in a workspace.
    ParamId
}

define_id! {
    /// Handle to an [`Expr`](super::Expr) in a workspace.
    ExprId
}

impl ExprId {
    /// Placeholder for a definition body that has not been lowered yet.
    /// Never escapes the linker: a successfully linked program contains no
    /// invalid ids.
    pub(crate) const INVALID: ExprId = ExprId(u32::MAX);

    pub(crate) const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}
