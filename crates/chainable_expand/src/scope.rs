//! Ancestor scanner.
//!
//! Walks from an annotated member up to the file root and works out whether
//! the member lives in a value type or a reference type, and which access
//! level the nearest enclosing declaration grants.

use chainable_syntax::{Decl, NodeId, SyntaxTree, TypeKind, Visibility};
use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether the owning type copies on assignment or aliases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OwnerKind {
    /// `struct` or `enum`.
    #[default]
    Value,
    /// `class` or `actor`.
    Reference,
}

impl OwnerKind {
    /// Returns the owner kind a type declaration implies, if any.
    #[must_use]
    pub const fn of(kind: TypeKind) -> Option<Self> {
        match kind {
            TypeKind::Struct | TypeKind::Enum => Some(Self::Value),
            TypeKind::Class | TypeKind::Actor => Some(Self::Reference),
            TypeKind::Extension | TypeKind::Protocol => None,
        }
    }
}

/// Facts about the declarations enclosing a member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnclosingContext {
    /// Value or reference semantics of the owner.
    pub owner: OwnerKind,
    /// Access level of the nearest enclosing declaration that states one.
    pub visibility: Option<Visibility>,
}

impl EnclosingContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(owner: OwnerKind, visibility: Option<Visibility>) -> Self {
        Self { owner, visibility }
    }
}

/// Scans the ancestors of `id`, nearest first.
///
/// Owner kind comes from the closest struct, enum, class or actor; members of
/// a bare extension default to [`OwnerKind::Value`]. Visibility comes from the
/// closest type or extension carrying an access modifier. The walk stops as
/// soon as both are known.
#[must_use]
pub fn scan(tree: &SyntaxTree, id: NodeId) -> EnclosingContext {
    let mut owner = None;
    let mut visibility = None;

    for (ancestor, node) in tree.ancestors(id) {
        let Decl::Type(decl) = &node.decl else {
            continue;
        };
        if decl.kind == TypeKind::Protocol {
            continue;
        }
        trace!("scanning {} `{}` ({ancestor})", decl.kind.keyword(), decl.name);

        if owner.is_none() {
            owner = OwnerKind::of(decl.kind);
        }
        if visibility.is_none() {
            visibility = decl.modifiers.iter().find_map(|m| m.visibility());
        }
        if owner.is_some() && visibility.is_some() {
            break;
        }
    }

    EnclosingContext {
        owner: owner.unwrap_or_default(),
        visibility,
    }
}
