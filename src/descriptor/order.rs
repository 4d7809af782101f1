//! Top-level entry kinds and insertion placement
//!
//! Servlet 2.3 descriptors fix the relative order of top-level entries.
//! Placement only needs that relative order, not full schema
//! validation: an unknown element name imposes no constraint.

use crate::xml::model::Element;

/// Top-level descriptor entry kinds, declared in canonical schema
/// order; `Ord` follows declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    ContextParam,
    Filter,
    FilterMapping,
    Listener,
    Servlet,
    ServletMapping,
    SessionConfig,
    MimeMapping,
    WelcomeFileList,
    ErrorPage,
    Taglib,
    ResourceEnvRef,
    ResourceRef,
    SecurityConstraint,
    LoginConfig,
    SecurityRole,
    EnvEntry,
    EjbRef,
    EjbLocalRef,
}

impl EntryKind {
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::ContextParam => "context-param",
            Self::Filter => "filter",
            Self::FilterMapping => "filter-mapping",
            Self::Listener => "listener",
            Self::Servlet => "servlet",
            Self::ServletMapping => "servlet-mapping",
            Self::SessionConfig => "session-config",
            Self::MimeMapping => "mime-mapping",
            Self::WelcomeFileList => "welcome-file-list",
            Self::ErrorPage => "error-page",
            Self::Taglib => "taglib",
            Self::ResourceEnvRef => "resource-env-ref",
            Self::ResourceRef => "resource-ref",
            Self::SecurityConstraint => "security-constraint",
            Self::LoginConfig => "login-config",
            Self::SecurityRole => "security-role",
            Self::EnvEntry => "env-entry",
            Self::EjbRef => "ejb-ref",
            Self::EjbLocalRef => "ejb-local-ref",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "context-param" => Some(Self::ContextParam),
            "filter" => Some(Self::Filter),
            "filter-mapping" => Some(Self::FilterMapping),
            "listener" => Some(Self::Listener),
            "servlet" => Some(Self::Servlet),
            "servlet-mapping" => Some(Self::ServletMapping),
            "session-config" => Some(Self::SessionConfig),
            "mime-mapping" => Some(Self::MimeMapping),
            "welcome-file-list" => Some(Self::WelcomeFileList),
            "error-page" => Some(Self::ErrorPage),
            "taglib" => Some(Self::Taglib),
            "resource-env-ref" => Some(Self::ResourceEnvRef),
            "resource-ref" => Some(Self::ResourceRef),
            "security-constraint" => Some(Self::SecurityConstraint),
            "login-config" => Some(Self::LoginConfig),
            "security-role" => Some(Self::SecurityRole),
            "env-entry" => Some(Self::EnvEntry),
            "ejb-ref" => Some(Self::EjbRef),
            "ejb-local-ref" => Some(Self::EjbLocalRef),
            _ => None,
        }
    }
}

/// Child index at which a new entry of the given kind belongs under the
/// root: after the last same-kind sibling, else before the first
/// later-kind sibling, else at the end.
pub fn insertion_index(root: &Element, kind: EntryKind) -> usize {
    if let Some(idx) = last_index_of_kind(root, kind) {
        return idx + 1;
    }

    for (idx, node) in root.children.iter().enumerate() {
        let Some(el) = node.as_element() else {
            continue;
        };
        if EntryKind::from_element_name(&el.name).is_some_and(|k| k > kind) {
            return idx;
        }
    }

    root.children.len()
}

/// Placement rule for environment entries: immediately after the last
/// `error-page`, else at the end of the root, regardless of which other
/// kinds are present.
pub fn env_entry_insertion_index(root: &Element) -> usize {
    match last_index_of_kind(root, EntryKind::ErrorPage) {
        Some(idx) => idx + 1,
        None => root.children.len(),
    }
}

fn last_index_of_kind(root: &Element, kind: EntryKind) -> Option<usize> {
    let name = kind.element_name();
    root.children
        .iter()
        .rposition(|node| node.as_element().is_some_and(|el| el.name == name))
}
