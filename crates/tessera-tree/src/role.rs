//! Closed role enumeration
//!
//! Role strings in the external format are dot paths such as
//! `Role.Element.Background`. Every accepted value is listed here; anything
//! else is rejected at load time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tessera_core::TesseraError;

const ROLE_PREFIX: &str = "Role";

/// Roles for whole pages (usually only on the root)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageRole {
    Opening,
    Agenda,
    SectionDivider,
    Ending,
    Content,
}

/// Roles for layout containers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    Page,
    Content,
    Title,
    Subtitle,
    Description,
    Highlight,
    Decoration,
    Marker,
    Separator,
    Background,
}

/// Roles for elements (leaves)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Background,
    Decoration,
    Marker,
    Title,
    Subtitle,
    Description,
    Highlight,
    Separator,
}

impl PageRole {
    pub const ALL: [PageRole; 5] = [
        PageRole::Opening,
        PageRole::Agenda,
        PageRole::SectionDivider,
        PageRole::Ending,
        PageRole::Content,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PageRole::Opening => "Opening",
            PageRole::Agenda => "Agenda",
            PageRole::SectionDivider => "SectionDivider",
            PageRole::Ending => "Ending",
            PageRole::Content => "Content",
        }
    }
}

impl ContainerRole {
    pub const ALL: [ContainerRole; 10] = [
        ContainerRole::Page,
        ContainerRole::Content,
        ContainerRole::Title,
        ContainerRole::Subtitle,
        ContainerRole::Description,
        ContainerRole::Highlight,
        ContainerRole::Decoration,
        ContainerRole::Marker,
        ContainerRole::Separator,
        ContainerRole::Background,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContainerRole::Page => "Page",
            ContainerRole::Content => "Content",
            ContainerRole::Title => "Title",
            ContainerRole::Subtitle => "Subtitle",
            ContainerRole::Description => "Description",
            ContainerRole::Highlight => "Highlight",
            ContainerRole::Decoration => "Decoration",
            ContainerRole::Marker => "Marker",
            ContainerRole::Separator => "Separator",
            ContainerRole::Background => "Background",
        }
    }
}

impl ElementRole {
    pub const ALL: [ElementRole; 8] = [
        ElementRole::Background,
        ElementRole::Decoration,
        ElementRole::Marker,
        ElementRole::Title,
        ElementRole::Subtitle,
        ElementRole::Description,
        ElementRole::Highlight,
        ElementRole::Separator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementRole::Background => "Background",
            ElementRole::Decoration => "Decoration",
            ElementRole::Marker => "Marker",
            ElementRole::Title => "Title",
            ElementRole::Subtitle => "Subtitle",
            ElementRole::Description => "Description",
            ElementRole::Highlight => "Highlight",
            ElementRole::Separator => "Separator",
        }
    }

    /// Roles whose element carries readable text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ElementRole::Title
                | ElementRole::Subtitle
                | ElementRole::Description
                | ElementRole::Highlight
        )
    }
}

/// A node's semantic role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Page(PageRole),
    LayoutContainer(ContainerRole),
    Element(ElementRole),
}

impl Role {
    pub const BACKGROUND: Role = Role::Element(ElementRole::Background);
    pub const DECORATION: Role = Role::Element(ElementRole::Decoration);
    pub const MARKER: Role = Role::Element(ElementRole::Marker);
    /// Role given to groups created by the repair engine
    pub const DECORATION_GROUP: Role = Role::LayoutContainer(ContainerRole::Decoration);

    /// Namespace segment (`Page`, `LayoutContainer` or `Element`)
    pub fn namespace(&self) -> &'static str {
        match self {
            Role::Page(_) => "Page",
            Role::LayoutContainer(_) => "LayoutContainer",
            Role::Element(_) => "Element",
        }
    }

    /// Last path segment, e.g. `Background`
    pub fn leaf_name(&self) -> &'static str {
        match self {
            Role::Page(r) => r.name(),
            Role::LayoutContainer(r) => r.name(),
            Role::Element(r) => r.name(),
        }
    }

    pub fn element(&self) -> Option<ElementRole> {
        match self {
            Role::Element(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_element(&self, role: ElementRole) -> bool {
        self.element() == Some(role)
    }

    pub fn is_background(&self) -> bool {
        self.is_element(ElementRole::Background)
    }

    /// Element Decoration or Element Marker (container roles do not count)
    pub fn is_decoration_or_marker(&self) -> bool {
        matches!(
            self,
            Role::Element(ElementRole::Decoration) | Role::Element(ElementRole::Marker)
        )
    }

    /// Whether this role names text content, in either namespace
    pub fn is_text(&self) -> bool {
        match self {
            Role::Element(r) => r.is_text(),
            Role::LayoutContainer(r) => matches!(
                r,
                ContainerRole::Title
                    | ContainerRole::Subtitle
                    | ContainerRole::Description
                    | ContainerRole::Highlight
            ),
            Role::Page(_) => false,
        }
    }

    /// Whether the dot path starts with `prefix`
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.to_string().starts_with(prefix)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", ROLE_PREFIX, self.namespace(), self.leaf_name())
    }
}

impl FromStr for Role {
    type Err = TesseraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || TesseraError::UnknownRole(s.to_string());

        let mut parts = s.split('.');
        if parts.next() != Some(ROLE_PREFIX) {
            return Err(unknown());
        }
        let namespace = parts.next().ok_or_else(unknown)?;
        let name = parts.next().ok_or_else(unknown)?;
        if parts.next().is_some() {
            return Err(unknown());
        }

        let role = match namespace {
            "Page" => PageRole::ALL
                .iter()
                .find(|r| r.name() == name)
                .map(|r| Role::Page(*r)),
            "LayoutContainer" => ContainerRole::ALL
                .iter()
                .find(|r| r.name() == name)
                .map(|r| Role::LayoutContainer(*r)),
            "Element" => ElementRole::ALL
                .iter()
                .find(|r| r.name() == name)
                .map(|r| Role::Element(*r)),
            _ => None,
        };

        role.ok_or_else(unknown)
    }
}

impl TryFrom<String> for Role {
    type Error = TesseraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.to_string()
    }
}
