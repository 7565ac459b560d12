//! Template composition tree and placeholder substitution.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  TemplateNode (what to render)                             │
//! │  ├── TemplateId      - which body to load                  │
//! │  ├── RenderContext   - scalar parameters {{NAME}} -> text  │
//! │  └── slots           - named child nodes, rendered first   │
//! ├────────────────────────────────────────────────────────────┤
//! │  substitute(id, body, ctx) -> text                         │
//! │  └── single pass, values are never re-scanned              │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bodies are supplied by a `TemplateProvider`; this module never loads
//! text itself. A tree can therefore be built, inspected (`describe`,
//! `render_order`) and compared in tests without any provider at all.
//!
//! ## Placeholder grammar
//!
//! | Input | Output |
//! |-------|--------|
//! | `{{NAME}}` (NAME = `[A-Za-z0-9_]+`) | value of `NAME`, or `MissingParameter` |
//! | `\{{` | literal `{{` |
//! | `{{` not starting a placeholder | emitted literally |

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use crate::domain::error::DomainError;

// ── TemplateId ────────────────────────────────────────────────────────────────

macro_rules! template_ids {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Every template family the generator knows how to render.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TemplateId {
            $($variant),+
        }

        impl TemplateId {
            pub const ALL: &'static [TemplateId] = &[$(Self::$variant),+];

            /// Stable kebab-case name; also the stem of override files.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

template_ids! {
    Entity => "entity",
    EntityProperty => "entity-property",
    EntityForeignKeyProperty => "entity-foreign-key-property",
    ReadDto => "read-dto",
    ManipulationDto => "manipulation-dto",
    DerivedDto => "derived-dto",
    DtoProperty => "dto-property",
    ManipulationValidator => "manipulation-validator",
    DerivedValidator => "derived-validator",
    Profile => "profile",
    ApiRoutes => "api-routes",
    EntityRoutes => "entity-routes",
    Controller => "controller",
    AuthAttributes => "auth-attributes",
    EndpointDocs => "endpoint-docs",
    EndpointDocsAuth => "endpoint-docs-auth",
    EndpointAddRecord => "endpoint-add-record",
    EndpointGetRecord => "endpoint-get-record",
    EndpointGetList => "endpoint-get-list",
    EndpointUpdateRecord => "endpoint-update-record",
    EndpointPatchRecord => "endpoint-patch-record",
    EndpointDeleteRecord => "endpoint-delete-record",
    EndpointAddList => "endpoint-add-list",
    QueryGetRecord => "query-get-record",
    QueryGetList => "query-get-list",
    CommandAddRecord => "command-add-record",
    CommandAddList => "command-add-list",
    CommandUpdateRecord => "command-update-record",
    CommandPatchRecord => "command-patch-record",
    CommandDeleteRecord => "command-delete-record",
    AdHocFeature => "ad-hoc-feature",
    IntegrationTest => "integration-test",
    FunctionalTest => "functional-test",
    FunctionalAuthTests => "functional-auth-tests",
    Fake => "fake",
    Consumer => "consumer",
    ConsumerDbMembers => "consumer-db-members",
    TestFixture => "test-fixture",
    ConsumerRegistration => "consumer-registration",
    UsingDirective => "using-directive",
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── RenderContext ─────────────────────────────────────────────────────────────

/// Scalar parameters of one template node.
///
/// Ordered so that `Debug` output and `describe()` are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; later values for the same key win.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

// ── Composition tree ──────────────────────────────────────────────────────────

/// What fills a named slot in the parent body.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Node(Box<TemplateNode>),
    /// Rendered in order and joined with `separator`.
    List {
        nodes: Vec<TemplateNode>,
        separator: String,
    },
    /// A conditional branch that was not taken; renders as "".
    Empty,
}

impl Slot {
    pub fn nodes(&self) -> &[TemplateNode] {
        match self {
            Self::Node(node) => std::slice::from_ref(node.as_ref()),
            Self::List { nodes, .. } => nodes,
            Self::Empty => &[],
        }
    }
}

/// One template call: an id, its parameters, and the nested calls it makes.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateNode {
    id: TemplateId,
    params: RenderContext,
    slots: Vec<(String, Slot)>,
}

impl TemplateNode {
    pub fn new(id: TemplateId) -> Self {
        Self {
            id,
            params: RenderContext::new(),
            slots: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.set(key, value);
        self
    }

    /// Merge a shared parameter set; keys already on the node win.
    pub fn with_params(mut self, shared: &RenderContext) -> Self {
        for (key, value) in &shared.variables {
            self.params
                .variables
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    /// Nest `child` under `slot`.
    pub fn child(mut self, slot: impl Into<String>, child: TemplateNode) -> Self {
        self.slots.push((slot.into(), Slot::Node(Box::new(child))));
        self
    }

    /// Nest a sequence of children under `slot`, joined by `separator`.
    pub fn list(
        mut self,
        slot: impl Into<String>,
        nodes: Vec<TemplateNode>,
        separator: impl Into<String>,
    ) -> Self {
        self.slots.push((
            slot.into(),
            Slot::List {
                nodes,
                separator: separator.into(),
            },
        ));
        self
    }

    /// Conditional child: `slot` renders `child()` when `condition` holds and
    /// nothing otherwise.
    pub fn when(
        mut self,
        condition: bool,
        slot: impl Into<String>,
        child: impl FnOnce() -> TemplateNode,
    ) -> Self {
        let content = if condition {
            Slot::Node(Box::new(child()))
        } else {
            Slot::Empty
        };
        self.slots.push((slot.into(), content));
        self
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn params(&self) -> &RenderContext {
        &self.params
    }

    pub fn slots(&self) -> &[(String, Slot)] {
        &self.slots
    }

    /// Template ids in the order a renderer visits them: children first,
    /// depth-first in declaration order, then the node itself.
    pub fn render_order(&self) -> Vec<TemplateId> {
        let mut order = Vec::new();
        self.collect_order(&mut order);
        order
    }

    fn collect_order(&self, out: &mut Vec<TemplateId>) {
        for (_, slot) in &self.slots {
            for node in slot.nodes() {
                node.collect_order(out);
            }
        }
        out.push(self.id);
    }

    /// Indented outline of the tree, one node per line.
    ///
    /// ```text
    /// endpoint-get-record
    ///   AUTH: auth-attributes
    /// ```
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0, None);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize, slot: Option<&str>) {
        let indent = "  ".repeat(depth);
        // Writing to a String cannot fail.
        let _ = match slot {
            Some(slot) => writeln!(out, "{indent}{slot}: {}", self.id),
            None => writeln!(out, "{indent}{}", self.id),
        };
        for (name, content) in &self.slots {
            if matches!(content, Slot::Empty) {
                let _ = writeln!(out, "{indent}  {name}: (empty)");
            }
            for node in content.nodes() {
                node.describe_into(out, depth + 1, Some(name));
            }
        }
    }
}

// ── Substitution ──────────────────────────────────────────────────────────────

/// Replace every `{{NAME}}` in `body` with its value from `ctx`.
///
/// Values are copied verbatim: a value that itself contains `{{X}}` stays
/// as-is in the output.
///
/// # Errors
///
/// `DomainError::MissingParameter` naming `template` and the first
/// placeholder that `ctx` does not define.
pub fn substitute(
    template: TemplateId,
    body: &str,
    ctx: &RenderContext,
) -> Result<String, DomainError> {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(pos) = rest.find("{{") {
        if rest[..pos].ends_with('\\') {
            out.push_str(&rest[..pos - 1]);
            out.push_str("{{");
            rest = &rest[pos + 2..];
            continue;
        }

        out.push_str(&rest[..pos]);
        let after = &rest[pos + 2..];

        if let Some(end) = after.find("}}") {
            let name = &after[..end];
            if is_placeholder_name(name) {
                let value = ctx.get(name).ok_or_else(|| DomainError::MissingParameter {
                    template: template.name(),
                    field: name.to_string(),
                })?;
                out.push_str(value);
                rest = &after[end + 2..];
                continue;
            }
        }

        // Not a placeholder: keep one brace and rescan from the next one, so
        // `{{{ID}}}` renders as `{` + value + `}`.
        out.push('{');
        rest = &rest[pos + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
