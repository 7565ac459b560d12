//! Anchor comments and the rules that insert text after them.

use std::fmt;
use std::sync::Arc;

/// Anchors the built-in templates emit so later runs can extend a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerToken {
    /// Entity and DTO bodies: new properties go after this line.
    PropertyAddOn,
    /// Controller body: new endpoints.
    ControllerEndpoint,
    /// Functional-test route registry: one routes class per entity.
    ApiRoutes,
    /// Integration-test fixture: bus consumer registrations.
    ConsumerRegistration,
    /// Integration-test fixture: `using` directives for consumer namespaces.
    MessagingUsing,
}

impl MarkerToken {
    /// The substring looked for in each line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PropertyAddOn => "add-on property marker",
            Self::ControllerEndpoint => "endpoint marker - do not delete this comment",
            Self::ApiRoutes => "new api route marker - do not delete",
            Self::ConsumerRegistration => "Consumer Registration -- Do Not Delete Comment",
            Self::MessagingUsing => "using MassTransit;",
        }
    }
}

impl fmt::Display for MarkerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text inserted after a matching line.
#[derive(Clone)]
pub enum Insertion {
    Text(String),
    /// Computed from the matched line (without its terminator).
    Producer(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl fmt::Debug for Insertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// "When a line contains `marker`, append `insertion` after it."
#[derive(Debug, Clone)]
pub struct MarkerRule {
    marker: String,
    insertion: Insertion,
}

impl MarkerRule {
    pub fn after(marker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            insertion: Insertion::Text(text.into()),
        }
    }

    pub fn after_token(token: MarkerToken, text: impl Into<String>) -> Self {
        Self::after(token.as_str(), text)
    }

    pub fn with_producer(
        marker: impl Into<String>,
        producer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            marker: marker.into(),
            insertion: Insertion::Producer(Arc::new(producer)),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn matches(&self, line: &str) -> bool {
        line.contains(&self.marker)
    }

    pub fn insertion_for(&self, line: &str) -> String {
        match &self.insertion {
            Insertion::Text(text) => text.clone(),
            Insertion::Producer(produce) => produce(line),
        }
    }
}
