//! Message-bus consumers added to an existing solution.

use serde::{Deserialize, Serialize};

/// A consumer class plus its registration in the integration-test fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    pub consumer_name: String,
    pub message_name: String,
    /// Folder under `Domain/` the consumer lives in.
    pub domain_directory: String,
    /// Inject the database context into the consumer.
    #[serde(default)]
    pub uses_db: bool,
}

impl Consumer {
    pub fn new(
        consumer_name: impl Into<String>,
        message_name: impl Into<String>,
        domain_directory: impl Into<String>,
    ) -> Self {
        Self {
            consumer_name: consumer_name.into(),
            message_name: message_name.into(),
            domain_directory: domain_directory.into(),
            uses_db: false,
        }
    }

    pub fn with_db(mut self) -> Self {
        self.uses_db = true;
        self
    }
}
