//! Domain value objects: path categories, DTO/validator flavours, feature kinds.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Each carries its string representation; nothing here touches paths or
//! templates directly.

use serde::{Deserialize, Serialize};
use std::fmt;

// ── PathCategory ─────────────────────────────────────────────────────────────

/// Where a generated file lives.
///
/// Closed on purpose: the resolver has a directory rule for every variant, so
/// an "unknown category" cannot reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCategory {
    Entity,
    Dto,
    Validator,
    Profile,
    Controller,
    Feature,
    Consumer,
    DbContext,
    IntegrationTest,
    FunctionalTest,
    TestFakes,
    TestRoutes,
    TestFixture,
}

impl PathCategory {
    pub const ALL: [PathCategory; 13] = [
        Self::Entity,
        Self::Dto,
        Self::Validator,
        Self::Profile,
        Self::Controller,
        Self::Feature,
        Self::Consumer,
        Self::DbContext,
        Self::IntegrationTest,
        Self::FunctionalTest,
        Self::TestFakes,
        Self::TestRoutes,
        Self::TestFixture,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Dto => "dto",
            Self::Validator => "validator",
            Self::Profile => "profile",
            Self::Controller => "controller",
            Self::Feature => "feature",
            Self::Consumer => "consumer",
            Self::DbContext => "db-context",
            Self::IntegrationTest => "integration-test",
            Self::FunctionalTest => "functional-test",
            Self::TestFakes => "test-fakes",
            Self::TestRoutes => "test-routes",
            Self::TestFixture => "test-fixture",
        }
    }

    /// Whether the file belongs to one of the test projects.
    pub const fn is_test(&self) -> bool {
        matches!(
            self,
            Self::IntegrationTest
                | Self::FunctionalTest
                | Self::TestFakes
                | Self::TestRoutes
                | Self::TestFixture
        )
    }
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DtoKind ───────────────────────────────────────────────────────────────────

/// The four data-transfer objects generated per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DtoKind {
    Read,
    Creation,
    Update,
    Manipulation,
}

impl DtoKind {
    pub const ALL: [DtoKind; 4] = [Self::Read, Self::Manipulation, Self::Creation, Self::Update];

    /// Infix placed between the entity name and `Dto`.
    pub const fn infix(&self) -> &'static str {
        match self {
            Self::Read => "",
            Self::Creation => "ForCreation",
            Self::Update => "ForUpdate",
            Self::Manipulation => "ForManipulation",
        }
    }
}

// ── ValidatorKind ─────────────────────────────────────────────────────────────

/// Validators mirror the writable DTOs; manipulation is the shared base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Manipulation,
    Creation,
    Update,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 3] = [Self::Manipulation, Self::Creation, Self::Update];

    pub const fn infix(&self) -> &'static str {
        match self {
            Self::Manipulation => "ForManipulation",
            Self::Creation => "ForCreation",
            Self::Update => "ForUpdate",
        }
    }

    /// The DTO this validator checks.
    pub const fn dto(&self) -> DtoKind {
        match self {
            Self::Manipulation => DtoKind::Manipulation,
            Self::Creation => DtoKind::Creation,
            Self::Update => DtoKind::Update,
        }
    }
}

// ── FeatureKind ───────────────────────────────────────────────────────────────

/// Payload-free discriminant of [`crate::domain::Feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    AddRecord,
    GetRecord,
    GetList,
    UpdateRecord,
    PatchRecord,
    DeleteRecord,
    AddListByFk,
    AdHoc,
}

impl FeatureKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AddRecord => "AddRecord",
            Self::GetRecord => "GetRecord",
            Self::GetList => "GetList",
            Self::UpdateRecord => "UpdateRecord",
            Self::PatchRecord => "PatchRecord",
            Self::DeleteRecord => "DeleteRecord",
            Self::AddListByFk => "AddListByFk",
            Self::AdHoc => "AdHoc",
        }
    }

    /// Verb used in route and permission names.
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::AddRecord | Self::AddListByFk => "Add",
            Self::GetRecord | Self::GetList => "Get",
            Self::UpdateRecord => "Update",
            Self::PatchRecord => "Patch",
            Self::DeleteRecord => "Delete",
            Self::AdHoc => "",
        }
    }

    /// Commands mutate state; queries read it.
    pub const fn is_query(&self) -> bool {
        matches!(self, Self::GetRecord | Self::GetList)
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
