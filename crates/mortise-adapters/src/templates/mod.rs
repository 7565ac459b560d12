//! Template body providers.
//!
//! [`BuiltinTemplates`] ships a body for every `TemplateId`;
//! [`DirectoryTemplates`] lets users override any of them with
//! `<template-id>.tmpl` files.

mod builtin;
mod directory;

pub use builtin::{BuiltinTemplates, builtin_body};
pub use directory::{DirectoryTemplates, TemplateLoadError};
