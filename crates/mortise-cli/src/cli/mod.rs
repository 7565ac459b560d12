//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mortise_core::prelude::EntityProperty;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "mortise",
    bin_name = "mortise",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Web API scaffolding with marker-based incremental edits",
    long_about = "Mortise renders entity, DTO, validator, controller, feature and test \
                  files for an ASP.NET Core solution from a JSON model, and extends \
                  previously generated files by inserting code after marker comments.",
    after_help = "EXAMPLES:\n\
        \x20 mortise scaffold --model api.json --root ./Acme\n\
        \x20 mortise add-feature --model api.json --entity Widget --kind get-list\n\
        \x20 mortise add-property --model api.json --entity Widget -p Rating:int:filter,sort\n\
        \x20 mortise completions bash > /usr/share/bash-completion/completions/mortise",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate every file for every entity in the model.
    #[command(
        visible_alias = "s",
        about = "Scaffold a solution from a model file",
        after_help = "EXAMPLES:\n\
            \x20 mortise scaffold --model api.json\n\
            \x20 mortise scaffold --model api.json --root ./out --templates ./my-templates"
    )]
    Scaffold(ScaffoldArgs),

    /// Append properties to an entity that was scaffolded earlier.
    #[command(
        about = "Add properties to an existing entity",
        after_help = "EXAMPLES:\n\
            \x20 mortise add-property --model api.json --entity Widget -p Title:string\n\
            \x20 mortise add-property --model api.json --entity Widget -p CategoryId:Guid:fk=Category"
    )]
    AddProperty(AddPropertyArgs),

    /// Add one feature (endpoint) to an entity that was scaffolded earlier.
    #[command(
        about = "Add a feature to an existing entity",
        after_help = "EXAMPLES:\n\
            \x20 mortise add-feature --model api.json --entity Widget --kind delete-record\n\
            \x20 mortise add-feature --model api.json --entity Widget --kind get-record --protected\n\
            \x20 mortise add-feature --model api.json --entity Ingredient --kind add-list-by-fk \\\n\
            \x20     --parent-entity Recipe --batch-property RecipeId"
    )]
    AddFeature(AddFeatureArgs),

    /// Create the model's consumers and register them in the test fixture.
    #[command(
        about = "Add message consumers",
        after_help = "EXAMPLES:\n\
            \x20 mortise add-consumer --model api.json"
    )]
    AddConsumer(AddConsumerArgs),

    /// Initialise a Mortise configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 mortise init           # platform config directory\n\
            \x20 mortise init --local   # .mortise.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 mortise completions bash > ~/.local/share/bash-completion/completions/mortise\n\
            \x20 mortise completions zsh  > ~/.zfunc/_mortise\n\
            \x20 mortise completions fish > ~/.config/fish/completions/mortise.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Mortise configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 mortise config get project.db_context\n\
            \x20 mortise config list\n\
            \x20 mortise config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where the model comes from and where the solution lives.
#[derive(Debug, Clone, Args)]
pub struct ProjectArgs {
    /// JSON model file.
    #[arg(
        short = 'm',
        long = "model",
        value_name = "FILE",
        help = "JSON model file"
    )]
    pub model: PathBuf,

    /// Solution root; `src/` and `tests/` live directly below it.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Solution root directory"
    )]
    pub root: PathBuf,

    /// Directory of `<template-id>.tmpl` overrides.
    #[arg(
        short = 't',
        long = "templates",
        value_name = "DIR",
        help = "Template override directory [default: from config]"
    )]
    pub templates: Option<PathBuf>,
}

// ── scaffold ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ScaffoldArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

// ── add-property ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddPropertyArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Entity to extend.
    #[arg(short = 'e', long = "entity", value_name = "NAME")]
    pub entity: String,

    /// `NAME:TYPE[:MODIFIERS]`, repeatable.
    ///
    /// Modifiers are comma separated: `filter`, `sort`, `readonly`,
    /// `fk=<Entity>`.
    #[arg(
        short = 'p',
        long = "property",
        value_name = "NAME:TYPE[:MODIFIERS]",
        value_parser = parse_property,
        required = true,
        help = "Property to add (repeatable)"
    )]
    pub properties: Vec<EntityProperty>,
}

// ── add-feature ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddFeatureArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Entity that receives the feature.
    #[arg(short = 'e', long = "entity", value_name = "NAME")]
    pub entity: String,

    /// Feature type.
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kind: FeatureKindArg,

    /// Require an authorization policy on the endpoint.
    #[arg(long = "protected")]
    pub protected: bool,

    /// Policy name; defaults to `Can<Feature><Entity>`.
    #[arg(long = "permission", value_name = "POLICY", requires = "protected")]
    pub permission: Option<String>,

    /// Parent entity of an `add-list-by-fk` batch.
    #[arg(long = "parent-entity", value_name = "NAME")]
    pub parent_entity: Option<String>,

    /// Foreign-key property linking a batch to its parent.
    #[arg(long = "batch-property", value_name = "NAME")]
    pub batch_property: Option<String>,

    /// Type of the batch property when the entity does not declare it.
    #[arg(long = "batch-property-type", value_name = "TYPE")]
    pub batch_property_type: Option<String>,

    /// Class name of an `ad-hoc` feature.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        required_if_eq("kind", "ad-hoc")
    )]
    pub name: Option<String>,
}

/// Feature types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeatureKindArg {
    AddRecord,
    GetRecord,
    GetList,
    UpdateRecord,
    PatchRecord,
    DeleteRecord,
    AddListByFk,
    AdHoc,
}

// ── add-consumer ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddConsumerArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `mortise init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.mortise.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `mortise completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `mortise config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `project.src_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── value parsers ─────────────────────────────────────────────────────────────

/// Parse `NAME:TYPE[:MODIFIERS]` into a property.
pub fn parse_property(raw: &str) -> Result<EntityProperty, String> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().map(str::trim).unwrap_or_default();
    let ty = parts.next().map(str::trim).unwrap_or_default();
    if name.is_empty() || ty.is_empty() {
        return Err(format!("expected NAME:TYPE, got '{raw}'"));
    }

    let mut property = EntityProperty::new(name, ty);
    for modifier in parts.next().into_iter().flat_map(|m| m.split(',')) {
        match modifier.trim() {
            "" => {}
            "filter" => property = property.filterable(),
            "sort" => property = property.sortable(),
            "readonly" => property = property.read_only(),
            other => match other.strip_prefix("fk=") {
                Some(entity) if !entity.is_empty() => {
                    property = property.with_foreign_entity(entity);
                }
                _ => {
                    return Err(format!(
                        "unknown modifier '{other}' (expected filter, sort, readonly or fk=<Entity>)"
                    ));
                }
            },
        }
    }
    Ok(property)
}

// ── tests ─────────────────────────────────────────────────────────────────────
