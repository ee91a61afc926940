//! # Role Graph Library
//!
//! This library provides the role loading and dependency-resolution core
//! of a declarative automation engine. It is designed to be used by the
//! `rolegraph` command-line tool but can also be integrated into a larger
//! playbook compiler that needs resolved role graphs.
//!
//! ## Quick Example
//!
//! ```no_run
//! use rolegraph::cache::RoleCache;
//! use rolegraph::locator::RoleSearch;
//! use rolegraph::reference::RoleReference;
//! use rolegraph::resolver::RoleGraphResolver;
//!
//! let resolver = RoleGraphResolver::new(RoleCache::new());
//! let reference = RoleReference::new("web", RoleSearch::default());
//!
//! let web = resolver.resolve(&reference)?;
//! for dep in web.all_dependencies()? {
//!     println!("{} runs before {}", dep.name(), web.name());
//! }
//! # Ok::<(), rolegraph::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Role references (`reference`)**: an unresolved mention of a role by
//!   name, plus caller-supplied parameter overrides and the search
//!   configuration needed to locate it.
//! - **Role definitions (`definition`)**: the loaded role — its task,
//!   handler, and variable scopes, its parsed metadata, and its links to
//!   parents and resolved dependencies.
//! - **Resolution (`resolver`)**: the recursive graph walk that loads a
//!   root role and its transitive dependencies, rejecting cycles with the
//!   full offending path and de-duplicating diamond dependencies.
//! - **Caching (`cache`)**: a per-run cache ensuring each role is parsed
//!   once no matter how many dependents reference it, with all dependents
//!   visible as parents on the one shared instance.
//! - **On-disk convention (`mainfile`, `document`, `locator`)**: a role is
//!   a directory of optional scope subdirectories, each holding one
//!   canonical `main` entry file in YAML or JSON.
//!
//! ## Execution Flow
//!
//! A caller (typically the playbook compiler) hands the resolver a root
//! role reference. The resolver locates the role on disk, loads and
//! validates its scopes, parses its metadata, and recursively resolves
//! each declared dependency — passing itself as parent — before handing
//! back the root of the resulting graph for task-list assembly and
//! variable merging (both outside this library's scope).

pub mod cache;
pub mod definition;
pub mod document;
pub mod error;
pub mod locator;
pub mod mainfile;
pub mod metadata;
pub mod reference;
pub mod resolver;
pub mod suggestions;
