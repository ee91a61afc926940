//! Resolve command implementation
//!
//! The resolve command loads one or more root roles, resolves their full
//! dependency graphs, and prints the flattened, de-duplicated dependency
//! order for each root - the order the execution scheduler would run them
//! in. Several roots are resolved in parallel against one shared cache, so
//! a role shared between roots is parsed exactly once.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use rolegraph::cache::RoleCache;
use rolegraph::locator::RoleSearch;
use rolegraph::reference::RoleReference;
use rolegraph::resolver::RoleGraphResolver;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Names of the roles to resolve
    #[arg(value_name = "ROLE", required = true)]
    pub roles: Vec<String>,

    /// Additional directory to search for roles (repeatable)
    #[arg(long = "roles-path", value_name = "DIR", env = "ROLEGRAPH_ROLES_PATH")]
    pub roles_path: Vec<PathBuf>,

    /// Suppress all output except the dependency order
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs) -> Result<()> {
    let start_time = Instant::now();

    let search = if args.roles_path.is_empty() {
        RoleSearch::default()
    } else {
        RoleSearch::new(args.roles_path.clone())
    };

    let references: Vec<RoleReference> = args
        .roles
        .iter()
        .map(|name| RoleReference::new(name.clone(), search.clone()))
        .collect();

    let resolver = RoleGraphResolver::new(RoleCache::new());
    let roots = match resolver.resolve_all(&references) {
        Ok(roots) => roots,
        Err(e) => {
            if !args.quiet {
                eprintln!("❌ Resolution failed");
            }
            return Err(e.into());
        }
    };

    for root in &roots {
        println!("{}:", root.name());
        for role in root.all_dependencies()? {
            println!(
                "  {} ({} tasks, {} handlers)",
                role.name(),
                role.tasks().len(),
                role.handlers().len()
            );
        }
        println!(
            "  {} ({} tasks, {} handlers)",
            root.name(),
            root.tasks().len(),
            root.handlers().len()
        );
    }

    if !args.quiet {
        let duration = start_time.elapsed();
        println!(
            "✅ Resolved {} role(s), {} definition(s) loaded, in {:.2}s",
            roots.len(),
            resolver.cache().len()?,
            duration.as_secs_f64()
        );
    }

    Ok(())
}
