//! `vba init` command

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::cli::InitArgs;
use vba_blocks::ops::vba_new::{init_project, NewOptions};
use vba_blocks::GlobalContext;

/// Determines the package name from the arguments or directory.
pub fn determine_package_name(name: &Option<String>, path: &Path) -> String {
    name.clone().unwrap_or_else(|| {
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string()
    })
}

/// Validates a package name for common issues.
pub fn validate_package_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("package name cannot be empty");
    }

    if name.starts_with('-') || name.starts_with('_') || name.starts_with('.') {
        return Err("package name must start with a letter or digit");
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err("package name contains invalid characters");
    }

    Ok(())
}

pub fn execute(ctx: &GlobalContext, args: InitArgs) -> Result<()> {
    let path = match args.path {
        Some(path) => ctx.cwd().join(path),
        None => ctx.cwd().to_path_buf(),
    };

    let name = determine_package_name(&args.name, &path);
    if let Err(reason) = validate_package_name(&name) {
        bail!("invalid package name `{}`: {}", name, reason);
    }

    let config = &ctx.config().init;
    let authors = if args.authors.is_empty() {
        config.authors.clone()
    } else {
        args.authors
    };

    let opts = NewOptions {
        name: name.clone(),
        authors,
        target: args.target.or(config.target),
    };

    init_project(&path, &opts)?;

    eprintln!("     Initialized `{}` package in {}", name, display_dir(ctx, &path));

    Ok(())
}

fn display_dir(ctx: &GlobalContext, path: &Path) -> String {
    let rel: PathBuf = vba_blocks::util::fs::relative_path(ctx.cwd(), path);
    if rel.as_os_str().is_empty() {
        ".".to_string()
    } else {
        rel.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use vba_blocks::TargetType;

    fn parse_init_args(args: &[&str]) -> InitArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            init: InitArgs,
        }
        TestCli::parse_from(args).init
    }

    #[test]
    fn test_init_args_defaults() {
        let args = parse_init_args(&["test"]);
        assert!(args.name.is_none());
        assert!(args.authors.is_empty());
        assert!(args.target.is_none());
        assert!(args.path.is_none());
    }

    #[test]
    fn test_init_all_options() {
        let args = parse_init_args(&[
            "test", "--name", "budget", "--author", "Tim Hall", "--author", "Jane Doe",
            "--target", "xlam", "books",
        ]);
        assert_eq!(args.name.as_deref(), Some("budget"));
        assert_eq!(args.authors, vec!["Tim Hall", "Jane Doe"]);
        assert_eq!(args.target, Some(TargetType::Xlam));
        assert_eq!(args.path, Some(PathBuf::from("books")));
    }

    #[test]
    fn test_init_rejects_unknown_target() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            init: InitArgs,
        }
        assert!(TestCli::try_parse_from(["test", "--target", "xlsx"]).is_err());
    }

    #[test]
    fn test_determine_package_name() {
        let path = PathBuf::from("/home/user/budget");
        assert_eq!(determine_package_name(&None, &path), "budget");
        assert_eq!(
            determine_package_name(&Some("other".to_string()), &path),
            "other"
        );
        assert_eq!(determine_package_name(&None, Path::new("")), "unnamed");
    }

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("budget-tools_2").is_ok());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("-budget").is_err());
        assert!(validate_package_name(".hidden").is_err());
        assert_eq!(
            validate_package_name("my book").unwrap_err(),
            "package name contains invalid characters"
        );
    }
}
