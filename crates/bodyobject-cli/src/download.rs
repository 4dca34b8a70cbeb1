//! Fetching source datasets with `git` (untrusted boundary tooling).
//!
//! Each catalog dataset is cloned into `<raw_dir>/<id>`, or fetched when the
//! checkout already exists. The catalog tag is checked out when known;
//! otherwise the primary branch is resolved from `BRANCH_CANDIDATES` and
//! fast-forwarded.

use anyhow::{anyhow, Context, Result};
use bodyobject_wordlist::{CatalogEntry, DatasetCatalog};
use colored::Colorize;
use std::path::Path;
use std::process::Command;

/// Primary branch names, in the order they are tried.
pub const BRANCH_CANDIDATES: &[&str] = &["main", "master"];

/// First candidate for which `exists` holds.
pub fn resolve_primary_branch<'a>(
    candidates: &[&'a str],
    exists: impl Fn(&str) -> bool,
) -> Result<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|name| exists(name))
        .ok_or_else(|| anyhow!("found none of the branches {}", candidates.join(", ")))
}

fn git(dir: Option<&Path>, args: &[&str]) -> Result<String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.arg("-C").arg(dir);
    }
    cmd.args(args);

    let out = cmd
        .output()
        .with_context(|| format!("failed to run `git {}`", args.join(" ")))?;
    if !out.status.success() {
        return Err(anyhow!(
            "git {} failed:\n{}",
            args.join(" "),
            String::from_utf8_lossy(&out.stderr)
        ));
    }
    Ok(String::from_utf8_lossy(&out.stdout).into_owned())
}

fn branch_exists(repo: &Path, name: &str) -> bool {
    [format!("refs/heads/{name}"), format!("refs/remotes/origin/{name}")]
        .iter()
        .any(|r| git(Some(repo), &["rev-parse", "--verify", "--quiet", r.as_str()]).is_ok())
}

/// Clone or fetch one dataset and check out its release.
pub fn sync_dataset(entry: &CatalogEntry, raw_dir: &Path) -> Result<()> {
    let dest = raw_dir.join(&entry.id);

    if dest.exists() {
        tracing::info!(dataset = %entry.id, "dataset already exists, fetching changes");
        git(Some(&dest), &["fetch", "--all", "--tags"])?;
    } else {
        let url = entry.clone_url();
        tracing::info!(dataset = %entry.id, %url, doi = %entry.zenodo, "cloning");
        std::fs::create_dir_all(raw_dir)
            .with_context(|| format!("failed to create {}", raw_dir.display()))?;
        let dest_arg = dest.to_string_lossy();
        git(None, &["clone", url.as_str(), &*dest_arg])?;
    }

    match &entry.tag {
        Some(tag) => {
            tracing::info!(dataset = %entry.id, %tag, "checking out tag");
            git(Some(&dest), &["checkout", tag.as_str()])?;
        }
        None => {
            tracing::warn!(dataset = %entry.id, "could not determine tag to check out");
            let branch = resolve_primary_branch(BRANCH_CANDIDATES, |name| branch_exists(&dest, name))
                .with_context(|| format!("{}: no primary branch", entry.id))?;
            tracing::info!(dataset = %entry.id, branch, "checking out branch");
            git(Some(&dest), &["checkout", branch])?;
            git(Some(&dest), &["merge", "--ff-only"])?;
        }
    }
    Ok(())
}

pub fn cmd_download(catalog: &DatasetCatalog, collection: &str, raw_dir: &Path) -> Result<()> {
    let mut synced = 0usize;
    let mut failed = Vec::new();

    for dataset_id in catalog.dataset_ids(Some(collection)) {
        let Some(entry) = catalog.get(&dataset_id) else {
            continue;
        };
        match sync_dataset(entry, raw_dir) {
            Ok(()) => synced += 1,
            Err(err) => {
                tracing::error!(dataset = %dataset_id, error = %format!("{err:#}"), "download failed");
                failed.push(dataset_id);
            }
        }
    }

    println!(
        "{} {} datasets into {}",
        "synced".green().bold(),
        synced,
        raw_dir.display()
    );
    if !failed.is_empty() {
        println!("  {} {}", "failed:".red(), failed.join(", "));
    }
    Ok(())
}
