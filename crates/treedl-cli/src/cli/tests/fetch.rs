//! Tests for the fetch subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;
use treedl_core::config::TreeDlConfig;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["treedl", "fetch", "radium", "project-configuration"]) {
        CliCommand::Fetch {
            repo,
            dest,
            chunk_size,
            manifest,
        } => {
            assert_eq!(repo.owner, "radium");
            assert_eq!(repo.repo, "project-configuration");
            assert_eq!(repo.reference, "HEAD");
            assert!(repo.base_url.is_none());
            assert!(repo.domain.is_none());
            assert!(dest.is_none());
            assert!(chunk_size.is_none());
            assert!(manifest.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_options() {
    match parse(&[
        "treedl",
        "fetch",
        "radium",
        "project-configuration",
        "--ref",
        "main",
        "--domain",
        "radium",
        "-o",
        "/tmp/out",
        "--chunk-size",
        "8",
        "--manifest",
        "/tmp/SHA256SUMS",
    ]) {
        CliCommand::Fetch {
            repo,
            dest,
            chunk_size,
            manifest,
        } => {
            assert_eq!(repo.reference, "main");
            assert_eq!(repo.domain.as_deref(), Some("radium"));
            assert_eq!(dest.as_deref(), Some(Path::new("/tmp/out")));
            assert_eq!(chunk_size, Some(8));
            assert_eq!(manifest.as_deref(), Some(Path::new("/tmp/SHA256SUMS")));
        }
        _ => panic!("expected Fetch with options"),
    }
}

#[test]
fn cli_rejects_zero_chunk_size() {
    assert!(Cli::try_parse_from(["treedl", "fetch", "o", "r", "--chunk-size", "0"]).is_err());
}

#[test]
fn cli_rejects_base_url_with_domain() {
    assert!(Cli::try_parse_from([
        "treedl",
        "fetch",
        "o",
        "r",
        "--base-url",
        "https://git.example.org",
        "--domain",
        "radium",
    ])
    .is_err());
}

#[test]
fn endpoint_precedence() {
    let cfg = TreeDlConfig {
        base_url: Some("https://from-config.example".to_string()),
        ..TreeDlConfig::default()
    };
    let repo_of = |args: &[&str]| match parse(args) {
        CliCommand::Fetch { repo, .. } => repo,
        _ => panic!("expected Fetch"),
    };

    let repo = repo_of(&["treedl", "fetch", "o", "r", "--base-url", "https://flag.example"]);
    assert_eq!(repo.endpoint(&cfg).unwrap().base().host_str(), Some("flag.example"));

    let repo = repo_of(&["treedl", "fetch", "o", "r", "--domain", "radium"]);
    assert_eq!(
        repo.endpoint(&cfg).unwrap().base().host_str(),
        Some("gitea.radium.group")
    );

    let repo = repo_of(&["treedl", "fetch", "o", "r"]);
    assert_eq!(
        repo.endpoint(&cfg).unwrap().base().host_str(),
        Some("from-config.example")
    );
    assert!(repo.endpoint(&TreeDlConfig::default()).is_err());
}
