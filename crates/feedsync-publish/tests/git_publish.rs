//! Integration tests for `GitPublisher` against throwaway repositories.
//!
//! Each test creates a bare "remote" and a working clone inside a temp
//! directory. Tests return early when `git` is not installed.

use std::path::Path;
use std::process::Command;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use feedsync_publish::{write_feed, GitPublisher, PublishError, PublishOutcome};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git should spawn");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Returns `(tempdir, work_dir, remote_dir)` with one initial commit pushed
/// and upstream tracking configured.
fn setup_repos() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
    let root = tempfile::tempdir().expect("tempdir");
    let remote = root.path().join("remote.git");
    let work = root.path().join("work");
    std::fs::create_dir_all(&remote).unwrap();
    std::fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--bare", "--quiet"]);
    git(&work, &["init", "--quiet"]);
    git(&work, &["config", "user.name", "Feed Bot"]);
    git(&work, &["config", "user.email", "feed-bot@example.com"]);
    git(&work, &["config", "commit.gpgsign", "false"]);
    git(
        &work,
        &["remote", "add", "origin", remote.to_str().expect("utf-8 path")],
    );
    std::fs::write(work.join("README"), "feed repo\n").unwrap();
    git(&work, &["add", "README"]);
    git(&work, &["commit", "--quiet", "-m", "init"]);
    git(&work, &["push", "--quiet", "-u", "origin", "HEAD"]);

    (root, work, remote)
}

fn remote_commit_count(remote: &Path) -> usize {
    git(remote, &["rev-list", "--all", "--count"])
        .trim()
        .parse()
        .expect("commit count")
}

fn stamp() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap()
}

#[tokio::test]
async fn new_feed_is_committed_and_pushed() {
    if !git_available() {
        return;
    }
    let (_root, work, remote) = setup_repos();
    write_feed(&work.join("feed.xml"), "<products/>\n").await.unwrap();

    let outcome = GitPublisher::new(&work)
        .publish(Path::new("feed.xml"), stamp())
        .await
        .expect("publish should succeed");

    assert_eq!(outcome, PublishOutcome::Pushed);
    assert_eq!(remote_commit_count(&remote), 2);
    let subject = git(&work, &["log", "-1", "--format=%s", "@{u}"]);
    assert_eq!(subject.trim(), "Update feed at 2026-10-16T09:00:00Z");
}

#[tokio::test]
async fn unchanged_feed_is_skipped() {
    if !git_available() {
        return;
    }
    let (_root, work, remote) = setup_repos();
    let publisher = GitPublisher::new(&work);
    write_feed(&work.join("feed.xml"), "<products/>\n").await.unwrap();
    publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    write_feed(&work.join("feed.xml"), "<products/>\n").await.unwrap();
    let outcome = publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Unchanged);
    assert_eq!(remote_commit_count(&remote), 2);
}

#[tokio::test]
async fn unchanged_feed_still_commits_when_skip_is_disabled() {
    if !git_available() {
        return;
    }
    let (_root, work, remote) = setup_repos();
    let publisher = GitPublisher::new(&work).skip_unchanged(false);
    write_feed(&work.join("feed.xml"), "<products/>\n").await.unwrap();
    publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    let outcome = publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Pushed);
    assert_eq!(remote_commit_count(&remote), 3);
}

#[tokio::test]
async fn changed_feed_is_pushed_without_rebase() {
    if !git_available() {
        return;
    }
    let (_root, work, remote) = setup_repos();
    let publisher = GitPublisher::new(&work).pull_rebase(false);
    write_feed(&work.join("feed.xml"), "<products/>\n").await.unwrap();
    publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    write_feed(&work.join("feed.xml"), "<products>\n</products>\n")
        .await
        .unwrap();
    let outcome = publisher
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap();

    assert_eq!(outcome, PublishOutcome::Pushed);
    assert_eq!(remote_commit_count(&remote), 3);
}

#[tokio::test]
async fn failing_git_step_is_reported() {
    if !git_available() {
        return;
    }
    let (_root, work, _remote) = setup_repos();

    // The file does not exist, so `git add` fails.
    let err = GitPublisher::new(&work)
        .publish(Path::new("missing.xml"), stamp())
        .await
        .unwrap_err();

    match err {
        PublishError::CommandFailed { command, .. } => {
            assert_eq!(command, "git add -- missing.xml");
        }
        other => panic!("expected CommandFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn missing_working_directory_is_spawn_error() {
    let root = tempfile::tempdir().unwrap();
    let err = GitPublisher::new(root.path().join("does-not-exist"))
        .publish(Path::new("feed.xml"), stamp())
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::Spawn { .. }), "got: {err:?}");
}
