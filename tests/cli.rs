use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(site: &Path) -> Command {
    let mut cmd = Command::cargo_bin("crewpost").unwrap();
    cmd.arg("--cwd").arg(site).env_remove("RUST_LOG");
    cmd
}

fn init_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    cmd(dir.path()).arg("init").assert().success().stdout(contains("Initialized site"));
    dir
}

fn write_article(site: &Path, name: &str, body: &str) {
    fs::write(site.join("source/_articles").join(name), body).unwrap();
}

#[test]
fn init_then_generate() {
    let site = init_site();
    cmd(site.path()).arg("generate").assert().success().stdout(contains("Generated successfully!"));

    let public = site.path().join("public");
    assert!(public.join("index.html").exists());
    assert!(public.join("css/style.css").exists());
    assert!(public.join("blog/categories/cabin-crew/index.html").exists());

    let page = fs::read_to_string(public.join("blog/welcome-aboard/index.html")).unwrap();
    assert!(page.contains(r#"<nav class="toc">"#));
    assert!(page.contains("Pro Tip"));
    assert!(page.contains("<details"));
}

#[test]
fn generate_alias() {
    let site = init_site();
    cmd(site.path()).arg("g").assert().success();
    assert!(site.path().join("public/index.html").exists());
}

#[test]
fn check_passes_with_warnings() {
    let site = init_site();
    write_article(
        site.path(),
        "pay.yml",
        "title: Pay\nauthor: {name: A}\ndate: 2024-06-03\nblocks:\n  - type: table\n    headers: [a, b]\n    rows: [[x]]\n",
    );

    cmd(site.path())
        .arg("check")
        .assert()
        .success()
        .stdout(contains("warning: pay: block #0: table row 0 has 1 cells, expected 2"))
        .stdout(contains("Checked 2 articles: 0 rejected file(s), 1 warning(s)"));
}

#[test]
fn check_fails_on_malformed_block() {
    let site = init_site();
    write_article(
        site.path(),
        "broken.yml",
        "title: Broken\nauthor: {name: A}\ndate: 2024-06-03\nblocks:\n  - type: myth_buster\n    myth: only\n",
    );

    cmd(site.path())
        .arg("check")
        .assert()
        .failure()
        .stdout(contains("error:"))
        .stdout(contains("block #0 (myth-buster)"));
}

#[test]
fn generate_strict_fails_on_rejected_file() {
    let site = init_site();
    write_article(site.path(), "junk.json", "{ not json");

    cmd(site.path()).arg("generate").assert().failure();
    assert!(!site.path().join("public/index.html").exists());
}

#[test]
fn render_html_and_json() {
    let site = init_site();

    cmd(site.path())
        .args(["render", "welcome-aboard"])
        .assert()
        .success()
        .stdout(contains(r#"<h1 class="article-title">Welcome Aboard</h1>"#))
        .stdout(contains("<strong>before</strong>"));

    cmd(site.path())
        .args(["render", "welcome-aboard", "--format", "json"])
        .assert()
        .success()
        .stdout(contains(r#""tag": "header""#));

    cmd(site.path())
        .args(["render", "nope"])
        .assert()
        .failure()
        .stderr(contains("No article with slug"));
}

#[test]
fn new_then_list() {
    let site = init_site();

    cmd(site.path())
        .args(["new", "Night Flights 101"])
        .assert()
        .success()
        .stdout(contains("night-flights-101.yml"));

    cmd(site.path())
        .args(["new", "Night Flights 101"])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    cmd(site.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Articles (2):"))
        .stdout(contains("night-flights-101 - Night Flights 101 [1 blocks]"));

    cmd(site.path())
        .args(["list", "--category", "Cabin Crew"])
        .assert()
        .success()
        .stdout(contains("Articles (1):"))
        .stdout(contains("welcome-aboard").and(contains("night-flights-101").not()));

    cmd(site.path())
        .args(["list", "--categories"])
        .assert()
        .success()
        .stdout(contains("Cabin Crew (1)"));
}

#[test]
fn clean_removes_public() {
    let site = init_site();
    cmd(site.path()).arg("generate").assert().success();
    cmd(site.path()).arg("clean").assert().success().stdout(contains("Cleaned successfully!"));
    assert!(!site.path().join("public").exists());
}

#[test]
fn version() {
    let dir = TempDir::new().unwrap();
    cmd(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
