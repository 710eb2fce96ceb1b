use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use rstest::{fixture, rstest};
use std::path::Path;
use tempfile::TempDir;

const EXPECTED_SAMPLE: &str = "import discord
from discord.ext import commands

intents = discord.Intents.default()
intents.message_content = True
bot = commands.Bot(command_prefix='!', intents=intents)

@bot.command(name='hello')
async def cmd_0(ctx):
    await ctx.send('Hello World!')

bot.run('YOUR_TOKEN_HERE')";

#[fixture]
fn project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("botwire")
        .args(["init", dir.path().to_str().unwrap(), "--name", "test-bot"])
        .assert()
        .success();
    dir
}

fn botwire(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("botwire")
        .args(["--config", dir.to_str().unwrap()])
        .args(args)
        .assert()
}

fn layout(dir: &Path) -> serde_json::Value {
    let json = std::fs::read_to_string(dir.join("layout.json")).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[rstest]
fn test_init_and_compile(project: TempDir) {
    let dir = project.path();

    // Verify generated files exist
    assert!(dir.join("botwire.yaml").exists());
    assert!(dir.join("layout.json").exists());

    let doc = layout(dir);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(doc["connections"][0][0], "node_0");
    assert_eq!(doc["connections"][0][2], "node_1");

    botwire(dir, &["compile"]).success();

    let script = std::fs::read_to_string(dir.join("bot.py")).unwrap();
    assert_eq!(script, EXPECTED_SAMPLE);
}

#[rstest]
fn test_init_twice_fails(project: TempDir) {
    cargo_bin_cmd!("botwire")
        .args(["init", project.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already contains"));
}

#[rstest]
fn test_edit_then_compile(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["node", "add", "Print Console", "--x", "480", "--y", "40"]).success();
    botwire(dir, &["node", "set", "node_2", "text", "sent hello"]).success();
    botwire(dir, &["node", "set", "node_1", "text", "Hi!"]).success();
    botwire(dir, &["connect", "node_1", "node_2"]).success();
    botwire(dir, &["compile"]).success();

    let script = std::fs::read_to_string(dir.join("bot.py")).unwrap();
    assert!(script.contains(
        "async def cmd_0(ctx):\n    await ctx.send('Hi!')\n    print('sent hello')\n\n"
    ));

    let doc = layout(dir);
    assert_eq!(doc["nodes"][2]["x"], 480.0);
    assert_eq!(doc["connections"].as_array().unwrap().len(), 2);
}

#[rstest]
fn test_delete_node_removes_wires(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["node", "delete", "node_0"]).success();

    let doc = layout(dir);
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(doc["nodes"][0]["id"], "node_1");
    assert!(doc["connections"].as_array().unwrap().is_empty());

    // New ids continue past the highest loaded id
    botwire(dir, &["node", "add", "Command"]).success();
    let doc = layout(dir);
    assert_eq!(doc["nodes"][1]["id"], "node_2");
}

#[rstest]
fn test_disconnect_and_clear(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["disconnect", "node_0", "node_1"]).success();
    assert!(layout(dir)["connections"].as_array().unwrap().is_empty());

    botwire(dir, &["clear"]).success();
    assert!(layout(dir)["nodes"].as_array().unwrap().is_empty());

    botwire(dir, &["compile"]).success();
    let script = std::fs::read_to_string(dir.join("bot.py")).unwrap();
    assert!(script.ends_with("intents=intents)\n\nbot.run('YOUR_TOKEN_HERE')"));
}

#[rstest]
fn test_unknown_type_is_rejected(project: TempDir) {
    let dir = project.path();
    let before = std::fs::read_to_string(dir.join("layout.json")).unwrap();

    botwire(dir, &["node", "add", "Launch Rocket"])
        .failure()
        .stderr(predicate::str::contains("Launch Rocket"));

    let after = std::fs::read_to_string(dir.join("layout.json")).unwrap();
    assert_eq!(before, after);
}

#[rstest]
fn test_compile_skips_unchanged_output(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["compile"]).success();
    botwire(dir, &["compile"])
        .success()
        .stdout(predicate::str::contains("up to date"));
    botwire(dir, &["compile", "--force"])
        .success()
        .stdout(predicate::str::contains("up to date").not());
}

#[rstest]
fn test_compile_to_custom_output(project: TempDir) {
    let dir = project.path();
    let output = dir.join("build/out.py");

    botwire(dir, &["compile", "--output", output.to_str().unwrap()]).success();
    assert_eq!(std::fs::read_to_string(output).unwrap(), EXPECTED_SAMPLE);
}

#[rstest]
fn test_validate_reports_warnings(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["validate"])
        .success()
        .stdout(predicate::str::contains("Layout is valid"));

    botwire(dir, &["node", "add", "Reply to User"]).success();
    botwire(dir, &["validate"])
        .success()
        .stdout(predicate::str::contains("not reachable"));
}

#[rstest]
fn test_show_and_catalog(project: TempDir) {
    let dir = project.path();

    botwire(dir, &["show"])
        .success()
        .stdout(predicate::str::contains("node_0 Command"))
        .stdout(predicate::str::contains("node_0:0 -> node_1:0"));

    botwire(dir, &["catalog"])
        .success()
        .stdout(predicate::str::contains("Event: On Ready"));
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    botwire(dir.path(), &["show"])
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}
