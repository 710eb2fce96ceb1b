//! Integration tests for graph → script compilation
//!
//! Covers the compiler's observable contract:
//! - Exact output for the canonical scenarios
//! - Determinism and minimal diffs on property edits
//! - Cycle and fan-out handling
//! - Compiling layouts from disk

use botwire_codegen::{CompileOptions, Compiler, Diagnostic};
use botwire_core::{LayoutDocument, Point, Registry, Session};
use rstest::{fixture, rstest};

const PREAMBLE: &str = "import discord
from discord.ext import commands

intents = discord.Intents.default()
intents.message_content = True
bot = commands.Bot(command_prefix='!', intents=intents)
";

const CLOSING: &str = "bot.run('YOUR_TOKEN_HERE')";

#[fixture]
fn session() -> Session {
    Session::new(Registry::builtin())
}

#[fixture]
fn compiler() -> Compiler {
    Compiler::new(CompileOptions::default())
}

fn compile(compiler: &Compiler, session: &Session) -> String {
    compiler
        .compile(session.graph(), session.registry())
        .unwrap()
        .source
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
fn test_empty_graph(session: Session, compiler: Compiler) {
    let source = compile(&compiler, &session);
    assert_eq!(source, format!("{PREAMBLE}\n{CLOSING}"));
}

#[rstest]
fn test_command_with_one_action(mut session: Session, compiler: Compiler) {
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let send = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    session.set_property(&cmd, "trigger", "hello").unwrap();
    session.set_property(&send, "text", "Hi!").unwrap();
    session.connect(&cmd, 0, &send, 0).unwrap();

    let source = compile(&compiler, &session);
    let expected = format!(
        "{PREAMBLE}\n\
         @bot.command(name='hello')\n\
         async def cmd_0(ctx):\n    \
         await ctx.send('Hi!')\n\
         \n\
         {CLOSING}"
    );
    assert_eq!(source, expected);
}

#[rstest]
fn test_three_cycle_without_root(mut session: Session, compiler: Compiler) {
    let ids: Vec<_> = ["Send Message", "Reply to User", "Print Console"]
        .iter()
        .map(|t| session.add_node(t, Point::default(), None).unwrap())
        .collect();
    for i in 0..3 {
        session.connect(&ids[i], 0, &ids[(i + 1) % 3], 0).unwrap();
    }

    assert_eq!(compile(&compiler, &session), format!("{PREAMBLE}\n{CLOSING}"));
}

#[rstest]
fn test_deleted_node_breaks_chain(mut session: Session, compiler: Compiler) {
    let ready = session
        .add_node("Event: On Ready", Point::default(), None)
        .unwrap();
    let a = session
        .add_node("Print Console", Point::default(), None)
        .unwrap();
    let b = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    session.set_property(&a, "text", "first").unwrap();
    session.set_property(&b, "text", "second").unwrap();
    session.connect(&ready, 0, &a, 0).unwrap();
    session.connect(&a, 0, &b, 0).unwrap();

    session.delete_node(&a).unwrap();

    let source = compile(&compiler, &session);
    assert!(source.contains("async def on_ready():\n\nbot.run"));
    assert!(!source.contains("first"));
    assert!(!source.contains("second"));
}

#[rstest]
fn test_roots_emitted_in_graph_order(mut session: Session, compiler: Compiler) {
    let ready = session
        .add_node("Event: On Ready", Point::default(), None)
        .unwrap();
    let log = session
        .add_node("Print Console", Point::default(), None)
        .unwrap();
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let reply = session
        .add_node("Reply to User", Point::default(), None)
        .unwrap();
    session.set_property(&cmd, "trigger", "ping").unwrap();
    session.set_property(&reply, "text", "pong").unwrap();
    session.connect(&ready, 0, &log, 0).unwrap();
    session.connect(&cmd, 0, &reply, 0).unwrap();

    let source = compile(&compiler, &session);
    let body = source
        .strip_prefix(PREAMBLE)
        .and_then(|s| s.strip_suffix(CLOSING))
        .unwrap();
    assert_eq!(
        body,
        "\n@bot.event\nasync def on_ready():\n    print('Debug message')\n\n\
         @bot.command(name='ping')\nasync def cmd_2(ctx):\n    await ctx.reply('pong')\n\n"
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[rstest]
fn test_compile_is_deterministic(mut session: Session, compiler: Compiler) {
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let mut prev = cmd.clone();
    for t in ["Send Message", "Print Console", "Reply to User"] {
        let id = session.add_node(t, Point::default(), None).unwrap();
        session.connect(&prev, 0, &id, 0).unwrap();
        prev = id;
    }

    let first = compiler
        .compile(session.graph(), session.registry())
        .unwrap();
    let second = compiler
        .compile(session.graph(), session.registry())
        .unwrap();
    assert_eq!(first.source, second.source);
    assert_eq!(first.hash, second.hash);
}

#[rstest]
fn test_property_edit_changes_only_its_line(mut session: Session, compiler: Compiler) {
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let send = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    let log = session
        .add_node("Print Console", Point::default(), None)
        .unwrap();
    session.connect(&cmd, 0, &send, 0).unwrap();
    session.connect(&send, 0, &log, 0).unwrap();

    let before = compile(&compiler, &session);
    session.set_property(&send, "text", "Changed").unwrap();
    let after = compile(&compiler, &session);

    let before: Vec<_> = before.lines().collect();
    let after: Vec<_> = after.lines().collect();
    assert_eq!(before.len(), after.len());

    let changed: Vec<_> = before
        .iter()
        .zip(&after)
        .filter(|(b, a)| b != a)
        .collect();
    assert_eq!(
        changed,
        vec![(&"    await ctx.send('Hello World!')", &"    await ctx.send('Changed')")]
    );
}

// =============================================================================
// Flow Shapes
// =============================================================================

#[rstest]
fn test_cycle_after_root_is_truncated(mut session: Session, compiler: Compiler) {
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let a = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    let b = session
        .add_node("Reply to User", Point::default(), None)
        .unwrap();
    session.connect(&cmd, 0, &a, 0).unwrap();
    session.connect(&a, 0, &b, 0).unwrap();
    session.connect(&b, 0, &a, 0).unwrap();

    let compiled = compiler
        .compile(session.graph(), session.registry())
        .unwrap();
    assert_eq!(compiled.source.matches("ctx.send").count(), 1);
    assert_eq!(compiled.source.matches("ctx.reply").count(), 1);
    assert_eq!(
        compiled.diagnostics,
        vec![Diagnostic::CycleTruncated {
            root_id: cmd,
            at: a,
        }]
    );
}

#[rstest]
fn test_fan_out_follows_first_wire(mut session: Session, compiler: Compiler) {
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let first = session
        .add_node("Print Console", Point::default(), None)
        .unwrap();
    let second = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    session.connect(&cmd, 0, &first, 0).unwrap();
    session.connect(&cmd, 0, &second, 0).unwrap();

    let compiled = compiler
        .compile(session.graph(), session.registry())
        .unwrap();
    assert!(compiled.source.contains("print('Debug message')"));
    assert!(!compiled.source.contains("ctx.send"));
    assert_eq!(compiled.diagnostics.len(), 2);
}

// =============================================================================
// Layout Files
// =============================================================================

#[rstest]
fn test_compile_all_layouts(mut session: Session, compiler: Compiler) {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::builtin();

    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let send = session
        .add_node("Send Message", Point::default(), None)
        .unwrap();
    session.connect(&cmd, 0, &send, 0).unwrap();
    session.serialize().save(dir.path().join("b.json")).unwrap();
    LayoutDocument::default()
        .save(dir.path().join("a.json"))
        .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let results = compiler.compile_all(dir.path(), &registry).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].0.ends_with("a.json"));
    assert_eq!(results[0].1.handlers, 0);
    assert!(results[1].0.ends_with("b.json"));
    assert_eq!(results[1].1.handlers, 1);
}

#[rstest]
fn test_reloaded_layout_compiles_identically(mut session: Session, compiler: Compiler) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layout.json");
    let cmd = session.add_node("Command", Point::default(), None).unwrap();
    let reply = session
        .add_node("Reply to User", Point::default(), None)
        .unwrap();
    session.set_property(&cmd, "trigger", "status").unwrap();
    session.connect(&cmd, 0, &reply, 0).unwrap();
    session.serialize().save(&path).unwrap();

    let direct = compile(&compiler, &session);
    let from_disk = compiler
        .compile_layout(&path, session.registry())
        .unwrap()
        .source;
    assert_eq!(direct, from_disk);
}

#[rstest]
fn test_custom_settings(mut session: Session) {
    let compiler = Compiler::new(CompileOptions {
        settings: botwire_core::CodegenConfig {
            function_prefix: "handle_".to_string(),
            command_prefix: "?".to_string(),
            token: "TOKEN".to_string(),
        },
        debug: false,
    });
    session.add_node("Command", Point::default(), None).unwrap();

    let source = compile(&compiler, &session);
    assert!(source.contains("command_prefix='?'"));
    assert!(source.contains("async def handle_0(ctx):"));
    assert!(source.ends_with("bot.run('TOKEN')"));
}

// =============================================================================
// Handler Names
// =============================================================================

#[rstest]
fn test_handler_names_unique_for_equal_numeric_ids(mut session: Session, compiler: Compiler) {
    let first = session
        .add_node("Command", Point::default(), Some("node_3"))
        .unwrap();
    let second = session
        .add_node("Command", Point::default(), Some("node_03"))
        .unwrap();
    session.set_property(&first, "trigger", "one").unwrap();
    session.set_property(&second, "trigger", "two").unwrap();

    let source = compile(&compiler, &session);
    assert_eq!(source.matches("async def cmd_3(ctx):").count(), 1);
    assert_eq!(source.matches("async def cmd_03(ctx):").count(), 1);
}

#[rstest]
fn test_handler_names_unique_for_loaded_custom_ids(compiler: Compiler) {
    let registry = Registry::builtin();
    let doc = LayoutDocument::from_json_str(
        r#"{
            "nodes": [
                {"id": "greet-user", "type": "Command", "x": 0, "y": 0},
                {"id": "greet_user", "type": "Command", "x": 0, "y": 0},
                {"id": "greet user", "type": "Command", "x": 0, "y": 0}
            ]
        }"#,
    )
    .unwrap();
    let mut session = Session::new(registry);
    session.deserialize(&doc).unwrap();

    let compiled = compiler
        .compile(session.graph(), session.registry())
        .unwrap();
    let headers: Vec<_> = compiled
        .source
        .lines()
        .filter(|l| l.starts_with("async def "))
        .collect();
    assert_eq!(
        headers,
        vec![
            "async def cmd_greet_user(ctx):",
            "async def cmd_greet_user_2(ctx):",
            "async def cmd_greet_user_3(ctx):",
        ]
    );
    assert_eq!(compiled.handlers, 3);
}
