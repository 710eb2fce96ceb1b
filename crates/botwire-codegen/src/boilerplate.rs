//! Target runtime boilerplate
//!
//! The script opens with the bot setup and closes with the run call. Both are
//! Jinja templates rendered from the project's codegen settings.

use minijinja::{Environment, context};

use botwire_core::CodegenConfig;

use crate::error::Result;

const PREAMBLE: &str = "\
import discord
from discord.ext import commands

intents = discord.Intents.default()
intents.message_content = True
bot = commands.Bot(command_prefix='{{ command_prefix }}', intents=intents)";

const CLOSING: &str = "bot.run('{{ token }}')";

/// Rendered opening and closing lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boilerplate {
    /// Lines emitted before the first handler, ending with a blank line
    pub preamble: Vec<String>,
    /// Last line of the script
    pub closing: String,
}

impl Boilerplate {
    /// Render the boilerplate for the given settings
    pub fn render(settings: &CodegenConfig) -> Result<Self> {
        let env = Environment::new();

        let preamble = env.render_str(
            PREAMBLE,
            context! { command_prefix => &settings.command_prefix },
        )?;
        let closing = env.render_str(CLOSING, context! { token => &settings.token })?;

        let mut lines: Vec<String> = preamble.lines().map(str::to_string).collect();
        lines.push(String::new());

        Ok(Self {
            preamble: lines,
            closing,
        })
    }
}
