use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;
use crate::naming::{NumberPosition, RenameConfig};

use super::{context::CliContext, prompts::Prompt, rename, settings};

#[derive(Parser, Debug, Clone)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    author = "WangErxi",
    about = "Batch-rename objects with prefixes, suffixes, numbering and regex substitution",
    after_help = "Storage is chosen with STORAGE_PROVIDER (fs | s3 | minio | oss); fs is the default."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Disable interactive prompts (confirmations fall back to "no")
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Override the settings file path
    #[arg(long = "settings", value_name = "PATH", env = "BATCHREN_SETTINGS", global = true)]
    pub settings: Option<PathBuf>,

    /// Root directory for the local filesystem provider (default: STORAGE_ROOT_PATH or cwd)
    #[arg(long = "root", value_name = "PATH", global = true)]
    pub root: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print generated names for the given names (or stdin lines) without touching storage
    Generate(GenerateArgs),
    /// Show how selected objects would be renamed
    Preview(PreviewArgs),
    /// Rename selected objects
    Rename(RenameArgs),
    /// Move the objects of the last rename back to their previous paths
    Undo(UndoArgs),
    /// Inspect or change the remembered rename settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

impl Command {
    pub fn requires_storage(&self) -> bool {
        matches!(
            self,
            Command::Preview(_) | Command::Rename(_) | Command::Undo(_)
        )
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show the stored settings
    Show,
    /// Update stored settings from the given flags
    Set(SetArgs),
    /// Reset stored settings
    #[command(alias = "reset")]
    Clear,
}

/// Per-invocation overrides of the stored rename settings
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct RenameOptions {
    /// Text added before each name
    #[arg(long, value_name = "TEXT")]
    pub prefix: Option<String>,

    /// Text added after each name
    #[arg(long, value_name = "TEXT")]
    pub suffix: Option<String>,

    /// Name used instead of the original when --use-base-name is on
    #[arg(long = "base-name", value_name = "TEXT")]
    pub base_name: Option<String>,

    /// Replace original names with the base name
    #[arg(long = "use-base-name", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub use_base_name: Option<bool>,

    /// Strip a trailing ".<digits>" from original names (Cube.001 -> Cube)
    #[arg(long = "remove-trailing-number", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub remove_trailing_number: Option<bool>,

    /// Add sequential numbers
    #[arg(long = "add-numbers", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub add_numbers: Option<bool>,

    /// Where numbers go (prefix | suffix)
    #[arg(long = "number-position", value_name = "POSITION", value_parser = parse_number_position)]
    pub number_position: Option<NumberPosition>,

    /// Text between name and number (at most 3 characters)
    #[arg(long = "separator", value_name = "TEXT")]
    pub number_separator: Option<String>,

    /// First number of the sequence
    #[arg(long = "start", value_name = "N")]
    pub start_number: Option<u32>,

    /// Minimum number of digits (1-6)
    #[arg(long, value_name = "DIGITS")]
    pub padding: Option<usize>,

    /// Regex replaced in the composed name
    #[arg(long = "search", value_name = "REGEX")]
    pub search_pattern: Option<String>,

    /// Replacement for --search matches; ${1} or ${name} refer to groups, $$ is a literal '$'
    #[arg(long = "replace", value_name = "TEXT")]
    pub replace_pattern: Option<String>,

    /// Sort by original name before numbering
    #[arg(long = "sort-by-name", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub sort_by_original_name: Option<bool>,
}

impl RenameOptions {
    /// Layer the flags that were given on top of `base`.
    pub fn apply_to(&self, base: &RenameConfig) -> RenameConfig {
        let mut config = base.clone();

        macro_rules! override_field {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        config.$field = value.clone();
                    }
                )*
            };
        }

        override_field!(
            prefix,
            suffix,
            base_name,
            use_base_name,
            remove_trailing_number,
            add_numbers,
            number_position,
            number_separator,
            start_number,
            padding,
            search_pattern,
            replace_pattern,
            sort_by_original_name,
        );
        config
    }
}

fn parse_number_position(value: &str) -> std::result::Result<NumberPosition, String> {
    value.parse::<NumberPosition>().map_err(|err| err.to_string())
}

/// Which objects to pick up from storage
#[derive(ClapArgs, Debug, Clone)]
pub struct SelectionArgs {
    /// Files or directories to rename (directories select the files inside)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Descend into subdirectories
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Only select objects whose name matches this glob
    #[arg(long = "name", value_name = "GLOB")]
    pub name_glob: Option<String>,

    /// Only select objects whose path matches this regex
    #[arg(long, value_name = "REGEX")]
    pub regex: Option<String>,

    /// Rename only the stem and keep each file's extension
    #[arg(short = 'k', long = "keep-extension")]
    pub keep_extension: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Original names (read from stdin, one per line, when omitted)
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Print original and new names as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub rename: RenameOptions,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of objects shown (0 shows all)
    #[arg(short = 'n', long, default_value_t = 3)]
    pub limit: usize,

    #[command(flatten)]
    pub rename: RenameOptions,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RenameArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Move renamed objects into this directory (created when missing)
    #[arg(short = 'g', long, value_name = "NAME")]
    pub group: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(flatten)]
    pub rename: RenameOptions,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct UndoArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SetArgs {
    #[command(flatten)]
    pub rename: RenameOptions,
}

pub async fn run(args: Args) -> Result<()> {
    run_with_prompt(args, None).await
}

pub async fn run_with_prompt(args: Args, prompt: Option<Prompt>) -> Result<()> {
    let prompt = prompt.unwrap_or_else(|| Prompt::new(!args.global.non_interactive));

    let ctx = CliContext::from_args(args, prompt)?;
    match ctx.command() {
        Command::Settings(cmd) => settings::execute(cmd, &ctx),
        rename_cmd => rename::execute(rename_cmd, &ctx).await,
    }
}
