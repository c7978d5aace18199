use crate::error::Result;

use super::context::CliContext;
use super::entry::{SetArgs, SettingsCommand};

pub fn execute(command: &SettingsCommand, ctx: &CliContext) -> Result<()> {
    match command {
        SettingsCommand::Show => show_settings(ctx),
        SettingsCommand::Set(args) => set_settings(args, ctx),
        SettingsCommand::Clear => clear_settings(ctx),
    }
}

fn show_settings(ctx: &CliContext) -> Result<()> {
    let store = ctx.open_settings()?;
    let source = if store.path().exists() {
        store.path().display().to_string()
    } else {
        format!("defaults ({} not written yet)", store.path().display())
    };
    println!("# Settings source: {source}\n");
    print!("{}", store.to_toml()?);
    Ok(())
}

fn set_settings(args: &SetArgs, ctx: &CliContext) -> Result<()> {
    let mut store = ctx.open_settings()?;
    let updated = args.rename.apply_to(store.config());
    if &updated == store.config() && store.path().exists() {
        println!("Settings unchanged.");
        return Ok(());
    }

    store.save(updated)?;
    println!("Settings saved to {}", store.path().display());
    Ok(())
}

fn clear_settings(ctx: &CliContext) -> Result<()> {
    let mut store = ctx.open_settings()?;
    store.clear()?;
    println!("Settings cleared.");
    Ok(())
}
