use std::io::{self, BufRead};

use globset::Glob;
use regex::Regex;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task;

use crate::config::RenameJournal;
use crate::error::{Error, Result};
use crate::naming::{NameGenerator, RenameItem, generate};
use crate::storage::utils::path::{as_dir_path, split_extension};
use crate::storage::{RenamePlan, SelectOptions, SelectedObject, StorageClient};
use crate::utils::{format_preview, format_rename_message};

use super::context::CliContext;
use super::entry::{Command, GenerateArgs, PreviewArgs, RenameArgs, SelectionArgs, UndoArgs};

#[derive(Debug, Serialize)]
struct GeneratedName<'a> {
    original: &'a str,
    new: &'a str,
}

pub async fn execute(command: &Command, ctx: &CliContext) -> Result<()> {
    match command {
        Command::Generate(args) => generate_names(args, ctx),
        Command::Preview(args) => preview(args, ctx).await,
        Command::Rename(args) => rename(args, ctx).await,
        Command::Undo(args) => undo(args, ctx).await,
        Command::Settings(_) => {
            unreachable!("Settings commands are handled separately")
        }
    }
}

fn generate_names(args: &GenerateArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.rename_config(&args.rename)?;
    let names = if args.names.is_empty() {
        read_names(io::stdin().lock())?
    } else {
        args.names.clone()
    };

    let items = names
        .into_iter()
        .enumerate()
        .map(|(position, name)| RenameItem::new(name, position))
        .collect();
    let result = generate(items, &config)?;

    if args.json {
        let rows: Vec<GeneratedName> = result
            .iter()
            .map(|item| GeneratedName {
                original: &item.original_name,
                new: &item.new_name,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for item in &result {
            println!("{}", item.new_name);
        }
    }
    Ok(())
}

fn read_names(reader: impl BufRead) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let name = line.trim_end_matches('\r');
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

async fn preview(args: &PreviewArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.rename_config(&args.rename)?;
    let client = ctx.storage_client()?;
    let objects = select(&client, &args.selection).await?;

    println!("Selected objects: {}", objects.len());
    if objects.is_empty() {
        println!("Select objects to rename");
        return Ok(());
    }

    let keep_extension = args.selection.keep_extension;
    let generator = NameGenerator::new(&config)?;
    let result = generator.generate(
        objects
            .iter()
            .map(|object| object.rename_item(keep_extension))
            .collect(),
    );
    let shown: Vec<(&str, String)> = result
        .iter()
        .map(|item| {
            let new = target_name(&item.id, &item.new_name, keep_extension);
            (item.id.name.as_str(), new)
        })
        .collect();

    print!(
        "{}",
        format_preview(
            shown.iter().map(|(old, new)| (*old, new.as_str())),
            args.limit
        )
    );
    Ok(())
}

fn target_name(object: &SelectedObject, new_name: &str, keep_extension: bool) -> String {
    if keep_extension {
        format!("{new_name}{}", split_extension(&object.name).1)
    } else {
        new_name.to_string()
    }
}

async fn rename(args: &RenameArgs, ctx: &CliContext) -> Result<()> {
    let config = ctx.rename_config(&args.rename)?;
    let client = ctx.storage_client()?;
    let objects = select(&client, &args.selection).await?;
    if objects.is_empty() {
        return Err(Error::NoSelection);
    }

    let keep_extension = args.selection.keep_extension;
    let items = objects
        .iter()
        .map(|object| object.rename_item(keep_extension))
        .collect();
    let result = generate(items, &config)?;

    let group_dir = args.group.as_deref().map(as_dir_path);
    let plan = RenamePlan::build(&result, group_dir.as_deref(), keep_extension)?;
    plan.check_conflicts()?;

    if plan.is_empty() {
        println!("Nothing to rename: {} object(s) already named", plan.unchanged);
        return Ok(());
    }

    if !confirm_plan(ctx, &plan, args.yes, "rename confirmation")? {
        println!("Operation cancelled.");
        return Ok(());
    }

    if let Some(group) = args.group.as_deref() {
        client.ensure_group(group).await?;
    }

    let moved = client.apply_plan(&plan).await?;
    record_for_undo(ctx, &plan);
    println!("Renamed {moved} objects");
    if plan.unchanged > 0 {
        println!("{} object(s) already had their new name", plan.unchanged);
    }
    Ok(())
}

/// Keep the applied moves for `undo`; the rename itself already succeeded.
fn record_for_undo(ctx: &CliContext, plan: &RenamePlan) {
    let recorded = ctx.open_settings().and_then(|store| {
        let location = ctx.storage_config()?.location();
        RenameJournal::new(location, plan).save(&RenameJournal::path_beside(store.path()))
    });
    if let Err(err) = recorded {
        log::warn!("rename applied but could not be recorded for undo: {err}");
    }
}

async fn undo(args: &UndoArgs, ctx: &CliContext) -> Result<()> {
    let store = ctx.open_settings()?;
    let path = RenameJournal::path_beside(store.path());
    let journal = RenameJournal::load(&path)?
        .ok_or_else(|| Error::NothingToUndo { path: path.clone() })?;

    let location = ctx.storage_config()?.location();
    if journal.storage != location {
        return Err(Error::InvalidArgument {
            message: format!(
                "the last rename was applied to '{}', not '{location}'",
                journal.storage
            ),
        });
    }

    let plan = journal.undo_plan();
    if !confirm_plan(ctx, &plan, args.yes, "undo confirmation")? {
        println!("Operation cancelled.");
        return Ok(());
    }

    let client = ctx.storage_client()?;
    let restored = client.apply_plan(&plan).await?;
    RenameJournal::remove(&path)?;
    println!("Restored {restored} objects");
    Ok(())
}

/// Ask before applying `plan` unless `yes` was given.
fn confirm_plan(ctx: &CliContext, plan: &RenamePlan, yes: bool, action: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    ctx.ensure_interactive(action)?;
    let prompt = ctx.prompt();
    let message = format_rename_message(plan);
    task::block_in_place(|| Handle::current().block_on(prompt.confirm(&message, false)))
}

async fn select(client: &StorageClient, args: &SelectionArgs) -> Result<Vec<SelectedObject>> {
    let opts = select_options(args)?;
    client.select_objects(&args.paths, &opts).await
}

fn select_options(args: &SelectionArgs) -> Result<SelectOptions> {
    let name_glob = args
        .name_glob
        .as_deref()
        .map(|pattern| {
            Glob::new(pattern)
                .map(|glob| glob.compile_matcher())
                .map_err(|err| Error::InvalidArgument {
                    message: format!("invalid --name glob '{pattern}': {err}"),
                })
        })
        .transpose()?;

    let regex = args
        .regex
        .as_deref()
        .map(|pattern| {
            Regex::new(pattern).map_err(|err| Error::InvalidArgument {
                message: format!("invalid --regex '{pattern}': {err}"),
            })
        })
        .transpose()?;

    Ok(SelectOptions {
        recursive: args.recursive,
        name_glob,
        regex,
    })
}
