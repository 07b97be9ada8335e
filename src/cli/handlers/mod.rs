use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::store_io;
use crate::model::config::StoreConfig;
use crate::model::item::Item;
use crate::ops::create_child;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, store: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    debug!(path = %store.path.display(), "using todo file");

    match cli.command {
        None => cmd_list(PathArgs { path: Vec::new() }, store, json),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(args, store, json),
            Commands::Create(args) => cmd_create(args, store, json),
            Commands::Finish(args) => cmd_finish(args, store, json),
            Commands::Unfinish(args) => cmd_unfinish(args, store, json),
            Commands::Cleanup(args) => cmd_cleanup(args, store, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Render an item for stdout, either as text lines or as JSON.
fn render(item: &Item, is_top: bool, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string_pretty(&item_to_json(item))
    } else {
        Ok(format_subtree(item, is_top).join("\n"))
    }
}

/// Load the tree, apply `op` to the item at `path`, save, and print the
/// item as it looks after the change.
///
/// Output is rendered before saving because cleanup may hide the very item
/// it was run on.
fn mutate_and_show<F>(
    store: &StoreConfig,
    path: &[String],
    json: bool,
    op: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Item) -> Result<(), Box<dyn std::error::Error>>,
{
    let mut tree = store_io::load_tree(store)?;
    let output = {
        let target = tree.descend_mut(path)?;
        op(target)?;
        render(target, path.is_empty(), json)?
    };
    store_io::save_tree(store, &tree)?;
    println!("{}", output);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    args: PathArgs,
    store: &StoreConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tree = store_io::load_tree(store)?;
    let item = tree.descend(&args.path)?;
    println!("{}", render(item, args.path.is_empty(), json)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_create(
    args: CreateArgs,
    store: &StoreConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (parent, label) = args.split();
    debug!(parent = ?parent, label, "creating item");
    mutate_and_show(store, parent, json, |item| {
        create_child(item, label)?;
        Ok(())
    })
}

fn cmd_finish(
    args: RequiredPathArgs,
    store: &StoreConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(path = ?args.path, "finishing item");
    mutate_and_show(store, &args.path, json, |item| {
        item.finish();
        Ok(())
    })
}

fn cmd_unfinish(
    args: RequiredPathArgs,
    store: &StoreConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(path = ?args.path, "unfinishing item");
    mutate_and_show(store, &args.path, json, |item| {
        item.unfinish();
        Ok(())
    })
}

fn cmd_cleanup(
    args: PathArgs,
    store: &StoreConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    debug!(path = ?args.path, "cleaning up");
    mutate_and_show(store, &args.path, json, |item| {
        item.cleanup();
        Ok(())
    })
}
