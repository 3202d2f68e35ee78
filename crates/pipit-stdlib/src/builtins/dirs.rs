//! Directory builtins: cd, visited-dirs, jump-dir

use super::helpers::*;
use pipit_core::{BuiltinError, Context, Signal, Value};
use std::env;

/// Builtin: cd [DIR]
///
/// Changes the working directory of the process, to `$HOME` when no
/// directory is given. The new directory is recorded in the directory store
/// when one is attached; a failure to record it is only logged.
pub fn builtin_cd(ctx: &mut Context, args: Vec<Value>) -> Signal {
    let target = match args.as_slice() {
        [] => match env::var("HOME") {
            Ok(home) => home,
            Err(_) => return BuiltinError::External("HOME is not set".to_string()).into(),
        },
        [dir] => dir.to_text(),
        _ => return BuiltinError::Arguments.into(),
    };
    change_dir(ctx, &target).into()
}

fn change_dir(ctx: &Context, target: &str) -> Result<(), BuiltinError> {
    env::set_current_dir(target)?;
    tracing::debug!(dir = target, "changed directory");

    if let Some(store) = &ctx.store {
        let recorded = env::current_dir()
            .map_err(BuiltinError::from)
            .and_then(|pwd| {
                store
                    .add_dir(&pwd.to_string_lossy())
                    .map_err(BuiltinError::from)
            });
        if let Err(err) = recorded {
            tracing::warn!(%err, "failed to record directory");
        }
    }
    Ok(())
}

/// Builtin: visited-dirs -> one `[&path=... &score=...]` map per stored dir
pub fn builtin_visited_dirs(ctx: &mut Context) -> Signal {
    list_visited(ctx).into()
}

fn list_visited(ctx: &Context) -> Result<(), BuiltinError> {
    let store = require_store(ctx)?;
    for dir in store.list_dirs()? {
        emit(ctx, dir_entry(&dir.path, dir.score))?;
    }
    Ok(())
}

/// Builtin: jump-dir FRAGMENT
///
/// Changes to the best-scoring stored directory whose path contains
/// FRAGMENT, then records the visit.
pub fn builtin_jump_dir(ctx: &mut Context, fragment: String) -> Signal {
    jump(ctx, &fragment).into()
}

fn jump(ctx: &Context, fragment: &str) -> Result<(), BuiltinError> {
    let store = require_store(ctx)?;
    let best = store
        .find_dirs(fragment)?
        .into_iter()
        .next()
        .ok_or(BuiltinError::NoMatchingDir)?;
    env::set_current_dir(&best.path)?;
    tracing::debug!(dir = %best.path, fragment, "jumped to directory");
    if let Err(err) = store.add_dir(&best.path) {
        tracing::warn!(%err, "failed to record directory");
    }
    Ok(())
}
