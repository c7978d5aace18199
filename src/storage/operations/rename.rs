use crate::error::{Error, Result};
use crate::naming::RenamedItem;
use crate::storage::operations::select::SelectedObject;
use crate::storage::utils::path::{build_object_path, parent_dir_of, split_extension};
use crate::wrap_err;
use opendal::Operator;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A single object move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOp {
    pub from: String,
    pub to: String,
}

/// The moves needed to apply a set of generated names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    pub ops: Vec<RenameOp>,
    /// Objects whose target equals their current path
    pub unchanged: usize,
}

impl RenamePlan {
    /// Map generated names to target paths.
    ///
    /// Targets land next to the source, or inside `group_dir` when given.
    /// With `keep_extension` the source extension is appended to the new name.
    pub fn build(
        results: &[RenamedItem<SelectedObject>],
        group_dir: Option<&str>,
        keep_extension: bool,
    ) -> Result<Self> {
        let mut plan = RenamePlan::default();

        for item in results {
            let object = &item.id;
            if item.new_name.contains('/') {
                return Err(Error::InvalidArgument {
                    message: format!(
                        "generated name '{}' for '{}' contains '/'",
                        item.new_name, object.path
                    ),
                });
            }

            let mut file_name = item.new_name.clone();
            if keep_extension {
                file_name.push_str(split_extension(&object.name).1);
            }

            let dir = group_dir.unwrap_or_else(|| parent_dir_of(&object.path));
            let to = build_object_path(dir, &file_name);
            if to == object.path {
                plan.unchanged += 1;
            } else {
                plan.ops.push(RenameOp {
                    from: object.path.clone(),
                    to,
                });
            }
        }

        Ok(plan)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Reject plans where two objects end up on the same path.
    pub fn check_conflicts(&self) -> Result<()> {
        let mut targets: HashMap<&str, &str> = HashMap::new();
        for op in &self.ops {
            if let Some(first) = targets.insert(&op.to, &op.from) {
                return Err(Error::NameConflict {
                    target: op.to.clone(),
                    first: first.to_string(),
                    second: op.from.clone(),
                });
            }
        }
        Ok(())
    }

    /// Whether some target is the current path of another object in the plan,
    /// which requires moving through temporary names.
    pub fn needs_staging(&self) -> bool {
        let sources: HashSet<&str> = self.ops.iter().map(|op| op.from.as_str()).collect();
        self.ops.iter().any(|op| sources.contains(op.to.as_str()))
    }
}

pub trait Renamer {
    /// Apply every move of the plan, returning how many objects were moved.
    async fn apply(&self, plan: &RenamePlan) -> Result<usize>;
}

pub struct OpenDalRenamer {
    operator: Operator,
}

impl OpenDalRenamer {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    /// Everything that can be checked before the first object moves.
    async fn preflight(&self, plan: &RenamePlan) -> Result<()> {
        plan.check_conflicts()?;

        let sources: HashSet<&str> = plan.ops.iter().map(|op| op.from.as_str()).collect();
        for op in &plan.ops {
            if !sources.contains(op.to.as_str()) && self.operator.exists(&op.to).await? {
                return Err(Error::TargetExists {
                    src_path: op.from.clone(),
                    dest_path: op.to.clone(),
                });
            }
        }
        Ok(())
    }

    async fn move_object(&self, from: &str, to: &str) -> Result<()> {
        log::debug!("move_object from={from} to={to}");
        let capability = self.operator.info().full_capability();
        if capability.rename {
            self.operator.rename(from, to).await?;
        } else if capability.copy {
            self.operator.copy(from, to).await?;
            self.operator.delete(from).await?;
        } else {
            return Err(Error::Unsupported {
                message: "neither rename nor copy is available".to_string(),
            });
        }
        Ok(())
    }

    async fn move_wrapped(&self, from: &str, to: &str) -> Result<()> {
        wrap_err!(
            self.move_object(from, to).await,
            RenameFailed {
                src_path: from.to_string(),
                dest_path: to.to_string()
            }
        )
    }
}

impl Renamer for OpenDalRenamer {
    async fn apply(&self, plan: &RenamePlan) -> Result<usize> {
        self.preflight(plan).await?;

        let mut moves = MoveLog::new(plan);
        match self.run(plan, &mut moves).await {
            Ok(()) => Ok(plan.ops.len()),
            Err(err) => Err(self.roll_back(moves, err).await),
        }
    }
}

impl OpenDalRenamer {
    async fn run(&self, plan: &RenamePlan, moves: &mut MoveLog) -> Result<()> {
        if !plan.needs_staging() {
            for (index, op) in plan.ops.iter().enumerate() {
                self.move_wrapped(&op.from, &op.to).await?;
                moves.moved(index, &op.to);
            }
            return Ok(());
        }

        log::debug!("targets overlap sources, staging {} move(s)", plan.ops.len());
        let mut staged = Vec::with_capacity(plan.ops.len());
        for (index, op) in plan.ops.iter().enumerate() {
            let temp = build_object_path(
                parent_dir_of(&op.from),
                &format!(".batchren-{}", Uuid::new_v4().simple()),
            );
            self.move_wrapped(&op.from, &temp).await?;
            moves.moved(index, &temp);
            staged.push(temp);
        }
        for (index, (temp, op)) in staged.iter().zip(&plan.ops).enumerate() {
            self.move_wrapped(temp, &op.to).await?;
            moves.moved(index, &op.to);
        }
        Ok(())
    }

    /// Undo completed moves newest first and report whatever stays out of place.
    async fn roll_back(&self, mut moves: MoveLog, cause: Error) -> Error {
        if moves.history.is_empty() {
            return cause;
        }

        log::warn!("rename failed, moving {} object(s) back: {cause}", moves.history.len());
        while let Some((index, previous)) = moves.history.pop() {
            let current = moves.current[index].clone();
            match self.move_object(&current, &previous).await {
                Ok(()) => moves.current[index] = previous,
                Err(err) => log::warn!("could not move '{current}' back to '{previous}': {err}"),
            }
        }

        let stranded = moves.stranded();
        if stranded.is_empty() {
            cause
        } else {
            Error::RollbackIncomplete {
                stranded,
                source: Box::new(cause),
            }
        }
    }
}

/// Where each object of a plan is while it is being applied.
struct MoveLog {
    originals: Vec<String>,
    current: Vec<String>,
    /// `(op index, path before the move)` in the order the moves happened
    history: Vec<(usize, String)>,
}

impl MoveLog {
    fn new(plan: &RenamePlan) -> Self {
        let originals: Vec<String> = plan.ops.iter().map(|op| op.from.clone()).collect();
        Self {
            current: originals.clone(),
            originals,
            history: Vec::new(),
        }
    }

    fn moved(&mut self, index: usize, to: &str) {
        let previous = std::mem::replace(&mut self.current[index], to.to_string());
        self.history.push((index, previous));
    }

    fn stranded(&self) -> Vec<(String, String)> {
        self.current
            .iter()
            .zip(&self.originals)
            .filter(|(current, original)| current != original)
            .map(|(current, original)| (current.clone(), original.clone()))
            .collect()
    }
}
