//! Drop orchestration.
//!
//! One `handle_drop` call is one sequential chain: resolve the dropped ids, ask every handler about
//! every node, then run the resulting actions one at a time under a single `ActionContext`.
//! The host's cancellation token is polled before resolution, after resolution, after dispatch and
//! before each action. An action that has started always runs to completion.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::actions::{Action, ActionContext, ActionOutcome};
use crate::cancellation::CancellationToken;
use crate::config::DropConfig;
use crate::error::DropError;
use crate::handlers::{DropHandler, default_handlers};
use crate::project::ProjectRegistry;
use crate::prompt::Prompt;
use crate::resolver::{TreeProvider, resolve_nodes};
use crate::transfer::{DataTransfer, DataTransferItem, SOLUTION_EXPLORER_MIME_TYPE};
use crate::tree::TreeNode;

const DROP_MIME_TYPES: &[&str] = &[SOLUTION_EXPLORER_MIME_TYPE];

/// What a drop did.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DropSummary {
    /// Unique id of this drop, as used in log lines
    pub drop_id: String,
    /// Number of actions the handlers produced
    pub actions_total: usize,
    pub performed: usize,
    pub skipped: usize,
    pub same_file: usize,
    /// True if the host or the user stopped the drop early
    pub cancelled: bool,
}

impl DropSummary {
    fn new(drop_id: String) -> Self {
        Self {
            drop_id,
            actions_total: 0,
            performed: 0,
            skipped: 0,
            same_file: 0,
            cancelled: false,
        }
    }

    fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    fn record(&mut self, outcome: ActionOutcome) {
        match outcome {
            ActionOutcome::Performed => self.performed += 1,
            ActionOutcome::Skipped => self.skipped += 1,
            ActionOutcome::SameFile => self.same_file += 1,
            ActionOutcome::Cancelled => self.cancelled = true,
        }
    }
}

/// Drag-and-drop controller for a project tree view.
pub struct DragAndDropController {
    tree: Arc<dyn TreeProvider>,
    projects: ProjectRegistry,
    prompt: Arc<dyn Prompt>,
    handlers: Vec<Box<dyn DropHandler>>,
}

impl DragAndDropController {
    /// Creates a controller with the built-in handlers enabled by `config`.
    pub fn new(
        tree: Arc<dyn TreeProvider>,
        projects: ProjectRegistry,
        prompt: Arc<dyn Prompt>,
        config: &DropConfig,
    ) -> Self {
        Self::with_handlers(tree, projects, prompt, default_handlers(config))
    }

    /// Creates a controller with an explicit handler list, evaluated in the given order.
    pub fn with_handlers(
        tree: Arc<dyn TreeProvider>,
        projects: ProjectRegistry,
        prompt: Arc<dyn Prompt>,
        handlers: Vec<Box<dyn DropHandler>>,
    ) -> Self {
        Self {
            tree,
            projects,
            prompt,
            handlers,
        }
    }

    /// MIME types this controller accepts on drop.
    pub fn drop_mime_types(&self) -> &'static [&'static str] {
        DROP_MIME_TYPES
    }

    /// MIME types this controller offers on drag. Drags only carry ids, under the drop type.
    pub fn drag_mime_types(&self) -> &'static [&'static str] {
        &[]
    }

    /// Puts the ids of the dragged nodes into the payload.
    pub fn handle_drag(&self, sources: &[TreeNode], transfer: &mut DataTransfer, token: &CancellationToken) {
        if token.is_cancellation_requested() {
            return;
        }
        let ids: Vec<&str> = sources.iter().map(|node| node.id.as_str()).collect();
        log::debug!("handle_drag: {} node(s)", ids.len());
        transfer.set(SOLUTION_EXPLORER_MIME_TYPE, DataTransferItem::from_ids(&ids));
    }

    /// Handles a drop of `sources` onto `target`.
    ///
    /// Unknown ids, a missing target and cancellation end the drop quietly. The first failing
    /// primitive stops the drop: the error is shown to the user and returned, and actions that
    /// already ran stay applied.
    pub async fn handle_drop(
        &self,
        target: Option<&TreeNode>,
        sources: &DataTransfer,
        token: &CancellationToken,
    ) -> Result<DropSummary, DropError> {
        let drop_id = Uuid::new_v4().to_string();
        match self.run_drop(&drop_id, target, sources, token).await {
            Ok(summary) => {
                log::info!(
                    "handle_drop: drop_id={} done, {} action(s), performed={}, skipped={}, same_file={}, cancelled={}",
                    drop_id,
                    summary.actions_total,
                    summary.performed,
                    summary.skipped,
                    summary.same_file,
                    summary.cancelled
                );
                Ok(summary)
            }
            Err(e) => {
                log::error!("handle_drop: drop_id={} failed: {}", drop_id, e);
                self.prompt.show_error(&e.user_message()).await;
                Err(e)
            }
        }
    }

    async fn run_drop(
        &self,
        drop_id: &str,
        target: Option<&TreeNode>,
        sources: &DataTransfer,
        token: &CancellationToken,
    ) -> Result<DropSummary, DropError> {
        let summary = DropSummary::new(drop_id.to_string());
        let Some(target) = target else {
            log::debug!("handle_drop: drop_id={} has no target, ignoring", drop_id);
            return Ok(summary);
        };
        if token.is_cancellation_requested() {
            return Ok(summary.cancelled());
        }

        let ids = sources
            .get(SOLUTION_EXPLORER_MIME_TYPE)
            .map(DataTransferItem::as_ids)
            .unwrap_or_default();
        let roots = self.tree.get_children().await.unwrap_or_default();
        let nodes = resolve_nodes(&ids, &roots);
        log::debug!(
            "handle_drop: drop_id={} resolved {} of {} id(s) onto {}",
            drop_id,
            nodes.len(),
            ids.len(),
            target.id
        );
        if token.is_cancellation_requested() {
            return Ok(summary.cancelled());
        }

        let actions = self.collect_actions(drop_id, target, &nodes).await?;
        if token.is_cancellation_requested() {
            return Ok(summary.cancelled());
        }

        self.run_actions(summary, &actions, token).await
    }

    /// Asks every handler about every node, in order, and concatenates their actions.
    async fn collect_actions(
        &self,
        drop_id: &str,
        target: &TreeNode,
        nodes: &[&TreeNode],
    ) -> Result<Vec<Box<dyn Action>>, DropError> {
        let mut actions = Vec::new();
        for node in nodes {
            for handler in &self.handlers {
                if handler.can_handle(node, target).await {
                    let produced = handler.handle(node, target, &self.projects).await?;
                    log::debug!(
                        "handle_drop: drop_id={} {} produced {} action(s) for {}",
                        drop_id,
                        handler.name(),
                        produced.len(),
                        node.id
                    );
                    actions.extend(produced);
                }
            }
        }
        Ok(actions)
    }

    async fn run_actions(
        &self,
        mut summary: DropSummary,
        actions: &[Box<dyn Action>],
        token: &CancellationToken,
    ) -> Result<DropSummary, DropError> {
        summary.actions_total = actions.len();
        let mut context = ActionContext::new(actions.len());

        for action in actions {
            if token.is_cancellation_requested() || context.is_cancelled() {
                summary.cancelled = true;
                break;
            }
            log::debug!("handle_drop: drop_id={} {}", summary.drop_id, action.describe());
            let outcome = action.execute(&mut context, self.prompt.as_ref()).await?;
            summary.record(outcome);
        }
        Ok(summary)
    }
}
