//! Tests for the drop controller.

use super::*;
use crate::project::{FsOperation, FsPrimitive};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

const APP_FILES: &[&str] = &[
    "/sln/readme.md",
    "/sln/app/app.csproj",
    "/sln/app/a.txt",
    "/sln/app/b.txt",
    "/sln/app/views/a.txt",
    "/sln/app/views/b.txt",
];

fn tree() -> TreeSnapshot {
    TreeSnapshot::new(vec![
        TreeNode::solution_file("s-readme", "/sln/readme.md"),
        TreeNode::project("p-app", "app", "/sln/app/app.csproj").with_children(vec![
            TreeNode::project_folder("f-models", "app", "/sln/app/models"),
            TreeNode::project_folder("f-views", "app", "/sln/app/views").with_children(vec![
                TreeNode::project_file("v-a", "app", "/sln/app/views/a.txt"),
                TreeNode::project_file("v-b", "app", "/sln/app/views/b.txt"),
            ]),
            TreeNode::project_file("a", "app", "/sln/app/a.txt"),
            TreeNode::project_file("b", "app", "/sln/app/b.txt"),
        ]),
    ])
}

fn views() -> TreeNode {
    TreeNode::project_folder("f-views", "app", "/sln/app/views")
}

fn dragged(ids: &[&str]) -> DataTransfer {
    let mut transfer = DataTransfer::new();
    transfer.set(SOLUTION_EXPLORER_MIME_TYPE, DataTransferItem::from_ids(ids));
    transfer
}

fn controller_with(prompt: Arc<dyn Prompt>) -> (Arc<InMemoryProject>, DragAndDropController) {
    let project = Arc::new(InMemoryProject::with_files("app", "App", APP_FILES.iter().copied()));
    let projects = ProjectRegistry::new().with(project.clone());
    let controller = DragAndDropController::new(Arc::new(tree()), projects, prompt, &DropConfig::default());
    (project, controller)
}

fn setup(prompt: ScriptedPrompt) -> (Arc<InMemoryProject>, Arc<ScriptedPrompt>, DragAndDropController) {
    crate::init_test_logging();
    let prompt = Arc::new(prompt);
    let (project, controller) = controller_with(prompt.clone());
    (project, prompt, controller)
}

/// Answers "Overwrite" and cancels the host token while the prompt is open.
struct CancellingPrompt {
    token: CancellationToken,
}

#[async_trait]
impl Prompt for CancellingPrompt {
    async fn show_warning(&self, _message: &str, _options: &[String]) -> Option<String> {
        self.token.cancel();
        Some("Overwrite".to_string())
    }
}

#[test]
fn test_mime_types() {
    let (_, _, controller) = setup(ScriptedPrompt::default());
    assert_eq!(controller.drop_mime_types(), &["application/vnd.code.tree.solutionExplorer"]);
    assert!(controller.drag_mime_types().is_empty());
}

#[test]
fn test_handle_drag_stores_ids() {
    let (_, _, controller) = setup(ScriptedPrompt::default());
    let sources = vec![TreeNode::project_file("a", "app", "/sln/app/a.txt"), views()];
    let mut transfer = DataTransfer::new();

    controller.handle_drag(&sources, &mut transfer, &CancellationToken::new());

    let ids = transfer.get(SOLUTION_EXPLORER_MIME_TYPE).map(DataTransferItem::as_ids);
    assert_eq!(ids, Some(vec!["a".to_string(), "f-views".to_string()]));
}

#[test]
fn test_handle_drag_when_cancelled_leaves_payload_alone() {
    let (_, _, controller) = setup(ScriptedPrompt::default());
    let token = CancellationToken::new();
    token.cancel();
    let mut transfer = DataTransfer::new();

    controller.handle_drag(&[views()], &mut transfer, &token);

    assert!(transfer.is_empty());
}

#[tokio::test]
async fn test_single_move_without_conflict() {
    let (project, prompt, controller) = setup(ScriptedPrompt::default());
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let summary = controller
        .handle_drop(Some(&models), &dragged(&["a"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.actions_total, 1);
    assert_eq!(summary.performed, 1);
    assert!(!summary.cancelled);
    assert!(prompt.warnings().is_empty());
    assert!(project.exists("/sln/app/models/a.txt"));
    assert!(!project.exists("/sln/app/a.txt"));
}

#[tokio::test]
async fn test_single_conflict_offers_three_options() {
    let (project, prompt, controller) = setup(ScriptedPrompt::answering(["Overwrite"]));

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["a"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.performed, 1);
    let warnings = prompt.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].options, vec!["Overwrite", "Keep Both", "Skip"]);
    assert_eq!(project.read("/sln/app/views/a.txt"), Some(b"/sln/app/a.txt".to_vec()));
}

#[tokio::test]
async fn test_skip_all_prompts_once_for_whole_batch() {
    let (project, prompt, controller) = setup(ScriptedPrompt::answering(["Skip All"]));

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["a", "b"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.actions_total, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.performed, 0);
    let warnings = prompt.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].options,
        vec!["Overwrite", "Keep Both", "Skip", "Overwrite All", "Keep Both All", "Skip All"]
    );
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_keep_both_all_applies_to_every_conflict() {
    let (project, prompt, controller) = setup(ScriptedPrompt::answering(["Keep Both All"]));

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["a", "b"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.performed, 2);
    assert_eq!(prompt.warnings().len(), 1);
    assert!(project.exists("/sln/app/views/a_copy.txt"));
    assert!(project.exists("/sln/app/views/b_copy.txt"));
    assert_eq!(project.read("/sln/app/views/a.txt"), Some(b"/sln/app/views/a.txt".to_vec()));
}

#[tokio::test]
async fn test_dismissed_prompt_stops_remaining_actions() {
    let (project, prompt, controller) = setup(ScriptedPrompt::new([None::<String>]));

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["a", "b"]), &CancellationToken::new())
        .await
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.performed + summary.skipped, 0);
    assert_eq!(prompt.warnings().len(), 1);
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_drop_onto_own_folder_is_same_file() {
    let (project, prompt, controller) = setup(ScriptedPrompt::default());

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["v-a"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.same_file, 1);
    assert!(prompt.warnings().is_empty());
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_unknown_ids_and_missing_payload_do_nothing() {
    let (project, prompt, controller) = setup(ScriptedPrompt::default());
    let token = CancellationToken::new();

    let summary = controller.handle_drop(Some(&views()), &dragged(&["ghost"]), &token).await.unwrap();
    assert_eq!(summary.actions_total, 0);

    let summary = controller.handle_drop(Some(&views()), &DataTransfer::new(), &token).await.unwrap();
    assert_eq!(summary.actions_total, 0);

    assert!(prompt.warnings().is_empty());
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_missing_target_does_nothing() {
    let (project, _, controller) = setup(ScriptedPrompt::default());

    let summary = controller
        .handle_drop(None, &dragged(&["a"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.actions_total, 0);
    assert!(!summary.cancelled);
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_cancelled_token_before_start() {
    let (project, prompt, controller) = setup(ScriptedPrompt::answering(["Overwrite"]));
    let token = CancellationToken::new();
    token.cancel();

    let summary = controller.handle_drop(Some(&views()), &dragged(&["a"]), &token).await.unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.actions_total, 0);
    assert!(prompt.warnings().is_empty());
    assert!(project.operations().is_empty());
}

#[tokio::test]
async fn test_token_cancelled_mid_batch_finishes_current_action_only() {
    let token = CancellationToken::new();
    let (project, controller) = controller_with(Arc::new(CancellingPrompt { token: token.clone() }));

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["a", "b"]), &token)
        .await
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.actions_total, 2);
    assert_eq!(summary.performed, 1);
    assert!(!project.exists("/sln/app/a.txt"));
    assert!(project.exists("/sln/app/b.txt"));
}

#[tokio::test]
async fn test_failure_is_shown_and_earlier_actions_stay_applied() {
    let (project, prompt, controller) = setup(ScriptedPrompt::answering(["Overwrite"]));
    project.add_file("/sln/app/models/b.txt", b"old");
    project.fail_on(FsPrimitive::Delete, ProjectError::PermissionDenied("b.txt".to_string()));
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let err = controller
        .handle_drop(Some(&models), &dragged(&["a", "b"]), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DropError::Project { ref path, .. } if path == "/sln/app/models/b.txt"));
    assert_eq!(
        prompt.errors(),
        vec!["Cannot write to \"/sln/app/models/b.txt\": permission denied.".to_string()]
    );
    assert_eq!(
        project.operations(),
        vec![FsOperation::Move {
            source: PathBuf::from("/sln/app/a.txt"),
            target_folder: PathBuf::from("/sln/app/models"),
        }]
    );
}

#[tokio::test]
async fn test_solution_file_is_copied_into_project() {
    let (project, _, controller) = setup(ScriptedPrompt::default());

    let summary = controller
        .handle_drop(Some(&views()), &dragged(&["s-readme"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.performed, 1);
    assert!(project.exists("/sln/readme.md"));
    assert!(project.exists("/sln/app/views/readme.md"));
}

#[tokio::test]
async fn test_folder_drop_fans_out_into_one_action_per_file() {
    let (project, prompt, controller) = setup(ScriptedPrompt::default());
    let models = TreeNode::project_folder("f-models", "app", "/sln/app/models");

    let summary = controller
        .handle_drop(Some(&models), &dragged(&["f-views"]), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(summary.actions_total, 2);
    assert_eq!(summary.performed, 2);
    assert!(prompt.warnings().is_empty());
    assert!(project.exists("/sln/app/models/views/a.txt"));
    assert!(project.exists("/sln/app/models/views/b.txt"));
}

#[test]
fn test_summary_serializes_camel_case() {
    let summary = DropSummary {
        drop_id: "id".to_string(),
        actions_total: 2,
        performed: 1,
        skipped: 1,
        same_file: 0,
        cancelled: false,
    };
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["dropId"], "id");
    assert_eq!(json["actionsTotal"], 2);
    assert_eq!(json["sameFile"], 0);
}
